//! List-query building for store collections

use serde::Deserialize;
use serde_json::Value;

/// Query parameters for listing records from a collection
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordQuery {
    filter: Option<String>,
    sort: Option<String>,
    page: Option<u32>,
    per_page: Option<u32>,
}

impl RecordQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Filter expression, e.g. `status = "New"`
    pub fn filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = Some(filter.into());
        self
    }

    /// Sort expression, e.g. `-created` for newest first
    pub fn sort(mut self, sort: impl Into<String>) -> Self {
        self.sort = Some(sort.into());
        self
    }

    pub fn page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    pub fn per_page(mut self, per_page: u32) -> Self {
        self.per_page = Some(per_page);
        self
    }

    /// Render as a URL query string with a leading `?`; empty when nothing
    /// is set
    pub fn to_query_string(&self) -> String {
        let mut params: Vec<String> = Vec::new();
        if let Some(page) = self.page {
            params.push(format!("page={}", page));
        }
        if let Some(per_page) = self.per_page {
            params.push(format!("perPage={}", per_page));
        }
        if let Some(filter) = &self.filter {
            params.push(format!("filter={}", urlencoding::encode(filter)));
        }
        if let Some(sort) = &self.sort {
            params.push(format!("sort={}", urlencoding::encode(sort)));
        }

        if params.is_empty() {
            String::new()
        } else {
            format!("?{}", params.join("&"))
        }
    }
}

/// One page of a collection listing
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordPage {
    pub page: u32,
    pub per_page: u32,
    pub total_items: u64,
    pub total_pages: u32,
    pub items: Vec<Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_query_renders_nothing() {
        assert_eq!(RecordQuery::new().to_query_string(), "");
    }

    #[test]
    fn test_full_query_string() {
        let query = RecordQuery::new()
            .page(2)
            .per_page(50)
            .filter("status = \"New\"")
            .sort("-created");
        assert_eq!(
            query.to_query_string(),
            "?page=2&perPage=50&filter=status%20%3D%20%22New%22&sort=-created"
        );
    }

    #[test]
    fn test_page_parse() {
        let page: RecordPage = serde_json::from_value(serde_json::json!({
            "page": 1,
            "perPage": 30,
            "totalItems": 2,
            "totalPages": 1,
            "items": [{"id": "a"}, {"id": "b"}]
        }))
        .unwrap();
        assert_eq!(page.per_page, 30);
        assert_eq!(page.total_items, 2);
        assert_eq!(page.items.len(), 2);
    }
}
