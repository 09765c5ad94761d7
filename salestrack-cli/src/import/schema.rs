//! Canonical import schema: field aliases, closed enums, template sample
//!
//! Single source of truth for header resolution and template generation. The
//! template's column order is the order of `ImportSchema::fields`, and each
//! field's canonical header name is its first alias.

use serde::{Deserialize, Serialize};

/// Logical columns the importer understands, independent of the literal
/// header text used in a given file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CanonicalField {
    InstitutionName,
    InstitutionCode,
    NationalNumber,
    Type,
    Status,
    City,
    Address,
    Website,
    FirstBuyDate,
    ContactName,
    ContactPosition,
    ContactPhone,
    ContactEmail,
    ContactStatus,
    ContactIsPrimary,
}

/// Alias list for one canonical field; the first alias is the canonical
/// header name
#[derive(Debug, Clone)]
pub struct FieldSpec {
    pub field: CanonicalField,
    pub aliases: &'static [&'static str],
}

/// Closed-enum option with the label it is matched and stored by
pub trait Labeled: Copy {
    fn label(&self) -> &'static str;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InstitutionType {
    Yayasan,
    #[serde(rename = "CSR")]
    Csr,
    Pemerintah,
    Sekolah,
    Other,
}

impl Labeled for InstitutionType {
    fn label(&self) -> &'static str {
        match self {
            InstitutionType::Yayasan => "Yayasan",
            InstitutionType::Csr => "CSR",
            InstitutionType::Pemerintah => "Pemerintah",
            InstitutionType::Sekolah => "Sekolah",
            InstitutionType::Other => "Other",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InstitutionStatus {
    New,
    #[serde(rename = "Existing Customer")]
    ExistingCustomer,
    Blacklist,
}

impl Labeled for InstitutionStatus {
    fn label(&self) -> &'static str {
        match self {
            InstitutionStatus::New => "New",
            InstitutionStatus::ExistingCustomer => "Existing Customer",
            InstitutionStatus::Blacklist => "Blacklist",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContactStatus {
    Active,
    #[serde(rename = "Non Active")]
    NonActive,
}

impl Labeled for ContactStatus {
    fn label(&self) -> &'static str {
        match self {
            ContactStatus::Active => "Active",
            ContactStatus::NonActive => "Non Active",
        }
    }
}

/// Immutable import configuration handed to header resolution, row
/// validation, and template generation
#[derive(Debug, Clone)]
pub struct ImportSchema {
    pub fields: Vec<FieldSpec>,
    pub institution_types: Vec<InstitutionType>,
    pub institution_statuses: Vec<InstitutionStatus>,
    pub contact_statuses: Vec<ContactStatus>,
}

impl Default for ImportSchema {
    fn default() -> Self {
        Self::new()
    }
}

impl ImportSchema {
    pub fn new() -> Self {
        let fields = vec![
            field(CanonicalField::InstitutionName, &["institution_name", "name", "institution"]),
            field(CanonicalField::InstitutionCode, &["institution_code", "code"]),
            field(CanonicalField::NationalNumber, &["national_number", "npwp", "npsn", "nib"]),
            field(CanonicalField::Type, &["type"]),
            field(CanonicalField::Status, &["status"]),
            field(CanonicalField::City, &["city"]),
            field(CanonicalField::Address, &["address"]),
            field(CanonicalField::Website, &["website", "url"]),
            field(CanonicalField::FirstBuyDate, &["first_buy_date", "first_buy", "first_buying_date"]),
            field(CanonicalField::ContactName, &["contact_name", "contact", "pic_name"]),
            field(CanonicalField::ContactPosition, &["contact_position", "position", "job_title"]),
            field(CanonicalField::ContactPhone, &["contact_phone", "phone", "contact_phone_number"]),
            field(CanonicalField::ContactEmail, &["contact_email", "contact_mail"]),
            field(CanonicalField::ContactStatus, &["contact_status"]),
            field(CanonicalField::ContactIsPrimary, &["contact_is_primary", "is_primary", "primary"]),
        ];

        Self {
            fields,
            institution_types: vec![
                InstitutionType::Yayasan,
                InstitutionType::Csr,
                InstitutionType::Pemerintah,
                InstitutionType::Sekolah,
                InstitutionType::Other,
            ],
            institution_statuses: vec![
                InstitutionStatus::New,
                InstitutionStatus::ExistingCustomer,
                InstitutionStatus::Blacklist,
            ],
            contact_statuses: vec![ContactStatus::Active, ContactStatus::NonActive],
        }
    }

    /// Canonical header names, in template column order
    pub fn template_headers(&self) -> Vec<&'static str> {
        self.fields.iter().map(|spec| spec.aliases[0]).collect()
    }
}

fn field(field: CanonicalField, aliases: &'static [&'static str]) -> FieldSpec {
    FieldSpec { field, aliases }
}

/// Example row shipped with the downloadable template, aligned with
/// `template_headers`
pub const TEMPLATE_SAMPLE: [&str; 15] = [
    "PT Contoh Sukses",
    "INST-001",
    "123456789",
    "CSR",
    "New",
    "Jakarta",
    "Jl. Sudirman No. 1",
    "https://contoh.co.id",
    "2025-01-31",
    "Budi Santoso",
    "Head of CSR",
    "08123456789",
    "budi@contoh.co.id",
    "Active",
    "yes",
];
