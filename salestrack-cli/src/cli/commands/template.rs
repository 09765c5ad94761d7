//! Template command: write the canonical import template

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::cli::TemplateFormat;
use crate::import::{ImportSchema, TEMPLATE_BASENAME, template_csv, template_xlsx};

pub fn handle(out_dir: PathBuf, format: TemplateFormat) -> Result<()> {
    fs::create_dir_all(&out_dir)
        .with_context(|| format!("failed to create output directory: {}", out_dir.display()))?;
    let schema = ImportSchema::new();

    if matches!(format, TemplateFormat::Xlsx | TemplateFormat::Both) {
        let path = out_dir.join(format!("{}.xlsx", TEMPLATE_BASENAME));
        fs::write(&path, template_xlsx(&schema)?)
            .with_context(|| format!("failed to write template: {}", path.display()))?;
        println!("Wrote {}", path.display());
    }

    if matches!(format, TemplateFormat::Csv | TemplateFormat::Both) {
        let path = out_dir.join(format!("{}.csv", TEMPLATE_BASENAME));
        fs::write(&path, template_csv(&schema)?)
            .with_context(|| format!("failed to write template: {}", path.display()))?;
        println!("Wrote {}", path.display());
    }

    Ok(())
}
