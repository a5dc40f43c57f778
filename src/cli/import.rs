//! Bulk import: scraped-profile dumps into a profile's lead list.

use std::path::Path;

use jiff::Zoned;

use crate::{import, storage::Storage};

pub(super) fn cmd_import(storage: &Storage, profile: &str, file: &Path) -> Result<(), String> {
    let existing = super::list_leads_or_empty(storage, profile)?;
    let now = Zoned::now();

    let report = import::import_dump(file, &existing, now.timestamp())
        .map_err(|e| format!("failed to import {}: {e}", file.display()))?;

    let imported = report.imported.len();
    for mut lead in report.imported {
        super::refresh_next_follow_up(&mut lead, &now);
        storage
            .create_lead(profile, &lead)
            .map_err(|e| format!("failed to save '{}': {e}", lead.name))?;
        println!("{}", lead.id);
    }

    for skip in &report.skipped {
        match &skip.name {
            Some(name) => eprintln!("Skipped record {} ({name}): {}", skip.index, skip.reason),
            None => eprintln!("Skipped record {}: {}", skip.index, skip.reason),
        }
    }
    eprintln!("Imported {imported} lead(s), skipped {}", report.skipped.len());

    Ok(())
}
