//! Bulk import of scraped profiles.
//!
//! Reads a JSON dump (an array of scraped profile records, as the browser
//! scraper exports them), maps each record to a [`Lead`], and deduplicates
//! by a content fingerprint so re-running an import doesn't create the
//! same person twice. Records that can't become a usable lead are reported
//! with a reason instead of silently dropped; one bad record never aborts
//! the rest of the dump.

use std::collections::HashSet;
use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

use jiff::Timestamp;
use serde::Deserialize;
use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::model::{AddedVia, AudienceSize, Lead, LeadStatus, Platform, Source};

/// Errors that abort an import before any record is processed.
#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("invalid dump: {0}")]
    Json(#[from] serde_json::Error),
}

/// One scraped profile record, as the scraper's JSON dump carries it.
///
/// Unknown fields are ignored, so dumps can carry scraper-internal extras.
/// Missing strings and empty strings both mean "not captured".
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ScrapedProfile {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    location: Option<String>,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    whatsapp: Option<String>,
    #[serde(default)]
    instagram_url: Option<String>,
    #[serde(default)]
    linkedin_url: Option<String>,
    #[serde(default)]
    facebook_url: Option<String>,
    #[serde(default)]
    website_url: Option<String>,
    #[serde(default)]
    platforms: Vec<String>,
    #[serde(default)]
    follower_count: Option<u64>,
    #[serde(default)]
    size: Option<String>,
}

/// What an import run did: the leads to create, plus every record that
/// was passed over and why.
#[derive(Debug)]
pub struct ImportReport {
    pub imported: Vec<Lead>,
    pub skipped: Vec<Skipped>,
}

/// A dump record that didn't become a lead.
#[derive(Debug)]
pub struct Skipped {
    /// Zero-based position in the dump.
    pub index: usize,
    pub name: Option<String>,
    pub reason: SkipReason,
}

#[derive(Debug, PartialEq, Eq)]
pub enum SkipReason {
    /// The record has no usable name.
    MissingName,

    /// The record lists a platform the cadence doesn't know.
    UnknownPlatform(String),

    /// A lead with the same fingerprint already exists (in the profile
    /// or earlier in the same dump).
    Duplicate,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingName => write!(f, "no name"),
            Self::UnknownPlatform(p) => write!(f, "unknown platform '{p}'"),
            Self::Duplicate => write!(f, "already imported"),
        }
    }
}

/// Reads a scrape dump and maps its records to leads, deduplicating
/// against `existing` and within the dump itself.
///
/// The caller persists the returned leads; this function only reads the
/// dump file.
pub fn import_dump(
    path: &Path,
    existing: &[Lead],
    now: Timestamp,
) -> Result<ImportReport, ImportError> {
    let contents = fs::read_to_string(path)?;
    let records: Vec<ScrapedProfile> = serde_json::from_str(&contents)?;

    let mut seen: HashSet<String> = existing
        .iter()
        .map(|l| fingerprint(&l.name, l.instagram_url.as_deref()))
        .collect();

    let mut report = ImportReport {
        imported: Vec::new(),
        skipped: Vec::new(),
    };
    for (index, record) in records.into_iter().enumerate() {
        let name = record.name.clone();
        match lead_from_record(record, now) {
            Ok(lead) => {
                let print = fingerprint(&lead.name, lead.instagram_url.as_deref());
                if seen.insert(print) {
                    report.imported.push(lead);
                } else {
                    report.skipped.push(Skipped {
                        index,
                        name,
                        reason: SkipReason::Duplicate,
                    });
                }
            }
            Err(reason) => report.skipped.push(Skipped {
                index,
                name,
                reason,
            }),
        }
    }
    Ok(report)
}

/// Case-insensitive identity of a profile: its name plus Instagram URL,
/// hashed so the value is a fixed-width key.
pub fn fingerprint(name: &str, instagram_url: Option<&str>) -> String {
    let mut hasher = Sha256::new();
    hasher.update(name.trim().to_lowercase());
    hasher.update("\n");
    hasher.update(instagram_url.unwrap_or("").trim().to_lowercase());
    hex::encode(hasher.finalize())
}

fn lead_from_record(record: ScrapedProfile, now: Timestamp) -> Result<Lead, SkipReason> {
    let name = record
        .name
        .as_deref()
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .ok_or(SkipReason::MissingName)?
        .to_string();

    // Scrapes that captured no platform list default to Instagram: that's
    // where the profile was found.
    let platforms = if record.platforms.is_empty() {
        vec![Platform::Instagram]
    } else {
        record
            .platforms
            .iter()
            .map(|p| Platform::parse(p).ok_or_else(|| SkipReason::UnknownPlatform(p.clone())))
            .collect::<Result<Vec<Platform>, SkipReason>>()?
    };

    // Unknown size labels are dropped, not fatal; the bracket is advisory.
    let audience = record.size.as_deref().and_then(AudienceSize::parse);

    Ok(Lead {
        id: Uuid::new_v4(),
        name,
        location: non_empty(record.location),
        utc_offset: None,
        email: non_empty(record.email),
        whatsapp: non_empty(record.whatsapp),
        instagram_url: non_empty(record.instagram_url),
        linkedin_url: non_empty(record.linkedin_url),
        facebook_url: non_empty(record.facebook_url),
        website_url: non_empty(record.website_url),
        source: Source::Instagram,
        audience,
        follower_count: record.follower_count,
        platforms,
        status: LeadStatus::NotContacted,
        outreach_history: Vec::new(),
        next_follow_up_platform: None,
        next_follow_up_at: None,
        added_at: now,
        added_via: AddedVia::Bulk,
        last_updated: now,
    })
}

fn non_empty(s: Option<String>) -> Option<String> {
    s.filter(|s| !s.trim().is_empty())
}
