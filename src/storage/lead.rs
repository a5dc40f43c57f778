//! Lead storage: create, load, update, and list leads within a profile.

use jiff::Timestamp;
use rusqlite::{Connection, OptionalExtension};
use uuid::Uuid;

use crate::model::{AddedVia, AudienceSize, Lead, LeadStatus, OutreachEvent, Platform, Source};

use super::outreach::{insert_event, load_history};
use super::{Result, Storage, StorageError};

impl Storage {
    /// Creates a new lead, creating the profile database on first use.
    pub fn create_lead(&self, profile: &str, lead: &Lead) -> Result<()> {
        let conn = self.open_or_create_db(profile)?;
        insert_lead(&conn, lead)?;
        for event in &lead.outreach_history {
            insert_event(&conn, lead.id, event)?;
        }
        Ok(())
    }

    /// Loads a single lead with its full outreach history.
    pub fn load_lead(&self, profile: &str, id: Uuid) -> Result<Lead> {
        let conn = self.open_db(profile)?;
        load_lead_row(&conn, id)
    }

    /// Moves a lead to a new status, touching `last_updated`.
    ///
    /// Also clears the stored follow-up decision: every status change made
    /// through here ends scheduling for the lead.
    pub fn update_status(
        &self,
        profile: &str,
        id: Uuid,
        status: LeadStatus,
        at: Timestamp,
    ) -> Result<()> {
        let conn = self.open_db(profile)?;
        let rows = conn.execute(
            "UPDATE lead
             SET status = ?1,
                 next_follow_up_platform = NULL,
                 next_follow_up_at = NULL,
                 last_updated = ?2
             WHERE id = ?3",
            rusqlite::params![status.as_str(), at.to_string(), id.to_string()],
        )?;
        if rows == 0 {
            return Err(StorageError::LeadNotFound(id));
        }
        Ok(())
    }

    /// Lists all leads in a profile, oldest first.
    pub fn list_leads(&self, profile: &str) -> Result<Vec<Lead>> {
        let conn = self.open_db(profile)?;
        let mut stmt = conn.prepare("SELECT id FROM lead")?;
        let ids = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<rusqlite::Result<Vec<String>>>()?;

        let mut leads = Vec::with_capacity(ids.len());
        for id_str in ids {
            let id = id_str
                .parse::<Uuid>()
                .map_err(|e| StorageError::Corrupt(format!("invalid lead id: {e}")))?;
            leads.push(load_lead_row(&conn, id)?);
        }
        leads.sort_by(|a, b| a.added_at.cmp(&b.added_at));
        Ok(leads)
    }
}

fn insert_lead(conn: &Connection, lead: &Lead) -> Result<()> {
    conn.execute(
        "INSERT INTO lead (
            id, name, location, utc_offset, email, whatsapp,
            instagram_url, linkedin_url, facebook_url, website_url,
            source, audience, follower_count, platforms, status,
            next_follow_up_platform, next_follow_up_at,
            added_at, added_via, last_updated
         ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10,
                   ?11, ?12, ?13, ?14, ?15, ?16, ?17, ?18, ?19, ?20)",
        rusqlite::params![
            lead.id.to_string(),
            &lead.name,
            &lead.location,
            lead.utc_offset,
            &lead.email,
            &lead.whatsapp,
            &lead.instagram_url,
            &lead.linkedin_url,
            &lead.facebook_url,
            &lead.website_url,
            lead.source.as_str(),
            lead.audience.map(AudienceSize::as_str),
            lead.follower_count.map(|n| n as i64),
            serde_json::to_string(&lead.platforms)?,
            lead.status.as_str(),
            lead.next_follow_up_platform.map(Platform::as_str),
            lead.next_follow_up_at.map(|t| t.to_string()),
            lead.added_at.to_string(),
            lead.added_via.as_str(),
            lead.last_updated.to_string(),
        ],
    )?;
    Ok(())
}

/// Raw column values for one lead row, parsed into a `Lead` afterwards so
/// bad data surfaces as [`StorageError::Corrupt`] instead of a `SQLite`
/// mapping error.
struct LeadRow {
    id: String,
    name: String,
    location: Option<String>,
    utc_offset: Option<i64>,
    email: Option<String>,
    whatsapp: Option<String>,
    instagram_url: Option<String>,
    linkedin_url: Option<String>,
    facebook_url: Option<String>,
    website_url: Option<String>,
    source: String,
    audience: Option<String>,
    follower_count: Option<i64>,
    platforms: String,
    status: String,
    next_follow_up_platform: Option<String>,
    next_follow_up_at: Option<String>,
    added_at: String,
    added_via: String,
    last_updated: String,
}

/// Reads one lead row (and its history) from an open connection.
pub(super) fn load_lead_row(conn: &Connection, id: Uuid) -> Result<Lead> {
    let row = conn
        .query_row(
            "SELECT id, name, location, utc_offset, email, whatsapp,
                    instagram_url, linkedin_url, facebook_url, website_url,
                    source, audience, follower_count, platforms, status,
                    next_follow_up_platform, next_follow_up_at,
                    added_at, added_via, last_updated
             FROM lead WHERE id = ?1",
            rusqlite::params![id.to_string()],
            |row| {
                Ok(LeadRow {
                    id: row.get(0)?,
                    name: row.get(1)?,
                    location: row.get(2)?,
                    utc_offset: row.get(3)?,
                    email: row.get(4)?,
                    whatsapp: row.get(5)?,
                    instagram_url: row.get(6)?,
                    linkedin_url: row.get(7)?,
                    facebook_url: row.get(8)?,
                    website_url: row.get(9)?,
                    source: row.get(10)?,
                    audience: row.get(11)?,
                    follower_count: row.get(12)?,
                    platforms: row.get(13)?,
                    status: row.get(14)?,
                    next_follow_up_platform: row.get(15)?,
                    next_follow_up_at: row.get(16)?,
                    added_at: row.get(17)?,
                    added_via: row.get(18)?,
                    last_updated: row.get(19)?,
                })
            },
        )
        .optional()?
        .ok_or(StorageError::LeadNotFound(id))?;

    let history = load_history(conn, id)?;
    lead_from_row(row, history)
}

fn lead_from_row(row: LeadRow, history: Vec<OutreachEvent>) -> Result<Lead> {
    let id = row
        .id
        .parse::<Uuid>()
        .map_err(|e| StorageError::Corrupt(format!("invalid lead id: {e}")))?;
    let utc_offset = row
        .utc_offset
        .map(|v| {
            i8::try_from(v)
                .ok()
                .filter(|o| (-12..=14).contains(o))
                .ok_or_else(|| StorageError::Corrupt(format!("utc_offset out of range: {v}")))
        })
        .transpose()?;
    let source = Source::parse(&row.source)
        .ok_or_else(|| StorageError::Corrupt(format!("unknown source: {}", row.source)))?;
    let audience = row
        .audience
        .as_deref()
        .map(|s| {
            AudienceSize::parse(s)
                .ok_or_else(|| StorageError::Corrupt(format!("unknown audience size: {s}")))
        })
        .transpose()?;
    let follower_count = row
        .follower_count
        .map(u64::try_from)
        .transpose()
        .map_err(|_| StorageError::Corrupt("negative follower_count".into()))?;
    let platforms: Vec<Platform> = serde_json::from_str(&row.platforms)
        .map_err(|e| StorageError::Corrupt(format!("invalid platforms list: {e}")))?;
    let status = LeadStatus::parse(&row.status)
        .ok_or_else(|| StorageError::Corrupt(format!("unknown status: {}", row.status)))?;
    let next_follow_up_platform = row
        .next_follow_up_platform
        .as_deref()
        .map(|s| {
            Platform::parse(s)
                .ok_or_else(|| StorageError::Corrupt(format!("unknown platform: {s}")))
        })
        .transpose()?;
    let next_follow_up_at = row
        .next_follow_up_at
        .as_deref()
        .map(|s| {
            s.parse::<Timestamp>()
                .map_err(|e| StorageError::Corrupt(format!("invalid next_follow_up_at: {e}")))
        })
        .transpose()?;
    let added_at = row
        .added_at
        .parse::<Timestamp>()
        .map_err(|e| StorageError::Corrupt(format!("invalid added_at: {e}")))?;
    let added_via = AddedVia::parse(&row.added_via)
        .ok_or_else(|| StorageError::Corrupt(format!("unknown added_via: {}", row.added_via)))?;
    let last_updated = row
        .last_updated
        .parse::<Timestamp>()
        .map_err(|e| StorageError::Corrupt(format!("invalid last_updated: {e}")))?;

    Ok(Lead {
        id,
        name: row.name,
        location: row.location,
        utc_offset,
        email: row.email,
        whatsapp: row.whatsapp,
        instagram_url: row.instagram_url,
        linkedin_url: row.linkedin_url,
        facebook_url: row.facebook_url,
        website_url: row.website_url,
        source,
        audience,
        follower_count,
        platforms,
        status,
        outreach_history: history,
        next_follow_up_platform,
        next_follow_up_at,
        added_at,
        added_via,
        last_updated,
    })
}
