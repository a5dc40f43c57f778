//! Outreach storage: the per-slot rows behind each lead's history.

use jiff::Timestamp;
use rusqlite::Connection;
use uuid::Uuid;

use crate::model::{FollowUp, LeadStatus, Outcome, OutreachEvent, Platform};

use super::{Result, Storage, StorageError};

impl Storage {
    /// Records acting on a cadence slot, atomically: every event appends,
    /// the lead moves to `status`, and the stored follow-up decision is
    /// replaced with `next` (computed by the caller against the history as
    /// it will be after this write), or nothing happens.
    ///
    /// Multiple events arrive when the acted-on follow-up jumped past
    /// unavailable platforms and the passed-over slots are recorded as
    /// skipped alongside the send.
    pub fn record_follow_up(
        &self,
        profile: &str,
        lead_id: Uuid,
        events: &[OutreachEvent],
        status: LeadStatus,
        next: Option<&FollowUp>,
        at: Timestamp,
    ) -> Result<()> {
        let mut conn = self.open_db(profile)?;
        let tx = conn.transaction()?;
        let rows = tx.execute(
            "UPDATE lead
             SET status = ?1,
                 next_follow_up_platform = ?2,
                 next_follow_up_at = ?3,
                 last_updated = ?4
             WHERE id = ?5",
            rusqlite::params![
                status.as_str(),
                next.map(|fu| fu.platform.as_str()),
                next.map(|fu| fu.due_at.timestamp().to_string()),
                at.to_string(),
                lead_id.to_string(),
            ],
        )?;
        if rows == 0 {
            return Err(StorageError::LeadNotFound(lead_id));
        }
        for event in events {
            insert_event(&tx, lead_id, event)?;
        }
        tx.commit()?;
        Ok(())
    }

    /// Marks the lead's latest outreach slot as replied and moves the lead
    /// to in-conversation, atomically. The stored follow-up decision is
    /// cleared: a replied lead has nothing scheduled.
    pub fn mark_replied(&self, profile: &str, lead_id: Uuid, at: Timestamp) -> Result<()> {
        let mut conn = self.open_db(profile)?;
        let tx = conn.transaction()?;
        let rows = tx.execute(
            "UPDATE lead
             SET status = ?1,
                 next_follow_up_platform = NULL,
                 next_follow_up_at = NULL,
                 last_updated = ?2
             WHERE id = ?3",
            rusqlite::params![
                LeadStatus::InConversation.as_str(),
                at.to_string(),
                lead_id.to_string(),
            ],
        )?;
        if rows == 0 {
            return Err(StorageError::LeadNotFound(lead_id));
        }
        let rows = tx.execute(
            "UPDATE outreach SET outcome = ?1
             WHERE lead_id = ?2
               AND day_number = (SELECT MAX(day_number) FROM outreach WHERE lead_id = ?2)",
            rusqlite::params![Outcome::Replied.as_str(), lead_id.to_string()],
        )?;
        if rows == 0 {
            return Err(StorageError::NoOutreach(lead_id));
        }
        tx.commit()?;
        Ok(())
    }
}

pub(super) fn insert_event(conn: &Connection, lead_id: Uuid, event: &OutreachEvent) -> Result<()> {
    conn.execute(
        "INSERT INTO outreach (lead_id, day_number, platform, outcome, sent_at)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        rusqlite::params![
            lead_id.to_string(),
            event.day_number,
            event.platform.as_str(),
            event.outcome.as_str(),
            event.sent_at.to_string(),
        ],
    )?;
    Ok(())
}

/// Reads a lead's outreach history in day order.
pub(super) fn load_history(conn: &Connection, lead_id: Uuid) -> Result<Vec<OutreachEvent>> {
    let mut stmt = conn.prepare(
        "SELECT day_number, platform, outcome, sent_at
         FROM outreach WHERE lead_id = ?1 ORDER BY day_number",
    )?;
    let rows = stmt
        .query_map(rusqlite::params![lead_id.to_string()], |row| {
            Ok((
                row.get::<_, i64>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, String>(3)?,
            ))
        })?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    let mut history = Vec::with_capacity(rows.len());
    for (day, platform, outcome, sent_at) in rows {
        let day_number = u32::try_from(day)
            .map_err(|_| StorageError::Corrupt(format!("invalid day number: {day}")))?;
        // Day numbers are assigned by position, so the ordered rows must
        // count 1, 2, 3, ... with no gaps.
        let expected = history.len() as u32 + 1;
        if day_number != expected {
            return Err(StorageError::Corrupt(format!(
                "outreach history is not contiguous: expected day {expected}, found day {day_number}"
            )));
        }
        let platform = Platform::parse(&platform)
            .ok_or_else(|| StorageError::Corrupt(format!("unknown platform: {platform}")))?;
        let outcome = Outcome::parse(&outcome)
            .ok_or_else(|| StorageError::Corrupt(format!("unknown outcome: {outcome}")))?;
        let sent_at = sent_at
            .parse::<Timestamp>()
            .map_err(|e| StorageError::Corrupt(format!("invalid sent_at: {e}")))?;
        history.push(OutreachEvent {
            day_number,
            platform,
            outcome,
            sent_at,
        });
    }
    Ok(history)
}
