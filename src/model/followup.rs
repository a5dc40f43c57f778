//! Follow-up types: what the scheduler tells you to do next.

use jiff::Zoned;
use serde::{Deserialize, Serialize};

use super::Platform;

/// A scheduled next contact for one lead.
///
/// Produced by the scheduler from the outreach history and the current
/// moment. The lead row keeps a denormalized copy of the platform and due
/// date from its last write; this struct itself is recomputed, not loaded.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FollowUp {
    /// Platform to send on.
    pub platform: Platform,

    /// When this follow-up should happen, in the evaluating clock's zone.
    pub due_at: Zoned,

    /// Cadence slot this follow-up fills, 1 through the attempt budget.
    pub day_number: u32,

    /// Short human-readable label (e.g. "Day 3 follow-up").
    pub reason: String,
}

/// How pressing a scheduled follow-up is right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Urgency {
    /// Due moment already passed.
    Overdue,

    /// Due later today (or right now).
    DueToday,

    /// Due on a later calendar day.
    Upcoming,
}
