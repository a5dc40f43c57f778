//! Core data model for cadence.
//!
//! Leads move through a fixed outreach cadence: each contact attempt is an
//! outreach event, and the scheduler turns a lead's event history into the
//! next follow-up to act on.

mod followup;
mod lead;
mod outreach;

pub use followup::{FollowUp, Urgency};
pub use lead::{AddedVia, AudienceSize, Lead, LeadStatus, Source};
pub use outreach::{Outcome, OutreachEvent, Platform};
