//! Outreach types: the per-attempt records that make up a lead's history.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

/// A channel a lead can be contacted on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Instagram,
    LinkedIn,
    Facebook,
    Email,
    WhatsApp,
}

impl Platform {
    /// Stable lowercase token, used for storage columns and CLI output.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Instagram => "instagram",
            Self::LinkedIn => "linkedin",
            Self::Facebook => "facebook",
            Self::Email => "email",
            Self::WhatsApp => "whatsapp",
        }
    }

    /// Parses a platform name case-insensitively.
    ///
    /// Accepts both the storage token (`instagram`) and the capitalized
    /// names scrape dumps carry (`Instagram`, `LinkedIn`).
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "instagram" => Some(Self::Instagram),
            "linkedin" => Some(Self::LinkedIn),
            "facebook" => Some(Self::Facebook),
            "email" => Some(Self::Email),
            "whatsapp" => Some(Self::WhatsApp),
            _ => None,
        }
    }
}

/// How a recorded outreach slot ended up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    /// A message went out on this slot's platform.
    Sent,

    /// The lead answered this message.
    Replied,

    /// The slot's platform wasn't available for this lead; no message sent.
    Skipped,
}

impl Outcome {
    /// Stable lowercase token, used for storage columns and CLI output.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Sent => "sent",
            Self::Replied => "replied",
            Self::Skipped => "skipped",
        }
    }

    /// Parses a storage token back into an outcome.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "sent" => Some(Self::Sent),
            "replied" => Some(Self::Replied),
            "skipped" => Some(Self::Skipped),
            _ => None,
        }
    }
}

/// One slot in a lead's outreach history.
///
/// Day numbers are contiguous from 1: skipped slots are recorded too,
/// so the history always shows where in the cadence a lead stands.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutreachEvent {
    /// Position in the cadence, starting at 1.
    pub day_number: u32,

    pub platform: Platform,

    pub outcome: Outcome,

    /// When this slot was recorded.
    pub sent_at: Timestamp,
}
