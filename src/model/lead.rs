//! Lead types: the people being reached out to.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{OutreachEvent, Platform};

/// A person in the outreach pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lead {
    pub id: Uuid,

    pub name: String,

    /// Freeform location, as scraped or entered (e.g. "Lisbon, Portugal").
    pub location: Option<String>,

    /// UTC offset in whole hours, for showing the lead's local time.
    pub utc_offset: Option<i8>,

    pub email: Option<String>,

    /// WhatsApp number, digits as entered.
    pub whatsapp: Option<String>,

    pub instagram_url: Option<String>,

    pub linkedin_url: Option<String>,

    pub facebook_url: Option<String>,

    pub website_url: Option<String>,

    /// Where this lead came from.
    pub source: Source,

    /// Rough audience bracket, when known.
    pub audience: Option<AudienceSize>,

    /// Follower count at scrape time, when known.
    pub follower_count: Option<u64>,

    /// Platforms this lead is actually reachable on.
    /// The scheduler skips cadence slots whose platform isn't listed here.
    pub platforms: Vec<Platform>,

    pub status: LeadStatus,

    /// Every outreach slot recorded so far, in day order.
    pub outreach_history: Vec<OutreachEvent>,

    /// Platform of the scheduling decision stored at the last write.
    pub next_follow_up_platform: Option<Platform>,

    /// Due date stored at the last write. Unlike a freshly computed
    /// decision this ages: once it passes, the lead shows as overdue.
    pub next_follow_up_at: Option<Timestamp>,

    pub added_at: Timestamp,

    pub added_via: AddedVia,

    pub last_updated: Timestamp,
}

impl Lead {
    /// Whether the lead has answered at all, including to decline.
    pub fn has_responded(&self) -> bool {
        matches!(
            self.status,
            LeadStatus::InConversation | LeadStatus::Declined
        )
    }
}

/// Where a lead stands in the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LeadStatus {
    /// No outreach recorded yet.
    NotContacted,

    /// At least one message sent, no answer yet.
    AwaitingReply,

    /// The lead answered; outreach is over, conversation has started.
    InConversation,

    /// The lead said no. No further follow-ups.
    Declined,
}

impl LeadStatus {
    /// Statuses that end scheduling: the conversation happened, one way
    /// or the other.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::InConversation | Self::Declined)
    }

    /// Stable kebab-case token, used for storage columns and CLI output.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::NotContacted => "not-contacted",
            Self::AwaitingReply => "awaiting-reply",
            Self::InConversation => "in-conversation",
            Self::Declined => "declined",
        }
    }

    /// Parses a storage token back into a status.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "not-contacted" => Some(Self::NotContacted),
            "awaiting-reply" => Some(Self::AwaitingReply),
            "in-conversation" => Some(Self::InConversation),
            "declined" => Some(Self::Declined),
            _ => None,
        }
    }
}

/// Where a lead was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    Instagram,
    Facebook,
    WhatsApp,
    Referral,
    Other,
}

impl Source {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Instagram => "instagram",
            Self::Facebook => "facebook",
            Self::WhatsApp => "whatsapp",
            Self::Referral => "referral",
            Self::Other => "other",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "instagram" => Some(Self::Instagram),
            "facebook" => Some(Self::Facebook),
            "whatsapp" => Some(Self::WhatsApp),
            "referral" => Some(Self::Referral),
            "other" => Some(Self::Other),
            _ => None,
        }
    }
}

/// Rough audience-size bracket from the scrape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AudienceSize {
    Low,
    Mid,
    High,
}

impl AudienceSize {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Mid => "mid",
            Self::High => "high",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "low" => Some(Self::Low),
            "mid" => Some(Self::Mid),
            "high" => Some(Self::High),
            _ => None,
        }
    }
}

/// How a lead entered the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AddedVia {
    /// Entered by hand through `lead add`.
    Manual,

    /// Imported from a scrape dump.
    Bulk,
}

impl AddedVia {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Manual => "manual",
            Self::Bulk => "bulk",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "manual" => Some(Self::Manual),
            "bulk" => Some(Self::Bulk),
            _ => None,
        }
    }
}
