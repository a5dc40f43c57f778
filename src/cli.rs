//! CLI interface for cadence.
//!
//! Every subcommand is non-interactive: arguments in, plain output out.
//! Lead IDs go to stdout (so they can be captured); human-readable status
//! goes to stderr.
//!
//! Commands split into two groups:
//!
//! - `cadence profile list` — profile management, no profile context needed.
//! - everything else — operates on one profile, resolved from `--profile`,
//!   `$CADENCE_PROFILE`, or the config default, in that order.
//!
//! Lead references accept a full UUID, an ID prefix, or a name fragment.

mod followup;
mod format;
mod import;
mod lead;
mod stats;

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use jiff::Zoned;
use uuid::Uuid;

use crate::config::Config;
use crate::model::{AudienceSize, Lead, LeadStatus, Platform, Source};
use crate::profile::resolve_profile;
use crate::schedule;
use crate::storage::{Storage, StorageError};

use lead::LeadCommand;

/// Cadence — keep outreach follow-ups on schedule.
#[derive(Debug, Parser)]
#[command(name = "cadence", after_long_help = WORKFLOW_HELP)]
pub struct Cli {
    /// Profile to operate on (e.g. `trainers`).
    /// Falls back to $CADENCE_PROFILE, then the configured default.
    #[arg(long, global = true)]
    profile: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

const WORKFLOW_HELP: &str = r#"Workflow: working a lead
  1. cadence lead add "Ana Martins" --instagram https://instagram.com/ana --utc-offset -3
     → prints a lead ID (e.g. a3b0fc12)
  2. cadence due
  3. cadence send a3b
  4. cadence lead reply a3b    (they answered)

Bulk:
  cadence import scraped.json
  cadence lead list --status awaiting-reply
  cadence stats"#;

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage leads: add, list, show, reply, decline.
    Lead {
        #[command(subcommand)]
        command: LeadCommand,
    },

    /// Show the follow-up queue: overdue, due today, upcoming.
    Due,

    /// Record sending an outreach message to a lead.
    ///
    /// Without `--platform`, acts on the scheduled follow-up, recording a
    /// skipped slot for each cadence day whose platform the lead doesn't
    /// have. With `--platform`, records a manual send on that platform
    /// instead.
    Send {
        /// Lead: full UUID, ID prefix, or name fragment.
        lead: String,

        /// Platform to record instead of the scheduled one.
        #[arg(long, value_enum)]
        platform: Option<PlatformArg>,
    },

    /// Import leads from a scraped-profile JSON dump.
    ///
    /// Prints one lead ID per imported record; skipped records are
    /// reported on stderr.
    Import {
        /// Path to the dump: a JSON array of scraped profiles.
        file: PathBuf,
    },

    /// Show progress against the daily and monthly lead targets.
    Stats,

    /// Manage profiles.
    Profile {
        #[command(subcommand)]
        command: ProfileCommand,
    },
}

#[derive(Debug, Subcommand)]
pub enum ProfileCommand {
    /// List profiles found in the storage root.
    List,
}

/// CLI-facing platform, mapped to the domain `Platform`.
#[derive(Debug, Clone, ValueEnum)]
pub enum PlatformArg {
    Instagram,
    Linkedin,
    Facebook,
    Email,
    Whatsapp,
}

impl PlatformArg {
    fn to_domain(&self) -> Platform {
        match self {
            Self::Instagram => Platform::Instagram,
            Self::Linkedin => Platform::LinkedIn,
            Self::Facebook => Platform::Facebook,
            Self::Email => Platform::Email,
            Self::Whatsapp => Platform::WhatsApp,
        }
    }
}

/// CLI-facing status, mapped to the domain `LeadStatus`.
#[derive(Debug, Clone, ValueEnum)]
pub enum StatusArg {
    NotContacted,
    AwaitingReply,
    InConversation,
    Declined,
}

impl StatusArg {
    fn to_domain(&self) -> LeadStatus {
        match self {
            Self::NotContacted => LeadStatus::NotContacted,
            Self::AwaitingReply => LeadStatus::AwaitingReply,
            Self::InConversation => LeadStatus::InConversation,
            Self::Declined => LeadStatus::Declined,
        }
    }
}

/// CLI-facing source, mapped to the domain `Source`.
#[derive(Debug, Clone, ValueEnum)]
pub enum SourceArg {
    Instagram,
    Facebook,
    Whatsapp,
    Referral,
    Other,
}

impl SourceArg {
    fn to_domain(&self) -> Source {
        match self {
            Self::Instagram => Source::Instagram,
            Self::Facebook => Source::Facebook,
            Self::Whatsapp => Source::WhatsApp,
            Self::Referral => Source::Referral,
            Self::Other => Source::Other,
        }
    }
}

/// CLI-facing audience bracket, mapped to the domain `AudienceSize`.
#[derive(Debug, Clone, ValueEnum)]
pub enum AudienceArg {
    Low,
    Mid,
    High,
}

impl AudienceArg {
    fn to_domain(&self) -> AudienceSize {
        match self {
            Self::Low => AudienceSize::Low,
            Self::Mid => AudienceSize::Mid,
            Self::High => AudienceSize::High,
        }
    }
}

/// Run the CLI, returning an error message on failure.
pub fn run(config: &Config, storage: &Storage) -> Result<(), String> {
    let cli = Cli::parse();

    match cli.command {
        Command::Lead { command } => match command {
            LeadCommand::Add(args) => {
                let profile = resolve_profile(cli.profile.as_deref(), config)?;
                lead::cmd_add(storage, &profile, &args)
            }
            LeadCommand::List { status } => {
                let profile = resolve_profile(cli.profile.as_deref(), config)?;
                lead::cmd_list(storage, &profile, status.map(|s| s.to_domain()))
            }
            LeadCommand::Show { lead: reference, json } => {
                let profile = resolve_profile(cli.profile.as_deref(), config)?;
                let lead = resolve_lead(storage, &profile, &reference)?;
                lead::cmd_show(&lead, json)
            }
            LeadCommand::Reply { lead: reference } => {
                let profile = resolve_profile(cli.profile.as_deref(), config)?;
                let lead = resolve_lead(storage, &profile, &reference)?;
                lead::cmd_reply(storage, &profile, &lead)
            }
            LeadCommand::Decline { lead: reference } => {
                let profile = resolve_profile(cli.profile.as_deref(), config)?;
                let lead = resolve_lead(storage, &profile, &reference)?;
                lead::cmd_decline(storage, &profile, &lead)
            }
        },
        Command::Due => {
            let profile = resolve_profile(cli.profile.as_deref(), config)?;
            followup::cmd_due(storage, &profile)
        }
        Command::Send { lead: reference, platform } => {
            let profile = resolve_profile(cli.profile.as_deref(), config)?;
            let lead = resolve_lead(storage, &profile, &reference)?;
            followup::cmd_send(storage, &profile, &lead, platform.map(|p| p.to_domain()))
        }
        Command::Import { file } => {
            let profile = resolve_profile(cli.profile.as_deref(), config)?;
            import::cmd_import(storage, &profile, &file)
        }
        Command::Stats => {
            let profile = resolve_profile(cli.profile.as_deref(), config)?;
            stats::cmd_stats(config, storage, &profile)
        }
        Command::Profile { command } => match command {
            ProfileCommand::List => cmd_profiles(storage),
        },
    }
}

fn cmd_profiles(storage: &Storage) -> Result<(), String> {
    let profiles = storage
        .list_profiles()
        .map_err(|e| format!("failed to list profiles: {e}"))?;

    if profiles.is_empty() {
        println!("No profiles");
        return Ok(());
    }
    for profile in &profiles {
        println!("{profile}");
    }
    Ok(())
}

/// List a profile's leads, treating a profile that was never written to as
/// empty. Read-only commands shouldn't fail just because nothing has been
/// added yet.
fn list_leads_or_empty(storage: &Storage, profile: &str) -> Result<Vec<Lead>, String> {
    match storage.list_leads(profile) {
        Ok(leads) => Ok(leads),
        Err(StorageError::ProfileNotFound(_)) => Ok(Vec::new()),
        Err(e) => Err(format!("failed to list leads: {e}")),
    }
}

/// Stamp the lead with the decision computed right now. The stored date
/// ages between writes, which is what lets the due queue call a lead
/// overdue; a freshly recomputed date never lies in the past.
fn refresh_next_follow_up(lead: &mut Lead, now: &Zoned) {
    match schedule::next_follow_up(lead, now) {
        Some(fu) => {
            lead.next_follow_up_platform = Some(fu.platform);
            lead.next_follow_up_at = Some(fu.due_at.timestamp());
        }
        None => {
            lead.next_follow_up_platform = None;
            lead.next_follow_up_at = None;
        }
    }
}

/// Resolve a lead reference (full UUID, ID prefix, or name fragment) to a
/// lead in the profile.
fn resolve_lead(storage: &Storage, profile: &str, reference: &str) -> Result<Lead, String> {
    // Try full UUID first.
    if let Ok(id) = reference.parse::<Uuid>() {
        return storage
            .load_lead(profile, id)
            .map_err(|e| format!("lead not found: {e}"));
    }

    // Try as an ID prefix or name fragment against all leads.
    let leads = list_leads_or_empty(storage, profile)?;
    let needle = reference.to_lowercase();

    let matches: Vec<&Lead> = leads
        .iter()
        .filter(|l| {
            l.id.to_string().starts_with(reference) || l.name.to_lowercase().contains(&needle)
        })
        .collect();

    match matches.len() {
        0 => Err(format!("no lead matching '{reference}'")),
        1 => Ok(matches[0].clone()),
        n => {
            let described: Vec<String> = matches
                .iter()
                .map(|l| format!("{} ({})", &l.id.to_string()[..8], l.name))
                .collect();
            Err(format!(
                "'{reference}' is ambiguous — matches {n} leads: {}",
                described.join(", ")
            ))
        }
    }
}
