//! Lead commands: add, list, show, reply, decline.

use clap::{Args, Subcommand};
use jiff::{Timestamp, Zoned};
use uuid::Uuid;

use crate::{
    model::{AddedVia, Lead, LeadStatus, Platform},
    schedule,
    storage::Storage,
};

use super::format::{format_followers, local_time, platform_label, short_date, status_label};
use super::{AudienceArg, PlatformArg, SourceArg, StatusArg};

#[derive(Debug, Subcommand)]
pub enum LeadCommand {
    /// Add a lead by hand. Prints the lead ID.
    Add(AddArgs),

    /// List leads, grouped by status.
    List {
        /// Only show one status group.
        #[arg(long, value_enum)]
        status: Option<StatusArg>,
    },

    /// Show one lead in full.
    Show {
        /// Lead: full UUID, ID prefix, or name fragment.
        lead: String,

        /// Print the lead as JSON instead of text.
        #[arg(long)]
        json: bool,
    },

    /// Record that the lead answered. Ends the cadence for them.
    Reply {
        /// Lead: full UUID, ID prefix, or name fragment.
        lead: String,
    },

    /// Record that the lead said no. Ends the cadence for them.
    Decline {
        /// Lead: full UUID, ID prefix, or name fragment.
        lead: String,
    },
}

#[derive(Debug, Args)]
pub struct AddArgs {
    /// Lead's name.
    name: String,

    /// Freeform location (e.g. "Lisbon, Portugal").
    #[arg(long)]
    location: Option<String>,

    /// UTC offset in whole hours, for showing the lead's local time.
    #[arg(long, allow_negative_numbers = true, value_parser = clap::value_parser!(i8).range(-12..=14))]
    utc_offset: Option<i8>,

    /// Email address.
    #[arg(long)]
    email: Option<String>,

    /// WhatsApp number.
    #[arg(long)]
    whatsapp: Option<String>,

    /// Instagram profile URL.
    #[arg(long)]
    instagram: Option<String>,

    /// LinkedIn profile URL.
    #[arg(long)]
    linkedin: Option<String>,

    /// Facebook profile URL.
    #[arg(long)]
    facebook: Option<String>,

    /// Website URL.
    #[arg(long)]
    website: Option<String>,

    /// Where the lead came from.
    #[arg(long, value_enum, default_value = "instagram")]
    source: SourceArg,

    /// Rough audience bracket.
    #[arg(long, value_enum)]
    audience: Option<AudienceArg>,

    /// Follower count.
    #[arg(long)]
    followers: Option<u64>,

    /// Platform the lead is reachable on. Repeatable. When omitted, the
    /// set is inferred from the contact details given.
    #[arg(long = "platform", value_enum)]
    platforms: Vec<PlatformArg>,
}

pub(super) fn cmd_add(storage: &Storage, profile: &str, args: &AddArgs) -> Result<(), String> {
    let now = Zoned::now();

    let platforms = if args.platforms.is_empty() {
        infer_platforms(args)
    } else {
        args.platforms.iter().map(PlatformArg::to_domain).collect()
    };

    let mut lead = Lead {
        id: Uuid::new_v4(),
        name: args.name.clone(),
        location: args.location.clone(),
        utc_offset: args.utc_offset,
        email: args.email.clone(),
        whatsapp: args.whatsapp.clone(),
        instagram_url: args.instagram.clone(),
        linkedin_url: args.linkedin.clone(),
        facebook_url: args.facebook.clone(),
        website_url: args.website.clone(),
        source: args.source.to_domain(),
        audience: args.audience.as_ref().map(AudienceArg::to_domain),
        follower_count: args.followers,
        platforms,
        status: LeadStatus::NotContacted,
        outreach_history: Vec::new(),
        next_follow_up_platform: None,
        next_follow_up_at: None,
        added_at: now.timestamp(),
        added_via: AddedVia::Manual,
        last_updated: now.timestamp(),
    };
    super::refresh_next_follow_up(&mut lead, &now);

    storage
        .create_lead(profile, &lead)
        .map_err(|e| format!("failed to create lead: {e}"))?;

    println!("{}", lead.id);
    Ok(())
}

/// When no `--platform` is given, infer the set from the contact details
/// provided, in cadence order. Nothing to infer from defaults to
/// Instagram, matching the bulk importer.
fn infer_platforms(args: &AddArgs) -> Vec<Platform> {
    let mut platforms = Vec::new();
    if args.instagram.is_some() {
        platforms.push(Platform::Instagram);
    }
    if args.linkedin.is_some() {
        platforms.push(Platform::LinkedIn);
    }
    if args.facebook.is_some() {
        platforms.push(Platform::Facebook);
    }
    if args.email.is_some() {
        platforms.push(Platform::Email);
    }
    if args.whatsapp.is_some() {
        platforms.push(Platform::WhatsApp);
    }
    if platforms.is_empty() {
        platforms.push(Platform::Instagram);
    }
    platforms
}

pub(super) fn cmd_list(
    storage: &Storage,
    profile: &str,
    filter: Option<LeadStatus>,
) -> Result<(), String> {
    let leads = super::list_leads_or_empty(storage, profile)?;
    let now = Zoned::now();

    let order = [
        LeadStatus::InConversation,
        LeadStatus::AwaitingReply,
        LeadStatus::NotContacted,
        LeadStatus::Declined,
    ];

    let mut printed_any = false;
    for status in order {
        if filter.is_some_and(|f| f != status) {
            continue;
        }
        let group: Vec<&Lead> = leads.iter().filter(|l| l.status == status).collect();
        if group.is_empty() {
            continue;
        }
        if printed_any {
            println!();
        }
        printed_any = true;

        println!("{} ({})", status_label(status), group.len());
        for lead in group {
            let short_id = &lead.id.to_string()[..8];
            let mut extras: Vec<String> = Vec::new();
            if let Some(location) = &lead.location {
                extras.push(location.clone());
            }
            if let Some(offset) = lead.utc_offset {
                extras.push(local_time(offset, &now));
            }
            if let Some(count) = lead.follower_count {
                extras.push(format_followers(count));
            }
            if extras.is_empty() {
                println!("  {short_id}  {}", lead.name);
            } else {
                println!("  {short_id}  {}  [{}]", lead.name, extras.join(", "));
            }
        }
    }

    if !printed_any {
        println!("No leads");
    }
    Ok(())
}

pub(super) fn cmd_show(lead: &Lead, json: bool) -> Result<(), String> {
    if json {
        let out = serde_json::to_string_pretty(lead)
            .map_err(|e| format!("failed to serialize lead: {e}"))?;
        println!("{out}");
        return Ok(());
    }

    let now = Zoned::now();

    println!("{}", lead.name);
    println!("ID: {}", lead.id);
    println!("Status: {}", status_label(lead.status));
    if let Some(location) = &lead.location {
        println!("Location: {location}");
    }
    if let Some(offset) = lead.utc_offset {
        println!("Local time: {}", local_time(offset, &now));
    }
    if let Some(email) = &lead.email {
        println!("Email: {email}");
    }
    if let Some(whatsapp) = &lead.whatsapp {
        println!("WhatsApp: {whatsapp}");
    }
    if let Some(url) = &lead.instagram_url {
        println!("Instagram: {url}");
    }
    if let Some(url) = &lead.linkedin_url {
        println!("LinkedIn: {url}");
    }
    if let Some(url) = &lead.facebook_url {
        println!("Facebook: {url}");
    }
    if let Some(url) = &lead.website_url {
        println!("Website: {url}");
    }
    println!(
        "Source: {}, added {} ({})",
        lead.source.as_str(),
        short_date(lead.added_at, &now),
        lead.added_via.as_str(),
    );
    match (lead.audience, lead.follower_count) {
        (Some(audience), Some(count)) => {
            println!("Audience: {} ({})", audience.as_str(), format_followers(count));
        }
        (Some(audience), None) => println!("Audience: {}", audience.as_str()),
        (None, Some(count)) => println!("Audience: {}", format_followers(count)),
        (None, None) => {}
    }
    let platforms: Vec<&str> = lead.platforms.iter().map(|p| platform_label(*p)).collect();
    println!("Platforms: {}", platforms.join(", "));

    if !lead.outreach_history.is_empty() {
        println!();
        println!("History:");
        for event in &lead.outreach_history {
            println!(
                "  day {}  {:<9}  {:<7}  {}",
                event.day_number,
                platform_label(event.platform),
                event.outcome.as_str(),
                short_date(event.sent_at, &now),
            );
        }
    }

    match schedule::next_follow_up(lead, &now) {
        Some(fu) => {
            // Countdown against the stored decision when there is one: that
            // date ages, a recomputed one never does.
            let due = match lead.next_follow_up_at {
                Some(at) => at.to_zoned(now.time_zone().clone()),
                None => fu.due_at.clone(),
            };
            println!();
            println!(
                "Next: {}, {} ({})",
                platform_label(fu.platform),
                fu.reason,
                schedule::format_countdown(&due, &now),
            );
        }
        None if lead.status.is_terminal() => {}
        None => {
            println!();
            println!("Next: none (max attempts reached)");
        }
    }

    Ok(())
}

pub(super) fn cmd_reply(storage: &Storage, profile: &str, lead: &Lead) -> Result<(), String> {
    let short_id = &lead.id.to_string()[..8];
    if lead.status == LeadStatus::InConversation {
        return Err(format!("lead {short_id} is already in conversation"));
    }

    storage
        .mark_replied(profile, lead.id, Timestamp::now())
        .map_err(|e| format!("failed to record reply: {e}"))?;

    eprintln!("Lead {short_id} moved to in-conversation");
    Ok(())
}

pub(super) fn cmd_decline(storage: &Storage, profile: &str, lead: &Lead) -> Result<(), String> {
    let short_id = &lead.id.to_string()[..8];
    if lead.status == LeadStatus::Declined {
        return Err(format!("lead {short_id} is already declined"));
    }

    storage
        .update_status(profile, lead.id, LeadStatus::Declined, Timestamp::now())
        .map_err(|e| format!("failed to decline lead: {e}"))?;

    eprintln!("Lead {short_id} marked declined");
    Ok(())
}
