//! Cadence commands: the due queue and recording sends.

use jiff::Zoned;

use crate::{
    model::{FollowUp, Lead, LeadStatus, Platform, Urgency},
    schedule,
    storage::Storage,
};

use super::format::platform_label;

pub(super) fn cmd_due(storage: &Storage, profile: &str) -> Result<(), String> {
    let leads = super::list_leads_or_empty(storage, profile)?;
    let now = Zoned::now();

    let mut overdue: Vec<(&Lead, FollowUp, Zoned)> = Vec::new();
    let mut today: Vec<(&Lead, FollowUp, Zoned)> = Vec::new();
    let mut upcoming: Vec<(&Lead, FollowUp, Zoned)> = Vec::new();
    let mut exhausted: Vec<&Lead> = Vec::new();

    for lead in &leads {
        if lead.status.is_terminal() {
            continue;
        }
        match schedule::next_follow_up(lead, &now) {
            None => exhausted.push(lead),
            Some(fu) => {
                // Classify the stored decision's date when there is one.
                // It was computed at the last write and has been aging
                // since; the freshly computed date never lies in the past.
                let due = match lead.next_follow_up_at {
                    Some(at) => at.to_zoned(now.time_zone().clone()),
                    None => fu.due_at.clone(),
                };
                let bucket = match schedule::classify_urgency(&due, &now) {
                    Urgency::Overdue => &mut overdue,
                    Urgency::DueToday => &mut today,
                    Urgency::Upcoming => &mut upcoming,
                };
                bucket.push((lead, fu, due));
            }
        }
    }

    if overdue.is_empty() && today.is_empty() && upcoming.is_empty() && exhausted.is_empty() {
        println!("Nothing due");
        return Ok(());
    }

    let mut printed_any = false;
    for (header, group) in [
        ("Overdue", &mut overdue),
        ("Due today", &mut today),
        ("Upcoming", &mut upcoming),
    ] {
        if group.is_empty() {
            continue;
        }
        group.sort_by(|a, b| a.2.cmp(&b.2));

        if printed_any {
            println!();
        }
        printed_any = true;

        println!("{} ({})", header, group.len());
        for (lead, fu, due) in group.iter() {
            let short_id = &lead.id.to_string()[..8];
            println!(
                "  {short_id}  [{}]  {}  {}, {}",
                platform_label(fu.platform),
                lead.name,
                fu.reason,
                schedule::format_countdown(due, &now),
            );
        }
    }

    if !exhausted.is_empty() {
        if printed_any {
            println!();
        }
        println!("Max attempts reached ({})", exhausted.len());
        for lead in &exhausted {
            let short_id = &lead.id.to_string()[..8];
            println!("  {short_id}  {}", lead.name);
        }
    }

    Ok(())
}

pub(super) fn cmd_send(
    storage: &Storage,
    profile: &str,
    lead: &Lead,
    platform: Option<Platform>,
) -> Result<(), String> {
    let short_id = &lead.id.to_string()[..8];
    if lead.status.is_terminal() {
        return Err(format!(
            "lead {short_id} is {}; nothing left to send",
            lead.status.as_str()
        ));
    }

    let now = Zoned::now();
    let at = now.timestamp();

    let (events, day, sent_on) = match platform {
        Some(platform) => {
            let event = schedule::record_outreach(lead, platform, at);
            let day = event.day_number;
            (vec![event], day, platform)
        }
        None => {
            let fu = schedule::next_follow_up(lead, &now).ok_or_else(|| {
                format!(
                    "no follow-up due for lead {short_id} — \
                     use --platform to record a manual send"
                )
            })?;
            let events = schedule::accept_follow_up(lead, &fu, at);
            (events, fu.day_number, fu.platform)
        }
    };

    let mut updated = lead.clone();
    updated.outreach_history.extend(events.iter().cloned());
    updated.status = LeadStatus::AwaitingReply;
    let next = schedule::next_follow_up(&updated, &now);

    storage
        .record_follow_up(
            profile,
            lead.id,
            &events,
            LeadStatus::AwaitingReply,
            next.as_ref(),
            at,
        )
        .map_err(|e| format!("failed to record outreach: {e}"))?;

    eprintln!(
        "Recorded day {day} {} for lead {short_id} ({})",
        platform_label(sent_on),
        lead.name
    );
    match next {
        Some(fu) => eprintln!(
            "Next: {}, {}",
            platform_label(fu.platform),
            schedule::format_due_date(&fu.due_at, &now)
        ),
        None => eprintln!("No further follow-ups"),
    }

    Ok(())
}
