//! Follow-up scheduling: the single place that decides who to contact next.
//!
//! A lead gets at most five contact attempts, one cadence slot per day,
//! rotating platforms in a fixed order. The scheduler is pure: it reads a
//! lead's outreach history and the current moment, and produces the next
//! [`FollowUp`] (or nothing, when the lead has replied, declined, or run
//! out of attempts). Nothing is written here; recording an attempt is the
//! caller's move, through [`record_outreach`] or [`accept_follow_up`].

use jiff::{Timestamp, ToSpan, Zoned};

use crate::model::{FollowUp, Lead, Outcome, OutreachEvent, Platform, Urgency};

/// The cadence: which platform each slot uses, day 1 through day 5.
pub const PLATFORM_SEQUENCE: [Platform; 5] = [
    Platform::Instagram,
    Platform::LinkedIn,
    Platform::Facebook,
    Platform::Email,
    Platform::Instagram,
];

/// Attempt budget per lead. After this many slots, outreach stops.
pub const MAX_ATTEMPTS: u32 = PLATFORM_SEQUENCE.len() as u32;

/// Hour of day (local to the evaluating clock) that follow-ups land on.
const FOLLOW_UP_HOUR: i8 = 9;

/// Computes the next follow-up for a lead, or `None` when outreach is over.
///
/// Outreach is over when the lead's status is terminal, the last recorded
/// slot was answered, or the attempt budget is spent. A brand-new lead gets
/// day 1 on Instagram, due immediately. Otherwise the next slot is the day
/// after the last recorded one, scanning forward past slots whose platform
/// the lead isn't reachable on.
///
/// The due date is relative to `now`: one evaluation's "tomorrow at nine"
/// becomes a later evaluation's "today", and an unacted suggestion
/// re-anchors to the newer clock. Nothing moves until an attempt is
/// actually recorded.
pub fn next_follow_up(lead: &Lead, now: &Zoned) -> Option<FollowUp> {
    if lead.status.is_terminal() {
        return None;
    }

    let Some(last) = lead.outreach_history.last() else {
        return Some(FollowUp {
            platform: PLATFORM_SEQUENCE[0],
            due_at: now.clone(),
            day_number: 1,
            reason: "First contact".to_string(),
        });
    };

    if last.outcome == Outcome::Replied {
        return None;
    }

    // Scan forward from the slot after the last recorded one, skipping
    // platforms the lead can't be reached on.
    for day in (last.day_number + 1)..=MAX_ATTEMPTS {
        let platform = PLATFORM_SEQUENCE[(day - 1) as usize];
        if lead.platforms.contains(&platform) {
            return Some(FollowUp {
                platform,
                due_at: tomorrow_at_nine(now),
                day_number: day,
                reason: format!("Day {day} follow-up"),
            });
        }
    }

    None
}

/// Builds the event recording an outreach attempt on `platform`.
///
/// The day number is the next position in the lead's history; callers never
/// pick it. The platform is whatever was actually used, which may differ
/// from the scheduled suggestion.
pub fn record_outreach(lead: &Lead, platform: Platform, sent_at: Timestamp) -> OutreachEvent {
    OutreachEvent {
        day_number: lead.outreach_history.len() as u32 + 1,
        platform,
        outcome: Outcome::Sent,
        sent_at,
    }
}

/// Builds the events that record acting on a scheduled follow-up.
///
/// When the follow-up jumped past unavailable platforms, one `skipped`
/// event is produced for each passed-over slot, then the `sent` event for
/// the follow-up's own slot. Appending all of them keeps day numbers
/// contiguous, so the history always accounts for every cadence slot.
///
/// `follow_up` must come from [`next_follow_up`] on the same lead.
pub fn accept_follow_up(lead: &Lead, follow_up: &FollowUp, at: Timestamp) -> Vec<OutreachEvent> {
    let first_open = lead.outreach_history.len() as u32 + 1;
    let mut events: Vec<OutreachEvent> = (first_open..follow_up.day_number)
        .map(|day| OutreachEvent {
            day_number: day,
            platform: PLATFORM_SEQUENCE[(day - 1) as usize],
            outcome: Outcome::Skipped,
            sent_at: at,
        })
        .collect();
    events.push(OutreachEvent {
        day_number: follow_up.day_number,
        platform: follow_up.platform,
        outcome: Outcome::Sent,
        sent_at: at,
    });
    events
}

/// Buckets a due moment against the current one.
///
/// Overdue means the moment has strictly passed. Otherwise, same calendar
/// day is due today, and any later day is upcoming.
pub fn classify_urgency(due_at: &Zoned, now: &Zoned) -> Urgency {
    if due_at < now {
        Urgency::Overdue
    } else if due_at.date() == now.date() {
        Urgency::DueToday
    } else {
        Urgency::Upcoming
    }
}

/// Renders a due moment as a countdown, by calendar-day difference.
pub fn format_countdown(due_at: &Zoned, now: &Zoned) -> String {
    let days = (due_at.date() - now.date()).get_days();
    match days {
        d if d < -1 => format!("{} days overdue", -d),
        -1 => "1 day overdue".to_string(),
        0 => "Today".to_string(),
        1 => "Tomorrow".to_string(),
        d => format!("In {d} days"),
    }
}

/// Renders a due moment as a short date, relative wording for near days.
pub fn format_due_date(due_at: &Zoned, now: &Zoned) -> String {
    match (due_at.date() - now.date()).get_days() {
        0 => "Today".to_string(),
        1 => "Tomorrow".to_string(),
        _ => due_at.strftime("%b %-d").to_string(),
    }
}

/// Tomorrow at [`FOLLOW_UP_HOUR`] in the evaluating clock's zone.
fn tomorrow_at_nine(now: &Zoned) -> Zoned {
    now.date()
        .saturating_add(1.day())
        .at(FOLLOW_UP_HOUR, 0, 0, 0)
        .to_zoned(now.time_zone().clone())
        .unwrap_or_else(|_| now.clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    use jiff::civil::date;
    use jiff::tz::TimeZone;
    use uuid::Uuid;

    use crate::model::{AddedVia, LeadStatus, Source};

    /// March 3rd 2025, 08:00 UTC.
    fn clock() -> Zoned {
        date(2025, 3, 3)
            .at(8, 0, 0, 0)
            .to_zoned(TimeZone::UTC)
            .unwrap()
    }

    fn at(y: i16, m: i8, d: i8, hour: i8) -> Zoned {
        date(y, m, d)
            .at(hour, 0, 0, 0)
            .to_zoned(TimeZone::UTC)
            .unwrap()
    }

    fn lead_with(platforms: &[Platform], history: Vec<OutreachEvent>) -> Lead {
        let status = if history.is_empty() {
            LeadStatus::NotContacted
        } else {
            LeadStatus::AwaitingReply
        };
        Lead {
            id: Uuid::new_v4(),
            name: "Ana Martins".into(),
            location: None,
            utc_offset: None,
            email: None,
            whatsapp: None,
            instagram_url: None,
            linkedin_url: None,
            facebook_url: None,
            website_url: None,
            source: Source::Instagram,
            audience: None,
            follower_count: None,
            platforms: platforms.to_vec(),
            status,
            outreach_history: history,
            next_follow_up_platform: None,
            next_follow_up_at: None,
            added_at: Timestamp::now(),
            added_via: AddedVia::Manual,
            last_updated: Timestamp::now(),
        }
    }

    fn sent(day: u32, platform: Platform) -> OutreachEvent {
        OutreachEvent {
            day_number: day,
            platform,
            outcome: Outcome::Sent,
            sent_at: Timestamp::now(),
        }
    }

    const ALL: &[Platform] = &[
        Platform::Instagram,
        Platform::LinkedIn,
        Platform::Facebook,
        Platform::Email,
    ];

    #[test]
    fn first_contact_is_day_one_on_instagram_due_now() {
        let now = clock();
        let lead = lead_with(ALL, Vec::new());

        let fu = next_follow_up(&lead, &now).unwrap();
        assert_eq!(fu.day_number, 1);
        assert_eq!(fu.platform, Platform::Instagram);
        assert_eq!(fu.due_at, now);
        assert_eq!(fu.reason, "First contact");
    }

    #[test]
    fn first_contact_ignores_the_platform_list() {
        // Day 1 is unconditional; reachability only matters from day 2 on.
        let lead = lead_with(&[Platform::Email], Vec::new());

        let fu = next_follow_up(&lead, &clock()).unwrap();
        assert_eq!(fu.day_number, 1);
        assert_eq!(fu.platform, Platform::Instagram);
    }

    #[test]
    fn replied_last_slot_ends_the_cadence() {
        let mut history = vec![sent(1, Platform::Instagram)];
        history[0].outcome = Outcome::Replied;
        let lead = lead_with(ALL, history);

        assert!(next_follow_up(&lead, &clock()).is_none());
    }

    #[test]
    fn terminal_status_ends_the_cadence() {
        let mut lead = lead_with(ALL, vec![sent(1, Platform::Instagram)]);

        lead.status = LeadStatus::InConversation;
        assert!(next_follow_up(&lead, &clock()).is_none());

        lead.status = LeadStatus::Declined;
        assert!(next_follow_up(&lead, &clock()).is_none());
    }

    #[test]
    fn spent_budget_ends_the_cadence() {
        let history = vec![
            sent(1, Platform::Instagram),
            sent(2, Platform::LinkedIn),
            sent(3, Platform::Facebook),
            sent(4, Platform::Email),
            sent(5, Platform::Instagram),
        ];
        let lead = lead_with(ALL, history);

        assert!(next_follow_up(&lead, &clock()).is_none());
    }

    #[test]
    fn follows_the_sequence_to_the_next_day() {
        let now = clock();
        let lead = lead_with(ALL, vec![sent(1, Platform::Instagram)]);

        let fu = next_follow_up(&lead, &now).unwrap();
        assert_eq!(fu.day_number, 2);
        assert_eq!(fu.platform, Platform::LinkedIn);
        assert_eq!(fu.reason, "Day 2 follow-up");
        assert_eq!(fu.due_at.date(), date(2025, 3, 4));
        assert_eq!(fu.due_at.hour(), 9);
        assert_eq!(fu.due_at.minute(), 0);
    }

    #[test]
    fn skips_platforms_the_lead_lacks() {
        let lead = lead_with(
            &[Platform::Instagram, Platform::Email],
            vec![sent(1, Platform::Instagram)],
        );

        let fu = next_follow_up(&lead, &clock()).unwrap();
        assert_eq!(fu.day_number, 4);
        assert_eq!(fu.platform, Platform::Email);
        assert_eq!(fu.reason, "Day 4 follow-up");
    }

    #[test]
    fn instagram_only_lead_jumps_to_the_final_slot() {
        let lead = lead_with(&[Platform::Instagram], vec![sent(1, Platform::Instagram)]);

        let fu = next_follow_up(&lead, &clock()).unwrap();
        assert_eq!(fu.day_number, 5);
        assert_eq!(fu.platform, Platform::Instagram);
    }

    #[test]
    fn linkedin_only_lead_gets_day_two_then_nothing() {
        let now = clock();
        let mut lead = lead_with(&[Platform::LinkedIn], vec![sent(1, Platform::Instagram)]);

        let fu = next_follow_up(&lead, &now).unwrap();
        assert_eq!(fu.day_number, 2);
        assert_eq!(fu.platform, Platform::LinkedIn);

        // Remaining slots are Facebook, Email, Instagram; the lead has
        // none of them.
        lead.outreach_history.push(sent(2, Platform::LinkedIn));
        assert!(next_follow_up(&lead, &now).is_none());
    }

    #[test]
    fn suggestion_is_stable_until_recorded() {
        let now = clock();
        let lead = lead_with(ALL, vec![sent(1, Platform::Instagram)]);

        let first = next_follow_up(&lead, &now).unwrap();
        let second = next_follow_up(&lead, &now).unwrap();
        assert_eq!(first.day_number, second.day_number);
        assert_eq!(first.platform, second.platform);
        assert_eq!(first.due_at, second.due_at);
    }

    #[test]
    fn due_date_tracks_the_evaluation_clock() {
        let lead = lead_with(ALL, vec![sent(1, Platform::Instagram)]);

        let early = next_follow_up(&lead, &clock()).unwrap();
        let late = next_follow_up(&lead, &at(2025, 3, 10, 8)).unwrap();

        // Same slot either way, but the unacted suggestion re-anchors
        // to the newer clock instead of going stale.
        assert_eq!(early.day_number, 2);
        assert_eq!(late.day_number, 2);
        assert_eq!(early.due_at.date(), date(2025, 3, 4));
        assert_eq!(late.due_at.date(), date(2025, 3, 11));
    }

    #[test]
    fn record_outreach_takes_the_next_day_number() {
        let now = clock();
        let lead = lead_with(ALL, vec![sent(1, Platform::Instagram)]);

        let event = record_outreach(&lead, Platform::LinkedIn, now.timestamp());
        assert_eq!(event.day_number, 2);
        assert_eq!(event.platform, Platform::LinkedIn);
        assert_eq!(event.outcome, Outcome::Sent);
    }

    #[test]
    fn record_outreach_accepts_an_off_sequence_platform() {
        let now = clock();
        let lead = lead_with(ALL, vec![sent(1, Platform::Instagram)]);

        let event = record_outreach(&lead, Platform::WhatsApp, now.timestamp());
        assert_eq!(event.day_number, 2);
        assert_eq!(event.platform, Platform::WhatsApp);
    }

    #[test]
    fn accept_follow_up_materializes_skipped_slots() {
        let now = clock();
        let lead = lead_with(
            &[Platform::Instagram, Platform::Email],
            vec![sent(1, Platform::Instagram)],
        );
        let fu = next_follow_up(&lead, &now).unwrap();

        let events = accept_follow_up(&lead, &fu, now.timestamp());
        let days: Vec<u32> = events.iter().map(|e| e.day_number).collect();
        assert_eq!(days, vec![2, 3, 4]);
        assert_eq!(events[0].platform, Platform::LinkedIn);
        assert_eq!(events[0].outcome, Outcome::Skipped);
        assert_eq!(events[1].platform, Platform::Facebook);
        assert_eq!(events[1].outcome, Outcome::Skipped);
        assert_eq!(events[2].platform, Platform::Email);
        assert_eq!(events[2].outcome, Outcome::Sent);
    }

    #[test]
    fn accept_follow_up_without_a_gap_is_just_the_send() {
        let now = clock();
        let lead = lead_with(ALL, vec![sent(1, Platform::Instagram)]);
        let fu = next_follow_up(&lead, &now).unwrap();

        let events = accept_follow_up(&lead, &fu, now.timestamp());
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].day_number, 2);
        assert_eq!(events[0].platform, Platform::LinkedIn);
        assert_eq!(events[0].outcome, Outcome::Sent);
    }

    #[test]
    fn urgency_buckets() {
        let now = at(2025, 3, 3, 10);

        let yesterday = at(2025, 3, 2, 9);
        assert_eq!(classify_urgency(&yesterday, &now), Urgency::Overdue);

        // Same day but already past: still overdue.
        let this_morning = at(2025, 3, 3, 9);
        assert_eq!(classify_urgency(&this_morning, &now), Urgency::Overdue);

        let later_today = at(2025, 3, 3, 17);
        assert_eq!(classify_urgency(&later_today, &now), Urgency::DueToday);

        // Due at nine, evaluated at eight the same morning: due today.
        let nine = at(2025, 3, 3, 9);
        let eight = at(2025, 3, 3, 8);
        assert_eq!(classify_urgency(&nine, &eight), Urgency::DueToday);

        assert_eq!(classify_urgency(&now, &now), Urgency::DueToday);

        let tomorrow = at(2025, 3, 4, 9);
        assert_eq!(classify_urgency(&tomorrow, &now), Urgency::Upcoming);
    }

    #[test]
    fn countdown_uses_calendar_days() {
        let now = clock();

        assert_eq!(format_countdown(&at(2025, 2, 28, 9), &now), "3 days overdue");
        assert_eq!(format_countdown(&at(2025, 3, 2, 9), &now), "1 day overdue");
        // Earlier hour today is still "Today": the difference is in
        // calendar days, not elapsed hours.
        assert_eq!(format_countdown(&at(2025, 3, 3, 7), &now), "Today");
        assert_eq!(format_countdown(&at(2025, 3, 4, 9), &now), "Tomorrow");
        assert_eq!(format_countdown(&at(2025, 3, 8, 9), &now), "In 5 days");
    }

    #[test]
    fn due_date_wording() {
        let now = clock();

        assert_eq!(format_due_date(&at(2025, 3, 3, 9), &now), "Today");
        assert_eq!(format_due_date(&at(2025, 3, 4, 9), &now), "Tomorrow");
        assert_eq!(format_due_date(&at(2025, 3, 12, 9), &now), "Mar 12");
    }
}
