//! Progress math over a profile's leads.
//!
//! Everything here is derived on the fly from the lead list: how many
//! were added today and this month, how many of those have answered,
//! and the trailing week of daily counts. Targets come from config; the
//! daily target is the monthly one spread over thirty days.

use jiff::{ToSpan, Zoned, civil::Date, tz::TimeZone};

use crate::model::Lead;

/// Days assumed per month when deriving the daily target.
const DAYS_PER_MONTH: u32 = 30;

/// One day in the trailing week, with how many leads were added on it.
#[derive(Debug)]
pub struct DayCount {
    pub date: Date,
    pub count: usize,
}

/// A profile's progress at one moment.
#[derive(Debug)]
pub struct Progress {
    pub added_today: usize,
    pub added_this_month: usize,
    /// Of the leads added today, how many have answered (including to
    /// decline).
    pub responded_today: usize,
    /// Same, for the leads added this month.
    pub responded_this_month: usize,
    /// Daily counts for the last seven days, oldest first, today last.
    pub last_seven_days: Vec<DayCount>,
}

/// Computes progress from a profile's leads, relative to `now`.
pub fn progress(leads: &[Lead], now: &Zoned) -> Progress {
    let today = now.date();
    let tz = now.time_zone();

    let mut added_today = 0;
    let mut added_this_month = 0;
    let mut responded_today = 0;
    let mut responded_this_month = 0;
    for lead in leads {
        let added = added_on(lead, tz);
        if added.year() == today.year() && added.month() == today.month() {
            added_this_month += 1;
            if lead.has_responded() {
                responded_this_month += 1;
            }
            if added == today {
                added_today += 1;
                if lead.has_responded() {
                    responded_today += 1;
                }
            }
        }
    }

    let last_seven_days = (0..7)
        .rev()
        .map(|back| {
            let date = today.saturating_sub(back.days());
            let count = leads.iter().filter(|l| added_on(l, tz) == date).count();
            DayCount { date, count }
        })
        .collect();

    Progress {
        added_today,
        added_this_month,
        responded_today,
        responded_this_month,
        last_seven_days,
    }
}

/// Daily target derived from the monthly one, rounded.
pub fn daily_target(monthly_target: u32) -> u32 {
    (monthly_target + DAYS_PER_MONTH / 2) / DAYS_PER_MONTH
}

/// Percent of `value` against `target`, rounded, capped at 100.
pub fn percent_of_target(value: usize, target: u32) -> u32 {
    if target == 0 {
        return 100;
    }
    let percent = (value as u64 * 100 + u64::from(target) / 2) / u64::from(target);
    percent.min(100) as u32
}

/// Percent of `part` within `whole`, rounded; 0 when `whole` is zero.
pub fn share(part: usize, whole: usize) -> u32 {
    if whole == 0 {
        return 0;
    }
    ((part as u64 * 100 + whole as u64 / 2) / whole as u64) as u32
}

/// The calendar day a lead was added, in the evaluating clock's zone.
fn added_on(lead: &Lead, tz: &TimeZone) -> Date {
    lead.added_at.to_zoned(tz.clone()).date()
}

#[cfg(test)]
mod tests {
    use super::*;

    use jiff::Timestamp;
    use jiff::civil::date;
    use uuid::Uuid;

    use crate::model::{AddedVia, LeadStatus, Source};

    fn noon_utc(y: i16, m: i8, d: i8) -> Timestamp {
        date(y, m, d)
            .at(12, 0, 0, 0)
            .to_zoned(TimeZone::UTC)
            .unwrap()
            .timestamp()
    }

    fn lead_added(at: Timestamp, status: LeadStatus) -> Lead {
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
            platforms: Vec::new(),
            status,
            outreach_history: Vec::new(),
            next_follow_up_platform: None,
            next_follow_up_at: None,
            added_at: at,
            added_via: AddedVia::Bulk,
            last_updated: at,
        }
    }

    fn clock() -> Zoned {
        date(2025, 3, 3)
            .at(18, 0, 0, 0)
            .to_zoned(TimeZone::UTC)
            .unwrap()
    }

    #[test]
    fn counts_today_and_this_month() {
        let leads = vec![
            lead_added(noon_utc(2025, 3, 3), LeadStatus::NotContacted),
            lead_added(noon_utc(2025, 3, 1), LeadStatus::AwaitingReply),
            lead_added(noon_utc(2025, 2, 27), LeadStatus::AwaitingReply),
        ];

        let progress = progress(&leads, &clock());
        assert_eq!(progress.added_today, 1);
        assert_eq!(progress.added_this_month, 2);
    }

    #[test]
    fn responded_counts_include_declines() {
        let leads = vec![
            lead_added(noon_utc(2025, 3, 3), LeadStatus::InConversation),
            lead_added(noon_utc(2025, 3, 3), LeadStatus::Declined),
            lead_added(noon_utc(2025, 3, 3), LeadStatus::AwaitingReply),
            lead_added(noon_utc(2025, 3, 1), LeadStatus::InConversation),
        ];

        let progress = progress(&leads, &clock());
        assert_eq!(progress.responded_today, 2);
        assert_eq!(progress.responded_this_month, 3);
    }

    #[test]
    fn trailing_week_is_oldest_first() {
        let leads = vec![
            lead_added(noon_utc(2025, 3, 1), LeadStatus::NotContacted),
            lead_added(noon_utc(2025, 3, 3), LeadStatus::NotContacted),
            lead_added(noon_utc(2025, 3, 3), LeadStatus::NotContacted),
            // Outside the window.
            lead_added(noon_utc(2025, 2, 24), LeadStatus::NotContacted),
        ];

        let progress = progress(&leads, &clock());
        let days = &progress.last_seven_days;
        assert_eq!(days.len(), 7);
        assert_eq!(days[0].date, date(2025, 2, 25));
        assert_eq!(days[6].date, date(2025, 3, 3));

        let counts: Vec<usize> = days.iter().map(|d| d.count).collect();
        assert_eq!(counts, vec![0, 0, 0, 0, 1, 0, 2]);
    }

    #[test]
    fn daily_target_is_the_monthly_spread_over_thirty_days() {
        assert_eq!(daily_target(4500), 150);
        assert_eq!(daily_target(100), 3);
        assert_eq!(daily_target(110), 4);
    }

    #[test]
    fn percent_of_target_rounds_and_caps() {
        assert_eq!(percent_of_target(0, 150), 0);
        assert_eq!(percent_of_target(75, 150), 50);
        assert_eq!(percent_of_target(1, 3), 33);
        assert_eq!(percent_of_target(2, 3), 67);
        assert_eq!(percent_of_target(151, 150), 100);
        assert_eq!(percent_of_target(0, 0), 100);
    }

    #[test]
    fn share_handles_an_empty_whole() {
        assert_eq!(share(0, 0), 0);
        assert_eq!(share(1, 2), 50);
        assert_eq!(share(2, 3), 67);
    }
}
