//! Output formatting for CLI display.

use jiff::{Timestamp, Zoned, civil::Date, tz, tz::TimeZone};

use crate::model::{LeadStatus, Platform};

/// Display name for a platform.
pub(super) fn platform_label(platform: Platform) -> &'static str {
    match platform {
        Platform::Instagram => "Instagram",
        Platform::LinkedIn => "LinkedIn",
        Platform::Facebook => "Facebook",
        Platform::Email => "Email",
        Platform::WhatsApp => "WhatsApp",
    }
}

/// Display name for a status, used as a list group header.
pub(super) fn status_label(status: LeadStatus) -> &'static str {
    match status {
        LeadStatus::NotContacted => "Not contacted",
        LeadStatus::AwaitingReply => "Awaiting reply",
        LeadStatus::InConversation => "In conversation",
        LeadStatus::Declined => "Declined",
    }
}

/// Follower count in thousands, one decimal (e.g. `12.3K followers`).
pub(super) fn format_followers(count: u64) -> String {
    format!("{:.1}K followers", count as f64 / 1000.0)
}

/// The lead's wall-clock time right now, from their whole-hour UTC offset.
pub(super) fn local_time(utc_offset: i8, now: &Zoned) -> String {
    let tz = TimeZone::fixed(tz::offset(utc_offset));
    now.timestamp().to_zoned(tz).strftime("%I:%M %p").to_string()
}

/// Ten-segment progress bar, one segment per 10%.
pub(super) fn progress_bar(percent: u32) -> String {
    let filled = (percent.min(100) / 10) as usize;
    format!("[{}{}]", "#".repeat(filled), ".".repeat(10 - filled))
}

/// Short day label for the trailing-week rows (e.g. `Mon, Mar 3`).
pub(super) fn day_label(date: Date) -> String {
    date.strftime("%a, %b %-d").to_string()
}

/// A timestamp as a short calendar date in `now`'s zone (e.g. `Mar 1`).
pub(super) fn short_date(at: Timestamp, now: &Zoned) -> String {
    at.to_zoned(now.time_zone().clone())
        .strftime("%b %-d")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    use jiff::civil::date;

    #[test]
    fn platform_labels() {
        let cases = [
            (Platform::Instagram, "Instagram"),
            (Platform::LinkedIn, "LinkedIn"),
            (Platform::Facebook, "Facebook"),
            (Platform::Email, "Email"),
            (Platform::WhatsApp, "WhatsApp"),
        ];
        for (platform, expected) in cases {
            assert_eq!(platform_label(platform), expected);
        }
    }

    #[test]
    fn status_labels() {
        let cases = [
            (LeadStatus::NotContacted, "Not contacted"),
            (LeadStatus::AwaitingReply, "Awaiting reply"),
            (LeadStatus::InConversation, "In conversation"),
            (LeadStatus::Declined, "Declined"),
        ];
        for (status, expected) in cases {
            assert_eq!(status_label(status), expected);
        }
    }

    #[test]
    fn followers_in_thousands() {
        assert_eq!(format_followers(12_300), "12.3K followers");
        assert_eq!(format_followers(980), "1.0K followers");
        assert_eq!(format_followers(450), "0.5K followers");
    }

    #[test]
    fn local_time_applies_the_offset() {
        let now = date(2025, 3, 3)
            .at(12, 30, 0, 0)
            .to_zoned(TimeZone::UTC)
            .unwrap();

        assert_eq!(local_time(0, &now), "12:30 PM");
        assert_eq!(local_time(3, &now), "03:30 PM");
        assert_eq!(local_time(-5, &now), "07:30 AM");
    }

    #[test]
    fn progress_bar_fills_by_tens() {
        assert_eq!(progress_bar(0), "[..........]");
        assert_eq!(progress_bar(9), "[..........]");
        assert_eq!(progress_bar(10), "[#.........]");
        assert_eq!(progress_bar(55), "[#####.....]");
        assert_eq!(progress_bar(100), "[##########]");
        assert_eq!(progress_bar(250), "[##########]");
    }

    #[test]
    fn day_labels() {
        assert_eq!(day_label(date(2025, 3, 3)), "Mon, Mar 3");
        assert_eq!(day_label(date(2025, 12, 25)), "Thu, Dec 25");
    }

    #[test]
    fn short_dates_use_the_clock_zone() {
        let now = date(2025, 3, 3)
            .at(12, 0, 0, 0)
            .to_zoned(TimeZone::UTC)
            .unwrap();
        let at = date(2025, 3, 1)
            .at(9, 0, 0, 0)
            .to_zoned(TimeZone::UTC)
            .unwrap()
            .timestamp();

        assert_eq!(short_date(at, &now), "Mar 1");
    }
}
