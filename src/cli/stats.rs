//! Progress command: daily and monthly targets, reply rates.

use jiff::Zoned;

use crate::{config::Config, stats, storage::Storage};

use super::format::{day_label, progress_bar};

pub(super) fn cmd_stats(config: &Config, storage: &Storage, profile: &str) -> Result<(), String> {
    let leads = super::list_leads_or_empty(storage, profile)?;
    let now = Zoned::now();
    let progress = stats::progress(&leads, &now);

    let monthly_target = config.monthly_target;
    let daily_target = stats::daily_target(monthly_target);

    let day_percent = stats::percent_of_target(progress.added_today, daily_target);
    let month_percent = stats::percent_of_target(progress.added_this_month, monthly_target);
    let replies_today = stats::share(progress.responded_today, progress.added_today);
    let replies_month = stats::share(progress.responded_this_month, progress.added_this_month);

    println!("Progress for {profile}");
    println!();
    println!(
        "Today's progress    {}/{}  {}  {}%",
        progress.added_today,
        daily_target,
        progress_bar(day_percent),
        day_percent,
    );
    println!(
        "Monthly progress    {}/{}  {}  {}%",
        progress.added_this_month,
        monthly_target,
        progress_bar(month_percent),
        month_percent,
    );
    println!(
        "Replies today       {}/{}  {}  {}%",
        progress.responded_today,
        progress.added_today,
        progress_bar(replies_today),
        replies_today,
    );
    println!(
        "Replies this month  {}/{}  {}  {}%",
        progress.responded_this_month,
        progress.added_this_month,
        progress_bar(replies_month),
        replies_month,
    );

    println!();
    println!("Last 7 days");
    for day in &progress.last_seven_days {
        let percent = stats::percent_of_target(day.count, daily_target);
        println!(
            "  {}  {}  {}",
            day_label(day.date),
            progress_bar(percent),
            day.count,
        );
    }

    Ok(())
}
