use chrono::NaiveDate;
use clap::Subcommand;
use hunterlog_core::{Domain, GrowthEngine};
use serde_json::json;

#[derive(Subcommand)]
pub enum StatsAction {
    /// Weighted success rate over the trailing N days
    Window {
        #[arg(default_value_t = 7)]
        days: usize,
    },
    /// Per-domain success rate over the trailing N days
    Domain {
        domain: Domain,
        #[arg(default_value_t = 7)]
        days: usize,
    },
    /// Current and best streaks
    Streak,
    /// Trend direction over the trailing N days
    Trend {
        #[arg(long)]
        days: Option<usize>,
    },
    /// Per-day rates for the trailing week
    Week,
    /// Backfill a day's record with explicit counts
    Record {
        /// Calendar date, YYYY-MM-DD
        date: String,
        total: u32,
        completed: u32,
    },
}

pub fn run(action: StatsAction) -> Result<(), Box<dyn std::error::Error>> {
    let mut engine = GrowthEngine::open()?;

    match action {
        StatsAction::Window { days } => {
            let rate = engine.success_rate_for_window(days);
            println!(
                "{}",
                serde_json::to_string_pretty(&json!({
                    "window_days": days,
                    "success_rate": rate,
                }))?
            );
        }
        StatsAction::Domain { domain, days } => {
            let rate = engine.domain_success_rate_for_window(domain, days);
            println!(
                "{}",
                serde_json::to_string_pretty(&json!({
                    "domain": domain,
                    "window_days": days,
                    "success_rate": rate,
                }))?
            );
        }
        StatsAction::Streak => {
            let streaks = engine.streaks();
            println!("{}", serde_json::to_string_pretty(&streaks)?);
        }
        StatsAction::Trend { days } => {
            let window = days.unwrap_or(engine.config().trend_window);
            let trend = engine.trend(window);
            println!(
                "{}",
                serde_json::to_string_pretty(&json!({
                    "window_days": window,
                    "trend": trend,
                }))?
            );
        }
        StatsAction::Week => {
            let report = engine.week_report();
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        StatsAction::Record {
            date,
            total,
            completed,
        } => {
            let date = NaiveDate::parse_from_str(&date, "%Y-%m-%d")?;
            engine.backfill_day(date, total, completed, Default::default())?;
            println!("Recorded {date}: {completed}/{total}");
        }
    }
    Ok(())
}
