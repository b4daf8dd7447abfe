//! Overview command - KPI cards and trends.

use anyhow::Result;
use clap::Args;

use edu_insights::Overview;

use super::Context;

#[derive(Args)]
pub struct OverviewArgs {
    /// Also print the monthly trend and generation counts
    #[arg(long)]
    detailed: bool,
}

pub async fn execute(args: OverviewArgs, ctx: &Context) -> Result<()> {
    let overview = Overview::sample();

    if ctx.json {
        return ctx.print_json(&overview);
    }

    println!("📊 KPIs (average progress {}%)", overview.average_progress());
    for kpi in &overview.kpis {
        println!(
            "   {:<20} {:>7} → {:<7} {} {:>3}%  {} {}",
            kpi.name,
            kpi.current,
            kpi.target,
            progress_bar(kpi.progress),
            kpi.progress,
            kpi.trend,
            kpi.change
        );
    }

    if let Some(reduction) = overview.production_time_reduction() {
        println!("   Production time down {}% since {}", reduction, first_month(&overview));
    }

    if args.detailed {
        println!();
        println!("📈 Monthly trend");
        println!("   {:<5} {:>10} {:>11} {:>10}", "", "Minutes", "Completion", "Target fit");
        for point in &overview.monthly {
            println!(
                "   {:<5} {:>10} {:>10}% {:>9}%",
                point.month, point.production_minutes, point.completion_rate, point.target_fit
            );
        }

        println!();
        println!("🏭 Generated in the last 30 days ({} total)", overview.total_generated());
        for count in &overview.generation {
            println!(
                "   {:<20} {:>4}  avg {}s",
                count.artifact, count.count, count.avg_secs
            );
        }
    }

    Ok(())
}

fn first_month(overview: &Overview) -> &str {
    overview
        .monthly
        .first()
        .map(|point| point.month.as_str())
        .unwrap_or("start")
}

/// Ten-cell text progress bar.
fn progress_bar(percent: u8) -> String {
    let filled = usize::from(percent.min(100)) / 10;
    format!("[{}{}]", "█".repeat(filled), "░".repeat(10 - filled))
}

#[cfg(test)]
mod tests {
    use super::*;
    use edu_core::EduConfig;

    #[test]
    fn test_progress_bar() {
        assert_eq!(progress_bar(0), "[░░░░░░░░░░]");
        assert_eq!(progress_bar(62), "[██████░░░░]");
        assert_eq!(progress_bar(100), "[██████████]");
        assert_eq!(progress_bar(250), "[██████████]");
    }

    #[tokio::test]
    async fn test_detailed_text_output() {
        let ctx = Context::new(EduConfig::default(), false);
        execute(OverviewArgs { detailed: true }, &ctx).await.unwrap();
    }
}
