//! Analytics command - Learner feedback and improvement cards.

use anyhow::Result;
use clap::Args;

use edu_insights::{Analytics, ImprovementCard, ImprovementStatus, Priority};

use super::Context;

#[derive(Args)]
pub struct AnalyticsArgs {
    /// Only show improvement cards that are still pending
    #[arg(long)]
    pending: bool,
}

pub async fn execute(args: AnalyticsArgs, ctx: &Context) -> Result<()> {
    let analytics = Analytics::sample();

    if ctx.json {
        return ctx.print_json(&analytics);
    }

    println!("📋 Performance");
    for metric in &analytics.performance {
        println!("   {:<24} {:>5} ({})", metric.metric, metric.value, metric.change);
    }

    println!();
    println!("📅 Weekly feedback");
    for point in &analytics.feedback {
        println!(
            "   {}  NPS {:>3}  completion {:>3}%  satisfaction {:.1}",
            point.week, point.nps, point.completion, point.satisfaction
        );
    }
    if let Some(change) = analytics.nps_change() {
        println!("   NPS change: {:+}", change);
    }

    let counts = analytics.counts;
    println!();
    println!("💬 Feedback collected ({} total)", counts.total());
    println!(
        "   surveys {} · NPS {} · assignments {} · field notes {}",
        counts.surveys, counts.nps_responses, counts.assignments, counts.field_notes
    );

    println!();
    println!("💡 Improvement cards");
    let cards: Vec<&ImprovementCard> = if args.pending {
        analytics.by_status(ImprovementStatus::Pending)
    } else {
        analytics.improvements().iter().collect()
    };
    for card in cards {
        print_card(card);
    }

    Ok(())
}

fn priority_icon(priority: Priority) -> &'static str {
    match priority {
        Priority::High => "🔴",
        Priority::Medium => "🟡",
        Priority::Low => "🟢",
    }
}

fn print_card(card: &ImprovementCard) {
    println!();
    println!(
        "   {} [{}] {} ({})",
        priority_icon(card.priority),
        card.priority,
        card.title,
        card.status
    );
    println!("      Source: {}", card.source);
    println!("      Insight: {}", card.insight);
    println!("      Recommendation: {}", card.recommendation);
    println!("      Impact: {} · Effort: {}", card.impact, card.effort);
}

#[cfg(test)]
mod tests {
    use super::*;
    use edu_core::EduConfig;

    #[tokio::test]
    async fn test_text_and_json_output() {
        let text = Context::new(EduConfig::default(), false);
        execute(AnalyticsArgs { pending: true }, &text).await.unwrap();

        let json = Context::new(EduConfig::default(), true);
        execute(AnalyticsArgs { pending: false }, &json).await.unwrap();
    }
}
