//! Generate command - Show and advance the content generation pipeline.

use std::sync::Arc;

use anyhow::Result;
use clap::Args;
use serde::Serialize;

use edu_content::{
    format_secs, practice_templates, sample_curriculum, slide_structure, ContentGenerator,
    Curriculum, GenerationPipeline, PipelineStage, PracticeTemplate, SlideSection, StageStatus,
};

use super::{ConsoleNotifier, Context};

#[derive(Args)]
pub struct GenerateArgs {
    /// Run one simulated generation step before showing the pipeline
    #[arg(long)]
    run: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateView<'a> {
    pipeline: &'a GenerationPipeline,
    progress_percent: u8,
    completed: Option<PipelineStage>,
    curriculum: Curriculum,
    slides: Vec<SlideSection>,
    templates: Vec<PracticeTemplate>,
}

pub async fn execute(args: GenerateArgs, ctx: &Context) -> Result<()> {
    let mut generator = ContentGenerator::new(GenerationPipeline::default())
        .with_delay(ctx.config.simulation.content_delay())
        .with_notifier(Arc::new(ConsoleNotifier));

    let completed = if args.run {
        generator.run().await
    } else {
        None
    };

    let pipeline = generator.pipeline();
    let view = GenerateView {
        pipeline,
        progress_percent: pipeline.progress_percent(),
        completed,
        curriculum: sample_curriculum(),
        slides: slide_structure(),
        templates: practice_templates(),
    };

    if ctx.json {
        return ctx.print_json(&view);
    }
    print_view(&view);
    Ok(())
}

fn status_icon(status: StageStatus) -> &'static str {
    match status {
        StageStatus::Completed => "✅",
        StageStatus::Generating => "⏳",
        StageStatus::Pending => "⬜",
    }
}

fn print_view(view: &GenerateView<'_>) {
    println!(
        "⚙️  Generation pipeline: {}/{} stages ({}%)",
        view.pipeline.completed_count(),
        view.pipeline.stages().len(),
        view.progress_percent
    );
    for stage in view.pipeline.stages() {
        println!(
            "   {} {:<26} {:>7}  {}",
            status_icon(stage.status),
            stage.name,
            format_secs(u64::from(stage.estimated_secs)),
            stage.status
        );
    }
    println!(
        "   Estimated total: {}",
        format_secs(u64::from(view.pipeline.total_estimated_secs()))
    );

    println!();
    println!("📚 {} ({})", view.curriculum.title, view.curriculum.duration);
    for week in &view.curriculum.weeks {
        println!("   Week {}: {}", week.week, week.title);
        println!("      Topics: {}", week.topics.join(", "));
        println!("      Activity: {}", week.activity);
    }

    println!();
    let total_slides: u32 = view.slides.iter().map(|s| s.count).sum();
    println!("🖼️  Slides ({} total)", total_slides);
    for section in &view.slides {
        println!(
            "   {} {:<24} {:>2}",
            status_icon(section.status),
            section.kind,
            section.count
        );
    }

    println!();
    println!("📱 Practice templates");
    for template in &view.templates {
        println!(
            "   • {} [{}] {} min → {}",
            template.title,
            template.tools.join(", "),
            template.minutes,
            template.deliverable
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use edu_core::EduConfig;

    #[tokio::test(start_paused = true)]
    async fn test_run_advances_pipeline() {
        let ctx = Context::new(EduConfig::default(), true);
        execute(GenerateArgs { run: true }, &ctx).await.unwrap();
    }

    #[tokio::test]
    async fn test_show_without_running() {
        let ctx = Context::new(EduConfig::default(), false);
        let started = std::time::Instant::now();
        execute(GenerateArgs { run: false }, &ctx).await.unwrap();
        assert!(started.elapsed() < ctx.config.simulation.content_delay());
    }
}
