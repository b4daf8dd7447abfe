//! Versions command - Show version history, promote or roll back releases.

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tracing::info;

use edu_content::{
    sample_release_notes, ChangeKind, ContentVersion, ReleaseNotes, VersionHistory, VersionStatus,
};

use super::Context;

#[derive(Args)]
pub struct VersionsArgs {
    /// Move a version one step along draft → review → approved → deployed
    #[arg(long, value_name = "VERSION", conflicts_with = "rollback")]
    promote: Option<String>,

    /// Redeploy an archived version
    #[arg(long, value_name = "VERSION")]
    rollback: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct VersionsView<'a> {
    versions: &'a [ContentVersion],
    release_notes: ReleaseNotes,
}

pub async fn execute(args: VersionsArgs, ctx: &Context) -> Result<()> {
    let mut history = VersionHistory::sample();

    if let Some(version) = &args.promote {
        let status = history.promote(version)?;
        info!("Promoted {} to {}", version, status);
        if !ctx.json {
            println!("✅ {} is now {}", version, status);
        }
    }

    if let Some(version) = &args.rollback {
        history.rollback(version)?;
        if !ctx.json {
            println!("↩️  Rolled back to {}", version);
        }
    }

    let view = VersionsView {
        versions: history.versions(),
        release_notes: sample_release_notes(),
    };

    if ctx.json {
        return ctx.print_json(&view);
    }
    print_view(&view);
    Ok(())
}

fn status_icon(status: VersionStatus) -> &'static str {
    match status {
        VersionStatus::Draft => "📝",
        VersionStatus::Review => "👀",
        VersionStatus::Approved => "👍",
        VersionStatus::Deployed => "🚀",
        VersionStatus::Archived => "📦",
    }
}

fn change_icon(kind: ChangeKind) -> &'static str {
    match kind {
        ChangeKind::Improvement => "✨",
        ChangeKind::Update => "🔄",
        ChangeKind::Addition => "➕",
        ChangeKind::Fix => "🔧",
    }
}

fn print_view(view: &VersionsView<'_>) {
    println!("🗂️  Version history");
    for version in view.versions {
        println!(
            "   {} {:<8} {:<10} {} {} ({})",
            status_icon(version.status),
            version.version,
            version.status,
            version.date,
            version.author,
            version.issue_key
        );
        for change in &version.changes {
            println!("      - {}", change);
        }
        if !version.formats.is_empty() {
            println!("      Formats: {}", version.formats.join(", "));
        }
        if version.can_rollback() {
            println!("      ↩️  Rollback available");
        }
    }

    let notes = &view.release_notes;
    println!();
    println!("📰 Release notes {} ({})", notes.version, notes.date);
    println!("   {}", notes.summary);
    for change in &notes.changes {
        println!("   {} {}", change_icon(change.kind), change.description);
    }
    println!(
        "   {} lines in {} files, {} reviewers, approved in {}",
        notes.stats.lines_changed,
        notes.stats.files_changed,
        notes.stats.reviewers,
        notes.stats.approval_time
    );
}
