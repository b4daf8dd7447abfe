//! Registry command - Search the content catalog.

use anyhow::Result;
use clap::Args;

use edu_content::{ContentFilter, ContentItem, ContentRegistry, CATEGORIES};

use super::Context;

#[derive(Args)]
pub struct RegistryArgs {
    /// Text matched against titles and tags
    #[arg(short, long, default_value = "")]
    query: String,

    /// Category name, or "all"
    #[arg(long, default_value = "all")]
    category: String,

    /// beginner, intermediate, advanced, or "all"
    #[arg(short, long, default_value = "all")]
    difficulty: String,
}

impl RegistryArgs {
    fn filter(&self) -> Result<ContentFilter> {
        Ok(ContentFilter {
            query: self.query.clone(),
            category: self.category.parse()?,
            difficulty: self.difficulty.parse()?,
        })
    }
}

pub async fn execute(args: RegistryArgs, ctx: &Context) -> Result<()> {
    let filter = args.filter()?;
    let registry = ContentRegistry::sample();
    let found = registry.search(&filter);

    if ctx.json {
        return ctx.print_json(&found);
    }

    println!(
        "🔍 {} of {} items (categories: {})",
        found.len(),
        registry.items().len(),
        CATEGORIES.join(", ")
    );
    if found.is_empty() {
        println!("   No content matches the current filter");
        return Ok(());
    }
    for item in found {
        print_item(item);
    }
    Ok(())
}

fn print_item(item: &ContentItem) {
    let mut badges = Vec::new();
    if item.is_popular() {
        badges.push("🔥 popular");
    }
    if item.is_archived() {
        badges.push("📦 archived");
    }

    println!();
    println!("   #{} {} {}", item.id, item.title, badges.join(" "));
    println!(
        "      {} · {} · {} · {}",
        item.category, item.difficulty, item.duration, item.target
    );
    println!("      Local issue: {}", item.local_issue);
    println!("      Tags: {}", item.tags.join(", "));
    println!(
        "      Reused {}× · ★ {:.1} · updated {}",
        item.reused_count, item.rating, item.last_updated
    );
}
