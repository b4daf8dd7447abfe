//! Brief command - Walk the brief wizard and generate a brief.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context as _, Result};
use clap::Args;
use tracing::info;

use edu_brief::{BriefFields, BriefWizard, GeneratedBrief, SimulatedBriefGenerator, WizardStep};

use super::{CliError, ConsoleNotifier, Context};

#[derive(Args)]
pub struct BriefArgs {
    /// Field value as key=value (repeatable), e.g. targetGroup="Seniors"
    #[arg(short, long = "field", value_name = "KEY=VALUE")]
    fields: Vec<String>,

    /// YAML file mapping field names to values
    #[arg(long, value_name = "PATH")]
    from: Option<PathBuf>,

    /// Make the generation service fail with this reason
    #[arg(long, value_name = "REASON")]
    simulate_failure: Option<String>,
}

pub async fn execute(args: BriefArgs, ctx: &Context) -> Result<()> {
    let fields = collect_fields(args.from.as_deref(), &args.fields)?;
    info!("Starting brief wizard with {} fields filled", fields.filled_count());

    let mut wizard = BriefWizard::with_notifier(Arc::new(ConsoleNotifier));
    walk_steps(&mut wizard, &fields, ctx.json);

    let mut generator =
        SimulatedBriefGenerator::new().with_delay(ctx.config.simulation.brief_delay());
    if let Some(reason) = args.simulate_failure {
        generator = generator.simulate_failure(reason);
    }

    if !ctx.json {
        println!("⏳ Generating brief...");
    }
    let generated = wizard
        .generate(&generator)
        .await
        .context("Brief generation did not complete")?
        .is_some();
    if !generated {
        anyhow::bail!("Wizard is not on the review step");
    }

    if ctx.json {
        return ctx.print_json(wizard.state());
    }
    if let Some(brief) = wizard.result() {
        print_brief(brief);
    }
    Ok(())
}

/// Merge fields from the YAML file with `key=value` overrides.
fn collect_fields(from: Option<&Path>, assignments: &[String]) -> Result<BriefFields> {
    let mut pairs: Vec<(String, String)> = Vec::new();

    if let Some(path) = from {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let values: BTreeMap<String, String> = serde_yaml::from_str(&content)
            .with_context(|| format!("Invalid brief file {}", path.display()))?;
        pairs.extend(values);
    }

    for assignment in assignments {
        pairs.push(parse_assignment(assignment)?);
    }

    Ok(BriefFields::from_pairs(pairs)?)
}

fn parse_assignment(assignment: &str) -> Result<(String, String), CliError> {
    match assignment.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_string(), value.to_string()))
        }
        _ => Err(CliError::InvalidFieldAssignment(assignment.to_string())),
    }
}

/// Fill each step's fields and move on until the review step.
fn walk_steps(wizard: &mut BriefWizard, fields: &BriefFields, quiet: bool) {
    while !wizard.current_step().is_review() {
        let step = wizard.current_step();
        if !quiet {
            println!(
                "📝 Step {}/{}: {} ({}%)",
                step,
                WizardStep::COUNT,
                step.name(),
                wizard.progress_percent()
            );
        }

        for field in step.fields() {
            if fields.is_filled(field) {
                wizard.update_field(field, fields.get(field));
            }
            if !quiet {
                let value = display_value(wizard.fields().get(field));
                println!("   {:<22} {}", field.label(), value);
            }
        }
        wizard.advance();
    }

    if !quiet {
        println!(
            "🔎 Step {}/{}: {}",
            wizard.current_step(),
            WizardStep::COUNT,
            wizard.current_step().name()
        );
        for line in wizard.review_summary() {
            println!("   {:<22} {}", line.label, line.value);
        }
    }
}

fn display_value(value: &str) -> &str {
    if value.is_empty() {
        "-"
    } else {
        value
    }
}

fn print_brief(brief: &GeneratedBrief) {
    println!();
    println!("🎯 Direction");
    println!("   {}", brief.direction);

    println!("👥 Personas");
    for persona in &brief.personas {
        println!("   • {} ({})", persona.name, persona.age_range);
        println!("     {}", persona.value_proposition);
    }

    println!("📈 KPIs");
    for kpi in &brief.kpis {
        println!("   • {}: {} ({})", kpi.metric, kpi.target, kpi.rationale);
    }

    println!("⚠️  Risks");
    for risk in &brief.risks {
        println!("   • {} → {}", risk.risk, risk.mitigation);
    }

    let verdict = if brief.meets_quality_bar() {
        "ready to use"
    } else {
        "needs review"
    };
    println!();
    println!("⭐ Quality score: {}/100 ({})", brief.quality_score, verdict);
}

#[cfg(test)]
mod tests {
    use super::*;
    use edu_brief::{BriefError, BriefField};
    use edu_core::EduConfig;
    use std::io::Write;

    fn fast_context() -> Context {
        let mut config = EduConfig::default();
        config.simulation.brief_delay_ms = 0;
        Context::new(config, true)
    }

    #[test]
    fn test_parse_assignment() {
        assert_eq!(
            parse_assignment("targetGroup=Seniors").unwrap(),
            ("targetGroup".to_string(), "Seniors".to_string())
        );
        assert_eq!(
            parse_assignment("constraints=a=b").unwrap().1,
            "a=b".to_string()
        );
        assert!(parse_assignment("no-equals").is_err());
        assert!(parse_assignment("=value").is_err());
    }

    #[test]
    fn test_file_values_are_overridden_by_flags() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "targetGroup: Seniors").unwrap();
        writeln!(file, "duration: 8 weeks").unwrap();

        let fields = collect_fields(
            Some(file.path()),
            &["duration=4 weeks".to_string(), "skill_level=Beginner".to_string()],
        )
        .unwrap();

        assert_eq!(fields.get(BriefField::TargetGroup), "Seniors");
        assert_eq!(fields.get(BriefField::Duration), "4 weeks");
        assert_eq!(fields.get(BriefField::SkillLevel), "Beginner");
    }

    #[test]
    fn test_unknown_field_is_rejected() {
        let err = collect_fields(None, &["colour=blue".to_string()]).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<BriefError>(),
            Some(BriefError::UnknownField(_))
        ));
    }

    #[test]
    fn test_walk_steps_reaches_review_with_fields() {
        let mut wizard = BriefWizard::new();
        let fields =
            BriefFields::from_pairs([("targetGroup", "Parents"), ("budget", "None")]).unwrap();

        walk_steps(&mut wizard, &fields, true);

        assert!(wizard.current_step().is_review());
        assert_eq!(wizard.fields(), &fields);
    }

    #[tokio::test]
    async fn test_execute_generates_brief() {
        let args = BriefArgs {
            fields: vec!["targetGroup=Seniors".to_string()],
            from: None,
            simulate_failure: None,
        };
        execute(args, &fast_context()).await.unwrap();
    }

    #[tokio::test]
    async fn test_execute_reports_generation_failure() {
        let args = BriefArgs {
            fields: Vec::new(),
            from: None,
            simulate_failure: Some("service unavailable".to_string()),
        };
        let err = execute(args, &fast_context()).await.unwrap_err();
        assert_eq!(
            err.downcast_ref::<BriefError>(),
            Some(&BriefError::GenerationFailed("service unavailable".to_string()))
        );
    }
}
