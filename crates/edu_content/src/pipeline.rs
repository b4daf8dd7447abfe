//! Content generation pipeline.
//!
//! A brief flows through six stages: direction, curriculum, weekly lessons,
//! slides, practice templates and AI tool recommendations. At most one
//! stage is generating at a time; stages complete in order.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use edu_core::config::DEFAULT_CONTENT_DELAY_MS;
use edu_core::notify::{Notification, Notifier, TracingNotifier};

const SOURCE: &str = "content-generator";

/// Status of a pipeline stage or slide section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StageStatus {
    Completed,
    Generating,
    Pending,
}

impl StageStatus {
    /// Progress bar value used for a stage in this status.
    pub fn progress_percent(&self) -> u8 {
        match self {
            StageStatus::Completed => 100,
            StageStatus::Generating => 60,
            StageStatus::Pending => 0,
        }
    }
}

impl fmt::Display for StageStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            StageStatus::Completed => "completed",
            StageStatus::Generating => "generating",
            StageStatus::Pending => "pending",
        };
        write!(f, "{}", label)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineStage {
    pub id: String,
    pub name: String,
    /// Typical generation time
    pub estimated_secs: u32,
    pub status: StageStatus,
}

impl PipelineStage {
    pub fn new(id: impl Into<String>, name: impl Into<String>, estimated_secs: u32) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            estimated_secs,
            status: StageStatus::Pending,
        }
    }

    fn with_status(mut self, status: StageStatus) -> Self {
        self.status = status;
        self
    }
}

/// Ordered generation stages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationPipeline {
    stages: Vec<PipelineStage>,
}

impl Default for GenerationPipeline {
    /// The demo pipeline: three stages done, slides in progress.
    fn default() -> Self {
        Self::new(vec![
            PipelineStage::new("direction", "Course direction", 15)
                .with_status(StageStatus::Completed),
            PipelineStage::new("curriculum", "Curriculum", 30)
                .with_status(StageStatus::Completed),
            PipelineStage::new("lessons", "Weekly lesson plans", 45)
                .with_status(StageStatus::Completed),
            PipelineStage::new("slides", "Slides", 120).with_status(StageStatus::Generating),
            PipelineStage::new("templates", "Practice templates", 40),
            PipelineStage::new("tools", "AI tool recommendations", 20),
        ])
    }
}

impl GenerationPipeline {
    pub fn new(stages: Vec<PipelineStage>) -> Self {
        Self { stages }
    }

    pub fn stages(&self) -> &[PipelineStage] {
        &self.stages
    }

    pub fn completed_count(&self) -> usize {
        self.stages
            .iter()
            .filter(|s| s.status == StageStatus::Completed)
            .count()
    }

    /// Share of completed stages (0-100).
    pub fn progress_percent(&self) -> u8 {
        let total = self.stages.len();
        if total == 0 {
            100
        } else {
            ((self.completed_count() * 100) / total) as u8
        }
    }

    pub fn is_complete(&self) -> bool {
        self.stages.iter().all(|s| s.status == StageStatus::Completed)
    }

    /// The stage being generated, if any.
    pub fn current_stage(&self) -> Option<&PipelineStage> {
        self.stages
            .iter()
            .find(|s| s.status == StageStatus::Generating)
    }

    /// Sum of all stage estimates.
    pub fn total_estimated_secs(&self) -> u32 {
        self.stages.iter().map(|s| s.estimated_secs).sum()
    }

    /// Complete the generating stage and start the next pending one.
    ///
    /// When nothing is generating the first pending stage is started instead.
    /// Returns the stage that was completed.
    pub fn advance(&mut self) -> Option<PipelineStage> {
        let completed = match self
            .stages
            .iter()
            .position(|s| s.status == StageStatus::Generating)
        {
            Some(index) => {
                self.stages[index].status = StageStatus::Completed;
                Some(self.stages[index].clone())
            }
            None => None,
        };

        if let Some(next) = self
            .stages
            .iter_mut()
            .find(|s| s.status == StageStatus::Pending)
        {
            debug!("Pipeline stage {} started", next.id);
            next.status = StageStatus::Generating;
        }

        completed
    }
}

/// One week of a curriculum.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurriculumWeek {
    pub week: u8,
    pub title: String,
    pub topics: Vec<String>,
    /// Hands-on activity of the week
    pub activity: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Curriculum {
    pub title: String,
    pub duration: String,
    pub weeks: Vec<CurriculumWeek>,
}

fn week(number: u8, title: &str, topics: &[&str], activity: &str) -> CurriculumWeek {
    CurriculumWeek {
        week: number,
        title: title.to_string(),
        topics: topics.iter().map(|t| t.to_string()).collect(),
        activity: activity.to_string(),
    }
}

pub fn sample_curriculum() -> Curriculum {
    Curriculum {
        title: "Everyday AI for Seniors".to_string(),
        duration: "8-week course".to_string(),
        weeks: vec![
            week(
                1,
                "Getting to know AI",
                &["ChatGPT basics", "Asking good questions"],
                "Simple conversation practice",
            ),
            week(
                2,
                "Making images with AI",
                &["Intro to DALL-E", "Poster design"],
                "Make your own poster",
            ),
            week(
                3,
                "Translating and summarising",
                &["Translation tools", "News summaries"],
                "Plan a trip",
            ),
            week(
                4,
                "Voice assistants",
                &["Voice commands", "Managing a calendar"],
                "Use the phone assistant",
            ),
        ],
    }
}

/// A block of slides in a generated deck.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlideSection {
    pub kind: String,
    pub count: u32,
    pub status: StageStatus,
}

pub fn slide_structure() -> Vec<SlideSection> {
    [
        ("Cover", 1, StageStatus::Completed),
        ("Learning goals", 1, StageStatus::Completed),
        ("Examples & explanation", 5, StageStatus::Generating),
        ("Practice guide", 3, StageStatus::Pending),
        ("Quiz", 2, StageStatus::Pending),
        ("Summary & homework", 1, StageStatus::Pending),
        ("Instructor notes", 1, StageStatus::Pending),
    ]
    .into_iter()
    .map(|(kind, count, status)| SlideSection {
        kind: kind.to_string(),
        count,
        status,
    })
    .collect()
}

/// A phone-friendly exercise with the tools it uses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PracticeTemplate {
    pub title: String,
    pub tools: Vec<String>,
    pub minutes: u32,
    pub deliverable: String,
}

pub fn practice_templates() -> Vec<PracticeTemplate> {
    [
        ("Image generation", &["DALL-E 3"][..], 10, "Personal poster"),
        ("Translation & summary", &["Papago", "ChatGPT"][..], 8, "Travel itinerary"),
        ("Poster design", &["Canva Mobile"][..], 12, "Event poster"),
        ("Survey", &["Google Forms"][..], 9, "Survey form"),
    ]
    .into_iter()
    .map(|(title, tools, minutes, deliverable)| PracticeTemplate {
        title: title.to_string(),
        tools: tools.iter().map(|t| t.to_string()).collect(),
        minutes,
        deliverable: deliverable.to_string(),
    })
    .collect()
}

/// Runs simulated generation steps over a pipeline.
pub struct ContentGenerator {
    pipeline: GenerationPipeline,
    delay: Duration,
    notifier: Arc<dyn Notifier>,
}

impl Default for ContentGenerator {
    fn default() -> Self {
        Self::new(GenerationPipeline::default())
    }
}

impl ContentGenerator {
    pub fn new(pipeline: GenerationPipeline) -> Self {
        Self {
            pipeline,
            delay: Duration::from_millis(DEFAULT_CONTENT_DELAY_MS),
            notifier: Arc::new(TracingNotifier),
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn with_notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = notifier;
        self
    }

    pub fn pipeline(&self) -> &GenerationPipeline {
        &self.pipeline
    }

    /// Simulate one generation run and advance the pipeline by a stage.
    ///
    /// Returns the stage that completed, if one was generating.
    pub async fn run(&mut self) -> Option<PipelineStage> {
        info!("Content generation started");
        self.notifier
            .notify(Notification::info(SOURCE, "Content generation started"));

        tokio::time::sleep(self.delay).await;

        let completed = self.pipeline.advance();
        let message = match &completed {
            Some(stage) => format!(
                "{} generation completed ({})",
                stage.name,
                format_secs(self.delay.as_secs())
            ),
            None => "Nothing left to generate".to_string(),
        };
        info!("{}", message);

        let mut notification = Notification::success(SOURCE, message);
        if let Some(stage) = &completed {
            notification = notification.with_metadata("stage", serde_json::json!(stage.id));
        }
        self.notifier.notify(notification);

        completed
    }
}

/// `130` → `2m 10s`.
pub fn format_secs(secs: u64) -> String {
    match (secs / 60, secs % 60) {
        (0, s) => format!("{}s", s),
        (m, 0) => format!("{}m", m),
        (m, s) => format!("{}m {}s", m, s),
    }
}
