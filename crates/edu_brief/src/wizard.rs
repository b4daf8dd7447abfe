//! Brief wizard state machine.
//!
//! The wizard walks through three input steps and a review step. From the
//! review step a single generation can be started; while it runs the wizard
//! is `Generating`, and a successful answer makes it terminal (`Result`).
//! A failed answer returns it to the review step with all fields kept.
//!
//! Generation can be driven in one call with [`BriefWizard::generate`], or in
//! two halves with [`BriefWizard::begin_generation`] and
//! [`BriefWizard::complete_generation`] when the caller needs to render the
//! `Generating` state while the service works.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use edu_core::notify::{Notification, Notifier, TracingNotifier};

use crate::brief::{BriefRequest, GeneratedBrief};
use crate::error::{BriefError, BriefResult};
use crate::fields::{BriefField, BriefFields};
use crate::generator::BriefGenerator;

const SOURCE: &str = "brief-wizard";

/// A wizard step, always in `1..=4`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct WizardStep(u8);

impl WizardStep {
    pub const COUNT: u8 = 4;
    pub const TARGET_INFO: WizardStep = WizardStep(1);
    pub const LEARNING_GOALS: WizardStep = WizardStep(2);
    pub const CONSTRAINTS: WizardStep = WizardStep(3);
    pub const REVIEW: WizardStep = WizardStep(4);

    pub fn new(number: u8) -> Option<Self> {
        (1..=Self::COUNT).contains(&number).then_some(Self(number))
    }

    pub fn all() -> [WizardStep; 4] {
        [
            Self::TARGET_INFO,
            Self::LEARNING_GOALS,
            Self::CONSTRAINTS,
            Self::REVIEW,
        ]
    }

    pub fn number(&self) -> u8 {
        self.0
    }

    /// The following step, or this one if it is the last.
    pub fn next(&self) -> Self {
        Self((self.0 + 1).min(Self::COUNT))
    }

    /// The preceding step, or this one if it is the first.
    pub fn previous(&self) -> Self {
        Self(self.0.saturating_sub(1).max(1))
    }

    pub fn is_review(&self) -> bool {
        *self == Self::REVIEW
    }

    pub fn name(&self) -> &'static str {
        match self.0 {
            1 => "Target info",
            2 => "Learning goals",
            3 => "Constraints",
            _ => "Review & generate",
        }
    }

    /// Fields asked for on this step, in form order.
    pub fn fields(&self) -> Vec<BriefField> {
        BriefField::ALL
            .iter()
            .copied()
            .filter(|field| field.step_number() == self.0)
            .collect()
    }
}

impl TryFrom<u8> for WizardStep {
    type Error = String;

    fn try_from(number: u8) -> Result<Self, Self::Error> {
        Self::new(number).ok_or_else(|| format!("wizard step out of range: {}", number))
    }
}

impl From<WizardStep> for u8 {
    fn from(step: WizardStep) -> Self {
        step.0
    }
}

impl fmt::Display for WizardStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}. {}", self.0, self.name())
    }
}

/// Where the wizard is, as the presentation layer sees it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum WizardStatus {
    Step1,
    Step2,
    Step3,
    Step4Review,
    Generating,
    Result,
}

impl WizardStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, WizardStatus::Result)
    }
}

/// Rendering hint for the step indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepProgress {
    Done,
    Current,
    Upcoming,
}

/// One line of the review summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReviewLine {
    pub field: BriefField,
    pub label: &'static str,
    /// Entered value, or `-` when empty
    pub value: String,
}

/// Complete wizard state.
///
/// Invariants: `current_step` is in `1..=4`; `is_generating` and `result`
/// are never both set; `result` is only set on the review step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WizardState {
    current_step: WizardStep,
    fields: BriefFields,
    is_generating: bool,
    result: Option<GeneratedBrief>,
}

impl Default for WizardState {
    fn default() -> Self {
        Self {
            current_step: WizardStep::TARGET_INFO,
            fields: BriefFields::new(),
            is_generating: false,
            result: None,
        }
    }
}

impl WizardState {
    pub fn current_step(&self) -> WizardStep {
        self.current_step
    }

    pub fn fields(&self) -> &BriefFields {
        &self.fields
    }

    pub fn is_generating(&self) -> bool {
        self.is_generating
    }

    pub fn result(&self) -> Option<&GeneratedBrief> {
        self.result.as_ref()
    }

    pub fn status(&self) -> WizardStatus {
        if self.is_generating {
            return WizardStatus::Generating;
        }
        if self.result.is_some() {
            return WizardStatus::Result;
        }
        match self.current_step.number() {
            1 => WizardStatus::Step1,
            2 => WizardStatus::Step2,
            3 => WizardStatus::Step3,
            _ => WizardStatus::Step4Review,
        }
    }

    /// Check the state invariants.
    pub fn is_consistent(&self) -> bool {
        let exclusive = !(self.is_generating && self.result.is_some());
        let result_on_review = self.result.is_none() || self.current_step.is_review();
        let score_in_range = self.result.as_ref().map_or(true, |b| b.quality_score <= 100);
        exclusive && result_on_review && score_in_range
    }
}

/// The brief wizard.
pub struct BriefWizard {
    state: WizardState,
    notifier: Arc<dyn Notifier>,
}

impl Default for BriefWizard {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for BriefWizard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BriefWizard")
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl BriefWizard {
    /// Create a fresh wizard that logs its notifications.
    pub fn new() -> Self {
        Self::with_notifier(Arc::new(TracingNotifier))
    }

    pub fn with_notifier(notifier: Arc<dyn Notifier>) -> Self {
        Self {
            state: WizardState::default(),
            notifier,
        }
    }

    pub fn state(&self) -> &WizardState {
        &self.state
    }

    pub fn status(&self) -> WizardStatus {
        self.state.status()
    }

    pub fn current_step(&self) -> WizardStep {
        self.state.current_step
    }

    pub fn fields(&self) -> &BriefFields {
        &self.state.fields
    }

    pub fn is_generating(&self) -> bool {
        self.state.is_generating
    }

    pub fn result(&self) -> Option<&GeneratedBrief> {
        self.state.result.as_ref()
    }

    /// Navigation is only possible before a generation starts.
    fn can_navigate(&self) -> bool {
        !self.state.is_generating && self.state.result.is_none()
    }

    /// Move one step forward, stopping at the review step.
    ///
    /// Fields are not validated; empty fields may be carried forward.
    pub fn advance(&mut self) -> WizardStep {
        if !self.can_navigate() {
            debug!("Ignoring advance in state {:?}", self.status());
            return self.state.current_step;
        }
        let next = self.state.current_step.next();
        if next != self.state.current_step {
            debug!("Wizard step {} -> {}", self.state.current_step.number(), next.number());
        }
        self.state.current_step = next;
        next
    }

    /// Move one step back, stopping at the first step.
    pub fn retreat(&mut self) -> WizardStep {
        if !self.can_navigate() {
            debug!("Ignoring retreat in state {:?}", self.status());
            return self.state.current_step;
        }
        let previous = self.state.current_step.previous();
        if previous != self.state.current_step {
            debug!(
                "Wizard step {} -> {}",
                self.state.current_step.number(),
                previous.number()
            );
        }
        self.state.current_step = previous;
        previous
    }

    /// Store a field value. Returns whether the value changed.
    ///
    /// Always allowed and never changes the step. A generation already in
    /// flight keeps the snapshot it was started with.
    pub fn update_field(&mut self, field: BriefField, value: impl Into<String>) -> bool {
        self.state.fields.set(field, value)
    }

    /// Store a field value addressed by its wire name.
    pub fn update_field_by_name(&mut self, name: &str, value: impl Into<String>) -> BriefResult<bool> {
        let field: BriefField = name.parse()?;
        Ok(self.update_field(field, value))
    }

    /// Whether [`generate`](Self::generate) would start a generation now.
    pub fn can_generate(&self) -> bool {
        self.state.current_step.is_review() && self.can_navigate()
    }

    /// Enter `Generating` and return the request to send.
    ///
    /// Returns `None`, leaving the state untouched, unless the wizard is on
    /// the review step without a result and without a generation in flight.
    pub fn begin_generation(&mut self) -> Option<BriefRequest> {
        if !self.can_generate() {
            debug!("Generation not started in state {:?}", self.status());
            return None;
        }
        self.state.is_generating = true;
        info!(
            "Starting brief generation ({} of 10 fields filled)",
            self.state.fields.filled_count()
        );
        Some(BriefRequest::new(self.state.fields.clone()))
    }

    /// Apply the answer of the generation service.
    ///
    /// Success stores the brief and makes the wizard terminal. Failure
    /// returns to the review step with fields intact and reports
    /// [`BriefError::GenerationFailed`]. A completion that arrives while no
    /// generation is in flight is ignored and yields `Ok(None)`.
    pub fn complete_generation(
        &mut self,
        outcome: BriefResult<GeneratedBrief>,
    ) -> BriefResult<Option<&GeneratedBrief>> {
        if !self.state.is_generating {
            warn!("Ignoring generation result: no generation in flight");
            return Ok(None);
        }
        self.state.is_generating = false;

        let outcome = outcome.and_then(|brief| {
            if brief.quality_score > 100 {
                Err(BriefError::GenerationFailed(format!(
                    "quality score out of range: {}",
                    brief.quality_score
                )))
            } else {
                Ok(brief)
            }
        });

        match outcome {
            Ok(brief) => {
                info!("Brief generated (quality score {})", brief.quality_score);
                self.notifier.notify(
                    Notification::success(SOURCE, "Brief generated successfully")
                        .with_metadata("qualityScore", serde_json::json!(brief.quality_score)),
                );
                self.state.result = Some(brief);
                Ok(self.state.result.as_ref())
            }
            Err(err) => {
                let reason = match err {
                    BriefError::GenerationFailed(reason) => reason,
                    other => other.to_string(),
                };
                warn!("Brief generation failed: {}", reason);
                self.notifier.notify(Notification::error(
                    SOURCE,
                    format!("Brief generation failed: {}", reason),
                ));
                Err(BriefError::GenerationFailed(reason))
            }
        }
    }

    /// Run one generation against `generator`.
    ///
    /// `Ok(None)` means the wizard was not in a state that allows generating
    /// and nothing happened.
    pub async fn generate<G>(&mut self, generator: &G) -> BriefResult<Option<&GeneratedBrief>>
    where
        G: BriefGenerator + ?Sized,
    {
        let Some(request) = self.begin_generation() else {
            return Ok(None);
        };
        let outcome = generator.generate(&request).await;
        self.complete_generation(outcome)
    }

    /// Discard everything and start over at step 1.
    ///
    /// Refused while a generation is in flight, since generations cannot be
    /// cancelled.
    pub fn reset(&mut self) -> bool {
        if self.state.is_generating {
            warn!("Cannot reset wizard while a brief is being generated");
            return false;
        }
        self.state = WizardState::default();
        info!("Wizard reset");
        true
    }

    /// Progress through the steps, `25` per step.
    pub fn progress_percent(&self) -> u8 {
        let step = u16::from(self.state.current_step.number());
        (step * 100 / u16::from(WizardStep::COUNT)) as u8
    }

    pub fn step_progress(&self, step: WizardStep) -> StepProgress {
        let current = self.state.current_step;
        if step < current {
            StepProgress::Done
        } else if step == current {
            StepProgress::Current
        } else {
            StepProgress::Upcoming
        }
    }

    /// Summary shown on the review step.
    pub fn review_summary(&self) -> Vec<ReviewLine> {
        [
            BriefField::TargetGroup,
            BriefField::AgeRange,
            BriefField::SkillLevel,
            BriefField::Duration,
        ]
        .into_iter()
        .map(|field| {
            let value = self.state.fields.get(field);
            ReviewLine {
                field,
                label: field.label(),
                value: if value.is_empty() {
                    "-".to_string()
                } else {
                    value.to_string()
                },
            }
        })
        .collect()
    }
}
