//! Brief generation service.
//!
//! [`SimulatedBriefGenerator`] stands in for a real content-generation
//! backend: it waits a fixed delay and answers with a canned brief. It also
//! captures every request so tests can verify what the wizard sent.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::RwLock;
use tracing::{debug, info, warn};

use edu_core::config::DEFAULT_BRIEF_DELAY_MS;

use crate::brief::{BriefRequest, GeneratedBrief, KpiProposal, Persona, RiskItem};
use crate::error::{BriefError, BriefResult};

/// Produces a brief from the wizard's fields.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BriefGenerator: Send + Sync {
    async fn generate(&self, request: &BriefRequest) -> BriefResult<GeneratedBrief>;
}

/// The fixed brief returned by the simulated service.
pub fn canned_brief() -> GeneratedBrief {
    GeneratedBrief {
        direction: "Practical AI tools course for local seniors, built around a \
                    smartphone-first curriculum that keeps the entry barrier low."
            .to_string(),
        personas: vec![
            Persona {
                name: "Digital Explorer".to_string(),
                age_range: "55-65".to_string(),
                value_proposition: "Solve everyday inconveniences with AI".to_string(),
            },
            Persona {
                name: "Creative Senior".to_string(),
                age_range: "60-70".to_string(),
                value_proposition: "Expand hobbies and creative work with AI".to_string(),
            },
        ],
        kpis: vec![
            KpiProposal {
                metric: "Week 1 completion rate".to_string(),
                target: "80%".to_string(),
                rationale: "A low entry barrier should keep early completion high".to_string(),
            },
            KpiProposal {
                metric: "Assignment submission rate".to_string(),
                target: "70%".to_string(),
                rationale: "Mobile exercises make submitting easy".to_string(),
            },
            KpiProposal {
                metric: "NPS".to_string(),
                target: "50+".to_string(),
                rationale: "Practical value drives recommendations".to_string(),
            },
        ],
        risks: vec![
            RiskItem {
                risk: "Uneven device proficiency".to_string(),
                mitigation: "Reserve 1:1 support time and encourage peer learning".to_string(),
            },
            RiskItem {
                risk: "Unreliable network at public venues".to_string(),
                mitigation: "Hand out offline material and a hotspot fallback".to_string(),
            },
        ],
        quality_score: 78,
        generated_at: Utc::now(),
    }
}

/// Generation service that answers after a fixed delay.
///
/// Clones share captured requests and failure settings.
#[derive(Clone)]
pub struct SimulatedBriefGenerator {
    delay: Duration,
    captured_requests: Arc<RwLock<Vec<BriefRequest>>>,
    simulate_failure: Arc<RwLock<Option<String>>>,
}

impl Default for SimulatedBriefGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl SimulatedBriefGenerator {
    /// Create a generator with the default 2.5 second delay.
    pub fn new() -> Self {
        Self {
            delay: Duration::from_millis(DEFAULT_BRIEF_DELAY_MS),
            captured_requests: Arc::new(RwLock::new(Vec::new())),
            simulate_failure: Arc::new(RwLock::new(None)),
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Make every following call fail with the given reason.
    pub fn simulate_failure(self, reason: impl Into<String>) -> Self {
        *self.simulate_failure.write() = Some(reason.into());
        self
    }

    /// Go back to answering successfully.
    pub fn clear_failure(&self) {
        *self.simulate_failure.write() = None;
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn requests(&self) -> Vec<BriefRequest> {
        self.captured_requests.read().clone()
    }

    pub fn call_count(&self) -> usize {
        self.captured_requests.read().len()
    }
}

#[async_trait]
impl BriefGenerator for SimulatedBriefGenerator {
    async fn generate(&self, request: &BriefRequest) -> BriefResult<GeneratedBrief> {
        self.captured_requests.write().push(request.clone());
        debug!(
            "Simulating brief generation ({} of 10 fields filled, {:?} delay)",
            request.fields.filled_count(),
            self.delay
        );

        tokio::time::sleep(self.delay).await;

        let failure = self.simulate_failure.read().clone();
        if let Some(reason) = failure {
            warn!("Simulated brief generation failure: {}", reason);
            return Err(BriefError::GenerationFailed(reason));
        }

        let brief = canned_brief();
        info!("Simulated brief ready (quality score {})", brief.quality_score);
        Ok(brief)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::{BriefField, BriefFields};

    fn request() -> BriefRequest {
        let mut fields = BriefFields::new();
        fields.set(BriefField::TargetGroup, "Local seniors");
        BriefRequest::new(fields)
    }

    #[test]
    fn test_canned_brief_shape() {
        let brief = canned_brief();
        assert_eq!(brief.personas.len(), 2);
        assert_eq!(brief.kpis.len(), 3);
        assert_eq!(brief.risks.len(), 2);
        assert_eq!(brief.quality_score, 78);
        assert!(brief.meets_quality_bar());
    }

    #[tokio::test(start_paused = true)]
    async fn test_waits_for_configured_delay() {
        let generator = SimulatedBriefGenerator::new();
        let started = tokio::time::Instant::now();

        let brief = generator.generate(&request()).await.unwrap();

        assert!(started.elapsed() >= Duration::from_millis(2500));
        assert_eq!(brief.personas.len(), 2);
    }

    #[tokio::test]
    async fn test_captures_requests() {
        let generator = SimulatedBriefGenerator::new().with_delay(Duration::ZERO);
        let handle = generator.clone();

        generator.generate(&request()).await.unwrap();

        assert_eq!(handle.call_count(), 1);
        assert_eq!(
            handle.requests()[0].fields.get(BriefField::TargetGroup),
            "Local seniors"
        );
    }

    #[tokio::test]
    async fn test_failure_simulation() {
        let generator = SimulatedBriefGenerator::new()
            .with_delay(Duration::ZERO)
            .simulate_failure("model overloaded");

        let err = generator.generate(&request()).await.unwrap_err();
        assert_eq!(err, BriefError::GenerationFailed("model overloaded".to_string()));

        generator.clear_failure();
        assert!(generator.generate(&request()).await.is_ok());
        assert_eq!(generator.call_count(), 2);
    }
}
