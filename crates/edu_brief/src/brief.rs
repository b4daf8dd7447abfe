//! The generated brief and the request that produces it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::fields::BriefFields;

/// Quality score from which a brief is considered good enough to use as is.
pub const QUALITY_BAR: u8 = 70;

/// A learner persona and the value the course offers them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Persona {
    pub name: String,
    pub age_range: String,
    pub value_proposition: String,
}

/// A proposed KPI with its target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KpiProposal {
    pub metric: String,
    pub target: String,
    pub rationale: String,
}

/// A delivery risk and how to mitigate it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskItem {
    pub risk: String,
    pub mitigation: String,
}

/// Output of one successful generation. Never modified after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedBrief {
    /// Overall direction of the course
    pub direction: String,
    pub personas: Vec<Persona>,
    pub kpis: Vec<KpiProposal>,
    pub risks: Vec<RiskItem>,
    /// Score in `0..=100`
    pub quality_score: u8,
    pub generated_at: DateTime<Utc>,
}

impl GeneratedBrief {
    pub fn meets_quality_bar(&self) -> bool {
        self.quality_score >= QUALITY_BAR
    }
}

/// Snapshot of the form handed to the generation service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BriefRequest {
    pub fields: BriefFields,
    pub requested_at: DateTime<Utc>,
}

impl BriefRequest {
    pub fn new(fields: BriefFields) -> Self {
        Self {
            fields,
            requested_at: Utc::now(),
        }
    }
}
