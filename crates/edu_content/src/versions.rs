//! Content versions and the release workflow.
//!
//! A version moves draft → review → approved → deployed. Only one version is
//! deployed at a time: deploying another archives it. Archived versions can
//! be rolled back into deployment.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{ContentError, ContentResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VersionStatus {
    Draft,
    Review,
    Approved,
    Deployed,
    Archived,
}

impl VersionStatus {
    /// Next status in the release workflow.
    pub fn next(&self) -> Option<VersionStatus> {
        match self {
            VersionStatus::Draft => Some(VersionStatus::Review),
            VersionStatus::Review => Some(VersionStatus::Approved),
            VersionStatus::Approved => Some(VersionStatus::Deployed),
            VersionStatus::Deployed | VersionStatus::Archived => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            VersionStatus::Draft => "draft",
            VersionStatus::Review => "in review",
            VersionStatus::Approved => "approved",
            VersionStatus::Deployed => "deployed",
            VersionStatus::Archived => "archived",
        }
    }
}

impl fmt::Display for VersionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentVersion {
    /// Semantic version label, e.g. `v2.3.1`
    pub version: String,
    pub status: VersionStatus,
    pub date: NaiveDate,
    pub author: String,
    pub changes: Vec<String>,
    /// Export formats available for this version
    pub formats: Vec<String>,
    /// Tracking issue key
    pub issue_key: String,
}

impl ContentVersion {
    pub fn can_rollback(&self) -> bool {
        self.status == VersionStatus::Archived
    }
}

/// Versions of one course, newest first.
#[derive(Debug, Clone, Default)]
pub struct VersionHistory {
    versions: Vec<ContentVersion>,
}

impl VersionHistory {
    pub fn new(versions: Vec<ContentVersion>) -> Self {
        Self { versions }
    }

    pub fn sample() -> Self {
        Self::new(sample_versions())
    }

    pub fn versions(&self) -> &[ContentVersion] {
        &self.versions
    }

    pub fn get(&self, version: &str) -> Option<&ContentVersion> {
        self.versions.iter().find(|v| v.version == version)
    }

    pub fn deployed(&self) -> Option<&ContentVersion> {
        self.versions
            .iter()
            .find(|v| v.status == VersionStatus::Deployed)
    }

    /// Versions waiting for an approval decision.
    pub fn awaiting_approval(&self) -> Vec<&ContentVersion> {
        self.versions
            .iter()
            .filter(|v| v.status == VersionStatus::Review)
            .collect()
    }

    fn index_of(&self, version: &str) -> ContentResult<usize> {
        self.versions
            .iter()
            .position(|v| v.version == version)
            .ok_or_else(|| ContentError::VersionNotFound(version.to_string()))
    }

    fn archive_deployed(&mut self) {
        for v in self
            .versions
            .iter_mut()
            .filter(|v| v.status == VersionStatus::Deployed)
        {
            info!("Archiving {}", v.version);
            v.status = VersionStatus::Archived;
        }
    }

    /// Move a version one step along the release workflow.
    pub fn promote(&mut self, version: &str) -> ContentResult<VersionStatus> {
        let index = self.index_of(version)?;
        let current = self.versions[index].status;
        let next = current.next().ok_or_else(|| ContentError::InvalidTransition {
            version: version.to_string(),
            status: current,
            action: "promote".to_string(),
        })?;

        if next == VersionStatus::Deployed {
            self.archive_deployed();
        }
        self.versions[index].status = next;
        info!("{}: {} -> {}", version, current, next);
        Ok(next)
    }

    /// Redeploy an archived version.
    pub fn rollback(&mut self, version: &str) -> ContentResult<()> {
        let index = self.index_of(version)?;
        let current = self.versions[index].status;
        if current != VersionStatus::Archived {
            return Err(ContentError::InvalidTransition {
                version: version.to_string(),
                status: current,
                action: "roll back".to_string(),
            });
        }

        self.archive_deployed();
        self.versions[index].status = VersionStatus::Deployed;
        info!("Rolled back to {}", version);
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeKind {
    Improvement,
    Update,
    Addition,
    Fix,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReleaseChange {
    pub kind: ChangeKind,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentStats {
    pub lines_changed: u32,
    pub files_changed: u32,
    pub reviewers: u32,
    pub approval_time: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReleaseNotes {
    pub version: String,
    pub date: NaiveDate,
    pub summary: String,
    pub changes: Vec<ReleaseChange>,
    pub stats: DeploymentStats,
}

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

fn sample_versions() -> Vec<ContentVersion> {
    vec![
        ContentVersion {
            version: "v2.3.1".to_string(),
            status: VersionStatus::Deployed,
            date: date(2024, 12, 10),
            author: "Instructor Kim".to_string(),
            changes: strings(&[
                "Lowered week 2 exercise difficulty",
                "Updated ChatGPT examples",
                "Added two quiz questions",
            ]),
            formats: strings(&["PDF", "Google Slides", "PPT"]),
            issue_key: "EDU-456".to_string(),
        },
        ContentVersion {
            version: "v2.3.0".to_string(),
            status: VersionStatus::Approved,
            date: date(2024, 12, 8),
            author: "Lead Lee".to_string(),
            changes: strings(&[
                "Feedback: shorter image generation exercise",
                "Expanded instructor notes",
            ]),
            formats: strings(&["PDF", "Google Slides"]),
            issue_key: "EDU-445".to_string(),
        },
        ContentVersion {
            version: "v2.2.0".to_string(),
            status: VersionStatus::Review,
            date: date(2024, 12, 5),
            author: "Manager Park".to_string(),
            changes: strings(&[
                "Improved week 3 translation exercise",
                "Added mobile guide images",
            ]),
            formats: Vec::new(),
            issue_key: "EDU-432".to_string(),
        },
        ContentVersion {
            version: "v2.1.0".to_string(),
            status: VersionStatus::Archived,
            date: date(2024, 11, 28),
            author: "Professor Choi".to_string(),
            changes: strings(&["Initial curriculum design", "8-week course layout"]),
            formats: strings(&["PDF"]),
            issue_key: "EDU-401".to_string(),
        },
    ]
}

pub fn sample_release_notes() -> ReleaseNotes {
    ReleaseNotes {
        version: "v2.3.1".to_string(),
        date: date(2024, 12, 10),
        summary: "Feedback-driven difficulty tuning and content additions".to_string(),
        changes: vec![
            ReleaseChange {
                kind: ChangeKind::Improvement,
                description: "Week 2 exercise shortened from 15 to 10 minutes".to_string(),
            },
            ReleaseChange {
                kind: ChangeKind::Update,
                description: "Examples switched to the latest ChatGPT version".to_string(),
            },
            ReleaseChange {
                kind: ChangeKind::Addition,
                description: "Two comprehension quiz questions".to_string(),
            },
            ReleaseChange {
                kind: ChangeKind::Fix,
                description: "Broken slide layout".to_string(),
            },
        ],
        stats: DeploymentStats {
            lines_changed: 342,
            files_changed: 12,
            reviewers: 2,
            approval_time: "1 day".to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_history() {
        let history = VersionHistory::sample();
        assert_eq!(history.versions().len(), 4);
        assert_eq!(history.deployed().unwrap().version, "v2.3.1");
        assert_eq!(history.awaiting_approval().len(), 1);
        assert!(history.get("v2.1.0").unwrap().can_rollback());
    }

    #[test]
    fn test_promote_review_to_approved() {
        let mut history = VersionHistory::sample();
        assert_eq!(history.promote("v2.2.0").unwrap(), VersionStatus::Approved);
        assert!(history.awaiting_approval().is_empty());
    }

    #[test]
    fn test_deploying_archives_previous() {
        let mut history = VersionHistory::sample();
        assert_eq!(history.promote("v2.3.0").unwrap(), VersionStatus::Deployed);

        assert_eq!(history.deployed().unwrap().version, "v2.3.0");
        assert_eq!(history.get("v2.3.1").unwrap().status, VersionStatus::Archived);
        let deployed = history
            .versions()
            .iter()
            .filter(|v| v.status == VersionStatus::Deployed)
            .count();
        assert_eq!(deployed, 1);
    }

    #[test]
    fn test_cannot_promote_past_deployed() {
        let mut history = VersionHistory::sample();
        let err = history.promote("v2.3.1").unwrap_err();
        assert_eq!(
            err,
            ContentError::InvalidTransition {
                version: "v2.3.1".to_string(),
                status: VersionStatus::Deployed,
                action: "promote".to_string(),
            }
        );
        assert!(history.promote("v2.1.0").is_err());
    }

    #[test]
    fn test_rollback() {
        let mut history = VersionHistory::sample();
        history.rollback("v2.1.0").unwrap();

        assert_eq!(history.deployed().unwrap().version, "v2.1.0");
        assert_eq!(history.get("v2.3.1").unwrap().status, VersionStatus::Archived);

        assert!(history.rollback("v2.2.0").is_err());
        assert_eq!(
            history.rollback("v9.9.9"),
            Err(ContentError::VersionNotFound("v9.9.9".to_string()))
        );
    }

    #[test]
    fn test_release_notes() {
        let notes = sample_release_notes();
        assert_eq!(notes.version, "v2.3.1");
        assert_eq!(notes.changes.len(), 4);
        assert_eq!(notes.stats.lines_changed, 342);
    }
}
