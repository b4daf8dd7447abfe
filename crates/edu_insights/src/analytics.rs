//! Learner feedback and the improvement cards derived from it.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

/// One week of the feedback trend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackPoint {
    pub week: String,
    pub nps: i32,
    pub completion: u8,
    /// Mean satisfaction on a 5-point scale
    pub satisfaction: f32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PerformanceMetric {
    pub metric: String,
    pub value: String,
    pub change: String,
}

/// Feedback collected over the last 30 days, per channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackCounts {
    pub surveys: u32,
    pub nps_responses: u32,
    pub assignments: u32,
    pub field_notes: u32,
}

impl FeedbackCounts {
    pub fn total(&self) -> u32 {
        self.surveys + self.nps_responses + self.assignments + self.field_notes
    }
}

/// Priority of an improvement card. Orders high first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
        };
        write!(f, "{}", label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ImprovementStatus {
    Approved,
    InProgress,
    Pending,
}

impl fmt::Display for ImprovementStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ImprovementStatus::Approved => "approved",
            ImprovementStatus::InProgress => "in progress",
            ImprovementStatus::Pending => "pending",
        };
        write!(f, "{}", label)
    }
}

/// A proposed content change backed by feedback.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImprovementCard {
    pub id: u32,
    pub priority: Priority,
    pub title: String,
    /// Feedback the card was derived from
    pub source: String,
    pub insight: String,
    pub recommendation: String,
    /// Expected effect
    pub impact: String,
    pub effort: String,
    pub status: ImprovementStatus,
}

/// Everything shown on the analytics tab.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Analytics {
    pub feedback: Vec<FeedbackPoint>,
    pub performance: Vec<PerformanceMetric>,
    pub counts: FeedbackCounts,
    improvements: Vec<ImprovementCard>,
}

impl Analytics {
    pub fn new(
        feedback: Vec<FeedbackPoint>,
        performance: Vec<PerformanceMetric>,
        counts: FeedbackCounts,
        mut improvements: Vec<ImprovementCard>,
    ) -> Self {
        // stable, so equal priorities keep their input order
        improvements.sort_by_key(|card| card.priority);
        Self {
            feedback,
            performance,
            counts,
            improvements,
        }
    }

    pub fn sample() -> Self {
        Self::new(
            sample_feedback(),
            sample_performance(),
            FeedbackCounts {
                surveys: 156,
                nps_responses: 134,
                assignments: 89,
                field_notes: 23,
            },
            sample_improvements(),
        )
    }

    /// Improvement cards, highest priority first.
    pub fn improvements(&self) -> &[ImprovementCard] {
        &self.improvements
    }

    pub fn by_status(&self, status: ImprovementStatus) -> Vec<&ImprovementCard> {
        let found: Vec<_> = self
            .improvements
            .iter()
            .filter(|card| card.status == status)
            .collect();
        debug!("{} improvement cards {}", found.len(), status);
        found
    }

    /// NPS change from the first to the latest week.
    pub fn nps_change(&self) -> Option<i32> {
        Some(self.feedback.last()?.nps - self.feedback.first()?.nps)
    }
}

fn sample_feedback() -> Vec<FeedbackPoint> {
    [
        ("W1", 48, 68, 4.2),
        ("W2", 52, 65, 4.3),
        ("W3", 55, 62, 4.4),
        ("W4", 58, 70, 4.5),
    ]
    .into_iter()
    .map(|(week, nps, completion, satisfaction)| FeedbackPoint {
        week: week.to_string(),
        nps,
        completion,
        satisfaction,
    })
    .collect()
}

fn sample_performance() -> Vec<PerformanceMetric> {
    [
        ("Surveys collected", "156", "+23"),
        ("Average NPS", "53", "+5"),
        ("Assignment completion", "66%", "+11%p"),
        ("Course completion", "72%", "+8%p"),
    ]
    .into_iter()
    .map(|(metric, value, change)| PerformanceMetric {
        metric: metric.to_string(),
        value: value.to_string(),
        change: change.to_string(),
    })
    .collect()
}

fn sample_improvements() -> Vec<ImprovementCard> {
    vec![
        ImprovementCard {
            id: 1,
            priority: Priority::High,
            title: "Shorten the week 2 exercise".to_string(),
            source: "15 surveys, 3 field notes".to_string(),
            insight: "67% of participants ran out of time; the exercise takes 18 minutes against a 10 minute target".to_string(),
            recommendation: "Cut the exercise from three steps to two and strengthen the handout".to_string(),
            impact: "Completion +12%p expected".to_string(),
            effort: "3 hours".to_string(),
            status: ImprovementStatus::Approved,
        },
        ImprovementCard {
            id: 2,
            priority: Priority::Medium,
            title: "Refresh the ChatGPT examples".to_string(),
            source: "2 instructor reports".to_string(),
            insight: "Examples still show the GPT-3.5 interface, which no longer matches GPT-4o".to_string(),
            recommendation: "Update example screenshots and prompts".to_string(),
            impact: "Less confusion, satisfaction +0.3 expected".to_string(),
            effort: "1 hour".to_string(),
            status: ImprovementStatus::InProgress,
        },
        ImprovementCard {
            id: 3,
            priority: Priority::Low,
            title: "Add more quizzes".to_string(),
            source: "NPS analysis".to_string(),
            insight: "Promoters (9-10) solved 2.3 quizzes on average, detractors (0-6) only 0.8".to_string(),
            recommendation: "Raise weekly quizzes from one to two".to_string(),
            impact: "NPS +5 expected".to_string(),
            effort: "2 hours".to_string(),
            status: ImprovementStatus::Pending,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(id: u32, priority: Priority) -> ImprovementCard {
        ImprovementCard {
            id,
            priority,
            title: format!("card {}", id),
            source: String::new(),
            insight: String::new(),
            recommendation: String::new(),
            impact: String::new(),
            effort: String::new(),
            status: ImprovementStatus::Pending,
        }
    }

    #[test]
    fn test_sample_analytics() {
        let analytics = Analytics::sample();
        assert_eq!(analytics.feedback.len(), 4);
        assert_eq!(analytics.counts.total(), 402);
        assert_eq!(analytics.nps_change(), Some(10));
        assert_eq!(analytics.by_status(ImprovementStatus::Approved).len(), 1);
    }

    #[test]
    fn test_improvements_sorted_by_priority() {
        let analytics = Analytics::new(
            Vec::new(),
            Vec::new(),
            FeedbackCounts {
                surveys: 0,
                nps_responses: 0,
                assignments: 0,
                field_notes: 0,
            },
            vec![
                card(1, Priority::Low),
                card(2, Priority::High),
                card(3, Priority::Medium),
                card(4, Priority::High),
            ],
        );

        let ids: Vec<u32> = analytics.improvements().iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![2, 4, 3, 1]);
        assert_eq!(analytics.nps_change(), None);
    }

    #[test]
    fn test_status_serializes_kebab_case() {
        let json = serde_json::to_value(ImprovementStatus::InProgress).unwrap();
        assert_eq!(json, "in-progress");
    }
}
