//! # edu_insights
//!
//! Read-only dashboards of EduPilot:
//!
//! - **Metrics**: KPI cards against their 90-day targets, monthly trends and
//!   generation counts per artifact type
//! - **Analytics**: weekly learner feedback, collection counts and the
//!   improvement cards derived from them

pub mod analytics;
pub mod metrics;

pub use analytics::{
    Analytics, FeedbackCounts, FeedbackPoint, ImprovementCard, ImprovementStatus,
    PerformanceMetric, Priority,
};
pub use metrics::{GenerationCount, KpiCard, MonthlyPoint, Overview, Trend};
