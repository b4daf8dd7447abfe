//! KPI overview.

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Trend::Up => write!(f, "↑"),
            Trend::Down => write!(f, "↓"),
        }
    }
}

/// A KPI measured against its 90-day target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KpiCard {
    pub name: String,
    pub current: String,
    pub target: String,
    /// Progress towards the target (0-100)
    pub progress: u8,
    pub trend: Trend,
    /// Change since the baseline, as displayed
    pub change: String,
}

/// One month of the headline trend chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyPoint {
    pub month: String,
    /// Minutes to produce one course
    pub production_minutes: u32,
    pub completion_rate: u8,
    pub target_fit: u8,
}

/// Artifacts generated over the last 30 days.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationCount {
    pub artifact: String,
    pub count: u32,
    pub avg_secs: u32,
}

/// Everything shown on the overview tab.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Overview {
    pub kpis: Vec<KpiCard>,
    pub monthly: Vec<MonthlyPoint>,
    pub generation: Vec<GenerationCount>,
}

impl Overview {
    pub fn sample() -> Self {
        Self {
            kpis: sample_kpis(),
            monthly: sample_monthly(),
            generation: sample_generation(),
        }
    }

    pub fn total_generated(&self) -> u32 {
        self.generation.iter().map(|g| g.count).sum()
    }

    /// Mean KPI progress, rounded down.
    pub fn average_progress(&self) -> u8 {
        if self.kpis.is_empty() {
            return 0;
        }
        let sum: u32 = self.kpis.iter().map(|k| u32::from(k.progress)).sum();
        (sum / self.kpis.len() as u32) as u8
    }

    pub fn kpi(&self, name: &str) -> Option<&KpiCard> {
        self.kpis.iter().find(|k| k.name == name)
    }

    /// Production time reduction from the first to the latest month, in percent.
    pub fn production_time_reduction(&self) -> Option<u8> {
        let first = self.monthly.first()?.production_minutes;
        let last = self.monthly.last()?.production_minutes;
        if first == 0 || last > first {
            return None;
        }
        Some((((first - last) * 100) / first) as u8)
    }
}

fn kpi(name: &str, current: &str, target: &str, progress: u8, change: &str) -> KpiCard {
    KpiCard {
        name: name.to_string(),
        current: current.to_string(),
        target: target.to_string(),
        progress,
        trend: Trend::Up,
        change: change.to_string(),
    }
}

fn sample_kpis() -> Vec<KpiCard> {
    vec![
        kpi("Production time", "30 min", "10 min", 62, "+85%"),
        kpi("Week 1 completion", "68%", "75%", 91, "+13%p"),
        kpi("Target fit", "72%", "80%", 90, "+12%p"),
        kpi("Update lead time", "5 days", "3 days", 60, "-64%"),
        kpi("Reuse rate", "55%", "70%", 79, "+25%p"),
    ]
}

fn sample_monthly() -> Vec<MonthlyPoint> {
    [
        ("Aug", 240, 55, 60),
        ("Sep", 180, 58, 63),
        ("Oct", 90, 62, 68),
        ("Nov", 45, 65, 70),
        ("Dec", 30, 68, 72),
    ]
    .into_iter()
    .map(
        |(month, production_minutes, completion_rate, target_fit)| MonthlyPoint {
            month: month.to_string(),
            production_minutes,
            completion_rate,
            target_fit,
        },
    )
    .collect()
}

fn sample_generation() -> Vec<GenerationCount> {
    [
        ("Brief", 48, 45),
        ("Curriculum", 48, 58),
        ("Lesson plans", 192, 52),
        ("Slides", 192, 105),
        ("Practice templates", 384, 38),
    ]
    .into_iter()
    .map(|(artifact, count, avg_secs)| GenerationCount {
        artifact: artifact.to_string(),
        count,
        avg_secs,
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_overview() {
        let overview = Overview::sample();
        assert_eq!(overview.kpis.len(), 5);
        assert_eq!(overview.monthly.len(), 5);
        assert_eq!(overview.total_generated(), 864);
        assert!(overview.kpis.iter().all(|k| k.progress <= 100));
    }

    #[test]
    fn test_derived_figures() {
        let overview = Overview::sample();
        assert_eq!(overview.average_progress(), 76);
        assert_eq!(overview.production_time_reduction(), Some(87));
        assert_eq!(overview.kpi("Reuse rate").unwrap().current, "55%");
        assert!(overview.kpi("Unknown").is_none());
    }

    #[test]
    fn test_empty_overview() {
        let overview = Overview {
            kpis: Vec::new(),
            monthly: Vec::new(),
            generation: Vec::new(),
        };
        assert_eq!(overview.average_progress(), 0);
        assert_eq!(overview.production_time_reduction(), None);
        assert_eq!(overview.total_generated(), 0);
    }
}
