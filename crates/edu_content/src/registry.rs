//! Content registry: reusable course content and its search filter.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ContentError;

/// Items reused at least this often are flagged as popular.
pub const POPULAR_REUSE_THRESHOLD: u32 = 10;

/// Categories offered by the category filter.
pub const CATEGORIES: [&str; 5] = [
    "AI Basics",
    "AI Marketing",
    "AI Productivity",
    "AI Education",
    "AI Creative",
];

/// Course difficulty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [
        Difficulty::Beginner,
        Difficulty::Intermediate,
        Difficulty::Advanced,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Beginner => "beginner",
            Difficulty::Intermediate => "intermediate",
            Difficulty::Advanced => "advanced",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = ContentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Difficulty::ALL
            .iter()
            .copied()
            .find(|d| d.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ContentError::UnknownDifficulty(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentStatus {
    Active,
    Archived,
}

/// A reusable piece of course content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentItem {
    pub id: u32,
    pub title: String,
    pub category: String,
    pub difficulty: Difficulty,
    pub duration: String,
    /// Target audience
    pub target: String,
    pub tags: Vec<String>,
    /// Local issue the course addresses
    pub local_issue: String,
    pub reused_count: u32,
    pub rating: f32,
    pub last_updated: NaiveDate,
    pub status: ContentStatus,
}

impl ContentItem {
    pub fn is_popular(&self) -> bool {
        self.reused_count >= POPULAR_REUSE_THRESHOLD
    }

    pub fn is_archived(&self) -> bool {
        self.status == ContentStatus::Archived
    }
}

/// A filter value that is either the `all` sentinel or one concrete value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection<T> {
    All,
    Only(T),
}

impl<T> Default for Selection<T> {
    fn default() -> Self {
        Selection::All
    }
}

impl<T: PartialEq> Selection<T> {
    pub fn matches(&self, value: &T) -> bool {
        match self {
            Selection::All => true,
            Selection::Only(expected) => expected == value,
        }
    }
}

impl<T: FromStr> FromStr for Selection<T> {
    type Err = T::Err;

    /// `all` (any case) selects everything; anything else is parsed as `T`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            Ok(Selection::All)
        } else {
            s.parse().map(Selection::Only)
        }
    }
}

/// Search parameters of the registry view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContentFilter {
    /// Free text matched against title and tags, case-insensitively
    pub query: String,
    /// Exact category, or all
    pub category: Selection<String>,
    pub difficulty: Selection<Difficulty>,
}

impl ContentFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn query(mut self, query: impl Into<String>) -> Self {
        self.query = query.into();
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Selection::Only(category.into());
        self
    }

    pub fn difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = Selection::Only(difficulty);
        self
    }

    pub fn matches(&self, item: &ContentItem) -> bool {
        let needle = self.query.to_lowercase();
        let matches_text = item.title.to_lowercase().contains(&needle)
            || item
                .tags
                .iter()
                .any(|tag| tag.to_lowercase().contains(&needle));

        matches_text
            && self.category.matches(&item.category)
            && self.difficulty.matches(&item.difficulty)
    }
}

/// Items matching `filter`, in their original order.
pub fn filter_content<'a>(items: &'a [ContentItem], filter: &ContentFilter) -> Vec<&'a ContentItem> {
    items.iter().filter(|item| filter.matches(item)).collect()
}

/// The content catalog.
#[derive(Debug, Clone, Default)]
pub struct ContentRegistry {
    items: Vec<ContentItem>,
}

impl ContentRegistry {
    pub fn new(items: Vec<ContentItem>) -> Self {
        Self { items }
    }

    /// Registry holding the demo catalog.
    pub fn sample() -> Self {
        Self::new(sample_catalog())
    }

    pub fn items(&self) -> &[ContentItem] {
        &self.items
    }

    pub fn get(&self, id: u32) -> Option<&ContentItem> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn search(&self, filter: &ContentFilter) -> Vec<&ContentItem> {
        let found = filter_content(&self.items, filter);
        debug!(
            "Registry search {:?}: {} of {} items",
            filter.query,
            found.len(),
            self.items.len()
        );
        found
    }

    pub fn popular(&self) -> Vec<&ContentItem> {
        self.items.iter().filter(|item| item.is_popular()).collect()
    }
}

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

fn tags(values: &[&str]) -> Vec<String> {
    values.iter().map(|t| t.to_string()).collect()
}

/// The five demo catalog entries.
pub fn sample_catalog() -> Vec<ContentItem> {
    vec![
        ContentItem {
            id: 1,
            title: "Everyday AI for Seniors".to_string(),
            category: "AI Basics".to_string(),
            difficulty: Difficulty::Beginner,
            duration: "8 weeks".to_string(),
            target: "Seniors (55-70)".to_string(),
            tags: tags(&["image generation", "translation", "smartphone"]),
            local_issue: "Closing the digital divide".to_string(),
            reused_count: 8,
            rating: 4.5,
            last_updated: date(2024, 12, 10),
            status: ContentStatus::Active,
        },
        ContentItem {
            id: 2,
            title: "AI Social Media Marketing for Small Businesses".to_string(),
            category: "AI Marketing".to_string(),
            difficulty: Difficulty::Intermediate,
            duration: "4 weeks".to_string(),
            target: "Small business owners (30-60)".to_string(),
            tags: tags(&["content creation", "marketing", "SNS"]),
            local_issue: "Reviving local commerce".to_string(),
            reused_count: 12,
            rating: 4.7,
            last_updated: date(2024, 12, 8),
            status: ContentStatus::Active,
        },
        ContentItem {
            id: 3,
            title: "AI Assistants for Young Founders".to_string(),
            category: "AI Productivity".to_string(),
            difficulty: Difficulty::Intermediate,
            duration: "6 weeks".to_string(),
            target: "Young founders (20-35)".to_string(),
            tags: tags(&["automation", "productivity", "documents"]),
            local_issue: "Startup support".to_string(),
            reused_count: 5,
            rating: 4.3,
            last_updated: date(2024, 12, 5),
            status: ContentStatus::Active,
        },
        ContentItem {
            id: 4,
            title: "AI Learning Tools for Parents".to_string(),
            category: "AI Education".to_string(),
            difficulty: Difficulty::Beginner,
            duration: "4 weeks".to_string(),
            target: "Parents (35-50)".to_string(),
            tags: tags(&["education", "study support", "parenting"]),
            local_issue: "Closing the education gap".to_string(),
            reused_count: 6,
            rating: 4.4,
            last_updated: date(2024, 11, 28),
            status: ContentStatus::Active,
        },
        ContentItem {
            id: 5,
            title: "AI Creative Workshop for Local Artists".to_string(),
            category: "AI Creative".to_string(),
            difficulty: Difficulty::Advanced,
            duration: "12 weeks".to_string(),
            target: "Artists (all ages)".to_string(),
            tags: tags(&["image generation", "music", "creative"]),
            local_issue: "Promoting local arts".to_string(),
            reused_count: 3,
            rating: 4.6,
            last_updated: date(2024, 11, 20),
            status: ContentStatus::Archived,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(items: &[&ContentItem]) -> Vec<u32> {
        items.iter().map(|item| item.id).collect()
    }

    #[test]
    fn test_empty_filter_returns_everything() {
        let catalog = sample_catalog();
        let found = filter_content(&catalog, &ContentFilter::new());
        assert_eq!(ids(&found), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_query_matches_title_or_tag_case_insensitively() {
        let catalog = sample_catalog();

        let found = filter_content(&catalog, &ContentFilter::new().query("IMAGE GEN"));
        assert_eq!(ids(&found), vec![1, 5]);

        let found = filter_content(&catalog, &ContentFilter::new().query("parents"));
        assert_eq!(ids(&found), vec![4]);
    }

    #[test]
    fn test_filters_combine_with_and() {
        let catalog = sample_catalog();
        let filter = ContentFilter::new()
            .query("image")
            .difficulty(Difficulty::Beginner);
        assert_eq!(ids(&filter_content(&catalog, &filter)), vec![1]);

        let filter = ContentFilter::new()
            .category("AI Marketing")
            .difficulty(Difficulty::Beginner);
        assert!(filter_content(&catalog, &filter).is_empty());
    }

    #[test]
    fn test_category_is_exact() {
        let catalog = sample_catalog();
        assert!(filter_content(&catalog, &ContentFilter::new().category("ai basics")).is_empty());
        assert_eq!(
            ids(&filter_content(&catalog, &ContentFilter::new().category("AI Basics"))),
            vec![1]
        );
    }

    #[test]
    fn test_selection_parsing() {
        assert_eq!("all".parse::<Selection<Difficulty>>().unwrap(), Selection::All);
        assert_eq!("ALL".parse::<Selection<String>>().unwrap(), Selection::All);
        assert_eq!(
            "Advanced".parse::<Selection<Difficulty>>().unwrap(),
            Selection::Only(Difficulty::Advanced)
        );
        assert_eq!(
            "expert".parse::<Selection<Difficulty>>(),
            Err(ContentError::UnknownDifficulty("expert".to_string()))
        );
    }

    #[test]
    fn test_popular_and_archived_flags() {
        let registry = ContentRegistry::sample();
        assert_eq!(ids(&registry.popular()), vec![2]);
        assert!(registry.get(5).unwrap().is_archived());
        assert!(!registry.get(1).unwrap().is_archived());
        assert!(registry.get(42).is_none());
    }

    #[test]
    fn test_catalog_categories_are_offered() {
        for item in sample_catalog() {
            assert!(CATEGORIES.contains(&item.category.as_str()));
        }
    }
}
