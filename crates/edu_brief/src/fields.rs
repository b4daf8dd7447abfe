//! The ten brief form fields.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{BriefError, BriefResult};

/// A field of the brief form.
///
/// Declaration order is the order in which the form presents the fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BriefField {
    TargetGroup,
    AgeRange,
    SkillLevel,
    Location,
    Goal,
    Duration,
    Difficulty,
    Space,
    Budget,
    Constraints,
}

impl BriefField {
    pub const ALL: [BriefField; 10] = [
        BriefField::TargetGroup,
        BriefField::AgeRange,
        BriefField::SkillLevel,
        BriefField::Location,
        BriefField::Goal,
        BriefField::Duration,
        BriefField::Difficulty,
        BriefField::Space,
        BriefField::Budget,
        BriefField::Constraints,
    ];

    /// Wire name of the field.
    pub fn as_str(&self) -> &'static str {
        match self {
            BriefField::TargetGroup => "targetGroup",
            BriefField::AgeRange => "ageRange",
            BriefField::SkillLevel => "skillLevel",
            BriefField::Location => "location",
            BriefField::Goal => "goal",
            BriefField::Duration => "duration",
            BriefField::Difficulty => "difficulty",
            BriefField::Space => "space",
            BriefField::Budget => "budget",
            BriefField::Constraints => "constraints",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            BriefField::TargetGroup => "Target group",
            BriefField::AgeRange => "Age range",
            BriefField::SkillLevel => "Skill level",
            BriefField::Location => "Location",
            BriefField::Goal => "Learning goal",
            BriefField::Duration => "Duration",
            BriefField::Difficulty => "Difficulty",
            BriefField::Space => "Venue",
            BriefField::Budget => "Budget",
            BriefField::Constraints => "Other constraints",
        }
    }

    /// Number of the wizard step that asks for this field.
    pub fn step_number(&self) -> u8 {
        match self {
            BriefField::TargetGroup
            | BriefField::AgeRange
            | BriefField::SkillLevel
            | BriefField::Location => 1,
            BriefField::Goal | BriefField::Duration | BriefField::Difficulty => 2,
            BriefField::Space | BriefField::Budget | BriefField::Constraints => 3,
        }
    }

    /// Suggested values for select-style fields. Empty for free text.
    ///
    /// These are presentation hints; any string is accepted.
    pub fn options(&self) -> &'static [&'static str] {
        match self {
            BriefField::SkillLevel => &["beginner", "intermediate", "advanced"],
            BriefField::Duration => &["4weeks", "8weeks", "12weeks"],
            BriefField::Difficulty => &["easy", "medium", "hard"],
            _ => &[],
        }
    }
}

impl fmt::Display for BriefField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for BriefField {
    type Err = BriefError;

    /// Accepts the wire name as well as snake_case and kebab-case spellings.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .collect::<String>()
            .to_lowercase();

        BriefField::ALL
            .iter()
            .copied()
            .find(|field| field.as_str().to_lowercase() == normalized)
            .ok_or_else(|| BriefError::UnknownField(s.to_string()))
    }
}

/// Values entered into the brief form.
///
/// Always holds all ten fields; a field nobody has touched is the empty
/// string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BriefFields(BTreeMap<BriefField, String>);

impl Default for BriefFields {
    fn default() -> Self {
        Self::new()
    }
}

impl BriefFields {
    pub fn new() -> Self {
        Self(
            BriefField::ALL
                .iter()
                .map(|field| (*field, String::new()))
                .collect(),
        )
    }

    /// Build from name/value pairs, rejecting unknown names.
    pub fn from_pairs<I, K, V>(pairs: I) -> BriefResult<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut fields = Self::new();
        for (name, value) in pairs {
            let field: BriefField = name.as_ref().parse()?;
            fields.set(field, value);
        }
        Ok(fields)
    }

    pub fn get(&self, field: BriefField) -> &str {
        self.0.get(&field).map(String::as_str).unwrap_or_default()
    }

    /// Store a value. Returns whether the stored value changed.
    pub fn set(&mut self, field: BriefField, value: impl Into<String>) -> bool {
        let value = value.into();
        match self.0.get(&field) {
            Some(current) if *current == value => false,
            _ => {
                self.0.insert(field, value);
                true
            }
        }
    }

    pub fn is_filled(&self, field: BriefField) -> bool {
        !self.get(field).trim().is_empty()
    }

    pub fn filled_count(&self) -> usize {
        BriefField::ALL
            .iter()
            .filter(|field| self.is_filled(**field))
            .count()
    }

    /// Fields in form order with their values.
    pub fn iter(&self) -> impl Iterator<Item = (BriefField, &str)> {
        self.0.iter().map(|(field, value)| (*field, value.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_fields_are_empty() {
        let fields = BriefFields::new();
        assert_eq!(fields.iter().count(), 10);
        assert_eq!(fields.filled_count(), 0);
        assert_eq!(fields.get(BriefField::Goal), "");
    }

    #[test]
    fn test_set_reports_change() {
        let mut fields = BriefFields::new();
        assert!(fields.set(BriefField::Goal, "x"));
        let snapshot = fields.clone();

        assert!(!fields.set(BriefField::Goal, "x"));
        assert_eq!(fields, snapshot);
    }

    #[test]
    fn test_parse_field_names() {
        assert_eq!("targetGroup".parse::<BriefField>().unwrap(), BriefField::TargetGroup);
        assert_eq!("target_group".parse::<BriefField>().unwrap(), BriefField::TargetGroup);
        assert_eq!("age-range".parse::<BriefField>().unwrap(), BriefField::AgeRange);
        assert_eq!("BUDGET".parse::<BriefField>().unwrap(), BriefField::Budget);

        let err = "favouriteColour".parse::<BriefField>().unwrap_err();
        assert_eq!(err, BriefError::UnknownField("favouriteColour".to_string()));
    }

    #[test]
    fn test_from_pairs() {
        let fields =
            BriefFields::from_pairs([("goal", "Make a poster"), ("skill_level", "beginner")])
                .unwrap();
        assert_eq!(fields.get(BriefField::Goal), "Make a poster");
        assert_eq!(fields.get(BriefField::SkillLevel), "beginner");
        assert_eq!(fields.filled_count(), 2);

        assert!(BriefFields::from_pairs([("nope", "x")]).is_err());
    }

    #[test]
    fn test_step_layout() {
        let per_step = |step: u8| {
            BriefField::ALL
                .iter()
                .filter(|f| f.step_number() == step)
                .count()
        };
        assert_eq!(per_step(1), 4);
        assert_eq!(per_step(2), 3);
        assert_eq!(per_step(3), 3);
        assert_eq!(per_step(4), 0);
    }

    #[test]
    fn test_serializes_with_wire_names() {
        let mut fields = BriefFields::new();
        fields.set(BriefField::TargetGroup, "seniors");

        let json = serde_json::to_value(&fields).unwrap();
        assert_eq!(json["targetGroup"], "seniors");
        assert_eq!(json["constraints"], "");
    }
}
