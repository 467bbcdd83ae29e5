//! LessonPlan aggregate and the shared section vocabulary.
//!
//! [`SECTION_ORDER`] is the only place the rendering order is declared.
//! Every renderer walks a plan through [`LessonPlan::ordered_sections`], so a
//! section shown by one output format is shown by all of them.

use serde::de::{self, Deserializer};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::ValidationError;

/// Named slot of a lesson plan.
///
/// The first nine come from the structured (JSON) answer, the last four from
/// the heading-delimited answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SectionName {
    UnitOverview,
    LearningOutcomes,
    Prerequisites,
    Materials,
    LessonFlow,
    Differentiation,
    Assessment,
    HomeworkExtensions,
    References,
    Introduction,
    MainActivity,
    Conclusion,
    Quiz,
}

/// Rendering order for every output format.
pub const SECTION_ORDER: [SectionName; 13] = [
    SectionName::UnitOverview,
    SectionName::LearningOutcomes,
    SectionName::Prerequisites,
    SectionName::Materials,
    SectionName::LessonFlow,
    SectionName::Differentiation,
    SectionName::Assessment,
    SectionName::HomeworkExtensions,
    SectionName::References,
    SectionName::Introduction,
    SectionName::MainActivity,
    SectionName::Conclusion,
    SectionName::Quiz,
];

/// Keys requested from the model in the structured prompt.
pub const STRUCTURED_SECTIONS: [SectionName; 9] = [
    SectionName::UnitOverview,
    SectionName::LearningOutcomes,
    SectionName::Prerequisites,
    SectionName::Materials,
    SectionName::LessonFlow,
    SectionName::Differentiation,
    SectionName::Assessment,
    SectionName::HomeworkExtensions,
    SectionName::References,
];

impl SectionName {
    /// Returns the display name, which is also the wire key.
    pub fn display_name(&self) -> &'static str {
        match self {
            SectionName::UnitOverview => "Unit Overview",
            SectionName::LearningOutcomes => "Learning Outcomes",
            SectionName::Prerequisites => "Prerequisites",
            SectionName::Materials => "Materials",
            SectionName::LessonFlow => "Lesson Flow",
            SectionName::Differentiation => "Differentiation",
            SectionName::Assessment => "Assessment",
            SectionName::HomeworkExtensions => "Homework/Extensions",
            SectionName::References => "References",
            SectionName::Introduction => "Introduction",
            SectionName::MainActivity => "Main Activity",
            SectionName::Conclusion => "Conclusion",
            SectionName::Quiz => "Quiz",
        }
    }

    /// Returns the position of this section in [`SECTION_ORDER`].
    pub fn order_index(&self) -> usize {
        SECTION_ORDER
            .iter()
            .position(|s| s == self)
            .unwrap_or(SECTION_ORDER.len())
    }
}

impl fmt::Display for SectionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl FromStr for SectionName {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        SECTION_ORDER
            .iter()
            .copied()
            .find(|name| name.display_name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| {
                ValidationError::invalid_format("section", format!("unknown section '{}'", wanted))
            })
    }
}

impl Serialize for SectionName {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.display_name())
    }
}

impl<'de> Deserialize<'de> for SectionName {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(de::Error::custom)
    }
}

/// Body of a section: free text or a bulleted list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SectionContent {
    Text(String),
    Items(Vec<String>),
}

impl SectionContent {
    /// True for blank text or an empty list. Empty sections are never rendered.
    pub fn is_empty(&self) -> bool {
        match self {
            SectionContent::Text(text) => text.trim().is_empty(),
            SectionContent::Items(items) => items.is_empty(),
        }
    }
}

impl From<&str> for SectionContent {
    fn from(text: &str) -> Self {
        SectionContent::Text(text.to_string())
    }
}

impl From<String> for SectionContent {
    fn from(text: String) -> Self {
        SectionContent::Text(text)
    }
}

impl From<Vec<String>> for SectionContent {
    fn from(items: Vec<String>) -> Self {
        SectionContent::Items(items)
    }
}

impl From<Vec<&str>> for SectionContent {
    fn from(items: Vec<&str>) -> Self {
        SectionContent::Items(items.into_iter().map(str::to_string).collect())
    }
}

/// A structured lesson plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LessonPlan {
    title: String,
    #[serde(default)]
    sections: BTreeMap<SectionName, SectionContent>,
}

impl LessonPlan {
    /// Creates a plan with no sections.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            sections: BTreeMap::new(),
        }
    }

    /// Adds or replaces a section.
    pub fn with_section(mut self, name: SectionName, content: impl Into<SectionContent>) -> Self {
        self.sections.insert(name, content.into());
        self
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns a section as stored, empty or not.
    pub fn section(&self, name: SectionName) -> Option<&SectionContent> {
        self.sections.get(&name)
    }

    /// Number of stored sections, including empty ones.
    pub fn section_count(&self) -> usize {
        self.sections.len()
    }

    /// Present, non-empty sections in [`SECTION_ORDER`].
    pub fn ordered_sections(&self) -> impl Iterator<Item = (SectionName, &SectionContent)> + '_ {
        SECTION_ORDER.iter().filter_map(move |name| {
            self.sections
                .get(name)
                .filter(|content| !content.is_empty())
                .map(|content| (*name, content))
        })
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════════
