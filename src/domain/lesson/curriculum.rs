//! Curriculum catalogue: boards, subjects and the closed pedagogy vocabularies.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::ValidationError;

/// Boards offered by the request form, in display order.
pub const BOARDS: &[&str] = &["CBSE", "ICSE", "State Board", "IB"];

/// Board used when a board has no subject list of its own.
pub const DEFAULT_BOARD: &str = "CBSE";

/// Returns the subject suggestions for a board.
///
/// Unknown boards fall back to the CBSE list.
pub fn subjects_for(board: &str) -> &'static [&'static str] {
    match board.trim() {
        "CBSE" => &[
            "Mathematics",
            "Science",
            "English",
            "Social Science",
            "Computer Science",
        ],
        "ICSE" => &[
            "Mathematics",
            "Physics",
            "Chemistry",
            "Biology",
            "English",
            "History & Civics",
        ],
        "State Board" => &[
            "Mathematics",
            "Science",
            "English",
            "Gujarati/Hindi",
            "Social Science",
        ],
        "IB" => &[
            "Mathematics",
            "Sciences",
            "Language & Literature",
            "Individuals & Societies",
        ],
        _ => subjects_for(DEFAULT_BOARD),
    }
}

/// Returns true if the board is part of the catalogue.
pub fn is_known_board(board: &str) -> bool {
    BOARDS.contains(&board.trim())
}

/// Bloom's taxonomy tier targeted by the lesson.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum BloomLevel {
    Remember,
    Understand,
    #[default]
    Apply,
    Analyze,
    Evaluate,
    Create,
}

impl BloomLevel {
    /// Returns all levels from lowest to highest complexity.
    pub fn all() -> &'static [BloomLevel] {
        &[
            BloomLevel::Remember,
            BloomLevel::Understand,
            BloomLevel::Apply,
            BloomLevel::Analyze,
            BloomLevel::Evaluate,
            BloomLevel::Create,
        ]
    }

    /// Returns the display name.
    pub fn display_name(&self) -> &'static str {
        match self {
            BloomLevel::Remember => "Remember",
            BloomLevel::Understand => "Understand",
            BloomLevel::Apply => "Apply",
            BloomLevel::Analyze => "Analyze",
            BloomLevel::Evaluate => "Evaluate",
            BloomLevel::Create => "Create",
        }
    }
}

impl fmt::Display for BloomLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl FromStr for BloomLevel {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        find_by_name(BloomLevel::all(), s, BloomLevel::display_name).ok_or_else(|| {
            ValidationError::invalid_format("bloom", format!("unknown Bloom level '{}'", s.trim()))
        })
    }
}

/// Teaching approach the plan should follow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Pedagogy {
    #[serde(rename = "Direct Instruction")]
    DirectInstruction,
    #[default]
    #[serde(rename = "Inquiry-Based")]
    InquiryBased,
    #[serde(rename = "Project-Based")]
    ProjectBased,
    #[serde(rename = "Flipped Classroom")]
    FlippedClassroom,
    #[serde(rename = "Experiential")]
    Experiential,
}

impl Pedagogy {
    /// Returns all pedagogy styles in form order.
    pub fn all() -> &'static [Pedagogy] {
        &[
            Pedagogy::DirectInstruction,
            Pedagogy::InquiryBased,
            Pedagogy::ProjectBased,
            Pedagogy::FlippedClassroom,
            Pedagogy::Experiential,
        ]
    }

    /// Returns the display name.
    pub fn display_name(&self) -> &'static str {
        match self {
            Pedagogy::DirectInstruction => "Direct Instruction",
            Pedagogy::InquiryBased => "Inquiry-Based",
            Pedagogy::ProjectBased => "Project-Based",
            Pedagogy::FlippedClassroom => "Flipped Classroom",
            Pedagogy::Experiential => "Experiential",
        }
    }
}

impl fmt::Display for Pedagogy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl FromStr for Pedagogy {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        find_by_name(Pedagogy::all(), s, Pedagogy::display_name).ok_or_else(|| {
            ValidationError::invalid_format("pedagogy", format!("unknown pedagogy '{}'", s.trim()))
        })
    }
}

/// Class period length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum LessonDuration {
    #[serde(rename = "30 min")]
    Minutes30,
    #[serde(rename = "40 min")]
    Minutes40,
    #[default]
    #[serde(rename = "45 min")]
    Minutes45,
    #[serde(rename = "60 min")]
    Minutes60,
    #[serde(rename = "90 min")]
    Minutes90,
}

impl LessonDuration {
    /// Returns all durations from shortest to longest.
    pub fn all() -> &'static [LessonDuration] {
        &[
            LessonDuration::Minutes30,
            LessonDuration::Minutes40,
            LessonDuration::Minutes45,
            LessonDuration::Minutes60,
            LessonDuration::Minutes90,
        ]
    }

    /// Returns the display name.
    pub fn display_name(&self) -> &'static str {
        match self {
            LessonDuration::Minutes30 => "30 min",
            LessonDuration::Minutes40 => "40 min",
            LessonDuration::Minutes45 => "45 min",
            LessonDuration::Minutes60 => "60 min",
            LessonDuration::Minutes90 => "90 min",
        }
    }

    /// Returns the length in minutes.
    pub fn minutes(&self) -> u32 {
        match self {
            LessonDuration::Minutes30 => 30,
            LessonDuration::Minutes40 => 40,
            LessonDuration::Minutes45 => 45,
            LessonDuration::Minutes60 => 60,
            LessonDuration::Minutes90 => 90,
        }
    }
}

impl fmt::Display for LessonDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl FromStr for LessonDuration {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(found) = find_by_name(LessonDuration::all(), s, LessonDuration::display_name) {
            return Ok(found);
        }
        // Bare minute counts ("45") are accepted too.
        s.trim()
            .parse::<u32>()
            .ok()
            .and_then(|m| LessonDuration::all().iter().copied().find(|d| d.minutes() == m))
            .ok_or_else(|| {
                ValidationError::invalid_format("duration", format!("unknown duration '{}'", s.trim()))
            })
    }
}

/// Case-insensitive lookup of a variant by its display name.
fn find_by_name<T: Copy>(all: &[T], name: &str, display: fn(&T) -> &'static str) -> Option<T> {
    let wanted = name.trim();
    all.iter()
        .copied()
        .find(|item| display(item).eq_ignore_ascii_case(wanted))
}

// ════════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_board_has_subjects() {
        for board in BOARDS {
            assert!(!subjects_for(board).is_empty(), "{} has no subjects", board);
        }
    }

    #[test]
    fn unknown_board_falls_back_to_cbse_subjects() {
        assert_eq!(subjects_for("Cambridge"), subjects_for("CBSE"));
        assert!(!is_known_board("Cambridge"));
        assert!(is_known_board(" IB "));
    }

    #[test]
    fn bloom_level_parses_case_insensitively() {
        assert_eq!("analyze".parse::<BloomLevel>().unwrap(), BloomLevel::Analyze);
        assert_eq!(" Create ".parse::<BloomLevel>().unwrap(), BloomLevel::Create);
        assert!("Memorize".parse::<BloomLevel>().is_err());
    }

    #[test]
    fn pedagogy_round_trips_through_display_name() {
        for style in Pedagogy::all() {
            assert_eq!(style.to_string().parse::<Pedagogy>().unwrap(), *style);
        }
    }

    #[test]
    fn pedagogy_serializes_to_display_name() {
        let json = serde_json::to_string(&Pedagogy::FlippedClassroom).unwrap();
        assert_eq!(json, "\"Flipped Classroom\"");
    }

    #[test]
    fn duration_accepts_display_name_and_bare_minutes() {
        assert_eq!("60 min".parse::<LessonDuration>().unwrap(), LessonDuration::Minutes60);
        assert_eq!("90".parse::<LessonDuration>().unwrap(), LessonDuration::Minutes90);
        assert!("50 min".parse::<LessonDuration>().is_err());
    }

    #[test]
    fn defaults_match_form_preselection() {
        assert_eq!(LessonDuration::default(), LessonDuration::Minutes45);
        assert_eq!(Pedagogy::default(), Pedagogy::InquiryBased);
        assert_eq!(BloomLevel::default(), BloomLevel::Apply);
    }
}
