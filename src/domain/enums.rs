use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Error returned when a level, exercise or time string can't be parsed
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("unknown {kind} '{value}' (expected one of: {expected})")]
    UnknownVariant {
        kind: &'static str,
        value: String,
        expected: String,
    },
    #[error("invalid reminder time '{0}' (expected HH:MM)")]
    InvalidTime(String),
}

fn unknown(kind: &'static str, value: &str, names: &[&str]) -> ParseError {
    ParseError::UnknownVariant {
        kind,
        value: value.to_string(),
        expected: names.join(", "),
    }
}

/// Calendar bucket a log belongs to, derived from its creation month
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Season {
    Spring,
    Summer,
    Autumn,
    Winter,
}

impl Season {
    /// Season for a 1-based month number
    pub fn from_month(month: u32) -> Self {
        match month {
            3..=5 => Season::Spring,
            6..=8 => Season::Summer,
            9..=11 => Season::Autumn,
            _ => Season::Winter,
        }
    }

    pub fn from_date(date: NaiveDate) -> Self {
        Self::from_month(date.month())
    }

    pub fn name(&self) -> &'static str {
        match self {
            Season::Spring => "Spring",
            Season::Summer => "Summer",
            Season::Autumn => "Autumn",
            Season::Winter => "Winter",
        }
    }

    /// Display order used by the history view
    pub fn all() -> &'static [Season] {
        &[Season::Spring, Season::Summer, Season::Autumn, Season::Winter]
    }
}

/// Sneezing severity, mildest first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SneezingLevel {
    #[default]
    Mild,
    Bearable,
    Dizzying,
}

impl SneezingLevel {
    pub fn all() -> &'static [SneezingLevel] {
        &[SneezingLevel::Mild, SneezingLevel::Bearable, SneezingLevel::Dizzying]
    }

    pub fn key(&self) -> &'static str {
        match self {
            SneezingLevel::Mild => "mild",
            SneezingLevel::Bearable => "bearable",
            SneezingLevel::Dizzying => "dizzying",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SneezingLevel::Mild => "Mild",
            SneezingLevel::Bearable => "Bearable",
            SneezingLevel::Dizzying => "Sneezed till dizzy",
        }
    }
}

impl FromStr for SneezingLevel {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let keys: Vec<&str> = Self::all().iter().map(|l| l.key()).collect();
        Self::all()
            .iter()
            .copied()
            .find(|l| l.key().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| unknown("sneezing level", s, &keys))
    }
}

/// Runny nose severity, measured in tissues
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunnyNoseLevel {
    #[default]
    Dry,
    HalfPack,
    TwoPacks,
}

impl RunnyNoseLevel {
    pub fn all() -> &'static [RunnyNoseLevel] {
        &[RunnyNoseLevel::Dry, RunnyNoseLevel::HalfPack, RunnyNoseLevel::TwoPacks]
    }

    pub fn key(&self) -> &'static str {
        match self {
            RunnyNoseLevel::Dry => "dry",
            RunnyNoseLevel::HalfPack => "half_pack",
            RunnyNoseLevel::TwoPacks => "two_packs",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RunnyNoseLevel::Dry => "A dry day",
            RunnyNoseLevel::HalfPack => "Half a pack of tissues",
            RunnyNoseLevel::TwoPacks => "Went through two packs",
        }
    }
}

impl FromStr for RunnyNoseLevel {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let keys: Vec<&str> = Self::all().iter().map(|l| l.key()).collect();
        Self::all()
            .iter()
            .copied()
            .find(|l| l.key().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| unknown("runny nose level", s, &keys))
    }
}

/// Nasal congestion severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CongestionLevel {
    #[default]
    Clear,
    OneSide,
    Blocked,
}

impl CongestionLevel {
    pub fn all() -> &'static [CongestionLevel] {
        &[CongestionLevel::Clear, CongestionLevel::OneSide, CongestionLevel::Blocked]
    }

    pub fn key(&self) -> &'static str {
        match self {
            CongestionLevel::Clear => "clear",
            CongestionLevel::OneSide => "one_side",
            CongestionLevel::Blocked => "blocked",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            CongestionLevel::Clear => "Almost normal",
            CongestionLevel::OneSide => "One nostril works",
            CongestionLevel::Blocked => "Completely blocked",
        }
    }
}

impl FromStr for CongestionLevel {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let keys: Vec<&str> = Self::all().iter().map(|l| l.key()).collect();
        Self::all()
            .iter()
            .copied()
            .find(|l| l.key().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| unknown("congestion level", s, &keys))
    }
}

/// Exercise done on the day of the log
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Exercise {
    Running,
    Swimming,
    Cycling,
    Strength,
    Hiking,
    Aerobics,
    #[default]
    None,
}

impl Exercise {
    pub fn all() -> &'static [Exercise] {
        &[
            Exercise::Running,
            Exercise::Swimming,
            Exercise::Cycling,
            Exercise::Strength,
            Exercise::Hiking,
            Exercise::Aerobics,
            Exercise::None,
        ]
    }

    pub fn key(&self) -> &'static str {
        match self {
            Exercise::Running => "running",
            Exercise::Swimming => "swimming",
            Exercise::Cycling => "cycling",
            Exercise::Strength => "strength",
            Exercise::Hiking => "hiking",
            Exercise::Aerobics => "aerobics",
            Exercise::None => "none",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Exercise::Running => "Running",
            Exercise::Swimming => "Swimming",
            Exercise::Cycling => "Cycling",
            Exercise::Strength => "Strength",
            Exercise::Hiking => "Hill walk",
            Exercise::Aerobics => "Aerobics",
            Exercise::None => "No exercise",
        }
    }
}

impl FromStr for Exercise {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let keys: Vec<&str> = Self::all().iter().map(|e| e.key()).collect();
        Self::all()
            .iter()
            .copied()
            .find(|e| e.key().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| unknown("exercise", s, &keys))
    }
}

/// Log status. Only `taken` is ever produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogStatus {
    #[default]
    Taken,
}

/// How close the bottle stock is to running out
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InventoryLevel {
    Critical,
    Low,
    Ok,
}

/// Tab shown in the main window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Dashboard,
    History,
    Settings,
}

impl Tab {
    pub fn all() -> &'static [Tab] {
        &[Tab::Dashboard, Tab::History, Tab::Settings]
    }

    pub fn title(&self) -> &'static str {
        match self {
            Tab::Dashboard => "Overview",
            Tab::History => "History",
            Tab::Settings => "Settings",
        }
    }

    pub fn index(&self) -> usize {
        match self {
            Tab::Dashboard => 0,
            Tab::History => 1,
            Tab::Settings => 2,
        }
    }

    pub fn next(&self) -> Tab {
        match self {
            Tab::Dashboard => Tab::History,
            Tab::History => Tab::Settings,
            Tab::Settings => Tab::Dashboard,
        }
    }
}

/// UI mode for the application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiMode {
    Normal,
    LogForm,
    Reminder,
    ConfirmClear,
}

/// Cycle helper shared by the form widgets
pub fn cycle<T: Copy + PartialEq>(all: &[T], current: T, forward: bool) -> T {
    let idx = all.iter().position(|v| *v == current).unwrap_or(0);
    let len = all.len();
    let next = if forward { (idx + 1) % len } else { (idx + len - 1) % len };
    all[next]
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
