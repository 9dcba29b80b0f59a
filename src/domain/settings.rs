use super::enums::ParseError;
use chrono::{DateTime, Local, NaiveDate, Timelike};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Largest capacity the settings view lets the user pick
pub const MAX_TOTAL_BOTTLES: u32 = 20;

/// Time of day at minute granularity, stored as "HH:MM"
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ReminderTime {
    hour: u32,
    minute: u32,
}

impl ReminderTime {
    pub fn new(hour: u32, minute: u32) -> Option<Self> {
        (hour < 24 && minute < 60).then_some(Self { hour, minute })
    }

    /// Truncate a local time to the minute
    pub fn of(now: &DateTime<Local>) -> Self {
        Self {
            hour: now.hour(),
            minute: now.minute(),
        }
    }

    pub fn hour(&self) -> u32 {
        self.hour
    }

    pub fn minute(&self) -> u32 {
        self.minute
    }

    fn minutes_of_day(&self) -> i64 {
        (self.hour * 60 + self.minute) as i64
    }

    /// Shift by a number of minutes, wrapping around midnight
    pub fn shifted(&self, minutes: i64) -> Self {
        let total = (self.minutes_of_day() + minutes).rem_euclid(24 * 60);
        Self {
            hour: (total / 60) as u32,
            minute: (total % 60) as u32,
        }
    }
}

impl Default for ReminderTime {
    fn default() -> Self {
        Self { hour: 8, minute: 0 }
    }
}

impl fmt::Display for ReminderTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

impl FromStr for ReminderTime {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ParseError::InvalidTime(s.to_string());
        let (h, m) = s.trim().split_once(':').ok_or_else(invalid)?;
        if h.is_empty() || h.len() > 2 || m.len() != 2 {
            return Err(invalid());
        }
        let hour = h.parse::<u32>().map_err(|_| invalid())?;
        let minute = m.parse::<u32>().map_err(|_| invalid())?;
        Self::new(hour, minute).ok_or_else(invalid)
    }
}

impl Serialize for ReminderTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ReminderTime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// The single global settings record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub reminder_time: ReminderTime,
    pub vibration_enabled: bool,
    /// Persisted and editable; the reminder logic does not read it
    pub sound_enabled: bool,
    pub inventory_count: u32,
    pub total_bottles: u32,
    pub start_date: NaiveDate,
}

impl Settings {
    pub fn default_for(today: NaiveDate) -> Self {
        Self {
            reminder_time: ReminderTime::default(),
            vibration_enabled: true,
            sound_enabled: true,
            inventory_count: 5,
            total_bottles: 10,
            start_date: today,
        }
    }

    pub fn increment_inventory(&mut self) {
        self.inventory_count = self.inventory_count.saturating_add(1);
    }

    pub fn decrement_inventory(&mut self) {
        self.inventory_count = self.inventory_count.saturating_sub(1);
    }

    /// Set capacity, clamped to the slider range 1..=20
    pub fn set_total_bottles(&mut self, total: u32) {
        self.total_bottles = total.clamp(1, MAX_TOTAL_BOTTLES);
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::default_for(Local::now().date_naive())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_reminder_time() {
        assert_eq!("08:00".parse::<ReminderTime>(), Ok(ReminderTime::new(8, 0).unwrap()));
        assert_eq!("7:05".parse::<ReminderTime>(), Ok(ReminderTime::new(7, 5).unwrap()));
        assert!("24:00".parse::<ReminderTime>().is_err());
        assert!("12:60".parse::<ReminderTime>().is_err());
        assert!("1200".parse::<ReminderTime>().is_err());
        assert!("12:5".parse::<ReminderTime>().is_err());
    }

    #[test]
    fn test_reminder_time_display_pads() {
        assert_eq!(ReminderTime::new(9, 5).unwrap().to_string(), "09:05");
    }

    #[test]
    fn test_shift_wraps_midnight() {
        let t = ReminderTime::new(23, 50).unwrap();
        assert_eq!(t.shifted(15), ReminderTime::new(0, 5).unwrap());
        assert_eq!(ReminderTime::new(0, 0).unwrap().shifted(-1), ReminderTime::new(23, 59).unwrap());
    }

    #[test]
    fn test_inventory_never_negative() {
        let mut settings = Settings::default();
        settings.inventory_count = 0;
        settings.decrement_inventory();
        assert_eq!(settings.inventory_count, 0);
        settings.increment_inventory();
        assert_eq!(settings.inventory_count, 1);
    }

    #[test]
    fn test_total_bottles_clamped() {
        let mut settings = Settings::default();
        settings.set_total_bottles(0);
        assert_eq!(settings.total_bottles, 1);
        settings.set_total_bottles(99);
        assert_eq!(settings.total_bottles, MAX_TOTAL_BOTTLES);
    }

    #[test]
    fn test_settings_json_shape() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let value = serde_json::to_value(Settings::default_for(today)).unwrap();
        assert_eq!(value["reminderTime"], "08:00");
        assert_eq!(value["startDate"], "2024-03-01");
        assert_eq!(value["inventoryCount"], 5);
        assert_eq!(value["totalBottles"], 10);
    }
}
