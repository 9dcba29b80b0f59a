pub mod enums;
pub mod log;
pub mod settings;
pub mod state;
pub mod views;

pub use enums::{
    cycle, CongestionLevel, Exercise, InventoryLevel, RunnyNoseLevel, Season, SneezingLevel, Tab,
    UiMode,
};
pub use log::{LogDraft, MedicationLog, Symptoms, Treatments};
pub use settings::{ReminderTime, Settings, MAX_TOTAL_BOTTLES};
pub use state::AppState;
pub use views::{
    current_streak, daily_tip, day_counter, group_by_season, inventory_level, inventory_ratio,
};
