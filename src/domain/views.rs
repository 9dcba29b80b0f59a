use super::enums::{InventoryLevel, Season};
use super::log::MedicationLog;
use super::settings::Settings;
use chrono::{DateTime, Datelike, Local, NaiveDate, TimeZone};

const MS_PER_DAY: i64 = 86_400_000;

/// Allergy care tips, one shown per day
pub const HEALTH_TIPS: [&str; 15] = [
    "A saline nasal rinse clears allergens and mucus and eases congestion.",
    "In pollen season wear a mask and glasses outside, and change clothes when you get home.",
    "Skip carpets and heavy curtains in the bedroom; wash bedding in hot water to fight dust mites.",
    "Starting antihistamines or a nasal spray a week before your season works better.",
    "Eat plenty of vitamin C, such as citrus and kiwi, to support your immune system.",
    "Avoid very hot showers and sudden hot-cold changes that irritate the nasal lining.",
    "Keep indoor humidity below 50% with a dehumidifier to slow mould and dust mites.",
    "Move morning runs indoors: pollen counts peak in the early hours.",
    "Wash your hands and face with warm water after rubbing your nose or sneezing.",
    "If your nasal spray causes dryness or bleeding, ask your doctor about a soothing ointment.",
    "Wear a nose clip when swimming so pool chlorine doesn't irritate your nose.",
    "Stress makes rhinitis worse; try meditation or slow breathing.",
    "Keep allergenic flowering plants such as lilies and carnations out of the house.",
    "Keep your head and neck warm when seasons change to avoid vasomotor rhinitis flare-ups.",
    "Spicy food dilates blood vessels and worsens congestion; eat lighter meals.",
];

/// Logs of one season, newest first
#[derive(Debug, Clone, PartialEq)]
pub struct SeasonGroup<'a> {
    pub season: Season,
    pub logs: Vec<&'a MedicationLog>,
}

/// Group logs by season in spring..winter order, skipping empty seasons.
/// Order inside each group follows the input order.
pub fn group_by_season(logs: &[MedicationLog]) -> Vec<SeasonGroup<'_>> {
    Season::all()
        .iter()
        .filter_map(|season| {
            let logs: Vec<&MedicationLog> = logs.iter().filter(|l| l.season == *season).collect();
            (!logs.is_empty()).then_some(SeasonGroup {
                season: *season,
                logs,
            })
        })
        .collect()
}

/// Days since the treatment start date, rounded up
pub fn day_counter(start_date: NaiveDate, now: DateTime<Local>) -> i64 {
    let start_ms = start_date
        .and_hms_opt(0, 0, 0)
        .and_then(|midnight| Local.from_local_datetime(&midnight).earliest())
        .map(|start| start.timestamp_millis())
        .unwrap_or_else(|| now.timestamp_millis());
    let diff = (now.timestamp_millis() - start_ms).abs();
    (diff + MS_PER_DAY - 1) / MS_PER_DAY
}

pub fn inventory_level(settings: &Settings) -> InventoryLevel {
    match settings.inventory_count {
        1 => InventoryLevel::Critical,
        2 => InventoryLevel::Low,
        _ => InventoryLevel::Ok,
    }
}

/// Fill ratio of the stock gauge, clamped to 0.0..=1.0
pub fn inventory_ratio(settings: &Settings) -> f64 {
    if settings.total_bottles == 0 {
        return 0.0;
    }
    (settings.inventory_count as f64 / settings.total_bottles as f64).clamp(0.0, 1.0)
}

/// Tip of the day, rotating by day of year
pub fn daily_tip(today: NaiveDate) -> &'static str {
    HEALTH_TIPS[today.ordinal() as usize % HEALTH_TIPS.len()]
}

/// Count consecutive logged days ending today (or yesterday when today is still open)
pub fn current_streak(logs: &[MedicationLog], today: NaiveDate) -> u32 {
    let has = |date: NaiveDate| logs.iter().any(|l| l.date_string == date);
    let mut day = if has(today) {
        today
    } else {
        match today.pred_opt() {
            Some(yesterday) => yesterday,
            None => return 0,
        }
    };

    let mut streak = 0;
    while has(day) {
        streak += 1;
        day = match day.pred_opt() {
            Some(prev) => prev,
            None => break,
        };
    }
    streak
}
