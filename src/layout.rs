use chrono::{Duration, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

pub const DAY_NAMES: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

const FIRST_SLOT_HOUR: u32 = 5;
const SLOT_MINUTES: i64 = 30;
const SLOT_COUNT: usize = 35;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    Morning,
    Afternoon,
    Evening,
}

impl Period {
    pub fn for_start(start: NaiveTime) -> Self {
        match start.hour() {
            h if h < 12 => Period::Morning,
            h if h < 18 => Period::Afternoon,
            _ => Period::Evening,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Period::Morning => "morning",
            Period::Afternoon => "afternoon",
            Period::Evening => "evening",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSlot {
    pub time: String,
    pub period: Period,
}

/// Fixed days and time slots of the planner grid. Built once at startup and
/// never resized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleLayout {
    days: Vec<String>,
    slots: Vec<TimeSlot>,
}

impl ScheduleLayout {
    pub fn new(days: Vec<String>, slots: Vec<TimeSlot>) -> Self {
        Self { days, slots }
    }

    /// Monday to Sunday, half-hour slots from 5:00 AM to 10:30 PM.
    pub fn standard() -> Self {
        let days = DAY_NAMES.iter().map(|name| name.to_string()).collect();
        let first = NaiveTime::from_hms_opt(FIRST_SLOT_HOUR, 0, 0).unwrap_or(NaiveTime::MIN);
        let step = Duration::minutes(SLOT_MINUTES);

        let slots = (0..SLOT_COUNT)
            .map(|index| {
                let start = first + step * index as i32;
                let end = start + step;
                TimeSlot {
                    time: slot_label(start, end),
                    period: Period::for_start(start),
                }
            })
            .collect();

        Self { days, slots }
    }

    pub fn days(&self) -> &[String] {
        &self.days
    }

    pub fn slots(&self) -> &[TimeSlot] {
        &self.slots
    }

    pub fn day_count(&self) -> usize {
        self.days.len()
    }

    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    pub fn day_name(&self, day: usize) -> Option<&str> {
        self.days.get(day).map(String::as_str)
    }

    pub fn has_day(&self, day: usize) -> bool {
        day < self.days.len()
    }

    pub fn contains(&self, day: usize, slot: usize) -> bool {
        self.has_day(day) && slot < self.slots.len()
    }
}

fn slot_label(start: NaiveTime, end: NaiveTime) -> String {
    format!("{}-{}", start.format("%-I:%M"), end.format("%-I:%M %p"))
}
