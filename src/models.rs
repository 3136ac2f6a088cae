use crate::layout::Period;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Identity of one slot on one day. Its string form `day-<d>-slot-<s>` is the
/// key used in snapshots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SlotKey {
    pub day: usize,
    pub slot: usize,
}

impl SlotKey {
    pub fn new(day: usize, slot: usize) -> Self {
        Self { day, slot }
    }
}

impl fmt::Display for SlotKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "day-{}-slot-{}", self.day, self.slot)
    }
}

impl FromStr for SlotKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || format!("malformed slot key '{s}'");
        let rest = s.strip_prefix("day-").ok_or_else(malformed)?;
        let (day, slot) = rest.split_once("-slot-").ok_or_else(malformed)?;
        let day = parse_index(day).ok_or_else(malformed)?;
        let slot = parse_index(slot).ok_or_else(malformed)?;
        Ok(Self { day, slot })
    }
}

fn parse_index(raw: &str) -> Option<usize> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    // Only the canonical spelling, so two keys never name the same slot.
    if raw.len() > 1 && raw.starts_with('0') {
        return None;
    }
    raw.parse().ok()
}

/// What the editing surface shows for one slot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotView {
    pub text: String,
    pub completed: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progress {
    pub day: usize,
    pub completed: usize,
    pub total: usize,
}

impl Progress {
    pub fn percent(&self) -> f64 {
        percent(self.completed, self.total)
    }
}

pub(crate) fn percent(completed: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let raw = completed as f64 / total as f64 * 100.0;
    (raw * 10.0).round() / 10.0
}

#[derive(Debug, Deserialize)]
pub struct TaskRequest {
    pub day: usize,
    pub slot: usize,
    pub text: String,
}

#[derive(Debug, Deserialize)]
pub struct CompletionRequest {
    pub day: usize,
    pub slot: usize,
    pub checked: bool,
}

#[derive(Debug, Deserialize)]
pub struct NavigateRequest {
    #[serde(default)]
    pub direction: Option<String>,
    #[serde(default)]
    pub day: Option<usize>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ProgressResponse {
    pub day: usize,
    pub completed: usize,
    pub total: usize,
    pub percent: f64,
}

impl From<Progress> for ProgressResponse {
    fn from(progress: Progress) -> Self {
        Self {
            day: progress.day,
            completed: progress.completed,
            total: progress.total,
            percent: progress.percent(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SlotResponse {
    pub slot: usize,
    pub time: String,
    pub period: Period,
    pub text: String,
    pub completed: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DayResponse {
    pub day: usize,
    pub name: String,
    pub active: bool,
    pub slots: Vec<SlotResponse>,
    pub progress: ProgressResponse,
}

#[derive(Debug, Serialize)]
pub struct DaySummaryPoint {
    pub day: usize,
    pub name: String,
    pub completed: usize,
    pub total: usize,
    pub percent: f64,
}

#[derive(Debug, Serialize)]
pub struct PeriodSummaryPoint {
    pub period: Period,
    pub completed: usize,
    pub total: usize,
}

#[derive(Debug, Serialize)]
pub struct WeekSummary {
    pub active_day: usize,
    pub days: Vec<DaySummaryPoint>,
    pub periods: Vec<PeriodSummaryPoint>,
    pub completed: usize,
    pub total: usize,
    pub percent: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slot_key_string_form() {
        let key = SlotKey::new(3, 17);
        assert_eq!(key.to_string(), "day-3-slot-17");
        assert_eq!("day-3-slot-17".parse::<SlotKey>(), Ok(key));
        assert_eq!("day-0-slot-0".parse::<SlotKey>(), Ok(SlotKey::new(0, 0)));
    }

    #[test]
    fn slot_key_rejects_malformed() {
        for raw in ["", "day-1", "day--slot-2", "day-a-slot-1", "slot-1-day-2", "day-1-slot-+2", "day-1-slot-2x", "day-01-slot-2", "day-1-slot-007"] {
            assert!(raw.parse::<SlotKey>().is_err(), "accepted {raw:?}");
        }
    }

    #[test]
    fn percent_rounds_to_one_decimal() {
        assert_eq!(percent(1, 35), 2.9);
        assert_eq!(percent(35, 35), 100.0);
        assert_eq!(percent(0, 0), 0.0);
    }
}
