use crate::errors::ScheduleError;
use crate::layout::ScheduleLayout;
use crate::models::SlotKey;
use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, env, path::Path, path::PathBuf};
use tokio::fs;
use tracing::{error, info};

/// Export/import interchange for the whole planner.
///
/// Keys use the `day-<d>-slot-<s>` form. Older exports name the active day
/// `currentDay`; both spellings are accepted on import.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub tasks: BTreeMap<String, String>,
    #[serde(default)]
    pub completions: BTreeMap<String, bool>,
    #[serde(rename = "activeDay", alias = "currentDay", default)]
    pub active_day: Option<usize>,
}

/// A snapshot whose keys and active day all fit the layout.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidSnapshot {
    pub tasks: BTreeMap<SlotKey, String>,
    pub completions: BTreeMap<SlotKey, bool>,
    pub active_day: Option<usize>,
}

impl Snapshot {
    pub fn validate(&self, layout: &ScheduleLayout) -> Result<ValidSnapshot, ScheduleError> {
        let tasks = self
            .tasks
            .iter()
            .map(|(raw, text)| Ok((checked_key(raw, layout)?, text.clone())))
            .collect::<Result<BTreeMap<_, _>, ScheduleError>>()?;

        let completions = self
            .completions
            .iter()
            .map(|(raw, done)| Ok((checked_key(raw, layout)?, *done)))
            .collect::<Result<BTreeMap<_, _>, ScheduleError>>()?;

        if let Some(day) = self.active_day {
            if !layout.has_day(day) {
                return Err(ScheduleError::invalid_snapshot(format!(
                    "active day {day} is outside the schedule"
                )));
            }
        }

        Ok(ValidSnapshot {
            tasks,
            completions,
            active_day: self.active_day,
        })
    }
}

fn checked_key(raw: &str, layout: &ScheduleLayout) -> Result<SlotKey, ScheduleError> {
    let key: SlotKey = raw.parse().map_err(ScheduleError::InvalidSnapshot)?;
    if !layout.contains(key.day, key.slot) {
        return Err(ScheduleError::invalid_snapshot(format!(
            "slot key '{raw}' is outside the schedule"
        )));
    }
    Ok(key)
}

pub fn decode_snapshot(bytes: &[u8]) -> Result<Snapshot, ScheduleError> {
    serde_json::from_slice(bytes).map_err(|err| ScheduleError::invalid_snapshot(err.to_string()))
}

pub fn resolve_seed_path() -> Option<PathBuf> {
    env::var("PLANNER_SEED_PATH")
        .ok()
        .filter(|value| !value.trim().is_empty())
        .map(PathBuf::from)
}

/// Reads a snapshot to start the planner from. The file is only read, never
/// written back.
pub async fn load_seed(path: &Path) -> Option<Snapshot> {
    match fs::read(path).await {
        Ok(bytes) => match decode_snapshot(&bytes) {
            Ok(snapshot) => {
                info!("loaded seed snapshot from {}", path.display());
                Some(snapshot)
            }
            Err(err) => {
                error!("failed to parse seed snapshot: {err}");
                None
            }
        },
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            info!("no seed snapshot at {}", path.display());
            None
        }
        Err(err) => {
            error!("failed to read seed snapshot: {err}");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_legacy_current_day() {
        let raw = br#"{"tasks":{"day-1-slot-2":"Read"},"completions":{},"currentDay":4}"#;
        let snapshot = decode_snapshot(raw).unwrap();
        assert_eq!(snapshot.active_day, Some(4));
        assert_eq!(snapshot.tasks.get("day-1-slot-2").map(String::as_str), Some("Read"));
    }

    #[test]
    fn encodes_active_day_key() {
        let snapshot = Snapshot {
            active_day: Some(2),
            ..Snapshot::default()
        };
        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(json["activeDay"], 2);
        assert!(json.get("currentDay").is_none());
    }

    #[test]
    fn missing_sections_default_to_empty() {
        let snapshot = decode_snapshot(b"{}").unwrap();
        assert!(snapshot.tasks.is_empty());
        assert!(snapshot.completions.is_empty());
        assert_eq!(snapshot.active_day, None);
    }

    #[test]
    fn validate_rejects_out_of_range_keys() {
        let layout = ScheduleLayout::standard();
        let mut snapshot = Snapshot::default();
        snapshot.completions.insert("day-7-slot-0".into(), true);
        assert!(matches!(
            snapshot.validate(&layout),
            Err(ScheduleError::InvalidSnapshot(_))
        ));

        let mut snapshot = Snapshot::default();
        snapshot.tasks.insert("day-0-slot-35".into(), "late".into());
        assert!(snapshot.validate(&layout).is_err());

        let snapshot = Snapshot {
            active_day: Some(7),
            ..Snapshot::default()
        };
        assert!(snapshot.validate(&layout).is_err());
    }

    #[test]
    fn validate_rejects_padded_duplicate_keys() {
        let layout = ScheduleLayout::standard();
        let snapshot =
            decode_snapshot(br#"{"tasks":{"day-1-slot-2":"A","day-01-slot-2":"B"}}"#).unwrap();
        assert!(matches!(
            snapshot.validate(&layout),
            Err(ScheduleError::InvalidSnapshot(_))
        ));
    }

    #[test]
    fn shape_errors_are_invalid_snapshots() {
        let err = decode_snapshot(br#"{"tasks":[],"activeDay":0}"#).unwrap_err();
        assert!(matches!(err, ScheduleError::InvalidSnapshot(_)));
        assert!(decode_snapshot(br#"{"activeDay":-1}"#).is_err());
    }
}
