use crate::errors::ScheduleError;
use crate::layout::ScheduleLayout;
use crate::models::{Progress, SlotKey, SlotView};
use crate::snapshot::Snapshot;
use std::collections::BTreeMap;
use std::sync::Arc;

/// A missing entry reads the same as its default (`""` / `false`).
#[derive(Debug, Clone)]
pub struct ScheduleStore {
    layout: Arc<ScheduleLayout>,
    tasks: BTreeMap<SlotKey, String>,
    completions: BTreeMap<SlotKey, bool>,
    active_day: usize,
}

impl ScheduleStore {
    pub fn new(layout: Arc<ScheduleLayout>) -> Self {
        Self {
            layout,
            tasks: BTreeMap::new(),
            completions: BTreeMap::new(),
            active_day: 0,
        }
    }

    pub fn layout(&self) -> &Arc<ScheduleLayout> {
        &self.layout
    }

    pub fn active_day(&self) -> usize {
        self.active_day
    }

    pub fn set_active_day(&mut self, day: usize) -> Result<(), ScheduleError> {
        self.check_day(day)?;
        self.active_day = day;
        Ok(())
    }

    pub fn set_task(&mut self, day: usize, slot: usize, text: impl Into<String>) -> Result<(), ScheduleError> {
        let key = self.key(day, slot)?;
        self.tasks.insert(key, text.into());
        Ok(())
    }

    pub fn task(&self, day: usize, slot: usize) -> Result<&str, ScheduleError> {
        let key = self.key(day, slot)?;
        Ok(self.tasks.get(&key).map(String::as_str).unwrap_or(""))
    }

    pub fn set_completion(&mut self, day: usize, slot: usize, complete: bool) -> Result<(), ScheduleError> {
        let key = self.key(day, slot)?;
        self.completions.insert(key, complete);
        Ok(())
    }

    pub fn completion(&self, day: usize, slot: usize) -> Result<bool, ScheduleError> {
        let key = self.key(day, slot)?;
        Ok(self.completions.get(&key).copied().unwrap_or(false))
    }

    pub fn clear_day(&mut self, day: usize) -> Result<(), ScheduleError> {
        self.check_day(day)?;
        self.tasks.retain(|key, _| key.day != day);
        self.completions.retain(|key, _| key.day != day);
        Ok(())
    }

    pub fn progress(&self, day: usize) -> Result<Progress, ScheduleError> {
        self.check_day(day)?;
        let completed = self
            .completions
            .iter()
            .filter(|(key, done)| key.day == day && **done)
            .count();
        Ok(Progress {
            day,
            completed,
            total: self.layout.slot_count(),
        })
    }

    pub fn day_slots(&self, day: usize) -> Result<Vec<SlotView>, ScheduleError> {
        self.check_day(day)?;
        (0..self.layout.slot_count())
            .map(|slot| {
                Ok(SlotView {
                    text: self.task(day, slot)?.to_string(),
                    completed: self.completion(day, slot)?,
                })
            })
            .collect()
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            tasks: self
                .tasks
                .iter()
                .map(|(key, text)| (key.to_string(), text.clone()))
                .collect(),
            completions: self
                .completions
                .iter()
                .map(|(key, done)| (key.to_string(), *done))
                .collect(),
            active_day: Some(self.active_day),
        }
    }

    pub fn restore(&mut self, snapshot: &Snapshot) -> Result<(), ScheduleError> {
        let valid = snapshot.validate(&self.layout)?;
        self.tasks = valid.tasks;
        self.completions = valid.completions;
        if let Some(day) = valid.active_day {
            self.active_day = day;
        }
        Ok(())
    }

    fn check_day(&self, day: usize) -> Result<(), ScheduleError> {
        if self.layout.has_day(day) {
            Ok(())
        } else {
            Err(ScheduleError::OutOfRange { day, slot: 0 })
        }
    }

    fn key(&self, day: usize, slot: usize) -> Result<SlotKey, ScheduleError> {
        if self.layout.contains(day, slot) {
            Ok(SlotKey::new(day, slot))
        } else {
            Err(ScheduleError::OutOfRange { day, slot })
        }
    }
}
