use crate::errors::ScheduleError;
use crate::models::{Progress, SlotView, WeekSummary};
use crate::snapshot::Snapshot;
use crate::stats::build_week_summary;
use crate::store::ScheduleStore;
use crate::view::DayView;
use tracing::debug;

pub struct DayViewController<V> {
    store: ScheduleStore,
    view: V,
    shown: bool,
}

impl<V: DayView> DayViewController<V> {
    pub fn new(store: ScheduleStore, view: V) -> Self {
        Self {
            store,
            view,
            shown: false,
        }
    }

    pub fn store(&self) -> &ScheduleStore {
        &self.store
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn active_day(&self) -> usize {
        self.store.active_day()
    }

    pub fn show_day(&mut self, target: usize) -> Result<(), ScheduleError> {
        if !self.store.layout().has_day(target) {
            debug!(day = target, "ignoring navigation outside the week");
            return Ok(());
        }

        if self.shown {
            self.flush()?;
        }
        self.store.set_active_day(target)?;
        self.refresh()?;
        self.shown = true;
        debug!(day = target, "showing day");
        Ok(())
    }

    pub fn next_day(&mut self) -> Result<(), ScheduleError> {
        let days = self.store.layout().day_count();
        if days == 0 {
            return Ok(());
        }
        self.show_day((self.active_day() + 1) % days)
    }

    pub fn previous_day(&mut self) -> Result<(), ScheduleError> {
        let days = self.store.layout().day_count();
        if days == 0 {
            return Ok(());
        }
        self.show_day((self.active_day() + days - 1) % days)
    }

    pub fn handle_checkbox_toggle(&mut self, day: usize, slot: usize, checked: bool) -> Result<Progress, ScheduleError> {
        self.store.set_completion(day, slot, checked)?;
        let progress = self.store.progress(day)?;
        if day == self.active_day() {
            self.mirror_slot(day, slot)?;
            self.view.set_progress(progress);
        }
        Ok(progress)
    }

    pub fn handle_task_text_change(&mut self, day: usize, slot: usize, text: &str) -> Result<Progress, ScheduleError> {
        self.store.set_task(day, slot, text)?;
        if day == self.active_day() {
            self.mirror_slot(day, slot)?;
        }
        self.store.progress(day)
    }

    pub fn clear_active_day(&mut self) -> Result<(), ScheduleError> {
        let day = self.active_day();
        self.store.clear_day(day)?;
        debug!(day, "cleared day");
        self.refresh()
    }

    pub fn progress(&self, day: usize) -> Result<Progress, ScheduleError> {
        self.store.progress(day)
    }

    pub fn week_summary(&self) -> WeekSummary {
        build_week_summary(&self.store)
    }

    pub fn export(&mut self) -> Result<Snapshot, ScheduleError> {
        if self.shown {
            self.flush()?;
        }
        Ok(self.store.snapshot())
    }

    // The old surface is discarded, not flushed over the imported data.
    pub fn import(&mut self, snapshot: &Snapshot) -> Result<(), ScheduleError> {
        self.store.restore(snapshot)?;
        self.shown = false;
        self.show_day(self.active_day())
    }

    fn flush(&mut self) -> Result<(), ScheduleError> {
        let day = self.active_day();
        let Some(live) = self.view.read_day(day) else {
            return Ok(());
        };
        let slot_count = self.store.layout().slot_count();
        for (slot, value) in live.into_iter().enumerate().take(slot_count) {
            self.store.set_task(day, slot, value.text)?;
            self.store.set_completion(day, slot, value.completed)?;
        }
        Ok(())
    }

    fn refresh(&mut self) -> Result<(), ScheduleError> {
        let day = self.active_day();
        let slots = self.store.day_slots(day)?;
        self.view.render_day(day, &slots);
        self.view.set_progress(self.store.progress(day)?);
        Ok(())
    }

    fn mirror_slot(&mut self, day: usize, slot: usize) -> Result<(), ScheduleError> {
        let value = SlotView {
            text: self.store.task(day, slot)?.to_string(),
            completed: self.store.completion(day, slot)?,
        };
        self.view.update_slot(day, slot, &value);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::ScheduleLayout;
    use std::sync::Arc;

    /// Holds whatever was last rendered, like an input form would.
    #[derive(Default)]
    struct FakeView {
        day: Option<usize>,
        slots: Vec<SlotView>,
        progress: Option<Progress>,
        renders: usize,
    }

    impl DayView for FakeView {
        fn render_day(&mut self, day: usize, slots: &[SlotView]) {
            self.day = Some(day);
            self.slots = slots.to_vec();
            self.renders += 1;
        }

        fn set_progress(&mut self, progress: Progress) {
            self.progress = Some(progress);
        }

        fn read_day(&self, day: usize) -> Option<Vec<SlotView>> {
            (self.day == Some(day)).then(|| self.slots.clone())
        }

        fn update_slot(&mut self, day: usize, slot: usize, view: &SlotView) {
            if self.day == Some(day) {
                if let Some(entry) = self.slots.get_mut(slot) {
                    *entry = view.clone();
                }
            }
        }
    }

    fn controller() -> DayViewController<FakeView> {
        let store = ScheduleStore::new(Arc::new(ScheduleLayout::standard()));
        let mut controller = DayViewController::new(store, FakeView::default());
        controller.show_day(0).unwrap();
        controller
    }

    #[test]
    fn first_show_renders_monday() {
        let controller = controller();
        assert_eq!(controller.view().day, Some(0));
        assert_eq!(controller.view().slots.len(), 35);
        assert_eq!(
            controller.view().progress,
            Some(Progress { day: 0, completed: 0, total: 35 })
        );
    }

    #[test]
    fn workout_survives_round_trip_and_clear() {
        let mut controller = controller();
        controller.handle_task_text_change(0, 0, "Workout").unwrap();
        let progress = controller.handle_checkbox_toggle(0, 0, true).unwrap();
        assert_eq!((progress.completed, progress.total), (1, 35));
        assert_eq!(controller.progress(0).unwrap().completed, 1);

        controller.next_day().unwrap();
        assert_eq!(controller.active_day(), 1);
        controller.previous_day().unwrap();
        assert_eq!(controller.active_day(), 0);

        assert_eq!(controller.store().task(0, 0).unwrap(), "Workout");
        assert!(controller.store().completion(0, 0).unwrap());
        assert_eq!(controller.view().slots[0].text, "Workout");
        assert!(controller.view().slots[0].completed);

        controller.clear_active_day().unwrap();
        let progress = controller.progress(0).unwrap();
        assert_eq!((progress.completed, progress.total), (0, 35));
        assert_eq!(controller.store().task(0, 0).unwrap(), "");
        assert_eq!(controller.view().slots[0], SlotView::default());
        assert_eq!(controller.view().progress.map(|p| p.completed), Some(0));
    }

    #[test]
    fn navigation_without_days_is_a_no_op() {
        let layout = ScheduleLayout::new(Vec::new(), ScheduleLayout::standard().slots().to_vec());
        let store = ScheduleStore::new(Arc::new(layout));
        let mut controller = DayViewController::new(store, FakeView::default());

        controller.next_day().unwrap();
        controller.previous_day().unwrap();
        controller.show_day(0).unwrap();

        assert_eq!(controller.active_day(), 0);
        assert_eq!(controller.view().renders, 0);
    }

    #[test]
    fn navigation_wraps_both_ways() {
        let mut controller = controller();
        controller.previous_day().unwrap();
        assert_eq!(controller.active_day(), 6);
        controller.next_day().unwrap();
        assert_eq!(controller.active_day(), 0);
    }

    #[test]
    fn out_of_range_show_is_ignored() {
        let mut controller = controller();
        controller.show_day(3).unwrap();
        let renders = controller.view().renders;
        controller.show_day(7).unwrap();
        assert_eq!(controller.active_day(), 3);
        assert_eq!(controller.view().renders, renders);
    }

    #[test]
    fn leaving_and_returning_preserves_day() {
        let mut controller = controller();
        controller.show_day(2).unwrap();
        controller.handle_task_text_change(2, 4, "Dentist").unwrap();
        controller.handle_task_text_change(2, 5, "").unwrap();
        controller.handle_checkbox_toggle(2, 4, true).unwrap();
        let before = controller.store().day_slots(2).unwrap();

        controller.show_day(5).unwrap();
        controller.show_day(2).unwrap();

        assert_eq!(controller.store().day_slots(2).unwrap(), before);
        assert_eq!(controller.view().slots, before);
    }

    #[test]
    fn flush_picks_up_unreported_surface_edits() {
        let mut controller = controller();
        controller.view.slots[7].text = "typed but not sent".into();
        controller.view.slots[7].completed = true;

        controller.next_day().unwrap();

        assert_eq!(controller.store().task(0, 7).unwrap(), "typed but not sent");
        assert!(controller.store().completion(0, 7).unwrap());
    }

    #[test]
    fn edits_to_hidden_days_skip_the_view() {
        let mut controller = controller();
        controller.handle_task_text_change(4, 1, "Laundry").unwrap();
        controller.handle_checkbox_toggle(4, 1, true).unwrap();

        assert_eq!(controller.view().slots[1], SlotView::default());
        assert_eq!(controller.view().progress.map(|p| p.completed), Some(0));

        controller.show_day(4).unwrap();
        assert_eq!(controller.view().slots[1].text, "Laundry");
        assert_eq!(controller.view().progress.map(|p| p.completed), Some(1));
    }

    #[test]
    fn direct_edit_out_of_range_fails() {
        let mut controller = controller();
        assert!(controller.handle_task_text_change(0, 35, "x").is_err());
        assert!(controller.handle_checkbox_toggle(7, 0, true).is_err());
    }

    #[test]
    fn import_does_not_flush_stale_surface() {
        let mut controller = controller();
        controller.handle_task_text_change(0, 0, "old").unwrap();

        let mut snapshot = Snapshot::default();
        snapshot.tasks.insert("day-0-slot-0".into(), "imported".into());
        snapshot.completions.insert("day-3-slot-2".into(), true);
        snapshot.active_day = Some(0);
        controller.import(&snapshot).unwrap();

        assert_eq!(controller.store().task(0, 0).unwrap(), "imported");
        assert_eq!(controller.view().slots[0].text, "imported");

        controller.show_day(3).unwrap();
        assert_eq!(controller.view().progress.map(|p| p.completed), Some(1));
    }

    #[test]
    fn rejected_import_keeps_everything() {
        let mut controller = controller();
        controller.handle_task_text_change(0, 0, "keep").unwrap();
        let snapshot = Snapshot {
            active_day: Some(12),
            ..Snapshot::default()
        };
        assert!(controller.import(&snapshot).is_err());
        assert_eq!(controller.store().task(0, 0).unwrap(), "keep");
        assert_eq!(controller.active_day(), 0);
    }

    #[test]
    fn export_includes_visible_day() {
        let mut controller = controller();
        controller.view.slots[2].text = "Stretch".into();
        let snapshot = controller.export().unwrap();
        assert_eq!(snapshot.tasks.get("day-0-slot-2").map(String::as_str), Some("Stretch"));
        assert_eq!(snapshot.active_day, Some(0));
    }
}
