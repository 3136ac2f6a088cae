use crate::models::{Progress, SlotView};

pub trait DayView {
    fn render_day(&mut self, day: usize, slots: &[SlotView]);

    fn set_progress(&mut self, progress: Progress);

    /// `None` when the surface is not showing `day`.
    fn read_day(&self, day: usize) -> Option<Vec<SlotView>>;

    fn update_slot(&mut self, _day: usize, _slot: usize, _view: &SlotView) {}
}
