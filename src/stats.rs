use crate::layout::Period;
use crate::models::{percent, DaySummaryPoint, PeriodSummaryPoint, WeekSummary};
use crate::store::ScheduleStore;

const PERIODS: [Period; 3] = [Period::Morning, Period::Afternoon, Period::Evening];

pub fn build_week_summary(store: &ScheduleStore) -> WeekSummary {
    let layout = store.layout();
    let slot_count = layout.slot_count();

    let mut days = Vec::with_capacity(layout.day_count());
    let mut periods: Vec<PeriodSummaryPoint> = PERIODS
        .iter()
        .map(|&period| PeriodSummaryPoint {
            period,
            completed: 0,
            total: 0,
        })
        .collect();

    for (day, name) in layout.days().iter().enumerate() {
        let mut completed = 0usize;
        for (slot, time_slot) in layout.slots().iter().enumerate() {
            let done = store.completion(day, slot).unwrap_or(false);
            if let Some(point) = periods.iter_mut().find(|p| p.period == time_slot.period) {
                point.total += 1;
                if done {
                    point.completed += 1;
                }
            }
            if done {
                completed += 1;
            }
        }

        days.push(DaySummaryPoint {
            day,
            name: name.clone(),
            completed,
            total: slot_count,
            percent: percent(completed, slot_count),
        });
    }

    let completed = days.iter().map(|day| day.completed).sum();
    let total = slot_count * layout.day_count();

    WeekSummary {
        active_day: store.active_day(),
        days,
        periods,
        completed,
        total,
        percent: percent(completed, total),
    }
}
