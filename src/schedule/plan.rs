use super::TimeMark;
use chrono::{DateTime, Days, Local, TimeZone};

/// Computes the concrete set of future execution instants: one candidate per
/// (day offset, mark) pair in nested iteration order, dropping candidates at
/// or before `now`. `now` is captured once; the plan is a snapshot, never
/// recomputed per firing.
pub fn build_plan(days: u32, marks: &[TimeMark], now: DateTime<Local>) -> Vec<DateTime<Local>> {
    let mut plan = Vec::new();

    for day_offset in 0..days {
        let Some(date) = now.date_naive().checked_add_days(Days::new(day_offset as u64)) else {
            continue;
        };
        for mark in marks {
            let Some(naive) = date.and_hms_opt(mark.hour, mark.minute, 0) else {
                continue;
            };
            // Around DST transitions a local time can be ambiguous or
            // nonexistent; take the earliest valid interpretation and drop
            // times that don't exist that day.
            let Some(instant) = Local.from_local_datetime(&naive).earliest() else {
                continue;
            };
            if instant > now {
                plan.push(instant);
            }
        }
    }

    plan
}
