use super::engine::compute_streaks;
use crate::date::CalendarDate;
use crate::habit::Habit;

/// Habits ordered by current streak, longest first. Ties keep input order.
pub fn rank_by_current_streak<'a>(habits: &'a [Habit], today: CalendarDate) -> Vec<&'a Habit> {
    let mut ranked: Vec<(u64, &Habit)> = habits
        .iter()
        .map(|h| (compute_streaks(h, today).current_streak, h))
        .collect();
    ranked.sort_by(|a, b| b.0.cmp(&a.0));
    ranked.into_iter().map(|(_, h)| h).collect()
}

/// Habits ordered by name, ignoring case.
pub fn sort_by_name(habits: &[Habit]) -> Vec<&Habit> {
    let mut sorted: Vec<&Habit> = habits.iter().collect();
    sorted.sort_by_key(|h| h.name.to_lowercase());
    sorted
}
