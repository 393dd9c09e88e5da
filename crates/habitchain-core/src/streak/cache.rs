//! Memoization for streak results.
//!
//! Keys are (habit id, habit revision, evaluation date). Each result also
//! stores a fingerprint of the streak-relevant fields, so two snapshots that
//! share an id and revision but differ in content never share a result.

use std::collections::hash_map::DefaultHasher;
use std::collections::HashMap;
use std::hash::{Hash, Hasher};
use std::sync::{Mutex, MutexGuard};

use tracing::trace;

use super::engine::{compute_streaks, StreakInfo};
use crate::date::CalendarDate;
use crate::habit::Habit;

type CacheKey = (String, u64);

/// Thread-safe cache of [`StreakInfo`] per habit snapshot.
#[derive(Debug, Default)]
pub struct StreakCache {
    inner: Mutex<CacheState>,
}

#[derive(Debug, Default)]
struct CacheState {
    date: Option<CalendarDate>,
    results: HashMap<CacheKey, (u64, StreakInfo)>,
}

/// Hash of everything `compute_streaks` reads: start date, schedule and the
/// state of every stored entry. Notes are left out.
fn fingerprint(habit: &Habit) -> u64 {
    let mut entries: Vec<_> = habit
        .entries()
        .values()
        .map(|entry| (entry.date, entry.state))
        .collect();
    entries.sort_unstable_by_key(|(date, _)| *date);

    let mut hasher = DefaultHasher::new();
    habit.start_date().hash(&mut hasher);
    habit.active_days().hash(&mut hasher);
    entries.hash(&mut hasher);
    hasher.finish()
}

impl StreakCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached result for `habit` on `today`, computing it on a miss.
    ///
    /// Moving to a new evaluation date drops everything cached for the old one.
    pub fn get_or_compute(&self, habit: &Habit, today: CalendarDate) -> StreakInfo {
        let key = (habit.id.clone(), habit.revision());
        let print = fingerprint(habit);
        {
            let mut state = self.state();
            if state.date != Some(today) {
                state.results.clear();
                state.date = Some(today);
            }
            match state.results.get(&key) {
                Some((cached, info)) if *cached == print => {
                    trace!(habit = %habit.id, "streak cache hit");
                    return *info;
                }
                Some(_) => trace!(habit = %habit.id, "streak cache fingerprint mismatch"),
                None => {}
            }
        }

        let info = compute_streaks(habit, today);

        let mut state = self.state();
        if state.date == Some(today) {
            // Only the latest snapshot of a habit is kept.
            state.results.retain(|(id, _), _| id != &habit.id);
            state.results.insert(key, (print, info));
        }
        info
    }

    /// Forget everything cached for one habit.
    pub fn invalidate(&self, habit_id: &str) {
        self.state().results.retain(|(id, _), _| id != habit_id);
    }

    pub fn clear(&self) {
        let mut state = self.state();
        state.results.clear();
        state.date = None;
    }

    pub fn len(&self) -> usize {
        self.state().results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // Entries are inserted whole, so a poisoned map is still consistent.
    fn state(&self) -> MutexGuard<'_, CacheState> {
        match self.inner.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::habit::{ActiveDays, DayEntry, DayState};

    fn d(s: &str) -> CalendarDate {
        s.parse().unwrap()
    }

    #[test]
    fn hit_matches_fresh_computation() {
        let mut habit =
            Habit::new("Read", ActiveDays::every_day(), Some(d("2024-01-01")), d("2024-01-01"))
                .unwrap();
        habit.put_entry(DayEntry::new(d("2024-01-09"), DayState::Success));
        let cache = StreakCache::new();
        let today = d("2024-01-10");

        let first = cache.get_or_compute(&habit, today);
        let second = cache.get_or_compute(&habit, today);
        assert_eq!(first, second);
        assert_eq!(first, compute_streaks(&habit, today));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn revision_change_recomputes() {
        let mut habit =
            Habit::new("Read", ActiveDays::every_day(), Some(d("2024-01-01")), d("2024-01-01"))
                .unwrap();
        let cache = StreakCache::new();
        let today = d("2024-01-10");

        assert_eq!(cache.get_or_compute(&habit, today).current_streak, 0);
        habit.tap(d("2024-01-10"), today).unwrap();
        assert_eq!(cache.get_or_compute(&habit, today).current_streak, 1);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn new_date_evicts_old_results() {
        let habit =
            Habit::new("Read", ActiveDays::every_day(), Some(d("2024-01-01")), d("2024-01-01"))
                .unwrap();
        let cache = StreakCache::new();
        cache.get_or_compute(&habit, d("2024-01-10"));
        cache.get_or_compute(&habit, d("2024-01-11"));
        assert_eq!(cache.len(), 1);

        cache.invalidate(&habit.id);
        assert!(cache.is_empty());
    }

    #[test]
    fn divergent_clones_do_not_share_results() {
        let base =
            Habit::new("Read", ActiveDays::every_day(), Some(d("2024-01-01")), d("2024-01-01"))
                .unwrap();
        let mut a = base.clone();
        let mut b = base;
        a.put_entry(DayEntry::new(d("2024-01-09"), DayState::Success));
        b.put_entry(DayEntry::new(d("2024-01-09"), DayState::Failure));
        assert_eq!(a.revision(), b.revision());

        let cache = StreakCache::new();
        let today = d("2024-01-10");
        assert_eq!(cache.get_or_compute(&a, today), compute_streaks(&a, today));
        assert_eq!(cache.get_or_compute(&b, today), compute_streaks(&b, today));
        assert_eq!(cache.get_or_compute(&a, today).current_streak, 1);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn notes_do_not_force_recomputation() {
        let mut habit =
            Habit::new("Read", ActiveDays::every_day(), Some(d("2024-01-01")), d("2024-01-01"))
                .unwrap();
        habit.put_entry(DayEntry::new(d("2024-01-09"), DayState::Success));
        assert_eq!(fingerprint(&habit), {
            let mut noted = habit.clone();
            noted.put_entry(
                DayEntry::new(d("2024-01-09"), DayState::Success).with_notes(Some("ok".into())),
            );
            fingerprint(&noted)
        });
    }

    #[test]
    fn poisoned_lock_is_recovered() {
        let habit =
            Habit::new("Read", ActiveDays::every_day(), Some(d("2024-01-01")), d("2024-01-01"))
                .unwrap();
        let cache = StreakCache::new();
        cache.get_or_compute(&habit, d("2024-01-10"));

        let poisoned = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _guard = cache.inner.lock().unwrap();
            panic!("poison the cache lock");
        }));
        assert!(poisoned.is_err());
        assert!(cache.inner.is_poisoned());

        assert_eq!(cache.len(), 1);
        cache.invalidate(&habit.id);
        assert!(cache.is_empty());
        cache.get_or_compute(&habit, d("2024-01-10"));
        cache.clear();
        assert!(cache.is_empty());
    }
}
