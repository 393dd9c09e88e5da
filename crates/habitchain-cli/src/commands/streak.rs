use habitchain_core::streak::rank_by_current_streak;
use habitchain_core::{Clock, FixedClock, HabitStore, StreakCache};
use serde_json::json;

use crate::common::CmdResult;

pub fn run(id: Option<&str>, all: bool, clock: &FixedClock) -> CmdResult {
    let store = HabitStore::open()?;
    let today = clock.today();
    let cache = StreakCache::new();

    match (id, all) {
        (Some(id), false) => {
            let habit = store.habit(id)?;
            let info = cache.get_or_compute(&habit, today);
            println!("{}", serde_json::to_string_pretty(&info)?);
        }
        (None, true) => {
            let habits = store.habits()?;
            let rows: Vec<_> = rank_by_current_streak(&habits, today)
                .into_iter()
                .map(|habit| {
                    json!({
                        "id": habit.id,
                        "name": habit.name,
                        "streak": cache.get_or_compute(habit, today),
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&rows)?);
        }
        (Some(_), true) => return Err("give a habit ID or --all, not both".into()),
        (None, false) => return Err("give a habit ID, or --all for every habit".into()),
    }
    Ok(())
}
