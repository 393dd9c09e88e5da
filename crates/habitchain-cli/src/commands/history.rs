use habitchain_core::streak::history_window;
use habitchain_core::{Clock, Config, FixedClock, HabitStore};

use crate::common::CmdResult;

pub fn run(id: &str, days: Option<u32>, clock: &FixedClock) -> CmdResult {
    let config = Config::load_or_default();
    let store = HabitStore::open()?;
    let habit = store.habit(id)?;
    let today = clock.today();
    let days = days.unwrap_or(config.display.history_days);

    println!("{} ({})", habit.name, habit.active_days().label());
    for entry in history_window(&habit, today, days as usize) {
        let mut line = format!(
            "{} {} {}",
            entry.date,
            entry.date.day_of_week().short_name(),
            entry.state.glyph()
        );
        if !habit.is_active_on(entry.date) {
            line.push_str(" (rest day)");
        }
        if config.display.show_notes {
            if let Some(notes) = entry.notes.as_deref() {
                line.push(' ');
                line.push_str(notes);
            }
        }
        println!("{line}");
    }
    Ok(())
}
