//! Per-day edits: the tap, notes and exemption gestures.

use clap::Subcommand;
use habitchain_core::{CalendarDate, Clock, DayEntry, FixedClock, Habit, HabitStore, StreakEngine};
use serde_json::json;

use crate::common::{parse_date_rel, CmdResult};

#[derive(Subcommand)]
pub enum DayAction {
    /// Advance a day's state (blank -> success -> failure -> blank)
    Tap {
        /// Habit ID
        id: String,
        /// Date (YYYY-MM-DD, today or yesterday)
        #[arg(default_value = "today")]
        date: String,
    },
    /// Set the notes of a day; an empty string removes them
    Note {
        /// Habit ID
        id: String,
        /// Date (YYYY-MM-DD, today or yesterday)
        date: String,
        /// Note text
        text: String,
    },
    /// Mark a future day as exempt, or lift the exemption with --off
    Exempt {
        /// Habit ID
        id: String,
        /// Date (YYYY-MM-DD or tomorrow)
        date: String,
        /// Lift the exemption instead
        #[arg(long)]
        off: bool,
    },
    /// Forget everything recorded for a day
    Clear {
        /// Habit ID
        id: String,
        /// Date (YYYY-MM-DD, today or yesterday)
        date: String,
    },
}

pub fn run(action: DayAction, clock: &FixedClock) -> CmdResult {
    let store = HabitStore::open()?;

    let (habit, date) = match action {
        DayAction::Tap { id, date } => {
            let date = parse_date_rel(&date, clock)?;
            let today = clock.today();
            let habit = store.update_habit(&id, |habit| habit.tap(date, today).map(|_| ()))?;
            (habit, date)
        }
        DayAction::Note { id, date, text } => {
            let date = parse_date_rel(&date, clock)?;
            let habit = store.update_habit(&id, |habit| habit.annotate(date, &text))?;
            (habit, date)
        }
        DayAction::Exempt { id, date, off } => {
            let date = parse_date_rel(&date, clock)?;
            let now = clock.now();
            let habit = store.update_habit(&id, |habit| habit.set_exemption(date, !off, now))?;
            (habit, date)
        }
        DayAction::Clear { id, date } => {
            let date = parse_date_rel(&date, clock)?;
            let habit = store.remove_entry(&id, date)?;
            (habit, date)
        }
    };

    print_day(&habit, date, clock)
}

fn print_day(habit: &Habit, date: CalendarDate, clock: &FixedClock) -> CmdResult {
    let entry = habit
        .entry(date)
        .cloned()
        .unwrap_or_else(|| DayEntry::blank(date));
    let view = json!({
        "habitId": habit.id,
        "entry": entry,
        "streak": StreakEngine::with_clock(clock).compute(habit),
    });
    println!("{}", serde_json::to_string_pretty(&view)?);
    Ok(())
}
