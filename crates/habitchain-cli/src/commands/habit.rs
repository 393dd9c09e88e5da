//! Habit management commands for CLI.

use clap::Subcommand;
use habitchain_core::streak::sort_by_name;
use habitchain_core::{Clock, Config, FixedClock, Habit, HabitStore, StreakEngine};
use serde_json::json;

use crate::common::{parse_date, parse_days, CmdResult};

#[derive(Subcommand)]
pub enum HabitAction {
    /// Create a new habit
    Add {
        /// Habit name
        name: String,
        /// Active days: weekdays, weekends, every-day, or a list like "mon,wed,fri"
        #[arg(long)]
        days: Option<String>,
        /// First day of the habit's history (default: today)
        #[arg(long)]
        start: Option<String>,
    },
    /// List habits
    List,
    /// Show a habit with its streaks
    Show {
        /// Habit ID
        id: String,
    },
    /// Update a habit
    Edit {
        /// Habit ID
        id: String,
        /// New name
        #[arg(long)]
        name: Option<String>,
        /// New active days
        #[arg(long)]
        days: Option<String>,
        /// New start date
        #[arg(long)]
        start: Option<String>,
    },
    /// Delete a habit
    Delete {
        /// Habit ID
        id: String,
    },
}

pub fn run(action: HabitAction, clock: &FixedClock) -> CmdResult {
    let store = HabitStore::open()?;
    let engine = StreakEngine::with_clock(clock);

    match action {
        HabitAction::Add { name, days, start } => {
            let active_days = match days {
                Some(raw) => parse_days(&raw)?,
                None => Config::load_or_default().default_active_days(),
            };
            let start = start.as_deref().map(parse_date).transpose()?;
            let habit = Habit::new(&name, active_days, start, clock.today())?;
            let habit = store.add_habit(habit)?;
            println!("Habit created: {}", habit.id);
            println!("{}", serde_json::to_string_pretty(&habit)?);
        }
        HabitAction::List => {
            let habits = store.habits()?;
            let rows: Vec<_> = sort_by_name(&habits)
                .into_iter()
                .map(|habit| {
                    json!({
                        "id": habit.id,
                        "name": habit.name,
                        "schedule": habit.active_days().label(),
                        "startDate": habit.start_date(),
                        "currentStreak": engine.compute(habit).current_streak,
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&rows)?);
        }
        HabitAction::Show { id } => {
            let habit = store.habit(&id)?;
            let view = json!({
                "habit": habit,
                "schedule": habit.active_days().label(),
                "today": habit.state_on(engine.today()),
                "streak": engine.compute(&habit),
            });
            println!("{}", serde_json::to_string_pretty(&view)?);
        }
        HabitAction::Edit {
            id,
            name,
            days,
            start,
        } => {
            let days = days.as_deref().map(parse_days).transpose()?;
            let start = start.as_deref().map(parse_date).transpose()?;
            let habit = store.update_habit(&id, |habit| {
                if let Some(name) = name.as_deref() {
                    habit.rename(name)?;
                }
                if days.is_some() || start.is_some() {
                    let days = days.unwrap_or_else(|| habit.active_days().clone());
                    let start = start.unwrap_or_else(|| habit.start_date());
                    habit.set_schedule(days, start)?;
                }
                Ok(())
            })?;
            println!("Habit updated: {}", habit.id);
            println!("{}", serde_json::to_string_pretty(&habit)?);
        }
        HabitAction::Delete { id } => {
            store.delete_habit(&id)?;
            println!("Habit deleted: {id}");
        }
    }
    Ok(())
}
