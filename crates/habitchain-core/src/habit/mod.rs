//! Habit records, day states and the gestures that edit them.

mod day_state;
mod edit;
mod model;
mod settings;

pub use day_state::{can_set_exemption, DayState};
pub use model::{ActiveDays, DayEntry, Habit, NotificationSettings};
pub use settings::{AppData, UserSettings, UserSettingsPatch};
