//! # habitchain Core Library
//!
//! This library provides the core logic for the habitchain habit tracker.
//! All operations are available through the standalone `habitchain` CLI,
//! which is a thin layer over this crate.
//!
//! ## Architecture
//!
//! - **Dates**: calendar-day arithmetic and a [`Clock`] seam for "today"
//! - **Habits**: the habit record, its day entries and the editing gestures
//! - **Streak Engine**: a pure function from (habit, today) to [`StreakInfo`],
//!   plus the recent-history window and an optional [`StreakCache`]
//! - **Storage**: the habit collection as one JSON document in SQLite, and
//!   TOML-based configuration
//!
//! ## Key Components
//!
//! - [`StreakEngine`]: streak computation bound to a clock
//! - [`Habit`]: habit record with sparse day entries
//! - [`HabitStore`]: load/save of the whole collection
//! - [`Config`]: application configuration management

pub mod date;
pub mod error;
pub mod habit;
pub mod storage;
pub mod streak;

pub use date::{CalendarDate, Clock, DateRelation, DayOfWeek, FixedClock, SystemClock};
pub use error::{ConfigError, CoreError, DatabaseError, ValidationError};
pub use habit::{
    can_set_exemption, ActiveDays, AppData, DayEntry, DayState, Habit, NotificationSettings,
    UserSettings, UserSettingsPatch,
};
pub use storage::{Config, Database, HabitStore};
pub use streak::{
    compute_streaks, recent_history, StreakCache, StreakEngine, StreakInfo, HISTORY_DAYS,
};
