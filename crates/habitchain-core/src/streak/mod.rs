//! Streak engine: current and longest streaks, totals and recent history.

mod cache;
mod engine;
mod ranking;

pub use cache::StreakCache;
pub use engine::{
    compute_streaks, eligible_dates, history_window, recent_history, StreakEngine, StreakInfo,
    HISTORY_DAYS, MAX_HISTORY_DAYS,
};
pub use ranking::{rank_by_current_streak, sort_by_name};
