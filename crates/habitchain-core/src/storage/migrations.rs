//! Schema migrations and legacy habit records.
//!
//! SQLite migrations are versioned through the `schema_version` table and
//! applied when the database opens. Habit documents written by older app
//! versions are normalized on load by [`StoredHabit`].

use std::collections::HashMap;

use rusqlite::{Connection, Result as SqliteResult};
use serde::Deserialize;
use tracing::warn;

use crate::date::{CalendarDate, DayOfWeek};
use crate::habit::{ActiveDays, DayEntry, DayState, Habit, NotificationSettings};

/// Current schema version.
pub const SCHEMA_VERSION: i32 = 1;

/// Apply all pending migrations to bring the database to the current schema version.
///
/// # Errors
/// Returns an error if migration fails.
pub fn migrate(conn: &Connection) -> SqliteResult<()> {
    create_schema_version_table(conn)?;

    let current_version = get_schema_version(conn);

    if current_version < 1 {
        migrate_v1(conn)?;
    }

    Ok(())
}

fn create_schema_version_table(conn: &Connection) -> SqliteResult<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS schema_version (
            version INTEGER PRIMARY KEY
        );",
    )
}

/// Returns 0 if no version is set (initial database).
pub fn get_schema_version(conn: &Connection) -> i32 {
    conn.query_row("SELECT version FROM schema_version", [], |row| {
        row.get::<_, i32>(0)
    })
    .unwrap_or_else(|e| {
        if !matches!(e, rusqlite::Error::QueryReturnedNoRows) {
            warn!(error = %e, "failed to read schema_version");
        }
        0
    })
}

/// Migration v1: the key-value table.
fn migrate_v1(conn: &Connection) -> SqliteResult<()> {
    let tx = conn.unchecked_transaction()?;
    tx.execute_batch(
        "CREATE TABLE IF NOT EXISTS kv (
            key   TEXT PRIMARY KEY,
            value TEXT NOT NULL
        );",
    )?;
    tx.execute("DELETE FROM schema_version", [])?;
    tx.execute("INSERT INTO schema_version (version) VALUES (?1)", [1])?;
    tx.commit()
}

/// Habit as found in storage, before defaults are filled in.
///
/// Older records may lack `startDate` or `activeDays`, and their entry maps
/// may hold keys that are not dates.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredHabit {
    id: String,
    #[serde(default)]
    name: String,
    created_at: CalendarDate,
    #[serde(default)]
    start_date: Option<String>,
    #[serde(default)]
    entries: HashMap<String, StoredEntry>,
    #[serde(default)]
    active_days: Option<Vec<u8>>,
    #[serde(default)]
    notifications: Option<NotificationSettings>,
    #[serde(default)]
    revision: u64,
}

#[derive(Debug, Deserialize)]
struct StoredEntry {
    #[serde(default)]
    state: Option<DayState>,
    #[serde(default)]
    notes: Option<String>,
}

impl From<StoredHabit> for Habit {
    fn from(stored: StoredHabit) -> Self {
        let start_date = stored
            .start_date
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .and_then(|s| match s.parse::<CalendarDate>() {
                Ok(date) => Some(date),
                Err(e) => {
                    warn!(habit = %stored.id, error = %e, "bad startDate, using createdAt");
                    None
                }
            })
            .unwrap_or(stored.created_at);

        let active_days = match stored.active_days {
            None => ActiveDays::every_day(),
            Some(raw) => ActiveDays::from_days(raw.into_iter().filter_map(|n| {
                match DayOfWeek::try_from(n) {
                    Ok(day) => Some(day),
                    Err(e) => {
                        warn!(habit = %stored.id, error = %e, "dropping invalid active day");
                        None
                    }
                }
            })),
        };

        let mut entries = HashMap::with_capacity(stored.entries.len());
        for (key, raw) in stored.entries {
            let date = match key.parse::<CalendarDate>() {
                Ok(date) => date,
                Err(e) => {
                    warn!(habit = %stored.id, error = %e, "skipping entry with malformed date key");
                    continue;
                }
            };
            // The map key is authoritative for the entry's date.
            let entry = DayEntry::new(date, raw.state.unwrap_or_default()).with_notes(raw.notes);
            if !entry.is_implicit() {
                entries.insert(date, entry);
            }
        }

        Habit {
            id: stored.id,
            name: stored.name,
            created_at: stored.created_at,
            start_date,
            entries,
            active_days,
            notifications: stored.notifications,
            revision: stored.revision,
        }
    }
}
