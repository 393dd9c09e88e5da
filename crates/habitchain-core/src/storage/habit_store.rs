//! Habit collection persistence.
//!
//! The whole [`AppData`] document (habits plus profile settings) is stored as
//! one JSON value under [`APP_DATA_KEY`]. Every write replaces the document,
//! so a load always sees a consistent collection.

use tracing::{debug, info};

use super::Database;
use crate::date::CalendarDate;
use crate::error::{Result, ValidationError};
use crate::habit::{AppData, DayEntry, Habit, UserSettings, UserSettingsPatch};

/// Key of the app data row in the `kv` table.
pub const APP_DATA_KEY: &str = "streaks_app_data";

/// Load/save access to the habit collection.
pub struct HabitStore {
    db: Database,
}

impl HabitStore {
    /// Open the store in the default data directory.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened.
    pub fn open() -> Result<Self> {
        Ok(Self::with_database(Database::open()?))
    }

    /// In-memory store.
    ///
    /// # Errors
    /// Returns an error if the schema cannot be created.
    pub fn open_memory() -> Result<Self> {
        Ok(Self::with_database(Database::open_memory()?))
    }

    pub fn with_database(db: Database) -> Self {
        Self { db }
    }

    pub fn database(&self) -> &Database {
        &self.db
    }

    /// Load the collection; a store that was never written yields defaults.
    ///
    /// # Errors
    /// Returns an error if the row cannot be read or is not valid app data.
    pub fn load(&self) -> Result<AppData> {
        match self.db.kv_get(APP_DATA_KEY)? {
            Some(json) => {
                let data: AppData = serde_json::from_str(&json)?;
                debug!(habits = data.habits.len(), "loaded app data");
                Ok(data)
            }
            None => Ok(AppData::default()),
        }
    }

    /// Replace the stored collection with `data`.
    ///
    /// # Errors
    /// Returns an error if serialization or the write fails.
    pub fn save(&self, data: &AppData) -> Result<()> {
        let json = serde_json::to_string(data)?;
        self.db.kv_set(APP_DATA_KEY, &json)?;
        info!(habits = data.habits.len(), "saved app data");
        Ok(())
    }

    pub fn habits(&self) -> Result<Vec<Habit>> {
        Ok(self.load()?.habits)
    }

    /// Look up one habit by id.
    ///
    /// # Errors
    /// Returns `HabitNotFound` if no habit has this id.
    pub fn habit(&self, id: &str) -> Result<Habit> {
        self.load()?
            .habit(id)
            .cloned()
            .ok_or_else(|| ValidationError::HabitNotFound(id.to_string()).into())
    }

    pub fn add_habit(&self, habit: Habit) -> Result<Habit> {
        let mut data = self.load()?;
        data.habits.push(habit.clone());
        self.save(&data)?;
        Ok(habit)
    }

    /// Apply `edit` to the habit with `id` and persist the result.
    ///
    /// Nothing is written when `edit` fails.
    pub fn update_habit<F>(&self, id: &str, edit: F) -> Result<Habit>
    where
        F: FnOnce(&mut Habit) -> Result<(), ValidationError>,
    {
        let mut data = self.load()?;
        let habit = data
            .habit_mut(id)
            .ok_or_else(|| ValidationError::HabitNotFound(id.to_string()))?;
        edit(habit)?;
        let updated = habit.clone();
        self.save(&data)?;
        Ok(updated)
    }

    pub fn delete_habit(&self, id: &str) -> Result<()> {
        let mut data = self.load()?;
        let before = data.habits.len();
        data.habits.retain(|h| h.id != id);
        if data.habits.len() == before {
            return Err(ValidationError::HabitNotFound(id.to_string()).into());
        }
        self.save(&data)
    }

    /// Store `entry` on the habit, honouring the entry lifecycle.
    pub fn upsert_entry(&self, habit_id: &str, entry: DayEntry) -> Result<Habit> {
        self.update_habit(habit_id, |habit| {
            habit.put_entry(entry);
            Ok(())
        })
    }

    pub fn remove_entry(&self, habit_id: &str, date: CalendarDate) -> Result<Habit> {
        self.update_habit(habit_id, |habit| {
            habit.clear_entry(date);
            Ok(())
        })
    }

    pub fn settings(&self) -> Result<UserSettings> {
        Ok(self.load()?.settings)
    }

    pub fn update_settings(&self, patch: UserSettingsPatch) -> Result<UserSettings> {
        let mut data = self.load()?;
        data.settings.apply(patch);
        self.save(&data)?;
        Ok(data.settings)
    }

    /// Remove the whole collection, settings included.
    pub fn clear_all(&self) -> Result<()> {
        self.db.kv_delete(APP_DATA_KEY)?;
        info!("cleared app data");
        Ok(())
    }
}
