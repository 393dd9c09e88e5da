use serde::{Deserialize, Serialize};

use super::Habit;

/// Profile settings shown on the settings screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserSettings {
    pub display_name: String,
    pub avatar_index: u32,
    pub haptics_enabled: bool,
}

impl Default for UserSettings {
    fn default() -> Self {
        Self {
            display_name: String::new(),
            avatar_index: 0,
            haptics_enabled: true,
        }
    }
}

/// Partial update for [`UserSettings`]; `None` fields keep their value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSettingsPatch {
    pub display_name: Option<String>,
    pub avatar_index: Option<u32>,
    pub haptics_enabled: Option<bool>,
}

impl UserSettings {
    pub fn apply(&mut self, patch: UserSettingsPatch) {
        if let Some(name) = patch.display_name {
            self.display_name = name.trim().to_string();
        }
        if let Some(index) = patch.avatar_index {
            self.avatar_index = index;
        }
        if let Some(haptics) = patch.haptics_enabled {
            self.haptics_enabled = haptics;
        }
    }
}

/// Everything the store loads and saves as one unit.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppData {
    #[serde(default)]
    pub habits: Vec<Habit>,
    #[serde(default)]
    pub settings: UserSettings,
}

impl AppData {
    pub fn habit(&self, id: &str) -> Option<&Habit> {
        self.habits.iter().find(|h| h.id == id)
    }

    pub fn habit_mut(&mut self, id: &str) -> Option<&mut Habit> {
        self.habits.iter_mut().find(|h| h.id == id)
    }
}
