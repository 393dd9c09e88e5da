//! Profile settings shown on the welcome screen.

use clap::Subcommand;
use habitchain_core::{HabitStore, UserSettingsPatch};

use crate::common::CmdResult;

#[derive(Subcommand)]
pub enum ProfileAction {
    /// Show the current profile settings
    Get,
    /// Update profile settings; omitted fields keep their value
    Set {
        /// Display name
        #[arg(long)]
        name: Option<String>,
        /// Avatar index
        #[arg(long)]
        avatar: Option<u32>,
        /// Haptic feedback on taps
        #[arg(long)]
        haptics: Option<bool>,
    },
}

pub fn run(action: ProfileAction) -> CmdResult {
    let store = HabitStore::open()?;

    let settings = match action {
        ProfileAction::Get => store.settings()?,
        ProfileAction::Set {
            name,
            avatar,
            haptics,
        } => store.update_settings(UserSettingsPatch {
            display_name: name,
            avatar_index: avatar,
            haptics_enabled: haptics,
        })?,
    };
    println!("{}", serde_json::to_string_pretty(&settings)?);
    Ok(())
}
