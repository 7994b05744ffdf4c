use std::cell::RefCell;
use std::collections::BTreeMap;

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use super::controller::EmbeddedPlayerController;
use super::runtime::MediaMetadata;
use super::state::PlaybackState;

thread_local! {
    static PLAYERS: RefCell<BTreeMap<String, EmbeddedPlayerController>> =
        RefCell::new(BTreeMap::new());
}

/// Page-lifetime lookup of controllers by key ("player1", "player2", ...).
pub fn register(key: &str, controller: EmbeddedPlayerController) {
    let previous = PLAYERS.with(|players| players.borrow_mut().insert(key.to_string(), controller));
    if let Some(previous) = previous {
        warn!("Replacing registered player {}", key);
        previous.destroy();
    }
}

pub fn get(key: &str) -> Option<EmbeddedPlayerController> {
    PLAYERS.with(|players| players.borrow().get(key).cloned())
}

/// Drops the registry entry and tears the controller down.
pub fn unregister(key: &str) {
    let removed = PLAYERS.with(|players| players.borrow_mut().remove(key));
    if let Some(controller) = removed {
        controller.destroy();
    }
}

pub fn keys() -> Vec<String> {
    PLAYERS.with(|players| players.borrow().keys().cloned().collect())
}

/// Command page scripts can send to a registered player.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "command", rename_all = "camelCase")]
pub enum PlayerCommand {
    Play,
    Pause,
    Stop,
    Mute,
    Unmute,
    SeekTo { seconds: f64 },
    SetVolume { volume: u8 },
    SetPlaybackRate { rate: f64 },
    #[serde(rename_all = "camelCase")]
    LoadMediaById { media_ref: String },
    #[serde(rename_all = "camelCase")]
    LoadPlaylist { playlist_id: String },
}

impl PlayerCommand {
    pub fn apply(&self, controller: &EmbeddedPlayerController) {
        match self {
            PlayerCommand::Play => controller.play(),
            PlayerCommand::Pause => controller.pause(),
            PlayerCommand::Stop => controller.stop(),
            PlayerCommand::Mute => controller.mute(),
            PlayerCommand::Unmute => controller.unmute(),
            PlayerCommand::SeekTo { seconds } => controller.seek_to(*seconds),
            PlayerCommand::SetVolume { volume } => controller.set_volume(*volume),
            PlayerCommand::SetPlaybackRate { rate } => controller.set_playback_rate(*rate),
            PlayerCommand::LoadMediaById { media_ref } => controller.load_media_by_id(media_ref),
            PlayerCommand::LoadPlaylist { playlist_id } => controller.load_playlist(playlist_id),
        }
    }
}

/// Runs `command` against the player registered as `key`; false if there is none.
pub fn dispatch(key: &str, command: &PlayerCommand) -> bool {
    match get(key) {
        Some(controller) => {
            debug!("Player {} <- {:?}", key, command);
            command.apply(&controller);
            true
        }
        None => {
            warn!("No player registered as {} (known: {:?})", key, keys());
            false
        }
    }
}

/// Query snapshot of a registered player; not-ready players report defaults.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerStatus {
    pub ready: bool,
    pub media_ref: String,
    pub state: PlaybackState,
    pub state_code: i32,
    pub current_time: f64,
    pub duration: f64,
    pub progress: f64,
    pub volume: u8,
    pub muted: bool,
    pub playback_rate: f64,
    pub available_rates: Vec<f64>,
    pub metadata: MediaMetadata,
}

impl PlayerStatus {
    pub fn of(controller: &EmbeddedPlayerController) -> Self {
        Self {
            ready: controller.is_ready(),
            media_ref: controller.media_ref(),
            state: controller.get_state(),
            state_code: controller.get_state_code(),
            current_time: controller.get_current_time(),
            duration: controller.get_duration(),
            progress: controller.get_progress_percent(),
            volume: controller.get_volume(),
            muted: controller.is_muted(),
            playback_rate: controller.get_playback_rate(),
            available_rates: controller.get_available_rates(),
            metadata: controller.get_media_metadata(),
        }
    }
}

pub fn status(key: &str) -> Option<PlayerStatus> {
    get(key).map(|controller| PlayerStatus::of(&controller))
}
