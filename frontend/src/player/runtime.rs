use std::rc::Rc;

use serde::{Deserialize, Serialize};

use super::error::PlayerError;
use super::options::PlayerConfig;

/// Title/author/id triple the embed reports for the loaded video.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MediaMetadata {
    pub video_id: String,
    pub title: String,
    pub author: String,
}

/// Callbacks the embed pushes its lifecycle events into.
pub struct EmbedHandlers {
    pub on_ready: Box<dyn Fn()>,
    pub on_state_change: Box<dyn Fn(i32)>,
    pub on_error: Box<dyn Fn(i32)>,
}

pub struct EmbedRequest<'a> {
    /// Element the embed replaces, prepared inside the slot.
    pub element_id: &'a str,
    pub media_ref: &'a str,
    pub config: &'a PlayerConfig,
}

/// The third-party script that knows how to build players.
pub trait EmbedRuntime {
    fn is_available(&self) -> bool;

    fn create_player(
        &self,
        request: &EmbedRequest<'_>,
        handlers: EmbedHandlers,
    ) -> Result<Rc<dyn EmbeddedPlayer>, PlayerError>;
}

/// Imperative surface of one embedded player.
#[cfg_attr(test, mockall::automock)]
pub trait EmbeddedPlayer {
    fn play_video(&self);
    fn pause_video(&self);
    fn stop_video(&self);
    fn seek_to(&self, seconds: f64, allow_seek_ahead: bool);
    fn set_volume(&self, volume: u8);
    fn mute(&self);
    fn un_mute(&self);
    fn set_playback_rate(&self, rate: f64);
    fn load_video_by_id(&self, video_id: &str);
    fn load_playlist(&self, playlist_id: &str);

    fn current_time(&self) -> f64;
    fn duration(&self) -> f64;
    fn volume(&self) -> u8;
    fn is_muted(&self) -> bool;
    fn playback_rate(&self) -> f64;
    fn available_playback_rates(&self) -> Vec<f64>;
    fn video_data(&self) -> MediaMetadata;

    fn destroy(&self);
}
