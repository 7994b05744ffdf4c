use std::any::Any;
use std::time::Duration;

use serde::Serialize;

use super::error::PlayerError;
use super::state::PlaybackState;

/// Keeps a scheduled task alive; dropping it cancels the task.
pub struct TaskHandle {
    _guard: Box<dyn Any>,
}

impl TaskHandle {
    pub fn new<T: 'static>(guard: T) -> Self {
        Self {
            _guard: Box::new(guard),
        }
    }
}

/// User input coming back from a rendered overlay.
pub struct OverlayHandlers {
    pub on_toggle: Box<dyn Fn()>,
    pub on_volume: Box<dyn Fn(u8)>,
    /// Fraction of the progress track that was clicked, in `[0, 1]`.
    pub on_seek: Box<dyn Fn(f64)>,
}

/// A rendered control overlay.
pub trait OverlaySurface {
    fn show_playing(&self, playing: bool);
    fn show_progress(&self, percent: f64, current: &str, total: &str);
    fn reset(&self);
    fn remove(&self);
}

/// Application-wide notifications a controller republishes. Serializes to
/// the bare event detail; the variant travels as the event name.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Notification {
    #[serde(rename_all = "camelCase")]
    PlayerReady { instance: String, media_ref: String },
    #[serde(rename_all = "camelCase")]
    PlayerStateChanged {
        instance: String,
        media_ref: String,
        state: PlaybackState,
        raw_code: i32,
    },
    #[serde(rename_all = "camelCase")]
    PlayerError {
        instance: String,
        media_ref: String,
        error_code: i32,
    },
}

impl Notification {
    /// DOM event type the notification is broadcast as.
    pub fn event_name(&self) -> &'static str {
        match self {
            Notification::PlayerReady { .. } => "playerReady",
            Notification::PlayerStateChanged { .. } => "playerStateChanged",
            Notification::PlayerError { .. } => "playerError",
        }
    }
}

/// Everything a controller needs from the page it lives on.
pub trait PageHost {
    /// Prepares the element the embed binds to inside `slot_id` and returns its id.
    fn prepare_mount(&self, slot_id: &str) -> Result<String, PlayerError>;

    fn create_overlay(
        &self,
        slot_id: &str,
        handlers: OverlayHandlers,
    ) -> Result<Box<dyn OverlaySurface>, PlayerError>;

    fn schedule_every(&self, period: Duration, task: Box<dyn FnMut()>) -> TaskHandle;

    fn publish(&self, notification: &Notification);
}
