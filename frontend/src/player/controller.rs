use std::cell::RefCell;
use std::rc::{Rc, Weak};
use std::time::Duration;

use log::{debug, error, info, warn};

use super::error::PlayerError;
use super::gate::ReadyGate;
use super::host::{Notification, OverlayHandlers, OverlaySurface, PageHost, TaskHandle};
use super::options::PlayerConfig;
use super::runtime::{EmbedHandlers, EmbedRequest, EmbedRuntime, EmbeddedPlayer, MediaMetadata};
use super::state::{format_time, progress_percent, PlaybackState};

pub const TICK_PERIOD: Duration = Duration::from_secs(1);

enum Binding {
    Detached,
    /// Created by the runtime but not yet reported ready; never used for control calls.
    Pending(Rc<dyn EmbeddedPlayer>),
    Ready(Rc<dyn EmbeddedPlayer>),
}

impl Binding {
    fn take(&mut self) -> Option<Rc<dyn EmbeddedPlayer>> {
        match std::mem::replace(self, Binding::Detached) {
            Binding::Pending(player) | Binding::Ready(player) => Some(player),
            Binding::Detached => None,
        }
    }
}

struct Instance {
    media_ref: String,
    binding: Binding,
    overlay: Option<Rc<dyn OverlaySurface>>,
    ticker: Option<TaskHandle>,
    last_state: PlaybackState,
    last_code: i32,
    destroyed: bool,
}

struct Shared {
    slot_id: String,
    config: PlayerConfig,
    runtime: Rc<dyn EmbedRuntime>,
    host: Rc<dyn PageHost>,
    instance: RefCell<Instance>,
}

/// One embedded video slot on the page.
///
/// Cheap to clone; clones are handles to the same instance. Every control
/// call is a no-op and every query returns its default until the embed
/// reports ready, and again after [`destroy`](Self::destroy).
#[derive(Clone)]
pub struct EmbeddedPlayerController {
    shared: Rc<Shared>,
}

impl EmbeddedPlayerController {
    pub fn new(
        slot_id: impl Into<String>,
        media_ref: impl Into<String>,
        config: PlayerConfig,
        runtime: Rc<dyn EmbedRuntime>,
        host: Rc<dyn PageHost>,
        gate: &ReadyGate,
    ) -> Self {
        let controller = Self {
            shared: Rc::new(Shared {
                slot_id: slot_id.into(),
                config,
                runtime,
                host,
                instance: RefCell::new(Instance {
                    media_ref: media_ref.into(),
                    binding: Binding::Detached,
                    overlay: None,
                    ticker: None,
                    last_state: PlaybackState::Unstarted,
                    last_code: -1,
                    destroyed: false,
                }),
            }),
        };

        let weak = Rc::downgrade(&controller.shared);
        let available = controller.shared.runtime.is_available();
        if !available && !gate.is_ready() {
            info!(
                "Deferring player {}: {}",
                controller.shared.slot_id,
                PlayerError::RuntimeUnavailable
            );
        }
        gate.when_ready(available, move || {
            if let Some(controller) = Self::upgrade(&weak) {
                controller.create();
            }
        });
        controller
    }

    fn upgrade(weak: &Weak<Shared>) -> Option<Self> {
        weak.upgrade().map(|shared| Self { shared })
    }

    fn create(&self) {
        let slot_id = &self.shared.slot_id;
        let media_ref = {
            let instance = self.shared.instance.borrow();
            if instance.destroyed || !matches!(instance.binding, Binding::Detached) {
                return;
            }
            instance.media_ref.clone()
        };

        let element_id = match self.shared.host.prepare_mount(slot_id) {
            Ok(id) => id,
            Err(e) => {
                error!("Skipping player {}: {}", slot_id, e);
                return;
            }
        };

        let request = EmbedRequest {
            element_id: &element_id,
            media_ref: &media_ref,
            config: &self.shared.config,
        };
        let player = match self.shared.runtime.create_player(&request, self.embed_handlers()) {
            Ok(player) => player,
            Err(e) => {
                error!("Failed to create player {}: {}", slot_id, e);
                return;
            }
        };
        debug!("Created player {} for video {}", slot_id, media_ref);
        self.shared.instance.borrow_mut().binding = Binding::Pending(player);

        if self.shared.config.custom_overlay {
            self.attach_overlay();
        }
    }

    fn embed_handlers(&self) -> EmbedHandlers {
        let ready = Rc::downgrade(&self.shared);
        let state = Rc::downgrade(&self.shared);
        let failure = Rc::downgrade(&self.shared);
        EmbedHandlers {
            on_ready: Box::new(move || {
                if let Some(controller) = Self::upgrade(&ready) {
                    controller.handle_ready();
                }
            }),
            on_state_change: Box::new(move |code| {
                if let Some(controller) = Self::upgrade(&state) {
                    controller.handle_state_change(code);
                }
            }),
            on_error: Box::new(move |code| {
                if let Some(controller) = Self::upgrade(&failure) {
                    controller.handle_error(code);
                }
            }),
        }
    }

    fn attach_overlay(&self) {
        let toggle = Rc::downgrade(&self.shared);
        let volume = Rc::downgrade(&self.shared);
        let seek = Rc::downgrade(&self.shared);
        let handlers = OverlayHandlers {
            on_toggle: Box::new(move || {
                if let Some(controller) = Self::upgrade(&toggle) {
                    controller.toggle_playback();
                }
            }),
            on_volume: Box::new(move |value| {
                if let Some(controller) = Self::upgrade(&volume) {
                    controller.set_volume(value);
                }
            }),
            on_seek: Box::new(move |fraction| {
                if let Some(controller) = Self::upgrade(&seek) {
                    controller.seek_to_fraction(fraction);
                }
            }),
        };

        let overlay: Rc<dyn OverlaySurface> =
            match self.shared.host.create_overlay(&self.shared.slot_id, handlers) {
                Ok(overlay) => Rc::from(overlay),
                Err(e) => {
                    warn!("Custom controls unavailable for {}: {}", self.shared.slot_id, e);
                    return;
                }
            };

        let tick = Rc::downgrade(&self.shared);
        let ticker = self.shared.host.schedule_every(
            TICK_PERIOD,
            Box::new(move || {
                if let Some(controller) = Self::upgrade(&tick) {
                    controller.tick();
                }
            }),
        );

        let mut instance = self.shared.instance.borrow_mut();
        instance.overlay = Some(overlay);
        instance.ticker = Some(ticker);
    }

    fn handle_ready(&self) {
        let (overlay, media_ref, state) = {
            let mut instance = self.shared.instance.borrow_mut();
            match std::mem::replace(&mut instance.binding, Binding::Detached) {
                Binding::Pending(player) => instance.binding = Binding::Ready(player),
                other => {
                    instance.binding = other;
                    return;
                }
            }
            (
                instance.overlay.clone(),
                instance.media_ref.clone(),
                instance.last_state,
            )
        };

        info!("Player ready for video: {}", media_ref);
        if let Some(overlay) = overlay {
            overlay.show_playing(state == PlaybackState::Playing);
        }
        self.shared.host.publish(&Notification::PlayerReady {
            instance: self.shared.slot_id.clone(),
            media_ref,
        });
    }

    fn handle_state_change(&self, code: i32) {
        let state = PlaybackState::from_code(code);
        let (overlay, media_ref) = {
            let mut instance = self.shared.instance.borrow_mut();
            if instance.destroyed {
                return;
            }
            instance.last_state = state;
            instance.last_code = code;
            (instance.overlay.clone(), instance.media_ref.clone())
        };

        debug!("Player {} state changed to: {}", self.shared.slot_id, state);
        if let Some(overlay) = overlay {
            overlay.show_playing(state == PlaybackState::Playing);
        }
        self.shared.host.publish(&Notification::PlayerStateChanged {
            instance: self.shared.slot_id.clone(),
            media_ref,
            state,
            raw_code: code,
        });
    }

    fn handle_error(&self, code: i32) {
        let media_ref = {
            let instance = self.shared.instance.borrow();
            if instance.destroyed {
                return;
            }
            instance.media_ref.clone()
        };

        error!("Player error for video {}: {}", media_ref, code);
        self.shared.host.publish(&Notification::PlayerError {
            instance: self.shared.slot_id.clone(),
            media_ref,
            error_code: code,
        });
    }

    fn tick(&self) {
        let player = match self.ready_player() {
            Some(player) => player,
            None => return,
        };
        let overlay = match self.shared.instance.borrow().overlay.clone() {
            Some(overlay) => overlay,
            None => return,
        };

        let current = player.current_time();
        let duration = player.duration();
        if duration > 0.0 {
            overlay.show_progress(
                progress_percent(current, duration),
                &format_time(current),
                &format_time(duration),
            );
        }
    }

    fn ready_player(&self) -> Option<Rc<dyn EmbeddedPlayer>> {
        match &self.shared.instance.borrow().binding {
            Binding::Ready(player) => Some(player.clone()),
            _ => None,
        }
    }

    // ===== controls =====

    pub fn play(&self) {
        if let Some(player) = self.ready_player() {
            player.play_video();
        }
    }

    pub fn pause(&self) {
        if let Some(player) = self.ready_player() {
            player.pause_video();
        }
    }

    pub fn stop(&self) {
        if let Some(player) = self.ready_player() {
            player.stop_video();
        }
    }

    pub fn seek_to(&self, seconds: f64) {
        if let Some(player) = self.ready_player() {
            player.seek_to(seconds, true);
        }
    }

    /// Seeks to a fraction of the duration, as the progress track does.
    pub fn seek_to_fraction(&self, fraction: f64) {
        let duration = self.get_duration();
        self.seek_to(duration * fraction.clamp(0.0, 1.0));
    }

    pub fn set_volume(&self, volume: u8) {
        if let Some(player) = self.ready_player() {
            player.set_volume(volume.min(100));
        }
    }

    pub fn mute(&self) {
        if let Some(player) = self.ready_player() {
            player.mute();
        }
    }

    pub fn unmute(&self) {
        if let Some(player) = self.ready_player() {
            player.un_mute();
        }
    }

    pub fn set_playback_rate(&self, rate: f64) {
        if let Some(player) = self.ready_player() {
            player.set_playback_rate(rate);
        }
    }

    /// Loads another video into the same player and clears the time readout.
    pub fn load_media_by_id(&self, media_ref: &str) {
        let player = match self.ready_player() {
            Some(player) => player,
            None => return,
        };
        player.load_video_by_id(media_ref);

        let overlay = {
            let mut instance = self.shared.instance.borrow_mut();
            instance.media_ref = media_ref.to_string();
            instance.overlay.clone()
        };
        if let Some(overlay) = overlay {
            overlay.reset();
        }
        info!("Player {} now loading video {}", self.shared.slot_id, media_ref);
    }

    pub fn load_playlist(&self, playlist_id: &str) {
        if let Some(player) = self.ready_player() {
            player.load_playlist(playlist_id);
        }
    }

    /// What the overlay's play/pause button does.
    pub fn toggle_playback(&self) {
        if self.last_known_state() == PlaybackState::Playing {
            self.pause();
        } else {
            self.play();
        }
    }

    // ===== queries =====

    pub fn get_state(&self) -> PlaybackState {
        if self.is_ready() {
            self.shared.instance.borrow().last_state
        } else {
            PlaybackState::Unstarted
        }
    }

    /// Raw code of the last state notification, -1 when not ready.
    pub fn get_state_code(&self) -> i32 {
        if self.is_ready() {
            self.shared.instance.borrow().last_code
        } else {
            -1
        }
    }

    pub fn get_current_time(&self) -> f64 {
        self.ready_player().map_or(0.0, |p| p.current_time())
    }

    pub fn get_duration(&self) -> f64 {
        self.ready_player().map_or(0.0, |p| p.duration())
    }

    pub fn get_volume(&self) -> u8 {
        self.ready_player().map_or(0, |p| p.volume())
    }

    pub fn is_muted(&self) -> bool {
        self.ready_player().map_or(false, |p| p.is_muted())
    }

    pub fn get_playback_rate(&self) -> f64 {
        self.ready_player().map_or(1.0, |p| p.playback_rate())
    }

    pub fn get_available_rates(&self) -> Vec<f64> {
        self.ready_player()
            .map_or_else(|| vec![1.0], |p| p.available_playback_rates())
    }

    pub fn get_media_metadata(&self) -> MediaMetadata {
        self.ready_player()
            .map(|p| p.video_data())
            .unwrap_or_default()
    }

    pub fn get_progress_percent(&self) -> f64 {
        progress_percent(self.get_current_time(), self.get_duration())
    }

    pub fn is_ready(&self) -> bool {
        matches!(self.shared.instance.borrow().binding, Binding::Ready(_))
    }

    pub fn last_known_state(&self) -> PlaybackState {
        self.shared.instance.borrow().last_state
    }

    pub fn media_ref(&self) -> String {
        self.shared.instance.borrow().media_ref.clone()
    }

    /// Releases the embed and the overlay and stops the tick. Safe to call repeatedly.
    pub fn destroy(&self) {
        let (player, overlay, ticker) = {
            let mut instance = self.shared.instance.borrow_mut();
            instance.destroyed = true;
            (
                instance.binding.take(),
                instance.overlay.take(),
                instance.ticker.take(),
            )
        };

        drop(ticker);
        let released = player.is_some() || overlay.is_some();
        if let Some(player) = player {
            player.destroy();
        }
        if let Some(overlay) = overlay {
            overlay.remove();
        }
        if released {
            info!("Destroyed player {}", self.shared.slot_id);
        }
    }
}

#[cfg(test)]
impl EmbeddedPlayerController {
    pub fn has_overlay(&self) -> bool {
        self.shared.instance.borrow().overlay.is_some()
    }

    pub fn slot_id(&self) -> &str {
        &self.shared.slot_id
    }

    pub fn same_instance(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.shared, &other.shared)
    }
}
