use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use gloo_timers::callback::Interval;
use log::{debug, error, info, warn};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::js_sys::{Function, Object, Reflect};
use web_sys::{
    window, CustomEvent, CustomEventInit, Document, Element, Event, HtmlElement,
    HtmlInputElement, HtmlScriptElement, MouseEvent,
};

use super::controller::EmbeddedPlayerController;
use super::error::PlayerError;
use super::gate::ReadyGate;
use super::host::{Notification, OverlayHandlers, OverlaySurface, PageHost, TaskHandle};
use super::options::{EmbedOptions, PlayerConfig};
use super::registry::{self, PlayerCommand};
use super::runtime::{EmbedHandlers, EmbedRequest, EmbedRuntime, EmbeddedPlayer, MediaMetadata};
use crate::config;

const READY_HOOK: &str = "onYouTubeIframeAPIReady";

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = YT, js_name = Player)]
    type YtPlayer;

    #[wasm_bindgen(constructor, catch, js_namespace = YT, js_class = "Player")]
    fn new(element_id: &str, options: &JsValue) -> Result<YtPlayer, JsValue>;

    #[wasm_bindgen(method, js_name = playVideo)]
    fn play_video(this: &YtPlayer);

    #[wasm_bindgen(method, js_name = pauseVideo)]
    fn pause_video(this: &YtPlayer);

    #[wasm_bindgen(method, js_name = stopVideo)]
    fn stop_video(this: &YtPlayer);

    #[wasm_bindgen(method, js_name = seekTo)]
    fn seek_to(this: &YtPlayer, seconds: f64, allow_seek_ahead: bool);

    #[wasm_bindgen(method, js_name = setVolume)]
    fn set_volume(this: &YtPlayer, volume: u8);

    #[wasm_bindgen(method)]
    fn mute(this: &YtPlayer);

    #[wasm_bindgen(method, js_name = unMute)]
    fn un_mute(this: &YtPlayer);

    #[wasm_bindgen(method, js_name = setPlaybackRate)]
    fn set_playback_rate(this: &YtPlayer, rate: f64);

    #[wasm_bindgen(method, js_name = loadVideoById)]
    fn load_video_by_id(this: &YtPlayer, video_id: &str);

    #[wasm_bindgen(method, js_name = loadPlaylist)]
    fn load_playlist(this: &YtPlayer, playlist_id: &str);

    #[wasm_bindgen(method, js_name = getCurrentTime)]
    fn get_current_time(this: &YtPlayer) -> f64;

    #[wasm_bindgen(method, js_name = getDuration)]
    fn get_duration(this: &YtPlayer) -> f64;

    #[wasm_bindgen(method, js_name = getVolume)]
    fn get_volume(this: &YtPlayer) -> f64;

    #[wasm_bindgen(method, js_name = isMuted)]
    fn is_muted(this: &YtPlayer) -> bool;

    #[wasm_bindgen(method, js_name = getPlaybackRate)]
    fn get_playback_rate(this: &YtPlayer) -> f64;

    /// Plain JS array of numbers.
    #[wasm_bindgen(method, js_name = getAvailablePlaybackRates)]
    fn get_available_playback_rates(this: &YtPlayer) -> JsValue;

    #[wasm_bindgen(method, js_name = getVideoData)]
    fn get_video_data(this: &YtPlayer) -> JsValue;

    #[wasm_bindgen(method)]
    fn destroy(this: &YtPlayer);
}

// ============================================================================
// Embed runtime
// ============================================================================

/// `YT.Player` wrapper; owns the event closures it was created with.
struct WebPlayer {
    player: YtPlayer,
    events: RefCell<Vec<Closure<dyn FnMut(JsValue)>>>,
}

impl EmbeddedPlayer for WebPlayer {
    fn play_video(&self) {
        self.player.play_video();
    }

    fn pause_video(&self) {
        self.player.pause_video();
    }

    fn stop_video(&self) {
        self.player.stop_video();
    }

    fn seek_to(&self, seconds: f64, allow_seek_ahead: bool) {
        self.player.seek_to(seconds, allow_seek_ahead);
    }

    fn set_volume(&self, volume: u8) {
        self.player.set_volume(volume);
    }

    fn mute(&self) {
        self.player.mute();
    }

    fn un_mute(&self) {
        self.player.un_mute();
    }

    fn set_playback_rate(&self, rate: f64) {
        self.player.set_playback_rate(rate);
    }

    fn load_video_by_id(&self, video_id: &str) {
        self.player.load_video_by_id(video_id);
    }

    fn load_playlist(&self, playlist_id: &str) {
        self.player.load_playlist(playlist_id);
    }

    fn current_time(&self) -> f64 {
        self.player.get_current_time()
    }

    fn duration(&self) -> f64 {
        self.player.get_duration()
    }

    fn volume(&self) -> u8 {
        self.player.get_volume().clamp(0.0, 100.0) as u8
    }

    fn is_muted(&self) -> bool {
        self.player.is_muted()
    }

    fn playback_rate(&self) -> f64 {
        self.player.get_playback_rate()
    }

    fn available_playback_rates(&self) -> Vec<f64> {
        serde_wasm_bindgen::from_value(self.player.get_available_playback_rates())
            .unwrap_or_else(|_| vec![1.0])
    }

    fn video_data(&self) -> MediaMetadata {
        serde_wasm_bindgen::from_value(self.player.get_video_data()).unwrap_or_default()
    }

    fn destroy(&self) {
        self.player.destroy();
        // late embed events must still find a live closure
        for event in self.events.borrow_mut().drain(..) {
            event.forget();
        }
    }
}

/// The global `YT` namespace installed by the iframe API script.
pub struct YtRuntime;

impl EmbedRuntime for YtRuntime {
    fn is_available(&self) -> bool {
        let window = match window() {
            Some(window) => window,
            None => return false,
        };
        Reflect::get(&window, &"YT".into())
            .ok()
            .filter(|yt| yt.is_object())
            .and_then(|yt| Reflect::get(&yt, &"Player".into()).ok())
            .map_or(false, |player| player.is_function())
    }

    fn create_player(
        &self,
        request: &EmbedRequest<'_>,
        handlers: EmbedHandlers,
    ) -> Result<Rc<dyn EmbeddedPlayer>, PlayerError> {
        let options = serde_wasm_bindgen::to_value(&EmbedOptions::new(request.media_ref, request.config))
            .map_err(|e| PlayerError::Embed(e.to_string()))?;

        let EmbedHandlers {
            on_ready,
            on_state_change,
            on_error,
        } = handlers;
        let ready = Closure::<dyn FnMut(JsValue)>::new(move |_event: JsValue| on_ready());
        let state = Closure::<dyn FnMut(JsValue)>::new(move |event: JsValue| {
            on_state_change(event_code(&event))
        });
        let failure = Closure::<dyn FnMut(JsValue)>::new(move |event: JsValue| {
            on_error(event_code(&event))
        });

        let events = Object::new();
        Reflect::set(&events, &"onReady".into(), ready.as_ref()).map_err(PlayerError::embed)?;
        Reflect::set(&events, &"onStateChange".into(), state.as_ref()).map_err(PlayerError::embed)?;
        Reflect::set(&events, &"onError".into(), failure.as_ref()).map_err(PlayerError::embed)?;
        Reflect::set(&options, &"events".into(), &events).map_err(PlayerError::embed)?;

        let player = YtPlayer::new(request.element_id, &options).map_err(PlayerError::embed)?;
        Ok(Rc::new(WebPlayer {
            player,
            events: RefCell::new(vec![ready, state, failure]),
        }))
    }
}

/// `event.data` of an embed event.
fn event_code(event: &JsValue) -> i32 {
    Reflect::get(event, &"data".into())
        .ok()
        .and_then(|data| data.as_f64())
        .map_or(i32::MIN, |data| data as i32)
}

// ============================================================================
// Page host
// ============================================================================

fn document() -> Result<Document, PlayerError> {
    window()
        .and_then(|window| window.document())
        .ok_or_else(|| PlayerError::Dom("no document".to_string()))
}

fn find(root: &Element, selector: &str) -> Result<Element, PlayerError> {
    root.query_selector(selector)
        .map_err(PlayerError::dom)?
        .ok_or_else(|| PlayerError::Dom(format!("overlay is missing {}", selector)))
}

/// Offset of a click along a track as a fraction of its width.
pub fn click_fraction(client_x: f64, track_left: f64, track_width: f64) -> Option<f64> {
    if track_width > 0.0 {
        Some(((client_x - track_left) / track_width).clamp(0.0, 1.0))
    } else {
        None
    }
}

const OVERLAY_MARKUP: &str = r#"
<div class="controls-overlay full-style">
    <div class="top-controls">
        <div class="play-pause-btn">
            <i class="fas fa-play"></i>
        </div>
        <div class="volume-control">
            <i class="fas fa-volume-up"></i>
            <input type="range" class="volume-slider" min="0" max="100" value="50">
        </div>
        <div class="time-display">
            <span class="current-time">0:00</span> / <span class="total-time">0:00</span>
        </div>
    </div>
    <div class="progress-bar">
        <div class="progress-fill"></div>
    </div>
</div>
"#;

struct DomOverlay {
    root: Element,
    icon: Element,
    fill: HtmlElement,
    current: Element,
    total: Element,
    _listeners: Vec<Closure<dyn FnMut(Event)>>,
}

impl DomOverlay {
    fn render(slot_id: &str, handlers: OverlayHandlers) -> Result<Self, PlayerError> {
        let document = document()?;
        let container = document
            .get_element_by_id(slot_id)
            .ok_or_else(|| PlayerError::MissingMount(slot_id.to_string()))?;

        let root = document.create_element("div").map_err(PlayerError::dom)?;
        root.set_class_name("custom-youtube-controls");
        root.set_inner_html(OVERLAY_MARKUP);
        container.append_child(&root).map_err(PlayerError::dom)?;

        let button = find(&root, ".play-pause-btn")?;
        let slider = find(&root, ".volume-slider")?;
        let track = find(&root, ".progress-bar")?;
        let fill = find(&root, ".progress-fill")?
            .dyn_into::<HtmlElement>()
            .map_err(|_| PlayerError::Dom("progress fill is not an HTML element".to_string()))?;

        let OverlayHandlers {
            on_toggle,
            on_volume,
            on_seek,
        } = handlers;

        let toggle = Closure::<dyn FnMut(Event)>::new(move |_: Event| on_toggle());
        button
            .add_event_listener_with_callback("click", toggle.as_ref().unchecked_ref())
            .map_err(PlayerError::dom)?;

        let volume = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
            let input = event
                .target()
                .and_then(|target| target.dyn_into::<HtmlInputElement>().ok());
            if let Some(input) = input {
                if let Ok(value) = input.value().parse::<u8>() {
                    on_volume(value);
                }
            }
        });
        slider
            .add_event_listener_with_callback("input", volume.as_ref().unchecked_ref())
            .map_err(PlayerError::dom)?;

        let track_el = track.clone();
        let seek = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
            if let Some(mouse) = event.dyn_ref::<MouseEvent>() {
                let rect = track_el.get_bounding_client_rect();
                if let Some(fraction) = click_fraction(mouse.client_x() as f64, rect.left(), rect.width()) {
                    on_seek(fraction);
                }
            }
        });
        track
            .add_event_listener_with_callback("click", seek.as_ref().unchecked_ref())
            .map_err(PlayerError::dom)?;

        Ok(Self {
            icon: find(&root, ".play-pause-btn i")?,
            current: find(&root, ".current-time")?,
            total: find(&root, ".total-time")?,
            root,
            fill,
            _listeners: vec![toggle, volume, seek],
        })
    }

    fn set_fill(&self, percent: f64) {
        let _ = self.fill.style().set_property("width", &format!("{}%", percent));
    }
}

impl OverlaySurface for DomOverlay {
    fn show_playing(&self, playing: bool) {
        self.icon
            .set_class_name(if playing { "fas fa-pause" } else { "fas fa-play" });
    }

    fn show_progress(&self, percent: f64, current: &str, total: &str) {
        self.set_fill(percent);
        self.current.set_text_content(Some(current));
        self.total.set_text_content(Some(total));
    }

    fn reset(&self) {
        self.set_fill(0.0);
        self.current.set_text_content(Some("0:00"));
        self.total.set_text_content(Some("0:00"));
    }

    fn remove(&self) {
        self.root.remove();
    }
}

/// The live document: mount points, overlays, timers and `CustomEvent`s.
pub struct DomHost;

impl PageHost for DomHost {
    fn prepare_mount(&self, slot_id: &str) -> Result<String, PlayerError> {
        let document = document()?;
        let container = document
            .get_element_by_id(slot_id)
            .ok_or_else(|| PlayerError::MissingMount(slot_id.to_string()))?;

        let element_id = format!("youtube-player-{}", slot_id);
        // one embed per slot
        if let Some(stale) = document.get_element_by_id(&element_id) {
            stale.remove();
        }
        let target = document.create_element("div").map_err(PlayerError::dom)?;
        target.set_id(&element_id);
        container.append_child(&target).map_err(PlayerError::dom)?;
        Ok(element_id)
    }

    fn create_overlay(
        &self,
        slot_id: &str,
        handlers: OverlayHandlers,
    ) -> Result<Box<dyn OverlaySurface>, PlayerError> {
        Ok(Box::new(DomOverlay::render(slot_id, handlers)?))
    }

    fn schedule_every(&self, period: Duration, mut task: Box<dyn FnMut()>) -> TaskHandle {
        let interval = Interval::new(period.as_millis() as u32, move || task());
        TaskHandle::new(interval)
    }

    fn publish(&self, notification: &Notification) {
        if let Err(e) = broadcast(notification) {
            warn!("Could not broadcast {}: {}", notification.event_name(), e);
        }
    }
}

fn broadcast(notification: &Notification) -> Result<(), PlayerError> {
    let detail = serde_wasm_bindgen::to_value(notification)
        .map_err(|e| PlayerError::Dom(e.to_string()))?;
    let init = CustomEventInit::new();
    init.set_detail(&detail);
    let event = CustomEvent::new_with_event_init_dict(notification.event_name(), &init)
        .map_err(PlayerError::dom)?;
    document()?.dispatch_event(&event).map_err(PlayerError::dom)?;
    Ok(())
}

// ============================================================================
// Bootstrap
// ============================================================================

/// Points the runtime's one global ready callback at the shared gate,
/// chaining whatever callback was installed before.
fn install_ready_hook(gate: Rc<ReadyGate>) -> Result<(), PlayerError> {
    let window = window().ok_or_else(|| PlayerError::Dom("no window".to_string()))?;
    let previous = Reflect::get(&window, &READY_HOOK.into())
        .ok()
        .and_then(|hook| hook.dyn_into::<Function>().ok());

    let hook = Closure::<dyn FnMut()>::new(move || {
        info!("YouTube API loaded");
        if let Some(previous) = &previous {
            if let Err(e) = previous.call0(&JsValue::NULL) {
                warn!("Previous {} hook failed: {:?}", READY_HOOK, e);
            }
        }
        gate.signal_ready();
    });
    Reflect::set(&window, &READY_HOOK.into(), hook.as_ref()).map_err(PlayerError::embed)?;
    hook.forget();
    Ok(())
}

fn load_embed_api() -> Result<(), PlayerError> {
    let window = window().ok_or_else(|| PlayerError::Dom("no window".to_string()))?;
    if Reflect::has(&window, &"YT".into()).unwrap_or(false) {
        debug!("YouTube API already present");
        return Ok(());
    }

    let document = document()?;
    let script = document
        .create_element("script")
        .map_err(PlayerError::dom)?
        .dyn_into::<HtmlScriptElement>()
        .map_err(|_| PlayerError::Dom("script element expected".to_string()))?;
    script.set_src(config::EMBED_API_URL);
    script.set_async(true);

    let first = document.query_selector("script").map_err(PlayerError::dom)?;
    match first.as_ref().and_then(|first| first.parent_node().map(|parent| (first, parent))) {
        Some((first, parent)) => {
            parent.insert_before(&script, Some(&**first)).map_err(PlayerError::dom)?;
        }
        None => {
            let root = document
                .document_element()
                .ok_or_else(|| PlayerError::Dom("empty document".to_string()))?;
            root.append_child(&script).map_err(PlayerError::dom)?;
        }
    }
    Ok(())
}

/// Hooks the embed runtime's ready signal and starts loading its script.
pub fn bootstrap() {
    if let Err(e) = install_ready_hook(ReadyGate::global()) {
        error!("Failed to install YouTube ready hook: {}", e);
        return;
    }
    if let Err(e) = load_embed_api() {
        error!("Failed to load YouTube API: {}", e);
    }
}

/// Builds a controller wired to the real page and the real runtime.
pub fn mount(slot_id: &str, media_ref: &str, config: PlayerConfig) -> EmbeddedPlayerController {
    EmbeddedPlayerController::new(
        slot_id,
        media_ref,
        config,
        Rc::new(YtRuntime),
        Rc::new(DomHost),
        &ReadyGate::global(),
    )
}

/// `controlPlayer("player1", {command: "seekTo", seconds: 30})` from page scripts.
#[wasm_bindgen(js_name = controlPlayer)]
pub fn control_player(key: &str, command: JsValue) -> bool {
    match serde_wasm_bindgen::from_value::<PlayerCommand>(command) {
        Ok(command) => registry::dispatch(key, &command),
        Err(e) => {
            warn!("Ignoring malformed command for player {}: {}", key, e);
            false
        }
    }
}

/// Snapshot of a registered player for page scripts, `undefined` if unknown.
#[wasm_bindgen(js_name = playerStatus)]
pub fn player_status(key: &str) -> JsValue {
    registry::status(key)
        .and_then(|status| serde_wasm_bindgen::to_value(&status).ok())
        .unwrap_or(JsValue::UNDEFINED)
}
