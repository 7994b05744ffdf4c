//! In-memory stand-ins for the embed runtime and the page.

use std::cell::{Cell, RefCell};
use std::collections::{HashSet, VecDeque};
use std::rc::Rc;
use std::time::Duration;

use super::error::PlayerError;
use super::host::{Notification, OverlayHandlers, OverlaySurface, PageHost, TaskHandle};
use super::runtime::{EmbedHandlers, EmbedRequest, EmbedRuntime, EmbeddedPlayer};

pub struct FakeRuntime {
    available: Cell<bool>,
    players: RefCell<VecDeque<Rc<dyn EmbeddedPlayer>>>,
    handlers: RefCell<Vec<EmbedHandlers>>,
    requests: RefCell<Vec<(String, String, u8)>>,
}

impl FakeRuntime {
    pub fn new(available: bool) -> Rc<Self> {
        Rc::new(Self {
            available: Cell::new(available),
            players: RefCell::new(VecDeque::new()),
            handlers: RefCell::new(Vec::new()),
            requests: RefCell::new(Vec::new()),
        })
    }

    pub fn set_available(&self, available: bool) {
        self.available.set(available);
    }

    pub fn queue_player(&self, player: impl EmbeddedPlayer + 'static) {
        self.players.borrow_mut().push_back(Rc::new(player));
    }

    pub fn created(&self) -> usize {
        self.handlers.borrow().len()
    }

    /// `(element id, media ref, controls var)` per created player.
    pub fn requests(&self) -> Vec<(String, String, u8)> {
        self.requests.borrow().clone()
    }

    pub fn fire_ready(&self, index: usize) {
        (self.handlers.borrow()[index].on_ready)();
    }

    pub fn fire_state(&self, index: usize, code: i32) {
        (self.handlers.borrow()[index].on_state_change)(code);
    }

    pub fn fire_error(&self, index: usize, code: i32) {
        (self.handlers.borrow()[index].on_error)(code);
    }
}

impl EmbedRuntime for FakeRuntime {
    fn is_available(&self) -> bool {
        self.available.get()
    }

    fn create_player(
        &self,
        request: &EmbedRequest<'_>,
        handlers: EmbedHandlers,
    ) -> Result<Rc<dyn EmbeddedPlayer>, PlayerError> {
        let player = self
            .players
            .borrow_mut()
            .pop_front()
            .ok_or_else(|| PlayerError::Embed("no player queued".to_string()))?;
        self.requests.borrow_mut().push((
            request.element_id.to_string(),
            request.media_ref.to_string(),
            request.config.player_vars().controls,
        ));
        self.handlers.borrow_mut().push(handlers);
        Ok(player)
    }
}

#[derive(Debug, Default, Clone)]
pub struct OverlayLog {
    pub playing: Option<bool>,
    pub progress: Vec<(f64, String, String)>,
    pub resets: usize,
    pub removed: usize,
}

struct FakeOverlay {
    log: Rc<RefCell<OverlayLog>>,
}

impl OverlaySurface for FakeOverlay {
    fn show_playing(&self, playing: bool) {
        self.log.borrow_mut().playing = Some(playing);
    }

    fn show_progress(&self, percent: f64, current: &str, total: &str) {
        self.log
            .borrow_mut()
            .progress
            .push((percent, current.to_string(), total.to_string()));
    }

    fn reset(&self) {
        self.log.borrow_mut().resets += 1;
    }

    fn remove(&self) {
        self.log.borrow_mut().removed += 1;
    }
}

struct Alive(Rc<Cell<bool>>);

impl Drop for Alive {
    fn drop(&mut self) {
        self.0.set(false);
    }
}

type Task = (Rc<Cell<bool>>, Box<dyn FnMut()>);

#[derive(Default)]
pub struct FakeHost {
    missing: RefCell<HashSet<String>>,
    mounts: RefCell<Vec<String>>,
    notifications: RefCell<Vec<Notification>>,
    overlays: RefCell<Vec<(Rc<RefCell<OverlayLog>>, OverlayHandlers)>>,
    tasks: RefCell<Vec<Task>>,
}

impl FakeHost {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    pub fn remove_slot(&self, slot_id: &str) {
        self.missing.borrow_mut().insert(slot_id.to_string());
    }

    pub fn mounts(&self) -> Vec<String> {
        self.mounts.borrow().clone()
    }

    pub fn notifications(&self) -> Vec<Notification> {
        self.notifications.borrow().clone()
    }

    pub fn overlay(&self, index: usize) -> OverlayLog {
        self.overlays.borrow()[index].0.borrow().clone()
    }

    pub fn click_toggle(&self, index: usize) {
        (self.overlays.borrow()[index].1.on_toggle)();
    }

    pub fn slide_volume(&self, index: usize, value: u8) {
        (self.overlays.borrow()[index].1.on_volume)(value);
    }

    pub fn click_track(&self, index: usize, fraction: f64) {
        (self.overlays.borrow()[index].1.on_seek)(fraction);
    }

    pub fn task_alive(&self, index: usize) -> bool {
        self.tasks.borrow()[index].0.get()
    }

    /// Runs a task even if its handle was dropped, like a timer callback
    /// that was already queued when the interval got cleared.
    pub fn fire_task(&self, index: usize) {
        (self.tasks.borrow_mut()[index].1)();
    }

    /// Fires every task that has not been cancelled, once.
    pub fn run_ticks(&self) {
        for (alive, task) in self.tasks.borrow_mut().iter_mut() {
            if alive.get() {
                task();
            }
        }
    }
}

impl PageHost for FakeHost {
    fn prepare_mount(&self, slot_id: &str) -> Result<String, PlayerError> {
        if self.missing.borrow().contains(slot_id) {
            return Err(PlayerError::MissingMount(slot_id.to_string()));
        }
        let element_id = format!("youtube-player-{}", slot_id);
        self.mounts.borrow_mut().push(element_id.clone());
        Ok(element_id)
    }

    fn create_overlay(
        &self,
        _slot_id: &str,
        handlers: OverlayHandlers,
    ) -> Result<Box<dyn OverlaySurface>, PlayerError> {
        let log = Rc::new(RefCell::new(OverlayLog::default()));
        self.overlays.borrow_mut().push((log.clone(), handlers));
        Ok(Box::new(FakeOverlay { log }))
    }

    fn schedule_every(&self, _period: Duration, task: Box<dyn FnMut()>) -> TaskHandle {
        let alive = Rc::new(Cell::new(true));
        self.tasks.borrow_mut().push((alive.clone(), task));
        TaskHandle::new(Alive(alive))
    }

    fn publish(&self, notification: &Notification) {
        self.notifications.borrow_mut().push(notification.clone());
    }
}
