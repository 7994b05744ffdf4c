use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

use log::debug;

type Initializer = Box<dyn FnOnce()>;

/// Single registration point for "the embed runtime is loaded".
///
/// Every initializer queued before the runtime signals readiness runs, in
/// registration order, when `signal_ready` fires. Later registrations run
/// immediately.
#[derive(Default)]
pub struct ReadyGate {
    ready: Cell<bool>,
    pending: RefCell<VecDeque<Initializer>>,
}

thread_local! {
    static GLOBAL_GATE: Rc<ReadyGate> = Rc::new(ReadyGate::default());
}

impl ReadyGate {
    pub fn global() -> Rc<ReadyGate> {
        GLOBAL_GATE.with(Rc::clone)
    }

    pub fn is_ready(&self) -> bool {
        self.ready.get()
    }

    /// Runs `init` now if the runtime is already usable, otherwise queues it.
    pub fn when_ready(&self, runtime_available: bool, init: impl FnOnce() + 'static) {
        if runtime_available || self.ready.get() {
            init();
        } else {
            debug!("Embed runtime not loaded yet, queueing initializer");
            self.pending.borrow_mut().push_back(Box::new(init));
        }
    }

    pub fn signal_ready(&self) {
        self.ready.set(true);
        // initializers may register more work, so never hold the borrow while running one
        loop {
            let next = self.pending.borrow_mut().pop_front();
            match next {
                Some(init) => init(),
                None => break,
            }
        }
    }
}

#[cfg(test)]
impl ReadyGate {
    pub fn pending_count(&self) -> usize {
        self.pending.borrow().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn runs_immediately_when_runtime_is_available() {
        let gate = ReadyGate::default();
        let hits = Rc::new(Cell::new(0));
        let h = hits.clone();
        gate.when_ready(true, move || h.set(h.get() + 1));
        assert_eq!(hits.get(), 1);
        assert_eq!(gate.pending_count(), 0);
    }

    #[test]
    fn queued_initializers_all_run_in_order() {
        let gate = ReadyGate::default();
        let order = Rc::new(RefCell::new(Vec::new()));
        for name in ["player1", "player2", "player3"] {
            let order = order.clone();
            gate.when_ready(false, move || order.borrow_mut().push(name));
        }
        assert!(order.borrow().is_empty());
        assert_eq!(gate.pending_count(), 3);

        gate.signal_ready();
        assert_eq!(*order.borrow(), vec!["player1", "player2", "player3"]);
        assert_eq!(gate.pending_count(), 0);
    }

    #[test]
    fn registrations_after_signal_run_immediately() {
        let gate = ReadyGate::default();
        gate.signal_ready();
        let hits = Rc::new(Cell::new(false));
        let h = hits.clone();
        gate.when_ready(false, move || h.set(true));
        assert!(hits.get());
        assert!(gate.is_ready());
    }

    #[test]
    fn initializer_may_register_more_work() {
        let gate = Rc::new(ReadyGate::default());
        let hits = Rc::new(Cell::new(0));
        let (g, h) = (gate.clone(), hits.clone());
        gate.when_ready(false, move || {
            h.set(h.get() + 1);
            let h = h.clone();
            g.when_ready(false, move || h.set(h.get() + 10));
        });
        gate.signal_ready();
        assert_eq!(hits.get(), 11);
    }
}
