use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::js_sys::Array;
use web_sys::{
    window, Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit,
};

use crate::config;

/// Elements matching `selector` get `class` once they scroll into view.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RevealRule {
    pub selector: &'static str,
    pub class: &'static str,
    /// Stop watching an element after its first reveal.
    pub once: bool,
}

pub const REVEAL_RULES: &[RevealRule] = &[
    RevealRule {
        selector: ".service-card, .work-item",
        class: "animate",
        once: false,
    },
    RevealRule {
        selector: ".body004 .image-item",
        class: "visible",
        once: true,
    },
];

/// Live `IntersectionObserver` for one rule; disconnects when dropped.
pub struct RevealObserver {
    observer: IntersectionObserver,
    _callback: Closure<dyn FnMut(Array, IntersectionObserver)>,
}

impl RevealObserver {
    pub fn observe(rule: RevealRule) -> Result<Self, JsValue> {
        let callback = Closure::<dyn FnMut(Array, IntersectionObserver)>::new(
            move |entries: Array, observer: IntersectionObserver| {
                for entry in entries.iter() {
                    let entry = match entry.dyn_into::<IntersectionObserverEntry>() {
                        Ok(entry) => entry,
                        Err(_) => continue,
                    };
                    if entry.is_intersecting() {
                        let target = entry.target();
                        let _ = target.class_list().add_1(rule.class);
                        if rule.once {
                            observer.unobserve(&target);
                        }
                    }
                }
            },
        );

        let init = IntersectionObserverInit::new();
        init.set_threshold(&JsValue::from_f64(config::REVEAL_THRESHOLD));
        let observer =
            IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init)?;

        let document = window()
            .and_then(|window| window.document())
            .ok_or_else(|| JsValue::from_str("no document"))?;
        let nodes = document.query_selector_all(rule.selector)?;
        for index in 0..nodes.length() {
            if let Some(element) = nodes.item(index).and_then(|node| node.dyn_into::<Element>().ok()) {
                observer.observe(&element);
            }
        }

        Ok(Self {
            observer,
            _callback: callback,
        })
    }
}

impl Drop for RevealObserver {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}
