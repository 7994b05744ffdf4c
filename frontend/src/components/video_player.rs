use log::info;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::js_sys::Reflect;
use web_sys::{window, CustomEvent, Event};
use yew::prelude::*;

use crate::config::VideoSlot;
use crate::player::{registry, web};

#[derive(Properties, PartialEq)]
pub struct VideoPlayerProps {
    pub slot: VideoSlot,
}

/// `instance` field of a player event's detail.
fn event_instance(event: &Event) -> Option<String> {
    let detail = event.dyn_ref::<CustomEvent>()?.detail();
    Reflect::get(&detail, &"instance".into()).ok()?.as_string()
}

/// Mount point for one embedded player. The controller lives in the
/// registry for as long as the component is mounted.
#[function_component(VideoPlayer)]
pub fn video_player(props: &VideoPlayerProps) -> Html {
    let failed = use_state(|| false);

    use_effect_with_deps(
        |slot: &VideoSlot| {
            let key = slot.key;
            registry::register(key, web::mount(slot.slot_id, slot.media_ref, slot.config.clone()));
            move || {
                info!("Unmounting player {}", key);
                registry::unregister(key);
            }
        },
        props.slot.clone(),
    );

    {
        let failed = failed.clone();
        let slot_id = props.slot.slot_id;
        use_effect_with_deps(move |_| {
            let destructor: Box<dyn FnOnce()> = match window().and_then(|w| w.document()) {
                Some(document) => {
                    let on_error = Closure::wrap(Box::new(move |event: Event| {
                        if event_instance(&event).as_deref() == Some(slot_id) {
                            failed.set(true);
                        }
                    }) as Box<dyn FnMut(Event)>);

                    let _ = document.add_event_listener_with_callback("playerError", on_error.as_ref().unchecked_ref());

                    Box::new(move || {
                        let _ = document.remove_event_listener_with_callback("playerError", on_error.as_ref().unchecked_ref());
                    })
                }
                None => Box::new(|| ()),
            };
            destructor
        }, ());
    }

    html! {
        <div class="video-item">
            <h3>{props.slot.title}</h3>
            <div id={props.slot.slot_id} class="video-container"></div>
            {
                if *failed {
                    html! { <p class="video-error">{"This video can't be played right now."}</p> }
                } else {
                    html! {}
                }
            }
        </div>
    }
}
