use std::rc::Rc;

use log::debug;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{window, Document, HtmlElement, MouseEvent};
use yew::prelude::*;

use crate::components::smooth_scroll::follow_anchor;
use crate::config::{self, NavItem};

#[derive(Clone, Debug, Default, PartialEq)]
pub struct MenuState {
    pub open: bool,
    /// Index of the dropdown expanded in the mobile menu.
    pub open_dropdown: Option<usize>,
}

pub enum MenuAction {
    Toggle,
    Close,
    ToggleDropdown(usize),
    Resized(f64),
}

impl Reducible for MenuState {
    type Action = MenuAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let next = match action {
            MenuAction::Toggle if self.open => MenuState::default(),
            MenuAction::Toggle => MenuState {
                open: true,
                open_dropdown: None,
            },
            MenuAction::Close => MenuState::default(),
            MenuAction::ToggleDropdown(index) => MenuState {
                open: self.open,
                open_dropdown: if self.open_dropdown == Some(index) {
                    None
                } else {
                    Some(index)
                },
            },
            MenuAction::Resized(width) if width > config::MOBILE_BREAKPOINT => MenuState::default(),
            MenuAction::Resized(_) => return self,
        };
        Rc::new(next)
    }
}

/// Scroll offset past which the header turns solid: the bottom of the hero
/// minus the header's own height, or a fixed offset when there is no hero.
pub fn header_threshold(hero: Option<(f64, f64)>, header_height: f64) -> f64 {
    match hero {
        Some((top, height)) => top + height - header_height,
        None => config::FALLBACK_SCROLL_THRESHOLD,
    }
}

fn html_element(document: &Document, selector: &str) -> Option<HtmlElement> {
    document
        .query_selector(selector)
        .ok()
        .flatten()
        .and_then(|element| element.dyn_into::<HtmlElement>().ok())
}

fn scroll_threshold(document: &Document) -> f64 {
    let hero = html_element(document, ".hero")
        .map(|hero| (hero.offset_top() as f64, hero.offset_height() as f64));
    let header_height = html_element(document, "header")
        .map_or(0.0, |header| header.offset_height() as f64);
    header_threshold(hero, header_height)
}

fn is_mobile_viewport() -> bool {
    window()
        .and_then(|window| window.inner_width().ok())
        .and_then(|width| width.as_f64())
        .map_or(false, |width| width <= config::MOBILE_BREAKPOINT)
}

#[derive(Properties, PartialEq)]
pub struct NavProps {
    pub items: Vec<NavItem>,
}

#[function_component(Nav)]
pub fn nav(props: &NavProps) -> Html {
    let menu = use_reducer(MenuState::default);
    let is_scrolled = use_state(|| false);

    {
        let is_scrolled = is_scrolled.clone();
        use_effect_with_deps(move |_| {
            let destructor: Box<dyn FnOnce()> = match window().and_then(|w| w.document().map(|d| (w, d))) {
                Some((window, document)) => {
                    let window_clone = window.clone();
                    let scroll_callback = Closure::wrap(Box::new(move || {
                        let scroll_y = window_clone.scroll_y().unwrap_or(0.0);
                        is_scrolled.set(scroll_y > scroll_threshold(&document));
                    }) as Box<dyn FnMut()>);

                    let _ = window.add_event_listener_with_callback("scroll", scroll_callback.as_ref().unchecked_ref());
                    // Initial check
                    let _ = scroll_callback.as_ref().unchecked_ref::<web_sys::js_sys::Function>().call0(&JsValue::NULL);

                    Box::new(move || {
                        let _ = window.remove_event_listener_with_callback("scroll", scroll_callback.as_ref().unchecked_ref());
                    })
                }
                None => Box::new(|| ()),
            };
            destructor
        }, ());
    }

    {
        let menu = menu.clone();
        use_effect_with_deps(move |_| {
            let destructor: Box<dyn FnOnce()> = match window() {
                Some(window) => {
                    let window_clone = window.clone();
                    let resize_callback = Closure::wrap(Box::new(move || {
                        if let Some(width) = window_clone.inner_width().ok().and_then(|w| w.as_f64()) {
                            menu.dispatch(MenuAction::Resized(width));
                        }
                    }) as Box<dyn FnMut()>);

                    let _ = window.add_event_listener_with_callback("resize", resize_callback.as_ref().unchecked_ref());

                    Box::new(move || {
                        let _ = window.remove_event_listener_with_callback("resize", resize_callback.as_ref().unchecked_ref());
                    })
                }
                None => Box::new(|| ()),
            };
            destructor
        }, ());
    }

    // body scroll lock while the mobile menu is open
    use_effect_with_deps(
        |open: &bool| {
            if let Some(body) = window().and_then(|w| w.document()).and_then(|d| d.body()) {
                let _ = body.class_list().toggle_with_force("menu-open", *open);
            }
            || ()
        },
        menu.open,
    );

    let toggle_menu = {
        let menu = menu.clone();
        Callback::from(move |e: MouseEvent| {
            e.prevent_default();
            menu.dispatch(MenuAction::Toggle);
        })
    };

    let close_menu = {
        let menu = menu.clone();
        Callback::from(move |_: MouseEvent| {
            menu.dispatch(MenuAction::Close);
        })
    };

    let follow_link = |href: &'static str| {
        let menu = menu.clone();
        Callback::from(move |e: MouseEvent| {
            follow_anchor(&e, href);
            menu.dispatch(MenuAction::Close);
        })
    };

    let render_item = |(index, item): (usize, &NavItem)| {
        if item.children.is_empty() {
            return html! {
                <li>
                    <a href={item.link.href} onclick={follow_link(item.link.href)}>{item.link.label}</a>
                </li>
            };
        }

        let href = item.link.href;
        let on_dropdown = {
            let menu = menu.clone();
            Callback::from(move |e: MouseEvent| {
                if is_mobile_viewport() {
                    e.prevent_default();
                    e.stop_propagation();
                    debug!("Toggling dropdown {}", index);
                    menu.dispatch(MenuAction::ToggleDropdown(index));
                } else {
                    follow_anchor(&e, href);
                }
            })
        };
        let expanded = menu.open_dropdown == Some(index);

        html! {
            <li class={classes!("dropdown", expanded.then(|| "active"))}>
                <a href={href} onclick={on_dropdown}>
                    {item.link.label}
                    <i class="fas fa-chevron-down"></i>
                </a>
                <ul class="dropdown-menu">
                    { for item.children.iter().map(|child| html! {
                        <li>
                            <a href={child.href} onclick={follow_link(child.href)}>{child.label}</a>
                        </li>
                    }) }
                </ul>
            </li>
        }
    };

    html! {
        <header class={classes!((*is_scrolled).then(|| "scrolled"))}>
            <nav class="nav-content">
                <a href="#home" class="logo" onclick={follow_link("#home")}>
                    {"Summer Kisses"}
                </a>
                <button
                    class={classes!("menu-toggle", menu.open.then(|| "active"))}
                    aria-expanded={menu.open.to_string()}
                    aria-label="Toggle navigation"
                    onclick={toggle_menu}
                >
                    <span></span>
                    <span></span>
                    <span></span>
                </button>
                <ul class={classes!("nav-links", menu.open.then(|| "active"))}>
                    { for props.items.iter().enumerate().map(render_item) }
                </ul>
            </nav>
            <div class={classes!("menu-overlay", menu.open.then(|| "active"))} onclick={close_menu}></div>
        </header>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reduce(state: MenuState, action: MenuAction) -> MenuState {
        (*Rc::new(state).reduce(action)).clone()
    }

    #[test]
    fn toggle_opens_and_closing_resets_dropdowns() {
        let open = reduce(MenuState::default(), MenuAction::Toggle);
        assert!(open.open);

        let with_dropdown = reduce(open, MenuAction::ToggleDropdown(1));
        assert_eq!(with_dropdown.open_dropdown, Some(1));

        assert_eq!(reduce(with_dropdown, MenuAction::Toggle), MenuState::default());
    }

    #[test]
    fn opening_a_dropdown_closes_the_others() {
        let state = MenuState {
            open: true,
            open_dropdown: Some(1),
        };
        let state = reduce(state, MenuAction::ToggleDropdown(2));
        assert_eq!(state.open_dropdown, Some(2));
        let state = reduce(state, MenuAction::ToggleDropdown(2));
        assert_eq!(state.open_dropdown, None);
        assert!(state.open);
    }

    #[test]
    fn close_resets_everything() {
        let state = MenuState {
            open: true,
            open_dropdown: Some(0),
        };
        assert_eq!(reduce(state, MenuAction::Close), MenuState::default());
    }

    #[test]
    fn resize_past_breakpoint_closes_menu() {
        let state = MenuState {
            open: true,
            open_dropdown: Some(1),
        };
        assert_eq!(reduce(state.clone(), MenuAction::Resized(600.0)), state);
        assert_eq!(reduce(state.clone(), MenuAction::Resized(900.0)), state);
        assert_eq!(reduce(state, MenuAction::Resized(1200.0)), MenuState::default());
    }

    #[test]
    fn threshold_follows_hero_bottom() {
        assert_eq!(header_threshold(Some((0.0, 700.0)), 80.0), 620.0);
        assert_eq!(header_threshold(Some((64.0, 500.0)), 64.0), 500.0);
    }

    #[test]
    fn threshold_falls_back_without_hero() {
        assert_eq!(header_threshold(None, 80.0), config::FALLBACK_SCROLL_THRESHOLD);
    }
}
