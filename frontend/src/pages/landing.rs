use log::{debug, warn};
use wasm_bindgen::JsCast;
use web_sys::js_sys::{Function, Reflect};
use web_sys::window;
use yew::prelude::*;

use crate::components::reveal::{RevealObserver, REVEAL_RULES};
use crate::components::smooth_scroll::follow_anchor;
use crate::components::video_player::VideoPlayer;
use crate::config;

/// `window.instgrm.Embeds.process()`, when the embed script has loaded.
fn process_instagram_embeds() {
    let Some(window) = window() else {
        return;
    };
    let process = Reflect::get(&window, &"instgrm".into())
        .ok()
        .filter(|instgrm| !instgrm.is_undefined())
        .and_then(|instgrm| Reflect::get(&instgrm, &"Embeds".into()).ok())
        .filter(|embeds| !embeds.is_undefined())
        .and_then(|embeds| {
            let process = Reflect::get(&embeds, &"process".into()).ok()?;
            Some((embeds, process.dyn_into::<Function>().ok()?))
        });

    match process {
        Some((embeds, process)) => {
            if let Err(err) = process.call0(&embeds) {
                warn!("Instagram embed processing failed: {:?}", err);
            }
        }
        None => debug!("Instagram embed script not present"),
    }
}

struct Service {
    icon: &'static str,
    title: &'static str,
    text: &'static str,
}

const SERVICES: &[Service] = &[
    Service {
        icon: "fas fa-music",
        title: "Live Shows",
        text: "Full band sets for festivals, clubs and summer stages.",
    },
    Service {
        icon: "fas fa-guitar",
        title: "Workshops",
        text: "Songwriting and ensemble sessions for schools and studios.",
    },
    Service {
        icon: "fas fa-glass-cheers",
        title: "Private Events",
        text: "Weddings, launches and parties with a tailored setlist.",
    },
];

const WORK: &[(&str, &str)] = &[
    ("Seaside Tour", "Twelve nights along the coast."),
    ("Golden Hour EP", "Recorded live to tape in one weekend."),
    ("Festival Season", "Main stage sets across three countries."),
];

const GALLERY_SIZE: usize = 6;

#[function_component(Landing)]
pub fn landing() -> Html {
    // Scroll to top only on initial mount
    use_effect_with_deps(
        move |_| {
            if let Some(window) = window() {
                window.scroll_to_with_x_and_y(0.0, 0.0);
            }
            || ()
        },
        (),
    );

    use_effect_with_deps(
        move |_| {
            let observers: Vec<RevealObserver> = REVEAL_RULES
                .iter()
                .filter_map(|rule| match RevealObserver::observe(*rule) {
                    Ok(observer) => Some(observer),
                    Err(err) => {
                        warn!("Could not observe {}: {:?}", rule.selector, err);
                        None
                    }
                })
                .collect();
            process_instagram_embeds();
            move || drop(observers)
        },
        (),
    );

    let anchor = |href: &'static str| Callback::from(move |e: MouseEvent| follow_anchor(&e, href));

    html! {
        <div class="landing-page">
            <section id="home" class="hero">
                <div class="hero-content">
                    <h1>{"Summer Kisses"}</h1>
                    <p class="hero-subtitle">{"Sunlit songs, live on stage and on screen."}</p>
                    <a href="#videos" class="hero-cta" onclick={anchor("#videos")}>{"Watch Us Play"}</a>
                </div>
            </section>

            <section id="services" class="services">
                <h2>{"Services"}</h2>
                <div class="services-grid">
                    { for SERVICES.iter().map(|service| html! {
                        <div class="service-card">
                            <i class={service.icon}></i>
                            <h3>{service.title}</h3>
                            <p>{service.text}</p>
                        </div>
                    }) }
                </div>
            </section>

            <section id="work" class="work">
                <h2>{"Work"}</h2>
                <div class="work-grid">
                    { for WORK.iter().map(|(title, text)| html! {
                        <div class="work-item">
                            <h3>{*title}</h3>
                            <p>{*text}</p>
                        </div>
                    }) }
                </div>
            </section>

            <section id="videos" class="videos">
                <h2>{"Videos"}</h2>
                <div class="video-grid">
                    { for config::video_slots().into_iter().map(|slot| {
                        let key = slot.key;
                        html! { <VideoPlayer key={key} slot={slot} /> }
                    }) }
                </div>
            </section>

            <section id="gallery" class="body004">
                <h2>{"Gallery"}</h2>
                <div class="image-grid">
                    { for (1..=GALLERY_SIZE).map(|n| html! {
                        <div class="image-item">
                            <img src={format!("/assets/gallery/{}.jpg", n)} alt={format!("Gallery photo {}", n)} loading="lazy" />
                        </div>
                    }) }
                </div>
            </section>

            <section id="instagram" class="instagram">
                <h2>{"Instagram"}</h2>
                <div class="instagram-grid">
                    { for config::INSTAGRAM_POSTS.iter().map(|permalink| html! {
                        <blockquote
                            class="instagram-media"
                            data-instgrm-permalink={*permalink}
                            data-instgrm-version="14"
                        ></blockquote>
                    }) }
                </div>
            </section>

            <section id="contact" class="contact">
                <h2>{"Contact"}</h2>
                <p>{"Booking and press: "}<a href="mailto:hello@summerkisses.band">{"hello@summerkisses.band"}</a></p>
            </section>

            <style>
                {r#"
                    header {
                        position: fixed;
                        top: 0;
                        left: 0;
                        right: 0;
                        z-index: 100;
                        background: transparent;
                        transition: background 0.3s ease;
                    }
                    header.scrolled {
                        background: rgba(20, 20, 20, 0.95);
                        box-shadow: 0 2px 10px rgba(0, 0, 0, 0.3);
                    }
                    .nav-content {
                        display: flex;
                        justify-content: space-between;
                        align-items: center;
                        padding: 1rem 2rem;
                    }
                    .nav-links {
                        display: flex;
                        gap: 1.5rem;
                        list-style: none;
                    }
                    .dropdown {
                        position: relative;
                    }
                    .dropdown-menu {
                        display: none;
                        position: absolute;
                        list-style: none;
                    }
                    .menu-toggle {
                        display: none;
                        background: none;
                        border: none;
                    }
                    .menu-overlay {
                        display: none;
                    }

                    @media (min-width: 901px) {
                        .dropdown:hover .dropdown-menu {
                            display: block;
                        }
                    }

                    @media (max-width: 900px) {
                        .menu-toggle {
                            display: block;
                        }
                        .nav-links {
                            position: fixed;
                            top: 0;
                            right: -100%;
                            height: 100vh;
                            flex-direction: column;
                            transition: right 0.3s ease;
                        }
                        .nav-links.active {
                            right: 0;
                        }
                        .dropdown.active .dropdown-menu {
                            display: block;
                            position: static;
                        }
                        .menu-overlay.active {
                            display: block;
                            position: fixed;
                            inset: 0;
                            background: rgba(0, 0, 0, 0.5);
                        }
                    }

                    body.menu-open {
                        overflow: hidden;
                    }

                    .service-card, .work-item {
                        opacity: 0;
                        transform: translateY(20px);
                        transition: opacity 0.6s ease, transform 0.6s ease;
                    }
                    .service-card.animate, .work-item.animate {
                        opacity: 1;
                        transform: translateY(0);
                    }
                    .body004 .image-item {
                        opacity: 0;
                        transition: opacity 0.8s ease;
                    }
                    .body004 .image-item.visible {
                        opacity: 1;
                    }

                    .video-container {
                        position: relative;
                    }
                    .controls-overlay {
                        position: absolute;
                        left: 0;
                        right: 0;
                        bottom: 0;
                        padding: 0.5rem;
                        background: linear-gradient(transparent, rgba(0, 0, 0, 0.7));
                        color: #fff;
                    }
                    .top-controls {
                        display: flex;
                        align-items: center;
                        gap: 0.75rem;
                    }
                    .play-pause-btn {
                        cursor: pointer;
                    }
                    .progress-bar {
                        height: 6px;
                        margin-top: 0.5rem;
                        background: rgba(255, 255, 255, 0.3);
                        cursor: pointer;
                    }
                    .progress-fill {
                        height: 100%;
                        width: 0%;
                        background: #ff6b6b;
                    }
                    .video-error {
                        color: #ff6b6b;
                    }
                "#}
            </style>
        </div>
    }
}
