use log::Level;

use crate::player::{Dimension, PlayerConfig};

pub const EMBED_API_URL: &str = "https://www.youtube.com/iframe_api";

/// Header turns solid past this many pixels when the page has no hero.
pub const FALLBACK_SCROLL_THRESHOLD: f64 = 100.0;

/// Viewports at or below this width get the burger menu and click-to-open dropdowns.
pub const MOBILE_BREAKPOINT: f64 = 900.0;

pub const REVEAL_THRESHOLD: f64 = 0.1;

#[cfg(debug_assertions)]
pub fn log_level() -> Level {
    Level::Debug
}

#[cfg(not(debug_assertions))]
pub fn log_level() -> Level {
    Level::Info
}

#[derive(Clone, Debug, PartialEq)]
pub struct VideoSlot {
    /// Registry key page scripts use.
    pub key: &'static str,
    /// Id of the element the player mounts into.
    pub slot_id: &'static str,
    pub media_ref: &'static str,
    pub title: &'static str,
    pub config: PlayerConfig,
}

pub fn video_slots() -> Vec<VideoSlot> {
    let config = PlayerConfig {
        width: Dimension::Css("100%".to_string()),
        height: Dimension::Pixels(315),
        custom_overlay: true,
        ..PlayerConfig::default()
    };
    vec![
        VideoSlot {
            key: "player1",
            slot_id: "youtube-player-1",
            media_ref: "b8WcgMShfuQ",
            title: "Summer Kisses Live",
            config: config.clone(),
        },
        VideoSlot {
            key: "player2",
            slot_id: "youtube-player-2",
            media_ref: "dC6yphLwpsw",
            title: "Behind the Scenes",
            config,
        },
    ]
}

pub const INSTAGRAM_POSTS: &[&str] = &[
    "https://www.instagram.com/p/C4QZQYvPJ7H/embed",
    "https://www.instagram.com/p/C4QZQYvPJ7H/embed",
    "https://www.instagram.com/p/C4QZQYvPJ7H/embed",
];

#[derive(Clone, Debug, PartialEq)]
pub struct NavLink {
    pub label: &'static str,
    pub href: &'static str,
}

#[derive(Clone, Debug, PartialEq)]
pub struct NavItem {
    pub link: NavLink,
    pub children: Vec<NavLink>,
}

pub fn nav_items() -> Vec<NavItem> {
    let leaf = |label, href| NavItem {
        link: NavLink { label, href },
        children: Vec::new(),
    };
    vec![
        leaf("Home", "#home"),
        NavItem {
            link: NavLink { label: "Services", href: "#services" },
            children: vec![
                NavLink { label: "Live Shows", href: "#services" },
                NavLink { label: "Workshops", href: "#services" },
                NavLink { label: "Private Events", href: "#contact" },
            ],
        },
        NavItem {
            link: NavLink { label: "Work", href: "#work" },
            children: vec![
                NavLink { label: "Videos", href: "#videos" },
                NavLink { label: "Gallery", href: "#gallery" },
            ],
        },
        leaf("Instagram", "#instagram"),
        leaf("Contact", "#contact"),
    ]
}
