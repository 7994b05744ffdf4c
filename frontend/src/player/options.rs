use serde::{Deserialize, Serialize};

/// Width or height of the embed: pixels, or any CSS length such as `"100%"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Dimension {
    Pixels(u32),
    Css(String),
}

/// Per-slot player configuration. Every key is optional when deserialized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PlayerConfig {
    pub width: Dimension,
    pub height: Dimension,
    pub autoplay: bool,
    pub native_controls: bool,
    pub minimal_branding: bool,
    pub suppress_related: bool,
    pub custom_overlay: bool,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            width: Dimension::Pixels(560),
            height: Dimension::Pixels(315),
            autoplay: false,
            native_controls: true,
            minimal_branding: true,
            suppress_related: true,
            custom_overlay: false,
        }
    }
}

impl PlayerConfig {
    pub fn player_vars(&self) -> PlayerVars {
        PlayerVars {
            autoplay: self.autoplay as u8,
            // native controls stay hidden under the custom overlay
            controls: (self.native_controls && !self.custom_overlay) as u8,
            modestbranding: self.minimal_branding as u8,
            rel: (!self.suppress_related) as u8,
            showinfo: 0,
            fs: 1,
            iv_load_policy: 3,
            cc_load_policy: 0,
            playsinline: 1,
        }
    }
}

/// `playerVars` object handed to the embed constructor.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerVars {
    pub autoplay: u8,
    pub controls: u8,
    pub modestbranding: u8,
    pub rel: u8,
    pub showinfo: u8,
    pub fs: u8,
    pub iv_load_policy: u8,
    pub cc_load_policy: u8,
    pub playsinline: u8,
}

/// Options object for the embed constructor, minus the event callbacks.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmbedOptions<'a> {
    pub width: &'a Dimension,
    pub height: &'a Dimension,
    pub video_id: &'a str,
    pub player_vars: PlayerVars,
}

impl<'a> EmbedOptions<'a> {
    pub fn new(media_ref: &'a str, config: &'a PlayerConfig) -> Self {
        Self {
            width: &config.width,
            height: &config.height,
            video_id: media_ref,
            player_vars: config.player_vars(),
        }
    }
}
