use thiserror::Error;
use wasm_bindgen::JsValue;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PlayerError {
    /// The slot element is not on the page.
    #[error("Container with id \"{0}\" not found")]
    MissingMount(String),

    #[error("Embed runtime unavailable")]
    RuntimeUnavailable,

    #[error("Embed error: {0}")]
    Embed(String),

    #[error("DOM error: {0}")]
    Dom(String),
}

impl PlayerError {
    pub fn embed(err: JsValue) -> Self {
        Self::Embed(format!("{:?}", err))
    }

    pub fn dom(err: JsValue) -> Self {
        Self::Dom(format!("{:?}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_mount_names_the_slot() {
        let err = PlayerError::MissingMount("youtube-player-3".to_string());
        assert_eq!(err.to_string(), "Container with id \"youtube-player-3\" not found");
    }

    #[test]
    fn runtime_unavailable_reads_as_a_deferral_reason() {
        assert_eq!(PlayerError::RuntimeUnavailable.to_string(), "Embed runtime unavailable");
    }
}
