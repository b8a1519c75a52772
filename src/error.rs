//! Error type shared by the player controller and its browser bindings.

/// Failures raised while driving the video element or the document around it.
///
/// None of these ever reach the user as a crash: the controller either logs
/// them or turns them into the error overlay.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PlayerError {
    #[error("no URL was entered")]
    EmptyInput,
    #[error("video element is not mounted")]
    MediaUnavailable,
    #[error("media error (code {code})")]
    Media { code: u16 },
    #[error("adaptive stream attach failed: {0}")]
    Adaptive(String),
    #[error("fullscreen request failed: {0}")]
    Fullscreen(String),
    #[error("invalid player config: {0}")]
    Config(String),
}

impl PlayerError {
    /// Message shown on the error overlay.
    pub fn overlay_message(&self) -> String {
        match self {
            PlayerError::Media { code } => media_error_message(*code).to_string(),
            other => other.to_string(),
        }
    }
}

/// Map a native `MediaError.code` onto something a viewer can act on.
pub fn media_error_message(code: u16) -> &'static str {
    match code {
        1 => "Playback was aborted before the stream loaded.",
        2 => "Network error while loading this video.",
        3 => "Video playback failed due to a decode error.",
        4 => "Failed to load video because no supported source was found.",
        _ => "Unable to load this video source.",
    }
}

#[cfg(target_arch = "wasm32")]
pub(crate) fn js_error_text(value: &wasm_bindgen::JsValue) -> String {
    value
        .as_string()
        .or_else(|| {
            js_sys::Reflect::get(value, &"message".into())
                .ok()
                .and_then(|message| message.as_string())
        })
        .unwrap_or_else(|| format!("{value:?}"))
}
