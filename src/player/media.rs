//! Seams between the controller and the browser: the video element and the
//! document-level viewport APIs (fullscreen, picture-in-picture).

use crate::error::PlayerError;

/// Where the video element should get its data from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MediaSource {
    /// Assigned straight to `video.src`.
    Direct(String),
    /// Adaptive-streaming manifest, handed to HLS.js when the page has it.
    Adaptive(String),
}

impl MediaSource {
    pub fn url(&self) -> &str {
        match self {
            MediaSource::Direct(url) | MediaSource::Adaptive(url) => url,
        }
    }
}

/// Native notifications the controller mirrors into the view-model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaEvent {
    Play,
    Pause,
    TimeUpdate,
    Progress,
    Waiting,
    CanPlay,
    LoadedMetadata,
    Error,
}

/// Playback state lives here, not in the controller. Methods take `&self`
/// because the underlying element is a shared browser handle.
pub trait MediaElement {
    fn paused(&self) -> bool;
    /// Start playback. A rejected play request is logged and dropped.
    fn play(&self);
    fn pause(&self);
    fn current_time(&self) -> f64;
    fn set_current_time(&self, seconds: f64);
    /// `NaN` until metadata has loaded.
    fn duration(&self) -> f64;
    fn volume(&self) -> f64;
    fn set_volume(&self, level: f64);
    fn muted(&self) -> bool;
    fn set_muted(&self, muted: bool);
    fn set_playback_rate(&self, rate: f64);
    /// End of the last buffered range, if anything is buffered.
    fn buffered_end(&self) -> Option<f64>;
    fn error_code(&self) -> Option<u16>;
    /// Point the element at `source`. Adaptive sources without the streaming
    /// library present fall back to direct assignment.
    fn attach(&self, source: &MediaSource) -> Result<(), PlayerError>;
    fn load(&self);
    /// Remove the current source and tear down any streaming instance.
    fn detach(&self);
}

pub trait Viewport {
    fn is_fullscreen(&self) -> bool;
    fn enter_fullscreen(&self) -> Result<(), PlayerError>;
    fn exit_fullscreen(&self) -> Result<(), PlayerError>;
    /// Enter or leave picture-in-picture without waiting on the result.
    fn toggle_picture_in_picture(&self);
}
