//! Player operations: user intent in, element commands and view-model
//! updates out. Timers are returned as [`Schedule`]s for the host to run.

use dioxus::logger::tracing::{debug, info, warn};

use super::media::{MediaElement, MediaEvent, MediaSource, Viewport};
use super::state::{HoverTip, OsdKind, Schedule, UiState};
use crate::config::PlayerConfig;
use crate::error::PlayerError;
use crate::utils::{format_time, resolve_source};

/// Keyboard surface of the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shortcut {
    TogglePlay,
    Fullscreen,
    Mute,
    SeekForward,
    SeekBackward,
    VolumeUp,
    VolumeDown,
}

impl Shortcut {
    /// Map a `KeyboardEvent.key` value. Letters match in either case.
    pub fn from_key(key: &str) -> Option<Self> {
        match key.to_ascii_lowercase().as_str() {
            " " | "k" => Some(Shortcut::TogglePlay),
            "f" => Some(Shortcut::Fullscreen),
            "m" => Some(Shortcut::Mute),
            "arrowright" => Some(Shortcut::SeekForward),
            "arrowleft" => Some(Shortcut::SeekBackward),
            "arrowup" => Some(Shortcut::VolumeUp),
            "arrowdown" => Some(Shortcut::VolumeDown),
            _ => None,
        }
    }

    /// Keys whose browser default (page scroll) must be cancelled.
    pub fn suppresses_default(self) -> bool {
        matches!(
            self,
            Shortcut::TogglePlay | Shortcut::VolumeUp | Shortcut::VolumeDown
        )
    }
}

/// Document-level input forwarded from listeners outside the component tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentEvent {
    Key(Shortcut),
    /// The browser entered or left fullscreen, possibly on its own (Escape).
    FullscreenChange,
}

fn usable_duration(duration: f64) -> Option<f64> {
    (duration.is_finite() && duration > 0.0).then_some(duration)
}

fn clamp_volume(level: f64) -> f64 {
    (level.clamp(0.0, 1.0) * 100.0).round() / 100.0
}

pub struct Controller<'a> {
    ui: &'a mut UiState,
    media: &'a dyn MediaElement,
    viewport: &'a dyn Viewport,
    config: &'a PlayerConfig,
}

impl<'a> Controller<'a> {
    pub fn new(
        ui: &'a mut UiState,
        media: &'a dyn MediaElement,
        viewport: &'a dyn Viewport,
        config: &'a PlayerConfig,
    ) -> Self {
        Self {
            ui,
            media,
            viewport,
            config,
        }
    }

    /// Resolve the typed URL, attach it and start playback.
    pub fn load_video(&mut self, input: &str, use_proxy: bool) -> Result<MediaSource, PlayerError> {
        let source = resolve_source(
            input,
            use_proxy,
            &self.config.proxy_endpoint,
            &self.config.adaptive_marker,
        )
        .ok_or(PlayerError::EmptyInput)?;

        info!("loading {}", source.url());
        self.ui.reset_playback();
        self.ui.player_active = true;
        self.ui.settings_open = false;

        if let Err(e) = self.media.attach(&source) {
            warn!("{e}, assigning source directly");
            let direct = MediaSource::Direct(source.url().to_string());
            self.media.attach(&direct)?;
        }
        self.media.load();
        self.media.set_playback_rate(self.ui.playback_rate);
        self.media.play();
        Ok(source)
    }

    /// Leave the player and go back to the URL form.
    pub fn go_home(&mut self) {
        info!("closing player");
        self.media.pause();
        self.media.detach();
        self.ui.reset_playback();
        self.ui.player_active = false;
        self.ui.settings_open = false;
    }

    pub fn toggle_play(&mut self) {
        if self.media.paused() {
            self.media.play();
        } else {
            self.media.pause();
        }
    }

    /// Jump to `fraction` of the duration. No-op before metadata loads.
    pub fn seek_to_fraction(&mut self, fraction: f64) -> bool {
        let Some(duration) = usable_duration(self.media.duration()) else {
            return false;
        };
        if !fraction.is_finite() {
            return false;
        }
        self.media
            .set_current_time(fraction.clamp(0.0, 1.0) * duration);
        self.update_progress();
        true
    }

    pub fn begin_drag(&mut self, fraction: f64) {
        self.ui.is_dragging = true;
        self.seek_to_fraction(fraction);
    }

    pub fn drag_to(&mut self, fraction: f64) {
        if self.ui.is_dragging {
            self.seek_to_fraction(fraction);
        }
    }

    pub fn end_drag(&mut self) {
        self.ui.is_dragging = false;
    }

    pub fn hover_progress(&mut self, fraction: f64) {
        let duration = self.media.duration();
        self.ui.hover = Some(HoverTip {
            left_pct: fraction * 100.0,
            label: format_time(fraction * duration),
        });
    }

    /// Relative seek, kept inside the known duration.
    pub fn seek_by(&mut self, delta_secs: f64) -> Schedule {
        let target = self.media.current_time() + delta_secs;
        let target = match usable_duration(self.media.duration()) {
            Some(duration) => target.clamp(0.0, duration),
            None => target.max(0.0),
        };
        self.media.set_current_time(target);
        self.update_progress();
        let kind = if delta_secs >= 0.0 {
            OsdKind::Forward
        } else {
            OsdKind::Rewind
        };
        self.show_osd(kind)
    }

    pub fn toggle_mute(&mut self) -> Schedule {
        let muted = !self.media.muted();
        self.media.set_muted(muted);
        self.sync_volume();
        self.show_osd(if muted {
            OsdKind::VolumeDown
        } else {
            OsdKind::VolumeUp
        })
    }

    pub fn adjust_volume(&mut self, delta: f64) -> Schedule {
        let level = clamp_volume(self.media.volume() + delta);
        self.media.set_volume(level);
        self.sync_volume();
        self.show_osd(if delta > 0.0 {
            OsdKind::VolumeUp
        } else {
            OsdKind::VolumeDown
        })
    }

    /// Range input moved. Dragging the slider always unmutes.
    pub fn set_volume_from_slider(&mut self, value: f64) -> Option<Schedule> {
        if !value.is_finite() {
            return None;
        }
        let level = value.clamp(0.0, 1.0);
        self.media.set_volume(level);
        self.media.set_muted(false);
        self.sync_volume();
        Some(self.show_osd(if level > 0.5 {
            OsdKind::VolumeUp
        } else {
            OsdKind::VolumeDown
        }))
    }

    fn sync_volume(&mut self) {
        self.ui.volume.level = self.media.volume();
        self.ui.volume.muted = self.media.muted();
    }

    pub fn toggle_fullscreen(&mut self) {
        let result = if self.viewport.is_fullscreen() {
            self.viewport.exit_fullscreen().map(|_| false)
        } else {
            self.viewport.enter_fullscreen().map(|_| true)
        };
        match result {
            Ok(fullscreen) => self.ui.fullscreen = fullscreen,
            Err(e) => warn!("{e}"),
        }
    }

    /// Mirror whatever fullscreen state the document reports now.
    pub fn sync_fullscreen(&mut self) {
        self.ui.fullscreen = self.viewport.is_fullscreen();
    }

    pub fn toggle_picture_in_picture(&mut self) {
        self.viewport.toggle_picture_in_picture();
    }

    pub fn set_playback_rate(&mut self, rate: f64) {
        if !rate.is_finite() || rate <= 0.0 {
            return;
        }
        self.media.set_playback_rate(rate);
        self.ui.playback_rate = rate;
    }

    pub fn show_osd(&mut self, kind: OsdKind) -> Schedule {
        self.ui.show_osd(kind, self.config.osd_hide_ms)
    }

    pub fn update_progress(&mut self) {
        let Some(duration) = usable_duration(self.media.duration()) else {
            return;
        };
        let current = self.media.current_time();
        self.ui.progress.played_pct = (current / duration * 100.0).clamp(0.0, 100.0);
        self.ui.progress.current_label = format_time(current);
    }

    pub fn update_buffer(&mut self) {
        let Some(duration) = usable_duration(self.media.duration()) else {
            return;
        };
        if let Some(end) = self.media.buffered_end() {
            self.ui.progress.buffered_pct = (end / duration * 100.0).clamp(0.0, 100.0);
        }
    }

    pub fn handle_media_event(&mut self, event: MediaEvent) -> Option<Schedule> {
        match event {
            MediaEvent::Play => {
                self.ui.is_playing = true;
                self.ui.loading = false;
                Some(self.show_osd(OsdKind::Play))
            }
            MediaEvent::Pause => {
                self.ui.is_playing = false;
                self.ui.pin_controls();
                Some(self.show_osd(OsdKind::Pause))
            }
            MediaEvent::TimeUpdate => {
                self.update_progress();
                None
            }
            MediaEvent::Progress => {
                self.update_buffer();
                None
            }
            MediaEvent::Waiting => {
                self.ui.loading = true;
                None
            }
            MediaEvent::CanPlay => {
                self.ui.loading = false;
                self.ui.error = None;
                None
            }
            MediaEvent::LoadedMetadata => {
                self.ui.progress.duration_label = format_time(self.media.duration());
                self.sync_volume();
                None
            }
            MediaEvent::Error => {
                let err = PlayerError::Media {
                    code: self.media.error_code().unwrap_or(0),
                };
                warn!("{err}");
                self.ui.loading = false;
                self.ui.error = Some(err.overlay_message());
                None
            }
        }
    }

    /// Keys only act on the player once a source is loaded.
    pub fn handle_shortcut(&mut self, shortcut: Shortcut) -> Option<Schedule> {
        if !self.ui.player_active {
            return None;
        }
        debug!(?shortcut, "shortcut");
        match shortcut {
            Shortcut::TogglePlay => {
                self.toggle_play();
                None
            }
            Shortcut::Fullscreen => {
                self.toggle_fullscreen();
                None
            }
            Shortcut::Mute => Some(self.toggle_mute()),
            Shortcut::SeekForward => Some(self.seek_by(self.config.seek_step_secs)),
            Shortcut::SeekBackward => Some(self.seek_by(-self.config.seek_step_secs)),
            Shortcut::VolumeUp => Some(self.adjust_volume(self.config.volume_step)),
            Shortcut::VolumeDown => Some(self.adjust_volume(-self.config.volume_step)),
        }
    }

    pub fn handle_document_event(&mut self, event: DocumentEvent) -> Option<Schedule> {
        match event {
            DocumentEvent::Key(shortcut) => self.handle_shortcut(shortcut),
            DocumentEvent::FullscreenChange => {
                self.sync_fullscreen();
                None
            }
        }
    }
}
