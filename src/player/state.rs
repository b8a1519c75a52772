//! View-model owned by the controller. The video element owns playback state;
//! everything here is a mirror of it or purely visual.

use crate::utils::format_time;

/// Transient icon flashed over the video after an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OsdKind {
    Play,
    Pause,
    VolumeUp,
    VolumeDown,
    Forward,
    Rewind,
}

impl OsdKind {
    pub const ALL: [OsdKind; 6] = [
        OsdKind::Play,
        OsdKind::Pause,
        OsdKind::VolumeUp,
        OsdKind::VolumeDown,
        OsdKind::Forward,
        OsdKind::Rewind,
    ];

    pub fn dom_id(self) -> &'static str {
        match self {
            OsdKind::Play => "osd-play",
            OsdKind::Pause => "osd-pause",
            OsdKind::VolumeUp => "osd-vol-up",
            OsdKind::VolumeDown => "osd-vol-down",
            OsdKind::Forward => "osd-forward",
            OsdKind::Rewind => "osd-rewind",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            OsdKind::Play => "play",
            OsdKind::Pause => "pause",
            OsdKind::VolumeUp => "volume-high",
            OsdKind::VolumeDown => "volume-low",
            OsdKind::Forward => "forward",
            OsdKind::Rewind => "rewind",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ControlsVisibility {
    #[default]
    Visible,
    Hidden,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerKind {
    Osd,
    Controls,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerToken(u64);

/// Holds at most one live timer. Arming again or cancelling bumps the
/// generation so any earlier token is stale when it fires.
#[derive(Debug, Clone, Default)]
pub struct TimerSlot {
    generation: u64,
    pending: bool,
}

impl TimerSlot {
    pub fn arm(&mut self) -> TimerToken {
        self.generation += 1;
        self.pending = true;
        TimerToken(self.generation)
    }

    pub fn cancel(&mut self) {
        self.generation += 1;
        self.pending = false;
    }

    pub fn is_live(&self, token: TimerToken) -> bool {
        self.pending && token.0 == self.generation
    }

    /// Consume the timer if `token` is the live one.
    pub fn fire(&mut self, token: TimerToken) -> bool {
        let live = self.is_live(token);
        if live {
            self.pending = false;
        }
        live
    }

    #[cfg(test)]
    fn is_pending(&self) -> bool {
        self.pending
    }
}

/// A timer the host must run: after `delay_ms`, call
/// [`UiState::expire`] with the same kind and token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Schedule {
    pub kind: TimerKind,
    pub token: TimerToken,
    pub delay_ms: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProgressView {
    pub played_pct: f64,
    pub buffered_pct: f64,
    pub current_label: String,
    pub duration_label: String,
}

impl Default for ProgressView {
    fn default() -> Self {
        Self {
            played_pct: 0.0,
            buffered_pct: 0.0,
            current_label: format_time(0.0),
            duration_label: format_time(0.0),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VolumeView {
    pub level: f64,
    pub muted: bool,
}

impl Default for VolumeView {
    fn default() -> Self {
        Self {
            level: 1.0,
            muted: false,
        }
    }
}

impl VolumeView {
    pub fn is_silent(&self) -> bool {
        self.muted || self.level <= 0.0
    }

    pub fn icon(&self) -> &'static str {
        if self.is_silent() {
            "volume-mute"
        } else {
            "volume-high"
        }
    }

    /// Value the range input should show.
    pub fn slider_value(&self) -> f64 {
        if self.muted {
            0.0
        } else {
            self.level
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HoverTip {
    pub left_pct: f64,
    pub label: String,
}

#[derive(Debug, Clone)]
pub struct UiState {
    /// Player section shown instead of the URL form.
    pub player_active: bool,
    /// Mirror of `!video.paused`, driven by native play/pause events.
    pub is_playing: bool,
    pub is_dragging: bool,
    pub osd: Option<OsdKind>,
    osd_timer: TimerSlot,
    pub controls: ControlsVisibility,
    controls_timer: TimerSlot,
    pub loading: bool,
    pub error: Option<String>,
    pub fullscreen: bool,
    pub settings_open: bool,
    pub playback_rate: f64,
    pub progress: ProgressView,
    pub volume: VolumeView,
    pub hover: Option<HoverTip>,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            player_active: false,
            is_playing: false,
            is_dragging: false,
            osd: None,
            osd_timer: TimerSlot::default(),
            controls: ControlsVisibility::Visible,
            controls_timer: TimerSlot::default(),
            loading: false,
            error: None,
            fullscreen: false,
            settings_open: false,
            playback_rate: 1.0,
            progress: ProgressView::default(),
            volume: VolumeView::default(),
            hover: None,
        }
    }
}

impl UiState {
    /// Replace the visible OSD icon and restart its hide timer.
    pub fn show_osd(&mut self, kind: OsdKind, delay_ms: u32) -> Schedule {
        self.osd = Some(kind);
        Schedule {
            kind: TimerKind::Osd,
            token: self.osd_timer.arm(),
            delay_ms,
        }
    }

    /// Pointer activity over the player: show controls and restart the countdown.
    pub fn reveal_controls(&mut self, delay_ms: u32) -> Schedule {
        self.controls = ControlsVisibility::Visible;
        Schedule {
            kind: TimerKind::Controls,
            token: self.controls_timer.arm(),
            delay_ms,
        }
    }

    /// Show controls with no countdown pending.
    pub fn pin_controls(&mut self) {
        self.controls = ControlsVisibility::Visible;
        self.controls_timer.cancel();
    }

    /// Whether firing `token` now would change anything.
    pub fn timer_is_live(&self, kind: TimerKind, token: TimerToken) -> bool {
        match kind {
            TimerKind::Osd => self.osd_timer.is_live(token),
            TimerKind::Controls => self.controls_timer.is_live(token),
        }
    }

    /// A scheduled timer elapsed. Stale tokens are ignored.
    pub fn expire(&mut self, kind: TimerKind, token: TimerToken) {
        match kind {
            TimerKind::Osd => {
                if self.osd_timer.fire(token) {
                    self.osd = None;
                }
            }
            TimerKind::Controls => {
                if self.controls_timer.fire(token) && self.is_playing {
                    self.controls = ControlsVisibility::Hidden;
                }
            }
        }
    }

    pub fn controls_visible(&self) -> bool {
        self.controls == ControlsVisibility::Visible
    }

    /// Drop everything tied to the current source.
    pub fn reset_playback(&mut self) {
        self.is_playing = false;
        self.is_dragging = false;
        self.loading = false;
        self.error = None;
        self.osd = None;
        self.osd_timer.cancel();
        self.pin_controls();
        self.progress = ProgressView::default();
        self.hover = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn retriggered_osd_survives_the_first_timeout() {
        let mut ui = UiState::default();
        let first = ui.show_osd(OsdKind::VolumeUp, 600);
        let second = ui.show_osd(OsdKind::Forward, 600);

        ui.expire(first.kind, first.token);
        assert_eq!(ui.osd, Some(OsdKind::Forward));

        ui.expire(second.kind, second.token);
        assert_eq!(ui.osd, None);
    }

    #[test]
    fn controls_hide_only_while_playing() {
        let mut ui = UiState::default();
        let paused = ui.reveal_controls(3000);
        ui.expire(paused.kind, paused.token);
        assert!(ui.controls_visible());

        ui.is_playing = true;
        let playing = ui.reveal_controls(3000);
        ui.expire(playing.kind, playing.token);
        assert_eq!(ui.controls, ControlsVisibility::Hidden);
    }

    #[test]
    fn pointer_activity_resets_the_countdown() {
        let mut ui = UiState {
            is_playing: true,
            ..UiState::default()
        };
        let stale = ui.reveal_controls(3000);
        let live = ui.reveal_controls(3000);

        ui.expire(stale.kind, stale.token);
        assert!(ui.controls_visible());
        assert!(ui.controls_timer.is_pending());

        ui.expire(live.kind, live.token);
        assert!(!ui.controls_visible());
    }

    #[test]
    fn pinned_controls_ignore_earlier_timers() {
        let mut ui = UiState {
            is_playing: true,
            ..UiState::default()
        };
        let pending = ui.reveal_controls(3000);
        ui.pin_controls();
        ui.expire(pending.kind, pending.token);
        assert!(ui.controls_visible());
        assert!(!ui.controls_timer.is_pending());
    }

    #[test]
    fn only_the_latest_token_is_live() {
        let mut ui = UiState::default();
        let first = ui.show_osd(OsdKind::Play, 600);
        assert!(ui.timer_is_live(first.kind, first.token));

        let second = ui.show_osd(OsdKind::Pause, 600);
        assert!(!ui.timer_is_live(first.kind, first.token));
        assert!(ui.timer_is_live(second.kind, second.token));

        ui.expire(second.kind, second.token);
        assert!(!ui.timer_is_live(second.kind, second.token));

        let hide = ui.reveal_controls(3000);
        ui.pin_controls();
        assert!(!ui.timer_is_live(hide.kind, hide.token));
    }

    #[test]
    fn timer_tokens_fire_once() {
        let mut slot = TimerSlot::default();
        let token = slot.arm();
        assert!(slot.fire(token));
        assert!(!slot.fire(token));
    }

    #[test]
    fn volume_view_reports_silence() {
        let muted = VolumeView {
            level: 0.7,
            muted: true,
        };
        assert_eq!(muted.icon(), "volume-mute");
        assert_eq!(muted.slider_value(), 0.0);

        let zero = VolumeView {
            level: 0.0,
            muted: false,
        };
        assert!(zero.is_silent());
        assert_eq!(VolumeView::default().icon(), "volume-high");
    }
}
