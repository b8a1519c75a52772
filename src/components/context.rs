use crate::config::{load_config, PlayerConfig};
use crate::error::PlayerError;
use crate::player::web::with_browser;
use crate::player::{
    Controller, DocumentEvent, MediaEvent, Schedule, TimerKind, TimerToken, UiState,
};
use dioxus::logger::tracing::{debug, warn};
use dioxus::core::Task;
use dioxus::prelude::*;

/// Application context: built once by the shell and shared with every
/// player component. All handles are signals, so the struct is `Copy`.
#[derive(Clone, Copy)]
pub struct PlayerContext {
    pub ui: Signal<UiState>,
    pub config: Signal<PlayerConfig>,
    pub url_input: Signal<String>,
    pub use_proxy: Signal<bool>,
    #[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
    timers: Signal<TimerTasks>,
}

/// The one spawned countdown per timer kind, tagged with the token it will fire.
#[derive(Clone, Copy, Default)]
#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
struct TimerTasks {
    osd: Option<(TimerToken, Task)>,
    controls: Option<(TimerToken, Task)>,
}

#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
impl TimerTasks {
    fn slot(&mut self, kind: TimerKind) -> &mut Option<(TimerToken, Task)> {
        match kind {
            TimerKind::Osd => &mut self.osd,
            TimerKind::Controls => &mut self.controls,
        }
    }

    /// Store `task` as the live countdown, handing back the one it supersedes.
    fn replace(&mut self, kind: TimerKind, token: TimerToken, task: Task) -> Option<Task> {
        self.slot(kind)
            .replace((token, task))
            .map(|(_, previous)| previous)
    }

    /// Forget the countdown for `token` once it has run.
    fn finish(&mut self, kind: TimerKind, token: TimerToken) {
        let slot = self.slot(kind);
        if matches!(slot, Some((live, _)) if *live == token) {
            *slot = None;
        }
    }
}

/// Create the context for this component subtree.
pub fn use_player_context_provider() -> PlayerContext {
    let ui = use_signal(UiState::default);
    let config = use_signal(load_config);
    let url_input = use_signal(String::new);
    let use_proxy = use_signal(|| false);
    let timers = use_signal(TimerTasks::default);
    use_context_provider(|| PlayerContext {
        ui,
        config,
        url_input,
        use_proxy,
        timers,
    })
}

pub fn use_player() -> PlayerContext {
    use_context::<PlayerContext>()
}

impl PlayerContext {
    /// Run a controller operation against the mounted video element.
    fn with_controller<R>(&self, f: impl FnOnce(&mut Controller) -> R) -> Option<R> {
        let mut ui_signal = self.ui;
        let config = self.config.peek();
        with_browser(|media, viewport| {
            let mut ui = ui_signal.write();
            let mut controller = Controller::new(&mut ui, media, viewport, &config);
            f(&mut controller)
        })
    }

    /// Run a timer the controller asked for, cancelling the countdown it
    /// replaces. Dropping a `TimeoutFuture` clears the browser timeout.
    fn dispatch(&self, schedule: Option<Schedule>) {
        let Some(schedule) = schedule else {
            return;
        };
        debug!(kind = ?schedule.kind, delay_ms = schedule.delay_ms, "timer armed");
        #[cfg(target_arch = "wasm32")]
        {
            let mut ui = self.ui;
            let mut timers = self.timers;
            let task = spawn(async move {
                gloo_timers::future::TimeoutFuture::new(schedule.delay_ms).await;
                timers.write().finish(schedule.kind, schedule.token);
                if ui.peek().timer_is_live(schedule.kind, schedule.token) {
                    ui.write().expire(schedule.kind, schedule.token);
                }
            });
            let previous = timers
                .write()
                .replace(schedule.kind, schedule.token, task);
            if let Some(previous) = previous {
                previous.cancel();
            }
        }
    }

    pub fn load_video(&self) {
        let input = self.url_input.peek().clone();
        let use_proxy = *self.use_proxy.peek();
        match self.with_controller(|c| c.load_video(&input, use_proxy)) {
            Some(Ok(_)) | Some(Err(PlayerError::EmptyInput)) => {}
            Some(Err(e)) => {
                warn!("load failed: {e}");
                let mut ui = self.ui;
                ui.write().error = Some(e.overlay_message());
            }
            None => warn!("{}", PlayerError::MediaUnavailable),
        }
    }

    pub fn go_home(&self) {
        self.with_controller(|c| c.go_home());
    }

    pub fn toggle_play(&self) {
        self.with_controller(|c| c.toggle_play());
    }

    pub fn toggle_mute(&self) {
        let schedule = self.with_controller(|c| c.toggle_mute());
        self.dispatch(schedule);
    }

    pub fn set_volume(&self, value: f64) {
        let schedule = self
            .with_controller(|c| c.set_volume_from_slider(value))
            .flatten();
        self.dispatch(schedule);
    }

    pub fn toggle_fullscreen(&self) {
        self.with_controller(|c| c.toggle_fullscreen());
    }

    pub fn toggle_picture_in_picture(&self) {
        self.with_controller(|c| c.toggle_picture_in_picture());
    }

    pub fn set_playback_rate(&self, rate: f64) {
        self.with_controller(|c| c.set_playback_rate(rate));
    }

    pub fn begin_drag(&self, fraction: f64) {
        self.with_controller(|c| c.begin_drag(fraction));
    }

    pub fn drag_to(&self, fraction: f64) {
        self.with_controller(|c| {
            c.hover_progress(fraction);
            c.drag_to(fraction);
        });
    }

    pub fn end_drag(&self) {
        self.with_controller(|c| c.end_drag());
    }

    pub fn clear_hover(&self) {
        let mut ui = self.ui;
        if ui.peek().hover.is_some() {
            ui.write().hover = None;
        }
    }

    pub fn media_event(&self, event: MediaEvent) {
        let schedule = self.with_controller(|c| c.handle_media_event(event)).flatten();
        self.dispatch(schedule);
    }

    pub fn document_event(&self, event: DocumentEvent) {
        let schedule = self
            .with_controller(|c| c.handle_document_event(event))
            .flatten();
        self.dispatch(schedule);
    }

    pub fn pointer_activity(&self) {
        let delay_ms = self.config.peek().controls_hide_ms;
        let mut ui = self.ui;
        let schedule = ui.write().reveal_controls(delay_ms);
        self.dispatch(Some(schedule));
    }

    pub fn toggle_settings(&self) {
        let mut ui = self.ui;
        let open = !ui.peek().settings_open;
        ui.write().settings_open = open;
    }

    pub fn close_settings(&self) {
        let mut ui = self.ui;
        if ui.peek().settings_open {
            ui.write().settings_open = false;
        }
    }
}
