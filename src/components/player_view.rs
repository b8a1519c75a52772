use crate::components::{use_player, ControlsBar, Icon, OsdLayer};
use crate::player::web::{PLAYER_CONTAINER_ID, VIDEO_ELEMENT_ID};
use crate::player::MediaEvent;
use dioxus::prelude::*;

fn container_class(playing: bool, controls_visible: bool, fullscreen: bool) -> String {
    let mut class = String::from("player-container");
    if playing {
        class.push_str(" playing");
    }
    if controls_visible {
        class.push_str(" show-controls");
    }
    if fullscreen {
        class.push_str(" fullscreen");
    }
    class
}

/// Video surface with its overlays. Stays mounted while hidden so the
/// element exists before the first load.
#[component]
pub fn PlayerView() -> Element {
    let player = use_player();
    let (active, class, loading, error) = {
        let ui = player.ui.read();
        (
            ui.player_active,
            container_class(ui.is_playing, ui.controls_visible(), ui.fullscreen),
            ui.loading,
            ui.error.clone(),
        )
    };
    let error_message = error.clone().unwrap_or_default();

    rsx! {
        section { class: if active { "player-section active" } else { "player-section" },
            div { class: "player-header",
                button {
                    id: "back-btn",
                    r#type: "button",
                    onclick: move |_| player.go_home(),
                    Icon { name: "back".to_string(), class: "icon".to_string() }
                    "Back"
                }
            }
            div {
                id: PLAYER_CONTAINER_ID,
                class: "{class}",
                onmousemove: move |_| player.pointer_activity(),
                onclick: move |_| player.close_settings(),
                video {
                    id: VIDEO_ELEMENT_ID,
                    preload: "metadata",
                    onclick: move |_| player.toggle_play(),
                    onplay: move |_| player.media_event(MediaEvent::Play),
                    onpause: move |_| player.media_event(MediaEvent::Pause),
                    ontimeupdate: move |_| player.media_event(MediaEvent::TimeUpdate),
                    onprogress: move |_| player.media_event(MediaEvent::Progress),
                    onwaiting: move |_| player.media_event(MediaEvent::Waiting),
                    oncanplay: move |_| player.media_event(MediaEvent::CanPlay),
                    onloadedmetadata: move |_| player.media_event(MediaEvent::LoadedMetadata),
                    onerror: move |_| player.media_event(MediaEvent::Error),
                }
                OsdLayer {}
                div { class: if loading { "loading-overlay active" } else { "loading-overlay" },
                    Icon { name: "loader".to_string(), class: "icon-lg".to_string() }
                }
                div { class: if error.is_some() { "error-overlay active" } else { "error-overlay" },
                    Icon { name: "alert".to_string(), class: "icon-lg".to_string() }
                    p { "{error_message}" }
                    button {
                        id: "retry-btn",
                        r#type: "button",
                        onclick: move |evt: MouseEvent| {
                            evt.stop_propagation();
                            player.load_video();
                        },
                        "Retry"
                    }
                }
                button {
                    id: "big-play-btn",
                    class: "big-play",
                    r#type: "button",
                    onclick: move |_| player.toggle_play(),
                    Icon { name: "play".to_string(), class: "icon-lg".to_string() }
                }
                ControlsBar {}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::container_class;

    #[test]
    fn container_class_reflects_flags() {
        assert_eq!(container_class(false, true, false), "player-container show-controls");
        assert_eq!(
            container_class(true, false, true),
            "player-container playing fullscreen"
        );
    }
}
