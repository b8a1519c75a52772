use crate::components::{use_player, Icon};
use crate::player::web::{capture_pointer, release_pointer, track_fraction, PROGRESS_TRACK_ID};
use dioxus::prelude::*;

fn speed_label(rate: f64) -> String {
    format!("{rate}x")
}

/// Bottom bar: progress track, transport buttons, volume, settings.
#[component]
pub fn ControlsBar() -> Element {
    let player = use_player();
    let ui = player.ui.read().clone();
    let progress = ui.progress.clone();
    let volume = ui.volume;
    let played = format!("{:.3}%", progress.played_pct);
    let buffered = format!("{:.3}%", progress.buffered_pct);
    let slider = volume.slider_value();
    let current_label = progress.current_label.clone();
    let duration_label = progress.duration_label.clone();
    let tooltip = ui
        .hover
        .clone()
        .map(|tip| (format!("left: {:.3}%;", tip.left_pct), tip.label));

    rsx! {
        div { class: "controls",
            div {
                id: PROGRESS_TRACK_ID,
                class: "progress-container",
                style: "touch-action: none;",
                onpointerdown: move |evt: PointerEvent| {
                    evt.prevent_default();
                    capture_pointer(evt.pointer_id());
                    if let Some(fraction) = track_fraction(evt.client_coordinates().x) {
                        player.begin_drag(fraction);
                    }
                },
                onpointermove: move |evt: PointerEvent| {
                    if let Some(fraction) = track_fraction(evt.client_coordinates().x) {
                        player.drag_to(fraction);
                    }
                },
                onpointerup: move |evt: PointerEvent| {
                    release_pointer(evt.pointer_id());
                    player.end_drag();
                },
                onpointercancel: move |evt: PointerEvent| {
                    release_pointer(evt.pointer_id());
                    player.end_drag();
                },
                onpointerleave: move |_| player.clear_hover(),
                div { class: "progress-buffer", style: "width: {buffered};" }
                div { class: "progress-played", style: "width: {played};" }
                if let Some((tip_style, tip_label)) = tooltip {
                    div { class: "progress-tooltip", style: "{tip_style}", "{tip_label}" }
                }
            }
            div { class: "controls-row",
                button {
                    id: "play-pause-btn",
                    r#type: "button",
                    onclick: move |_| player.toggle_play(),
                    if ui.is_playing {
                        Icon { name: "pause".to_string(), class: "icon".to_string() }
                    } else {
                        Icon { name: "play".to_string(), class: "icon".to_string() }
                    }
                }
                div { class: "volume-group",
                    button {
                        id: "mute-btn",
                        r#type: "button",
                        onclick: move |_| player.toggle_mute(),
                        Icon { name: volume.icon().to_string(), class: "icon".to_string() }
                    }
                    input {
                        id: "volume-slider",
                        r#type: "range",
                        min: "0",
                        max: "1",
                        step: "0.05",
                        value: "{slider}",
                        oninput: move |e: FormEvent| {
                            if let Ok(value) = e.value().parse::<f64>() {
                                player.set_volume(value);
                            }
                        },
                    }
                }
                span { class: "time",
                    span { id: "current-time", "{current_label}" }
                    " / "
                    span { id: "duration", "{duration_label}" }
                }
                div { class: "spacer" }
                div { class: "settings-wrap",
                    button {
                        id: "settings-btn",
                        r#type: "button",
                        onclick: move |evt: MouseEvent| {
                            evt.stop_propagation();
                            player.toggle_settings();
                        },
                        Icon { name: "settings".to_string(), class: "icon".to_string() }
                    }
                    if ui.settings_open {
                        SettingsMenu {}
                    }
                }
                button {
                    id: "pip-btn",
                    r#type: "button",
                    onclick: move |_| player.toggle_picture_in_picture(),
                    Icon { name: "pip".to_string(), class: "icon".to_string() }
                }
                button {
                    id: "fullscreen-btn",
                    r#type: "button",
                    onclick: move |_| player.toggle_fullscreen(),
                    if ui.fullscreen {
                        Icon { name: "minimize".to_string(), class: "icon".to_string() }
                    } else {
                        Icon { name: "fullscreen".to_string(), class: "icon".to_string() }
                    }
                }
            }
        }
    }
}

/// Proxy toggle and playback speed picker.
#[component]
fn SettingsMenu() -> Element {
    let player = use_player();
    let mut use_proxy = player.use_proxy;
    let current_rate = player.ui.read().playback_rate;
    let speeds: Vec<(f64, String, bool)> = player
        .config
        .read()
        .speed_options
        .iter()
        .map(|&rate| (rate, speed_label(rate), (rate - current_rate).abs() < f64::EPSILON))
        .collect();

    rsx! {
        div {
            class: "settings-menu active",
            onclick: move |evt: MouseEvent| evt.stop_propagation(),
            label { class: "settings-row",
                input {
                    id: "use-proxy",
                    r#type: "checkbox",
                    checked: use_proxy(),
                    onchange: move |_| {
                        let next = !use_proxy();
                        use_proxy.set(next);
                    },
                }
                "Route through local proxy"
            }
            div { class: "settings-title", "Speed" }
            for (rate, label, selected) in speeds {
                button {
                    key: "{label}",
                    r#type: "button",
                    class: if selected { "speed-opt active" } else { "speed-opt" },
                    onclick: move |_| player.set_playback_rate(rate),
                    "{label}"
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::speed_label;

    #[test]
    fn speed_labels_drop_trailing_zeroes() {
        assert_eq!(speed_label(1.0), "1x");
        assert_eq!(speed_label(0.75), "0.75x");
    }
}
