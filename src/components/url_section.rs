use crate::components::{use_player, Icon};
use dioxus::prelude::*;

/// Landing form: paste a URL, press Enter or Load.
#[component]
pub fn UrlSection() -> Element {
    let player = use_player();
    let mut url_input = player.url_input;
    let mut use_proxy = player.use_proxy;
    let hidden = player.ui.read().player_active;

    rsx! {
        section { class: if hidden { "url-section hidden" } else { "url-section" },
            h1 { class: "brand", "StreamFlow" }
            p { class: "tagline", "Paste a video or HLS link to start watching." }
            div { class: "url-form",
                input {
                    id: "video-url",
                    r#type: "url",
                    placeholder: "https://example.com/video.mp4",
                    value: "{url_input}",
                    oninput: move |e: FormEvent| url_input.set(e.value()),
                    onkeydown: move |e: KeyboardEvent| {
                        if e.key() == Key::Enter {
                            player.load_video();
                        }
                    },
                }
                button {
                    id: "load-btn",
                    r#type: "button",
                    onclick: move |_| player.load_video(),
                    Icon { name: "play".to_string(), class: "icon".to_string() }
                    "Load"
                }
            }
            label { class: "proxy-toggle",
                input {
                    r#type: "checkbox",
                    checked: use_proxy(),
                    onchange: move |_| {
                        let next = !use_proxy();
                        use_proxy.set(next);
                    },
                }
                "Route through local proxy"
            }
        }
    }
}
