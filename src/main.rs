use dioxus::prelude::*;

mod components;
mod config;
mod error;
mod player;
mod utils;

use components::PlayerShell;

const PLAYER_CSS: Asset = asset!("/assets/player.css");
/// Optional streaming-segment library; the player works without it for
/// everything except adaptive manifests.
const HLS_JS: &str = "https://cdn.jsdelivr.net/npm/hls.js@1";

fn main() {
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    rsx! {
        document::Title { "StreamFlow" }
        document::Meta { name: "theme-color", content: "#0f1115" }
        document::Meta { name: "viewport", content: "width=device-width, initial-scale=1" }
        document::Stylesheet { href: PLAYER_CSS }
        document::Script { src: HLS_JS }

        PlayerShell {}
    }
}
