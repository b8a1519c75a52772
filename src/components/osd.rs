use crate::components::{use_player, Icon};
use crate::player::OsdKind;
use dioxus::prelude::*;

#[component]
pub fn OsdLayer() -> Element {
    let player = use_player();
    let visible = player.ui.read().osd;
    let icons = OsdKind::ALL
        .into_iter()
        .map(move |kind| (kind.dom_id(), kind.icon(), visible == Some(kind)));

    rsx! {
        div { class: "osd-layer",
            for (id, icon, shown) in icons {
                div {
                    key: "{id}",
                    id,
                    class: if shown { "osd-icon active" } else { "osd-icon" },
                    Icon { name: icon.to_string(), class: "icon-lg".to_string() }
                }
            }
        }
    }
}
