use crate::components::{use_player_context_provider, PlayerView, UrlSection};
use crate::player::web::{install_document_listeners, location_search};
use crate::player::DocumentEvent;
use crate::utils::url_param_from_search;
use dioxus::logger::tracing::info;
use dioxus::prelude::*;
use futures_util::StreamExt;

/// Root of the player UI. Owns the application context and the
/// document-level keyboard and fullscreen listeners.
#[component]
pub fn PlayerShell() -> Element {
    let player = use_player_context_provider();

    // Document events arrive outside the Dioxus runtime; the coroutine brings them back in.
    let document_events = use_coroutine(move |mut rx: UnboundedReceiver<DocumentEvent>| async move {
        while let Some(event) = rx.next().await {
            player.document_event(event);
        }
    });

    use_effect(move || {
        install_document_listeners(document_events.tx());

        let Some(url) = location_search().and_then(|search| url_param_from_search(&search, "url"))
        else {
            return;
        };
        info!("loading url from query string");
        let mut url_input = player.url_input;
        url_input.set(url);
        player.load_video();
    });

    rsx! {
        div { class: "app",
            UrlSection {}
            PlayerView {}
        }
    }
}
