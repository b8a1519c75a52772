// Browser bindings for the video element, the document viewport and HLS.js.
// Native builds get inert stubs so the view still compiles off-wasm.
use dioxus::prelude::UnboundedSender;

use super::controller::DocumentEvent;
#[cfg(target_arch = "wasm32")]
use super::controller::Shortcut;
#[cfg(target_arch = "wasm32")]
use super::media::{MediaElement, MediaSource, Viewport};
#[cfg(not(target_arch = "wasm32"))]
use super::media::{MediaElement, Viewport};
#[cfg(target_arch = "wasm32")]
use crate::error::{js_error_text, PlayerError};

#[cfg(target_arch = "wasm32")]
use dioxus::logger::tracing::{debug, warn};
#[cfg(target_arch = "wasm32")]
use js_sys::{Array, Function, Reflect};
#[cfg(target_arch = "wasm32")]
use std::cell::RefCell;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
#[cfg(target_arch = "wasm32")]
use wasm_bindgen_futures::JsFuture;
#[cfg(target_arch = "wasm32")]
use web_sys::{window, Document, Element, HtmlVideoElement, KeyboardEvent};

pub const VIDEO_ELEMENT_ID: &str = "stream-video";
pub const PLAYER_CONTAINER_ID: &str = "player-container";
pub const PROGRESS_TRACK_ID: &str = "progress-container";

#[cfg(target_arch = "wasm32")]
thread_local! {
    static HLS_INSTANCE: RefCell<Option<JsValue>> = const { RefCell::new(None) };
}

#[cfg(target_arch = "wasm32")]
fn document() -> Option<Document> {
    window()?.document()
}

#[cfg(target_arch = "wasm32")]
fn call_method(target: &JsValue, name: &str, args: &Array) -> Result<JsValue, JsValue> {
    let method: Function = Reflect::get(target, &name.into())?.dyn_into()?;
    method.apply(target, args)
}

/// Await a promise off to the side; failures only reach the log.
#[cfg(target_arch = "wasm32")]
fn settle_in_background(result: Result<JsValue, JsValue>, what: &'static str) {
    match result.and_then(|value| value.dyn_into::<js_sys::Promise>()) {
        Ok(promise) => wasm_bindgen_futures::spawn_local(async move {
            if let Err(e) = JsFuture::from(promise).await {
                warn!("{what} rejected: {}", js_error_text(&e));
            }
        }),
        Err(e) => warn!("{what} failed: {}", js_error_text(&e)),
    }
}

#[cfg(target_arch = "wasm32")]
fn destroy_adaptive() {
    HLS_INSTANCE.with(|slot| {
        if let Some(hls) = slot.borrow_mut().take() {
            if let Err(e) = call_method(&hls, "destroy", &Array::new()) {
                warn!("hls destroy failed: {}", js_error_text(&e));
            }
        }
    });
}

/// Hand the manifest to HLS.js. `Ok(false)` when the library is not loaded.
#[cfg(target_arch = "wasm32")]
fn attach_adaptive(video: &HtmlVideoElement, url: &str) -> Result<bool, PlayerError> {
    let ctor = Reflect::get(&js_sys::global(), &"Hls".into())
        .map_err(|e| PlayerError::Adaptive(js_error_text(&e)))?;
    if ctor.is_undefined() || ctor.is_null() {
        return Ok(false);
    }
    let ctor: Function = ctor
        .dyn_into()
        .map_err(|_| PlayerError::Adaptive("Hls is not a constructor".into()))?;
    let hls = Reflect::construct(&ctor, &Array::new())
        .map_err(|e| PlayerError::Adaptive(js_error_text(&e)))?;
    let attached = call_method(&hls, "loadSource", &Array::of1(&JsValue::from_str(url)))
        .and_then(|_| call_method(&hls, "attachMedia", &Array::of1(video.as_ref())));
    if let Err(e) = attached {
        if let Err(destroy_err) = call_method(&hls, "destroy", &Array::new()) {
            warn!("hls destroy failed: {}", js_error_text(&destroy_err));
        }
        return Err(PlayerError::Adaptive(js_error_text(&e)));
    }
    HLS_INSTANCE.with(|slot| *slot.borrow_mut() = Some(hls));
    Ok(true)
}

#[cfg(target_arch = "wasm32")]
pub struct WebVideo(HtmlVideoElement);

#[cfg(target_arch = "wasm32")]
impl MediaElement for WebVideo {
    fn paused(&self) -> bool {
        self.0.paused()
    }

    fn play(&self) {
        settle_in_background(self.0.play().map(JsValue::from), "auto-play");
    }

    fn pause(&self) {
        if let Err(e) = self.0.pause() {
            warn!("pause failed: {}", js_error_text(&e));
        }
    }

    fn current_time(&self) -> f64 {
        self.0.current_time()
    }

    fn set_current_time(&self, seconds: f64) {
        self.0.set_current_time(seconds);
    }

    fn duration(&self) -> f64 {
        self.0.duration()
    }

    fn volume(&self) -> f64 {
        self.0.volume()
    }

    fn set_volume(&self, level: f64) {
        self.0.set_volume(level);
    }

    fn muted(&self) -> bool {
        self.0.muted()
    }

    fn set_muted(&self, muted: bool) {
        self.0.set_muted(muted);
    }

    fn set_playback_rate(&self, rate: f64) {
        self.0.set_playback_rate(rate);
    }

    fn buffered_end(&self) -> Option<f64> {
        let ranges = self.0.buffered();
        let len = ranges.length();
        if len == 0 {
            return None;
        }
        ranges.end(len - 1).ok()
    }

    fn error_code(&self) -> Option<u16> {
        self.0.error().map(|e| e.code())
    }

    fn attach(&self, source: &MediaSource) -> Result<(), PlayerError> {
        destroy_adaptive();
        if let MediaSource::Adaptive(url) = source {
            if attach_adaptive(&self.0, url)? {
                debug!("manifest attached through hls.js");
                return Ok(());
            }
        }
        self.0.set_src(source.url());
        Ok(())
    }

    fn load(&self) {
        self.0.load();
    }

    fn detach(&self) {
        destroy_adaptive();
        let _ = self.0.remove_attribute("src");
        self.0.load();
    }
}

#[cfg(target_arch = "wasm32")]
pub struct DocumentViewport {
    document: Document,
    container: Element,
    video: HtmlVideoElement,
}

#[cfg(target_arch = "wasm32")]
impl Viewport for DocumentViewport {
    fn is_fullscreen(&self) -> bool {
        self.document.fullscreen_element().is_some()
    }

    fn enter_fullscreen(&self) -> Result<(), PlayerError> {
        self.container
            .request_fullscreen()
            .map_err(|e| PlayerError::Fullscreen(js_error_text(&e)))
    }

    fn exit_fullscreen(&self) -> Result<(), PlayerError> {
        self.document.exit_fullscreen();
        Ok(())
    }

    fn toggle_picture_in_picture(&self) {
        let document: &JsValue = self.document.as_ref();
        let active = Reflect::get(document, &"pictureInPictureElement".into())
            .map(|el| !el.is_null() && !el.is_undefined())
            .unwrap_or(false);
        if active {
            settle_in_background(
                call_method(document, "exitPictureInPicture", &Array::new()),
                "exit picture-in-picture",
            );
        } else {
            settle_in_background(
                call_method(self.video.as_ref(), "requestPictureInPicture", &Array::new()),
                "picture-in-picture",
            );
        }
    }
}

/// Run `f` against the mounted video element and its document.
/// `None` when the player is not mounted (or off-wasm).
#[cfg(target_arch = "wasm32")]
pub fn with_browser<R>(f: impl FnOnce(&dyn MediaElement, &dyn Viewport) -> R) -> Option<R> {
    let document = document()?;
    let video: HtmlVideoElement = document
        .get_element_by_id(VIDEO_ELEMENT_ID)?
        .dyn_into()
        .ok()?;
    let container = document.get_element_by_id(PLAYER_CONTAINER_ID)?;
    let media = WebVideo(video.clone());
    let viewport = DocumentViewport {
        document,
        container,
        video,
    };
    Some(f(&media, &viewport))
}

#[cfg(not(target_arch = "wasm32"))]
pub fn with_browser<R>(_f: impl FnOnce(&dyn MediaElement, &dyn Viewport) -> R) -> Option<R> {
    None
}

/// Pointer x mapped onto the progress track.
#[cfg(target_arch = "wasm32")]
pub fn track_fraction(client_x: f64) -> Option<f64> {
    let rect = document()?
        .get_element_by_id(PROGRESS_TRACK_ID)?
        .get_bounding_client_rect();
    crate::utils::pointer_fraction(client_x, rect.left(), rect.width())
}

#[cfg(not(target_arch = "wasm32"))]
pub fn track_fraction(_client_x: f64) -> Option<f64> {
    None
}

#[cfg(target_arch = "wasm32")]
pub fn capture_pointer(pointer_id: i32) {
    if let Some(track) = document().and_then(|d| d.get_element_by_id(PROGRESS_TRACK_ID)) {
        let _ = track.set_pointer_capture(pointer_id);
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub fn capture_pointer(_pointer_id: i32) {}

#[cfg(target_arch = "wasm32")]
pub fn release_pointer(pointer_id: i32) {
    if let Some(track) = document().and_then(|d| d.get_element_by_id(PROGRESS_TRACK_ID)) {
        let _ = track.release_pointer_capture(pointer_id);
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub fn release_pointer(_pointer_id: i32) {}

#[cfg(target_arch = "wasm32")]
pub fn location_search() -> Option<String> {
    window()?.location().search().ok()
}

#[cfg(not(target_arch = "wasm32"))]
pub fn location_search() -> Option<String> {
    None
}

#[cfg(target_arch = "wasm32")]
fn is_text_entry_target(event: &KeyboardEvent) -> bool {
    let Some(target) = event.target() else {
        return false;
    };

    let mut current = target.dyn_into::<Element>().ok();
    while let Some(element) = current {
        let editable = element.get_attribute("contenteditable");
        if crate::utils::is_text_entry(&element.tag_name(), editable.as_deref()) {
            return true;
        }
        current = element.parent_element();
    }

    false
}

/// Document-wide keydown and fullscreenchange listeners. Keys are resolved
/// synchronously so the default action can be suppressed, then everything is
/// forwarded into the Dioxus runtime.
#[cfg(target_arch = "wasm32")]
pub fn install_document_listeners(tx: UnboundedSender<DocumentEvent>) {
    let Some(doc) = document() else {
        return;
    };

    let key_tx = tx.clone();
    let key_cb = Closure::wrap(Box::new(move |event: KeyboardEvent| {
        if event.default_prevented() || event.is_composing() || is_text_entry_target(&event) {
            return;
        }
        let Some(shortcut) = Shortcut::from_key(&event.key()) else {
            return;
        };
        if shortcut.suppresses_default() {
            event.prevent_default();
        }
        if key_tx.unbounded_send(DocumentEvent::Key(shortcut)).is_err() {
            warn!("shortcut dropped: player is gone");
        }
    }) as Box<dyn FnMut(KeyboardEvent)>);
    let _ = doc.add_event_listener_with_callback("keydown", key_cb.as_ref().unchecked_ref());
    key_cb.forget();

    let fullscreen_cb = Closure::wrap(Box::new(move |_event: web_sys::Event| {
        let _ = tx.unbounded_send(DocumentEvent::FullscreenChange);
    }) as Box<dyn FnMut(web_sys::Event)>);
    let _ = doc.add_event_listener_with_callback(
        "fullscreenchange",
        fullscreen_cb.as_ref().unchecked_ref(),
    );
    fullscreen_cb.forget();
}

#[cfg(not(target_arch = "wasm32"))]
pub fn install_document_listeners(_tx: UnboundedSender<DocumentEvent>) {}
