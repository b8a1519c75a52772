//! The components module contains the Dioxus view of the player.

mod app;
mod context;
mod controls;
mod icons;
mod osd;
mod player_view;
mod url_section;

pub use app::*;
pub use context::*;
pub use controls::*;
pub use icons::*;
pub use osd::*;
pub use player_view::*;
pub use url_section::*;
