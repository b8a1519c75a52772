//! Player core: view-model, controller operations and the browser seams
//! they run against.

mod controller;
mod media;
mod state;
pub mod web;

pub use controller::*;
pub use media::*;
pub use state::*;
