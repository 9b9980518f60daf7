//! Application state module

mod app_state;
pub mod events;
pub mod forms;
pub mod navigation;
pub mod pages;

pub use app_state::*;
