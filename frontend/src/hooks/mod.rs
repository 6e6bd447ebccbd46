//! Custom Yew hooks for the frontend application.
//!
//! These hooks own the fetch-then-store logic so pages stay focused on layout.

mod use_home_data;
mod use_lmp;

pub use use_home_data::use_home_data;
pub use use_lmp::{use_lmp, UseLmp};
