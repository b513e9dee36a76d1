//! Section navigation for long single-page documents.
//!
//! The controller builds a menu from the page sections, tracks which section
//! sits under the navigation bar while scrolling, scrolls to sections on menu
//! clicks and collapses section bodies. All page access goes through
//! [`NavView`]; deferred work goes through [`runtime::timer::TimerDriver`].

pub mod config;
pub mod controller;
pub mod detect;
pub mod error;
pub mod model;
pub mod styles;
pub mod view;

#[cfg(test)]
mod testing;

pub use config::*;
pub use controller::*;
pub use detect::*;
pub use error::*;
pub use model::*;
pub use styles::*;
pub use view::*;
