//! Beacon Core Types
//!
//! Domain types shared across the audience resolution and dispatch crates.

mod audience;
mod dedup;
mod error;
mod notification;
mod outcome;
mod recipient;

pub use audience::*;
pub use dedup::*;
pub use error::*;
pub use notification::*;
pub use outcome::*;
pub use recipient::*;
