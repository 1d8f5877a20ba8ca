//! Beacon Engine
//!
//! Audience resolution and batched push dispatch.

mod dispatch;
mod resolver;
mod service;

pub use dispatch::*;
pub use resolver::*;
pub use service::*;
