//! Beacon Gateway
//!
//! Push gateway and delivery credential collaborators.

mod http;
mod traits;

pub use http::*;
pub use traits::*;
