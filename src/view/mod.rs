//! View module - Driver-side helpers for drawing and pointer editing.
//!
//! Nothing here touches a window or terminal directly; drivers feed the
//! results to whatever surface they own.

mod text;
mod viewport;

pub use text::*;
pub use viewport::*;
