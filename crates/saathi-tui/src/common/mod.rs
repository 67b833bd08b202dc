//! Shared UI helpers.

mod calls;
mod text;

pub use calls::{CallKind, Calls};
pub use text::truncate_to_width;
