//! Render record storage.
//!
//! The table answers one question for the transaction layer: was this
//! `(object, key)` pair rendered since the table was last replaced? It never
//! keeps a rendered object alive.

mod render_table;
mod types;

pub use render_table::RenderTable;
pub use types::{Liveness, ObjectId};
