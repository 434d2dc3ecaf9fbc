//! Connectivity operations used while building index buffers.
//!
//! - **Triangulation**: fan-split polygon faces into triangles, in place
//! - **Stripification**: decompose a triangle mesh into triangle strips
//!
//! Neither operation adds or reorders vertices, so vertex handles taken
//! before running them still address the same vertices afterwards.

mod stripify;
mod triangulate;

pub use stripify::{Strip, Stripifier};
pub use triangulate::triangulate;
