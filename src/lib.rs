//! # Flatmesh
//!
//! Conversion of half-edge polygon meshes into flat, render-ready buffers.
//!
//! Flatmesh pairs a half-edge mesh data structure, carrying optional
//! per-vertex normals, colors and texture coordinates, with a converter that
//! writes positions, indices and attributes into parallel arrays suitable for
//! upload to a graphics API.
//!
//! ## Features
//!
//! - **Half-edge data structure**: polygon faces with type-safe indices
//! - **Flexible indexing**: Support for 16-bit, 32-bit, and 64-bit indices
//! - **Selective conversion**: pick attributes with [`AttributeSelector`](convert::AttributeSelector)
//! - **Index modes**: direct polygons, fan triangulation, or triangle strips
//! - **Pluggable sinks**: write into [`FlatMesh`](flat::FlatMesh) or any
//!   [`AttributeAppendable`](flat::AttributeAppendable)
//!
//! ## Quick Start
//!
//! ```
//! use flatmesh::prelude::*;
//! use nalgebra::Point3;
//!
//! let vertices = vec![
//!     Point3::new(0.0, 0.0, 0.0),
//!     Point3::new(1.0, 0.0, 0.0),
//!     Point3::new(1.0, 1.0, 0.0),
//!     Point3::new(0.0, 1.0, 0.0),
//! ];
//! let mut mesh: HalfEdgeMesh = build_from_quads(&vertices, &[[0, 1, 2, 3]]).unwrap();
//! mesh.compute_vertex_normals();
//!
//! // Every attribute, polygon indices
//! let flat = convert(&mesh);
//! assert_eq!(flat.indices, vec![0, 1, 2, 3]);
//! assert_eq!(flat.normals.len(), 4);
//! assert!(flat.colors.is_empty());
//!
//! // Triangles only
//! let flat = convert_with(&mesh, AttributeSelector::ALL, ConversionOptions::TRIANGULATE);
//! assert_eq!(flat.indices, vec![0, 2, 3, 0, 1, 2]);
//! ```
//!
//! ## Triangle Strips
//!
//! ```
//! use flatmesh::prelude::*;
//! use nalgebra::Point3;
//!
//! # let vertices = vec![
//! #     Point3::new(0.0, 0.0, 0.0),
//! #     Point3::new(1.0, 0.0, 0.0),
//! #     Point3::new(1.0, 1.0, 0.0),
//! #     Point3::new(0.0, 1.0, 0.0),
//! # ];
//! # let mesh: HalfEdgeMesh = build_from_quads(&vertices, &[[0, 1, 2, 3]]).unwrap();
//! // Strips need triangles; stripifying the raw quad is an error
//! let err = try_convert(&mesh, AttributeSelector::INDICES, ConversionOptions::STRIPIFY);
//! assert!(err.is_err());
//!
//! let flat = try_convert(
//!     &mesh,
//!     AttributeSelector::INDICES,
//!     ConversionOptions::TRIANGULATE | ConversionOptions::STRIPIFY,
//! )
//! .unwrap();
//! assert_eq!(flat.indices.len(), 4);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod algo;
pub mod convert;
pub mod error;
pub mod flat;
pub mod mesh;

/// Prelude module for convenient imports.
///
/// This module re-exports the most commonly used types and functions:
///
/// ```
/// use flatmesh::prelude::*;
/// ```
pub mod prelude {
    pub use crate::convert::{
        convert, convert_into, convert_with, try_convert, AttributeSelector, ConversionOptions,
    };
    pub use crate::error::{MeshError, Result};
    pub use crate::flat::{AttributeAppendable, FlatMesh};
    pub use crate::mesh::{
        build_from_polygons, build_from_quads, build_from_triangles, to_face_vertex, FaceId,
        HalfEdgeId, HalfEdgeMesh, MeshIndex, VertexColors, VertexId,
    };
}

// Re-export nalgebra types for convenience
pub use nalgebra;
