//! Half-edge mesh data structures.
//!
//! The primary type is [`HalfEdgeMesh`], a polygon mesh stored as a half-edge
//! (doubly-connected edge list) structure with optional per-vertex normals,
//! colors and texture coordinates. It is the source side of every conversion
//! in this crate.
//!
//! Elements are addressed with type-safe handles ([`VertexId`],
//! [`HalfEdgeId`], [`FaceId`]) that are generic over the index integer
//! ([`MeshIndex`]).
//!
//! # Construction
//!
//! ```
//! use flatmesh::mesh::{HalfEdgeMesh, build_from_quads};
//! use nalgebra::Point3;
//!
//! let vertices = vec![
//!     Point3::new(0.0, 0.0, 0.0),
//!     Point3::new(1.0, 0.0, 0.0),
//!     Point3::new(1.0, 1.0, 0.0),
//!     Point3::new(0.0, 1.0, 0.0),
//! ];
//! let mesh: HalfEdgeMesh = build_from_quads(&vertices, &[[0, 1, 2, 3]]).unwrap();
//! assert_eq!(mesh.num_faces(), 1);
//! ```

mod attributes;
mod builder;
mod halfedge;
mod index;

pub use attributes::{ColorCast, VertexColors};
pub use builder::{build_from_polygons, build_from_quads, build_from_triangles, to_face_vertex};
pub use halfedge::{Face, FaceHalfEdgeIter, HalfEdge, HalfEdgeMesh, Vertex};
pub use index::{FaceId, HalfEdgeId, MeshIndex, VertexId};
