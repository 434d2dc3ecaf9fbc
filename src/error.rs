//! Error types for flatmesh.
//!
//! Conversion itself never fails; these errors come from mesh construction,
//! attribute assignment and the strict conversion entry points.

use thiserror::Error;

/// Result type alias using [`MeshError`].
pub type Result<T> = std::result::Result<T, MeshError>;

/// Errors that can occur while building or converting meshes.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MeshError {
    /// The mesh has no faces.
    #[error("mesh has no faces")]
    EmptyMesh,

    /// A face references an invalid vertex index.
    #[error("face {face} references invalid vertex index {vertex}")]
    InvalidVertexIndex {
        /// The face index.
        face: usize,
        /// The invalid vertex index.
        vertex: usize,
    },

    /// A face has fewer than three corners or repeats a vertex.
    #[error("face {face} is degenerate (fewer than 3 vertices or a repeated vertex)")]
    DegenerateFace {
        /// The face index.
        face: usize,
    },

    /// The same directed edge is used by more than one face.
    #[error("edge ({v0}, {v1}) has more than two incident faces or inconsistent winding")]
    NonManifoldEdge {
        /// First vertex of the edge.
        v0: usize,
        /// Second vertex of the edge.
        v1: usize,
    },

    /// A per-vertex attribute array does not match the vertex count.
    #[error("{attribute} has {found} entries but the mesh has {expected} vertices")]
    AttributeLength {
        /// Name of the attribute.
        attribute: &'static str,
        /// Number of vertices in the mesh.
        expected: usize,
        /// Number of entries supplied.
        found: usize,
    },

    /// The triangle-strip optimizer produced no strips.
    #[error("stripification failed: {reason}")]
    StripifyFailed {
        /// Why no strips were produced.
        reason: &'static str,
    },

    /// The requested operation has no implementation.
    #[error("not implemented: {0}")]
    NotImplemented(&'static str),
}

impl MeshError {
    /// Create an attribute length mismatch error.
    pub fn attribute_length(attribute: &'static str, expected: usize, found: usize) -> Self {
        MeshError::AttributeLength {
            attribute,
            expected,
            found,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let err = MeshError::attribute_length("normals", 4, 3);
        assert_eq!(
            err.to_string(),
            "normals has 3 entries but the mesh has 4 vertices"
        );

        let err = MeshError::NotImplemented("flat mesh to half-edge conversion");
        assert_eq!(
            err.to_string(),
            "not implemented: flat mesh to half-edge conversion"
        );
    }
}
