//! Index buffer generation.
//!
//! Three modes, picked by [`ConversionOptions`]:
//!
//! - **Direct**: each face's vertex cycle in face order, any polygon degree
//! - **Triangulated**: fan-triangulate a working copy, then index it directly
//! - **Stripified**: concatenate the triangle strips of the mesh, with no
//!   separators between strips
//!
//! Triangulation and stripification never add or reorder vertices, so indices
//! taken from a working copy address the source's vertex order.

use crate::algo::{triangulate, Stripifier};
use crate::error::Result;
use crate::flat::AttributeAppendable;
use crate::mesh::{HalfEdgeMesh, MeshIndex, VertexId};

use super::ConversionOptions;

#[inline]
fn flat_index<I: MeshIndex>(v: VertexId<I>) -> u32 {
    debug_assert!(
        v.index() <= u32::MAX as usize,
        "vertex index {} does not fit a u32 index buffer",
        v.index()
    );
    v.index() as u32
}

/// Append every face's vertex cycle, in face order and winding order.
///
/// Returns the number of indices appended, the sum of all face degrees.
pub fn add_indices<I, T>(mesh: &HalfEdgeMesh<I>, out: &mut T) -> usize
where
    I: MeshIndex,
    T: AttributeAppendable + ?Sized,
{
    let mut count = 0;
    for f in mesh.face_ids() {
        for v in mesh.face_vertices(f) {
            out.add_index(flat_index(v));
            count += 1;
        }
    }
    count
}

/// Append the indices of a triangulated copy of `mesh`.
///
/// The source is left untouched. Returns the number of indices appended,
/// always a multiple of 3.
pub fn add_indices_triangulated<I, T>(mesh: &HalfEdgeMesh<I>, out: &mut T) -> usize
where
    I: MeshIndex,
    T: AttributeAppendable + ?Sized,
{
    let mut copy = mesh.clone();
    triangulate(&mut copy);
    add_indices(&copy, out)
}

/// Append the flattened triangle strips of `mesh`.
///
/// When no strips can be built (no faces, or a face that is not a
/// triangle) nothing is appended and 0 is returned.
pub fn add_indices_stripified<I, T>(mesh: &HalfEdgeMesh<I>, out: &mut T) -> usize
where
    I: MeshIndex,
    T: AttributeAppendable + ?Sized,
{
    match try_add_indices_stripified(mesh, out) {
        Ok(count) => count,
        Err(e) => {
            log::warn!("{}, no indices emitted", e);
            0
        }
    }
}

/// Like [`add_indices_stripified`], but reports a failed stripification.
pub fn try_add_indices_stripified<I, T>(mesh: &HalfEdgeMesh<I>, out: &mut T) -> Result<usize>
where
    I: MeshIndex,
    T: AttributeAppendable + ?Sized,
{
    let mut stripifier = Stripifier::new(mesh);
    stripifier.try_stripify()?;

    let mut count = 0;
    for strip in stripifier.iter() {
        for &v in strip {
            out.add_index(flat_index(v));
            count += 1;
        }
    }
    Ok(count)
}

/// Append indices in the mode selected by `options`.
///
/// With both [`ConversionOptions::TRIANGULATE`] and
/// [`ConversionOptions::STRIPIFY`], the triangulated copy is stripified.
/// Errors only when stripification fails; in that case nothing was appended.
pub fn build_indices<I, T>(mesh: &HalfEdgeMesh<I>, options: ConversionOptions, out: &mut T) -> Result<usize>
where
    I: MeshIndex,
    T: AttributeAppendable + ?Sized,
{
    let stripify = options.contains(ConversionOptions::STRIPIFY);

    if options.contains(ConversionOptions::TRIANGULATE) {
        if !stripify {
            return Ok(add_indices_triangulated(mesh, out));
        }
        let mut copy = mesh.clone();
        triangulate(&mut copy);
        try_add_indices_stripified(&copy, out)
    } else if stripify {
        try_add_indices_stripified(mesh, out)
    } else {
        Ok(add_indices(mesh, out))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MeshError;
    use crate::flat::FlatMesh;
    use crate::mesh::build_from_polygons;
    use nalgebra::Point3;

    fn house() -> HalfEdgeMesh {
        // A square with a triangular roof and a pentagon beside it
        let vertices = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
            Point3::new(0.5, 1.5, 0.0),
            Point3::new(2.0, 0.0, 0.0),
            Point3::new(2.5, 0.5, 0.0),
            Point3::new(2.0, 1.0, 0.0),
        ];
        let faces: Vec<Vec<usize>> = vec![vec![0, 1, 2, 3], vec![3, 2, 4], vec![1, 5, 6, 7, 2]];
        build_from_polygons(&vertices, &faces).unwrap()
    }

    #[test]
    fn test_direct_keeps_polygons() {
        let mesh = house();
        let mut out = FlatMesh::new();

        assert_eq!(add_indices(&mesh, &mut out), 12);
        assert_eq!(out.indices, vec![0, 1, 2, 3, 3, 2, 4, 1, 5, 6, 7, 2]);
    }

    #[test]
    fn test_triangulated_leaves_source_alone() {
        let mesh = house();
        let mut out = FlatMesh::new();

        assert_eq!(add_indices_triangulated(&mesh, &mut out), 18);
        assert_eq!(out.indices.len() % 3, 0);
        assert!(out.indices.iter().all(|&i| (i as usize) < mesh.num_vertices()));
        assert_eq!(mesh.num_faces(), 3);
        assert!(!mesh.is_triangle_mesh());
    }

    #[test]
    fn test_stripified_polygons_emit_nothing() {
        let mesh = house();
        let mut out = FlatMesh::new();

        assert_eq!(add_indices_stripified(&mesh, &mut out), 0);
        assert!(out.indices.is_empty());
        assert!(matches!(
            try_add_indices_stripified(&mesh, &mut out),
            Err(MeshError::StripifyFailed { .. })
        ));
    }

    #[test]
    fn test_build_indices_modes() {
        let mesh = house();

        let mut direct = FlatMesh::new();
        build_indices(&mesh, ConversionOptions::NONE, &mut direct).unwrap();
        assert_eq!(direct.indices.len(), 12);

        let mut triangles = FlatMesh::new();
        build_indices(&mesh, ConversionOptions::TRIANGULATE, &mut triangles).unwrap();
        assert_eq!(triangles.triangle_count(), 6);

        let mut strips = FlatMesh::new();
        let count = build_indices(
            &mesh,
            ConversionOptions::TRIANGULATE | ConversionOptions::STRIPIFY,
            &mut strips,
        )
        .unwrap();
        assert_eq!(count, strips.indices.len());
        // 6 triangles need at least 8 strip indices
        assert!(count >= 8);

        let mut failed = FlatMesh::new();
        assert!(build_indices(&mesh, ConversionOptions::STRIPIFY, &mut failed).is_err());
        assert!(failed.indices.is_empty());
    }
}
