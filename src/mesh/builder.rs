//! Mesh construction utilities.
//!
//! Half-edge meshes are built from face-vertex lists: a vertex position array
//! plus faces given as counter-clockwise lists of vertex indices. Faces may
//! have any number of corners.

use std::collections::HashMap;

use nalgebra::Point3;

use super::halfedge::{Face, HalfEdge, HalfEdgeMesh};
use super::index::{FaceId, HalfEdgeId, MeshIndex, VertexId};
use crate::error::{MeshError, Result};

/// Build a half-edge mesh from vertices and polygon faces.
///
/// Vertex and face order are preserved: vertex `i` of the input becomes
/// `VertexId(i)` and face `j` becomes `FaceId(j)`, and each face starts at its
/// first listed corner.
///
/// # Errors
///
/// - [`MeshError::EmptyMesh`] if `faces` is empty
/// - [`MeshError::InvalidVertexIndex`] if a face references a missing vertex
/// - [`MeshError::DegenerateFace`] if a face has fewer than 3 corners or
///   repeats a vertex
/// - [`MeshError::NonManifoldEdge`] if a directed edge is used twice
///
/// # Example
/// ```
/// use flatmesh::mesh::{build_from_polygons, HalfEdgeMesh};
/// use nalgebra::Point3;
///
/// let vertices = vec![
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(1.0, 0.0, 0.0),
///     Point3::new(1.5, 1.0, 0.0),
///     Point3::new(0.5, 1.5, 0.0),
///     Point3::new(-0.5, 1.0, 0.0),
/// ];
/// let faces: Vec<Vec<usize>> = vec![vec![0, 1, 2, 3, 4]];
///
/// let mesh: HalfEdgeMesh = build_from_polygons(&vertices, &faces).unwrap();
/// assert_eq!(mesh.num_faces(), 1);
/// assert_eq!(mesh.face_degree(flatmesh::mesh::FaceId::new(0)), 5);
/// ```
pub fn build_from_polygons<I: MeshIndex, F: AsRef<[usize]>>(
    vertices: &[Point3<f64>],
    faces: &[F],
) -> Result<HalfEdgeMesh<I>> {
    if faces.is_empty() {
        return Err(MeshError::EmptyMesh);
    }

    for (fi, face) in faces.iter().enumerate() {
        validate_face(fi, face.as_ref(), vertices.len())?;
    }

    let num_corners: usize = faces.iter().map(|f| f.as_ref().len()).sum();
    let mut mesh = HalfEdgeMesh::with_capacity(vertices.len(), num_corners * 2, faces.len());

    let vertex_ids: Vec<VertexId<I>> = vertices.iter().map(|&p| mesh.add_vertex(p)).collect();

    // Directed edge (v0, v1) -> interior half-edge
    let mut edge_map: HashMap<(usize, usize), HalfEdgeId<I>> = HashMap::with_capacity(num_corners);

    // First pass: interior half-edges and faces
    for face in faces {
        let corners = face.as_ref();
        let n = corners.len();
        let first = mesh.num_halfedges();
        let face_id = FaceId::<I>::new(mesh.num_faces());

        mesh.faces.push(Face::new(HalfEdgeId::new(first)));

        for (k, &v) in corners.iter().enumerate() {
            let he_id = HalfEdgeId::<I>::new(first + k);
            mesh.halfedges.push(HalfEdge {
                origin: vertex_ids[v],
                twin: HalfEdgeId::invalid(),
                next: HalfEdgeId::new(first + (k + 1) % n),
                prev: HalfEdgeId::new(first + (k + n - 1) % n),
                face: face_id,
            });
            mesh.vertex_mut(vertex_ids[v]).halfedge = he_id;

            let w = corners[(k + 1) % n];
            if edge_map.insert((v, w), he_id).is_some() {
                return Err(MeshError::NonManifoldEdge { v0: v, v1: w });
            }
        }
    }

    // Second pass: twins, creating boundary half-edges where none exist.
    // Walk interior half-edges in storage order so IDs are reproducible.
    let num_interior = mesh.num_halfedges();
    for i in 0..num_interior {
        let he = HalfEdgeId::<I>::new(i);
        if mesh.twin(he).is_valid() {
            continue;
        }
        let v0 = mesh.origin(he).index();
        let v1 = mesh.origin(mesh.next(he)).index();

        if let Some(&twin) = edge_map.get(&(v1, v0)) {
            mesh.halfedge_mut(he).twin = twin;
            mesh.halfedge_mut(twin).twin = he;
        } else {
            let boundary = HalfEdgeId::<I>::new(mesh.num_halfedges());
            mesh.halfedges.push(HalfEdge {
                origin: vertex_ids[v1],
                twin: he,
                ..HalfEdge::new()
            });
            mesh.halfedge_mut(he).twin = boundary;
        }
    }

    link_boundary_loops(&mut mesh, num_interior);
    fix_boundary_vertex_halfedges(&mut mesh);

    Ok(mesh)
}

/// Build a half-edge mesh from vertices and triangle faces.
///
/// # Example
/// ```
/// use flatmesh::mesh::{build_from_triangles, HalfEdgeMesh};
/// use nalgebra::Point3;
///
/// let vertices = vec![
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(1.0, 0.0, 0.0),
///     Point3::new(0.5, 1.0, 0.0),
/// ];
/// let mesh: HalfEdgeMesh = build_from_triangles(&vertices, &[[0, 1, 2]]).unwrap();
/// assert!(mesh.is_triangle_mesh());
/// ```
pub fn build_from_triangles<I: MeshIndex>(
    vertices: &[Point3<f64>],
    faces: &[[usize; 3]],
) -> Result<HalfEdgeMesh<I>> {
    build_from_polygons(vertices, faces)
}

/// Build a half-edge mesh from vertices and quad faces.
pub fn build_from_quads<I: MeshIndex>(
    vertices: &[Point3<f64>],
    faces: &[[usize; 4]],
) -> Result<HalfEdgeMesh<I>> {
    build_from_polygons(vertices, faces)
}

fn validate_face(fi: usize, corners: &[usize], num_vertices: usize) -> Result<()> {
    if corners.len() < 3 {
        return Err(MeshError::DegenerateFace { face: fi });
    }
    for (k, &vi) in corners.iter().enumerate() {
        if vi >= num_vertices {
            return Err(MeshError::InvalidVertexIndex { face: fi, vertex: vi });
        }
        if corners[..k].contains(&vi) {
            return Err(MeshError::DegenerateFace { face: fi });
        }
    }
    Ok(())
}

/// Link boundary half-edges (stored after the interior ones) into loops.
fn link_boundary_loops<I: MeshIndex>(mesh: &mut HalfEdgeMesh<I>, first_boundary: usize) {
    let boundary: Vec<HalfEdgeId<I>> = (first_boundary..mesh.num_halfedges())
        .map(HalfEdgeId::new)
        .collect();

    let mut outgoing: HashMap<usize, HalfEdgeId<I>> = HashMap::with_capacity(boundary.len());
    for &he in &boundary {
        outgoing.insert(mesh.origin(he).index(), he);
    }

    for &he in &boundary {
        let dest = mesh.dest(he).index();
        if let Some(&next) = outgoing.get(&dest) {
            mesh.halfedge_mut(he).next = next;
            mesh.halfedge_mut(next).prev = he;
        }
    }
}

/// Point boundary vertices at an outgoing boundary half-edge.
fn fix_boundary_vertex_halfedges<I: MeshIndex>(mesh: &mut HalfEdgeMesh<I>) {
    for vid in (0..mesh.num_vertices()).map(VertexId::<I>::new) {
        let start = mesh.vertex(vid).halfedge;
        if !start.is_valid() {
            continue;
        }

        let mut he = start;
        loop {
            if mesh.is_boundary_halfedge(he) {
                mesh.vertex_mut(vid).halfedge = he;
                break;
            }
            he = mesh.next(mesh.twin(he));
            if !he.is_valid() || he == start {
                break;
            }
        }
    }
}

/// Convert a half-edge mesh back to a face-vertex representation.
///
/// Returns `(vertices, faces)`, each face listed from its starting half-edge.
pub fn to_face_vertex<I: MeshIndex>(mesh: &HalfEdgeMesh<I>) -> (Vec<Point3<f64>>, Vec<Vec<usize>>) {
    let vertices = mesh.vertex_ids().map(|v| *mesh.position(v)).collect();
    let faces = mesh
        .face_ids()
        .map(|f| mesh.face_vertices(f).map(|v| v.index()).collect())
        .collect();
    (vertices, faces)
}
