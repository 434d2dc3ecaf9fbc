//! In-place fan triangulation of polygon faces.

use crate::mesh::{Face, FaceId, HalfEdge, HalfEdgeId, HalfEdgeMesh, MeshIndex};

/// Split every face with more than three corners into a triangle fan.
///
/// Each polygon `(v0, v1, ..., vn-1)` is cut into `(v0, vk, vk+1)` triangles.
/// The split-off triangles are appended as new faces; the original face keeps
/// the last triangle of its fan and still starts at `v0`. No vertices are
/// added or reordered, so vertex handles stay valid.
///
/// Returns the number of faces added.
///
/// # Example
///
/// ```
/// use flatmesh::algo::triangulate;
/// use flatmesh::mesh::{build_from_quads, HalfEdgeMesh};
/// use nalgebra::Point3;
///
/// let vertices = vec![
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(1.0, 0.0, 0.0),
///     Point3::new(1.0, 1.0, 0.0),
///     Point3::new(0.0, 1.0, 0.0),
/// ];
/// let mut mesh: HalfEdgeMesh = build_from_quads(&vertices, &[[0, 1, 2, 3]]).unwrap();
///
/// assert_eq!(triangulate(&mut mesh), 1);
/// assert!(mesh.is_triangle_mesh());
/// ```
pub fn triangulate<I: MeshIndex>(mesh: &mut HalfEdgeMesh<I>) -> usize {
    let num_faces = mesh.num_faces();
    let added: usize = (0..num_faces)
        .map(|fi| triangulate_face(mesh, FaceId::new(fi)))
        .sum();

    log::trace!("triangulated {} faces into {} triangles", num_faces, num_faces + added);
    added
}

fn triangulate_face<I: MeshIndex>(mesh: &mut HalfEdgeMesh<I>, f: FaceId<I>) -> usize {
    let mut degree = mesh.face_degree(f);
    let mut added = 0;

    while degree > 3 {
        // Cut the triangle (v0, v1, v2) off the front of the face.
        let h0 = mesh.face(f).halfedge; // v0 -> v1
        let h1 = mesh.next(h0); // v1 -> v2
        let h2 = mesh.next(h1); // v2 -> v3
        let last = mesh.prev(h0); // vn-1 -> v0
        let v0 = mesh.origin(h0);
        let v2 = mesh.origin(h2);

        let cut = HalfEdgeId::<I>::new(mesh.num_halfedges());
        let rest = HalfEdgeId::<I>::new(mesh.num_halfedges() + 1);
        let tri = FaceId::<I>::new(mesh.num_faces());

        mesh.halfedges.push(HalfEdge {
            origin: v2,
            twin: rest,
            next: h0,
            prev: h1,
            face: tri,
        });
        mesh.halfedges.push(HalfEdge {
            origin: v0,
            twin: cut,
            next: h2,
            prev: last,
            face: f,
        });
        mesh.faces.push(Face::new(h0));

        {
            let he = mesh.halfedge_mut(h0);
            he.prev = cut;
            he.face = tri;
        }
        {
            let he = mesh.halfedge_mut(h1);
            he.next = cut;
            he.face = tri;
        }
        mesh.halfedge_mut(h2).prev = rest;
        mesh.halfedge_mut(last).next = rest;
        mesh.face_mut(f).halfedge = rest;

        degree -= 1;
        added += 1;
    }

    added
}
