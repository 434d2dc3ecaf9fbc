//! Half-edge mesh data structure.
//!
//! This module provides a half-edge (doubly-connected edge list)
//! representation for polygon meshes, together with optional per-vertex
//! attributes.
//!
//! # Structure
//!
//! - Each edge is split into two **half-edges** pointing in opposite directions
//! - Each half-edge knows its **twin**, **next** and **prev** half-edges around
//!   its face, its **origin vertex**, and its **face**
//! - Each vertex stores one outgoing half-edge
//! - Each face stores one half-edge on its boundary; faces may have any
//!   number of corners (three or more)
//!
//! # Boundary Handling
//!
//! Boundary half-edges have an invalid face ID. Their twins are the interior
//! half-edges. Boundary loops can be walked with `next`.
//!
//! # Attributes
//!
//! Normals, colors and texture coordinates are optional. Each is either
//! present for every vertex or absent for the whole mesh, and the
//! `has_vertex_*` queries report which.

use nalgebra::{Point2, Point3, Vector3};

use super::attributes::VertexColors;
use super::index::{FaceId, HalfEdgeId, MeshIndex, VertexId};
use crate::error::{MeshError, Result};

/// A vertex in the half-edge mesh.
#[derive(Debug, Clone)]
pub struct Vertex<I: MeshIndex = u32> {
    /// The 3D position of this vertex.
    pub position: Point3<f64>,

    /// One outgoing half-edge from this vertex.
    /// For boundary vertices, this is a boundary half-edge.
    pub halfedge: HalfEdgeId<I>,
}

impl<I: MeshIndex> Vertex<I> {
    /// Create an isolated vertex at the given position.
    pub fn new(position: Point3<f64>) -> Self {
        Self {
            position,
            halfedge: HalfEdgeId::invalid(),
        }
    }
}

/// A half-edge in the mesh.
#[derive(Debug, Clone, Copy)]
pub struct HalfEdge<I: MeshIndex = u32> {
    /// The vertex this half-edge originates from.
    pub origin: VertexId<I>,

    /// The opposite half-edge.
    pub twin: HalfEdgeId<I>,

    /// The next half-edge around the face (counter-clockwise).
    pub next: HalfEdgeId<I>,

    /// The previous half-edge around the face.
    pub prev: HalfEdgeId<I>,

    /// The face this half-edge belongs to. Invalid on the boundary.
    pub face: FaceId<I>,
}

impl<I: MeshIndex> HalfEdge<I> {
    /// Create an unlinked half-edge.
    pub fn new() -> Self {
        Self {
            origin: VertexId::invalid(),
            twin: HalfEdgeId::invalid(),
            next: HalfEdgeId::invalid(),
            prev: HalfEdgeId::invalid(),
            face: FaceId::invalid(),
        }
    }

    /// Check if this half-edge is on the boundary.
    #[inline]
    pub fn is_boundary(&self) -> bool {
        !self.face.is_valid()
    }
}

impl<I: MeshIndex> Default for HalfEdge<I> {
    fn default() -> Self {
        Self::new()
    }
}

/// A face in the half-edge mesh.
#[derive(Debug, Clone, Copy)]
pub struct Face<I: MeshIndex = u32> {
    /// One half-edge on the boundary of this face.
    pub halfedge: HalfEdgeId<I>,
}

impl<I: MeshIndex> Face<I> {
    /// Create a face starting at the given half-edge.
    pub fn new(halfedge: HalfEdgeId<I>) -> Self {
        Self { halfedge }
    }
}

/// A half-edge mesh of arbitrary polygons with optional vertex attributes.
///
/// `Clone` produces an independent deep copy, which is what conversion uses
/// as a working copy before destructive operations such as triangulation.
#[derive(Debug, Clone)]
pub struct HalfEdgeMesh<I: MeshIndex = u32> {
    pub(crate) vertices: Vec<Vertex<I>>,
    pub(crate) halfedges: Vec<HalfEdge<I>>,
    pub(crate) faces: Vec<Face<I>>,

    normals: Option<Vec<Vector3<f64>>>,
    colors: Option<VertexColors>,
    texcoords: Option<Vec<Point2<f64>>>,
}

impl<I: MeshIndex> Default for HalfEdgeMesh<I> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I: MeshIndex> HalfEdgeMesh<I> {
    /// Create a new empty mesh.
    pub fn new() -> Self {
        Self::with_capacity(0, 0, 0)
    }

    /// Create a mesh with pre-allocated storage.
    pub fn with_capacity(num_vertices: usize, num_halfedges: usize, num_faces: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(num_vertices),
            halfedges: Vec::with_capacity(num_halfedges),
            faces: Vec::with_capacity(num_faces),
            normals: None,
            colors: None,
            texcoords: None,
        }
    }

    // ==================== Accessors ====================

    /// Get the number of vertices.
    #[inline]
    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    /// Get the number of half-edges, boundary half-edges included.
    #[inline]
    pub fn num_halfedges(&self) -> usize {
        self.halfedges.len()
    }

    /// Get the number of faces.
    #[inline]
    pub fn num_faces(&self) -> usize {
        self.faces.len()
    }

    /// Get a vertex by ID.
    #[inline]
    pub fn vertex(&self, id: VertexId<I>) -> &Vertex<I> {
        &self.vertices[id.index()]
    }

    #[inline]
    pub(crate) fn vertex_mut(&mut self, id: VertexId<I>) -> &mut Vertex<I> {
        &mut self.vertices[id.index()]
    }

    /// Get a half-edge by ID.
    #[inline]
    pub fn halfedge(&self, id: HalfEdgeId<I>) -> &HalfEdge<I> {
        &self.halfedges[id.index()]
    }

    #[inline]
    pub(crate) fn halfedge_mut(&mut self, id: HalfEdgeId<I>) -> &mut HalfEdge<I> {
        &mut self.halfedges[id.index()]
    }

    /// Get a face by ID.
    #[inline]
    pub fn face(&self, id: FaceId<I>) -> &Face<I> {
        &self.faces[id.index()]
    }

    #[inline]
    pub(crate) fn face_mut(&mut self, id: FaceId<I>) -> &mut Face<I> {
        &mut self.faces[id.index()]
    }

    /// Get the position of a vertex.
    #[inline]
    pub fn position(&self, v: VertexId<I>) -> &Point3<f64> {
        &self.vertex(v).position
    }

    /// Set the position of a vertex.
    #[inline]
    pub fn set_position(&mut self, v: VertexId<I>, pos: Point3<f64>) {
        self.vertex_mut(v).position = pos;
    }

    // ==================== Topology Queries ====================

    /// Get the twin (opposite) half-edge.
    #[inline]
    pub fn twin(&self, he: HalfEdgeId<I>) -> HalfEdgeId<I> {
        self.halfedge(he).twin
    }

    /// Get the next half-edge around the face.
    #[inline]
    pub fn next(&self, he: HalfEdgeId<I>) -> HalfEdgeId<I> {
        self.halfedge(he).next
    }

    /// Get the previous half-edge around the face.
    #[inline]
    pub fn prev(&self, he: HalfEdgeId<I>) -> HalfEdgeId<I> {
        self.halfedge(he).prev
    }

    /// Get the origin vertex of a half-edge.
    #[inline]
    pub fn origin(&self, he: HalfEdgeId<I>) -> VertexId<I> {
        self.halfedge(he).origin
    }

    /// Get the destination vertex of a half-edge.
    #[inline]
    pub fn dest(&self, he: HalfEdgeId<I>) -> VertexId<I> {
        self.origin(self.twin(he))
    }

    /// Get the face of a half-edge.
    #[inline]
    pub fn face_of(&self, he: HalfEdgeId<I>) -> FaceId<I> {
        self.halfedge(he).face
    }

    /// Check if a half-edge is on the boundary.
    #[inline]
    pub fn is_boundary_halfedge(&self, he: HalfEdgeId<I>) -> bool {
        self.halfedge(he).is_boundary()
    }

    /// Check if a vertex is on the boundary. Isolated vertices count as boundary.
    pub fn is_boundary_vertex(&self, v: VertexId<I>) -> bool {
        let start = self.vertex(v).halfedge;
        if !start.is_valid() {
            return true;
        }

        // Outgoing half-edges around v: twin -> next
        let mut he = start;
        loop {
            if self.is_boundary_halfedge(he) {
                return true;
            }
            he = self.next(self.twin(he));
            if he == start {
                break;
            }
        }
        false
    }

    /// Number of corners of a face.
    pub fn face_degree(&self, f: FaceId<I>) -> usize {
        self.face_halfedges(f).count()
    }

    /// Check whether every face is a triangle.
    pub fn is_triangle_mesh(&self) -> bool {
        self.face_ids().all(|f| self.face_degree(f) == 3)
    }

    // ==================== Iteration ====================

    /// Iterate over all vertex IDs in storage order.
    pub fn vertex_ids(&self) -> impl Iterator<Item = VertexId<I>> + '_ {
        (0..self.vertices.len()).map(VertexId::new)
    }

    /// Iterate over all half-edge IDs in storage order.
    pub fn halfedge_ids(&self) -> impl Iterator<Item = HalfEdgeId<I>> + '_ {
        (0..self.halfedges.len()).map(HalfEdgeId::new)
    }

    /// Iterate over all face IDs in storage order.
    pub fn face_ids(&self) -> impl Iterator<Item = FaceId<I>> + '_ {
        (0..self.faces.len()).map(FaceId::new)
    }

    /// Iterate over half-edges around a face, starting at the face's half-edge.
    pub fn face_halfedges(&self, f: FaceId<I>) -> FaceHalfEdgeIter<'_, I> {
        FaceHalfEdgeIter::new(self, f)
    }

    /// Iterate over the vertices of a face in winding order.
    pub fn face_vertices(&self, f: FaceId<I>) -> impl Iterator<Item = VertexId<I>> + '_ {
        self.face_halfedges(f).map(|he| self.origin(he))
    }

    // ==================== Geometry ====================

    /// Area vector of a face: its normal scaled by twice its area.
    ///
    /// Uses Newell's method, so non-planar polygons get a sensible average.
    pub fn face_area_vector(&self, f: FaceId<I>) -> Vector3<f64> {
        let mut sum = Vector3::zeros();
        for he in self.face_halfedges(f) {
            let p0 = self.position(self.origin(he));
            let p1 = self.position(self.origin(self.next(he)));
            sum += p0.coords.cross(&p1.coords);
        }
        sum
    }

    /// Unit normal of a face. Degenerate faces yield the zero vector.
    pub fn face_normal(&self, f: FaceId<I>) -> Vector3<f64> {
        self.face_area_vector(f)
            .try_normalize(f64::EPSILON)
            .unwrap_or_else(Vector3::zeros)
    }

    /// Area of a face.
    pub fn face_area(&self, f: FaceId<I>) -> f64 {
        0.5 * self.face_area_vector(f).norm()
    }

    // ==================== Construction ====================

    /// Add an isolated vertex and return its ID.
    ///
    /// Present attributes are extended with a default entry (zero normal,
    /// opaque white, origin texture coordinate).
    pub fn add_vertex(&mut self, position: Point3<f64>) -> VertexId<I> {
        let id = VertexId::new(self.vertices.len());
        self.vertices.push(Vertex::new(position));
        if let Some(normals) = &mut self.normals {
            normals.push(Vector3::zeros());
        }
        if let Some(colors) = &mut self.colors {
            colors.push_default();
        }
        if let Some(texcoords) = &mut self.texcoords {
            texcoords.push(Point2::origin());
        }
        id
    }

    // ==================== Attributes ====================

    /// Whether the mesh carries per-vertex normals.
    #[inline]
    pub fn has_vertex_normals(&self) -> bool {
        self.normals.is_some()
    }

    /// Whether the mesh carries per-vertex colors.
    #[inline]
    pub fn has_vertex_colors(&self) -> bool {
        self.colors.is_some()
    }

    /// Whether the mesh carries per-vertex 2D texture coordinates.
    #[inline]
    pub fn has_vertex_texcoords(&self) -> bool {
        self.texcoords.is_some()
    }

    /// Stored normal of a vertex, if normals are present.
    #[inline]
    pub fn normal(&self, v: VertexId<I>) -> Option<&Vector3<f64>> {
        self.normals.as_ref().map(|n| &n[v.index()])
    }

    /// Stored color of a vertex in its native representation.
    #[inline]
    pub fn vertex_colors(&self) -> Option<&VertexColors> {
        self.colors.as_ref()
    }

    /// Color of a vertex cast to 8-bit RGBA, if colors are present.
    #[inline]
    pub fn color(&self, v: VertexId<I>) -> Option<[u8; 4]> {
        self.colors.as_ref().map(|c| c.rgba8(v.index()))
    }

    /// Stored texture coordinate of a vertex, if present.
    #[inline]
    pub fn texcoord(&self, v: VertexId<I>) -> Option<&Point2<f64>> {
        self.texcoords.as_ref().map(|t| &t[v.index()])
    }

    /// Assign one normal per vertex.
    pub fn set_vertex_normals(&mut self, normals: Vec<Vector3<f64>>) -> Result<()> {
        self.check_attribute_len("normals", normals.len())?;
        self.normals = Some(normals);
        Ok(())
    }

    /// Assign one color per vertex.
    pub fn set_vertex_colors(&mut self, colors: VertexColors) -> Result<()> {
        self.check_attribute_len("colors", colors.len())?;
        self.colors = Some(colors);
        Ok(())
    }

    /// Assign one texture coordinate per vertex.
    pub fn set_vertex_texcoords(&mut self, texcoords: Vec<Point2<f64>>) -> Result<()> {
        self.check_attribute_len("texcoords", texcoords.len())?;
        self.texcoords = Some(texcoords);
        Ok(())
    }

    /// Drop the normal attribute.
    pub fn clear_vertex_normals(&mut self) {
        self.normals = None;
    }

    /// Drop the color attribute.
    pub fn clear_vertex_colors(&mut self) {
        self.colors = None;
    }

    /// Drop the texture coordinate attribute.
    pub fn clear_vertex_texcoords(&mut self) {
        self.texcoords = None;
    }

    /// Compute area-weighted vertex normals from the faces and store them.
    ///
    /// Vertices without incident faces get the zero vector.
    pub fn compute_vertex_normals(&mut self) {
        let mut normals = vec![Vector3::zeros(); self.num_vertices()];
        for f in self.face_ids() {
            let area_vector = self.face_area_vector(f);
            for v in self.face_vertices(f) {
                normals[v.index()] += area_vector;
            }
        }
        for n in &mut normals {
            *n = n.try_normalize(f64::EPSILON).unwrap_or_else(Vector3::zeros);
        }
        self.normals = Some(normals);
    }

    fn check_attribute_len(&self, attribute: &'static str, found: usize) -> Result<()> {
        if found != self.num_vertices() {
            return Err(MeshError::attribute_length(attribute, self.num_vertices(), found));
        }
        Ok(())
    }

    // ==================== Validation ====================

    /// Check if the mesh connectivity is consistent.
    pub fn is_valid(&self) -> bool {
        for (i, v) in self.vertices.iter().enumerate() {
            if v.halfedge.is_valid() && self.halfedge(v.halfedge).origin.index() != i {
                return false;
            }
        }

        for (i, he) in self.halfedges.iter().enumerate() {
            let id = HalfEdgeId::<I>::new(i);

            if he.twin.is_valid() && self.halfedge(he.twin).twin != id {
                return false;
            }
            if he.next.is_valid() && self.halfedge(he.next).prev != id {
                return false;
            }
            if he.prev.is_valid() && self.halfedge(he.prev).next != id {
                return false;
            }
            if he.face.is_valid() && !he.next.is_valid() {
                return false;
            }
        }

        for (i, face) in self.faces.iter().enumerate() {
            if !face.halfedge.is_valid() {
                return false;
            }
            let id = FaceId::<I>::new(i);
            if self.face_halfedges(id).any(|he| self.face_of(he) != id) {
                return false;
            }
        }

        true
    }
}

/// Iterator over half-edges around a face.
pub struct FaceHalfEdgeIter<'a, I: MeshIndex = u32> {
    mesh: &'a HalfEdgeMesh<I>,
    start: HalfEdgeId<I>,
    current: HalfEdgeId<I>,
    done: bool,
}

impl<'a, I: MeshIndex> FaceHalfEdgeIter<'a, I> {
    fn new(mesh: &'a HalfEdgeMesh<I>, f: FaceId<I>) -> Self {
        let start = mesh.face(f).halfedge;
        Self {
            mesh,
            start,
            current: start,
            done: !start.is_valid(),
        }
    }
}

impl<'a, I: MeshIndex> Iterator for FaceHalfEdgeIter<'a, I> {
    type Item = HalfEdgeId<I>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let result = self.current;
        self.current = self.mesh.next(self.current);

        if self.current == self.start {
            self.done = true;
        }

        Some(result)
    }
}
