//! Per-vertex attribute transfer.
//!
//! [`add_vertices`] fixes the vertex index space of the flat mesh and returns
//! it as a [`VertexOrder`]. The other stages take that order, so normals,
//! colors and texture coordinates always line up with the positions.

use crate::flat::AttributeAppendable;
use crate::mesh::{HalfEdgeMesh, MeshIndex, VertexId};

/// The order in which source vertices were written to a flat mesh.
///
/// Entry `k` is the source vertex whose data sits at slot `k` of every
/// per-vertex sequence of the target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VertexOrder<I: MeshIndex = u32> {
    vertices: Vec<VertexId<I>>,
}

impl<I: MeshIndex> VertexOrder<I> {
    /// The native vertex iteration order of `mesh`.
    pub fn of(mesh: &HalfEdgeMesh<I>) -> Self {
        Self {
            vertices: mesh.vertex_ids().collect(),
        }
    }

    /// Number of vertices in the order.
    #[inline]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// Whether the order is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Iterate over the vertices in target slot order.
    pub fn iter(&self) -> impl Iterator<Item = VertexId<I>> + '_ {
        self.vertices.iter().copied()
    }

    /// The vertices in target slot order.
    pub fn as_slice(&self) -> &[VertexId<I>] {
        &self.vertices
    }
}

/// Append one position per source vertex, narrowed to `f32`.
///
/// Returns the order the positions were written in; pass it to the other
/// transfer stages.
pub fn add_vertices<I, T>(mesh: &HalfEdgeMesh<I>, out: &mut T) -> VertexOrder<I>
where
    I: MeshIndex,
    T: AttributeAppendable + ?Sized,
{
    let order = VertexOrder::of(mesh);
    for v in order.iter() {
        out.add_vertex(mesh.position(v).cast::<f32>());
    }
    log::trace!("transferred {} positions", order.len());
    order
}

/// Append one normal per vertex of `order`, if the mesh has normals.
///
/// Returns the number of normals appended, which is 0 when normals are absent.
pub fn add_normals<I, T>(mesh: &HalfEdgeMesh<I>, order: &VertexOrder<I>, out: &mut T) -> usize
where
    I: MeshIndex,
    T: AttributeAppendable + ?Sized,
{
    if !mesh.has_vertex_normals() {
        log::debug!("mesh has no vertex normals, skipping normal transfer");
        return 0;
    }

    let mut count = 0;
    for n in order.iter().filter_map(|v| mesh.normal(v)) {
        out.add_normal(n.cast::<f32>());
        count += 1;
    }
    count
}

/// Append one 8-bit RGBA color per vertex of `order`, if the mesh has colors.
///
/// Colors are cast from their stored representation; see
/// [`ColorCast`](crate::mesh::ColorCast).
pub fn add_colors<I, T>(mesh: &HalfEdgeMesh<I>, order: &VertexOrder<I>, out: &mut T) -> usize
where
    I: MeshIndex,
    T: AttributeAppendable + ?Sized,
{
    let Some(colors) = mesh.vertex_colors() else {
        log::debug!("mesh has no vertex colors, skipping color transfer");
        return 0;
    };

    for v in order.iter() {
        out.add_color(colors.rgba8(v.index()));
    }
    order.len()
}

/// Append one 2D texture coordinate per vertex of `order`, if present.
pub fn add_texcoords<I, T>(mesh: &HalfEdgeMesh<I>, order: &VertexOrder<I>, out: &mut T) -> usize
where
    I: MeshIndex,
    T: AttributeAppendable + ?Sized,
{
    if !mesh.has_vertex_texcoords() {
        log::debug!("mesh has no texture coordinates, skipping texcoord transfer");
        return 0;
    }

    let mut count = 0;
    for uv in order.iter().filter_map(|v| mesh.texcoord(v)) {
        out.add_texcoord(uv.cast::<f32>());
        count += 1;
    }
    count
}
