//! Flat vertex/index buffer meshes.
//!
//! [`FlatMesh`] is the render-side representation: parallel per-vertex
//! attribute arrays plus an index array, without any adjacency. Attribute
//! arrays are either empty (attribute absent) or hold one entry per position.
//!
//! Conversion writes into anything implementing [`AttributeAppendable`], so
//! callers with their own buffer types can skip the intermediate `FlatMesh`.

use nalgebra::{Point2, Point3, Vector3};

/// A sink for flat mesh data.
///
/// Each method appends one element to the corresponding sequence.
pub trait AttributeAppendable {
    /// Append a vertex position.
    fn add_vertex(&mut self, position: Point3<f32>);

    /// Append an index into the position sequence.
    fn add_index(&mut self, index: u32);

    /// Append a vertex normal.
    fn add_normal(&mut self, normal: Vector3<f32>);

    /// Append an 8-bit RGBA vertex color.
    fn add_color(&mut self, color: [u8; 4]);

    /// Append a 2D texture coordinate.
    fn add_texcoord(&mut self, texcoord: Point2<f32>);
}

/// A render-ready mesh of parallel attribute arrays and an index array.
///
/// # Example
///
/// ```
/// use flatmesh::flat::{AttributeAppendable, FlatMesh};
/// use nalgebra::Point3;
///
/// let mut mesh = FlatMesh::new();
/// mesh.add_vertex(Point3::new(0.0, 0.0, 0.0));
/// mesh.add_vertex(Point3::new(1.0, 0.0, 0.0));
/// mesh.add_vertex(Point3::new(0.0, 1.0, 0.0));
/// for i in 0..3 {
///     mesh.add_index(i);
/// }
///
/// assert_eq!(mesh.num_vertices(), 3);
/// assert_eq!(mesh.index_bytes().len(), 12);
/// assert!(!mesh.has_normals());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FlatMesh {
    /// Vertex positions.
    pub positions: Vec<[f32; 3]>,
    /// Vertex normals, parallel to `positions` or empty.
    pub normals: Vec<[f32; 3]>,
    /// Vertex colors, parallel to `positions` or empty.
    pub colors: Vec<[u8; 4]>,
    /// Texture coordinates, parallel to `positions` or empty.
    pub texcoords: Vec<[f32; 2]>,
    /// Indices into `positions`.
    ///
    /// The layout depends on how the mesh was produced: polygon cycles,
    /// a triangle list, or concatenated triangle strips.
    pub indices: Vec<u32>,
}

impl FlatMesh {
    /// Create an empty mesh.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of vertex positions.
    #[inline]
    pub fn num_vertices(&self) -> usize {
        self.positions.len()
    }

    /// Number of indices.
    #[inline]
    pub fn num_indices(&self) -> usize {
        self.indices.len()
    }

    /// Number of triangles when `indices` is a triangle list.
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Whether normals were transferred.
    #[inline]
    pub fn has_normals(&self) -> bool {
        !self.normals.is_empty()
    }

    /// Whether colors were transferred.
    #[inline]
    pub fn has_colors(&self) -> bool {
        !self.colors.is_empty()
    }

    /// Whether texture coordinates were transferred.
    #[inline]
    pub fn has_texcoords(&self) -> bool {
        !self.texcoords.is_empty()
    }

    /// Positions as raw bytes, ready for a vertex buffer upload.
    pub fn position_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.positions)
    }

    /// Normals as raw bytes.
    pub fn normal_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.normals)
    }

    /// Colors as raw bytes.
    pub fn color_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.colors)
    }

    /// Texture coordinates as raw bytes.
    pub fn texcoord_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.texcoords)
    }

    /// Indices as raw bytes, ready for an index buffer upload.
    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }
}

impl AttributeAppendable for FlatMesh {
    #[inline]
    fn add_vertex(&mut self, position: Point3<f32>) {
        self.positions.push(position.coords.into());
    }

    #[inline]
    fn add_index(&mut self, index: u32) {
        self.indices.push(index);
    }

    #[inline]
    fn add_normal(&mut self, normal: Vector3<f32>) {
        self.normals.push(normal.into());
    }

    #[inline]
    fn add_color(&mut self, color: [u8; 4]) {
        self.colors.push(color);
    }

    #[inline]
    fn add_texcoord(&mut self, texcoord: Point2<f32>) {
        self.texcoords.push(texcoord.coords.into());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_operations() {
        let mut mesh = FlatMesh::new();
        mesh.add_vertex(Point3::new(1.0, 2.0, 3.0));
        mesh.add_normal(Vector3::new(0.0, 0.0, 1.0));
        mesh.add_color([1, 2, 3, 4]);
        mesh.add_texcoord(Point2::new(0.25, 0.75));
        mesh.add_index(0);

        assert_eq!(mesh.positions, vec![[1.0, 2.0, 3.0]]);
        assert_eq!(mesh.normals, vec![[0.0, 0.0, 1.0]]);
        assert_eq!(mesh.colors, vec![[1, 2, 3, 4]]);
        assert_eq!(mesh.texcoords, vec![[0.25, 0.75]]);
        assert_eq!(mesh.indices, vec![0]);
    }

    #[test]
    fn test_byte_views() {
        let mut mesh = FlatMesh::new();
        mesh.add_vertex(Point3::new(1.0, 0.0, 0.0));
        mesh.add_color([9, 8, 7, 6]);
        mesh.add_index(1);
        mesh.add_index(2);

        assert_eq!(mesh.position_bytes().len(), 12);
        assert_eq!(mesh.color_bytes(), &[9, 8, 7, 6]);
        assert_eq!(mesh.index_bytes().len(), 8);
        assert!(mesh.normal_bytes().is_empty());
        assert!(mesh.texcoord_bytes().is_empty());
        assert_eq!(&mesh.position_bytes()[..4], &1.0f32.to_ne_bytes());
    }

    #[test]
    fn test_empty_mesh_queries() {
        let mesh = FlatMesh::new();
        assert_eq!(mesh.num_vertices(), 0);
        assert_eq!(mesh.num_indices(), 0);
        assert_eq!(mesh.triangle_count(), 0);
        assert!(!mesh.has_colors());
        assert!(!mesh.has_texcoords());
    }
}
