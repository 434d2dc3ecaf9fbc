//! Conversion from half-edge meshes to flat render buffers.
//!
//! A conversion runs up to five stages in a fixed order:
//!
//! 1. **Vertices**: positions in vertex iteration order ([`add_vertices`])
//! 2. **Indices**: direct, triangulated or stripified ([`build_indices`])
//! 3. **Normals** ([`add_normals`])
//! 4. **Colors**, cast to 8-bit RGBA ([`add_colors`])
//! 5. **Texture coordinates** ([`add_texcoords`])
//!
//! [`AttributeSelector`] picks the stages and [`ConversionOptions`] picks the
//! index mode. The order of the stages never depends on the selector.
//!
//! # Failure
//!
//! [`convert`] and [`convert_with`] always return a mesh. An attribute the
//! source lacks leaves its sequence empty, and a stripification that yields no
//! strips leaves the index sequence empty. Use [`try_convert`] to have the
//! latter reported as [`MeshError::StripifyFailed`].
//!
//! # Example
//!
//! ```
//! use flatmesh::convert::{convert_with, AttributeSelector, ConversionOptions};
//! use flatmesh::mesh::{build_from_quads, HalfEdgeMesh};
//! use nalgebra::Point3;
//!
//! let vertices = vec![
//!     Point3::new(0.0, 0.0, 0.0),
//!     Point3::new(1.0, 0.0, 0.0),
//!     Point3::new(1.0, 1.0, 0.0),
//!     Point3::new(0.0, 1.0, 0.0),
//! ];
//! let mesh: HalfEdgeMesh = build_from_quads(&vertices, &[[0, 1, 2, 3]]).unwrap();
//!
//! let flat = convert_with(&mesh, AttributeSelector::ALL, ConversionOptions::TRIANGULATE);
//! assert_eq!(flat.positions.len(), 4);
//! assert_eq!(flat.triangle_count(), 2);
//! assert!(flat.colors.is_empty());
//! ```

mod indices;
mod transfer;

pub use indices::{
    add_indices, add_indices_stripified, add_indices_triangulated, build_indices,
    try_add_indices_stripified,
};
pub use transfer::{add_colors, add_normals, add_texcoords, add_vertices, VertexOrder};

use bitflags::bitflags;

use crate::error::{MeshError, Result};
use crate::flat::{AttributeAppendable, FlatMesh};
use crate::mesh::{HalfEdgeMesh, MeshIndex};

bitflags! {
    /// Which parts of the source mesh to transfer.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct AttributeSelector: u32 {
        /// Vertex positions.
        const VERTICES = 2;
        /// Face indices.
        const INDICES = 4;
        /// Vertex normals.
        const NORMALS = 8;
        /// Vertex colors.
        const COLORS = 16;
        /// 2D texture coordinates.
        const TEXCOORDS = 32;
        /// Everything.
        const ALL = Self::VERTICES.bits()
            | Self::INDICES.bits()
            | Self::NORMALS.bits()
            | Self::COLORS.bits()
            | Self::TEXCOORDS.bits();
    }
}

impl Default for AttributeSelector {
    fn default() -> Self {
        Self::ALL
    }
}

bitflags! {
    /// How indices are generated.
    ///
    /// The flags combine: with both set, the triangulated copy is stripified.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ConversionOptions: u32 {
        /// Triangulate a working copy before indexing.
        const TRIANGULATE = 2;
        /// Emit concatenated triangle strips instead of faces.
        const STRIPIFY = 4;
    }
}

impl ConversionOptions {
    /// Direct per-face indexing.
    pub const NONE: Self = Self::empty();
}

/// Convert every attribute with direct indexing.
///
/// Same as `convert_with(mesh, AttributeSelector::ALL, ConversionOptions::NONE)`.
pub fn convert<I: MeshIndex>(mesh: &HalfEdgeMesh<I>) -> FlatMesh {
    convert_with(mesh, AttributeSelector::default(), ConversionOptions::default())
}

/// Convert the selected attributes into a new [`FlatMesh`].
pub fn convert_with<I: MeshIndex>(
    mesh: &HalfEdgeMesh<I>,
    attributes: AttributeSelector,
    options: ConversionOptions,
) -> FlatMesh {
    let mut out = FlatMesh::new();
    convert_into(mesh, attributes, options, &mut out);
    out
}

/// Convert the selected attributes into an existing sink.
///
/// Data is appended; the sink is not cleared first.
pub fn convert_into<I, T>(
    mesh: &HalfEdgeMesh<I>,
    attributes: AttributeSelector,
    options: ConversionOptions,
    out: &mut T,
) where
    I: MeshIndex,
    T: AttributeAppendable + ?Sized,
{
    if let Err(e) = run_stages(mesh, attributes, options, out, false) {
        // Lenient runs swallow every stage error before it gets here
        log::error!("conversion stopped early: {}", e);
    }
}

/// Convert the selected attributes, failing if stripification yields nothing.
///
/// # Errors
///
/// [`MeshError::StripifyFailed`] when [`AttributeSelector::INDICES`] and
/// [`ConversionOptions::STRIPIFY`] are set and the (possibly triangulated)
/// mesh has no faces or a non-triangular face.
pub fn try_convert<I: MeshIndex>(
    mesh: &HalfEdgeMesh<I>,
    attributes: AttributeSelector,
    options: ConversionOptions,
) -> Result<FlatMesh> {
    let mut out = FlatMesh::new();
    run_stages(mesh, attributes, options, &mut out, true)?;
    Ok(out)
}

/// Convert a flat mesh back into a half-edge mesh.
///
/// Not supported: always returns [`MeshError::NotImplemented`].
pub fn to_halfedge_mesh<I: MeshIndex>(_flat: &FlatMesh) -> Result<HalfEdgeMesh<I>> {
    Err(MeshError::NotImplemented("flat mesh to half-edge mesh conversion"))
}

fn run_stages<I, T>(
    mesh: &HalfEdgeMesh<I>,
    attributes: AttributeSelector,
    options: ConversionOptions,
    out: &mut T,
    strict: bool,
) -> Result<()>
where
    I: MeshIndex,
    T: AttributeAppendable + ?Sized,
{
    let per_vertex = AttributeSelector::NORMALS | AttributeSelector::COLORS | AttributeSelector::TEXCOORDS;

    let order = if attributes.contains(AttributeSelector::VERTICES) {
        Some(add_vertices(mesh, out))
    } else if attributes.intersects(per_vertex) {
        Some(VertexOrder::of(mesh))
    } else {
        None
    };

    let mut num_indices = 0;
    if attributes.contains(AttributeSelector::INDICES) {
        match build_indices(mesh, options, out) {
            Ok(count) => num_indices = count,
            Err(e) if strict => return Err(e),
            Err(e) => log::warn!("{}, no indices emitted", e),
        }
    }

    let (mut num_normals, mut num_colors, mut num_texcoords) = (0, 0, 0);
    if let Some(order) = &order {
        if attributes.contains(AttributeSelector::NORMALS) {
            num_normals = add_normals(mesh, order, out);
        }
        if attributes.contains(AttributeSelector::COLORS) {
            num_colors = add_colors(mesh, order, out);
        }
        if attributes.contains(AttributeSelector::TEXCOORDS) {
            num_texcoords = add_texcoords(mesh, order, out);
        }
    }

    log::debug!(
        "converted mesh ({} vertices, {} faces) with {:?} {:?}: {} indices, {} normals, {} colors, {} texcoords",
        mesh.num_vertices(),
        mesh.num_faces(),
        attributes,
        options,
        num_indices,
        num_normals,
        num_colors,
        num_texcoords
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::{build_from_polygons, build_from_quads, FaceId, VertexColors};
    use nalgebra::{Point2, Point3, Vector3};

    fn quad() -> HalfEdgeMesh {
        let vertices = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        ];
        build_from_quads(&vertices, &[[0, 1, 2, 3]]).unwrap()
    }

    /// A 3x2 strip of polygons: quad, pentagon, triangle, quad.
    fn mixed_sheet() -> HalfEdgeMesh {
        let vertices = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(2.0, 0.0, 0.0),
            Point3::new(3.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
            Point3::new(2.0, 1.0, 0.0),
            Point3::new(3.0, 1.0, 0.0),
            Point3::new(1.5, 1.5, 0.0),
            Point3::new(3.0, 2.0, 0.0),
        ];
        let faces: Vec<Vec<usize>> = vec![
            vec![0, 1, 5, 4],
            vec![1, 2, 6, 8, 5],
            vec![2, 3, 6],
            vec![3, 7, 9, 6],
        ];
        build_from_polygons(&vertices, &faces).unwrap()
    }

    fn decorated_sheet() -> HalfEdgeMesh {
        let mut mesh = mixed_sheet();
        let n = mesh.num_vertices();
        mesh.compute_vertex_normals();
        mesh.set_vertex_colors(VertexColors::Rgb8((0..n).map(|i| [i as u8, 0, 0]).collect()))
            .unwrap();
        mesh.set_vertex_texcoords((0..n).map(|i| Point2::new(i as f64 / 10.0, 0.5)).collect())
            .unwrap();
        mesh
    }

    fn degree_sum(mesh: &HalfEdgeMesh) -> usize {
        mesh.face_ids().map(|f| mesh.face_degree(f)).sum()
    }

    #[test]
    fn test_flag_values() {
        assert_eq!(AttributeSelector::VERTICES.bits(), 2);
        assert_eq!(AttributeSelector::TEXCOORDS.bits(), 32);
        assert_eq!(AttributeSelector::ALL.bits(), 62);
        assert_eq!(AttributeSelector::default(), AttributeSelector::ALL);
        assert_eq!(ConversionOptions::default(), ConversionOptions::NONE);
        assert!(ConversionOptions::NONE.is_empty());
        assert_eq!(ConversionOptions::TRIANGULATE.bits(), 2);
        assert_eq!(ConversionOptions::STRIPIFY.bits(), 4);
    }

    #[test]
    fn test_quad_direct_indices() {
        let flat = convert_with(&quad(), AttributeSelector::INDICES, ConversionOptions::NONE);

        assert_eq!(flat.indices, vec![0, 1, 2, 3]);
        assert!(flat.positions.is_empty());
    }

    #[test]
    fn test_quad_triangulated_indices() {
        let mesh = quad();
        let flat = convert_with(&mesh, AttributeSelector::INDICES, ConversionOptions::TRIANGULATE);

        assert_eq!(flat.indices, vec![0, 2, 3, 0, 1, 2]);
        assert_eq!(flat.triangle_count(), 2);
        assert_eq!(mesh.face_degree(FaceId::new(0)), 4);
        assert_eq!(mesh.num_faces(), 1);
    }

    #[test]
    fn test_positions_match_vertex_count() {
        let mesh = mixed_sheet();
        let flat = convert(&mesh);

        assert_eq!(flat.positions.len(), mesh.num_vertices());
        assert_eq!(flat.positions[8], [1.5, 1.5, 0.0]);
    }

    #[test]
    fn test_missing_colors_stay_empty() {
        let mut mesh = decorated_sheet();
        mesh.clear_vertex_colors();
        let flat = convert(&mesh);

        assert!(flat.colors.is_empty());
        assert!(!flat.positions.is_empty());
        assert_eq!(flat.normals.len(), mesh.num_vertices());
        assert_eq!(flat.texcoords.len(), mesh.num_vertices());
    }

    #[test]
    fn test_all_attributes_aligned() {
        let mesh = decorated_sheet();
        let flat = convert(&mesh);
        let n = mesh.num_vertices();

        assert_eq!(flat.positions.len(), n);
        assert_eq!(flat.normals.len(), n);
        assert_eq!(flat.colors.len(), n);
        assert_eq!(flat.texcoords.len(), n);
        for (k, color) in flat.colors.iter().enumerate() {
            assert_eq!(*color, [k as u8, 0, 0, 255]);
        }
        assert_eq!(flat.texcoords[3], [0.3, 0.5]);
        for normal in &flat.normals {
            assert_eq!(*normal, [0.0, 0.0, 1.0]);
        }
    }

    #[test]
    fn test_direct_index_count() {
        let mesh = mixed_sheet();
        let flat = convert(&mesh);

        assert_eq!(flat.indices.len(), degree_sum(&mesh));
        assert!(flat.indices.iter().all(|&i| (i as usize) < mesh.num_vertices()));
    }

    #[test]
    fn test_triangulated_index_count() {
        let mesh = mixed_sheet();
        let flat = convert_with(&mesh, AttributeSelector::ALL, ConversionOptions::TRIANGULATE);

        assert_eq!(flat.indices.len() % 3, 0);
        // Each n-gon becomes n - 2 triangles
        let expected: usize = mesh.face_ids().map(|f| mesh.face_degree(f) - 2).sum();
        assert_eq!(flat.triangle_count(), expected);
        assert_eq!(flat.positions.len(), mesh.num_vertices());
    }

    #[test]
    fn test_stripify_without_triangulation_is_empty() {
        let mesh = mixed_sheet();
        let flat = convert_with(&mesh, AttributeSelector::ALL, ConversionOptions::STRIPIFY);

        assert!(flat.indices.is_empty());
        assert_eq!(flat.positions.len(), mesh.num_vertices());
    }

    #[test]
    fn test_stripify_no_faces_is_empty() {
        let mut mesh = HalfEdgeMesh::<u32>::new();
        mesh.add_vertex(Point3::new(0.0, 0.0, 0.0));
        mesh.add_vertex(Point3::new(1.0, 0.0, 0.0));

        let flat = convert_with(
            &mesh,
            AttributeSelector::ALL,
            ConversionOptions::TRIANGULATE | ConversionOptions::STRIPIFY,
        );
        assert!(flat.indices.is_empty());
        assert_eq!(flat.positions.len(), 2);
    }

    #[test]
    fn test_triangulate_and_stripify() {
        let mesh = mixed_sheet();
        let flat = convert_with(
            &mesh,
            AttributeSelector::INDICES,
            ConversionOptions::TRIANGULATE | ConversionOptions::STRIPIFY,
        );

        let triangles: usize = mesh.face_ids().map(|f| mesh.face_degree(f) - 2).sum();
        assert!(flat.indices.len() >= triangles + 2);
        assert!(flat.indices.len() <= triangles * 3);
        assert!(flat.indices.iter().all(|&i| (i as usize) < mesh.num_vertices()));
    }

    #[test]
    fn test_conversion_is_idempotent() {
        let mesh = decorated_sheet();
        for options in [
            ConversionOptions::NONE,
            ConversionOptions::TRIANGULATE,
            ConversionOptions::TRIANGULATE | ConversionOptions::STRIPIFY,
        ] {
            let a = convert_with(&mesh, AttributeSelector::ALL, options);
            let b = convert_with(&mesh, AttributeSelector::ALL, options);
            assert_eq!(a, b);
        }
    }

    #[test]
    fn test_attributes_without_positions() {
        let mesh = decorated_sheet();
        let flat = convert_with(
            &mesh,
            AttributeSelector::NORMALS | AttributeSelector::COLORS,
            ConversionOptions::NONE,
        );

        assert!(flat.positions.is_empty());
        assert!(flat.indices.is_empty());
        assert!(flat.texcoords.is_empty());
        assert_eq!(flat.normals.len(), mesh.num_vertices());
        assert_eq!(flat.colors.len(), mesh.num_vertices());
    }

    #[test]
    fn test_empty_selector() {
        let flat = convert_with(&decorated_sheet(), AttributeSelector::empty(), ConversionOptions::NONE);
        assert_eq!(flat, FlatMesh::new());
    }

    #[test]
    fn test_small_index_type() {
        let vertices = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        ];
        let mut mesh: HalfEdgeMesh<u16> = build_from_quads(&vertices, &[[0, 1, 2, 3]]).unwrap();
        mesh.set_vertex_normals(vec![Vector3::z(); 4]).unwrap();

        let flat = convert(&mesh);
        assert_eq!(flat.indices, vec![0, 1, 2, 3]);
        assert_eq!(flat.normals.len(), 4);
    }

    #[test]
    fn test_try_convert_reports_stripify_failure() {
        let mesh = mixed_sheet();

        let err = try_convert(&mesh, AttributeSelector::ALL, ConversionOptions::STRIPIFY).unwrap_err();
        assert_eq!(
            err,
            MeshError::StripifyFailed {
                reason: "mesh has non-triangular faces"
            }
        );

        let flat = try_convert(
            &mesh,
            AttributeSelector::ALL,
            ConversionOptions::TRIANGULATE | ConversionOptions::STRIPIFY,
        )
        .unwrap();
        assert!(!flat.indices.is_empty());

        // Indices not requested: stripify never runs
        assert!(try_convert(&mesh, AttributeSelector::VERTICES, ConversionOptions::STRIPIFY).is_ok());
    }

    #[test]
    fn test_convert_into_custom_sink() {
        #[derive(Default)]
        struct Counter {
            vertices: usize,
            indices: usize,
            normals: usize,
            colors: usize,
            texcoords: usize,
        }

        impl AttributeAppendable for Counter {
            fn add_vertex(&mut self, _: Point3<f32>) {
                self.vertices += 1;
            }
            fn add_index(&mut self, _: u32) {
                self.indices += 1;
            }
            fn add_normal(&mut self, _: Vector3<f32>) {
                self.normals += 1;
            }
            fn add_color(&mut self, _: [u8; 4]) {
                self.colors += 1;
            }
            fn add_texcoord(&mut self, _: Point2<f32>) {
                self.texcoords += 1;
            }
        }

        let mesh = decorated_sheet();
        let mut counter = Counter::default();
        convert_into(&mesh, AttributeSelector::ALL, ConversionOptions::NONE, &mut counter);

        assert_eq!(counter.vertices, mesh.num_vertices());
        assert_eq!(counter.indices, degree_sum(&mesh));
        assert_eq!(counter.normals, mesh.num_vertices());
        assert_eq!(counter.colors, mesh.num_vertices());
        assert_eq!(counter.texcoords, mesh.num_vertices());
    }

    #[test]
    fn test_reverse_conversion_not_implemented() {
        let flat = convert(&quad());
        let result: Result<HalfEdgeMesh> = to_halfedge_mesh(&flat);
        assert!(matches!(result, Err(MeshError::NotImplemented(_))));
    }
}
