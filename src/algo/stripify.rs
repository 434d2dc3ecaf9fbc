//! Triangle strip generation.
//!
//! A triangle strip lists vertices so that every consecutive triple forms a
//! triangle, which lets a renderer reuse the two previous vertices of each
//! new triangle. This module greedily decomposes a triangle mesh into strips.
//!
//! # Strip Convention
//!
//! A strip `[s0, s1, s2, s3, ...]` encodes the triangles
//! `(s0, s1, s2)`, `(s2, s1, s3)`, `(s2, s3, s4)`, ...: triangle `i` is
//! `(s[i], s[i+1], s[i+2])` for even `i` and `(s[i+1], s[i], s[i+2])` for odd
//! `i`. Every decoded triangle has the winding of the face it came from.
//!
//! # Algorithm
//!
//! Faces are visited in storage order. Each face not yet covered seeds three
//! candidate strips, one per starting edge. A candidate walks across the
//! edge shared with the next triangle for as long as that neighbour exists
//! and is not yet covered. The longest candidate wins and its faces are
//! marked covered.

use crate::error::{MeshError, Result};
use crate::mesh::{FaceId, HalfEdgeId, HalfEdgeMesh, MeshIndex, VertexId};

/// One triangle strip as an ordered list of vertex handles.
pub type Strip<I = u32> = Vec<VertexId<I>>;

/// Greedy triangle-strip optimizer over a half-edge triangle mesh.
///
/// # Example
///
/// ```
/// use flatmesh::algo::Stripifier;
/// use flatmesh::mesh::{build_from_triangles, HalfEdgeMesh};
/// use nalgebra::Point3;
///
/// let vertices = vec![
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(1.0, 0.0, 0.0),
///     Point3::new(1.0, 1.0, 0.0),
///     Point3::new(0.0, 1.0, 0.0),
/// ];
/// let mesh: HalfEdgeMesh =
///     build_from_triangles(&vertices, &[[0, 1, 2], [0, 2, 3]]).unwrap();
///
/// let mut stripifier = Stripifier::new(&mesh);
/// assert_eq!(stripifier.stripify(), 1);
/// assert!(stripifier.is_valid());
/// assert_eq!(stripifier.strips()[0].len(), 4);
/// ```
#[derive(Debug)]
pub struct Stripifier<'a, I: MeshIndex = u32> {
    mesh: &'a HalfEdgeMesh<I>,
    strips: Vec<Strip<I>>,
}

impl<'a, I: MeshIndex> Stripifier<'a, I> {
    /// Create a stripifier for `mesh`. No strips exist until [`stripify`](Self::stripify) runs.
    pub fn new(mesh: &'a HalfEdgeMesh<I>) -> Self {
        Self {
            mesh,
            strips: Vec::new(),
        }
    }

    /// Compute strips, replacing any previous result.
    ///
    /// Returns the number of strips. A mesh without faces, or with a face
    /// that is not a triangle, yields no strips and leaves the stripifier
    /// invalid.
    pub fn stripify(&mut self) -> usize {
        self.try_stripify().unwrap_or(0)
    }

    /// Compute strips, reporting why none could be produced.
    pub fn try_stripify(&mut self) -> Result<usize> {
        self.strips.clear();

        if self.mesh.num_faces() == 0 {
            return Err(MeshError::StripifyFailed {
                reason: "mesh has no faces",
            });
        }
        if !self.mesh.is_triangle_mesh() {
            return Err(MeshError::StripifyFailed {
                reason: "mesh has non-triangular faces",
            });
        }

        self.build_strips();
        log::trace!(
            "stripified {} triangles into {} strips",
            self.mesh.num_faces(),
            self.strips.len()
        );
        Ok(self.strips.len())
    }

    /// Whether the last [`stripify`](Self::stripify) produced strips.
    #[inline]
    pub fn is_valid(&self) -> bool {
        !self.strips.is_empty()
    }

    /// Number of strips.
    #[inline]
    pub fn num_strips(&self) -> usize {
        self.strips.len()
    }

    /// The computed strips in emission order.
    #[inline]
    pub fn strips(&self) -> &[Strip<I>] {
        &self.strips
    }

    /// Iterate over the computed strips.
    pub fn iter(&self) -> impl Iterator<Item = &Strip<I>> + '_ {
        self.strips.iter()
    }

    /// Take ownership of the computed strips.
    pub fn into_strips(self) -> Vec<Strip<I>> {
        self.strips
    }

    fn build_strips(&mut self) {
        let mesh = self.mesh;
        let num_faces = mesh.num_faces();

        let mut processed = vec![false; num_faces];
        // Faces claimed by the candidate currently being grown, keyed by attempt
        let mut claimed = vec![0usize; num_faces];
        let mut attempt = 0usize;

        for seed in mesh.face_ids() {
            if processed[seed.index()] {
                continue;
            }

            let mut best: Option<(Strip<I>, Vec<FaceId<I>>)> = None;
            for start in mesh.face_halfedges(seed) {
                attempt += 1;
                let candidate = grow_strip(mesh, start, &processed, &mut claimed, attempt);
                let longer = best
                    .as_ref()
                    .map_or(true, |(_, faces)| candidate.1.len() > faces.len());
                if longer {
                    best = Some(candidate);
                }
            }

            if let Some((strip, faces)) = best {
                for f in faces {
                    processed[f.index()] = true;
                }
                self.strips.push(strip);
            }
        }
    }
}

/// Grow one strip starting with the face of `start`, whose first edge is `start`.
fn grow_strip<I: MeshIndex>(
    mesh: &HalfEdgeMesh<I>,
    start: HalfEdgeId<I>,
    processed: &[bool],
    claimed: &mut [usize],
    attempt: usize,
) -> (Strip<I>, Vec<FaceId<I>>) {
    let seed = mesh.face_of(start);
    claimed[seed.index()] = attempt;

    let mut strip = vec![
        mesh.origin(start),
        mesh.origin(mesh.next(start)),
        mesh.origin(mesh.prev(start)),
    ];
    let mut faces = vec![seed];

    // Half-edge of the current triangle joining the last two strip vertices
    let mut shared = mesh.next(start);
    let mut even = true;

    loop {
        let twin = mesh.twin(shared);
        if !twin.is_valid() {
            break;
        }
        let f = mesh.face_of(twin);
        if !f.is_valid() || processed[f.index()] || claimed[f.index()] == attempt {
            break;
        }

        claimed[f.index()] = attempt;
        strip.push(mesh.origin(mesh.prev(twin)));
        faces.push(f);

        shared = if even { mesh.prev(twin) } else { mesh.next(twin) };
        even = !even;
    }

    (strip, faces)
}
