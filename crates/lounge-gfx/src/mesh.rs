//! CPU-side mesh generation for the scene shapes.
//!
//! All shapes are unit-sized and centred on the origin; the object size is
//! folded into the model matrix. Triangles wind counter-clockwise seen from
//! outside.

use bytemuck::{Pod, Zeroable};
use fnv::{FnvHashMap, FnvHashSet};
use glam::Vec3;
use lounge_core::Shape;

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct MeshVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

#[derive(Clone, Debug, Default)]
pub struct MeshData {
    pub positions: Vec<Vec3>,
    pub triangles: Vec<[u32; 3]>,
}

const ICOSAHEDRON_FACES: [[u32; 3]; 20] = [
    [0, 11, 5],
    [0, 5, 1],
    [0, 1, 7],
    [0, 7, 10],
    [0, 10, 11],
    [1, 5, 9],
    [5, 11, 4],
    [11, 10, 2],
    [10, 7, 6],
    [7, 1, 8],
    [3, 9, 4],
    [3, 4, 2],
    [3, 2, 6],
    [3, 6, 8],
    [3, 8, 9],
    [4, 9, 5],
    [2, 4, 11],
    [6, 2, 10],
    [8, 6, 7],
    [9, 8, 1],
];

impl MeshData {
    pub fn for_shape(shape: Shape) -> Self {
        match shape {
            Shape::Icosahedron { detail } => Self::icosahedron(detail),
            Shape::Octahedron => Self::octahedron(),
            Shape::Cube => Self::cube(),
        }
    }

    /// Unit icosphere: the 20-face icosahedron with `detail` rounds of
    /// midpoint subdivision, every vertex pushed back onto the sphere.
    pub fn icosahedron(detail: u32) -> Self {
        let t = (1.0 + 5.0_f32.sqrt()) / 2.0;
        let positions = [
            [-1.0, t, 0.0],
            [1.0, t, 0.0],
            [-1.0, -t, 0.0],
            [1.0, -t, 0.0],
            [0.0, -1.0, t],
            [0.0, 1.0, t],
            [0.0, -1.0, -t],
            [0.0, 1.0, -t],
            [t, 0.0, -1.0],
            [t, 0.0, 1.0],
            [-t, 0.0, -1.0],
            [-t, 0.0, 1.0],
        ]
        .into_iter()
        .map(|p| Vec3::from(p).normalize())
        .collect();
        let mut mesh = Self {
            positions,
            triangles: ICOSAHEDRON_FACES.to_vec(),
        };
        for _ in 0..detail {
            mesh.subdivide();
        }
        mesh.orient_outward();
        mesh
    }

    pub fn octahedron() -> Self {
        let positions = vec![Vec3::X, Vec3::NEG_X, Vec3::Y, Vec3::NEG_Y, Vec3::Z, Vec3::NEG_Z];
        let mut triangles = Vec::with_capacity(8);
        for y in [2, 3] {
            for (a, b) in [(0, 4), (4, 1), (1, 5), (5, 0)] {
                triangles.push([a, b, y]);
            }
        }
        let mut mesh = Self {
            positions,
            triangles,
        };
        mesh.orient_outward();
        mesh
    }

    /// Cube with half-extent 1.
    pub fn cube() -> Self {
        let positions = (0..8)
            .map(|i| {
                Vec3::new(
                    if i & 1 == 0 { -1.0 } else { 1.0 },
                    if i & 2 == 0 { -1.0 } else { 1.0 },
                    if i & 4 == 0 { -1.0 } else { 1.0 },
                )
            })
            .collect();
        let quads: [[u32; 4]; 6] = [
            [0, 1, 3, 2],
            [4, 6, 7, 5],
            [0, 4, 5, 1],
            [2, 3, 7, 6],
            [0, 2, 6, 4],
            [1, 5, 7, 3],
        ];
        let triangles = quads
            .iter()
            .flat_map(|q| [[q[0], q[1], q[2]], [q[0], q[2], q[3]]])
            .collect();
        let mut mesh = Self {
            positions,
            triangles,
        };
        mesh.orient_outward();
        mesh
    }

    fn subdivide(&mut self) {
        let mut midpoints: FnvHashMap<(u32, u32), u32> = FnvHashMap::default();
        let mut next = Vec::with_capacity(self.triangles.len() * 4);
        let positions = &mut self.positions;
        let mut midpoint = |a: u32, b: u32| -> u32 {
            let key = (a.min(b), a.max(b));
            *midpoints.entry(key).or_insert_with(|| {
                let p = (positions[a as usize] + positions[b as usize]).normalize();
                positions.push(p);
                (positions.len() - 1) as u32
            })
        };
        for &[a, b, c] in &self.triangles {
            let ab = midpoint(a, b);
            let bc = midpoint(b, c);
            let ca = midpoint(c, a);
            next.extend_from_slice(&[[a, ab, ca], [b, bc, ab], [c, ca, bc], [ab, bc, ca]]);
        }
        self.triangles = next;
    }

    /// Flip any triangle whose normal points towards the origin. Valid for
    /// the convex, origin-centred shapes built here.
    fn orient_outward(&mut self) {
        for tri in &mut self.triangles {
            let [a, b, c] = tri.map(|i| self.positions[i as usize]);
            if (b - a).cross(c - a).dot(a + b + c) < 0.0 {
                tri.swap(1, 2);
            }
        }
    }

    pub fn face_normal(&self, tri: [u32; 3]) -> Vec3 {
        let [a, b, c] = tri.map(|i| self.positions[i as usize]);
        (b - a).cross(c - a).normalize_or_zero()
    }

    /// Unique undirected edges.
    pub fn edges(&self) -> Vec<[u32; 2]> {
        let mut seen = FnvHashSet::default();
        let mut out = Vec::new();
        for &[a, b, c] in &self.triangles {
            for (u, v) in [(a, b), (b, c), (c, a)] {
                let key = [u.min(v), u.max(v)];
                if seen.insert(key) {
                    out.push(key);
                }
            }
        }
        out
    }

    /// Non-indexed triangle list with one normal per face, for the faceted look.
    pub fn flat_vertices(&self) -> Vec<MeshVertex> {
        let mut out = Vec::with_capacity(self.triangles.len() * 3);
        for &tri in &self.triangles {
            let normal = self.face_normal(tri).to_array();
            for i in tri {
                out.push(MeshVertex {
                    position: self.positions[i as usize].to_array(),
                    normal,
                });
            }
        }
        out
    }

    /// Line list over [`MeshData::edges`].
    pub fn edge_vertices(&self) -> Vec<MeshVertex> {
        self.edges()
            .into_iter()
            .flatten()
            .map(|i| {
                let p = self.positions[i as usize];
                MeshVertex {
                    position: p.to_array(),
                    normal: p.normalize_or_zero().to_array(),
                }
            })
            .collect()
    }
}
