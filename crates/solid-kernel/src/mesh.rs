//! Polygon mesh produced by kernel tessellation, plus the closedness and
//! measurement queries used to accept or reject a boolean result.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::types::Aabb;

/// One planar polygon, vertex indices counter-clockwise seen from outside.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeshFace {
    pub vertices: Vec<u32>,
}

impl MeshFace {
    pub fn new(vertices: Vec<u32>) -> Self {
        Self { vertices }
    }
}

/// Closed polygon mesh in working units (meters).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SolidMesh {
    pub positions: Vec<[f64; 3]>,
    pub faces: Vec<MeshFace>,
}

/// Edge statistics of a mesh after welding coincident positions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EdgeReport {
    /// Distinct undirected edges.
    pub edges: usize,
    /// Edges used by exactly one face.
    pub boundary_edges: usize,
    /// Edges used by more than two faces.
    pub non_manifold_edges: usize,
    /// Edges used by two faces that traverse it in the same direction.
    pub misoriented_edges: usize,
}

impl EdgeReport {
    pub fn is_closed(&self) -> bool {
        self.edges > 0
            && self.boundary_edges == 0
            && self.non_manifold_edges == 0
            && self.misoriented_edges == 0
    }
}

impl SolidMesh {
    pub fn new() -> Self {
        Self::default()
    }

    /// Axis-aligned box with 8 shared vertices and 6 outward quads.
    pub fn cuboid(bounds: &Aabb) -> Self {
        let [x0, y0, z0] = bounds.min;
        let [x1, y1, z1] = bounds.max;
        let positions = vec![
            [x0, y0, z0],
            [x1, y0, z0],
            [x1, y1, z0],
            [x0, y1, z0],
            [x0, y0, z1],
            [x1, y0, z1],
            [x1, y1, z1],
            [x0, y1, z1],
        ];
        let quads: [[u32; 4]; 6] = [
            [0, 3, 2, 1], // -Z
            [4, 5, 6, 7], // +Z
            [0, 1, 5, 4], // -Y
            [2, 3, 7, 6], // +Y
            [0, 4, 7, 3], // -X
            [1, 2, 6, 5], // +X
        ];
        Self {
            positions,
            faces: quads.iter().map(|q| MeshFace::new(q.to_vec())).collect(),
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// A mesh without vertices or without faces cannot describe a solid.
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty() || self.faces.is_empty()
    }

    /// Append `other`, re-indexing its faces.
    pub fn append(&mut self, other: &SolidMesh) {
        let base = self.positions.len() as u32;
        self.positions.extend_from_slice(&other.positions);
        self.faces.extend(other.faces.iter().map(|f| {
            MeshFace::new(f.vertices.iter().map(|v| v + base).collect())
        }));
    }

    pub fn translate(&mut self, offset: [f64; 3]) {
        for p in &mut self.positions {
            p[0] += offset[0];
            p[1] += offset[1];
            p[2] += offset[2];
        }
    }

    pub fn translated(&self, offset: [f64; 3]) -> Self {
        let mut out = self.clone();
        out.translate(offset);
        out
    }

    pub fn bounding_box(&self) -> Aabb {
        let mut bb = Aabb::empty();
        for &p in &self.positions {
            bb.expand_to_include(p);
        }
        bb
    }

    /// Fan-triangulate every face. Faces are planar and convex for both kernels.
    pub fn triangles(&self) -> impl Iterator<Item = [[f64; 3]; 3]> + '_ {
        self.faces.iter().flat_map(move |face| {
            let idx = &face.vertices;
            (1..idx.len().saturating_sub(1)).map(move |i| {
                [
                    self.positions[idx[0] as usize],
                    self.positions[idx[i] as usize],
                    self.positions[idx[i + 1] as usize],
                ]
            })
        })
    }

    pub fn triangle_count(&self) -> usize {
        self.faces
            .iter()
            .map(|f| f.vertices.len().saturating_sub(2))
            .sum()
    }

    /// Unit normal of a face by Newell's method. Zero for degenerate faces.
    pub fn face_normal(&self, face: &MeshFace) -> [f64; 3] {
        let mut n = [0.0f64; 3];
        let count = face.vertices.len();
        for i in 0..count {
            let a = self.positions[face.vertices[i] as usize];
            let b = self.positions[face.vertices[(i + 1) % count] as usize];
            n[0] += (a[1] - b[1]) * (a[2] + b[2]);
            n[1] += (a[2] - b[2]) * (a[0] + b[0]);
            n[2] += (a[0] - b[0]) * (a[1] + b[1]);
        }
        let len = (n[0] * n[0] + n[1] * n[1] + n[2] * n[2]).sqrt();
        if len > 0.0 {
            [n[0] / len, n[1] / len, n[2] / len]
        } else {
            [0.0, 0.0, 0.0]
        }
    }

    /// Signed enclosed volume (divergence theorem). Positive for outward-oriented meshes.
    pub fn volume(&self) -> f64 {
        self.triangles()
            .map(|[a, b, c]| {
                let cross = [
                    b[1] * c[2] - b[2] * c[1],
                    b[2] * c[0] - b[0] * c[2],
                    b[0] * c[1] - b[1] * c[0],
                ];
                (a[0] * cross[0] + a[1] * cross[1] + a[2] * cross[2]) / 6.0
            })
            .sum()
    }

    pub fn surface_area(&self) -> f64 {
        self.triangles()
            .map(|[a, b, c]| {
                let u = [b[0] - a[0], b[1] - a[1], b[2] - a[2]];
                let v = [c[0] - a[0], c[1] - a[1], c[2] - a[2]];
                let cross = [
                    u[1] * v[2] - u[2] * v[1],
                    u[2] * v[0] - u[0] * v[2],
                    u[0] * v[1] - u[1] * v[0],
                ];
                0.5 * (cross[0] * cross[0] + cross[1] * cross[1] + cross[2] * cross[2]).sqrt()
            })
            .sum()
    }

    /// Map every vertex to a welded id: vertices within `tolerance` on a
    /// quantized grid share an id.
    fn welded_ids(&self, tolerance: f64) -> (Vec<u32>, usize) {
        let mut lookup: HashMap<[i64; 3], u32> = HashMap::new();
        let mut ids = Vec::with_capacity(self.positions.len());
        for p in &self.positions {
            let key = weld_key(*p, tolerance);
            let next = lookup.len() as u32;
            ids.push(*lookup.entry(key).or_insert(next));
        }
        let count = lookup.len();
        (ids, count)
    }

    /// Classify every edge of the mesh after welding positions.
    pub fn edge_report(&self, tolerance: f64) -> EdgeReport {
        let (ids, _) = self.welded_ids(tolerance);
        let mut directed: HashMap<(u32, u32), usize> = HashMap::new();

        for face in &self.faces {
            let n = face.vertices.len();
            for i in 0..n {
                let a = ids[face.vertices[i] as usize];
                let b = ids[face.vertices[(i + 1) % n] as usize];
                if a != b {
                    *directed.entry((a, b)).or_insert(0) += 1;
                }
            }
        }

        let mut undirected: HashMap<(u32, u32), (usize, usize)> = HashMap::new();
        for (&(a, b), &count) in &directed {
            let entry = undirected.entry((a.min(b), a.max(b))).or_insert((0, 0));
            if a < b {
                entry.0 += count;
            } else {
                entry.1 += count;
            }
        }

        let mut report = EdgeReport {
            edges: undirected.len(),
            ..EdgeReport::default()
        };
        for &(forward, backward) in undirected.values() {
            match forward + backward {
                1 => report.boundary_edges += 1,
                2 if forward != 1 => report.misoriented_edges += 1,
                2 => {}
                _ => report.non_manifold_edges += 1,
            }
        }
        report
    }

    /// Non-empty, and every edge shared by exactly two consistently oriented faces.
    pub fn is_closed(&self, tolerance: f64) -> bool {
        !self.is_empty() && self.edge_report(tolerance).is_closed()
    }

    /// Number of face-connected components.
    pub fn shell_count(&self, tolerance: f64) -> usize {
        let (ids, count) = self.welded_ids(tolerance);
        let mut parent: Vec<usize> = (0..count).collect();

        fn find(parent: &mut [usize], mut x: usize) -> usize {
            while parent[x] != x {
                parent[x] = parent[parent[x]];
                x = parent[x];
            }
            x
        }

        let mut used = vec![false; count];
        for face in &self.faces {
            let Some(&first) = face.vertices.first() else {
                continue;
            };
            let root = ids[first as usize] as usize;
            used[root] = true;
            for &v in &face.vertices[1..] {
                let id = ids[v as usize] as usize;
                used[id] = true;
                let ra = find(&mut parent, root);
                let rb = find(&mut parent, id);
                if ra != rb {
                    parent[rb] = ra;
                }
            }
        }

        let mut roots = std::collections::HashSet::new();
        for id in 0..count {
            if used[id] {
                roots.insert(find(&mut parent, id));
            }
        }
        roots.len()
    }

    /// V - E + F over welded vertices and undirected edges.
    pub fn euler_characteristic(&self, tolerance: f64) -> i64 {
        let (ids, _) = self.welded_ids(tolerance);
        let mut used = std::collections::HashSet::new();
        for face in &self.faces {
            for &v in &face.vertices {
                used.insert(ids[v as usize]);
            }
        }
        let e = self.edge_report(tolerance).edges as i64;
        used.len() as i64 - e + self.faces.len() as i64
    }
}

fn weld_key(p: [f64; 3], tolerance: f64) -> [i64; 3] {
    if tolerance > 0.0 {
        [
            (p[0] / tolerance).round() as i64,
            (p[1] / tolerance).round() as i64,
            (p[2] / tolerance).round() as i64,
        ]
    } else {
        [p[0].to_bits() as i64, p[1].to_bits() as i64, p[2].to_bits() as i64]
    }
}
