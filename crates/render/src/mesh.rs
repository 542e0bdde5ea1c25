use bytemuck::{Pod, Zeroable};
use std::collections::BTreeSet;

/// Vertex layout shared by every backend: position then RGB colour.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub color: [f32; 3],
}

/// Indexed triangle mesh.
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

const RED: [f32; 3] = [1.0, 0.0, 0.0];
const GREEN: [f32; 3] = [0.0, 1.0, 0.0];
const BLUE: [f32; 3] = [0.0, 0.0, 1.0];
const MAGENTA: [f32; 3] = [1.0, 0.0, 1.0];

impl Mesh {
    /// Unit cube centred on the origin, eight shared corners, twelve triangles.
    pub fn cube() -> Self {
        let p = 0.5_f32;
        #[rustfmt::skip]
        let vertices = vec![
            // front (+Z)
            Vertex { position: [-p, -p,  p], color: RED },
            Vertex { position: [ p, -p,  p], color: GREEN },
            Vertex { position: [ p,  p,  p], color: BLUE },
            Vertex { position: [-p,  p,  p], color: MAGENTA },
            // back (-Z)
            Vertex { position: [-p, -p, -p], color: RED },
            Vertex { position: [ p, -p, -p], color: GREEN },
            Vertex { position: [ p,  p, -p], color: BLUE },
            Vertex { position: [-p,  p, -p], color: MAGENTA },
        ];
        #[rustfmt::skip]
        let indices: Vec<u32> = vec![
            0, 1, 2,  2, 3, 0, // front
            1, 5, 6,  6, 2, 1, // right
            7, 6, 5,  5, 4, 7, // back
            4, 0, 3,  3, 7, 4, // left
            4, 5, 1,  1, 0, 4, // bottom
            3, 2, 6,  6, 7, 3, // top
        ];
        Self { vertices, indices }
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Line-list indices covering every triangle edge exactly once.
    ///
    /// Edges shared by two triangles are emitted once, lowest index first,
    /// in ascending order.
    pub fn edge_indices(&self) -> Vec<u32> {
        let mut edges = BTreeSet::new();
        for tri in self.indices.chunks_exact(3) {
            for (a, b) in [(tri[0], tri[1]), (tri[1], tri[2]), (tri[2], tri[0])] {
                edges.insert((a.min(b), a.max(b)));
            }
        }
        edges.into_iter().flat_map(|(a, b)| [a, b]).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cube_has_eight_corners_and_twelve_triangles() {
        let cube = Mesh::cube();
        assert_eq!(cube.vertices.len(), 8);
        assert_eq!(cube.indices.len(), 36);
        assert_eq!(cube.triangle_count(), 12);
        assert!(cube.indices.iter().all(|&i| (i as usize) < cube.vertices.len()));
    }

    #[test]
    fn cube_corners_sit_on_half_unit() {
        for v in Mesh::cube().vertices {
            assert!(v.position.iter().all(|c| c.abs() == 0.5));
        }
    }

    #[test]
    fn cube_wireframe_has_eighteen_edges() {
        let cube = Mesh::cube();
        let edges = cube.edge_indices();
        // 12 cube edges plus one diagonal per face.
        assert_eq!(edges.len(), 36);
        assert!(edges.iter().all(|&i| (i as usize) < cube.vertices.len()));
        for pair in edges.chunks_exact(2) {
            assert!(pair[0] < pair[1]);
        }
    }

    #[test]
    fn shared_edges_are_deduplicated() {
        let quad = Mesh {
            vertices: vec![Vertex::zeroed(); 4],
            indices: vec![0, 1, 2, 2, 3, 0],
        };
        assert_eq!(quad.edge_indices(), vec![0, 1, 0, 2, 0, 3, 1, 2, 2, 3]);
    }

    #[test]
    fn vertex_is_tightly_packed() {
        assert_eq!(std::mem::size_of::<Vertex>(), 6 * std::mem::size_of::<f32>());
    }
}
