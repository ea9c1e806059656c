//! Procedural geometry for the museum scene.
//!
//! Shapes are generated into one shared pair of position/color lists so the
//! whole scene fits in a single vertex buffer; each `push_*` call appends its
//! vertices and returns the [`DrawRange`] covering them. Generation is pure —
//! uploading the result to the GPU is the renderer's job.
//!
//! All geometry is untextured triangles with one color per vertex. The cube
//! reuses a fixed color per corner across every face that touches it, which
//! gives the deliberately non-uniform face shading that makes the cube's
//! structure readable while it spins.

use crate::math::{Vec4, vec4};

/// Colors assigned to the eight cube corners, indexed like [`CUBE_CORNERS`].
pub const CORNER_COLORS: [Vec4; 8] = [
    vec4(0.0, 0.0, 0.0, 1.0), // black
    vec4(1.0, 0.0, 0.0, 1.0), // red
    vec4(1.0, 1.0, 0.0, 1.0), // yellow
    vec4(0.0, 1.0, 0.0, 1.0), // green
    vec4(0.0, 0.0, 1.0, 1.0), // blue
    vec4(1.0, 0.0, 1.0, 1.0), // magenta
    vec4(1.0, 1.0, 1.0, 1.0), // white
    vec4(0.0, 1.0, 1.0, 1.0), // cyan
];

/// The eight corners of a unit cube centered at the origin.
pub const CUBE_CORNERS: [Vec4; 8] = [
    vec4(-0.5, -0.5, 0.5, 1.0),
    vec4(-0.5, 0.5, 0.5, 1.0),
    vec4(0.5, 0.5, 0.5, 1.0),
    vec4(0.5, -0.5, 0.5, 1.0),
    vec4(-0.5, -0.5, -0.5, 1.0),
    vec4(-0.5, 0.5, -0.5, 1.0),
    vec4(0.5, 0.5, -0.5, 1.0),
    vec4(0.5, -0.5, -0.5, 1.0),
];

const PYRAMID_GOLD: Vec4 = vec4(1.0, 0.8, 0.0, 1.0);
const GROUND_GRAY: Vec4 = vec4(0.3, 0.3, 0.3, 1.0);
const GROUND_SIZE: f32 = 10.0;

/// A contiguous span of vertices inside the shared buffers, suitable for a
/// ranged draw call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DrawRange {
    /// Index of the first vertex.
    pub first: u32,
    /// Number of vertices.
    pub count: u32,
}

impl DrawRange {
    /// The `first..first + count` range expected by `RenderPass::draw`.
    pub fn vertices(&self) -> std::ops::Range<u32> {
        self.first..self.first + self.count
    }
}

/// Parallel position and color lists shared by every shape in a scene.
///
/// The i-th entry of each list describes one vertex.
#[derive(Clone, Debug, Default)]
pub struct SceneGeometry {
    pub positions: Vec<Vec4>,
    pub colors: Vec<Vec4>,
}

impl SceneGeometry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total vertex count so far.
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Append a unit cube: 6 faces, each quad split into two triangles, with
    /// the fixed per-corner color table. 36 vertices.
    pub fn push_cube(&mut self) -> DrawRange {
        let first = self.len() as u32;
        self.quad(1, 0, 3, 2);
        self.quad(2, 3, 7, 6);
        self.quad(3, 0, 4, 7);
        self.quad(6, 5, 1, 2);
        self.quad(4, 5, 6, 7);
        self.quad(5, 4, 0, 1);
        DrawRange {
            first,
            count: self.len() as u32 - first,
        }
    }

    /// Append one cube face as two triangles with the fan pattern
    /// `[a, b, c, a, c, d]`, carrying each corner's fixed color along.
    fn quad(&mut self, a: usize, b: usize, c: usize, d: usize) {
        for i in [a, b, c, a, c, d] {
            self.positions.push(CUBE_CORNERS[i]);
            self.colors.push(CORNER_COLORS[i]);
        }
    }

    /// Append a pyramid with its base centered under `(x, y, z)`: one apex,
    /// four base corners, four triangular faces, uniform gold. 12 vertices.
    pub fn push_pyramid(&mut self, x: f32, y: f32, z: f32) -> DrawRange {
        let vertices = [
            vec4(x, y + 1.0, z, 1.0), // apex
            vec4(x - 1.0, y - 1.0, z + 1.0, 1.0),
            vec4(x + 1.0, y - 1.0, z + 1.0, 1.0),
            vec4(x + 1.0, y - 1.0, z - 1.0, 1.0),
            vec4(x - 1.0, y - 1.0, z - 1.0, 1.0),
        ];

        let first = self.len() as u32;
        for i in [0, 1, 2, 0, 2, 3, 0, 3, 4, 0, 4, 1] {
            self.positions.push(vertices[i]);
            self.colors.push(PYRAMID_GOLD);
        }
        DrawRange {
            first,
            count: self.len() as u32 - first,
        }
    }

    /// Append the museum floor: a flat 20x20 quad at `y = -1`, two triangles,
    /// uniform dark gray. 6 vertices.
    pub fn push_ground(&mut self) -> DrawRange {
        let s = GROUND_SIZE;
        let vertices = [
            vec4(-s, -1.0, -s, 1.0),
            vec4(-s, -1.0, s, 1.0),
            vec4(s, -1.0, s, 1.0),
            vec4(s, -1.0, -s, 1.0),
        ];

        let first = self.len() as u32;
        for i in [0, 1, 2, 0, 2, 3] {
            self.positions.push(vertices[i]);
            self.colors.push(GROUND_GRAY);
        }
        DrawRange {
            first,
            count: self.len() as u32 - first,
        }
    }
}

/// Draw ranges for the three museum exhibits.
#[derive(Clone, Copy, Debug)]
pub struct MuseumRanges {
    pub cube: DrawRange,
    pub pyramid: DrawRange,
    pub ground: DrawRange,
}

/// Build the full museum scene: central cube, display pyramid above the
/// floor at `(0, 1, -2)`, and the ground plane.
pub fn museum_scene() -> (SceneGeometry, MuseumRanges) {
    let mut geometry = SceneGeometry::new();
    let cube = geometry.push_cube();
    let pyramid = geometry.push_pyramid(0.0, 1.0, -2.0);
    let ground = geometry.push_ground();
    (geometry, MuseumRanges { cube, pyramid, ground })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cube_has_36_matched_vertices() {
        let mut geometry = SceneGeometry::new();
        let range = geometry.push_cube();

        assert_eq!(range, DrawRange { first: 0, count: 36 });
        assert_eq!(geometry.positions.len(), 36);
        assert_eq!(geometry.colors.len(), 36);
    }

    #[test]
    fn cube_colors_follow_the_corner_table() {
        let mut geometry = SceneGeometry::new();
        geometry.push_cube();

        // Every vertex's color must be the table entry for its corner.
        for (position, color) in geometry.positions.iter().zip(&geometry.colors) {
            let corner = CUBE_CORNERS
                .iter()
                .position(|c| c == position)
                .expect("cube vertex is not one of the 8 corners");
            assert_eq!(*color, CORNER_COLORS[corner]);
        }

        // First face is quad(1, 0, 3, 2): red, black, green, red, green, yellow.
        let expected: Vec<Vec4> = [1, 0, 3, 1, 3, 2].iter().map(|&i| CORNER_COLORS[i]).collect();
        assert_eq!(&geometry.colors[0..6], &expected[..]);
    }

    #[test]
    fn pyramid_is_uniform_gold() {
        let mut geometry = SceneGeometry::new();
        let range = geometry.push_pyramid(0.0, 1.0, -2.0);

        assert_eq!(range.count, 12);
        assert!(geometry.colors.iter().all(|c| *c == PYRAMID_GOLD));
        // Apex sits one unit above the anchor and starts every face.
        assert_eq!(geometry.positions[0], vec4(0.0, 2.0, -2.0, 1.0));
        assert_eq!(geometry.positions[3], geometry.positions[0]);
    }

    #[test]
    fn ground_is_one_gray_quad() {
        let mut geometry = SceneGeometry::new();
        let range = geometry.push_ground();

        assert_eq!(range.count, 6);
        assert!(geometry.colors.iter().all(|c| *c == GROUND_GRAY));
        assert!(geometry.positions.iter().all(|p| p[1] == -1.0));
    }

    #[test]
    fn museum_scene_ranges() {
        let (geometry, ranges) = museum_scene();

        assert_eq!(ranges.cube, DrawRange { first: 0, count: 36 });
        assert_eq!(ranges.pyramid, DrawRange { first: 36, count: 12 });
        assert_eq!(ranges.ground, DrawRange { first: 48, count: 6 });
        assert_eq!(geometry.len(), 54);
        assert_eq!(ranges.ground.vertices(), 48..54);
    }
}
