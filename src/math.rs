//! Fixed-function-style linear algebra for feeding uniforms to the GPU.
//!
//! Vectors are plain fixed-length arrays and matrices are 4x4 grids stored
//! **row-major** as four row vectors. All operations return new values; nothing
//! mutates in place. Length mismatches are unrepresentable because the
//! dimension is part of the type.
//!
//! The GPU wants column-major data, so [`flatten`] transposes before
//! serializing. That transpose is an explicit step of the upload path, not a
//! property of the matrix itself — inside this crate every matrix is row-major.
//!
//! # Example
//!
//! ```
//! use vitrine::math::*;
//!
//! let view = look_at(vec3(0.0, 0.5, 3.0), vec3(0.0, 0.5, 2.0), vec3(0.0, 1.0, 0.0));
//! let proj = perspective(45.0, 16.0 / 9.0, 0.1, 100.0);
//! let model = rotate(identity(), 30.0, vec3(0.0, 1.0, 0.0));
//!
//! // Column-major floats, ready for a uniform buffer.
//! let floats: [f32; 16] = flatten(model);
//! ```

/// A 2-component vector `[x, y]`.
pub type Vec2 = [f32; 2];
/// A 3-component vector `[x, y, z]`.
pub type Vec3 = [f32; 3];
/// A 4-component vector `[x, y, z, w]`.
pub type Vec4 = [f32; 4];

/// A 4x4 matrix stored as four **row** vectors.
pub type Mat4 = [Vec4; 4];

pub const fn vec2(x: f32, y: f32) -> Vec2 {
    [x, y]
}

pub const fn vec3(x: f32, y: f32, z: f32) -> Vec3 {
    [x, y, z]
}

pub const fn vec4(x: f32, y: f32, z: f32, w: f32) -> Vec4 {
    [x, y, z, w]
}

/// The 4x4 identity matrix.
pub const fn identity() -> Mat4 {
    [
        [1.0, 0.0, 0.0, 0.0],
        [0.0, 1.0, 0.0, 0.0],
        [0.0, 0.0, 1.0, 0.0],
        [0.0, 0.0, 0.0, 1.0],
    ]
}

/// Component-wise sum of two vectors.
pub fn add<const N: usize>(u: [f32; N], v: [f32; N]) -> [f32; N] {
    std::array::from_fn(|i| u[i] + v[i])
}

/// Component-wise difference `u - v`.
pub fn subtract<const N: usize>(u: [f32; N], v: [f32; N]) -> [f32; N] {
    std::array::from_fn(|i| u[i] - v[i])
}

/// Scale every component of `v` by `s`.
pub fn scale<const N: usize>(s: f32, v: [f32; N]) -> [f32; N] {
    std::array::from_fn(|i| s * v[i])
}

/// Dot product of two vectors of the same dimension.
pub fn dot<const N: usize>(u: [f32; N], v: [f32; N]) -> f32 {
    let mut sum = 0.0;
    for i in 0..N {
        sum += u[i] * v[i];
    }
    sum
}

/// Standard 3-vector cross product.
pub fn cross(u: Vec3, v: Vec3) -> Vec3 {
    [
        u[1] * v[2] - u[2] * v[1],
        u[2] * v[0] - u[0] * v[2],
        u[0] * v[1] - u[1] * v[0],
    ]
}

/// Returns `v / |v|`, or the zero vector when `|v| <= 1e-4`.
///
/// The threshold guards the divide; degenerate inputs (a zero look direction,
/// a collapsed cross product) come out as zero rather than NaN.
pub fn normalize<const N: usize>(v: [f32; N]) -> [f32; N] {
    let length = dot(v, v).sqrt();
    if length > 1e-4 {
        scale(1.0 / length, v)
    } else {
        [0.0; N]
    }
}

/// Transpose of a 4x4 matrix.
pub fn transpose(m: Mat4) -> Mat4 {
    std::array::from_fn(|i| std::array::from_fn(|j| m[j][i]))
}

/// Matrix product `a * b`.
pub fn mul(a: Mat4, b: Mat4) -> Mat4 {
    std::array::from_fn(|i| {
        std::array::from_fn(|j| {
            let mut sum = 0.0;
            for k in 0..4 {
                sum += a[i][k] * b[k][j];
            }
            sum
        })
    })
}

/// Transform a 4-vector by a matrix: `m * v`.
pub fn transform(m: Mat4, v: Vec4) -> Vec4 {
    std::array::from_fn(|i| dot(m[i], v))
}

/// Translation matrix moving the origin to `(x, y, z)`.
pub const fn translate(x: f32, y: f32, z: f32) -> Mat4 {
    [
        [1.0, 0.0, 0.0, x],
        [0.0, 1.0, 0.0, y],
        [0.0, 0.0, 1.0, z],
        [0.0, 0.0, 0.0, 1.0],
    ]
}

/// Rotate `m` by `angle_deg` degrees around `axis` (Rodrigues' formula).
///
/// The rotation is applied on top of `m`, i.e. the result is `R * m`, so a
/// chain of `rotate` calls accumulates a compound orientation:
///
/// ```
/// use vitrine::math::*;
///
/// let mut model = identity();
/// model = rotate(model, 45.0, vec3(1.0, 0.0, 0.0));
/// model = rotate(model, 45.0, vec3(0.0, 1.0, 0.0)); // Ry * Rx
/// ```
///
/// `axis` is expected to be unit length.
pub fn rotate(m: Mat4, angle_deg: f32, axis: Vec3) -> Mat4 {
    let c = angle_deg.to_radians().cos();
    let s = angle_deg.to_radians().sin();
    let omc = 1.0 - c;
    let [x, y, z] = axis;

    let r = [
        [x * x * omc + c, x * y * omc - z * s, x * z * omc + y * s, 0.0],
        [y * x * omc + z * s, y * y * omc + c, y * z * omc - x * s, 0.0],
        [z * x * omc - y * s, z * y * omc + x * s, z * z * omc + c, 0.0],
        [0.0, 0.0, 0.0, 1.0],
    ];

    mul(r, m)
}

/// Right-handed view matrix looking from `eye` toward `at`.
///
/// The top-left 3x3 rows are the camera basis (right, true up, forward) and
/// the last column holds the negated dot of each basis vector with `eye`.
pub fn look_at(eye: Vec3, at: Vec3, up: Vec3) -> Mat4 {
    let n = normalize(subtract(eye, at)); // forward
    let u = normalize(cross(up, n)); // right
    let v = normalize(cross(n, u)); // true up

    [
        [u[0], u[1], u[2], -dot(u, eye)],
        [v[0], v[1], v[2], -dot(v, eye)],
        [n[0], n[1], n[2], -dot(n, eye)],
        [0.0, 0.0, 0.0, 1.0],
    ]
}

/// Symmetric-frustum perspective projection.
///
/// `fovy_deg` is the vertical field of view in degrees. Depth maps to the
/// conventional `[-1, 1]` range with a w-divide row of `(0, 0, -1, 0)`.
pub fn perspective(fovy_deg: f32, aspect: f32, near: f32, far: f32) -> Mat4 {
    let f = 1.0 / (fovy_deg.to_radians() / 2.0).tan();
    let d = far - near;

    [
        [f / aspect, 0.0, 0.0, 0.0],
        [0.0, f, 0.0, 0.0],
        [0.0, 0.0, -(near + far) / d, -2.0 * near * far / d],
        [0.0, 0.0, -1.0, 0.0],
    ]
}

/// Serialize a matrix for GPU upload.
///
/// Transposes first (row-major storage, column-major on the wire) and then
/// emits the 16 scalars in order. This is the one place the storage
/// convention and the device convention meet.
pub fn flatten(m: Mat4) -> [f32; 16] {
    let t = transpose(m);
    std::array::from_fn(|i| t[i / 4][i % 4])
}

/// Serialize a list of 4-vectors (vertex or color data) into a flat buffer.
///
/// Output length is always `4 * vs.len()`.
pub fn flatten_vec4s(vs: &[Vec4]) -> Vec<f32> {
    vs.iter().flatten().copied().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_near<const N: usize>(a: [f32; N], b: [f32; N]) {
        for i in 0..N {
            assert!(
                (a[i] - b[i]).abs() < 1e-6,
                "component {} differs: {:?} vs {:?}",
                i,
                a,
                b
            );
        }
    }

    #[test]
    fn normalize_unit_length() {
        assert_near(normalize([3.0, 4.0, 0.0]), [0.6, 0.8, 0.0]);

        let v = normalize([1.0, 2.0, 3.0, 4.0]);
        assert!((dot(v, v).sqrt() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn normalize_near_zero_is_zero() {
        assert_eq!(normalize([5e-5, 0.0, 0.0]), [0.0, 0.0, 0.0]);
        assert_eq!(normalize([0.0, 0.0, 0.0]), [0.0, 0.0, 0.0]);
    }

    #[test]
    fn cross_is_antisymmetric() {
        let u = [1.0, 2.0, 3.0];
        let v = [-4.0, 0.5, 2.0];
        assert_near(cross(u, v), scale(-1.0, cross(v, u)));
    }

    #[test]
    fn dot_is_symmetric() {
        let u = [1.0, -2.0, 3.0, 0.5];
        let v = [4.0, 0.0, -1.0, 2.0];
        assert_eq!(dot(u, v), dot(v, u));
    }

    #[test]
    fn flatten_identity_round_trip() {
        let floats = flatten(identity());
        #[rustfmt::skip]
        let expected = [
            1.0, 0.0, 0.0, 0.0,
            0.0, 1.0, 0.0, 0.0,
            0.0, 0.0, 1.0, 0.0,
            0.0, 0.0, 0.0, 1.0,
        ];
        assert_eq!(floats, expected);
    }

    #[test]
    fn flatten_is_column_major() {
        // Translation lives in the last column row-major, so it must land in
        // the last four slots of the flattened buffer.
        let floats = flatten(translate(1.0, 2.0, 3.0));
        assert_eq!(&floats[12..16], &[1.0, 2.0, 3.0, 1.0]);
    }

    #[test]
    fn flatten_vec4s_length_and_order() {
        let vs = [vec4(1.0, 2.0, 3.0, 4.0), vec4(5.0, 6.0, 7.0, 8.0)];
        assert_eq!(
            flatten_vec4s(&vs),
            vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0]
        );
    }

    #[test]
    fn perspective_ninety_degrees() {
        let p = perspective(90.0, 1.0, 0.1, 100.0);
        assert!((p[0][0] - 1.0).abs() < 1e-6, "cot(45 deg) should be 1");
        assert!((p[1][1] - 1.0).abs() < 1e-6);
        assert_eq!(p[3][2], -1.0);
        assert_eq!(p[3][3], 0.0);
    }

    #[test]
    fn translate_moves_origin() {
        let v = transform(translate(1.0, 2.0, 3.0), vec4(0.0, 0.0, 0.0, 1.0));
        assert_eq!(v, [1.0, 2.0, 3.0, 1.0]);
    }

    #[test]
    fn rotate_quarter_turn_about_z() {
        let m = rotate(identity(), 90.0, vec3(0.0, 0.0, 1.0));
        assert_near(transform(m, vec4(1.0, 0.0, 0.0, 1.0)), [0.0, 1.0, 0.0, 1.0]);
    }

    #[test]
    fn rotate_composes_with_base_matrix() {
        // Rz(90) takes +X to +Y, then Rx(90) takes +Y to +Z.
        let m = rotate(identity(), 90.0, vec3(0.0, 0.0, 1.0));
        let m = rotate(m, 90.0, vec3(1.0, 0.0, 0.0));
        assert_near(transform(m, vec4(1.0, 0.0, 0.0, 1.0)), [0.0, 0.0, 1.0, 1.0]);
    }

    #[test]
    fn rotate_preserves_length() {
        let m = rotate(identity(), 33.0, normalize(vec3(1.0, 2.0, -0.5)));
        let v = transform(m, vec4(0.0, 3.0, 4.0, 0.0));
        assert!((dot(v, v).sqrt() - 5.0).abs() < 1e-5);
    }

    #[test]
    fn look_at_maps_eye_to_origin() {
        let view = look_at(vec3(0.0, 0.0, 3.0), vec3(0.0, 0.0, 0.0), vec3(0.0, 1.0, 0.0));
        assert_near(transform(view, vec4(0.0, 0.0, 3.0, 1.0)), [0.0, 0.0, 0.0, 1.0]);
        // A point one unit in front of the eye lands one unit down -Z.
        assert_near(transform(view, vec4(0.0, 0.0, 2.0, 1.0)), [0.0, 0.0, -1.0, 1.0]);
    }

    #[test]
    fn look_at_basis_rows() {
        let view = look_at(vec3(0.0, 0.0, 3.0), vec3(0.0, 0.0, 0.0), vec3(0.0, 1.0, 0.0));
        assert_near(view[0], [1.0, 0.0, 0.0, 0.0]); // right
        assert_near(view[1], [0.0, 1.0, 0.0, 0.0]); // up
        assert_near(view[2], [0.0, 0.0, 1.0, -3.0]); // forward
    }

    #[test]
    fn transpose_involution() {
        let m = rotate(translate(1.0, 2.0, 3.0), 20.0, vec3(0.0, 1.0, 0.0));
        assert_eq!(transpose(transpose(m)), m);
    }
}
