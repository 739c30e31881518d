//! Small fixed-size vector operations on 3D points.
use num_traits::Float;

/// Elementwise `a - b`
#[inline]
pub fn sub<T: Float>(a: &[T; 3], b: &[T; 3]) -> [T; 3] {
    [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
}

#[inline]
pub fn dot<T: Float>(a: &[T; 3], b: &[T; 3]) -> T {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

#[inline]
pub fn cross<T: Float>(a: &[T; 3], b: &[T; 3]) -> [T; 3] {
    [
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ]
}

/// Squared Euclidean distance between `a` and `b`.
#[inline]
pub fn dist_squared<T: Float>(a: &[T; 3], b: &[T; 3]) -> T {
    let ab = sub(b, a);
    dot(&ab, &ab)
}

/// Area of triangle abc and its unit normal ("direction"), oriented by the
/// right-hand rule over (b - a, c - a).
///
/// A degenerate triangle returns a zero area and a zero direction.
#[inline]
pub fn area<T: Float>(a: &[T; 3], b: &[T; 3], c: &[T; 3]) -> (T, [T; 3]) {
    let n = cross(&sub(b, a), &sub(c, a));
    let norm = dot(&n, &n).sqrt();
    let dir = if norm != T::zero() {
        [n[0] / norm, n[1] / norm, n[2] / norm]
    } else {
        [T::zero(); 3]
    };
    let half = T::one() / (T::one() + T::one());

    (norm * half, dir)
}

/// Signed volume of tetrahedron abcd from the sum of four cofactor-expanded
/// 3x3 determinants.
///
/// The sign follows the ordering of the corners, so sub-volumes built by
/// substituting one corner keep a consistent orientation.
#[inline]
pub fn volume<T: Float>(a: &[T; 3], b: &[T; 3], c: &[T; 3], d: &[T; 3]) -> T {
    let det1 = b[0] * (c[1] * d[2] - c[2] * d[1])
        + b[1] * (c[2] * d[0] - c[0] * d[2])
        + b[2] * (c[0] * d[1] - c[1] * d[0]);
    let det2 = -c[0] * (d[1] * a[2] - d[2] * a[1])
        - c[1] * (d[2] * a[0] - d[0] * a[2])
        - c[2] * (d[0] * a[1] - d[1] * a[0]);
    let det3 = d[0] * (a[1] * b[2] - a[2] * b[1])
        + d[1] * (a[2] * b[0] - a[0] * b[2])
        + d[2] * (a[0] * b[1] - a[1] * b[0]);
    let det4 = -a[0] * (b[1] * c[2] - b[2] * c[1])
        - a[1] * (b[2] * c[0] - b[0] * c[2])
        - a[2] * (b[0] * c[1] - b[1] * c[0]);

    // These are done at compile time for primitives like f32, f64
    let two = T::one() + T::one();
    let six = two * (two + T::one());

    (det1 + det2 + det3 + det4) / six
}
