//! Convenience methods for laying out sample locations on lattices,
//! in a way that echoes, but does not exactly match, methods common
//! in scripting languages.
use itertools::iproduct;
use num_traits::Float;

/// Generates evenly spaced values from start to stop,
/// including the endpoint.
pub fn linspace<T>(start: T, stop: T, n: usize) -> Vec<T>
where
    T: Float,
{
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let steps = T::from(n - 1).unwrap_or_else(T::nan);
            let dx = (stop - start) / steps;
            (0..n)
                .map(|i| start + T::from(i).unwrap_or_else(T::nan) * dx)
                .collect()
        }
    }
}

/// Every combination of the given x, y, z values as 3D points, with z
/// varying fastest (x0, y0, z0), (x0, y0, z1), ..., (x0, y1, z0), ...
pub fn grid<T: Float>(xs: &[T], ys: &[T], zs: &[T]) -> Vec<[T; 3]> {
    iproduct!(xs, ys, zs).map(|(&x, &y, &z)| [x, y, z]).collect()
}
