//! Fixed-width vector helpers used by the integrators

/// Component-wise sum of two vectors
#[inline]
pub fn add<const N: usize>(a: [f32; N], b: [f32; N]) -> [f32; N] {
    std::array::from_fn(|i| a[i] + b[i])
}

/// Multiply every component by `s`
#[inline]
pub fn scale<const N: usize>(v: [f32; N], s: f32) -> [f32; N] {
    v.map(|c| c * s)
}

/// `a + s * b`
#[inline]
pub fn add_scaled<const N: usize>(a: [f32; N], b: [f32; N], s: f32) -> [f32; N] {
    add(a, scale(b, s))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_and_scale() {
        assert_eq!(add([1.0, 2.0, 3.0], [0.5, -2.0, 1.0]), [1.5, 0.0, 4.0]);
        assert_eq!(scale([1.0, -2.0], 3.0), [3.0, -6.0]);
        assert_eq!(add_scaled([1.0, 1.0], [2.0, 4.0], 0.5), [2.0, 3.0]);
    }

    #[test]
    fn test_empty_vectors() {
        let empty: [f32; 0] = [];
        assert_eq!(add(empty, empty), empty);
        assert_eq!(scale(empty, 2.0), empty);
    }
}
