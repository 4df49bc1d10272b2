//! Vector math used for pointer positions and drag deltas.
//!
//! Re-exports the [`glam`] types. Only the `f32` family is used by the docking
//! engine (pointer coordinates are `f32` pixels); the `f64` variants are
//! available for callers that keep weights in double precision.
//!
//! # Examples
//!
//! ```
//! use quire_core::math::Vec2;
//!
//! let press = Vec2::new(10.0, 20.0);
//! let pointer = Vec2::new(14.0, 23.0);
//! assert_eq!((pointer - press).length(), 5.0);
//! ```
//!
//! [`glam`]: https://docs.rs/glam
pub use glam::{DVec2, Vec2};

/// Returns `true` when `a` and `b` differ by at most `epsilon`.
#[inline]
pub fn approx_eq(a: f64, b: f64, epsilon: f64) -> bool {
    (a - b).abs() <= epsilon
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_approx_eq() {
        assert!(approx_eq(0.1 + 0.2, 0.3, 1e-12));
        assert!(!approx_eq(1.0, 1.1, 1e-3));
    }
}
