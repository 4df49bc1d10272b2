//! Weight/pixel conversion and cascading resize for sibling panes.
//!
//! Weights are what the tree stores between gestures. While a handle is being
//! dragged the panes are sized in pixels instead, so the panes do not jitter as
//! floating point weights are rescaled. The pixel sizes are turned back into
//! weights once, when the drag ends.
//!
//! Nothing here is tied to the layout tree; any row or column of adjustable
//! panes can use it.

use crate::error::{DockError, DockResult};

pub use crate::config::DEFAULT_MIN_PANE_SIZE;

/// Weight committed for a pane dragged down to zero pixels.
pub const MIN_COMMITTED_WEIGHT: f64 = 1e-6;

/// Distribute `total` pixels proportionally to `weights`.
///
/// Weights do not need to be normalized. If they sum to zero (or are not
/// finite) every pane gets an equal share.
pub fn weights_to_pixels(weights: &[f64], total: f32) -> Vec<f32> {
    if weights.is_empty() {
        return Vec::new();
    }
    let sum: f64 = weights.iter().sum();
    if sum > 0.0 && sum.is_finite() {
        weights.iter().map(|w| (w / sum * total as f64) as f32).collect()
    } else {
        vec![total / weights.len() as f32; weights.len()]
    }
}

/// Normalize pixel sizes into weights that sum to 1.
///
/// A zero total yields uniform weights.
pub fn pixels_to_weights(pixels: &[f32]) -> Vec<f64> {
    if pixels.is_empty() {
        return Vec::new();
    }
    let sum: f64 = pixels.iter().map(|p| *p as f64).sum();
    if sum > 0.0 && sum.is_finite() {
        pixels.iter().map(|p| *p as f64 / sum).collect()
    } else {
        vec![1.0 / pixels.len() as f64; pixels.len()]
    }
}

/// Pixel sizes after dragging the handle between panes `handle` and
/// `handle + 1` by `delta` pixels.
///
/// The starting sizes are the live extents the panes were rendered with, so
/// nothing moves until the pointer does. Only when the extents sum to zero
/// (nothing rendered yet) are they derived from `weights`. A pane that would
/// shrink below `min_size` hands the rest of the delta on to the next pane
/// outwards; what no pane can absorb is dropped, so the handle stops. The
/// total size never changes.
pub fn compute_resize(
    delta: f32,
    handle: usize,
    weights: &[f64],
    live_extents: &[f32],
    min_size: f32,
) -> DockResult<Vec<f32>> {
    if weights.len() != live_extents.len() {
        return Err(DockError::WeightCountMismatch {
            expected: live_extents.len(),
            found: weights.len(),
        });
    }
    check_handle(handle, weights.len())?;

    let total: f32 = live_extents.iter().sum();
    let mut sizes = if total > 0.0 && total.is_finite() {
        live_extents.to_vec()
    } else {
        weights_to_pixels(weights, total)
    };
    apply_handle_delta(&mut sizes, handle, delta, min_size);
    Ok(sizes)
}

fn check_handle(handle: usize, len: usize) -> DockResult<()> {
    if handle + 1 >= len {
        return Err(DockError::HandleOutOfRange { handle, len });
    }
    Ok(())
}

/// Move the handle after pane `handle` by `delta`, in place. Returns the part
/// of `delta` that was applied.
pub fn apply_handle_delta(sizes: &mut [f32], handle: usize, delta: f32, min_size: f32) -> f32 {
    if handle + 1 >= sizes.len() || delta == 0.0 || !delta.is_finite() {
        return 0.0;
    }

    let wanted = delta.abs();
    let mut remaining = wanted;
    let (grow, shrinking): (usize, Vec<usize>) = if delta > 0.0 {
        (handle, (handle + 1..sizes.len()).collect())
    } else {
        (handle + 1, (0..=handle).rev().collect())
    };

    // Take from the nearest pane first, then cascade outwards
    for index in shrinking {
        if remaining <= 0.0 {
            break;
        }
        let available = (sizes[index] - min_size).max(0.0);
        let taken = remaining.min(available);
        sizes[index] -= taken;
        remaining -= taken;
    }

    let applied = wanted - remaining;
    sizes[grow] += applied;
    if remaining > 0.0 {
        tracing::trace!(handle, clamped = remaining, "resize hit the minimum size");
    }
    applied.copysign(delta)
}

/// Transient pixel state of one handle drag.
///
/// Every update starts again from the sizes captured at the press, so the
/// result only depends on the total pointer travel.
#[derive(Debug, Clone, PartialEq)]
pub struct ResizeDrag {
    handle: usize,
    origin: Vec<f32>,
    current: Vec<f32>,
    min_size: f32,
}

impl ResizeDrag {
    /// Capture pixel sizes at the start of a drag.
    pub fn new(handle: usize, weights: &[f64], live_extents: &[f32], min_size: f32) -> DockResult<Self> {
        let origin = compute_resize(0.0, handle, weights, live_extents, min_size)?;
        Ok(Self {
            handle,
            current: origin.clone(),
            origin,
            min_size,
        })
    }

    pub fn handle(&self) -> usize {
        self.handle
    }

    /// Apply the total delta since the press; returns the applied part.
    pub fn update(&mut self, total_delta: f32) -> f32 {
        self.current.clone_from(&self.origin);
        apply_handle_delta(&mut self.current, self.handle, total_delta, self.min_size)
    }

    /// Pixel sizes to render with while dragging.
    pub fn sizes(&self) -> &[f32] {
        &self.current
    }

    pub fn origin(&self) -> &[f32] {
        &self.origin
    }

    /// Weights to commit. A pane squeezed to zero pixels keeps
    /// [`MIN_COMMITTED_WEIGHT`], since `Resize` only accepts zero when every
    /// weight is zero.
    pub fn finish(self) -> Vec<f64> {
        let mut weights = pixels_to_weights(&self.current);
        if weights.iter().any(|w| *w > 0.0) {
            for weight in weights.iter_mut().filter(|w| **w <= 0.0) {
                *weight = MIN_COMMITTED_WEIGHT;
            }
        }
        weights
    }
}
