//! Position calculator: pure mappings between the scalar reel offset and the
//! slots under the viewport.
//!
//! The reel is cyclic. An absolute offset is only meaningful modulo the
//! circumference (`len × item_height`), so every mapping here wraps.

use reel_model::Entry;
use serde::{Deserialize, Serialize};

/// Static layout of the reel viewport.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReelGeometry {
    /// Height of one slot in pixels.
    pub item_height: f64,
    /// Fully visible slots in the viewport.
    pub visible_items: usize,
    /// Slot index (from the top of the viewport) the winner settles on.
    pub center_index: usize,
}

impl Default for ReelGeometry {
    fn default() -> Self {
        Self {
            item_height: 80.0,
            visible_items: 5,
            center_index: 2,
        }
    }
}

impl ReelGeometry {
    /// One full cyclic pass over a working set of `len` entries.
    #[inline]
    pub fn circumference(&self, len: usize) -> f64 {
        len as f64 * self.item_height
    }
}

/// Discrete view of an absolute offset.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ViewportIndices {
    /// Working-set index of the slot at the top of the viewport.
    pub top_index: usize,
    /// How far (px) the top slot is scrolled past the viewport edge.
    pub pixel_offset: f64,
}

/// Minimum velocity magnitudes by remaining distance.
///
/// A proportional velocity law alone approaches the target asymptotically;
/// the floors keep the tail of the animation moving so it ends in a bounded
/// number of frames.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VelocityFloors {
    pub far_distance: f64,
    pub far_velocity: f64,
    pub medium_distance: f64,
    pub medium_velocity: f64,
    pub near_distance: f64,
    pub near_velocity: f64,
    pub very_near_velocity: f64,
}

impl Default for VelocityFloors {
    fn default() -> Self {
        Self {
            far_distance: 1_000.0,
            far_velocity: 6_000.0,
            medium_distance: 200.0,
            medium_velocity: 1_800.0,
            near_distance: 20.0,
            near_velocity: 600.0,
            very_near_velocity: 120.0,
        }
    }
}

impl VelocityFloors {
    /// Floor (px/s) for a distance magnitude.
    pub fn floor_for(&self, distance: f64) -> f64 {
        let distance = distance.abs();
        if distance > self.far_distance {
            self.far_velocity
        } else if distance > self.medium_distance {
            self.medium_velocity
        } else if distance > self.near_distance {
            self.near_velocity
        } else {
            self.very_near_velocity
        }
    }
}

/// Reduce `position` into `[0, circumference)`.
///
/// Returns 0 for a degenerate circumference.
#[inline]
pub fn wrap_offset(position: f64, circumference: f64) -> f64 {
    if !circumference.is_finite()
        || circumference <= 0.0
        || !position.is_finite()
    {
        return 0.0;
    }
    let wrapped = position.rem_euclid(circumference);
    // rem_euclid can round up to the modulus for tiny negative inputs
    if wrapped >= circumference { 0.0 } else { wrapped }
}

pub fn to_viewport_indices(
    position: f64,
    len: usize,
    item_height: f64,
) -> ViewportIndices {
    if len == 0 || !item_height.is_finite() || item_height <= 0.0 {
        return ViewportIndices::default();
    }
    let wrapped = wrap_offset(position, len as f64 * item_height);
    let top_index = ((wrapped / item_height).floor() as usize).min(len - 1);
    let pixel_offset = (wrapped - top_index as f64 * item_height).max(0.0);
    ViewportIndices {
        top_index,
        pixel_offset,
    }
}

/// Inverse of [`to_viewport_indices`] within the first circumference.
#[inline]
pub fn from_viewport_indices(
    indices: ViewportIndices,
    item_height: f64,
) -> f64 {
    indices.top_index as f64 * item_height + indices.pixel_offset
}

/// Proportional velocity law with stepped floors. Result is px/s and carries
/// the sign of `distance`.
pub fn velocity_for_distance(
    distance: f64,
    deceleration_factor: f64,
    floors: &VelocityFloors,
) -> f64 {
    if distance == 0.0 {
        return 0.0;
    }
    let magnitude = (distance * deceleration_factor)
        .abs()
        .max(floors.floor_for(distance));
    distance.signum() * magnitude
}

#[inline]
pub fn is_settled(distance: f64, threshold: f64) -> bool {
    distance.abs() < threshold
}

/// Entries under the viewport at `position`, top to bottom. Includes one extra
/// slot when the top slot is partially scrolled out.
pub fn visible_window<'a>(
    entries: &'a [Entry],
    position: f64,
    geometry: &ReelGeometry,
) -> Vec<&'a Entry> {
    if entries.is_empty() {
        return Vec::new();
    }
    let len = entries.len();
    let indices = to_viewport_indices(position, len, geometry.item_height);
    let count =
        geometry.visible_items + usize::from(indices.pixel_offset > 0.0);
    (0..count)
        .map(|k| &entries[(indices.top_index + k) % len])
        .collect()
}

/// Entry whose slot starts at the viewport centre row.
pub fn center_entry<'a>(
    entries: &'a [Entry],
    position: f64,
    geometry: &ReelGeometry,
) -> Option<&'a Entry> {
    if entries.is_empty() {
        return None;
    }
    let len = entries.len();
    let indices = to_viewport_indices(position, len, geometry.item_height);
    entries.get((indices.top_index + geometry.center_index) % len)
}
