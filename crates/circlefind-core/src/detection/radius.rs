use crate::error::{CircleError, Result};

/// Radii swept by the Hough search: `min, min + step, ...` strictly below `max`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RadiusRange {
    min: u32,
    max: u32,
    step: u32,
}

impl RadiusRange {
    /// Fails unless `1 <= min < max` and `step > 0`.
    pub fn new(min: u32, max: u32, step: u32) -> Result<Self> {
        if min == 0 || min >= max || step == 0 {
            return Err(CircleError::InvalidRadiusRange { min, max, step });
        }
        Ok(Self { min, max, step })
    }

    /// Tested radii in increasing order.
    pub fn radii(&self) -> Vec<u32> {
        (self.min..self.max).step_by(self.step as usize).collect()
    }
}
