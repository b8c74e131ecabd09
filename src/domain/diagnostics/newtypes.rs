// SPDX-License-Identifier: MPL-2.0
//! Diagnostics newtypes.

/// Event buffer capacity bounds.
pub mod buffer_capacity_bounds {
    /// Smallest buffer worth keeping: a handful of resolutions.
    pub const MIN: usize = 100;
    /// Upper bound on retained events.
    pub const MAX: usize = 10_000;
    /// Default retained events.
    pub const DEFAULT: usize = 1_000;
}

/// Number of diagnostic events retained in memory.
///
/// Always within [`buffer_capacity_bounds::MIN`]..=[`buffer_capacity_bounds::MAX`];
/// out-of-range requests are clamped rather than rejected, so a bad config
/// value cannot disable diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct BufferCapacity(usize);

impl BufferCapacity {
    #[must_use]
    pub fn new(value: usize) -> Self {
        Self(value.clamp(buffer_capacity_bounds::MIN, buffer_capacity_bounds::MAX))
    }

    #[must_use]
    pub fn value(self) -> usize {
        self.0
    }
}

impl Default for BufferCapacity {
    fn default() -> Self {
        Self(buffer_capacity_bounds::DEFAULT)
    }
}

impl From<BufferCapacity> for usize {
    fn from(capacity: BufferCapacity) -> Self {
        capacity.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamps_into_bounds() {
        assert_eq!(BufferCapacity::new(0).value(), buffer_capacity_bounds::MIN);
        assert_eq!(BufferCapacity::new(1_000_000).value(), buffer_capacity_bounds::MAX);
        assert_eq!(BufferCapacity::new(2_500).value(), 2_500);
    }

    #[test]
    fn default_is_one_thousand() {
        assert_eq!(usize::from(BufferCapacity::default()), 1_000);
    }

    #[test]
    fn orders_by_value() {
        assert!(BufferCapacity::new(200) < BufferCapacity::new(300));
    }
}
