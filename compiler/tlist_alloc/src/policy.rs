//! Capacity growth policy.

/// Multiplier applied to the current capacity when a buffer must grow.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum GrowthFactor {
    /// `cap * 2`
    #[default]
    Double,
    /// `cap * 3 / 2`
    ThreeHalves,
    /// `cap * 5 / 4`
    FiveQuarters,
}

impl GrowthFactor {
    /// Apply the factor, saturating instead of overflowing.
    fn apply(self, cap: usize) -> usize {
        let extra = match self {
            GrowthFactor::Double => cap,
            GrowthFactor::ThreeHalves => cap / 2,
            GrowthFactor::FiveQuarters => cap / 4,
        };
        cap.saturating_add(extra)
    }
}

/// How a list buffer grows when an insertion does not fit.
///
/// Growth is geometric so that `n` single-element appends copy `O(n)` bytes
/// in total. The first allocation jumps straight to `min_capacity`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct GrowthPolicy {
    pub min_capacity: usize,
    pub factor: GrowthFactor,
}

impl GrowthPolicy {
    pub const DEFAULT_MIN_CAPACITY: usize = 4;

    pub const DEFAULT: GrowthPolicy = GrowthPolicy {
        min_capacity: Self::DEFAULT_MIN_CAPACITY,
        factor: GrowthFactor::Double,
    };

    pub const fn new(min_capacity: usize, factor: GrowthFactor) -> Self {
        GrowthPolicy {
            min_capacity,
            factor,
        }
    }

    /// Capacity to grow to so that at least `required` elements fit.
    ///
    /// Returns `cap` unchanged when it already suffices. Otherwise the
    /// geometric target is clamped to `max` (the largest representable
    /// element count), but never below `required`: an unrepresentable
    /// `required` is left for the allocation guard to reject.
    pub fn next_capacity(&self, cap: usize, required: usize, max: usize) -> usize {
        if required <= cap {
            return cap;
        }
        self.factor
            .apply(cap)
            .max(self.min_capacity)
            .min(max)
            .max(required)
    }
}

impl Default for GrowthPolicy {
    fn default() -> Self {
        Self::DEFAULT
    }
}
