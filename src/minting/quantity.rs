//! Bounded mint quantity counter.

/// Smallest quantity that can be minted at once.
pub const MIN_QUANTITY: u8 = 1;
/// Largest quantity that can be minted at once.
pub const MAX_QUANTITY: u8 = 10;

/// Counter clamped to `[MIN_QUANTITY, MAX_QUANTITY]`.
///
/// Out-of-range requests clamp silently so the value is always mintable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuantitySelector {
    value: u8,
}

impl QuantitySelector {
    pub fn new() -> Self {
        Self { value: MIN_QUANTITY }
    }

    pub fn value(&self) -> u8 {
        self.value
    }

    /// Add one, saturating at [`MAX_QUANTITY`].
    pub fn increment(&mut self) -> u8 {
        self.set(self.value.saturating_add(1))
    }

    /// Subtract one, saturating at [`MIN_QUANTITY`].
    pub fn decrement(&mut self) -> u8 {
        self.set(self.value.saturating_sub(1))
    }

    /// Set an arbitrary value, clamped into range.
    pub fn set(&mut self, value: u8) -> u8 {
        self.value = value.clamp(MIN_QUANTITY, MAX_QUANTITY);
        self.value
    }
}

impl Default for QuantitySelector {
    fn default() -> Self {
        Self::new()
    }
}
