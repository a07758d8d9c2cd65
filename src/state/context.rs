//! Context-window usage meter.
//!
//! The backend keeps a bounded conversation history. The meter shows how
//! full it is as a whole percentage of a fixed capacity, and whether the
//! last answer arrived after the backend trimmed older turns.

/// Percentage above which the meter turns critical.
pub const CRITICAL_ABOVE: u8 = 80;
/// Percentage above which the meter turns to a warning.
pub const WARNING_ABOVE: u8 = 60;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ContextUsage {
    pub size: u64,
    pub percentage: u8,
    pub context_was_trimmed: bool,
}

impl ContextUsage {
    /// Usage for `size` retained exchanges out of `capacity`, computed as
    /// `round(min(100, size / capacity * 100))`. A zero capacity reads as full
    /// for any non-zero size.
    #[must_use]
    pub fn from_size(size: u64, capacity: u64) -> Self {
        Self { size, percentage: percentage_of(size, capacity), context_was_trimmed: false }
    }

    /// Usage as reported by `/context-info`, clamped into `0..=100`.
    #[must_use]
    pub fn from_server(size: u64, percentage: u64) -> Self {
        let percentage = u8::try_from(percentage.min(100)).unwrap_or(100);
        Self { size, percentage, context_was_trimmed: false }
    }

    #[must_use]
    pub fn with_trimmed(mut self, trimmed: bool) -> Self {
        self.context_was_trimmed = trimmed;
        self
    }

    #[must_use]
    pub fn tier(&self) -> MeterTier {
        MeterTier::for_percentage(self.percentage)
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
fn percentage_of(size: u64, capacity: u64) -> u8 {
    if capacity == 0 {
        return if size == 0 { 0 } else { 100 };
    }
    let ratio = (size as f64 / capacity as f64) * 100.0;
    ratio.min(100.0).round() as u8
}

// =============================================================================
// TIER
// =============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MeterTier {
    Normal,
    Warning,
    Critical,
}

impl MeterTier {
    /// `>80` critical, `>60` warning, otherwise normal. 60 and 80 belong to
    /// the lower tier.
    #[must_use]
    pub fn for_percentage(percentage: u8) -> Self {
        if percentage > CRITICAL_ABOVE {
            Self::Critical
        } else if percentage > WARNING_ABOVE {
            Self::Warning
        } else {
            Self::Normal
        }
    }
}

#[cfg(test)]
#[path = "context_test.rs"]
mod context_test;
