//! Numeric conversion helpers used by the waypoint builder.
//!
//! The path clock runs in signed 64-bit milliseconds while it is being built
//! and is stored as `u32` keys afterwards. These helpers keep the casts in
//! one place.

/// Convert authored seconds into clock milliseconds.
#[must_use]
pub fn secs_to_ms(secs: u32) -> i64 {
    i64::from(secs) * 1000
}

/// Truncate a millisecond value towards zero, as the path clock expects.
#[expect(
    clippy::cast_possible_truncation,
    reason = "Path times stay far below i64::MAX; truncation is the intended rounding."
)]
#[must_use]
pub fn truncate_ms(value: f32) -> i64 {
    debug_assert!(value.is_finite(), "expected finite millisecond value");
    value as i64
}

/// Narrow a clock value into a table key, returning `None` when out of range.
#[must_use]
pub fn clock_to_key(value: i64) -> Option<u32> {
    u32::try_from(value).ok()
}

/// Express a `u32` millisecond span as `f32`.
#[expect(
    clippy::cast_precision_loss,
    reason = "Spans are below 2^24 ms in practice; the loss is sub-millisecond otherwise."
)]
#[must_use]
pub fn ms_as_f32(value: u32) -> f32 {
    value as f32
}
