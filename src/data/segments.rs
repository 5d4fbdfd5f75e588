//! Seven-segment display digits.
//!
//! Segment order is a, b, c, d, e, f, g; targets are one-hot over 0-9.

use crate::data::sample::Sample;

pub const SEGMENT_PATTERNS: [[f64; 7]; 10] = [
    [1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 0.0],
    [0.0, 1.0, 1.0, 0.0, 0.0, 0.0, 0.0],
    [1.0, 1.0, 0.0, 1.0, 1.0, 0.0, 1.0],
    [1.0, 1.0, 1.0, 1.0, 0.0, 0.0, 1.0],
    [0.0, 1.0, 1.0, 0.0, 0.0, 1.0, 1.0],
    [1.0, 0.0, 1.0, 1.0, 0.0, 1.0, 1.0],
    [1.0, 0.0, 1.0, 1.0, 1.0, 1.0, 1.0],
    [1.0, 1.0, 1.0, 0.0, 0.0, 0.0, 0.0],
    [1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0],
    [1.0, 1.0, 1.0, 1.0, 0.0, 1.0, 1.0],
];

/// One sample per digit, in digit order.
pub fn seven_segment() -> Vec<Sample> {
    SEGMENT_PATTERNS.iter()
        .enumerate()
        .map(|(digit, pattern)| {
            let mut target = vec![0.0; 10];
            target[digit] = 1.0;
            Sample::new(pattern.to_vec(), target)
        })
        .collect()
}
