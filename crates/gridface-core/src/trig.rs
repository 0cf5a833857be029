//! Table-based trigonometry on a fixed-point full-circle angle.
//!
//! Angles run from 0 to [`TRIG_MAX_ANGLE`] (exclusive) for one revolution,
//! clockwise from 12 o'clock. Results are scaled so that 1.0 is
//! [`TRIG_MAX_RATIO`]. A quarter-wave table is built at compile time and
//! linearly interpolated, so every lookup is deterministic integer math.

use core::f64::consts::FRAC_PI_2;

/// One full revolution
pub const TRIG_MAX_ANGLE: i32 = 0x1_0000;

/// Fixed-point 1.0 for lookup results
pub const TRIG_MAX_RATIO: i32 = 0xFFFF;

/// One quarter revolution (90 degrees)
pub const QUARTER_TURN: i32 = TRIG_MAX_ANGLE / 4;

/// Table entries per quarter wave
const QUARTER_STEPS: usize = 256;

/// Angle units between two table entries
const STEP_SHIFT: u32 = 6;
const STEP_MASK: i32 = (1 << STEP_SHIFT) - 1;

static SINE_QUARTER: [i32; QUARTER_STEPS + 1] = build_quarter_table();

/// Taylor series for sine, exact to well below one table unit on [0, pi/2].
const fn taylor_sin(x: f64) -> f64 {
    let x2 = x * x;
    let mut term = x;
    let mut sum = x;
    let mut n = 1;
    while n < 12 {
        let k = 2 * n;
        term = -term * x2 / ((k * (k + 1)) as f64);
        sum += term;
        n += 1;
    }
    sum
}

const fn build_quarter_table() -> [i32; QUARTER_STEPS + 1] {
    let mut table = [0i32; QUARTER_STEPS + 1];
    let mut i = 1;
    while i < QUARTER_STEPS {
        let x = FRAC_PI_2 * (i as f64) / (QUARTER_STEPS as f64);
        table[i] = (taylor_sin(x) * TRIG_MAX_RATIO as f64 + 0.5) as i32;
        i += 1;
    }
    table[QUARTER_STEPS] = TRIG_MAX_RATIO;
    table
}

/// Reduce any angle onto one revolution.
#[inline]
pub fn normalize_angle(angle: i32) -> i32 {
    angle.rem_euclid(TRIG_MAX_ANGLE)
}

/// Sine over the first quarter, `offset` in 0..=QUARTER_TURN.
fn quarter_sin(offset: i32) -> i32 {
    let index = (offset >> STEP_SHIFT) as usize;
    let frac = offset & STEP_MASK;
    match (SINE_QUARTER.get(index), SINE_QUARTER.get(index + 1)) {
        (Some(&lo), Some(&hi)) => lo + ((hi - lo) * frac + (1 << (STEP_SHIFT - 1))) / (1 << STEP_SHIFT),
        (Some(&lo), None) => lo,
        _ => TRIG_MAX_RATIO,
    }
}

/// Sine of `angle`, scaled by [`TRIG_MAX_RATIO`].
pub fn sin_lookup(angle: i32) -> i32 {
    let angle = normalize_angle(angle);
    let offset = angle % QUARTER_TURN;
    match angle / QUARTER_TURN {
        0 => quarter_sin(offset),
        1 => quarter_sin(QUARTER_TURN - offset),
        2 => -quarter_sin(offset),
        _ => -quarter_sin(QUARTER_TURN - offset),
    }
}

/// Cosine of `angle`, scaled by [`TRIG_MAX_RATIO`].
pub fn cos_lookup(angle: i32) -> i32 {
    sin_lookup(normalize_angle(angle) + QUARTER_TURN)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cardinal_points() {
        assert_eq!(sin_lookup(0), 0);
        assert_eq!(cos_lookup(0), TRIG_MAX_RATIO);
        assert_eq!(sin_lookup(QUARTER_TURN), TRIG_MAX_RATIO);
        assert_eq!(cos_lookup(QUARTER_TURN), 0);
        assert_eq!(sin_lookup(2 * QUARTER_TURN), 0);
        assert_eq!(cos_lookup(2 * QUARTER_TURN), -TRIG_MAX_RATIO);
        assert_eq!(sin_lookup(3 * QUARTER_TURN), -TRIG_MAX_RATIO);
        assert_eq!(cos_lookup(3 * QUARTER_TURN), 0);
    }

    #[test]
    fn test_out_of_range_angles_wrap() {
        assert_eq!(sin_lookup(TRIG_MAX_ANGLE + 1234), sin_lookup(1234));
        assert_eq!(sin_lookup(-QUARTER_TURN), -TRIG_MAX_RATIO);
        assert_eq!(cos_lookup(i32::MIN), cos_lookup(normalize_angle(i32::MIN)));
        assert_eq!(sin_lookup(i32::MAX), sin_lookup(normalize_angle(i32::MAX)));
    }

    #[test]
    fn test_table_is_monotonic() {
        for pair in SINE_QUARTER.windows(2) {
            assert!(pair[0] <= pair[1]);
        }
    }

    #[test]
    fn test_forty_five_degrees() {
        // sin(45 deg) * 0xFFFF = 46340.4
        let s = sin_lookup(TRIG_MAX_ANGLE / 8);
        let c = cos_lookup(TRIG_MAX_ANGLE / 8);
        assert!((s - 46340).abs() <= 1, "sin = {s}");
        assert_eq!(s, c);
    }

    #[test]
    fn test_thirty_degrees() {
        let s = sin_lookup(TRIG_MAX_ANGLE / 12);
        assert!((s - TRIG_MAX_RATIO / 2).abs() <= 2, "sin = {s}");
    }
}
