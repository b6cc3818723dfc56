//! Scoring module - line-clear points, level curve, and gravity speed.
//!
//! Points per simultaneous clear are table-driven and scale linearly with
//! the level in force when the clear happened. The level itself is a pure
//! function of total lines, and the gravity interval decays geometrically
//! with level down to a floor.

use log::warn;

use crate::types::{
    BASE_DROP_MS, CLEAR_SCORES, DROP_RATE, HARD_DROP_POINTS_PER_CELL, LINES_PER_LEVEL,
    MIN_DROP_MS, SOFT_DROP_POINTS_PER_CELL,
};

/// Points for clearing `lines` rows at once at the given level.
///
/// Zero lines is an ordinary non-clear and scores nothing. Counts above 4
/// cannot be produced by a 4-mino piece; they are clamped to 4 and logged
/// rather than silently scored with a unit multiplier.
pub fn clear_points(lines: usize, level: u32) -> u32 {
    if lines == 0 {
        return 0;
    }
    let lines = if lines > 4 {
        warn!("clamping impossible line-clear count {lines} to 4");
        4
    } else {
        lines
    };
    CLEAR_SCORES[lines] * level.max(1)
}

/// Points for manual descent: +1 per soft-dropped cell, +2 per hard-dropped
/// cell.
pub fn drop_points(cells: u32, hard: bool) -> u32 {
    if hard {
        cells * HARD_DROP_POINTS_PER_CELL
    } else {
        cells * SOFT_DROP_POINTS_PER_CELL
    }
}

/// Level for a cumulative line count: one level per 10 lines, starting at 1.
pub fn level_for_lines(total_lines: u32) -> u32 {
    total_lines / LINES_PER_LEVEL + 1
}

/// Gravity interval for a level: `BASE * RATE^(level-1)`, floored at
/// [`MIN_DROP_MS`].
pub fn drop_interval_ms(level: u32) -> u32 {
    let level = level.max(1);
    let interval = BASE_DROP_MS as f64 * DROP_RATE.powi(level as i32 - 1);
    (interval.round() as u32).max(MIN_DROP_MS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clear_points_follow_the_table_times_level() {
        for (lines, base) in [(1usize, 100u32), (2, 300), (3, 500), (4, 800)] {
            assert_eq!(clear_points(lines, 1), base);
            assert_eq!(clear_points(lines, 5), base * 5);
        }
    }

    #[test]
    fn zero_lines_score_nothing() {
        assert_eq!(clear_points(0, 1), 0);
        assert_eq!(clear_points(0, 9), 0);
    }

    #[test]
    fn impossible_counts_clamp_to_tetris() {
        assert_eq!(clear_points(5, 1), 800);
        assert_eq!(clear_points(100, 2), 1600);
    }

    #[test]
    fn drop_points_per_cell() {
        assert_eq!(drop_points(10, false), 10);
        assert_eq!(drop_points(10, true), 20);
        assert_eq!(drop_points(0, true), 0);
    }

    #[test]
    fn level_curve_steps_every_ten_lines() {
        assert_eq!(level_for_lines(0), 1);
        assert_eq!(level_for_lines(9), 1);
        assert_eq!(level_for_lines(10), 2);
        assert_eq!(level_for_lines(12), 2);
        assert_eq!(level_for_lines(100), 11);
    }

    #[test]
    fn drop_interval_decays_geometrically_to_the_floor() {
        assert_eq!(drop_interval_ms(1), BASE_DROP_MS);
        assert_eq!(drop_interval_ms(2), 850);
        // Level 0 never occurs but must not underflow the exponent.
        assert_eq!(drop_interval_ms(0), BASE_DROP_MS);

        // Deep levels hit the floor and stay there.
        assert_eq!(drop_interval_ms(16), MIN_DROP_MS);
        assert_eq!(drop_interval_ms(50), MIN_DROP_MS);
    }

    #[test]
    fn drop_interval_is_monotonically_non_increasing() {
        let mut previous = drop_interval_ms(1);
        for level in 2..40 {
            let interval = drop_interval_ms(level);
            assert!(interval <= previous);
            previous = interval;
        }
    }
}
