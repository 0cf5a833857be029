//! Property-based tests for the rendering core.
//! Rendering properties checked across generated inputs rather than fixed cases.

use embassy_time::Duration;
use embedded_graphics::prelude::*;
use gridface_core::animation::{AnimationProgress, TimerScheduler};
use gridface_core::config::{FaceConfig, FaceStyle};
use gridface_core::face::ClockFace;
use gridface_core::grid::{GRID_HEIGHT, GRID_WIDTH};
use gridface_core::hands::compute_endpoint;
use gridface_core::raster::draw_line;
use gridface_core::recording::RecordingGrid;
use gridface_core::shade::{Hue, ShadeBand, select_shade};
use gridface_core::time::{ClockTime, HandPositions};
use gridface_core::trig::{TRIG_MAX_RATIO, cos_lookup, sin_lookup};

struct NoTimer;

impl TimerScheduler for NoTimer {
    fn schedule(&mut self, _delay: Duration) {}
}

fn hue(index: u8) -> Hue {
    Hue::from_index(i32::from(index))
}

fn on_grid() -> impl proptest::strategy::Strategy<Value = Point> {
    use proptest::prelude::*;
    (0..GRID_WIDTH, 0..GRID_HEIGHT).prop_map(|(x, y)| Point::new(x, y))
}

proptest::proptest! {
    /// Less coverage never yields a brighter band.
    #[test]
    fn shade_is_monotone_in_coverage(a in 0.0f32..=1.0, b in 0.0f32..=1.0) {
        let (hi, lo) = if a >= b { (a, b) } else { (b, a) };
        match (ShadeBand::from_coverage(hi), ShadeBand::from_coverage(lo)) {
            (Some(bright), Some(dim)) => assert!(bright <= dim, "{hi} -> {bright:?}, {lo} -> {dim:?}"),
            (None, Some(_)) => panic!("{hi} undrawn but {lo} drawn"),
            _ => {}
        }
    }

    /// No shade exactly when coverage is at or below the visibility floor.
    #[test]
    fn shade_none_iff_below_floor(c in -0.5f32..=1.5, index in 0u8..8) {
        assert_eq!(select_shade(c, hue(index)).is_none(), c <= 0.1);
    }

    /// Coincident endpoints paint one full-coverage cell.
    #[test]
    fn degenerate_line_paints_single_cell(p in on_grid(), index in 0u8..8, thick: bool) {
        let mut grid = RecordingGrid::reference();
        draw_line(&mut grid, p, p, hue(index), thick).unwrap();
        assert_eq!(grid.calls(), &[(p, hue(index).shades()[0])]);
    }

    /// The thick variant touches every cell the thin one does, plus the
    /// inner-edge cell whenever it lies on the grid.
    #[test]
    fn thick_line_is_superset(from in on_grid(), to in on_grid()) {
        let mut thin = RecordingGrid::reference();
        draw_line(&mut thin, from, to, Hue::White, false).unwrap();
        let mut thick = RecordingGrid::reference();
        draw_line(&mut thick, from, to, Hue::White, true).unwrap();

        let thick_cells = thick.touched_cells();
        for cell in thin.touched_cells() {
            assert!(thick_cells.contains(&cell), "{cell:?} missing from thick line");
        }
        let inner = [from, to].iter().all(|p| p.x >= 1 && p.y >= 1);
        if from != to && inner {
            assert!(thick_cells.len() > thin.touched_cells().len());
        }
    }

    /// Lines anywhere, even far off the grid, never paint outside it.
    #[test]
    fn lines_stay_on_grid(
        x0 in -100i32..100, y0 in -100i32..100,
        x1 in -100i32..100, y1 in -100i32..100,
        thick: bool,
    ) {
        let mut grid = RecordingGrid::reference();
        draw_line(&mut grid, Point::new(x0, y0), Point::new(x1, y1), Hue::Green, thick).unwrap();
        for (cell, _) in grid.calls() {
            assert!((0..GRID_WIDTH).contains(&cell.x) && (0..GRID_HEIGHT).contains(&cell.y));
        }
    }

    /// Twelve o'clock points straight up for every length.
    #[test]
    fn zero_angle_points_up(length in 0i32..10_000) {
        assert_eq!(compute_endpoint(0, length, Point::zero()), Point::new(0, -length));
    }

    /// Any angle is accepted and the lookups stay within the ratio range.
    #[test]
    fn trig_accepts_any_angle(angle: i32) {
        assert!(sin_lookup(angle).abs() <= TRIG_MAX_RATIO);
        assert!(cos_lookup(angle).abs() <= TRIG_MAX_RATIO);
    }

    /// The sweep lands exactly on target within the tick bound and never
    /// overshoots along the way.
    #[test]
    fn animation_reaches_target(hour in 0u8..24, minute in 0u8..60, second in 0u8..60) {
        let now = ClockTime::hms(hour, minute, second);
        let target = HandPositions::from_time(&now);
        let bound = (target.hour + 1) / 2 + (target.minute + 1) / 2 + (target.second + 1) / 2;

        let mut progress = AnimationProgress::start(&now);
        let mut ticks = 0;
        while !progress.is_complete() {
            progress.step(&now);
            ticks += 1;
            let p = progress.positions();
            assert!(p.hour <= target.hour && p.minute <= target.minute && p.second <= target.second);
            assert!(ticks <= bound, "{ticks} ticks exceeds bound {bound}");
        }
        assert_eq!(progress.positions(), target);
    }

    /// Same face state, same paint calls.
    #[test]
    fn render_is_idempotent(
        hour in 0u8..24, minute in 0u8..60, second in 0u8..60,
        hands in proptest::array::uniform3(0u8..8),
        hide_seconds: bool,
        square: bool,
    ) {
        let style = if square { FaceStyle::square() } else { FaceStyle::classic() };
        let config = FaceConfig {
            hour_hue: hue(hands[0]),
            minute_hue: hue(hands[1]),
            second_hue: hue(hands[2]),
            hide_seconds,
            animate_on_load: false,
            ..FaceConfig::with_style(style)
        };
        let mut face = ClockFace::load(config, ClockTime::hms(hour, minute, second), &mut NoTimer);

        let mut first = RecordingGrid::reference();
        face.render(&mut first).unwrap();
        let mut second = RecordingGrid::reference();
        face.render(&mut second).unwrap();
        assert_eq!(first, second);
    }
}
