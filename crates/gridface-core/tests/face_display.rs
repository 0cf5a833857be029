//! End-to-end rendering of the face onto pixel targets.

use embassy_time::Duration;
use embedded_graphics::mock_display::MockDisplay;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use gridface_core::animation::TimerScheduler;
use gridface_core::colors::{BLUE_MOON, GREEN, RED, WHITE, YELLOW};
use gridface_core::config::FaceConfig;
use gridface_core::face::{ClockFace, FaceEvent};
use gridface_core::framebuffer::FrameBuffer;
use gridface_core::grid::{CELL_SIZE_PX, PixelGrid};
use gridface_core::layers::BatteryState;
use gridface_core::time::ClockTime;

#[derive(Default)]
struct NoTimer;

impl TimerScheduler for NoTimer {
    fn schedule(&mut self, _delay: Duration) {}
}

/// Top-left pixel of a cell.
fn px(x: i32, y: i32) -> Point {
    Point::new(x, y) * CELL_SIZE_PX as i32
}

fn still() -> FaceConfig {
    FaceConfig {
        animate_on_load: false,
        ..FaceConfig::default()
    }
}

fn rendered(face: &mut ClockFace) -> FrameBuffer {
    let mut fb = FrameBuffer::new();
    face.render(&mut PixelGrid::new(&mut fb)).unwrap();
    fb
}

#[test]
fn test_evening_face_in_framebuffer() {
    let now = ClockTime::hms(21, 45, 0);
    let mut face = ClockFace::load(still(), now, &mut NoTimer);
    let fb = rendered(&mut face);

    // Minute hand points to nine o'clock, second hand to twelve.
    assert_eq!(fb.pixel(px(6, 17)), Some(WHITE));
    assert_eq!(fb.pixel(px(18, 2)), Some(GREEN));
    // PM lettering, battery case and Bluetooth rune.
    assert_eq!(fb.pixel(px(27, 34)), Some(YELLOW));
    assert_eq!(fb.pixel(px(1, 39)), Some(WHITE));
    assert_eq!(fb.pixel(px(1, 32)), Some(BLUE_MOON));
    // Cells leave a one-pixel grid line.
    assert_eq!(fb.pixel(px(6, 17) + Point::new(3, 0)), Some(Rgb565::BLACK));
}

#[test]
fn test_low_battery_while_charging() {
    let now = ClockTime::hms(9, 0, 0);
    let mut face = ClockFace::load(still(), now, &mut NoTimer);
    let battery = BatteryState {
        charge_percent: 15,
        is_charging: true,
        is_plugged: true,
    };
    assert!(face.on_event(&FaceEvent::Battery(battery), &mut NoTimer).redraw);
    let fb = rendered(&mut face);

    // Plugged case is green, the single fill cell red, the bolt yellow.
    assert_eq!(fb.pixel(px(1, 39)), Some(GREEN));
    assert_eq!(fb.pixel(px(2, 40)), Some(RED));
    assert_eq!(fb.pixel(px(3, 40)), Some(Rgb565::BLACK));
    assert_eq!(fb.pixel(px(10, 39)), Some(YELLOW));
}

#[test]
fn test_flush_only_sends_dirty_region() {
    let now = ClockTime::hms(10, 10, 10);
    let mut face = ClockFace::load(still(), now, &mut NoTimer);
    let mut fb = rendered(&mut face);

    let mut display: MockDisplay<Rgb565> = MockDisplay::new();
    display.set_allow_out_of_bounds_drawing(true);
    fb.flush(&mut display).unwrap();

    // Hour hand tip at cell (11, 12).
    assert_eq!(display.get_pixel(px(11, 12)), Some(WHITE));
    // Grid lines inside the dirty box are sent as background.
    assert_eq!(display.get_pixel(px(11, 12) + Point::new(3, 0)), Some(Rgb565::BLACK));
    // Nothing at the very corner changed, so it was never sent.
    assert_eq!(display.get_pixel(Point::zero()), None);
}
