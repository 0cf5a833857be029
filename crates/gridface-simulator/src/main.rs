//! Desktop simulator for the gridface watch face.
//!
//! Renders the gridface-core face in an SDL2 window via
//! `embedded-graphics-simulator`, driven by the host's wall clock. Battery,
//! Bluetooth, taps and weather replies are simulated from the keyboard so the
//! whole event surface can be exercised without a watch.
//!
//! # Key bindings
//!
//! | Key       | Action                              |
//! |-----------|-------------------------------------|
//! | T / R     | Tap forward / backward              |
//! | B         | Toggle Bluetooth connection         |
//! | I         | Switch small / large lost-BT icon   |
//! | C         | Toggle charger                      |
//! | Up / Down | Battery charge +10% / -10%          |
//! | H         | Toggle seconds hand                 |
//! | S         | Switch classic / square style       |
//! | A         | Reload the face (replays the sweep) |
//! | W         | Push a weather reading              |
//! | Q         | Quit                                |

use std::convert::Infallible;
use std::path::PathBuf;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use embedded_graphics::mono_font::MonoTextStyleBuilder;
use embedded_graphics::mono_font::ascii::FONT_4X6;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::text::{Baseline, Text};
use embedded_graphics_simulator::{
    OutputSettingsBuilder, SimulatorDisplay, SimulatorEvent, Window, sdl2::Keycode,
};
use log::{info, warn};

use gridface_core::animation::TimerScheduler;
use gridface_core::colors::{RED, WHITE};
use gridface_core::config::{BtIcon, FaceConfig, FaceStyle, SettingsUpdate};
use gridface_core::face::{ClockFace, FaceAction, FaceEvent};
use gridface_core::face_manager::{FaceManager, FaceRequest};
use gridface_core::framebuffer::FrameBuffer;
use gridface_core::grid::{CELL_SIZE_PX, DISPLAY_HEIGHT_PX, DISPLAY_WIDTH_PX};
use gridface_core::layers::{BLUETOOTH_ORIGIN, BatteryState};
use gridface_core::readouts::{DATE_ORIGIN, Glyph, GlyphPlacement, TEMPERATURE_ORIGIN};
use gridface_core::time::ClockTime;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Pixel scale factor for the simulator window.
const WINDOW_SCALE: u32 = 3;

/// Frame pacing; well below the 40 ms animation step.
const FRAME_DURATION: Duration = Duration::from_millis(10);

const WEEKDAY_NAMES: [&str; 7] = ["SUN", "MON", "TUE", "WED", "THU", "FRI", "SAT"];

// ---------------------------------------------------------------------------
// Host services
// ---------------------------------------------------------------------------

/// One-shot timer polled from the main loop.
#[derive(Default)]
struct SimScheduler {
    deadline: Option<Instant>,
}

impl TimerScheduler for SimScheduler {
    fn schedule(&mut self, delay: embassy_time::Duration) {
        self.deadline = Some(Instant::now() + Duration::from_millis(delay.as_millis()));
    }

    fn cancel(&mut self) {
        self.deadline = None;
    }
}

impl SimScheduler {
    /// Consume the pending firing if it is due.
    fn take_due(&mut self) -> bool {
        match self.deadline {
            Some(deadline) if Instant::now() >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

/// Current UTC wall-clock time.
fn wall_clock() -> ClockTime {
    let secs = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs();
    let days = (secs / 86_400) as i64;
    let of_day = secs % 86_400;
    let (_, month, day) = civil_from_days(days);
    // 1970-01-01 was a Thursday.
    let weekday = (days + 4).rem_euclid(7) as u8;

    ClockTime::hms(
        (of_day / 3600) as u8,
        (of_day / 60 % 60) as u8,
        (of_day % 60) as u8,
    )
    .with_date(month, day, weekday)
}

/// (year, month, day) for days since the Unix epoch.
fn civil_from_days(days: i64) -> (i64, u8, u8) {
    let z = days + 719_468;
    let era = z.div_euclid(146_097);
    let doe = z.rem_euclid(146_097);
    let yoe = (doe - doe / 1460 + doe / 36_524 - doe / 146_096) / 365;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let day = (doy - (153 * mp + 2) / 5 + 1) as u8;
    let month = (if mp < 10 { mp + 3 } else { mp - 9 }) as u8;
    let year = yoe + era * 400 + i64::from(month <= 2);
    (year, month, day)
}

fn config_path() -> PathBuf {
    std::env::temp_dir().join("gridface-simulator.cfg")
}

/// Load the persisted config, falling back to defaults.
fn load_config() -> FaceConfig {
    match std::fs::read(config_path()) {
        Ok(bytes) => FaceConfig::from_bytes(&bytes).unwrap_or_else(|e| {
            warn!("Ignoring stored config: {}", e);
            FaceConfig::default()
        }),
        Err(_) => FaceConfig::default(),
    }
}

fn save_config(config: &FaceConfig) {
    match config.to_bytes() {
        Ok(bytes) => {
            if let Err(e) = std::fs::write(config_path(), bytes) {
                warn!("Could not store config: {}", e);
            }
        }
        Err(e) => warn!("Could not encode config: {}", e),
    }
}

// ---------------------------------------------------------------------------
// Readouts
// ---------------------------------------------------------------------------

/// Draw host-side readout glyphs as text in place of the bitmap artwork.
fn draw_readouts<D>(face: &ClockFace, target: &mut D) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb565>,
{
    let style = MonoTextStyleBuilder::new()
        .font(&FONT_4X6)
        .text_color(WHITE)
        .build();

    let mut draw = |origin: Point, placement: &GlyphPlacement| -> Result<(), D::Error> {
        let mut buf = [0u8; 4];
        let text = match placement.glyph {
            Glyph::Digit(d) => char::from(b'0' + d.min(9)).encode_utf8(&mut buf),
            Glyph::Slash => '/'.encode_utf8(&mut buf),
            Glyph::Minus => '-'.encode_utf8(&mut buf),
            Glyph::Degree => 'o'.encode_utf8(&mut buf),
            Glyph::Weekday(w) => {
                let name = WEEKDAY_NAMES[usize::from(w % 7)];
                let position = (origin + placement.offset) * CELL_SIZE_PX as i32;
                return Text::with_baseline(name, position, style, Baseline::Top)
                    .draw(target)
                    .map(|_| ());
            }
        };
        let position = (origin + placement.offset) * CELL_SIZE_PX as i32;
        Text::with_baseline(text, position, style, Baseline::Top)
            .draw(target)
            .map(|_| ())
    };

    if face.tap_display_active() {
        draw(DATE_ORIGIN, &face.weekday_glyph())?;
        if let Some(glyphs) = face.temperature_glyphs() {
            for placement in &glyphs {
                draw(TEMPERATURE_ORIGIN, placement)?;
            }
        }
    } else {
        for placement in &face.date_glyphs() {
            draw(DATE_ORIGIN, placement)?;
        }
    }

    if let Some(icon) = face.bt_disconnected_icon() {
        let label = match icon {
            BtIcon::Small => "x",
            BtIcon::Large => "NO BT",
        };
        let lost = MonoTextStyleBuilder::new()
            .font(&FONT_4X6)
            .text_color(RED)
            .build();
        let position = BLUETOOTH_ORIGIN * CELL_SIZE_PX as i32;
        Text::with_baseline(label, position, lost, Baseline::Top).draw(target)?;
    }
    Ok(())
}

fn draw_overlay(face: &ClockFace, fb: &mut FrameBuffer) -> Result<(), Infallible> {
    draw_readouts(face, fb)
}

// ---------------------------------------------------------------------------
// Simulator state
// ---------------------------------------------------------------------------

type SimManager = FaceManager<SimulatorDisplay<Rgb565>, SimScheduler>;

struct Simulator {
    manager: SimManager,
    battery: BatteryState,
    bluetooth: bool,
    /// Synthetic weather, whole degrees Celsius
    weather: i32,
}

impl Simulator {
    fn new(config: FaceConfig) -> Self {
        let display =
            SimulatorDisplay::<Rgb565>::new(Size::new(DISPLAY_WIDTH_PX, DISPLAY_HEIGHT_PX));
        let manager = FaceManager::new(display, config, wall_clock(), SimScheduler::default())
            .with_overlay(draw_overlay);
        Self {
            manager,
            battery: BatteryState::default(),
            bluetooth: true,
            weather: 18,
        }
    }

    /// Hand a request to the face manager, then carry out its actions.
    fn request(&mut self, request: FaceRequest) {
        let mut actions = Vec::new();
        // The simulator display cannot fail
        let Ok(()) = self.manager.process_request(request, |a| actions.push(a));
        for action in actions {
            self.perform(action);
        }
    }

    fn send(&mut self, event: FaceEvent) {
        self.request(FaceRequest::Event(event));
    }

    fn perform(&mut self, action: FaceAction) {
        match action {
            FaceAction::RequestWeather => {
                info!("Weather requested");
                self.push_weather();
            }
            FaceAction::Vibrate => info!("*bzzt* (vibrate)"),
            // Readouts are redrawn by the overlay on every frame.
            FaceAction::ShowTapDisplay
            | FaceAction::ClearTapDisplay
            | FaceAction::RefreshDate => self.request(FaceRequest::Redraw),
        }
    }

    fn push_weather(&mut self) {
        // Wander between -12 and 34 degrees.
        self.weather = (self.weather + 37) % 47 - 12;
        let reading = self.weather;
        self.send(FaceEvent::Temperature(reading));
    }

    fn config(&self) -> FaceConfig {
        *self.manager.face().config()
    }

    fn reload(&mut self, config: FaceConfig) {
        self.request(FaceRequest::Reload {
            config,
            now: wall_clock(),
        });
        // A fresh face starts with default inputs; replay the simulated ones.
        self.send(FaceEvent::Battery(self.battery));
        if !self.bluetooth {
            self.send(FaceEvent::Bluetooth(false));
        }
    }

    fn handle_key(&mut self, keycode: Keycode) {
        let now = wall_clock();
        match keycode {
            Keycode::T => self.send(FaceEvent::Tap { direction: 1, now }),
            Keycode::R => self.send(FaceEvent::Tap { direction: -1, now }),
            Keycode::B => {
                self.bluetooth = !self.bluetooth;
                info!("Bluetooth {}", if self.bluetooth { "connected" } else { "lost" });
                self.send(FaceEvent::Bluetooth(self.bluetooth));
            }
            Keycode::I => {
                let mut config = self.config();
                config.bt_icon = match config.bt_icon {
                    BtIcon::Small => BtIcon::Large,
                    BtIcon::Large => BtIcon::Small,
                };
                info!("Disconnected icon {:?}", config.bt_icon);
                self.reload(config);
            }
            Keycode::C => {
                self.battery.is_plugged = !self.battery.is_plugged;
                self.battery.is_charging = self.battery.is_plugged && self.battery.charge_percent < 100;
                self.send(FaceEvent::Battery(self.battery));
            }
            Keycode::Up | Keycode::Down => {
                let charge = i16::from(self.battery.charge_percent);
                let step = if keycode == Keycode::Up { 10 } else { -10 };
                self.battery.charge_percent = (charge + step).clamp(0, 100) as u8;
                info!("Battery {}%", self.battery.charge_percent);
                self.send(FaceEvent::Battery(self.battery));
            }
            Keycode::H => {
                let update = SettingsUpdate {
                    hide_seconds: Some(!self.config().hide_seconds),
                    ..Default::default()
                };
                self.send(FaceEvent::Settings(update));
            }
            Keycode::S => {
                let current = self.config();
                let style = if current.style.layered_background {
                    FaceStyle::square()
                } else {
                    FaceStyle::classic()
                };
                info!("Switching style (square = {})", !style.layered_background);
                self.reload(FaceConfig {
                    animate_on_load: current.animate_on_load,
                    hide_seconds: current.hide_seconds,
                    temp_scale: current.temp_scale,
                    bt_icon: current.bt_icon,
                    ..FaceConfig::with_style(style)
                });
            }
            Keycode::A => {
                let config = self.config();
                self.reload(config);
            }
            Keycode::W => self.push_weather(),
            _ => {}
        }
    }
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

fn main() {
    env_logger::init();
    info!("Starting gridface simulator");
    info!(
        "Display: {}×{} (scale {}×)",
        DISPLAY_WIDTH_PX, DISPLAY_HEIGHT_PX, WINDOW_SCALE
    );
    info!(
        "Keys: T/R=Tap  B=BT  I=BT icon  C=Charger  Up/Down=Battery  H=Seconds  S=Style  A=Reload  W=Weather  Q=Quit"
    );

    let output_settings = OutputSettingsBuilder::new().scale(WINDOW_SCALE).build();
    let mut window = Window::new("Gridface Simulator", &output_settings);

    let mut sim = Simulator::new(load_config());
    sim.push_weather();
    let mut last_second = wall_clock().second;

    // The SDL window is lazily initialized on the first `update()` call.
    // We must call `update()` once before `events()` or it will panic.
    sim.request(FaceRequest::Redraw);
    window.update(sim.manager.display());

    // -----------------------------------------------------------------------
    // Main loop
    // -----------------------------------------------------------------------
    'running: loop {
        let frame_start = Instant::now();

        // --- SDL events ---------------------------------------------------
        for event in window.events() {
            match event {
                SimulatorEvent::Quit => break 'running,
                SimulatorEvent::KeyDown { keycode, .. } => {
                    if keycode == Keycode::Q || keycode == Keycode::Escape {
                        break 'running;
                    }
                    sim.handle_key(keycode);
                }
                _ => {}
            }
        }

        // --- Clock sources ------------------------------------------------
        let now = wall_clock();
        if now.second != last_second {
            last_second = now.second;
            sim.send(FaceEvent::Tick(now));
        }
        if sim.manager.scheduler_mut().take_due() {
            sim.send(FaceEvent::AnimationTimer(now));
        }

        window.update(sim.manager.display());

        // --- Frame pacing -------------------------------------------------
        let elapsed = frame_start.elapsed();
        if elapsed < FRAME_DURATION {
            std::thread::sleep(FRAME_DURATION - elapsed);
        }
    }

    save_config(&sim.config());
    sim.manager.unload();
    info!("Simulator exiting");
}
