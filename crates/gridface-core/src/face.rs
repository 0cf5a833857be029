//! The clock face: render state plus the event handling around it.
//!
//! [`ClockFace`] is created when the face is shown and dropped when it is
//! hidden. Hosts feed it [`FaceEvent`]s (clock ticks, the animation timer,
//! taps, battery/Bluetooth changes, phone messages) and get back a
//! [`FaceResponse`] telling them whether to redraw and which side effects
//! to carry out. Drawing is a separate [`ClockFace::render`] call against
//! any [`GridSurface`].

use core::cell::RefCell;

use embassy_sync::blocking_mutex::Mutex;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embedded_graphics::prelude::*;
use heapless::Vec;
use log::{debug, info, warn};

use crate::animation::{ANIMATION_FRAME, AnimationProgress, TimerScheduler};
use crate::colors::OXFORD_BLUE;
use crate::config::{BtIcon, FaceConfig, SettingsUpdate};
use crate::grid::{GridSurface, OffsetGrid};
use crate::layers::{
    BatteryLayer, BatteryState, BluetoothLayer, FaceFrame, HandsLayer, Layer, LayerId,
    LayerWrapper,
};
use crate::readouts::{self, GlyphPlacement};
use crate::time::{ClockTime, HandPositions};

/// Clock ticks the tap display stays up after a tap
pub const TAP_DISPLAY_SECS: u8 = 5;

const MAX_LAYERS: usize = 4;

/// Upper bound of side effects a single event can produce
pub const MAX_ACTIONS: usize = 4;

/// Something that happened to the face.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaceEvent {
    /// Once-per-second wall-clock tick
    Tick(ClockTime),
    /// The one-shot animation timer fired
    AnimationTimer(ClockTime),
    /// Wrist tap; positive direction cycles the second hue forward
    Tap { direction: i32, now: ClockTime },
    Battery(BatteryState),
    Bluetooth(bool),
    Settings(SettingsUpdate),
    /// Whole degrees Celsius from the phone
    Temperature(i32),
}

/// Side effect the host has to carry out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaceAction {
    /// Ask the phone for a new weather reading
    RequestWeather,
    /// Short vibration pulse
    Vibrate,
    /// Swap the date for the weekday name and show the temperature
    ShowTapDisplay,
    /// Restore the date readout
    ClearTapDisplay,
    /// Date glyphs changed
    RefreshDate,
}

/// Result of [`ClockFace::on_event`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FaceResponse {
    pub redraw: bool,
    pub actions: Vec<FaceAction, MAX_ACTIONS>,
}

impl FaceResponse {
    fn redraw() -> Self {
        Self {
            redraw: true,
            actions: Vec::new(),
        }
    }

    fn push(&mut self, action: FaceAction) {
        if self.actions.push(action).is_err() {
            warn!("Dropping face action {:?}", action);
        }
    }
}

/// Face state shared between input and render callbacks on hosts where
/// those run on different threads.
pub type SharedFace = Mutex<CriticalSectionRawMutex, RefCell<ClockFace>>;

/// Everything the face needs between redraws.
pub struct ClockFace {
    config: FaceConfig,
    time: ClockTime,
    animation: AnimationProgress,
    layers: Vec<LayerWrapper, MAX_LAYERS>,
    battery: BatteryState,
    bluetooth_connected: bool,
    /// Ticks left before the tap display is cleared
    tap_countdown: Option<u8>,
    /// Last reading, Celsius
    temperature: Option<i32>,
}

impl ClockFace {
    /// Build the face at load time, arming the animation timer if the
    /// sweep is enabled.
    pub fn load<T: TimerScheduler>(config: FaceConfig, now: ClockTime, scheduler: &mut T) -> Self {
        let animation = AnimationProgress::begin(config.animate_on_load, &now);
        if !animation.is_complete() {
            scheduler.schedule(ANIMATION_FRAME);
        }
        info!(
            "Face loaded at {:02}:{:02}:{:02}, animate={}",
            now.hour, now.minute, now.second, config.animate_on_load
        );

        let mut layers = Vec::new();
        layers.push(LayerWrapper::Hands(HandsLayer::new())).ok();
        layers.push(LayerWrapper::Battery(BatteryLayer::new())).ok();
        layers.push(LayerWrapper::Bluetooth(BluetoothLayer::new())).ok();

        Self {
            config,
            time: now,
            animation,
            layers,
            battery: BatteryState::default(),
            bluetooth_connected: true,
            tap_countdown: None,
            temperature: None,
        }
    }

    /// Tear the face down, dropping a still-pending animation timer.
    pub fn unload<T: TimerScheduler>(self, scheduler: &mut T) {
        self.cancel_pending(scheduler);
        info!("Face unloaded");
    }

    /// Unload and load again in place, e.g. after a style change.
    pub fn reload<T: TimerScheduler>(&mut self, config: FaceConfig, now: ClockTime, scheduler: &mut T) {
        self.cancel_pending(scheduler);
        *self = Self::load(config, now, scheduler);
    }

    fn cancel_pending<T: TimerScheduler>(&self, scheduler: &mut T) {
        if !self.animation.is_complete() {
            debug!("Cancelling pending animation timer");
            scheduler.cancel();
        }
    }

    pub fn on_event<T: TimerScheduler>(
        &mut self,
        event: &FaceEvent,
        scheduler: &mut T,
    ) -> FaceResponse {
        debug!("Face event: {:?}", event);
        match *event {
            FaceEvent::Tick(now) => self.on_tick(now),
            FaceEvent::AnimationTimer(now) => self.on_animation_timer(now, scheduler),
            FaceEvent::Tap { direction, now } => self.on_tap(direction, now),
            FaceEvent::Battery(state) => {
                if state == self.battery {
                    return FaceResponse::default();
                }
                self.battery = state;
                self.mark_dirty(LayerId::Battery);
                FaceResponse::redraw()
            }
            FaceEvent::Bluetooth(connected) => {
                let mut response = FaceResponse::redraw();
                if !connected {
                    response.push(FaceAction::Vibrate);
                }
                self.bluetooth_connected = connected;
                self.mark_dirty(LayerId::Bluetooth);
                response
            }
            FaceEvent::Settings(update) => {
                if update.is_empty() {
                    debug!("Empty settings message ignored");
                    return FaceResponse::default();
                }
                if !self.config.apply(&update) {
                    return FaceResponse::default();
                }
                info!("Settings applied: {:?}", update);
                self.mark_dirty(LayerId::Hands);
                FaceResponse::redraw()
            }
            FaceEvent::Temperature(celsius) => {
                self.temperature = Some(celsius);
                FaceResponse {
                    redraw: self.tap_display_active(),
                    actions: Vec::new(),
                }
            }
        }
    }

    fn on_tick(&mut self, now: ClockTime) -> FaceResponse {
        let mut response = FaceResponse::redraw();
        if now.day != self.time.day || now.month != self.time.month {
            response.push(FaceAction::RefreshDate);
        }
        if now.minute % 30 == 0 && now.second == 0 {
            response.push(FaceAction::RequestWeather);
        }
        match self.tap_countdown {
            Some(0) => {
                self.tap_countdown = None;
                self.set_status_hidden(false);
                response.push(FaceAction::ClearTapDisplay);
            }
            Some(remaining) => self.tap_countdown = Some(remaining - 1),
            None => {}
        }
        self.time = now;
        self.mark_dirty(LayerId::Hands);
        response
    }

    fn on_animation_timer<T: TimerScheduler>(
        &mut self,
        now: ClockTime,
        scheduler: &mut T,
    ) -> FaceResponse {
        self.time = now;
        if self.animation.is_complete() {
            return FaceResponse::default();
        }
        self.animation.step(&now);
        if !self.animation.is_complete() {
            scheduler.schedule(ANIMATION_FRAME);
        }
        self.mark_dirty(LayerId::Hands);
        FaceResponse::redraw()
    }

    fn on_tap(&mut self, direction: i32, now: ClockTime) -> FaceResponse {
        let delta = if direction > 0 { 1 } else { -1 };
        self.config.second_hue = self.config.second_hue.cycle(delta);
        debug!("Second hue now {}", self.config.second_hue.label());

        self.time = now;
        self.tap_countdown = Some(TAP_DISPLAY_SECS);
        self.set_status_hidden(true);
        self.mark_dirty(LayerId::Hands);

        let mut response = FaceResponse::redraw();
        response.push(FaceAction::ShowTapDisplay);
        response
    }

    /// Hide or show the battery and Bluetooth layers.
    fn set_status_hidden(&mut self, hidden: bool) {
        for layer in self
            .layers
            .iter_mut()
            .filter(|l| matches!(l.id(), LayerId::Battery | LayerId::Bluetooth))
        {
            layer.set_hidden(hidden);
        }
    }

    fn mark_dirty(&mut self, id: LayerId) {
        if let Some(layer) = self.layers.iter_mut().find(|l| l.id() == id) {
            layer.mark_dirty();
        }
    }

    /// Paint every visible layer onto `surface`.
    ///
    /// Draws the full face each call; the same state always produces the
    /// same sequence of cell fills.
    pub fn render<S: GridSurface>(&mut self, surface: &mut S) -> Result<(), S::Error> {
        if !self.config.style.layered_background {
            let size = surface.grid_size();
            for y in 0..size.height as i32 {
                for x in 0..size.width as i32 {
                    surface.fill_cell(Point::new(x, y), OXFORD_BLUE)?;
                }
            }
        }

        let frame = FaceFrame {
            time: &self.time,
            hands: self.hand_positions(),
            config: &self.config,
            battery: self.battery,
            bluetooth_connected: self.bluetooth_connected,
        };
        for layer in self.layers.iter().filter(|l| !l.is_hidden()) {
            let mut local = OffsetGrid::new(&mut *surface, layer.origin());
            layer.draw_layer(&frame, &mut local)?;
        }

        for layer in self.layers.iter_mut() {
            layer.mark_clean();
        }
        Ok(())
    }

    /// Whether any layer changed since the last [`render`](Self::render).
    pub fn needs_redraw(&self) -> bool {
        self.layers.iter().any(|l| l.is_dirty())
    }

    /// Positions the hands are drawn at: animated mid-sweep, live after.
    pub fn hand_positions(&self) -> HandPositions {
        self.animation.display_positions(&self.time)
    }

    pub fn animation(&self) -> &AnimationProgress {
        &self.animation
    }

    pub fn config(&self) -> &FaceConfig {
        &self.config
    }

    pub fn time(&self) -> &ClockTime {
        &self.time
    }

    pub fn battery(&self) -> BatteryState {
        self.battery
    }

    pub fn bluetooth_connected(&self) -> bool {
        self.bluetooth_connected
    }

    pub fn is_layer_hidden(&self, id: LayerId) -> bool {
        self.layers
            .iter()
            .find(|l| l.id() == id)
            .is_some_and(|l| l.is_hidden())
    }

    /// Image the host shows while the phone is disconnected.
    ///
    /// Lives inside the Bluetooth layer, so it hides with it during the tap
    /// display.
    pub fn bt_disconnected_icon(&self) -> Option<BtIcon> {
        (!self.bluetooth_connected && !self.is_layer_hidden(LayerId::Bluetooth))
            .then_some(self.config.bt_icon)
    }

    pub fn tap_display_active(&self) -> bool {
        self.tap_countdown.is_some()
    }

    pub fn date_glyphs(&self) -> [GlyphPlacement; 5] {
        readouts::date_glyphs(&self.time)
    }

    pub fn weekday_glyph(&self) -> GlyphPlacement {
        readouts::weekday_glyph(&self.time)
    }

    /// Last temperature in the configured scale.
    pub fn temperature(&self) -> Option<i32> {
        self.temperature
            .map(|celsius| self.config.temp_scale.from_celsius(celsius))
    }

    /// Temperature glyphs, or `None` before the first reading.
    pub fn temperature_glyphs(&self) -> Option<Vec<GlyphPlacement, 4>> {
        self.temperature().map(readouts::temperature_glyphs)
    }
}
