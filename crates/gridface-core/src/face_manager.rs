//! Face manager for driving a display from face events
//!
//! This module provides an async task-based rendering loop that:
//! - Owns the display and the loaded [`ClockFace`]
//! - Receives face events via a channel
//! - Renders into a [`FrameBuffer`] and flushes only what changed
//! - Hands face actions (vibrate, weather request, ...) back to the host

use core::convert::Infallible;

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::{Channel, Receiver, Sender};
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use log::{debug, error, info};

use crate::animation::TimerScheduler;
use crate::config::FaceConfig;
use crate::face::{ClockFace, FaceAction, FaceEvent};
use crate::framebuffer::FrameBuffer;
use crate::grid::PixelGrid;
use crate::time::ClockTime;

/// Channel capacity for face requests
pub const FACE_REQUEST_CAPACITY: usize = 8;

/// Request to update the face or the display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaceRequest {
    /// Forward an event to the face
    Event(FaceEvent),
    /// Force a redraw of the current face
    Redraw,
    /// Unload the face and load it again with new config
    Reload { config: FaceConfig, now: ClockTime },
}

/// Global channel for face requests
pub static FACE_CHANNEL: Channel<CriticalSectionRawMutex, FaceRequest, FACE_REQUEST_CAPACITY> =
    Channel::new();

/// Host drawing composited over the face before each flush, e.g. the
/// date and temperature artwork.
pub type Overlay = fn(&ClockFace, &mut FrameBuffer) -> Result<(), Infallible>;

/// Owns the display, the framebuffer and the face
pub struct FaceManager<D, T>
where
    D: DrawTarget<Color = Rgb565>,
    T: TimerScheduler,
{
    display: D,
    framebuffer: FrameBuffer,
    face: ClockFace,
    scheduler: T,
    overlay: Option<Overlay>,
    needs_redraw: bool,
}

impl<D, T> FaceManager<D, T>
where
    D: DrawTarget<Color = Rgb565>,
    T: TimerScheduler,
{
    /// Create a manager and load the face
    pub fn new(display: D, config: FaceConfig, now: ClockTime, mut scheduler: T) -> Self {
        let face = ClockFace::load(config, now, &mut scheduler);
        Self {
            display,
            framebuffer: FrameBuffer::new(),
            face,
            scheduler,
            overlay: None,
            needs_redraw: true,
        }
    }

    /// Draw `overlay` on top of the face every frame.
    pub fn with_overlay(mut self, overlay: Overlay) -> Self {
        self.overlay = Some(overlay);
        self
    }

    /// Unload the face and hand the display back.
    pub fn unload(self) -> D {
        let Self {
            display,
            face,
            mut scheduler,
            ..
        } = self;
        face.unload(&mut scheduler);
        display
    }

    pub fn face(&self) -> &ClockFace {
        &self.face
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    pub fn scheduler_mut(&mut self) -> &mut T {
        &mut self.scheduler
    }

    /// Render the face if needed
    pub fn render(&mut self) -> Result<(), D::Error> {
        if !self.needs_redraw {
            return Ok(());
        }
        debug!(" Rendering face");

        let background = if self.face.config().style.layered_background {
            Rgb565::BLACK
        } else {
            crate::colors::OXFORD_BLUE
        };
        let Ok(()) = self.framebuffer.clear(background);
        let Ok(()) = self.face.render(&mut PixelGrid::new(&mut self.framebuffer));
        if let Some(overlay) = self.overlay {
            let Ok(()) = overlay(&self.face, &mut self.framebuffer);
        }

        self.framebuffer.flush(&mut self.display)?;
        self.needs_redraw = false;
        Ok(())
    }

    /// Process a face request, returning the actions the host must run
    pub fn process_request(
        &mut self,
        request: FaceRequest,
        mut on_action: impl FnMut(FaceAction),
    ) -> Result<(), D::Error> {
        debug!(" Processing request: {:?}", request);
        match request {
            FaceRequest::Event(event) => {
                let response = self.face.on_event(&event, &mut self.scheduler);
                for action in response.actions {
                    debug!(" Face action: {:?}", action);
                    on_action(action);
                }
                self.needs_redraw |= response.redraw;
            }
            FaceRequest::Redraw => {
                self.needs_redraw = true;
            }
            FaceRequest::Reload { config, now } => {
                info!(" Reloading face");
                self.face.reload(config, now, &mut self.scheduler);
                self.needs_redraw = true;
            }
        }

        // Render if needed
        self.render()
    }

    /// Run the face manager task
    ///
    /// This async function processes face requests from the channel
    /// and updates the display accordingly.
    pub async fn run(
        &mut self,
        receiver: Receiver<'_, CriticalSectionRawMutex, FaceRequest, FACE_REQUEST_CAPACITY>,
        mut on_action: impl FnMut(FaceAction),
    ) where
        <D as DrawTarget>::Error: core::fmt::Debug,
    {
        info!(" Face manager task started");

        // Initial render
        if let Err(e) = self.render() {
            error!(" Display render error: {:?}", e);
        }

        loop {
            let request = receiver.receive().await;
            if let Err(e) = self.process_request(request, &mut on_action) {
                error!(" Error processing request: {:?}", e);
            }
        }
    }
}

/// Helper to get a face request sender
pub fn get_face_sender()
-> Sender<'static, CriticalSectionRawMutex, FaceRequest, FACE_REQUEST_CAPACITY> {
    FACE_CHANNEL.sender()
}

/// Helper to get a face request receiver
pub fn get_face_receiver()
-> Receiver<'static, CriticalSectionRawMutex, FaceRequest, FACE_REQUEST_CAPACITY> {
    FACE_CHANNEL.receiver()
}

#[cfg(test)]
mod tests {
    extern crate std;

    use core::cell::Cell;
    use std::rc::Rc;
    use std::vec::Vec;

    use embassy_futures::block_on;
    use embassy_futures::select::select;
    use embassy_time::Duration;
    use embedded_graphics::primitives::Rectangle;

    use super::*;
    use crate::colors::{GREEN, OXFORD_BLUE, WHITE};
    use crate::config::FaceStyle;

    struct NoTimer;

    impl TimerScheduler for NoTimer {
        fn schedule(&mut self, _delay: Duration) {}
    }

    fn still(style: FaceStyle) -> FaceConfig {
        FaceConfig {
            animate_on_load: false,
            ..FaceConfig::with_style(style)
        }
    }

    /// A second framebuffer stands in for the panel.
    fn manager(style: FaceStyle, now: ClockTime) -> FaceManager<FrameBuffer, NoTimer> {
        FaceManager::new(FrameBuffer::new(), still(style), now, NoTimer)
    }

    #[test]
    fn test_initial_render_reaches_display() {
        let mut manager = manager(FaceStyle::classic(), ClockTime::hms(0, 0, 0));
        manager.render().unwrap();
        // Second hand tip cell (18, 2) starts at pixel (72, 8).
        assert_eq!(manager.display().pixel(Point::new(72, 8)), Some(GREEN));
        // Grid line between cells stays background.
        assert_eq!(manager.display().pixel(Point::new(75, 8)), Some(Rgb565::BLACK));
    }

    #[test]
    fn test_tick_moves_second_hand() {
        let mut manager = manager(FaceStyle::classic(), ClockTime::hms(0, 0, 0));
        manager.render().unwrap();
        manager
            .process_request(
                FaceRequest::Event(FaceEvent::Tick(ClockTime::hms(0, 0, 30))),
                |_| {},
            )
            .unwrap();
        // The tip went from straight up to straight down.
        assert_eq!(manager.display().pixel(Point::new(72, 8)), Some(Rgb565::BLACK));
        assert_eq!(manager.display().pixel(Point::new(72, 128)), Some(GREEN));
        // Hour and minute hands still point up.
        assert_eq!(manager.display().pixel(Point::new(72, 20)), Some(WHITE));
    }

    #[test]
    fn test_events_forward_actions() {
        let mut manager = manager(FaceStyle::classic(), ClockTime::hms(8, 0, 0));
        let mut actions = Vec::new();
        manager
            .process_request(FaceRequest::Event(FaceEvent::Bluetooth(false)), |a| {
                actions.push(a)
            })
            .unwrap();
        assert_eq!(actions, [FaceAction::Vibrate]);
        assert!(!manager.face().bluetooth_connected());
    }

    #[test]
    fn test_run_drains_channel() {
        let mut manager = manager(FaceStyle::classic(), ClockTime::hms(0, 0, 0));
        let sender = get_face_sender();
        sender
            .try_send(FaceRequest::Event(FaceEvent::Bluetooth(false)))
            .unwrap();
        sender
            .try_send(FaceRequest::Event(FaceEvent::Tick(ClockTime::hms(0, 0, 30))))
            .unwrap();

        let mut actions = Vec::new();
        // `run` never returns; stop once it has gone idle on an empty channel.
        block_on(select(
            manager.run(get_face_receiver(), |a| actions.push(a)),
            embassy_futures::yield_now(),
        ));

        assert_eq!(actions, [FaceAction::Vibrate]);
        assert!(FACE_CHANNEL.is_empty());
        assert!(!manager.face().bluetooth_connected());
        assert_eq!(manager.display().pixel(Point::new(72, 128)), Some(GREEN));
    }

    fn mark_corner(_face: &ClockFace, fb: &mut FrameBuffer) -> Result<(), Infallible> {
        fb.fill_solid(&Rectangle::new(Point::zero(), Size::new(2, 2)), WHITE)
    }

    #[test]
    fn test_overlay_drawn_over_face() {
        let mut manager =
            manager(FaceStyle::classic(), ClockTime::hms(0, 0, 0)).with_overlay(mark_corner);
        manager.render().unwrap();
        assert_eq!(manager.display().pixel(Point::new(1, 1)), Some(WHITE));
        assert_eq!(manager.display().pixel(Point::new(2, 2)), Some(Rgb565::BLACK));
    }

    /// Counts cancellations in a cell the test keeps a handle to.
    struct CancelCount(Rc<Cell<usize>>);

    impl TimerScheduler for CancelCount {
        fn schedule(&mut self, _delay: Duration) {}

        fn cancel(&mut self) {
            self.0.set(self.0.get() + 1);
        }
    }

    #[test]
    fn test_unload_cancels_sweep() {
        let cancelled = Rc::new(Cell::new(0));
        let manager = FaceManager::new(
            FrameBuffer::new(),
            FaceConfig::default(),
            ClockTime::hms(8, 0, 0),
            CancelCount(cancelled.clone()),
        );
        assert!(!manager.face().animation().is_complete());
        manager.unload();
        assert_eq!(cancelled.get(), 1);
    }

    #[test]
    fn test_reload_switches_style() {
        let mut manager = manager(FaceStyle::classic(), ClockTime::hms(8, 0, 0));
        manager.render().unwrap();
        manager
            .process_request(
                FaceRequest::Reload {
                    config: still(FaceStyle::square()),
                    now: ClockTime::hms(8, 0, 0),
                },
                |_| {},
            )
            .unwrap();
        assert!(!manager.face().config().style.layered_background);
        assert_eq!(manager.display().pixel(Point::new(0, 0)), Some(OXFORD_BLUE));
        assert_eq!(manager.display().pixel(Point::new(3, 3)), Some(OXFORD_BLUE));
    }
}
