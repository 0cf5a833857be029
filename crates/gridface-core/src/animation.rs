//! Start-up sweep of the hands from 12 o'clock to the current time.
//!
//! The sweep is a small state machine stepped by a re-arming one-shot timer:
//! the hour hand travels first, then the minute hand, then the second hand.
//! Each timer firing advances the active hand by [`ANIMATION_STEP`] positions
//! toward its target. The target is re-read from the wall clock on every
//! step, so a minute or hour boundary crossed mid-sweep moves the goal.

use embassy_time::Duration;
use log::{debug, info};

use crate::time::{ClockTime, HandPositions};

/// Dial positions a hand advances per timer firing
pub const ANIMATION_STEP: i32 = 2;

/// Delay between timer firings
pub const ANIMATION_FRAME: Duration = Duration::from_millis(40);

/// One-shot timer facility provided by the host.
///
/// The sweep re-arms the timer after every step until it completes; there is
/// no periodic registration to tear down.
pub trait TimerScheduler {
    /// Fire the animation timer once after `delay`.
    fn schedule(&mut self, delay: Duration);

    /// Drop a pending firing, if any.
    fn cancel(&mut self) {}
}

/// Which hand is currently sweeping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationPhase {
    AnimatingHour,
    AnimatingMinute,
    AnimatingSecond,
    Complete,
}

/// Counters and flags of the sweep.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnimationProgress {
    positions: HandPositions,
    hour_reached: bool,
    minute_reached: bool,
    second_reached: bool,
    phase: AnimationPhase,
}

impl AnimationProgress {
    /// Begin a sweep from rest toward the time `now`.
    pub fn start(now: &ClockTime) -> Self {
        let mut progress = Self {
            positions: HandPositions::default(),
            hour_reached: false,
            minute_reached: false,
            second_reached: false,
            phase: AnimationPhase::AnimatingHour,
        };
        progress.settle(&HandPositions::from_time(now));
        progress
    }

    /// Skip the sweep: hands sit on the live time immediately.
    pub fn completed(now: &ClockTime) -> Self {
        Self {
            positions: HandPositions::from_time(now),
            hour_reached: true,
            minute_reached: true,
            second_reached: true,
            phase: AnimationPhase::Complete,
        }
    }

    /// Start or skip depending on the `animate` preference.
    pub fn begin(animate: bool, now: &ClockTime) -> Self {
        if animate {
            Self::start(now)
        } else {
            Self::completed(now)
        }
    }

    /// Advance the active hand one step toward the time `now`.
    pub fn step(&mut self, now: &ClockTime) -> AnimationPhase {
        self.step_toward(&HandPositions::from_time(now))
    }

    /// Advance the active hand one step toward explicit targets.
    pub fn step_toward(&mut self, target: &HandPositions) -> AnimationPhase {
        match self.phase {
            AnimationPhase::AnimatingHour => {
                self.positions.hour = advance(self.positions.hour, target.hour);
            }
            AnimationPhase::AnimatingMinute => {
                self.positions.minute = advance(self.positions.minute, target.minute);
            }
            AnimationPhase::AnimatingSecond => {
                self.positions.second = advance(self.positions.second, target.second);
            }
            AnimationPhase::Complete => return self.phase,
        }
        debug!(
            "Sweep step {:?}: h={} m={} s={}",
            self.phase, self.positions.hour, self.positions.minute, self.positions.second
        );
        self.settle(target);
        self.phase
    }

    /// Move past every phase whose hand already sits on its target.
    fn settle(&mut self, target: &HandPositions) {
        loop {
            match self.phase {
                AnimationPhase::AnimatingHour if self.positions.hour == target.hour => {
                    self.hour_reached = true;
                    self.phase = AnimationPhase::AnimatingMinute;
                }
                AnimationPhase::AnimatingMinute if self.positions.minute == target.minute => {
                    self.minute_reached = true;
                    self.phase = AnimationPhase::AnimatingSecond;
                }
                AnimationPhase::AnimatingSecond if self.positions.second == target.second => {
                    self.second_reached = true;
                    self.phase = AnimationPhase::Complete;
                    info!("Hand sweep complete");
                }
                _ => break,
            }
        }
    }

    pub fn phase(&self) -> AnimationPhase {
        self.phase
    }

    pub fn is_complete(&self) -> bool {
        self.phase == AnimationPhase::Complete
    }

    /// Animated counters. Only meaningful while the sweep is running.
    pub fn positions(&self) -> HandPositions {
        self.positions
    }

    /// (hour, minute, second) reached flags.
    pub fn reached(&self) -> (bool, bool, bool) {
        (self.hour_reached, self.minute_reached, self.second_reached)
    }

    /// Positions to draw for `now`: the counters mid-sweep, the live time after.
    pub fn display_positions(&self, now: &ClockTime) -> HandPositions {
        if self.is_complete() {
            HandPositions::from_time(now)
        } else {
            self.positions
        }
    }
}

/// One step toward `target`, never past it.
fn advance(position: i32, target: i32) -> i32 {
    (position + ANIMATION_STEP).min(target)
}
