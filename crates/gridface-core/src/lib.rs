//! Hardware-independent core library for gridface
//!
//! This crate contains the whole watch face: the coarse cell grid, the
//! discrete-shade anti-aliased line rasterizer, table-based hand geometry,
//! the start-up sweep animation, the face layers and their event handling,
//! and a framebuffer-backed display manager.
//!
//! It is `#![no_std]` with `extern crate alloc` so it compiles on both
//! embedded targets and desktop hosts (for the simulator and tests).

#![no_std]

extern crate alloc;

pub mod animation;
pub mod colors;
pub mod config;
pub mod face;
pub mod face_manager;
pub mod framebuffer;
pub mod glyphs;
pub mod grid;
pub mod hands;
pub mod layers;
pub mod raster;
pub mod readouts;
pub mod recording;
pub mod shade;
pub mod time;
pub mod trig;
