//! glyph-mirror library crate.
//!
//! An interactive installation: a live camera feed is rendered as a mosaic
//! of glyphs, grayscale at first and in color once enough continuous
//! presence has been accumulated. Presence is inferred from frame-to-frame
//! motion; losing it forfeits the accumulated time and triggers a blackout
//! cooldown.
//!
//! This module exposes the internal components for integration testing.

pub mod camera;
pub mod cli;
pub mod config;
pub mod display;
pub mod glyph;
pub mod hud;
pub mod input;
pub mod mosaic;
pub mod motion;
pub mod presence;
pub mod session;
