//! Camera capture module for webcam access and frame sampling.
//!
//! This module provides the frame acquisition boundary of the installation:
//! - Device enumeration via [`list_devices`]
//! - Background capture via [`CameraCapture`]
//! - The [`FrameSource`] seam the session ticks against, which also makes
//!   the core logic testable without a physical camera

mod capture;
mod capture_loop;
mod device;
mod frame_utils;
mod types;

pub use capture::CameraCapture;
pub use device::list_devices;
pub use frame_utils::{convert_to_rgb, resize_nearest};
pub use types::{CameraError, CameraInfo, CameraSettings, Frame};

/// Source of downscaled camera frames, sampled once per tick.
///
/// Implementations must return a fresh copy of pixel data at exactly the
/// requested dimensions, or `None` when no frame is available (camera not
/// ready, zero-dimension target, read failure). The call never blocks the
/// tick: "not ready" is an answer, not a wait.
pub trait FrameSource {
    fn downscaled_frame(&self, width: u32, height: u32) -> Option<Frame>;
}
