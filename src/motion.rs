//! Frame-differencing motion estimation.
//!
//! Compares the current downscaled frame against the previous one and
//! produces a normalized scalar motion score. The estimator owns the
//! previous-frame buffer; nobody else touches it.

use crate::camera::Frame;

/// Width of the downscaled frame used for differencing.
pub const MOTION_WIDTH: u32 = 160;
/// Height of the downscaled frame used for differencing.
pub const MOTION_HEIGHT: u32 = 120;

/// Score returned when no baseline exists yet (first frame after start,
/// reset, or blackout exit). Deliberately larger than any sane motion
/// threshold so the first frame always counts as motion and seeds presence
/// immediately.
pub const BASELINE_SENTINEL_SCORE: f64 = 999.0;

/// Per-pixel sum-of-channel-diffs below or at this value is treated as
/// sensor noise and ignored.
const PIXEL_NOISE_FLOOR: u32 = 12;

/// Divisor applied after per-pixel normalization to land scores in a
/// human-readable 0-to-a-few range.
const SCORE_SCALE: f64 = 18.0;

/// Motion estimator over consecutive downscaled frames.
///
/// Holds the raw RGB bytes of the last scored frame as the baseline. The
/// baseline is replaced wholesale on every successful score and dropped on
/// [`reset`](MotionEstimator::reset).
#[derive(Debug, Default)]
pub struct MotionEstimator {
    baseline: Option<Vec<u8>>,
}

impl MotionEstimator {
    pub fn new() -> Self {
        Self { baseline: None }
    }

    /// Whether a baseline frame is currently stored.
    pub fn has_baseline(&self) -> bool {
        self.baseline.is_some()
    }

    /// Drop the stored baseline.
    ///
    /// Called on manual reset and on blackout exit so the next comparison
    /// is not made against a stale frame (which would read as a huge
    /// motion spike).
    pub fn reset(&mut self) {
        self.baseline = None;
    }

    /// Score motion between `frame` and the stored baseline.
    ///
    /// Returns `None` ("no signal") for malformed frames without touching
    /// the baseline. With no baseline stored, adopts `frame` as the new
    /// baseline and returns [`BASELINE_SENTINEL_SCORE`]. Otherwise sums the
    /// per-pixel absolute channel differences that exceed the noise floor,
    /// replaces the baseline with `frame`, and normalizes the sum by
    /// `width * height * 18`.
    pub fn score(&mut self, frame: &Frame) -> Option<f64> {
        if !frame.is_well_formed() {
            return None;
        }

        match &mut self.baseline {
            Some(previous) if previous.len() == frame.data.len() => {
                let mut sum: u64 = 0;
                for (cur, prev) in frame.data.chunks_exact(3).zip(previous.chunks_exact(3)) {
                    let dr = cur[0].abs_diff(prev[0]) as u32;
                    let dg = cur[1].abs_diff(prev[1]) as u32;
                    let db = cur[2].abs_diff(prev[2]) as u32;

                    let diff = dr + dg + db;
                    if diff > PIXEL_NOISE_FLOOR {
                        sum += diff as u64;
                    }
                }

                previous.copy_from_slice(&frame.data);

                Some(sum as f64 / frame.pixel_count() as f64 / SCORE_SCALE)
            }
            // No baseline yet, or dimensions changed under us: adopt the
            // frame instead of diffing mismatched buffers.
            baseline => {
                *baseline = Some(frame.data.clone());
                Some(BASELINE_SENTINEL_SCORE)
            }
        }
    }
}
