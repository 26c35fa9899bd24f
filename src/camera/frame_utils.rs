//! Frame conversion and resampling utilities.

use nokhwa::pixel_format::RgbFormat;

use super::types::Frame;

/// Convert a nokhwa buffer to our RGB Frame format.
///
/// Handles various camera formats (MJPEG, YUYV, NV12, etc.) by using
/// nokhwa's built-in decode_image which automatically converts from
/// the camera's native format to RGB.
///
/// Returns `None` if the conversion fails (unsupported format or corrupt data).
pub fn convert_to_rgb(buffer: &nokhwa::Buffer) -> Option<Frame> {
    let decoded = buffer.decode_image::<RgbFormat>().ok()?;
    let resolution = buffer.resolution();

    Some(Frame {
        data: decoded.into_raw(),
        width: resolution.width(),
        height: resolution.height(),
    })
}

/// Resize a frame to the given dimensions using nearest-neighbor sampling.
///
/// Nearest-neighbor is deliberate: the result feeds either the motion
/// differencer (which only needs coarse per-pixel change) or the mosaic grid
/// (one pixel per glyph cell), so interpolation buys nothing.
///
/// Returns `None` if the source frame is malformed or a target dimension
/// is zero.
pub fn resize_nearest(frame: &Frame, width: u32, height: u32) -> Option<Frame> {
    if !frame.is_well_formed() || width == 0 || height == 0 {
        return None;
    }

    let mut data = Vec::with_capacity((width as usize) * (height as usize) * 3);

    for y in 0..height {
        // Map the target pixel to the center of the corresponding source region
        let src_y = ((y as u64 * frame.height as u64) / height as u64) as u32;
        for x in 0..width {
            let src_x = ((x as u64 * frame.width as u64) / width as u64) as u32;
            let idx = ((src_y * frame.width + src_x) * 3) as usize;
            data.extend_from_slice(&frame.data[idx..idx + 3]);
        }
    }

    Some(Frame {
        data,
        width,
        height,
    })
}
