//! HUD string formatting.

/// HUD contents for blank, blackout, no-signal and reset ticks.
pub const HUD_RESET: &str = "00:00 · motion 0.00";

/// Format accumulated presence time and the last motion score as
/// `MM:SS · motion X.XX`.
pub fn format_hud(accumulated_ms: u64, motion_score: f64) -> String {
    let total_seconds = accumulated_ms / 1000;
    let minutes = total_seconds / 60;
    let seconds = total_seconds % 60;
    format!("{:02}:{:02} · motion {:.2}", minutes, seconds, motion_score)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_zero() {
        assert_eq!(format_hud(0, 0.0), "00:00 · motion 0.00");
        assert_eq!(format_hud(0, 0.0), HUD_RESET);
    }

    #[test]
    fn test_format_pads_minutes_and_seconds() {
        assert_eq!(format_hud(5_000, 1.5), "00:05 · motion 1.50");
        assert_eq!(format_hud(65_000, 0.25), "01:05 · motion 0.25");
        assert_eq!(format_hud(600_000, 12.0), "10:00 · motion 12.00");
    }

    #[test]
    fn test_format_floors_partial_seconds() {
        assert_eq!(format_hud(999, 0.0), "00:00 · motion 0.00");
        assert_eq!(format_hud(1_000, 0.0), "00:01 · motion 0.00");
    }

    #[test]
    fn test_format_rounds_score_to_two_decimals() {
        assert_eq!(format_hud(0, 0.456), "00:00 · motion 0.46");
        assert_eq!(format_hud(0, 999.0), "00:00 · motion 999.00");
    }
}
