//! Presence state machine.
//!
//! Consumes motion scores over time and decides, each tick, whether the
//! mosaic should render and whether color is unlocked. Presence is kept
//! alive by a hysteresis window (motion must recur within
//! `presence_hold_ms`, not every tick); losing presence triggers a
//! blackout cooldown during which rendering is suppressed and the
//! accumulated presence time has already been forfeited.

/// Presence phase. One enum instead of scattered flags, so invalid
/// combinations like "blackout while present" are unrepresentable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PresenceState {
    /// Camera running but presence not (yet) established.
    Idle,
    /// Motion seen within the hold window; presence time accumulates.
    Present,
    /// Cooldown after losing presence; rendering suppressed.
    Blackout,
}

/// What the current tick should put on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gate {
    /// Blank the surface and show the reset HUD string.
    Blank,
    /// Render the mosaic.
    Render { color_unlocked: bool },
}

/// Outcome of a single tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tick {
    pub gate: Gate,
    /// True exactly on the blackout-exit tick: the caller must drop the
    /// motion baseline so the next comparison is not against a stale frame.
    pub invalidate_baseline: bool,
}

/// Timing thresholds for the state machine. Immutable after startup.
#[derive(Debug, Clone, Copy)]
pub struct PresenceConfig {
    /// Accumulated presence needed to unlock color rendering.
    pub goal_ms: u64,
    /// Minimum motion score that counts as "motion seen".
    pub motion_threshold: f64,
    /// How long presence survives without motion.
    pub presence_hold_ms: u64,
    /// Blackout cooldown duration after losing presence.
    pub blackout_ms: u64,
}

impl Default for PresenceConfig {
    fn default() -> Self {
        Self {
            goal_ms: 60_000,
            motion_threshold: 1.0,
            presence_hold_ms: 1_500,
            blackout_ms: 2_000,
        }
    }
}

/// Fallback tick delta for the first tick or a non-monotonic clock sample.
const NOMINAL_TICK_MS: u64 = 16;

/// Presence/absence/blackout state machine with an accumulated presence
/// timer. Driven once per tick with the wall-clock timestamp and the
/// motion score (`None` = no signal from the camera).
#[derive(Debug)]
pub struct PresenceStateMachine {
    config: PresenceConfig,
    state: PresenceState,
    /// Presence time accumulated this session, in ms. Reset to 0 on every
    /// transition into blackout and on manual reset.
    accumulated_ms: u64,
    /// Timestamp of the last motion at or above the threshold.
    last_motion_ms: Option<u64>,
    /// Timestamp at which the current blackout started.
    blackout_started_ms: u64,
    /// Timestamp of the previous tick, for delta accumulation.
    last_tick_ms: Option<u64>,
}

impl PresenceStateMachine {
    pub fn new(config: PresenceConfig) -> Self {
        Self {
            config,
            state: PresenceState::Idle,
            accumulated_ms: 0,
            last_motion_ms: None,
            blackout_started_ms: 0,
            last_tick_ms: None,
        }
    }

    pub fn state(&self) -> PresenceState {
        self.state
    }

    /// Presence time accumulated this session, in ms.
    pub fn accumulated_ms(&self) -> u64 {
        self.accumulated_ms
    }

    /// Whether color rendering is unlocked for the current session.
    pub fn color_unlocked(&self) -> bool {
        self.accumulated_ms >= self.config.goal_ms
    }

    /// Manual reset: back to idle with no accumulated time, no remembered
    /// motion and no active blackout.
    pub fn reset(&mut self) {
        self.state = PresenceState::Idle;
        self.accumulated_ms = 0;
        self.last_motion_ms = None;
        self.blackout_started_ms = 0;
    }

    /// Advance the machine by one tick.
    ///
    /// `score` is the motion score for this tick, or `None` when the frame
    /// source had nothing to offer. The blackout countdown is evaluated
    /// before the no-signal check so the cooldown always makes progress.
    pub fn tick(&mut self, now_ms: u64, score: Option<f64>) -> Tick {
        let dt = self.delta_ms(now_ms);
        self.last_tick_ms = Some(now_ms);

        if self.state == PresenceState::Blackout {
            if now_ms.saturating_sub(self.blackout_started_ms) >= self.config.blackout_ms {
                log::debug!("blackout over, back to idle");
                self.state = PresenceState::Idle;
                self.last_motion_ms = None;
                return Tick {
                    gate: Gate::Blank,
                    invalidate_baseline: true,
                };
            }
            return Tick {
                gate: Gate::Blank,
                invalidate_baseline: false,
            };
        }

        let score = match score {
            Some(s) => s,
            None => {
                // Camera produced nothing this tick: render nothing, change
                // nothing. The next tick retries naturally.
                return Tick {
                    gate: Gate::Blank,
                    invalidate_baseline: false,
                };
            }
        };

        if score >= self.config.motion_threshold {
            self.last_motion_ms = Some(now_ms);
        }

        if !self.presence_valid(now_ms) {
            log::debug!(
                "presence lost after {} ms accumulated, entering blackout",
                self.accumulated_ms
            );
            self.accumulated_ms = 0;
            self.state = PresenceState::Blackout;
            self.blackout_started_ms = now_ms;
            return Tick {
                gate: Gate::Blank,
                invalidate_baseline: false,
            };
        }

        self.state = PresenceState::Present;
        self.accumulated_ms += dt;

        Tick {
            gate: Gate::Render {
                color_unlocked: self.color_unlocked(),
            },
            invalidate_baseline: false,
        }
    }

    /// Presence survives as long as motion was seen within the hold window.
    fn presence_valid(&self, now_ms: u64) -> bool {
        match self.last_motion_ms {
            Some(t) => now_ms.saturating_sub(t) <= self.config.presence_hold_ms,
            None => false,
        }
    }

    /// Elapsed time since the previous tick, clamped to a nominal frame
    /// duration on the first tick or a backwards clock sample.
    fn delta_ms(&self, now_ms: u64) -> u64 {
        match self.last_tick_ms {
            Some(last) if now_ms > last => now_ms - last,
            _ => NOMINAL_TICK_MS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn machine() -> PresenceStateMachine {
        PresenceStateMachine::new(PresenceConfig::default())
    }

    const MOTION: Option<f64> = Some(999.0);
    const STILL: Option<f64> = Some(0.0);

    #[test]
    fn test_starts_idle_with_nothing_accumulated() {
        let m = machine();
        assert_eq!(m.state(), PresenceState::Idle);
        assert_eq!(m.accumulated_ms(), 0);
        assert!(!m.color_unlocked());
    }

    #[test]
    fn test_first_motion_tick_renders() {
        let mut m = machine();
        let tick = m.tick(0, MOTION);
        assert_eq!(
            tick.gate,
            Gate::Render {
                color_unlocked: false
            }
        );
        assert_eq!(m.state(), PresenceState::Present);
        // First tick uses the nominal 16ms delta
        assert_eq!(m.accumulated_ms(), 16);
    }

    #[test]
    fn test_no_signal_changes_nothing() {
        let mut m = machine();
        m.tick(0, MOTION);
        let accumulated = m.accumulated_ms();

        let tick = m.tick(100, None);
        assert_eq!(tick.gate, Gate::Blank);
        assert!(!tick.invalidate_baseline);
        assert_eq!(m.state(), PresenceState::Present);
        assert_eq!(m.accumulated_ms(), accumulated);
    }

    #[test]
    fn test_hysteresis_keeps_presence_within_hold_window() {
        let mut m = machine();
        m.tick(0, MOTION);

        // Still frames inside the hold window keep presence alive
        let tick = m.tick(1_500, STILL);
        assert!(matches!(tick.gate, Gate::Render { .. }));
        assert_eq!(m.state(), PresenceState::Present);
    }

    #[test]
    fn test_presence_lost_just_past_hold_window() {
        let mut m = machine();
        m.tick(0, MOTION);

        let tick = m.tick(1_501, STILL);
        assert_eq!(tick.gate, Gate::Blank);
        assert_eq!(m.state(), PresenceState::Blackout);
        assert_eq!(m.accumulated_ms(), 0);
    }

    #[test]
    fn test_never_seen_motion_enters_blackout() {
        let mut m = machine();
        let tick = m.tick(0, STILL);
        assert_eq!(tick.gate, Gate::Blank);
        assert_eq!(m.state(), PresenceState::Blackout);
    }

    #[test]
    fn test_blackout_persists_for_full_cooldown() {
        let mut m = machine();
        m.tick(0, STILL); // enters blackout at t=0

        let tick = m.tick(1_999, MOTION);
        assert_eq!(tick.gate, Gate::Blank);
        assert!(!tick.invalidate_baseline);
        assert_eq!(m.state(), PresenceState::Blackout);
    }

    #[test]
    fn test_blackout_exit_invalidates_baseline() {
        let mut m = machine();
        m.tick(0, STILL); // enters blackout at t=0

        let tick = m.tick(2_000, MOTION);
        assert_eq!(tick.gate, Gate::Blank);
        assert!(tick.invalidate_baseline);
        assert_eq!(m.state(), PresenceState::Idle);

        // Motion after the cooldown re-establishes presence
        let tick = m.tick(2_033, MOTION);
        assert!(matches!(tick.gate, Gate::Render { .. }));
        assert_eq!(m.state(), PresenceState::Present);
    }

    #[test]
    fn test_motion_during_blackout_is_ignored() {
        let mut m = machine();
        m.tick(0, STILL);
        m.tick(500, MOTION);
        m.tick(1_000, MOTION);
        assert_eq!(m.state(), PresenceState::Blackout);
        assert_eq!(m.accumulated_ms(), 0);
    }

    #[test]
    fn test_accumulation_uses_real_deltas() {
        let mut m = machine();
        m.tick(0, MOTION); // +16 (nominal)
        m.tick(33, MOTION); // +33
        m.tick(66, MOTION); // +33
        assert_eq!(m.accumulated_ms(), 16 + 33 + 33);
    }

    #[test]
    fn test_non_positive_delta_clamped_to_nominal() {
        let mut m = machine();
        m.tick(100, MOTION);
        m.tick(100, MOTION); // same timestamp
        m.tick(50, MOTION); // clock went backwards
        assert_eq!(m.accumulated_ms(), 16 * 3);
    }

    #[test]
    fn test_color_unlock_boundary() {
        let config = PresenceConfig {
            goal_ms: 1_000,
            ..PresenceConfig::default()
        };
        let mut m = PresenceStateMachine::new(config);

        m.tick(0, MOTION); // +16
        let tick = m.tick(983, MOTION); // accumulated = 999
        assert_eq!(m.accumulated_ms(), 999);
        assert_eq!(
            tick.gate,
            Gate::Render {
                color_unlocked: false
            }
        );

        let tick = m.tick(984, MOTION); // accumulated = 1000
        assert_eq!(m.accumulated_ms(), 1_000);
        assert_eq!(
            tick.gate,
            Gate::Render {
                color_unlocked: true
            }
        );
    }

    #[test]
    fn test_unlock_relocks_on_blackout() {
        let config = PresenceConfig {
            goal_ms: 100,
            ..PresenceConfig::default()
        };
        let mut m = PresenceStateMachine::new(config);

        m.tick(0, MOTION);
        m.tick(200, MOTION);
        assert!(m.color_unlocked());

        m.tick(2_000, STILL); // hold window blown, blackout
        assert!(!m.color_unlocked());
        assert_eq!(m.accumulated_ms(), 0);
    }

    #[test]
    fn test_score_below_threshold_does_not_refresh_hold() {
        let config = PresenceConfig {
            motion_threshold: 1.0,
            ..PresenceConfig::default()
        };
        let mut m = PresenceStateMachine::new(config);

        m.tick(0, MOTION);
        m.tick(1_000, Some(0.99)); // below threshold, hold not refreshed
        let tick = m.tick(1_600, Some(0.99));
        assert_eq!(tick.gate, Gate::Blank);
        assert_eq!(m.state(), PresenceState::Blackout);
    }

    #[test]
    fn test_manual_reset_clears_everything() {
        let mut m = machine();
        m.tick(0, MOTION);
        m.tick(2_000, STILL); // blackout
        m.reset();

        assert_eq!(m.state(), PresenceState::Idle);
        assert_eq!(m.accumulated_ms(), 0);
        assert!(!m.color_unlocked());

        // No lingering blackout: motion renders immediately
        let tick = m.tick(2_100, MOTION);
        assert!(matches!(tick.gate, Gate::Render { .. }));
    }
}
