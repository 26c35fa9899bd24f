//! Session tick driver.
//!
//! Wires the collaborators together, once per tick: sample a downscaled
//! frame, score motion, advance the presence machine, then either render
//! the mosaic and HUD or blank. Single-threaded and cooperative; exactly
//! one tick is in flight at a time and nothing here blocks on the camera.

use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event};

use crate::camera::{CameraCapture, FrameSource};
use crate::display::{Display, TerminalDisplay};
use crate::hud::{format_hud, HUD_RESET};
use crate::input::{map_key, KeyAction};
use crate::mosaic::{render_mosaic, GridLayout};
use crate::motion::{MotionEstimator, MOTION_HEIGHT, MOTION_WIDTH};
use crate::presence::{Gate, PresenceState, PresenceStateMachine};

/// Fixed tick cadence (~30 Hz).
const TICK_INTERVAL: Duration = Duration::from_millis(33);

/// One running installation session.
///
/// Generic over the frame source and display so the full tick path runs
/// headless in tests.
pub struct Session<S: FrameSource, D: Display> {
    source: S,
    display: D,
    motion: MotionEstimator,
    presence: PresenceStateMachine,
    cell_size: u32,
    mirror: bool,
}

impl<S: FrameSource, D: Display> Session<S, D> {
    pub fn new(
        source: S,
        display: D,
        presence: PresenceStateMachine,
        cell_size: u32,
        mirror: bool,
    ) -> Self {
        Self {
            source,
            display,
            motion: MotionEstimator::new(),
            presence,
            cell_size,
            mirror,
        }
    }

    pub fn mirror(&self) -> bool {
        self.mirror
    }

    pub fn toggle_mirror(&mut self) {
        self.mirror = !self.mirror;
        log::info!("mirror {}", if self.mirror { "on" } else { "off" });
    }

    pub fn presence(&self) -> &PresenceStateMachine {
        &self.presence
    }

    pub fn display_mut(&mut self) -> &mut D {
        &mut self.display
    }

    /// Manual reset: accumulated time, motion baseline, blackout state and
    /// HUD all go back to their session-start values, synchronously,
    /// before the next tick.
    pub fn reset(&mut self) -> io::Result<()> {
        log::info!("manual reset");
        self.presence.reset();
        self.motion.reset();
        self.display.blank()?;
        self.display.set_hud_text(HUD_RESET)?;
        self.display.present()
    }

    /// Run one tick at the given session timestamp (ms since session start).
    pub fn tick(&mut self, now_ms: u64) -> io::Result<()> {
        // During blackout the camera is not even sampled; the cooldown
        // ticks down on timestamps alone.
        let (outcome, score) = if self.presence.state() == PresenceState::Blackout {
            (self.presence.tick(now_ms, None), 0.0)
        } else {
            let score = self
                .source
                .downscaled_frame(MOTION_WIDTH, MOTION_HEIGHT)
                .and_then(|frame| self.motion.score(&frame));
            (self.presence.tick(now_ms, score), score.unwrap_or(0.0))
        };

        if outcome.invalidate_baseline {
            self.motion.reset();
        }

        match outcome.gate {
            Gate::Blank => {
                self.display.blank()?;
                self.display.set_hud_text(HUD_RESET)?;
            }
            Gate::Render { color_unlocked } => {
                let (surface_w, surface_h) = self.display.surface_size();
                let layout = GridLayout::new(surface_w, surface_h, self.cell_size);

                match self.source.downscaled_frame(layout.cols, layout.rows) {
                    Some(frame) if frame.width == layout.cols && frame.height == layout.rows => {
                        render_mosaic(
                            &frame,
                            &layout,
                            self.mirror,
                            color_unlocked,
                            &mut self.display,
                        )?;
                        self.display
                            .set_hud_text(&format_hud(self.presence.accumulated_ms(), score))?;
                    }
                    _ => {
                        // The grid-resolution sample failed or came back at
                        // the wrong generation; blanking beats stale cells.
                        self.display.blank()?;
                        self.display.set_hud_text(HUD_RESET)?;
                    }
                }
            }
        }

        self.display.present()
    }
}

/// Run the interactive terminal session until quit.
///
/// Fixed-rate loop: drain pending key/resize events, tick once, sleep out
/// the remainder of the interval. `quit` is also raised by the Ctrl-C
/// handler installed in main.
pub fn run(
    session: &mut Session<CameraCapture, TerminalDisplay>,
    quit: &Arc<AtomicBool>,
) -> io::Result<()> {
    let epoch = Instant::now();

    // HUD starts out in its reset form before the first tick
    session.display_mut().set_hud_text(HUD_RESET)?;
    session.display_mut().present()?;

    while !quit.load(Ordering::Relaxed) {
        let tick_started = Instant::now();

        while event::poll(Duration::ZERO)? {
            match event::read()? {
                Event::Key(key_event) => match map_key(key_event) {
                    KeyAction::Quit => return Ok(()),
                    KeyAction::ToggleMirror => session.toggle_mirror(),
                    KeyAction::Reset => session.reset()?,
                    KeyAction::None => {}
                },
                Event::Resize(cols, rows) => {
                    session.display_mut().handle_resize(cols, rows);
                }
                _ => {}
            }
        }

        session.tick(epoch.elapsed().as_millis() as u64)?;

        let spent = tick_started.elapsed();
        if spent < TICK_INTERVAL {
            thread::sleep(TICK_INTERVAL - spent);
        }
    }

    Ok(())
}
