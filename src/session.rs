//! Session glue
//!
//! Drives the round one tick at a time: samples input (or the autopilot),
//! runs `tick`, pushes a HUD frame and routes the final score to the
//! session-end collaborator once the player exits.

use crate::consts::{MAX_SUBSTEPS, SIM_DT};
use crate::hud::{Hud, HudError, HudFrame};
use crate::input::InputState;
use crate::sim::{GameEvent, GamePhase, GameState, TickInput, autopilot_input, tick};

/// Longest frame time fed to the accumulator (seconds)
const MAX_FRAME_TIME: f32 = 0.1;

/// Receives the final score when the player leaves after game over
pub trait SessionEnd {
    fn game_finished(&mut self, final_score: u64);
}

pub struct Session<H: Hud, E: SessionEnd> {
    state: GameState,
    input: InputState,
    autopilot: bool,
    hud: H,
    session_end: E,
}

impl<H: Hud, E: SessionEnd> Session<H, E> {
    pub fn new(state: GameState, hud: H, session_end: E) -> Self {
        Self {
            state,
            input: InputState::new(),
            autopilot: false,
            hud,
            session_end,
        }
    }

    /// Let the autopilot play instead of the tracked input
    pub fn with_autopilot(mut self, autopilot: bool) -> Self {
        self.autopilot = autopilot;
        self
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Input tracker for platform event handlers
    pub fn input_mut(&mut self) -> &mut InputState {
        &mut self.input
    }

    pub fn hud(&self) -> &H {
        &self.hud
    }

    pub fn session_end(&self) -> &E {
        &self.session_end
    }

    /// Player exited after game over
    pub fn is_finished(&self) -> bool {
        self.state.phase == GamePhase::Ended
    }

    /// Run one tick and return its events
    pub fn step(&mut self) -> Result<Vec<GameEvent>, HudError> {
        let input: TickInput = if self.autopilot {
            autopilot_input(&self.state)
        } else {
            self.input.snapshot()
        };
        self.input.end_tick();

        tick(&mut self.state, &input);

        // Events stay queued on the state if the frame is rejected
        let frame = HudFrame::from_state(&self.state)?;

        let events = self.state.drain_events();
        for event in &events {
            if let GameEvent::GameEnded { final_score } = event {
                self.session_end.game_finished(*final_score);
            }
        }

        self.hud.render(&frame);
        Ok(events)
    }

    /// Run as many ticks as `elapsed` seconds of wall time call for
    pub fn run_frame(
        &mut self,
        clock: &mut FixedStep,
        elapsed: f32,
    ) -> Result<Vec<GameEvent>, HudError> {
        let mut events = Vec::new();
        for _ in 0..clock.advance(elapsed) {
            events.extend(self.step()?);
        }
        Ok(events)
    }
}

/// Fixed timestep accumulator
#[derive(Debug, Clone)]
pub struct FixedStep {
    dt: f32,
    accumulator: f32,
}

impl Default for FixedStep {
    fn default() -> Self {
        Self::new(SIM_DT)
    }
}

impl FixedStep {
    pub fn new(dt: f32) -> Self {
        Self {
            dt,
            accumulator: 0.0,
        }
    }

    /// Add wall time; returns the number of ticks to run now (at most
    /// `MAX_SUBSTEPS` to prevent spiral of death)
    pub fn advance(&mut self, elapsed: f32) -> u32 {
        self.accumulator += elapsed.clamp(0.0, MAX_FRAME_TIME);

        let mut substeps = 0;
        while self.accumulator >= self.dt && substeps < MAX_SUBSTEPS {
            self.accumulator -= self.dt;
            substeps += 1;
        }
        substeps
    }
}
