//! HUD boundary
//!
//! The simulation hands the HUD a validated `HudFrame` (score, lives shown,
//! status text). Drawing is up to the implementor.

use thiserror::Error;

use crate::consts::MAX_LIVES;
use crate::sim::GameState;

/// Largest score the 7-digit display can show
pub const MAX_DISPLAY_SCORE: u64 = 9_999_999;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum HudError {
    #[error("score {0} does not fit the 7-digit display")]
    ScoreOutOfRange(u64),
    #[error("{0} lives exceeds the indicator capacity of {max}", max = MAX_LIVES)]
    LivesOutOfRange(u8),
}

/// One validated HUD update
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HudFrame {
    score: u64,
    lives: u8,
    status: String,
}

impl HudFrame {
    pub fn new(score: u64, lives: u8, status: impl Into<String>) -> Result<Self, HudError> {
        if score > MAX_DISPLAY_SCORE {
            return Err(HudError::ScoreOutOfRange(score));
        }
        if lives > MAX_LIVES {
            return Err(HudError::LivesOutOfRange(lives));
        }
        Ok(Self {
            score,
            lives,
            status: status.into(),
        })
    }

    /// Frame for the current round: lives as shown by the blinking indicator,
    /// score held at the largest value the display can show
    pub fn from_state(state: &GameState) -> Result<Self, HudError> {
        Self::new(
            state.score.min(MAX_DISPLAY_SCORE),
            state.lives_shown,
            state.status.as_str(),
        )
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn lives(&self) -> u8 {
        self.lives
    }

    /// Prompt text, possibly multi-line; empty while playing
    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn score_text(&self) -> String {
        format_score(self.score)
    }
}

/// Score as 7 zero-padded digits
pub fn format_score(score: u64) -> String {
    format!("{:07}", score)
}

/// Receives a frame once per tick
pub trait Hud {
    fn render(&mut self, frame: &HudFrame);
}

/// HUD that logs whenever the displayed values change
#[derive(Debug, Default)]
pub struct LogHud {
    last: Option<HudFrame>,
}

impl LogHud {
    pub fn new() -> Self {
        Self::default()
    }

    /// Most recent frame
    pub fn last_frame(&self) -> Option<&HudFrame> {
        self.last.as_ref()
    }
}

impl Hud for LogHud {
    fn render(&mut self, frame: &HudFrame) {
        let previous = self.last.as_ref();
        if previous.map(|f| f.score) != Some(frame.score) {
            log::info!("Score {}", frame.score_text());
        }
        if previous.map(|f| f.lives) != Some(frame.lives) {
            log::debug!("Lives {}", frame.lives);
        }
        if previous.map(|f| f.status.as_str()) != Some(frame.status.as_str())
            && !frame.status.is_empty()
        {
            log::info!("{}", frame.status.replace('\n', " "));
        }
        self.last = Some(frame.clone());
    }
}
