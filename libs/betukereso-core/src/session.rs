//! Round value objects for the four mini-games.
//!
//! A round is created, answered and then dropped. The target's display text is
//! pinned at creation so prompt and evaluation always agree.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;

use crate::case::DisplayLetter;
use crate::catalog::Catalog;
use crate::error::{EngineError, Result};
use crate::evaluate::exact;
use crate::evaluate::trace::{GlyphSurface, TraceScore, TraceSession};
use crate::round::{select_round, PoolConfig};
use crate::types::{ChildSettings, GameMode, Grapheme};

/// Find-letter grid: one pinned target among rolled decoys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FindLetterRound {
    pub target: DisplayLetter,
    pub cells: Vec<DisplayLetter>,
    pub target_index: usize,
}

impl FindLetterRound {
    pub fn generate<R: Rng + ?Sized>(
        catalog: &Catalog,
        settings: &ChildSettings,
        rng: &mut R,
    ) -> Result<Self> {
        let graphemes = select_round(
            catalog,
            PoolConfig::from_settings(settings),
            settings.difficulty.grid_size(),
            rng,
        )?;
        Self::from_graphemes(graphemes, settings, rng)
    }

    /// Build a grid whose first grapheme is the target.
    pub fn from_graphemes<R: Rng + ?Sized>(
        graphemes: Vec<Grapheme>,
        settings: &ChildSettings,
        rng: &mut R,
    ) -> Result<Self> {
        let mut graphemes = graphemes.into_iter();
        let Some(first) = graphemes.next() else {
            return Err(EngineError::InsufficientPoolSize {
                requested: 1,
                available: 0,
            });
        };

        let target = DisplayLetter::roll(first, settings.letter_case, rng);
        let mut cells = vec![target.clone()];
        cells.extend(graphemes.map(|g| DisplayLetter::roll(g, settings.letter_case, rng)));

        let mut order: Vec<usize> = (0..cells.len()).collect();
        order.shuffle(rng);
        let target_index = order.iter().position(|&i| i == 0).unwrap_or(0);
        let cells = order.into_iter().map(|i| cells[i].clone()).collect();

        Ok(Self {
            target,
            cells,
            target_index,
        })
    }

    /// Text shown as the prompt.
    pub fn prompt(&self) -> &str {
        &self.target.text
    }

    /// Judge a click on the cell at `index`.
    pub fn check(&self, index: usize) -> Result<bool> {
        let cell = self.cells.get(index).ok_or_else(|| {
            EngineError::InvalidEvaluatorInput(format!("no cell at index {index}"))
        })?;
        Ok(exact::is_match(&cell.text, &self.target))
    }

    pub fn check_text(&self, clicked: &str) -> bool {
        exact::is_match(clicked, &self.target)
    }
}

/// Single pinned grapheme, used by show-mark and trace-letter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LetterPrompt {
    pub target: DisplayLetter,
}

impl LetterPrompt {
    pub fn generate<R: Rng + ?Sized>(
        catalog: &Catalog,
        settings: &ChildSettings,
        rng: &mut R,
    ) -> Result<Self> {
        let mut drawn = select_round(catalog, PoolConfig::from_settings(settings), 1, rng)?;
        let grapheme = drawn.pop().ok_or(EngineError::InsufficientPoolSize {
            requested: 1,
            available: 0,
        })?;
        Ok(Self {
            target: DisplayLetter::roll(grapheme, settings.letter_case, rng),
        })
    }

    /// Show-mark: the supervising adult's verdict is the answer.
    pub fn judge(&self, verdict: bool) -> bool {
        verdict
    }
}

/// Trace-letter round: prompt plus the drawing being scored against it.
#[derive(Debug, Clone)]
pub struct TraceRound {
    pub prompt: LetterPrompt,
    trace: TraceSession,
}

impl TraceRound {
    /// `surface` holds the prompt's glyph as rendered by the front end.
    pub fn new<S: GlyphSurface + ?Sized>(prompt: LetterPrompt, surface: &S) -> Self {
        Self {
            prompt,
            trace: TraceSession::from_surface(surface),
        }
    }

    pub fn trace(&self) -> &TraceSession {
        &self.trace
    }

    pub fn trace_mut(&mut self) -> &mut TraceSession {
        &mut self.trace
    }

    pub fn finish(&self) -> TraceScore {
        self.trace.score()
    }
}

/// Per-session round counter and score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SessionProgress {
    pub mode: GameMode,
    pub rounds_total: u32,
    pub rounds_played: u32,
    pub score: u32,
}

impl SessionProgress {
    pub fn new(mode: GameMode, rounds_total: u32) -> Self {
        Self {
            mode,
            rounds_total,
            rounds_played: 0,
            score: 0,
        }
    }

    pub fn for_settings(mode: GameMode, settings: &ChildSettings) -> Self {
        Self::new(mode, settings.letters_per_session)
    }

    /// Count an answer. Returns whether the session moves to the next round;
    /// retry modes stay on the round until it is answered correctly.
    pub fn record(&mut self, is_correct: bool) -> bool {
        if self.is_over() {
            return false;
        }
        if is_correct {
            self.score += 1;
        }
        let advance = is_correct || !self.mode.retries_until_correct();
        if advance {
            self.rounds_played += 1;
        }
        advance
    }

    pub fn is_over(&self) -> bool {
        self.rounds_played >= self.rounds_total
    }
}
