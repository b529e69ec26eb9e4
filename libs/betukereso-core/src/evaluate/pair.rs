//! Upper/lowercase pair matching (match-case).

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::case::{apply_case, CaseStyle};
use crate::catalog::Catalog;
use crate::error::{EngineError, Result};
use crate::round::{select_round, PoolConfig};
use crate::types::{ChildSettings, Grapheme};

/// Consecutive mismatches before the unmatched cards are reshuffled.
pub const DEFAULT_RESHUFFLE_AFTER: u32 = 3;

/// Both picks name the same grapheme, whatever case they are shown in.
pub fn same_grapheme(upper: &str, lower: &str) -> bool {
    apply_case(upper, CaseStyle::Lower) == apply_case(lower, CaseStyle::Lower)
}

/// Board column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Column {
    Upper,
    Lower,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairCard {
    pub grapheme: Grapheme,
    pub display: String,
    pub matched: bool,
}

impl PairCard {
    fn new(grapheme: &Grapheme, style: CaseStyle) -> Self {
        Self {
            grapheme: grapheme.clone(),
            display: apply_case(grapheme.as_str(), style),
            matched: false,
        }
    }
}

/// What a pick did to the board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum PairOutcome {
    /// Only one slot is filled (or a pick was undone).
    Pending,
    Matched {
        grapheme: Grapheme,
    },
    Mismatched {
        upper: Grapheme,
        lower: Grapheme,
        reshuffled: bool,
    },
}

impl PairOutcome {
    /// Verdict of a completed check, `None` while waiting for the second pick.
    pub fn verdict(&self) -> Option<bool> {
        match self {
            Self::Pending => None,
            Self::Matched { .. } => Some(true),
            Self::Mismatched { .. } => Some(false),
        }
    }
}

/// Match-case board with its two selection slots.
#[derive(Debug, Clone, Serialize)]
pub struct PairBoard {
    upper: Vec<PairCard>,
    lower: Vec<PairCard>,
    selected_upper: Option<usize>,
    selected_lower: Option<usize>,
    mismatches: u32,
    reshuffle_after: u32,
}

impl PairBoard {
    /// One uppercase and one lowercase card per grapheme, columns shuffled independently.
    pub fn new<R: Rng + ?Sized>(graphemes: &[Grapheme], rng: &mut R) -> Self {
        let mut upper: Vec<PairCard> = graphemes
            .iter()
            .map(|g| PairCard::new(g, CaseStyle::Upper))
            .collect();
        let mut lower: Vec<PairCard> = graphemes
            .iter()
            .map(|g| PairCard::new(g, CaseStyle::Lower))
            .collect();
        upper.shuffle(rng);
        lower.shuffle(rng);

        Self {
            upper,
            lower,
            selected_upper: None,
            selected_lower: None,
            mismatches: 0,
            reshuffle_after: DEFAULT_RESHUFFLE_AFTER,
        }
    }

    /// Board with `letters_per_session` pairs drawn from the child's pool.
    pub fn generate<R: Rng + ?Sized>(
        catalog: &Catalog,
        settings: &ChildSettings,
        rng: &mut R,
    ) -> Result<Self> {
        let graphemes = select_round(
            catalog,
            PoolConfig::from_settings(settings),
            settings.letters_per_session as usize,
            rng,
        )?;
        Ok(Self::new(&graphemes, rng))
    }

    /// Reshuffle after `count` consecutive mismatches; 0 never reshuffles.
    pub fn with_reshuffle_after(mut self, count: u32) -> Self {
        self.reshuffle_after = count;
        self
    }

    pub fn upper(&self) -> &[PairCard] {
        &self.upper
    }

    pub fn lower(&self) -> &[PairCard] {
        &self.lower
    }

    pub fn selected_upper(&self) -> Option<usize> {
        self.selected_upper
    }

    pub fn selected_lower(&self) -> Option<usize> {
        self.selected_lower
    }

    /// Consecutive mismatches since the last match or reshuffle.
    pub fn mismatches(&self) -> u32 {
        self.mismatches
    }

    pub fn matched_count(&self) -> usize {
        self.upper.iter().filter(|c| c.matched).count()
    }

    pub fn is_complete(&self) -> bool {
        self.upper.iter().all(|c| c.matched)
    }

    /// Pick a card. Picking the selected card again clears that slot.
    ///
    /// The check fires once both slots are filled; either way both slots are
    /// empty afterwards.
    pub fn select<R: Rng + ?Sized>(
        &mut self,
        column: Column,
        index: usize,
        rng: &mut R,
    ) -> Result<PairOutcome> {
        let card = self.column(column).get(index).ok_or_else(|| {
            EngineError::InvalidEvaluatorInput(format!("no {:?} card at index {}", column, index))
        })?;
        if card.matched {
            return Err(EngineError::InvalidEvaluatorInput(format!(
                "card {} is already matched",
                card.display
            )));
        }

        let slot = match column {
            Column::Upper => &mut self.selected_upper,
            Column::Lower => &mut self.selected_lower,
        };
        *slot = if *slot == Some(index) { None } else { Some(index) };

        match (self.selected_upper, self.selected_lower) {
            (Some(u), Some(l)) => Ok(self.check(u, l, rng)),
            _ => Ok(PairOutcome::Pending),
        }
    }

    /// Shuffle the unmatched cards of both columns in place.
    pub fn shuffle_remaining<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.selected_upper = None;
        self.selected_lower = None;
        shuffle_unmatched(&mut self.upper, rng);
        shuffle_unmatched(&mut self.lower, rng);
    }

    fn column(&self, column: Column) -> &[PairCard] {
        match column {
            Column::Upper => &self.upper,
            Column::Lower => &self.lower,
        }
    }

    fn check<R: Rng + ?Sized>(&mut self, u: usize, l: usize, rng: &mut R) -> PairOutcome {
        self.selected_upper = None;
        self.selected_lower = None;

        let upper = self.upper[u].grapheme.clone();
        let lower = self.lower[l].grapheme.clone();
        if same_grapheme(upper.as_str(), lower.as_str()) {
            self.upper[u].matched = true;
            self.lower[l].matched = true;
            self.mismatches = 0;
            return PairOutcome::Matched { grapheme: upper };
        }

        self.mismatches += 1;
        let reshuffled = self.reshuffle_after > 0 && self.mismatches >= self.reshuffle_after;
        if reshuffled {
            self.shuffle_remaining(rng);
            self.mismatches = 0;
        }
        PairOutcome::Mismatched {
            upper,
            lower,
            reshuffled,
        }
    }
}

fn shuffle_unmatched<R: Rng + ?Sized>(cards: &mut [PairCard], rng: &mut R) {
    let open: Vec<usize> = (0..cards.len()).filter(|&i| !cards[i].matched).collect();
    let mut remaining: Vec<PairCard> = open.iter().map(|&i| cards[i].clone()).collect();
    remaining.shuffle(rng);
    for (slot, card) in open.into_iter().zip(remaining) {
        cards[slot] = card;
    }
}
