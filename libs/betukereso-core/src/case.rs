//! Display casing for graphemes.
//!
//! A grapheme occurrence gets its case exactly once ([`DisplayLetter::roll`]);
//! the resulting text is what the prompt shows and what answers are compared
//! against, so a `mixed` setting never re-rolls mid-round.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::types::{Grapheme, LetterCase};

/// Concrete display case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CaseStyle {
    Lower,
    Upper,
    Title,
}

impl CaseStyle {
    pub const ALL: [CaseStyle; 3] = [CaseStyle::Lower, CaseStyle::Upper, CaseStyle::Title];
}

impl LetterCase {
    /// Pick the concrete case for one occurrence. `Mixed` is uniform over the three.
    pub fn resolve<R: Rng + ?Sized>(self, rng: &mut R) -> CaseStyle {
        match self {
            Self::Lowercase => CaseStyle::Lower,
            Self::Uppercase => CaseStyle::Upper,
            Self::Titlecase => CaseStyle::Title,
            Self::Mixed => CaseStyle::ALL[rng.gen_range(0..CaseStyle::ALL.len())],
        }
    }
}

/// Render a grapheme in the given case ("cs" as title is "Cs").
pub fn apply_case(grapheme: &str, style: CaseStyle) -> String {
    match style {
        CaseStyle::Lower => grapheme.to_lowercase(),
        CaseStyle::Upper => grapheme.to_uppercase(),
        CaseStyle::Title => {
            let mut chars = grapheme.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect(),
                None => String::new(),
            }
        }
    }
}

/// A grapheme occurrence with its case pinned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayLetter {
    pub grapheme: Grapheme,
    pub style: CaseStyle,
    pub text: String,
}

impl DisplayLetter {
    pub fn new(grapheme: Grapheme, style: CaseStyle) -> Self {
        let text = apply_case(grapheme.as_str(), style);
        Self {
            grapheme,
            style,
            text,
        }
    }

    /// Resolve the setting once and pin the result.
    pub fn roll<R: Rng + ?Sized>(grapheme: Grapheme, letter_case: LetterCase, rng: &mut R) -> Self {
        Self::new(grapheme, letter_case.resolve(rng))
    }
}
