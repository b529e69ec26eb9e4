//! Answer evaluators, one per game mode.

pub mod exact;
pub mod pair;
pub mod trace;

use crate::case::DisplayLetter;
use crate::error::{EngineError, Result};
use crate::types::GameMode;
use trace::TraceSession;

/// Mode-specific answer payload.
#[derive(Debug, Clone, Copy)]
pub enum AnswerInput<'a> {
    /// Display text of the clicked grid cell (find-letter).
    Click { display: &'a str },
    /// Graphemes of the uppercase and lowercase picks (match-case).
    Pair { upper: &'a str, lower: &'a str },
    /// Supervising adult's verdict (show-mark).
    Verdict(bool),
    /// Finished drawing (trace-letter).
    Trace(&'a TraceSession),
}

impl AnswerInput<'_> {
    fn kind(&self) -> &'static str {
        match self {
            Self::Click { .. } => "click",
            Self::Pair { .. } => "pair",
            Self::Verdict(_) => "verdict",
            Self::Trace(_) => "trace",
        }
    }
}

/// Decide whether an answer is correct.
///
/// `target` is the round's pinned display letter; match-case compares the two
/// picks with each other and trace-letter scores the session's own reference
/// pixels, so those modes only read the input.
pub fn evaluate(mode: GameMode, target: &DisplayLetter, input: AnswerInput<'_>) -> Result<bool> {
    match (mode, input) {
        (GameMode::FindLetter, AnswerInput::Click { display }) => {
            Ok(exact::is_match(display, target))
        }
        (GameMode::MatchCase, AnswerInput::Pair { upper, lower }) => {
            Ok(pair::same_grapheme(upper, lower))
        }
        (GameMode::ShowMark, AnswerInput::Verdict(verdict)) => Ok(verdict),
        (GameMode::TraceLetter, AnswerInput::Trace(session)) => Ok(session.score().correct),
        (mode, input) => Err(EngineError::InvalidEvaluatorInput(format!(
            "{} answer does not apply to a {} round",
            input.kind(),
            mode
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::case::CaseStyle;
    use crate::types::Grapheme;
    use trace::Point;

    fn target(grapheme: &str, style: CaseStyle) -> DisplayLetter {
        DisplayLetter::new(Grapheme::from(grapheme), style)
    }

    #[test]
    fn find_letter_compares_display_text() {
        let t = target("ny", CaseStyle::Title);
        assert!(evaluate(GameMode::FindLetter, &t, AnswerInput::Click { display: "Ny" }).unwrap());
        assert!(!evaluate(GameMode::FindLetter, &t, AnswerInput::Click { display: "ny" }).unwrap());
    }

    #[test]
    fn match_case_compares_picks() {
        let t = target("a", CaseStyle::Upper);
        let input = AnswerInput::Pair {
            upper: "A",
            lower: "a",
        };
        assert!(evaluate(GameMode::MatchCase, &t, input).unwrap());
        let input = AnswerInput::Pair {
            upper: "A",
            lower: "b",
        };
        assert!(!evaluate(GameMode::MatchCase, &t, input).unwrap());
    }

    #[test]
    fn show_mark_returns_the_verdict() {
        let t = target("zs", CaseStyle::Lower);
        assert!(evaluate(GameMode::ShowMark, &t, AnswerInput::Verdict(true)).unwrap());
        assert!(!evaluate(GameMode::ShowMark, &t, AnswerInput::Verdict(false)).unwrap());
    }

    #[test]
    fn trace_scores_the_session() {
        let t = target("o", CaseStyle::Lower);
        let mut session = TraceSession::from_letter_pixels([Point::new(0, 0)]);
        session.pen_down(Point::new(0, 0));
        session.pen_up();
        assert!(evaluate(GameMode::TraceLetter, &t, AnswerInput::Trace(&session)).unwrap());
    }

    #[test]
    fn mismatched_input_is_rejected() {
        let t = target("a", CaseStyle::Lower);
        let result = evaluate(GameMode::FindLetter, &t, AnswerInput::Verdict(true));
        assert!(matches!(result, Err(EngineError::InvalidEvaluatorInput(_))));
    }
}
