//! Streak and per-grapheme progress updates.

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::Serialize;

use crate::catalog::Catalog;
use crate::error::{EngineError, Result};
use crate::reward::{self, AwardTrigger};
use crate::types::{Child, GameMode, Grapheme, ProgressUpdate};

/// New child state plus what the caller reports back.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnswerOutcome {
    pub child: Child,
    pub update: ProgressUpdate,
    /// Candidate that was considered, whether or not it paid out.
    pub trigger: Option<AwardTrigger>,
}

/// Apply one answer to a copy of `child`.
///
/// The input is left untouched; the caller persists `outcome.child` together
/// with `outcome.update.sticker_earned` or nothing at all. Graphemes outside
/// `catalog` are rejected so progress keys stay within the alphabet.
pub fn record_answer<R: Rng + ?Sized>(
    catalog: &Catalog,
    child: &Child,
    mode: GameMode,
    grapheme: &Grapheme,
    is_correct: bool,
    rng: &mut R,
    now: DateTime<Utc>,
) -> Result<AnswerOutcome> {
    if grapheme.as_str().trim().is_empty() {
        return Err(EngineError::InvalidEvaluatorInput(
            "grapheme must not be empty".to_string(),
        ));
    }
    if !catalog.contains(grapheme.as_str()) {
        return Err(EngineError::InvalidEvaluatorInput(format!(
            "unknown grapheme: {}",
            grapheme
        )));
    }

    let mut next = child.clone();
    next.streak = if is_correct { next.streak + 1 } else { 0 };

    let entry = next.progress.entry(grapheme.clone()).or_default();
    entry.record(is_correct);
    let new_stars = entry.stars;

    let mut trigger = None;
    let mut sticker_earned = None;
    if is_correct {
        trigger = reward::award_trigger(next.streak, &next.settings, &next.claimed_thresholds);
        if let Some(candidate) = trigger {
            if let AwardTrigger::Threshold(level) = candidate {
                next.claimed_thresholds.insert(level);
            }
            if candidate.draw(next.total_stickers, rng) {
                let sticker = reward::make_sticker(next.id, next.streak, now);
                next.total_stickers += 1;
                tracing::info!(
                    child_id = %next.id,
                    streak = next.streak,
                    sticker = %sticker.name,
                    "sticker awarded"
                );
                sticker_earned = Some(sticker);
            }
        }
    }
    next.updated_at = now;

    tracing::debug!(
        child_id = %next.id,
        mode = %mode,
        grapheme = %grapheme,
        is_correct,
        streak = next.streak,
        "answer recorded"
    );

    let update = ProgressUpdate {
        new_streak: next.streak,
        new_stars,
        sticker_earned,
        total_stickers: next.total_stickers,
    };
    Ok(AnswerOutcome {
        child: next,
        update,
        trigger,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ChildSettings;
    use pretty_assertions::assert_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn child() -> Child {
        Child::new("Lili", Utc::now()).unwrap()
    }

    fn answer(child: &Child, correct: bool, rng: &mut StdRng) -> AnswerOutcome {
        record_answer(
            &Catalog::hungarian(),
            child,
            GameMode::FindLetter,
            &Grapheme::from("a"),
            correct,
            rng,
            Utc::now(),
        )
        .unwrap()
    }

    #[test]
    fn wrong_answer_resets_streak_and_keeps_stars() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut c = child();
        c = answer(&c, true, &mut rng).child;
        c = answer(&c, true, &mut rng).child;
        assert_eq!(c.streak, 2);
        assert_eq!(c.progress_for("a").stars, 3);

        let outcome = answer(&c, false, &mut rng);
        assert_eq!(outcome.update.new_streak, 0);
        assert_eq!(outcome.update.new_stars, 3);
        assert_eq!(outcome.update.sticker_earned, None);
        let progress = outcome.child.progress_for("a");
        assert_eq!((progress.attempts, progress.correct), (3, 2));
    }

    #[test]
    fn thresholds_pay_out_once_each() {
        let mut rng = StdRng::seed_from_u64(2);
        let mut c = child();
        let mut earned = Vec::new();
        for _ in 0..10 {
            let outcome = answer(&c, true, &mut rng);
            if let Some(sticker) = outcome.update.sticker_earned {
                earned.push(sticker.streak_level);
            }
            c = outcome.child;
        }
        assert_eq!(earned, vec![3, 5, 10]);
        assert_eq!(c.total_stickers, 3);

        // reach the same thresholds again after a reset
        c = answer(&c, false, &mut rng).child;
        for _ in 0..9 {
            let outcome = answer(&c, true, &mut rng);
            assert_eq!(outcome.update.sticker_earned, None);
            c = outcome.child;
        }
        assert_eq!(c.total_stickers, 3);
    }

    #[test]
    fn disabled_stickers_award_nothing() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut c = child();
        c.settings = ChildSettings {
            stickers_enabled: false,
            ..ChildSettings::default()
        };
        for _ in 0..20 {
            let outcome = answer(&c, true, &mut rng);
            assert_eq!(outcome.update.sticker_earned, None);
            c = outcome.child;
        }
        assert_eq!(c.total_stickers, 0);
        assert!(c.claimed_thresholds.is_empty());
    }

    #[test]
    fn interval_sticker_after_thresholds() {
        let mut rng = StdRng::seed_from_u64(4);
        let mut c = child();
        c.streak = 14;
        c.claimed_thresholds = [3, 5, 10].into_iter().collect();
        c.total_stickers = 3;

        let outcome = answer(&c, true, &mut rng);
        assert_eq!(outcome.trigger, Some(AwardTrigger::Interval));
        let sticker = outcome.update.sticker_earned.unwrap();
        assert_eq!(sticker.streak_level, 15);
        assert_eq!(sticker.name, "Király Olvasó");
        assert_eq!(outcome.update.total_stickers, 4);
    }

    #[test]
    fn interval_candidate_fails_when_decay_is_exhausted() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut c = child();
        c.streak = 19;
        c.claimed_thresholds = [3, 5, 10].into_iter().collect();
        c.total_stickers = 120;

        let outcome = answer(&c, true, &mut rng);
        assert_eq!(outcome.trigger, Some(AwardTrigger::Interval));
        assert_eq!(outcome.update.sticker_earned, None);
        assert_eq!(outcome.update.total_stickers, 120);
    }

    #[test]
    fn input_child_is_not_modified() {
        let mut rng = StdRng::seed_from_u64(6);
        let c = child();
        let before = c.clone();
        let outcome = answer(&c, true, &mut rng);
        assert_eq!(c, before);
        assert_eq!(outcome.child.streak, 1);
    }

    #[test]
    fn empty_grapheme_is_rejected() {
        let mut rng = StdRng::seed_from_u64(7);
        let result = record_answer(
            &Catalog::hungarian(),
            &child(),
            GameMode::ShowMark,
            &Grapheme::from(" "),
            true,
            &mut rng,
            Utc::now(),
        );
        assert!(matches!(result, Err(EngineError::InvalidEvaluatorInput(_))));
    }

    #[test]
    fn graphemes_outside_the_catalog_are_rejected() {
        let mut rng = StdRng::seed_from_u64(8);
        let catalog = Catalog::hungarian();
        for bad in ["not-a-letter-at-all", "CS", "ä"] {
            let result = record_answer(
                &catalog,
                &child(),
                GameMode::FindLetter,
                &Grapheme::from(bad),
                true,
                &mut rng,
                Utc::now(),
            );
            assert!(
                matches!(result, Err(EngineError::InvalidEvaluatorInput(_))),
                "{bad} accepted"
            );
        }

        let outcome = record_answer(
            &catalog,
            &child(),
            GameMode::FindLetter,
            &Grapheme::from("dzs"),
            true,
            &mut rng,
            Utc::now(),
        )
        .unwrap();
        assert_eq!(outcome.child.progress.len(), 1);
    }
}
