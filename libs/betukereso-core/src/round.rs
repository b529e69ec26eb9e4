//! Weighted random grapheme selection for a round.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::error::{EngineError, Result};
use crate::types::{ChildSettings, Grapheme};

/// Extra copies of each trouble grapheme added to the sampling pool.
pub const TROUBLE_EXTRA_COPIES: usize = 2;

/// Which graphemes may be drawn and whether trouble letters are favoured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolConfig {
    pub include_foreign: bool,
    pub bias_trouble: bool,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            include_foreign: false,
            bias_trouble: true,
        }
    }
}

impl PoolConfig {
    pub fn from_settings(settings: &ChildSettings) -> Self {
        Self {
            include_foreign: settings.include_foreign_letters,
            bias_trouble: true,
        }
    }
}

/// Sampling pool with trouble graphemes repeated.
pub fn weighted_pool(catalog: &Catalog, config: PoolConfig) -> Vec<Grapheme> {
    let mut pool = catalog.pool(config.include_foreign);
    if config.bias_trouble {
        let trouble: Vec<Grapheme> = pool
            .iter()
            .filter(|g| catalog.is_trouble(g.as_str()))
            .cloned()
            .collect();
        for _ in 0..TROUBLE_EXTRA_COPIES {
            pool.extend(trouble.iter().cloned());
        }
    }
    pool
}

/// Draw `count` graphemes without replacement from the weighted pool.
///
/// A trouble grapheme may appear up to three times in one round since each of
/// its copies is a separate pool position. Asking for more than the weighted
/// pool holds is an error; the round is never truncated.
pub fn select_round<R: Rng + ?Sized>(
    catalog: &Catalog,
    config: PoolConfig,
    count: usize,
    rng: &mut R,
) -> Result<Vec<Grapheme>> {
    let mut pool = weighted_pool(catalog, config);
    if count > pool.len() {
        return Err(EngineError::InsufficientPoolSize {
            requested: count,
            available: pool.len(),
        });
    }

    let (picked, _) = pool.partial_shuffle(rng, count);
    Ok(picked.to_vec())
}
