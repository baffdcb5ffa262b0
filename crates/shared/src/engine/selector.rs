//! Per-call prefix selection policies.
//!
//! Every policy is a function of (set, cursor, count) returning the picks
//! and the advanced cursor; callers decide where the cursor lives.

use crate::errors::GenerateError;
use rand::{Rng, seq::SliceRandom};
use serde::{Deserialize, Serialize};

pub const DEFAULT_MAX_REDRAWS: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "policy")]
pub enum SelectionStrategy {
    RoundRobin,
    RandomNoImmediateRepeat,
    RandomWithoutReplacement { wrap_around: bool },
}

impl SelectionStrategy {
    pub fn label(&self) -> &'static str {
        match self {
            Self::RoundRobin => "round_robin",
            Self::RandomNoImmediateRepeat => "random_no_repeat",
            Self::RandomWithoutReplacement { .. } => "random_unique",
        }
    }
}

/// Rotation position plus the most recent pick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionCursor<T> {
    pub next_index: usize,
    pub last: Option<T>,
}

impl<T> Default for SelectionCursor<T> {
    fn default() -> Self {
        Self {
            next_index: 0,
            last: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection<T> {
    pub picks: Vec<T>,
    pub cursor: SelectionCursor<T>,
}

#[derive(Debug, Clone, Copy)]
pub struct BinSelector {
    /// Redraws allowed before an immediate repeat is accepted.
    pub max_redraws: usize,
}

impl Default for BinSelector {
    fn default() -> Self {
        Self {
            max_redraws: DEFAULT_MAX_REDRAWS,
        }
    }
}

impl BinSelector {
    pub fn new(max_redraws: usize) -> Self {
        Self { max_redraws }
    }

    pub fn select<T, R>(
        &self,
        set: &[T],
        cursor: &SelectionCursor<T>,
        strategy: SelectionStrategy,
        count: usize,
        rng: &mut R,
    ) -> Result<Selection<T>, GenerateError>
    where
        T: Clone + PartialEq,
        R: Rng + ?Sized,
    {
        if set.is_empty() {
            return Err(GenerateError::NoActivePrefixes);
        }

        let (picks, next_index) = match strategy {
            SelectionStrategy::RoundRobin => round_robin(set, cursor.next_index, count),
            SelectionStrategy::RandomNoImmediateRepeat => (
                self.random_no_repeat(set, cursor.last.as_ref(), count, rng),
                cursor.next_index,
            ),
            SelectionStrategy::RandomWithoutReplacement { wrap_around } => (
                without_replacement(set, count, wrap_around, rng)?,
                cursor.next_index,
            ),
        };

        let last = picks.last().cloned().or_else(|| cursor.last.clone());
        Ok(Selection {
            picks,
            cursor: SelectionCursor { next_index, last },
        })
    }

    fn random_no_repeat<T, R>(
        &self,
        set: &[T],
        previous: Option<&T>,
        count: usize,
        rng: &mut R,
    ) -> Vec<T>
    where
        T: Clone + PartialEq,
        R: Rng + ?Sized,
    {
        let mut picks: Vec<T> = Vec::with_capacity(count);
        let mut last = previous.cloned();

        for _ in 0..count {
            let mut idx = rng.random_range(0..set.len());
            if set.len() > 1 {
                let mut redraws = 0;
                while last.as_ref() == Some(&set[idx]) && redraws < self.max_redraws {
                    idx = rng.random_range(0..set.len());
                    redraws += 1;
                }
            }
            let pick = set[idx].clone();
            last = Some(pick.clone());
            picks.push(pick);
        }

        picks
    }
}

fn round_robin<T: Clone>(set: &[T], next_index: usize, count: usize) -> (Vec<T>, usize) {
    let start = next_index % set.len();
    let picks = set.iter().cycle().skip(start).take(count).cloned().collect();
    (picks, (start + count) % set.len())
}

fn without_replacement<T, R>(
    set: &[T],
    count: usize,
    wrap_around: bool,
    rng: &mut R,
) -> Result<Vec<T>, GenerateError>
where
    T: Clone + PartialEq,
    R: Rng + ?Sized,
{
    if count <= set.len() {
        let mut pool = set.to_vec();
        let (chosen, _) = pool.partial_shuffle(rng, count);
        return Ok(chosen.to_vec());
    }

    if !wrap_around {
        return Err(GenerateError::CountExceedsAvailable {
            requested: count,
            available: set.len(),
        });
    }

    let tiles = count.div_ceil(set.len());
    let mut pool: Vec<T> = set
        .iter()
        .cycle()
        .take(set.len() * tiles)
        .cloned()
        .collect();
    pool.shuffle(rng);
    pool.truncate(count);

    Ok(spread_adjacent(pool))
}

/// Best-effort removal of equal neighbours, left to right.
///
/// When an item equals the one before it, it is swapped with the nearest
/// earlier distinct element whose new neighbours both differ from the item.
/// If no such slot exists the adjacency stays.
pub(crate) fn spread_adjacent<T: PartialEq>(pool: Vec<T>) -> Vec<T> {
    let mut fixed: Vec<T> = Vec::with_capacity(pool.len());

    for mut item in pool {
        if fixed.last() == Some(&item) {
            let slot = (0..fixed.len()).rev().find(|&j| {
                fixed[j] != item
                    && (j == 0 || fixed[j - 1] != item)
                    && fixed.get(j + 1).is_none_or(|next| *next != item)
            });
            if let Some(j) = slot {
                std::mem::swap(&mut fixed[j], &mut item);
            }
        }
        fixed.push(item);
    }

    fixed
}
