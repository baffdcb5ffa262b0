use crate::{engine::assembler::CardAssembler, errors::GenerateError, model::card::GeneratedCard};
use chrono::{Datelike, Utc};
use rand::{Rng, seq::SliceRandom};
use std::{collections::HashSet, sync::Arc};
use tracing::{debug, warn};

pub const DEFAULT_MAX_DUPLICATE_STREAK: usize = 1000;

/// Produces `per_prefix` distinct cards for each prefix.
#[derive(Debug, Clone)]
pub struct BulkGenerator {
    assembler: Arc<CardAssembler>,
    max_duplicate_streak: usize,
}

impl BulkGenerator {
    pub fn new(assembler: Arc<CardAssembler>, max_duplicate_streak: usize) -> Self {
        Self {
            assembler,
            max_duplicate_streak: max_duplicate_streak.max(1),
        }
    }

    pub fn generate<S, R>(
        &self,
        prefixes: &[S],
        per_prefix: usize,
        shuffle: bool,
        rng: &mut R,
    ) -> Result<Vec<GeneratedCard>, GenerateError>
    where
        S: AsRef<str>,
        R: Rng + ?Sized,
    {
        self.generate_in_year(prefixes, per_prefix, shuffle, Utc::now().year(), rng)
    }

    pub fn generate_in_year<S, R>(
        &self,
        prefixes: &[S],
        per_prefix: usize,
        shuffle: bool,
        current_year: i32,
        rng: &mut R,
    ) -> Result<Vec<GeneratedCard>, GenerateError>
    where
        S: AsRef<str>,
        R: Rng + ?Sized,
    {
        let mut cards = Vec::with_capacity(prefixes.len() * per_prefix);

        for prefix in prefixes {
            match self.batch_for(prefix.as_ref(), per_prefix, current_year, rng) {
                Ok(batch) => cards.extend(batch),
                Err(err) => warn!("⏭️ Skipping BIN {}: {err}", prefix.as_ref()),
            }
        }

        if cards.is_empty() {
            return Err(GenerateError::NoValidOutput);
        }

        // One pass over the combined list so prefixes interleave.
        if shuffle {
            cards.shuffle(rng);
        }

        Ok(cards)
    }

    fn batch_for<R: Rng + ?Sized>(
        &self,
        prefix: &str,
        per_prefix: usize,
        current_year: i32,
        rng: &mut R,
    ) -> Result<Vec<GeneratedCard>, GenerateError> {
        let mut seen = HashSet::with_capacity(per_prefix);
        let mut batch = Vec::with_capacity(per_prefix);
        let mut duplicate_streak = 0;

        while batch.len() < per_prefix {
            let card = self.assembler.assemble_in_year(prefix, current_year, rng)?;

            if seen.insert(card.identifier.clone()) {
                batch.push(card);
                duplicate_streak = 0;
                continue;
            }

            duplicate_streak += 1;
            if duplicate_streak >= self.max_duplicate_streak {
                warn!(
                    "⚠️ BIN {prefix} exhausted after {} unique cards ({duplicate_streak} duplicates in a row)",
                    batch.len()
                );
                break;
            }
        }

        debug!("BIN {prefix}: collected {} cards", batch.len());
        Ok(batch)
    }
}
