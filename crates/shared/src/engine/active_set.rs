use crate::{
    engine::selector::{BinSelector, SelectionCursor, SelectionStrategy},
    errors::GenerateError,
    model::bin::{Bin, dedup_bins},
};
use rand::Rng;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::info;

#[derive(Debug, Default)]
struct Inner {
    bins: Arc<[Bin]>,
    cursor: SelectionCursor<Bin>,
}

/// The process-wide BIN list together with its selection cursor.
///
/// One mutex guards both, so a selection never pairs a stale list with a
/// fresh cursor. Replacing or appending swaps in a new list and resets the
/// cursor in the same critical section.
#[derive(Debug, Default)]
pub struct ActiveSet {
    inner: Mutex<Inner>,
    selector: BinSelector,
}

impl ActiveSet {
    pub fn new(selector: BinSelector) -> Self {
        Self {
            inner: Mutex::default(),
            selector,
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        // Every critical section leaves Inner consistent, so a poisoned lock
        // still holds usable state.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn snapshot(&self) -> Arc<[Bin]> {
        self.lock().bins.clone()
    }

    pub fn len(&self) -> usize {
        self.lock().bins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn replace(&self, bins: Vec<Bin>) -> Arc<[Bin]> {
        let bins: Arc<[Bin]> = dedup_bins(bins).into();
        let mut inner = self.lock();
        inner.bins = bins.clone();
        inner.cursor = SelectionCursor::default();
        info!("🔁 Active BIN set replaced: {} BINs", bins.len());
        bins
    }

    pub fn append(&self, bins: Vec<Bin>) -> Arc<[Bin]> {
        let mut inner = self.lock();
        let merged: Arc<[Bin]> = dedup_bins(inner.bins.iter().cloned().chain(bins)).into();
        inner.bins = merged.clone();
        inner.cursor = SelectionCursor::default();
        info!("➕ Active BIN set extended: {} BINs", merged.len());
        merged
    }

    /// Picks `count` BINs and advances the shared cursor. On error the
    /// cursor is left as it was.
    pub fn select<R: Rng + ?Sized>(
        &self,
        strategy: SelectionStrategy,
        count: usize,
        rng: &mut R,
    ) -> Result<Vec<Bin>, GenerateError> {
        let mut inner = self.lock();
        let selection = self
            .selector
            .select(&inner.bins, &inner.cursor, strategy, count, rng)?;
        inner.cursor = selection.cursor;
        Ok(selection.picks)
    }
}
