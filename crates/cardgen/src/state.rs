use crate::di::DependenciesInject;
use anyhow::{Context, Result};
use shared::{config::Config, engine::ActiveSet, model::bin::clean_bins, utils::Metrics};
use std::sync::Arc;
use tracing::info;

#[derive(Debug, Clone)]
pub struct AppState {
    pub di_container: DependenciesInject,
    pub metrics: Arc<Metrics>,
}

impl AppState {
    pub fn new(config: &Config) -> Result<Self> {
        let metrics = Arc::new(Metrics::new());
        let active = Arc::new(ActiveSet::new(config.generator.selector()));

        if !config.initial_bins.is_empty() {
            let bins = clean_bins(&config.initial_bins, config.invalid_bin_policy)
                .context("INITIAL_BINS holds no usable BINs")?;
            let loaded = active.replace(bins);
            metrics.set_active_bins(loaded.len());
            info!("📦 Loaded {} initial BINs", loaded.len());
        }

        let di_container = DependenciesInject::new(config, active, metrics.clone());

        Ok(Self {
            di_container,
            metrics,
        })
    }
}
