use shared::{
    abstract_trait::{
        bin::{DynBinCommandService, DynBinQueryService},
        card::DynCardGenerateService,
    },
    config::Config,
    engine::ActiveSet,
    service::{BinCommandService, BinQueryService, CardGenerateService},
    utils::Metrics,
};
use std::sync::Arc;

#[derive(Clone)]
pub struct DependenciesInject {
    pub bin_command: DynBinCommandService,
    pub bin_query: DynBinQueryService,
    pub card_generate: DynCardGenerateService,
}

impl std::fmt::Debug for DependenciesInject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DependenciesInject")
            .field("bin_command", &"BinCommandService")
            .field("bin_query", &"BinQueryService")
            .field("card_generate", &"CardGenerateService")
            .finish()
    }
}

impl DependenciesInject {
    pub fn new(config: &Config, active: Arc<ActiveSet>, metrics: Arc<Metrics>) -> Self {
        let generator = &config.generator;
        let assembler = Arc::new(generator.assembler());

        let bin_command = Arc::new(BinCommandService::new(
            active.clone(),
            metrics.clone(),
            config.invalid_bin_policy,
        )) as DynBinCommandService;

        let bin_query = Arc::new(BinQueryService::new(active.clone())) as DynBinQueryService;

        let card_generate = Arc::new(CardGenerateService::new(
            active,
            assembler.clone(),
            generator.bulk_generator(assembler),
            generator.selector(),
            metrics,
            config.invalid_bin_policy,
        )) as DynCardGenerateService;

        Self {
            bin_command,
            bin_query,
            card_generate,
        }
    }
}
