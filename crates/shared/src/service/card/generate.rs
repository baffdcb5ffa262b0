use crate::{
    abstract_trait::card::CardGenerateServiceTrait,
    domain::{
        requests::{BulkGenerateRequest, GenerateCardRequest, MAX_BULK_PREFIXES},
        responses::{ApiResponse, CardResponse},
    },
    engine::{ActiveSet, BinSelector, BulkGenerator, CardAssembler, SelectionCursor},
    errors::{GenerateError, ServiceError, validation_messages},
    model::{
        bin::{Bin, InvalidBinPolicy, clean_bins},
        card::GeneratedCard,
    },
    utils::Metrics,
};
use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{error, info, instrument, warn};
use validator::Validate;

pub struct CardGenerateService {
    active: Arc<ActiveSet>,
    assembler: Arc<CardAssembler>,
    bulk: BulkGenerator,
    selector: BinSelector,
    metrics: Arc<Metrics>,
    policy: InvalidBinPolicy,
}

impl CardGenerateService {
    pub fn new(
        active: Arc<ActiveSet>,
        assembler: Arc<CardAssembler>,
        bulk: BulkGenerator,
        selector: BinSelector,
        metrics: Arc<Metrics>,
        policy: InvalidBinPolicy,
    ) -> Self {
        Self {
            active,
            assembler,
            bulk,
            selector,
            metrics,
            policy,
        }
    }

    fn pick_bins(&self, req: &GenerateCardRequest) -> Result<Vec<Bin>, GenerateError> {
        let strategy = req.selection_strategy();
        let mut rng = rand::rng();

        match &req.bins {
            // Request-supplied BINs get their own cursor; the active set is untouched.
            Some(raw) => {
                let bins = clean_bins(raw, self.policy)?;
                let selection = self.selector.select(
                    &bins,
                    &SelectionCursor::default(),
                    strategy,
                    req.count,
                    &mut rng,
                )?;
                Ok(selection.picks)
            }
            None => self.active.select(strategy, req.count, &mut rng),
        }
    }

    fn build_cards(&self, req: &GenerateCardRequest) -> Result<Vec<GeneratedCard>, GenerateError> {
        let picks = self.pick_bins(req)?;
        let mut rng = rand::rng();
        picks
            .iter()
            .map(|bin| self.assembler.assemble(bin.as_str(), &mut rng))
            .collect()
    }

    fn bulk_prefixes(&self, req: &BulkGenerateRequest) -> Result<Vec<Bin>, GenerateError> {
        let prefixes = match &req.bins {
            Some(raw) => clean_bins(raw, self.policy)?,
            None => self.active.snapshot().to_vec(),
        };
        if prefixes.is_empty() {
            return Err(GenerateError::NoActivePrefixes);
        }
        Ok(prefixes)
    }

    fn record_failure(&self, err: GenerateError) -> ServiceError {
        self.metrics.record_failure(err.kind());
        warn!("🚫 Card generation failed: {err}");
        ServiceError::from(err)
    }
}

fn validate<T: Validate>(req: &T) -> Result<(), ServiceError> {
    req.validate().map_err(|validation_errors| {
        let messages = validation_messages(&validation_errors);
        error!("Validation failed: {messages:?}");
        ServiceError::Validation(messages)
    })
}

#[async_trait]
impl CardGenerateServiceTrait for CardGenerateService {
    #[instrument(skip_all, fields(count = req.count, strategy = ?req.strategy))]
    async fn generate(
        &self,
        req: &GenerateCardRequest,
    ) -> Result<ApiResponse<Vec<CardResponse>>, ServiceError> {
        validate(req)?;

        info!(
            "🎴 Generating {} cards from {}",
            req.count,
            if req.bins.is_some() { "request BINs" } else { "active set" }
        );

        let cards = self
            .build_cards(req)
            .map_err(|e| self.record_failure(e))?;

        self.metrics
            .record_generated(req.selection_strategy().label(), cards.len());
        info!("✅ Generated {} cards", cards.len());

        Ok(ApiResponse::success(
            "✅ Cards generated successfully!",
            cards.into_iter().map(CardResponse::from).collect(),
        ))
    }

    #[instrument(skip_all, fields(bin = %bin))]
    async fn generate_for_bin(
        &self,
        bin: &str,
    ) -> Result<ApiResponse<CardResponse>, ServiceError> {
        info!("🎴 Generating one card for BIN {bin}");

        let card = Bin::parse(bin)
            .and_then(|bin| self.assembler.assemble(bin.as_str(), &mut rand::rng()))
            .map_err(|e| self.record_failure(e))?;

        self.metrics.record_generated("single", 1);
        info!("✅ Generated card {}", card.masked());

        Ok(ApiResponse::success(
            "✅ Card generated successfully!",
            CardResponse::from(card),
        ))
    }

    #[instrument(skip_all, fields(per_prefix = req.per_prefix, shuffle = req.shuffle))]
    async fn bulk(&self, req: &BulkGenerateRequest) -> Result<Vec<GeneratedCard>, ServiceError> {
        validate(req)?;

        info!("📦 Bulk generating {} cards per BIN", req.per_prefix);

        let prefixes = self
            .bulk_prefixes(req)
            .map_err(|e| self.record_failure(e))?;

        if prefixes.len() > MAX_BULK_PREFIXES {
            self.metrics.record_failure("too_many_prefixes");
            warn!(
                "🚫 Bulk request with {} BINs rejected ({MAX_BULK_PREFIXES} max)",
                prefixes.len()
            );
            return Err(ServiceError::Validation(vec![format!(
                "bins: bulk generation takes at most {MAX_BULK_PREFIXES} BINs, got {}",
                prefixes.len()
            )]));
        }

        let generator = self.bulk.clone();
        let (per_prefix, shuffle) = (req.per_prefix, req.shuffle);
        let cards = tokio::task::spawn_blocking(move || {
            generator.generate(&prefixes, per_prefix, shuffle, &mut rand::rng())
        })
        .await
        .map_err(|e| {
            error!("💥 Bulk generation task failed: {e}");
            ServiceError::Internal("Bulk generation failed".into())
        })?
        .map_err(|e| self.record_failure(e))?;

        self.metrics.record_generated("bulk", cards.len());
        info!("✅ Bulk generated {} cards", cards.len());

        Ok(cards)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::requests::{GenerateStrategy, OutputFormat},
        engine::checksum::is_valid,
    };
    use std::collections::HashSet;

    struct Fixture {
        service: CardGenerateService,
        active: Arc<ActiveSet>,
        metrics: Arc<Metrics>,
    }

    fn fixture(bins: &[&str]) -> Fixture {
        let active = Arc::new(ActiveSet::default());
        if !bins.is_empty() {
            active.replace(bins.iter().map(|b| Bin::parse(b).unwrap()).collect());
        }
        let assembler = Arc::new(CardAssembler::default());
        let metrics = Arc::new(Metrics::new());
        let service = CardGenerateService::new(
            active.clone(),
            assembler.clone(),
            BulkGenerator::new(assembler, 50),
            BinSelector::default(),
            metrics.clone(),
            InvalidBinPolicy::DropInvalid,
        );
        Fixture {
            service,
            active,
            metrics,
        }
    }

    fn generate_request(count: usize, strategy: GenerateStrategy) -> GenerateCardRequest {
        GenerateCardRequest {
            bins: None,
            count,
            strategy,
            wrap_around: true,
        }
    }

    #[tokio::test]
    async fn round_robin_over_active_set() {
        let f = fixture(&["411111", "510510", "378282"]);
        let response = f
            .service
            .generate(&generate_request(4, GenerateStrategy::RoundRobin))
            .await
            .unwrap();

        let sources: Vec<_> = response.data.iter().map(|c| c.source_prefix.as_str()).collect();
        assert_eq!(sources, ["411111", "510510", "378282", "411111"]);
        for card in &response.data {
            assert!(is_valid(&card.identifier));
            assert_eq!(card.note, "TEST USE ONLY - Not valid for real transactions");
        }
        assert_eq!(response.data[2].identifier.len(), 15);
        assert_eq!(response.data[2].brand_hint, "AMEX (test)");

        // The shared cursor carries over to the next call.
        let response = f
            .service
            .generate(&generate_request(1, GenerateStrategy::RoundRobin))
            .await
            .unwrap();
        assert_eq!(response.data[0].source_prefix, "510510");
    }

    #[tokio::test]
    async fn request_bins_leave_active_cursor_alone() {
        let f = fixture(&["411111", "510510"]);
        let mut req = generate_request(3, GenerateStrategy::RoundRobin);
        req.bins = Some(vec!["601100".into(), "6500-00".into()]);

        let response = f.service.generate(&req).await.unwrap();
        let sources: Vec<_> = response.data.iter().map(|c| c.source_prefix.as_str()).collect();
        assert_eq!(sources, ["601100", "650000", "601100"]);

        let next = f
            .service
            .generate(&generate_request(1, GenerateStrategy::RoundRobin))
            .await
            .unwrap();
        assert_eq!(next.data[0].source_prefix, "411111");
        assert_eq!(f.active.len(), 2);
    }

    #[tokio::test]
    async fn random_unique_without_wrap_rejects_overdraw() {
        let f = fixture(&["411111", "510510"]);
        let mut req = generate_request(3, GenerateStrategy::RandomUnique);
        req.wrap_around = false;

        let err = f.service.generate(&req).await.unwrap_err();
        assert_eq!(err.kind(), "count_exceeds_available");

        req.count = 2;
        let response = f.service.generate(&req).await.unwrap();
        let unique: HashSet<_> = response.data.iter().map(|c| c.source_prefix.clone()).collect();
        assert_eq!(unique.len(), 2);
    }

    #[tokio::test]
    async fn empty_active_set_is_reported_and_counted() {
        let f = fixture(&[]);
        let err = f
            .service
            .generate(&generate_request(1, GenerateStrategy::RandomNoRepeat))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), "no_active_prefixes");

        let text = f.metrics.render().unwrap();
        assert!(text.contains(r#"generation_failures_total{kind="no_active_prefixes"} 1"#));
    }

    #[tokio::test]
    async fn count_out_of_range_is_a_validation_error() {
        let f = fixture(&["411111"]);
        let err = f
            .service
            .generate(&generate_request(101, GenerateStrategy::RoundRobin))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
    }

    #[tokio::test]
    async fn single_bin_generation() {
        let f = fixture(&[]);
        let response = f.service.generate_for_bin("4111 11").await.unwrap();
        assert_eq!(response.data.source_prefix, "411111");
        assert!(response.data.masked_identifier.starts_with("411111******"));

        let err = f.service.generate_for_bin("41").await.unwrap_err();
        assert_eq!(err.kind(), "invalid_prefix");
    }

    #[tokio::test]
    async fn bulk_uses_request_bins_or_active_set() {
        let f = fixture(&["411111"]);
        let req = BulkGenerateRequest {
            bins: None,
            per_prefix: 20,
            shuffle: false,
            format: OutputFormat::Json,
        };
        let cards = f.service.bulk(&req).await.unwrap();
        assert_eq!(cards.len(), 20);
        let unique: HashSet<_> = cards.iter().map(|c| c.identifier.clone()).collect();
        assert_eq!(unique.len(), 20);

        let req = BulkGenerateRequest {
            bins: Some(vec!["510510".into(), "601100".into()]),
            per_prefix: 5,
            shuffle: true,
            format: OutputFormat::Pipe,
        };
        let cards = f.service.bulk(&req).await.unwrap();
        assert_eq!(cards.len(), 10);
        assert!(cards.iter().all(|c| c.source_prefix != "411111"));
    }

    #[tokio::test]
    async fn bulk_over_oversized_active_set_is_rejected() {
        let f = fixture(&[]);
        f.active.replace(
            (0..MAX_BULK_PREFIXES + 2000)
                .map(|i| Bin::parse(&format!("4{i:05}")).unwrap())
                .collect(),
        );
        assert_eq!(f.active.len(), 3000);

        let req = BulkGenerateRequest {
            bins: None,
            per_prefix: 2,
            shuffle: false,
            format: OutputFormat::Json,
        };
        let err = f.service.bulk(&req).await.unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));

        let text = f.metrics.render().unwrap();
        assert!(text.contains(r#"generation_failures_total{kind="too_many_prefixes"} 1"#));
        assert!(!text.contains(r#"strategy="bulk""#));
    }

    #[tokio::test]
    async fn bulk_at_the_prefix_limit_is_served() {
        let f = fixture(&[]);
        f.active.replace(
            (0..MAX_BULK_PREFIXES)
                .map(|i| Bin::parse(&format!("5{i:05}")).unwrap())
                .collect(),
        );
        let req = BulkGenerateRequest {
            bins: None,
            per_prefix: 1,
            shuffle: false,
            format: OutputFormat::Json,
        };
        let cards = f.service.bulk(&req).await.unwrap();
        assert_eq!(cards.len(), MAX_BULK_PREFIXES);
    }

    #[tokio::test]
    async fn bulk_without_bins_fails() {
        let f = fixture(&[]);
        let req = BulkGenerateRequest {
            bins: None,
            per_prefix: 5,
            shuffle: false,
            format: OutputFormat::Json,
        };
        let err = f.service.bulk(&req).await.unwrap_err();
        assert_eq!(err.kind(), "no_active_prefixes");
    }
}
