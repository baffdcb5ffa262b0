use prometheus_client::{
    encoding::{EncodeLabelSet, text::encode},
    metrics::{counter::Counter, family::Family, gauge::Gauge},
    registry::Registry,
};

#[derive(Debug, Clone, Hash, PartialEq, Eq, EncodeLabelSet)]
pub struct StrategyLabels {
    pub strategy: String,
}

#[derive(Debug, Clone, Hash, PartialEq, Eq, EncodeLabelSet)]
pub struct FailureLabels {
    pub kind: String,
}

#[derive(Debug)]
pub struct Metrics {
    registry: Registry,
    cards_generated: Family<StrategyLabels, Counter>,
    generation_failures: Family<FailureLabels, Counter>,
    active_bins: Gauge,
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Metrics {
    pub fn new() -> Self {
        let mut registry = Registry::default();
        let cards_generated = Family::<StrategyLabels, Counter>::default();
        let generation_failures = Family::<FailureLabels, Counter>::default();
        let active_bins = Gauge::default();

        registry.register(
            "cards_generated",
            "Test cards produced, by selection strategy",
            cards_generated.clone(),
        );
        registry.register(
            "generation_failures",
            "Rejected generation requests, by error kind",
            generation_failures.clone(),
        );
        registry.register(
            "active_bins",
            "Number of BINs in the active set",
            active_bins.clone(),
        );

        Self {
            registry,
            cards_generated,
            generation_failures,
            active_bins,
        }
    }

    pub fn record_generated(&self, strategy: &str, count: usize) {
        self.cards_generated
            .get_or_create(&StrategyLabels {
                strategy: strategy.to_string(),
            })
            .inc_by(count as u64);
    }

    pub fn record_failure(&self, kind: &str) {
        self.generation_failures
            .get_or_create(&FailureLabels {
                kind: kind.to_string(),
            })
            .inc();
    }

    pub fn set_active_bins(&self, count: usize) {
        self.active_bins.set(count as i64);
    }

    /// OpenMetrics text exposition of every registered metric.
    pub fn render(&self) -> Result<String, std::fmt::Error> {
        let mut buffer = String::new();
        encode(&mut buffer, &self.registry)?;
        Ok(buffer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_counters_and_gauge() {
        let metrics = Metrics::new();
        metrics.record_generated("round_robin", 3);
        metrics.record_generated("round_robin", 2);
        metrics.record_failure("no_active_prefixes");
        metrics.set_active_bins(4);

        let text = metrics.render().unwrap();
        assert!(text.contains(r#"cards_generated_total{strategy="round_robin"} 5"#), "{text}");
        assert!(
            text.contains(r#"generation_failures_total{kind="no_active_prefixes"} 1"#),
            "{text}"
        );
        assert!(text.contains("active_bins 4"), "{text}");
    }
}
