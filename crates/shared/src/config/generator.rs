use crate::{
    config::myconfig::parse_or,
    engine::{
        BinSelector, BodySynthesizer, BrandProfile, BrandRule, BulkGenerator, CardAssembler,
        ExpiryPolicy, PlausibilityScope, body::DEFAULT_BODY_MAX_ATTEMPTS,
        bulk::DEFAULT_MAX_DUPLICATE_STREAK, selector::DEFAULT_MAX_REDRAWS,
    },
};
use anyhow::{Context, Result, anyhow, bail};
use std::sync::Arc;

/// Engine tunables.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    pub body_max_attempts: usize,
    pub selector_max_redraws: usize,
    pub expiry: ExpiryPolicy,
    pub bulk_max_duplicate_streak: usize,
    pub plausibility_scope: PlausibilityScope,
    /// `None` keeps the built-in brand table.
    pub brand_rules: Option<Vec<BrandRule>>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            body_max_attempts: DEFAULT_BODY_MAX_ATTEMPTS,
            selector_max_redraws: DEFAULT_MAX_REDRAWS,
            expiry: ExpiryPolicy::default(),
            bulk_max_duplicate_streak: DEFAULT_MAX_DUPLICATE_STREAK,
            plausibility_scope: PlausibilityScope::default(),
            brand_rules: None,
        }
    }
}

impl GeneratorConfig {
    pub fn from_lookup<F>(lookup: &F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let body_max_attempts = parse_or(lookup, "BODY_MAX_ATTEMPTS", defaults.body_max_attempts)?;
        if body_max_attempts == 0 {
            bail!("BODY_MAX_ATTEMPTS must be at least 1");
        }

        let selector_max_redraws =
            parse_or(lookup, "SELECTOR_MAX_REDRAWS", defaults.selector_max_redraws)?;

        let expiry = ExpiryPolicy {
            min_years: parse_or(lookup, "EXPIRY_MIN_YEARS", defaults.expiry.min_years)?,
            max_years: parse_or(lookup, "EXPIRY_MAX_YEARS", defaults.expiry.max_years)?,
        };
        if expiry.min_years > expiry.max_years {
            bail!(
                "EXPIRY_MIN_YEARS ({}) must not exceed EXPIRY_MAX_YEARS ({})",
                expiry.min_years,
                expiry.max_years
            );
        }

        let bulk_max_duplicate_streak = parse_or(
            lookup,
            "BULK_MAX_DUPLICATE_STREAK",
            defaults.bulk_max_duplicate_streak,
        )?;

        let plausibility_scope = match lookup("PLAUSIBILITY_SCOPE").as_deref().map(str::trim) {
            None | Some("") | Some("all") => PlausibilityScope::All,
            Some("strict_only") => PlausibilityScope::StrictOnly,
            Some("off") => PlausibilityScope::Off,
            Some(other) => {
                return Err(anyhow!(
                    "PLAUSIBILITY_SCOPE must be 'all', 'strict_only' or 'off', got '{other}'"
                ));
            }
        };

        let brand_rules = match lookup("BRAND_RULES_PATH") {
            Some(path) if !path.trim().is_empty() => Some(load_brand_rules(path.trim())?),
            _ => None,
        };

        Ok(Self {
            body_max_attempts,
            selector_max_redraws,
            expiry,
            bulk_max_duplicate_streak,
            plausibility_scope,
            brand_rules,
        })
    }

    pub fn brand_profile(&self) -> BrandProfile {
        match &self.brand_rules {
            Some(rules) => BrandProfile::new(rules.clone()),
            None => BrandProfile::default(),
        }
    }

    pub fn assembler(&self) -> CardAssembler {
        let bodies = BodySynthesizer {
            scope: self.plausibility_scope,
            max_attempts: self.body_max_attempts,
            ..BodySynthesizer::default()
        };
        CardAssembler::new(self.brand_profile(), bodies, self.expiry)
    }

    pub fn selector(&self) -> BinSelector {
        BinSelector::new(self.selector_max_redraws)
    }

    pub fn bulk_generator(&self, assembler: Arc<CardAssembler>) -> BulkGenerator {
        BulkGenerator::new(assembler, self.bulk_max_duplicate_streak)
    }
}

fn load_brand_rules(path: &str) -> Result<Vec<BrandRule>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read BRAND_RULES_PATH {path}"))?;
    parse_brand_rules(&raw).with_context(|| format!("Invalid brand rules in {path}"))
}

fn parse_brand_rules(raw: &str) -> Result<Vec<BrandRule>> {
    let rules: Vec<BrandRule> = serde_json::from_str(raw).context("expected a JSON array")?;

    for rule in &rules {
        if rule.prefix.is_empty() || !rule.prefix.bytes().all(|b| b.is_ascii_digit()) {
            bail!("rule prefix '{}' must be digits only", rule.prefix);
        }
        if rule.total_length < 2 {
            bail!(
                "rule {} total_length must be at least 2, got {}",
                rule.prefix,
                rule.total_length
            );
        }
    }

    Ok(rules)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::BrandFamily;
    use std::collections::HashMap;

    fn from(vars: &[(&str, &str)]) -> Result<GeneratorConfig> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        GeneratorConfig::from_lookup(&|key: &str| vars.get(key).cloned())
    }

    #[test]
    fn defaults_match_engine_constants() {
        let config = from(&[]).unwrap();
        assert_eq!(config.body_max_attempts, 2000);
        assert_eq!(config.selector_max_redraws, 8);
        assert_eq!(config.expiry, ExpiryPolicy { min_years: 1, max_years: 5 });
        assert_eq!(config.bulk_max_duplicate_streak, 1000);
        assert_eq!(config.plausibility_scope, PlausibilityScope::All);
        assert!(config.brand_rules.is_none());
    }

    #[test]
    fn reads_overrides() {
        let config = from(&[
            ("BODY_MAX_ATTEMPTS", "50"),
            ("EXPIRY_MIN_YEARS", "2"),
            ("EXPIRY_MAX_YEARS", "3"),
            ("PLAUSIBILITY_SCOPE", "strict_only"),
        ])
        .unwrap();
        assert_eq!(config.body_max_attempts, 50);
        assert_eq!(config.expiry, ExpiryPolicy { min_years: 2, max_years: 3 });
        assert_eq!(config.plausibility_scope, PlausibilityScope::StrictOnly);
    }

    #[test]
    fn rejects_inconsistent_values() {
        assert!(from(&[("BODY_MAX_ATTEMPTS", "0")]).is_err());
        assert!(from(&[("EXPIRY_MIN_YEARS", "6")]).is_err());
        assert!(from(&[("PLAUSIBILITY_SCOPE", "some")]).is_err());
        assert!(from(&[("BRAND_RULES_PATH", "/nonexistent/rules.json")]).is_err());
    }

    #[test]
    fn brand_rules_file_format() {
        let rules = parse_brand_rules(
            r#"[{"prefix": "9", "total_length": 19, "security_code_length": 3, "brand": "TESTNET"},
                {"prefix": "34", "total_length": 15, "security_code_length": 4, "family": "strict", "brand": "AMEX"}]"#,
        )
        .unwrap();
        assert_eq!(rules[0].family, BrandFamily::Loose);

        let config = GeneratorConfig {
            brand_rules: Some(rules),
            ..GeneratorConfig::default()
        };
        let profile = config.brand_profile();
        assert_eq!(profile.total_length("912345"), 19);
        assert_eq!(profile.security_code_length("341234"), 4);

        assert!(parse_brand_rules(r#"[{"prefix": "4x", "total_length": 16, "security_code_length": 3, "brand": "X"}]"#).is_err());
        assert!(parse_brand_rules(r#"{"prefix": "4"}"#).is_err());
    }
}
