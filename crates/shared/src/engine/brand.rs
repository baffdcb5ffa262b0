use serde::{Deserialize, Serialize};

pub const DEFAULT_TOTAL_LENGTH: usize = 16;
pub const DEFAULT_SECURITY_CODE_LENGTH: usize = 3;
pub const UNKNOWN_BRAND: &str = "UNKNOWN";

/// Plausibility strictness bucket a brand belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum BrandFamily {
    Strict,
    #[default]
    Loose,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrandRule {
    pub prefix: String,
    pub total_length: usize,
    pub security_code_length: usize,
    #[serde(default)]
    pub family: BrandFamily,
    pub brand: String,
}

impl BrandRule {
    pub fn new(
        prefix: &str,
        total_length: usize,
        security_code_length: usize,
        family: BrandFamily,
        brand: &str,
    ) -> Self {
        Self {
            prefix: prefix.to_string(),
            total_length,
            security_code_length,
            family,
            brand: brand.to_string(),
        }
    }
}

/// Result of resolving a prefix against the rule table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BrandMatch<'a> {
    pub total_length: usize,
    pub security_code_length: usize,
    pub family: BrandFamily,
    pub brand: &'a str,
}

impl BrandMatch<'_> {
    pub fn brand_hint(&self) -> String {
        format!("{} (test)", self.brand)
    }
}

/// Longest-prefix-match table from leading digits to card shape.
#[derive(Debug, Clone)]
pub struct BrandProfile {
    rules: Vec<BrandRule>,
}

impl BrandProfile {
    pub fn new(mut rules: Vec<BrandRule>) -> Self {
        // Longest keys first so the first hit is the longest match.
        rules.sort_by(|a, b| b.prefix.len().cmp(&a.prefix.len()));
        Self { rules }
    }

    pub fn resolve(&self, prefix: &str) -> BrandMatch<'_> {
        match self.rules.iter().find(|r| prefix.starts_with(&r.prefix)) {
            Some(rule) => BrandMatch {
                total_length: rule.total_length,
                security_code_length: rule.security_code_length,
                family: rule.family,
                brand: &rule.brand,
            },
            None => BrandMatch {
                total_length: DEFAULT_TOTAL_LENGTH,
                security_code_length: DEFAULT_SECURITY_CODE_LENGTH,
                family: BrandFamily::default(),
                brand: UNKNOWN_BRAND,
            },
        }
    }

    pub fn total_length(&self, prefix: &str) -> usize {
        self.resolve(prefix).total_length
    }

    pub fn security_code_length(&self, prefix: &str) -> usize {
        self.resolve(prefix).security_code_length
    }
}

impl Default for BrandProfile {
    fn default() -> Self {
        use BrandFamily::{Loose, Strict};

        let mut rules = vec![
            BrandRule::new("34", 15, 4, Strict, "AMEX"),
            BrandRule::new("37", 15, 4, Strict, "AMEX"),
            BrandRule::new("4", 16, 3, Loose, "VISA"),
            BrandRule::new("2", 16, 3, Loose, "MASTERCARD"),
            BrandRule::new("6011", 16, 3, Loose, "DISCOVER"),
            BrandRule::new("65", 16, 3, Loose, "DISCOVER"),
        ];
        rules.extend(
            (51..=55).map(|p| BrandRule::new(&p.to_string(), 16, 3, Loose, "MASTERCARD")),
        );

        Self::new(rules)
    }
}
