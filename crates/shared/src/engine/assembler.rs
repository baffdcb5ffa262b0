use crate::{
    engine::{
        body::{BodySynthesizer, random_digits},
        brand::BrandProfile,
        checksum,
    },
    errors::GenerateError,
    model::card::GeneratedCard,
};
use chrono::{Datelike, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Expiry is `min_years..=max_years` after the generation year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpiryPolicy {
    pub min_years: u32,
    pub max_years: u32,
}

impl Default for ExpiryPolicy {
    fn default() -> Self {
        Self {
            min_years: 1,
            max_years: 5,
        }
    }
}

impl ExpiryPolicy {
    fn bounds(&self) -> (u32, u32) {
        (
            self.min_years.min(self.max_years),
            self.min_years.max(self.max_years),
        )
    }
}

#[derive(Debug, Clone, Default)]
pub struct CardAssembler {
    brands: BrandProfile,
    bodies: BodySynthesizer,
    expiry: ExpiryPolicy,
}

impl CardAssembler {
    pub fn new(brands: BrandProfile, bodies: BodySynthesizer, expiry: ExpiryPolicy) -> Self {
        Self {
            brands,
            bodies,
            expiry,
        }
    }

    pub fn assemble<R: Rng + ?Sized>(
        &self,
        prefix: &str,
        rng: &mut R,
    ) -> Result<GeneratedCard, GenerateError> {
        self.assemble_in_year(prefix, Utc::now().year(), rng)
    }

    /// Builds one card with expiry relative to `current_year`.
    pub fn assemble_in_year<R: Rng + ?Sized>(
        &self,
        prefix: &str,
        current_year: i32,
        rng: &mut R,
    ) -> Result<GeneratedCard, GenerateError> {
        if prefix.is_empty() || !prefix.bytes().all(|b| b.is_ascii_digit()) {
            return Err(GenerateError::invalid_prefix(prefix, "must be digits only"));
        }

        let brand = self.brands.resolve(prefix);
        if prefix.len() >= brand.total_length {
            return Err(GenerateError::PrefixTooLong {
                prefix: prefix.to_string(),
                total_length: brand.total_length,
            });
        }

        let body_len = brand.total_length - prefix.len() - 1;
        let body = self.bodies.synthesize(body_len, brand.family, rng);

        let mut partial = String::with_capacity(brand.total_length);
        partial.push_str(prefix);
        partial.push_str(&body);
        let identifier = checksum::append_check_digit(&partial)
            .ok_or_else(|| GenerateError::invalid_prefix(prefix, "must be digits only"))?;

        let month = rng.random_range(1..=12u32);
        let (min_years, max_years) = self.expiry.bounds();
        let offset = rng.random_range(min_years..=max_years);
        let year = (i64::from(current_year) + i64::from(offset)).rem_euclid(100);

        let security_code = random_digits(rng, brand.security_code_length);

        Ok(GeneratedCard {
            identifier,
            expiry_month: format!("{month:02}"),
            expiry_year: format!("{year:02}"),
            security_code,
            source_prefix: prefix.to_string(),
            brand: brand.brand.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::checksum::is_valid;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::HashSet;

    fn seeded_rng() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    #[test]
    fn visa_prefix_yields_sixteen_valid_digits() {
        let assembler = CardAssembler::default();
        let mut rng = seeded_rng();
        for _ in 0..1_000 {
            let card = assembler.assemble("4111", &mut rng).unwrap();
            assert_eq!(card.identifier.len(), 16);
            assert!(card.identifier.starts_with("4111"));
            assert!(is_valid(&card.identifier), "{}", card.identifier);
            assert_eq!(card.security_code.len(), 3);
            assert!(card.security_code.chars().all(|c| c.is_ascii_digit()));
            assert_eq!(card.source_prefix, "4111");
            assert_eq!(card.brand, "VISA");
        }
    }

    #[test]
    fn amex_prefix_yields_fifteen_digits_and_four_digit_code() {
        let assembler = CardAssembler::default();
        let mut rng = seeded_rng();
        let card = assembler.assemble("378282", &mut rng).unwrap();
        assert_eq!(card.identifier.len(), 15);
        assert!(is_valid(&card.identifier));
        assert_eq!(card.security_code.len(), 4);
    }

    #[test]
    fn prefix_at_total_length_is_too_long() {
        let assembler = CardAssembler::default();
        let mut rng = seeded_rng();
        assert_eq!(
            assembler.assemble("371234567890123", &mut rng),
            Err(GenerateError::PrefixTooLong {
                prefix: "371234567890123".into(),
                total_length: 15,
            })
        );
    }

    #[test]
    fn prefix_one_short_of_total_length_gets_only_a_check_digit() {
        let assembler = CardAssembler::default();
        let mut rng = seeded_rng();
        let card = assembler.assemble("37123456789012", &mut rng).unwrap();
        assert_eq!(card.identifier.len(), 15);
        assert!(card.identifier.starts_with("37123456789012"));
        assert!(is_valid(&card.identifier));
    }

    #[test]
    fn non_digit_prefix_is_rejected() {
        let assembler = CardAssembler::default();
        let mut rng = seeded_rng();
        assert!(matches!(
            assembler.assemble("41x1", &mut rng),
            Err(GenerateError::InvalidPrefix { .. })
        ));
        assert!(matches!(
            assembler.assemble("", &mut rng),
            Err(GenerateError::InvalidPrefix { .. })
        ));
    }

    #[test]
    fn expiry_stays_in_range() {
        let assembler = CardAssembler::default();
        let mut rng = seeded_rng();
        let mut months = HashSet::new();
        let mut years = HashSet::new();
        for _ in 0..2_000 {
            let card = assembler.assemble_in_year("411111", 2026, &mut rng).unwrap();
            months.insert(card.expiry_month);
            years.insert(card.expiry_year);
        }
        let expected_months: HashSet<String> = (1..=12).map(|m| format!("{m:02}")).collect();
        let expected_years: HashSet<String> =
            ["27", "28", "29", "30", "31"].map(String::from).into();
        assert_eq!(months, expected_months);
        assert_eq!(years, expected_years);
    }

    #[test]
    fn expiry_year_wraps_at_century() {
        let assembler = CardAssembler::default();
        let mut rng = seeded_rng();
        let mut years = HashSet::new();
        for _ in 0..500 {
            let card = assembler.assemble_in_year("411111", 2098, &mut rng).unwrap();
            years.insert(card.expiry_year);
        }
        let expected: HashSet<String> = ["99", "00", "01", "02", "03"].map(String::from).into();
        assert_eq!(years, expected);
    }

    #[test]
    fn same_seed_same_card() {
        let assembler = CardAssembler::default();
        let a = assembler
            .assemble_in_year("510510", 2026, &mut StdRng::seed_from_u64(9))
            .unwrap();
        let b = assembler
            .assemble_in_year("510510", 2026, &mut StdRng::seed_from_u64(9))
            .unwrap();
        assert_eq!(a, b);
    }
}
