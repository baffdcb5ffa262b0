//! Random digit bodies placed between a prefix and its check digit.
//!
//! Digits are always drawn uniformly from the injected source; plausibility
//! is enforced afterwards by rejection, never by biasing the draw.

use crate::engine::brand::BrandFamily;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

pub const DEFAULT_BODY_MAX_ATTEMPTS: usize = 2000;

/// Outcome of [`sample_until`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sampled<T> {
    pub value: T,
    pub attempts: usize,
    pub accepted: bool,
}

/// Draws until `accept` holds or `max_attempts` draws were made. On
/// exhaustion the last (unconstrained) draw is returned with
/// `accepted == false`. At least one draw is always made.
pub fn sample_until<T, R, D, P>(
    rng: &mut R,
    max_attempts: usize,
    mut draw: D,
    accept: P,
) -> Sampled<T>
where
    R: Rng + ?Sized,
    D: FnMut(&mut R) -> T,
    P: Fn(&T) -> bool,
{
    let mut attempts = 1;
    let mut candidate = draw(rng);

    while !accept(&candidate) {
        if attempts >= max_attempts {
            return Sampled {
                value: candidate,
                attempts,
                accepted: false,
            };
        }
        candidate = draw(rng);
        attempts += 1;
    }

    Sampled {
        value: candidate,
        attempts,
        accepted: true,
    }
}

/// `len` independent uniform decimal digits.
pub fn random_digits<R: Rng + ?Sized>(rng: &mut R, len: usize) -> String {
    (0..len)
        .map(|_| char::from(b'0' + rng.random_range(0..10u8)))
        .collect()
}

fn default_blocked_blocks() -> Vec<String> {
    let same_digit = (b'0'..=b'9').flat_map(|d| {
        let c = char::from(d);
        [c.to_string().repeat(3), c.to_string().repeat(4)]
    });
    let ascending = (0u8..=7).map(|start| {
        (start..start + 3)
            .map(|d| char::from(b'0' + d))
            .collect::<String>()
    });
    same_digit.chain(ascending).collect()
}

/// Pattern rules a plausible body has to satisfy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlausibilityConfig {
    /// Reject any run of this many identical consecutive digits.
    pub max_run: usize,
    /// Reject any ascending or descending step-1 run of this length.
    pub max_sequence: usize,
    /// Number of trailing digits checked against `blocked_blocks`.
    pub tail_window: usize,
    pub blocked_blocks: Vec<String>,
    pub forbidden_suffix: String,
}

impl PlausibilityConfig {
    pub fn strict() -> Self {
        Self {
            max_run: 3,
            max_sequence: 4,
            tail_window: 6,
            blocked_blocks: default_blocked_blocks(),
            forbidden_suffix: "0000".to_string(),
        }
    }

    pub fn loose() -> Self {
        Self {
            max_run: 4,
            max_sequence: 5,
            ..Self::strict()
        }
    }

    pub fn is_plausible(&self, body: &str) -> bool {
        let bytes = body.as_bytes();

        if bytes.first() == Some(&b'0') {
            return false;
        }
        if self.max_run >= 2 && longest_run(bytes) >= self.max_run {
            return false;
        }
        if self.max_sequence >= 2 && longest_step_run(bytes) >= self.max_sequence {
            return false;
        }

        let tail = &body[body.len().saturating_sub(self.tail_window)..];
        if self
            .blocked_blocks
            .iter()
            .any(|block| !block.is_empty() && tail.contains(block.as_str()))
        {
            return false;
        }

        self.forbidden_suffix.is_empty() || !body.ends_with(&self.forbidden_suffix)
    }
}

fn longest_run(bytes: &[u8]) -> usize {
    let mut longest = usize::from(!bytes.is_empty());
    let mut current = longest;
    for pair in bytes.windows(2) {
        current = if pair[0] == pair[1] { current + 1 } else { 1 };
        longest = longest.max(current);
    }
    longest
}

/// Longest run where each digit is one above (or one below) the previous.
fn longest_step_run(bytes: &[u8]) -> usize {
    let mut longest = usize::from(!bytes.is_empty());
    let (mut up, mut down) = (longest, longest);
    for pair in bytes.windows(2) {
        let (a, b) = (i16::from(pair[0]), i16::from(pair[1]));
        up = if b - a == 1 { up + 1 } else { 1 };
        down = if a - b == 1 { down + 1 } else { 1 };
        longest = longest.max(up).max(down);
    }
    longest
}

/// Which brand families get plausibility filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PlausibilityScope {
    #[default]
    All,
    StrictOnly,
    Off,
}

#[derive(Debug, Clone)]
pub struct BodySynthesizer {
    pub scope: PlausibilityScope,
    pub strict: PlausibilityConfig,
    pub loose: PlausibilityConfig,
    pub max_attempts: usize,
}

impl Default for BodySynthesizer {
    fn default() -> Self {
        Self {
            scope: PlausibilityScope::default(),
            strict: PlausibilityConfig::strict(),
            loose: PlausibilityConfig::loose(),
            max_attempts: DEFAULT_BODY_MAX_ATTEMPTS,
        }
    }
}

impl BodySynthesizer {
    pub fn config_for(&self, family: BrandFamily) -> Option<&PlausibilityConfig> {
        match (self.scope, family) {
            (PlausibilityScope::Off, _) => None,
            (PlausibilityScope::StrictOnly, BrandFamily::Loose) => None,
            (_, BrandFamily::Strict) => Some(&self.strict),
            (_, BrandFamily::Loose) => Some(&self.loose),
        }
    }

    pub fn plain<R: Rng + ?Sized>(&self, len: usize, rng: &mut R) -> String {
        random_digits(rng, len)
    }

    pub fn plausible<R: Rng + ?Sized>(
        &self,
        len: usize,
        config: &PlausibilityConfig,
        rng: &mut R,
    ) -> Sampled<String> {
        let sampled = sample_until(
            rng,
            self.max_attempts,
            |rng| random_digits(rng, len),
            |body| config.is_plausible(body),
        );
        if !sampled.accepted {
            debug!(
                "body of length {len} still implausible after {} attempts, using last draw",
                sampled.attempts
            );
        }
        sampled
    }

    /// Body for a brand family, plausible or plain depending on scope.
    pub fn synthesize<R: Rng + ?Sized>(
        &self,
        len: usize,
        family: BrandFamily,
        rng: &mut R,
    ) -> String {
        match self.config_for(family) {
            Some(config) => self.plausible(len, config, rng).value,
            None => self.plain(len, rng),
        }
    }
}
