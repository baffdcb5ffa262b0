//! Card synthesis core: checksum, brand inference, body sampling, assembly,
//! BIN selection and bulk generation. Everything here is synchronous and
//! takes its randomness as an explicit `Rng` argument.

pub mod active_set;
pub mod assembler;
pub mod body;
pub mod brand;
pub mod bulk;
pub mod checksum;
pub mod selector;

pub use self::active_set::ActiveSet;
pub use self::assembler::{CardAssembler, ExpiryPolicy};
pub use self::body::{BodySynthesizer, PlausibilityConfig, PlausibilityScope, Sampled, sample_until};
pub use self::brand::{BrandFamily, BrandMatch, BrandProfile, BrandRule};
pub use self::bulk::BulkGenerator;
pub use self::selector::{BinSelector, Selection, SelectionCursor, SelectionStrategy};
