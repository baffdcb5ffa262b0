mod bin;
mod card;

pub use self::bin::{UploadBinsRequest, UploadMode};
pub use self::card::{
    BulkGenerateRequest, GenerateCardRequest, GenerateStrategy, MAX_BULK_PREFIXES, OutputFormat,
};
