mod generate;

pub use self::generate::CardGenerateService;
