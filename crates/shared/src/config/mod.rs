mod generator;
mod myconfig;

pub use self::generator::GeneratorConfig;
pub use self::myconfig::Config;
