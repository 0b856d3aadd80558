mod loader;
mod model;
mod validation;

pub use loader::{
    ConfigLoader, FileConfigLoader, FileSystem, LOCAL_CONFIG_NAME, LoadResult, RealFileSystem,
    parse_config,
};
pub use model::{CONFIG_VERSION, Config, DEFAULT_MAX_LINE_WIDTH, FilesConfig, HeuristicsConfig};
pub use validation::validate_config_semantics;

#[cfg(test)]
#[path = "model_tests.rs"]
mod tests;
