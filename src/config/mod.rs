mod loader;
mod model;
mod validation;

pub use loader::{
    ConfigLoader, FileConfigLoader, FileSystem, LOCAL_CONFIG_NAME, LoadResult, RealFileSystem,
};
pub use model::{
    CONFIG_VERSION, Config, CustomRule, DEFAULT_MAX_FILE_SIZE, MatchMode, RulesConfig,
    ScannerConfig,
};
pub use validation::validate_config_semantics;
