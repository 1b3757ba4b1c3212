//! Resolver settings, read from `.i18n-resolver.json` at a workspace root.
/// Config file loader
mod loader;
/// Configuration manager
mod manager;
/// Translation file pattern matcher
mod matcher;
/// Configuration types and settings
mod types;

pub use loader::CONFIG_FILE_NAME;
pub use manager::ConfigManager;
pub use matcher::{
    FileMatcher,
    MatcherError,
};
pub use types::{
    ConfigError,
    FallbacksConfig,
    ReadStrategyKind,
    ResolverSettings,
    TranslationFilesConfig,
    ValidationError,
};
