//! Configuration module.
//!
//! Two unrelated concerns share this module: the effective facet/feature/
//! metadata lists resolved from server app-data ([`resolver`]), and the
//! application's own settings file ([`loader`]).

pub mod loader;
pub mod resolver;

pub use loader::{
    apply_cli_overrides, apply_env_overrides, default_config_path, default_log_path,
    load_app_data, load_config_file, load_config_with_precedence, merge_config, ConfigError,
    ConfigFile, ResolvedConfig,
};
pub use resolver::{AppData, ConfigCategory, ConfigResolver, ConfigSource, DefaultConfig};
