//! Configuration loading: the merged config file and roundtable discovery

pub mod file_config;
pub mod loader;
pub mod roundtable_loader;

pub use file_config::{
    FileConfig, FileDefaultsConfig, FileLoggingConfig, FileOutputConfig, FileOutputFormat,
    FileProviderConfig, FileRoundtablesConfig,
};
pub use loader::ConfigLoader;
pub use roundtable_loader::{RoundtableLoadError, RoundtableLoader};
