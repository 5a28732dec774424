pub mod settings;

pub use settings::{AuditConfig, BehaviorConfig, CommitConfig, Config, ConfigError};
