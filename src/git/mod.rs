pub mod executor;
pub mod repository;
pub mod status;

// Re-export commonly used types
pub use executor::{CommandOutput, CommandRunner, GitCommand, GitExecutor, OutputMode, quote_arg};
pub use repository::{discover_default_dir, is_git_repo};
pub use status::{Cleanliness, cleanliness};
