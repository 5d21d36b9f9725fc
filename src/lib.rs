// Public modules
pub mod api;
pub mod config;
pub mod constructs;
pub mod loader;
pub mod project;
pub mod session;

// Re-export commonly used items
pub use api::projects::{DeployOptions, ProjectsApi, DEFAULT_API_VERSION};
pub use api::{ApiClient, ApiError};
pub use config::{
    load_config, load_config_with_env, Config, EnvironmentProvider, MockEnvironment,
    SystemEnvironment,
};
pub use constructs::*;
pub use loader::load_project;
pub use project::{Project, ProjectSummary};
pub use session::{CheckDefaults, Session};
