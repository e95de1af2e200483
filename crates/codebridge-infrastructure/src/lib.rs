pub mod paths;
pub mod secret_service;
pub mod storage;

pub use crate::paths::CodebridgePaths;
pub use crate::secret_service::SecretServiceImpl;
pub use crate::storage::{ConfigStorage, SecretStorage};
