pub mod config_service;
pub mod fcm_gateway;
pub mod json_dir_store;
pub mod memory_store;
pub mod paths;
pub mod storage;

pub use crate::config_service::ConfigService;
pub use crate::fcm_gateway::FcmHttpGateway;
pub use crate::json_dir_store::JsonDirDocumentStore;
pub use crate::memory_store::InMemoryDocumentStore;
pub use crate::paths::MercadoPaths;
