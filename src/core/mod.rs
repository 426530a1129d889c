// src/core/mod.rs
//! Collaborators of the editor: the remote resume service, local file
//! saving and configuration

pub mod collaborators;
pub mod config_manager;
pub mod file_sink;
pub mod service_client;

pub use collaborators::{FileSink, ResumeApi};
pub use config_manager::ConfigManager;
pub use file_sink::DirectorySink;
pub use service_client::ServiceClient;
