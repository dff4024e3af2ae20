pub mod settings;

pub use settings::{AppConfig, CorsConfig, FilesConfig, ServerConfig};
