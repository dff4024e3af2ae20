pub mod models;
pub mod name;
pub mod service;

pub use models::StoredFile;
pub use name::SafeName;
pub use service::FileRegistry;
