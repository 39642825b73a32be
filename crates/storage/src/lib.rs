#![forbid(unsafe_code)]

pub mod http;
pub mod repository;

pub use http::{ApiConfig, HttpInitError, HttpRepository};
pub use repository::{
    AttemptRepository, AuthRepository, Credentials, InMemoryRepository, SessionStatus, Storage,
    StorageError,
};
