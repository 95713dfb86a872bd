pub mod domain;
pub mod errors;
pub mod mongo;
pub mod password;
pub mod repository;
pub mod service;
pub mod token;

pub use repository::UserRepository;
pub use service::AuthService;
