pub mod errors;
pub mod mongo;
pub mod repository;
pub mod service;

pub use repository::ProductRepository;
pub use service::ProductService;
