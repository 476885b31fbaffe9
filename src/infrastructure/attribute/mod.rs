//! Tag and ingredient infrastructure

mod postgres_repository;
mod repository;
mod service;

pub use postgres_repository::PostgresAttributeRepository;
pub use repository::InMemoryAttributeRepository;
pub use service::AttributeService;
