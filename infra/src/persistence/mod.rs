//! Persistence adapters

pub mod memory_user_repository;
pub mod policy;


pub use memory_user_repository::InMemoryUserRepository;
