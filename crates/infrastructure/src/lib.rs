//! Infrastructure adapters for application ports.

#![forbid(unsafe_code)]

mod directory_user_source;
mod in_memory_repository;
mod seed;
mod system_clock;

pub use directory_user_source::DirectoryUserSource;
pub use in_memory_repository::InMemoryRepository;
pub use seed::{SeedData, seed_repository};
pub use system_clock::SystemClock;
