pub mod memory;
pub mod user;

pub use memory::InMemoryUserStore;
pub use user::{DbUserStore, UserStore};
