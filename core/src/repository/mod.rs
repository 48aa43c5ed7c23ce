pub mod file;
pub mod macro_repository;
pub mod memory;
pub mod traits;

// Re-export
pub use file::FileStore;
pub use macro_repository::{MacroRepository, BUDGET_KEY, ENTRIES_KEY};
pub use memory::MemoryStore;
pub use traits::KeyValueStore;
