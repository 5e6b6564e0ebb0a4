// Storage adapters implementing the StorageClient required port

pub mod memory;
pub mod file;

pub use memory::MemoryStorage;
pub use file::FileStorage;
