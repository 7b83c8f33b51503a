mod memory;

pub use memory::MemoryStateStore;
