pub mod config;
pub mod host;
pub mod statvfs;
pub mod store;

pub use config::{AlertSettings, LiveConfig};
pub use host::ProcessHostSource;
pub use statvfs::{FnStatSource, StatvfsSource};
pub use store::MemoryStateStore;
