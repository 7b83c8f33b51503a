pub mod config_source;
pub mod host_source;
pub mod stat_source;
pub mod state_store;

pub use config_source::ConfigSource;
pub use host_source::HostSource;
pub use stat_source::{FsStats, StatSource};
pub use state_store::{StateReader, StateStore};
