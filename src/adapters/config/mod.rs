mod live;

pub use live::{AlertSettings, LiveConfig};
