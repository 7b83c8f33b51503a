mod process;

pub use process::ProcessHostSource;
