mod function;
mod system;

pub use function::FnStatSource;
pub use system::StatvfsSource;
