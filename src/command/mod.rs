mod create;
mod version;

pub use create::run_create;
pub use version::run_version;
