pub mod endpoint;
pub mod spec;
pub mod types;

pub use endpoint::*;
pub use spec::*;
pub use types::*;
