pub mod conversion;
pub mod types;

pub use conversion::*;
pub use types::*;
