pub mod config;
pub mod error;
pub mod logging;
pub mod pagination;
pub mod result;

pub use config::{AppConfig, TimingConfig};
pub use error::BoardError;
pub use pagination::{PageInfo, Pagination};
pub use result::BoardResult;
