pub mod board_storage;
pub mod serialization;
pub mod store;
pub mod traits;

pub use board_storage::{BoardStorage, COLUMNS_ORDER_KEY, TASKS_KEY, USERS_KEY};
pub use serialization::*;
pub use store::*;
pub use traits::*;
