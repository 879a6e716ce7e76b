pub mod board;
pub mod dashboard;
pub mod drag;
pub mod task;
pub mod user;
