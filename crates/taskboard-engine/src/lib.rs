pub mod cache;
pub mod client;
pub mod engine;
pub mod gateway;
pub mod notification;
pub mod services;

pub use cache::{QueryCache, QueryKey};
pub use client::QueryClient;
pub use engine::{
    ActiveDrag, BoardEngine, BoardView, ColumnView, DragEvent, DragPayload, DragSubject, Generation,
};
pub use gateway::{MockGateway, RemoteGateway};
pub use notification::Notification;
pub use services::BoardServices;
