pub mod backend;
pub mod drag;
pub mod instance;
pub mod viewport;

pub use backend::RenderBackend;
pub use drag::DragSyncController;
pub use instance::MapInstance;
pub use viewport::{ViewportAction, ViewportStateManager};
