pub mod app;
pub mod auth;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod program;
pub mod progress;
pub mod session;
pub mod state;
pub mod storage;
pub mod summary;
pub mod ui;

pub use app::router;
pub use session::{Intent, Session};
pub use state::AppState;
pub use storage::{load_store, resolve_data_path};
