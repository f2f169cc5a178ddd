pub mod access_code;
pub mod config;
pub mod handlers;
pub mod pages;
pub mod router;
pub mod state;

pub use config::{Environment, Settings, load_settings};
pub use pages::{PageContext, Pages};
pub use router::create_router;
pub use state::{AppState, StartupError};
