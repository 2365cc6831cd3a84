pub mod api_error;
pub mod controller;
pub mod responses;
pub mod server_config;
pub mod starter_controller;
pub mod web_server;

pub use api_error::{ApiError, ApiResult};
pub use controller::SnakeController;
pub use server_config::ServerConfig;
pub use starter_controller::StarterController;
pub use web_server::{ShutdownHandle, SnakeServer, WebServerState, router};
