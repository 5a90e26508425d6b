pub mod api;
pub mod config;
pub mod errors;
pub mod live;
pub mod middlewares;
pub mod planner;
pub mod reports;
pub mod state;

pub use errors::TransitError;
pub use planner::_structs::*;
pub use state::AppState;
