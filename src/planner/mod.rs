pub mod _structs;
pub mod data_loader;
pub mod geo_math;
pub mod index;
pub mod route_catalog;
pub mod selector;
pub mod stop_index;

pub use index::{PlanningConfig, RecommendationEngine};
pub use selector::{RandomRouteSelector, RouteSelector, SeededRouteSelector};
