use std::sync::Arc;
use tracing::info;

use crate::config::AppConfig;
use crate::live::LiveLocationSimulator;
use crate::planner::_structs::{Route, Stop};
use crate::planner::data_loader::{DataLoader, LoaderError};
use crate::planner::route_catalog::RouteCatalog;
use crate::planner::stop_index::StopIndex;
use crate::planner::{RecommendationEngine, RouteSelector};
use crate::reports::ReportLog;

/// Estado compartido por todos los workers del servidor.
pub struct AppState {
    pub stops: Arc<StopIndex>,
    pub routes: Arc<RouteCatalog>,
    pub engine: RecommendationEngine,
    pub simulator: LiveLocationSimulator,
    pub reports: ReportLog,
}

impl AppState {
    /// Carga los datos estáticos del directorio configurado
    pub fn load(config: &AppConfig) -> Result<Self, LoaderError> {
        let mut loader = DataLoader::new(&config.data.dir);
        loader.load_all()?;
        let (stops, routes) = loader.into_parts();
        Ok(Self::from_parts(stops, routes, config))
    }

    pub fn from_parts(stops: Vec<Stop>, routes: Vec<Route>, config: &AppConfig) -> Self {
        let stops = Arc::new(StopIndex::new(stops));
        let routes = Arc::new(RouteCatalog::new(routes));

        let engine =
            RecommendationEngine::new(stops.clone(), routes.clone(), Some(config.planning()));
        let simulation = Some(config.simulation());
        let simulator = match config.simulation.seed {
            Some(seed) => {
                info!("Live location simulation seeded with {}", seed);
                LiveLocationSimulator::with_seed(stops.clone(), routes.clone(), seed, simulation)
            }
            None => LiveLocationSimulator::new(stops.clone(), routes.clone(), simulation),
        };

        Self {
            stops,
            routes,
            engine,
            simulator,
            reports: ReportLog::new(config.reports.visibility_window_ms),
        }
    }

    /// Reemplaza la estrategia de selección de rutas (p. ej. en pruebas)
    pub fn with_selector(mut self, selector: Box<dyn RouteSelector>, config: &AppConfig) -> Self {
        self.engine = RecommendationEngine::with_selector(
            self.stops.clone(),
            self.routes.clone(),
            selector,
            Some(config.planning()),
        );
        self
    }
}
