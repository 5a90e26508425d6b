use std::sync::Arc;
use tracing::{debug, info};

use super::{
    _structs::{Coordinate, RouteRecommendation},
    geo_math::distance_km,
    route_catalog::RouteCatalog,
    selector::{RandomRouteSelector, RouteSelector},
    stop_index::StopIndex,
};
use crate::errors::TransitError;

#[derive(Debug, Clone)]
pub struct PlanningConfig {
    pub average_speed_kmh: f64, // velocidad media supuesta en línea recta
}

impl Default for PlanningConfig {
    fn default() -> Self {
        Self {
            average_speed_kmh: 30.0,
        }
    }
}

pub struct RecommendationEngine {
    config: PlanningConfig,
    stops: Arc<StopIndex>,
    routes: Arc<RouteCatalog>,
    selector: Box<dyn RouteSelector>,
}

impl RecommendationEngine {
    pub fn new(
        stops: Arc<StopIndex>,
        routes: Arc<RouteCatalog>,
        config: Option<PlanningConfig>,
    ) -> Self {
        Self::with_selector(stops, routes, Box::new(RandomRouteSelector), config)
    }

    pub fn with_selector(
        stops: Arc<StopIndex>,
        routes: Arc<RouteCatalog>,
        selector: Box<dyn RouteSelector>,
        config: Option<PlanningConfig>,
    ) -> Self {
        Self {
            config: config.unwrap_or_default(),
            stops,
            routes,
            selector,
        }
    }

    /// Recomienda una ruta entre dos puntos
    pub fn recommend(
        &self,
        start: Coordinate,
        end: Coordinate,
    ) -> Result<RouteRecommendation, TransitError> {
        // 1. Paradas más cercanas al origen y al destino
        let start_stop = self.stops.nearest(start)?;
        let end_stop = self.stops.nearest(end)?;

        // 2. Selección de ruta (estrategia inyectada)
        let route = self
            .selector
            .select(self.routes.all())
            .ok_or(TransitError::EmptyCatalog)?;

        // 3. Duración estimada en línea recta
        let estimated_duration_minutes = self.estimate_minutes(start, end);

        info!(
            "Recommended route {} from stop {} to stop {} (~{} min)",
            route.id, start_stop.id, end_stop.id, estimated_duration_minutes
        );

        Ok(RouteRecommendation {
            route: route.clone(),
            start_stop: start_stop.clone(),
            end_stop: end_stop.clone(),
            estimated_duration_minutes,
        })
    }

    fn estimate_minutes(&self, start: Coordinate, end: Coordinate) -> u32 {
        let distance = distance_km(start, end);
        let minutes = distance / self.config.average_speed_kmh * 60.0;
        debug!("Straight-line distance {:.3} km -> {:.2} min", distance, minutes);
        minutes.round() as u32
    }

    pub fn config(&self) -> &PlanningConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::planner::_structs::{Route, Stop};
    use crate::planner::selector::SeededRouteSelector;

    struct FirstRouteSelector;

    impl RouteSelector for FirstRouteSelector {
        fn select<'a>(&self, routes: &'a [Route]) -> Option<&'a Route> {
            routes.first()
        }
    }

    fn stops() -> Vec<Stop> {
        vec![
            Stop {
                id: "A".into(),
                name: "Nyabugogo".into(),
                position: Coordinate::new(-1.9534, 30.0616),
            },
            Stop {
                id: "B".into(),
                name: "Remera".into(),
                position: Coordinate::new(-1.9686, 30.1344),
            },
        ]
    }

    fn routes() -> Vec<Route> {
        vec![
            Route {
                id: "101".into(),
                short_name: "101".into(),
                long_name: "Nyabugogo - Remera".into(),
                color_hex: "#E53935".into(),
            },
            Route {
                id: "102".into(),
                short_name: "102".into(),
                long_name: "Nyabugogo - Kicukiro".into(),
                color_hex: "#43A047".into(),
            },
        ]
    }

    fn engine(stops: Vec<Stop>, routes: Vec<Route>) -> RecommendationEngine {
        RecommendationEngine::with_selector(
            Arc::new(StopIndex::new(stops)),
            Arc::new(RouteCatalog::new(routes)),
            Box::new(FirstRouteSelector),
            None,
        )
    }

    #[test]
    fn test_recommend_resolves_boundary_stops() {
        let engine = engine(stops(), routes());
        let start = Coordinate::new(-1.9530, 30.0620);
        let end = Coordinate::new(-1.9690, 30.1340);

        let rec = engine.recommend(start, end).unwrap();
        assert_eq!(rec.route.id, "101");
        assert_eq!(rec.start_stop.id, "A");
        assert_eq!(rec.end_stop.id, "B");

        let expected = (distance_km(start, end) / 30.0 * 60.0).round() as u32;
        assert_eq!(rec.estimated_duration_minutes, expected);
        assert_eq!(rec.estimated_duration_minutes, 16);
    }

    #[test]
    fn test_same_start_and_end_is_zero_minutes() {
        let engine = engine(stops(), routes());
        let point = Coordinate::new(-1.95, 30.1);
        let rec = engine.recommend(point, point).unwrap();
        assert_eq!(rec.estimated_duration_minutes, 0);
        assert_eq!(rec.start_stop, rec.end_stop);
    }

    #[test]
    fn test_empty_catalog() {
        let engine = engine(stops(), vec![]);
        let result = engine.recommend(Coordinate::new(0.0, 0.0), Coordinate::new(1.0, 1.0));
        assert!(matches!(result, Err(TransitError::EmptyCatalog)));
    }

    #[test]
    fn test_empty_index() {
        let result = engine(vec![], routes())
            .recommend(Coordinate::new(0.0, 0.0), Coordinate::new(1.0, 1.0));
        assert!(matches!(result, Err(TransitError::EmptyIndex)));

        // sin paradas ni rutas, EmptyIndex se detecta primero
        let result = engine(vec![], vec![])
            .recommend(Coordinate::new(0.0, 0.0), Coordinate::new(1.0, 1.0));
        assert!(matches!(result, Err(TransitError::EmptyIndex)));
    }

    #[test]
    fn test_antipodal_trip_duration() {
        let engine = engine(stops(), routes());
        let rec = engine
            .recommend(Coordinate::new(8.0, 10.0), Coordinate::new(-8.0, -170.0))
            .unwrap();
        // ~20015 km a 30 km/h
        let expected = (std::f64::consts::PI * 6371.0 / 30.0 * 60.0).round() as u32;
        assert_eq!(rec.estimated_duration_minutes, expected);
        assert!((40025..=40035).contains(&rec.estimated_duration_minutes));
    }

    #[test]
    fn test_custom_speed() {
        let engine = RecommendationEngine::with_selector(
            Arc::new(StopIndex::new(stops())),
            Arc::new(RouteCatalog::new(routes())),
            Box::new(SeededRouteSelector::new(1)),
            Some(PlanningConfig {
                average_speed_kmh: 60.0,
            }),
        );
        // 1 grado de latitud ~ 111.195 km -> 111.195 min a 60 km/h
        let rec = engine
            .recommend(Coordinate::new(0.0, 0.0), Coordinate::new(1.0, 0.0))
            .unwrap();
        assert_eq!(rec.estimated_duration_minutes, 111);
        assert!(routes().contains(&rec.route));
    }
}
