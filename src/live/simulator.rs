use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{debug, info};

use crate::errors::TransitError;
use crate::planner::_structs::{Coordinate, LiveLocation};
use crate::planner::route_catalog::RouteCatalog;
use crate::planner::stop_index::StopIndex;

#[derive(Debug, Clone)]
pub struct SimulationConfig {
    pub jitter_degrees: f64, // semiamplitud de la perturbación por eje
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            jitter_degrees: 0.0005,
        }
    }
}

struct SimulationState {
    positions: HashMap<String, Coordinate>,
    rng: StdRng,
}

/// Posiciones simuladas de vehículos, una por ruta.
///
/// Una ruta sin entrada arranca en una parada elegida al azar; en cada
/// consulta posterior su posición se desplaza ligeramente en ambos ejes.
/// El mapa y el RNG viven tras un único `Mutex` que se toma por ruta.
pub struct LiveLocationSimulator {
    config: SimulationConfig,
    stops: Arc<StopIndex>,
    routes: Arc<RouteCatalog>,
    state: Mutex<SimulationState>,
}

impl LiveLocationSimulator {
    pub fn new(
        stops: Arc<StopIndex>,
        routes: Arc<RouteCatalog>,
        config: Option<SimulationConfig>,
    ) -> Self {
        Self::with_rng(stops, routes, StdRng::from_os_rng(), config)
    }

    /// Simulación reproducible a partir de una semilla
    pub fn with_seed(
        stops: Arc<StopIndex>,
        routes: Arc<RouteCatalog>,
        seed: u64,
        config: Option<SimulationConfig>,
    ) -> Self {
        Self::with_rng(stops, routes, StdRng::seed_from_u64(seed), config)
    }

    fn with_rng(
        stops: Arc<StopIndex>,
        routes: Arc<RouteCatalog>,
        rng: StdRng,
        config: Option<SimulationConfig>,
    ) -> Self {
        Self {
            config: config.unwrap_or_default(),
            stops,
            routes,
            state: Mutex::new(SimulationState {
                positions: HashMap::new(),
                rng,
            }),
        }
    }

    fn lock_state(&self) -> MutexGuard<'_, SimulationState> {
        // cada sección crítica deja el estado consistente
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Avanza la posición de una ruta y la devuelve
    pub(crate) fn poll(&self, route_id: &str) -> Result<Coordinate, TransitError> {
        let mut guard = self.lock_state();
        let state = &mut *guard;

        if let Some(position) = state.positions.get_mut(route_id) {
            let jitter = self.config.jitter_degrees * 2.0;
            position.latitude += (state.rng.random::<f64>() - 0.5) * jitter;
            position.longitude += (state.rng.random::<f64>() - 0.5) * jitter;
            return Ok(*position);
        }

        let stop = self
            .stops
            .all()
            .choose(&mut state.rng)
            .ok_or(TransitError::EmptyIndex)?;

        debug!("Route {} starts tracking at stop {}", route_id, stop.id);
        state.positions.insert(route_id.to_string(), stop.position);
        Ok(stop.position)
    }

    /// Avanza todas las rutas del catálogo y devuelve la foto completa
    pub fn poll_all(&self) -> Result<BTreeMap<String, Coordinate>, TransitError> {
        let mut snapshot = BTreeMap::new();
        for route in self.routes.all() {
            let position = self.poll(&route.id)?;
            snapshot.insert(route.id.clone(), position);
        }

        info!("Polled live locations for {} routes", snapshot.len());
        Ok(snapshot)
    }

    /// Posiciones actuales sin avanzar la simulación
    pub fn snapshot(&self) -> Vec<LiveLocation> {
        let state = self.lock_state();
        let mut locations: Vec<LiveLocation> = state
            .positions
            .iter()
            .map(|(route_id, position)| LiveLocation {
                route_id: route_id.clone(),
                position: *position,
            })
            .collect();
        locations.sort_by(|a, b| a.route_id.cmp(&b.route_id));
        locations
    }

    pub fn tracked_routes(&self) -> usize {
        self.lock_state().positions.len()
    }
}
