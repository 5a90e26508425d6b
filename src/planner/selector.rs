use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::SeedableRng;
use std::sync::Mutex;

use crate::planner::_structs::Route;

/// Estrategia de selección de ruta para una recomendación.
///
/// La implementación por defecto elige al azar y no tiene en cuenta la
/// topología real de la red; sirve de marcador hasta tener un planificador
/// basado en caminos. `None` solo si `routes` está vacío.
pub trait RouteSelector: Send + Sync {
    fn select<'a>(&self, routes: &'a [Route]) -> Option<&'a Route>;
}

/// Selección uniforme al azar con el RNG del hilo.
#[derive(Debug, Default)]
pub struct RandomRouteSelector;

impl RouteSelector for RandomRouteSelector {
    fn select<'a>(&self, routes: &'a [Route]) -> Option<&'a Route> {
        routes.choose(&mut rand::rng())
    }
}

/// Selección uniforme reproducible a partir de una semilla.
#[derive(Debug)]
pub struct SeededRouteSelector {
    rng: Mutex<StdRng>,
}

impl SeededRouteSelector {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl RouteSelector for SeededRouteSelector {
    fn select<'a>(&self, routes: &'a [Route]) -> Option<&'a Route> {
        let mut rng = self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        routes.choose(&mut *rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn routes() -> Vec<Route> {
        (0..5)
            .map(|i| Route {
                id: format!("r{}", i),
                short_name: i.to_string(),
                long_name: format!("Route {}", i),
                color_hex: "#FFFFFF".to_string(),
            })
            .collect()
    }

    #[test]
    fn test_selectors_on_empty_slice() {
        assert!(RandomRouteSelector.select(&[]).is_none());
        assert!(SeededRouteSelector::new(7).select(&[]).is_none());
    }

    #[test]
    fn test_random_selector_picks_member() {
        let routes = routes();
        for _ in 0..20 {
            let picked = RandomRouteSelector.select(&routes).unwrap();
            assert!(routes.contains(picked));
        }
    }

    #[test]
    fn test_seeded_selector_is_reproducible() {
        let routes = routes();
        let first = SeededRouteSelector::new(42);
        let second = SeededRouteSelector::new(42);

        let a: Vec<&str> = (0..10).map(|_| first.select(&routes).unwrap().id.as_str()).collect();
        let b: Vec<&str> = (0..10).map(|_| second.select(&routes).unwrap().id.as_str()).collect();
        assert_eq!(a, b);
    }
}
