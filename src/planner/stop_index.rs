use ordered_float::OrderedFloat;
use tracing::debug;

use crate::errors::TransitError;
use crate::planner::_structs::{Coordinate, Stop};
use crate::planner::geo_math::distance_km;

/// Conjunto estático de paradas con búsqueda de la más cercana.
#[derive(Debug, Clone, Default)]
pub struct StopIndex {
    stops: Vec<Stop>,
}

impl StopIndex {
    pub fn new(stops: Vec<Stop>) -> Self {
        Self { stops }
    }

    /// Parada más cercana a `point` por recorrido lineal.
    /// En caso de empate gana la primera en orden de la colección.
    pub fn nearest(&self, point: Coordinate) -> Result<&Stop, TransitError> {
        // min_by_key devuelve el primer mínimo encontrado
        let stop = self
            .stops
            .iter()
            .min_by_key(|stop| OrderedFloat(distance_km(point, stop.position)))
            .ok_or(TransitError::EmptyIndex)?;

        debug!(
            "Nearest stop to ({:.5}, {:.5}) is {}",
            point.latitude, point.longitude, stop.id
        );
        Ok(stop)
    }

    pub fn get(&self, id: &str) -> Option<&Stop> {
        self.stops.iter().find(|stop| stop.id == id)
    }

    pub fn all(&self) -> &[Stop] {
        &self.stops
    }

    pub fn len(&self) -> usize {
        self.stops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }
}
