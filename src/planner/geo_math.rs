use crate::planner::_structs::Coordinate;

pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Distancia de gran círculo (haversine) en kilómetros.
/// No valida rangos: latitudes/longitudes fuera de rango se aceptan tal cual.
pub fn distance_km(a: Coordinate, b: Coordinate) -> f64 {
    let lat1 = a.latitude.to_radians();
    let lat2 = b.latitude.to_radians();
    let delta_lat = (b.latitude - a.latitude).to_radians();
    let delta_lon = (b.longitude - a.longitude).to_radians();

    // el redondeo puede dejar h apenas fuera de [0, 1] en puntos antípodas
    let h = ((delta_lat / 2.0).sin().powi(2)
        + lat1.cos() * lat2.cos() * (delta_lon / 2.0).sin().powi(2))
    .clamp(0.0, 1.0);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    EARTH_RADIUS_KM * c
}
