use chrono::{DateTime, Utc};
use geo_types::Point;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::TransitError;

/// Coordenada geográfica en grados decimales (WGS84).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }
}

// geo-types usa (x, y) = (longitud, latitud)
impl From<Coordinate> for Point<f64> {
    fn from(coord: Coordinate) -> Self {
        Point::new(coord.longitude, coord.latitude)
    }
}

impl From<Point<f64>> for Coordinate {
    fn from(point: Point<f64>) -> Self {
        Coordinate::new(point.y(), point.x())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Stop {
    pub id: String,
    pub name: String,
    pub position: Coordinate,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Route {
    pub id: String,
    pub short_name: String,
    pub long_name: String,
    pub color_hex: String,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RouteRecommendation {
    pub route: Route,
    pub start_stop: Stop,
    pub end_stop: Stop,
    pub estimated_duration_minutes: u32,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LiveLocation {
    pub route_id: String,
    pub position: Coordinate,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum ReportKind {
    Traffic,
    Accident,
    Other,
}

impl ReportKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportKind::Traffic => "TRAFFIC",
            ReportKind::Accident => "ACCIDENT",
            ReportKind::Other => "OTHER",
        }
    }
}

impl fmt::Display for ReportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReportKind {
    type Err = TransitError;

    /// Solo los nombres exactos en mayúsculas, igual que en JSON.
    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw {
            "TRAFFIC" => Ok(ReportKind::Traffic),
            "ACCIDENT" => Ok(ReportKind::Accident),
            "OTHER" => Ok(ReportKind::Other),
            _ => Err(TransitError::InvalidKind(raw.to_string())),
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub id: String,
    pub kind: ReportKind,
    pub position: Coordinate,
    pub description: String,
    pub created_at: DateTime<Utc>,
}
