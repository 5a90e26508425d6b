use actix_web::{web, HttpResponse, Responder};
use chrono::Utc;
use geojson::{feature::Id, Feature, FeatureCollection, Geometry, JsonObject};
use geo_types::Point;
use serde::Deserialize;
use serde_json::json;

use crate::{errors::TransitError, planner::_structs::Coordinate, state::AppState};

#[derive(Deserialize)]
pub struct RecommendQuery {
    start_lat: f64,
    start_lng: f64,
    end_lat: f64,
    end_lng: f64,
}

#[derive(Deserialize)]
pub struct ReportSubmission {
    kind: String,
    position: Coordinate,
    #[serde(default)]
    description: String,
}

pub async fn list_stops(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(state.stops.all())
}

/// Paradas como FeatureCollection GeoJSON (puntos lon/lat)
pub async fn stops_geojson(state: web::Data<AppState>) -> impl Responder {
    let features = state
        .stops
        .all()
        .iter()
        .map(|stop| {
            let point: Point<f64> = stop.position.into();
            let mut properties = JsonObject::new();
            properties.insert("name".to_string(), json!(stop.name));

            Feature {
                bbox: None,
                geometry: Some(Geometry::new(geojson::Value::from(&point))),
                id: Some(Id::String(stop.id.clone())),
                properties: Some(properties),
                foreign_members: None,
            }
        })
        .collect();

    let collection = FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    };

    HttpResponse::Ok()
        .content_type("application/geo+json")
        .body(collection.to_string())
}

pub async fn get_stop(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, TransitError> {
    let id = path.into_inner();
    let stop = state.stops.get(&id).ok_or(TransitError::StopNotFound(id.clone()))?;
    Ok(HttpResponse::Ok().json(stop))
}

pub async fn list_routes(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(state.routes.all())
}

pub async fn get_route(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, TransitError> {
    let id = path.into_inner();
    let route = state.routes.get(&id).ok_or(TransitError::RouteNotFound(id.clone()))?;
    Ok(HttpResponse::Ok().json(route))
}

pub async fn recommend(
    state: web::Data<AppState>,
    query: web::Query<RecommendQuery>,
) -> Result<HttpResponse, TransitError> {
    let start = Coordinate::new(query.start_lat, query.start_lng);
    let end = Coordinate::new(query.end_lat, query.end_lng);

    let recommendation = state.engine.recommend(start, end)?;
    Ok(HttpResponse::Ok().json(recommendation))
}

pub async fn live_locations(state: web::Data<AppState>) -> Result<HttpResponse, TransitError> {
    let snapshot = state.simulator.poll_all()?;
    Ok(HttpResponse::Ok().json(snapshot))
}

pub async fn submit_report(
    state: web::Data<AppState>,
    body: web::Json<ReportSubmission>,
) -> Result<HttpResponse, TransitError> {
    let submission = body.into_inner();
    let report = state
        .reports
        .append(&submission.kind, submission.position, &submission.description)?;
    Ok(HttpResponse::Created().json(report))
}

pub async fn recent_reports(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(state.reports.recent(Utc::now()))
}
