use actix_web::web;

pub mod handlers;
use handlers::{
    get_route,
    get_stop,
    list_routes,
    list_stops,
    live_locations,
    recent_reports,
    recommend,
    stops_geojson,
    submit_report,
};

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .route("/stops", web::get().to(list_stops))
            .route("/stops/geojson", web::get().to(stops_geojson))
            .route("/stops/{id}", web::get().to(get_stop))
            .route("/routes", web::get().to(list_routes))
            .route("/routes/{id}", web::get().to(get_route))
            .route("/recommend", web::get().to(recommend))
            .route("/live-locations", web::get().to(live_locations))
            .route("/reports", web::post().to(submit_report))
            .route("/reports", web::get().to(recent_reports)),
    );
}
