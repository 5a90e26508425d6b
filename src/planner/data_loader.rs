use serde::de::DeserializeOwned;
use std::collections::HashSet;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, warn};

use crate::planner::_structs::{Route, Stop};

pub const STOPS_FILE: &str = "stops.json";
pub const ROUTES_FILE: &str = "routes.json";

pub struct DataLoader {
    data_dir: PathBuf,
    stops: Vec<Stop>,
    routes: Vec<Route>,
}

#[derive(Debug, thiserror::Error)]
pub enum LoaderError {
    #[error("IO error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid data: {0}")]
    InvalidData(String),
}

impl DataLoader {
    pub fn new<P: AsRef<Path>>(data_dir: P) -> Self {
        Self {
            data_dir: data_dir.as_ref().to_path_buf(),
            stops: Vec::new(),
            routes: Vec::new(),
        }
    }

    /// Carga paradas y rutas, verificando que los ids sean únicos
    pub fn load_all(&mut self) -> Result<(), LoaderError> {
        let stops: Vec<Stop> = self.load_json(STOPS_FILE)?;
        ensure_unique("stop", stops.iter().map(|s| s.id.as_str()))?;

        let routes: Vec<Route> = self.load_json(ROUTES_FILE)?;
        ensure_unique("route", routes.iter().map(|r| r.id.as_str()))?;

        if stops.is_empty() {
            warn!("No stops loaded; recommendations and live locations will fail");
        }
        if routes.is_empty() {
            warn!("No routes loaded; recommendations will fail");
        }

        info!("Loaded {} stops and {} routes", stops.len(), routes.len());
        self.stops = stops;
        self.routes = routes;
        Ok(())
    }

    fn load_json<T: DeserializeOwned>(&self, filename: &str) -> Result<Vec<T>, LoaderError> {
        let file_path = self.data_dir.join(filename);
        info!("Loading {}", file_path.display());

        let file = File::open(&file_path).map_err(|source| LoaderError::Io {
            path: file_path.display().to_string(),
            source,
        })?;
        let reader = BufReader::new(file);

        let items: Vec<T> = serde_json::from_reader(reader).map_err(|e| {
            error!("Failed to parse {}: {}", filename, e);
            LoaderError::Json(e)
        })?;

        debug!("Found {} records in {}", items.len(), filename);
        Ok(items)
    }

    pub fn stops(&self) -> &[Stop] {
        &self.stops
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// Consume el loader devolviendo los datos cargados
    pub fn into_parts(self) -> (Vec<Stop>, Vec<Route>) {
        (self.stops, self.routes)
    }
}

fn ensure_unique<'a>(what: &str, ids: impl Iterator<Item = &'a str>) -> Result<(), LoaderError> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(LoaderError::InvalidData(format!("duplicate {} id '{}'", what, id)));
        }
    }
    Ok(())
}
