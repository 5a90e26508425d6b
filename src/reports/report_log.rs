use chrono::{DateTime, Duration, Utc};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::info;
use uuid::Uuid;

use crate::errors::TransitError;
use crate::planner::_structs::{Coordinate, Report, ReportKind};

pub const DEFAULT_VISIBILITY_WINDOW_MS: i64 = 3_600_000;

/// Registro de incidentes de solo anexado.
///
/// Nada se borra: `recent` filtra por antigüedad en el momento de la consulta.
pub struct ReportLog {
    window: Duration,
    reports: RwLock<Vec<Report>>,
}

impl Default for ReportLog {
    fn default() -> Self {
        Self::new(DEFAULT_VISIBILITY_WINDOW_MS)
    }
}

impl ReportLog {
    pub fn new(visibility_window_ms: i64) -> Self {
        Self {
            window: Duration::milliseconds(visibility_window_ms),
            reports: RwLock::new(Vec::new()),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, Vec<Report>> {
        self.reports.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, Vec<Report>> {
        self.reports.write().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn append(
        &self,
        kind: &str,
        position: Coordinate,
        description: &str,
    ) -> Result<Report, TransitError> {
        self.append_at(kind, position, description, Utc::now())
    }

    /// Igual que `append` pero con marca de tiempo explícita
    pub fn append_at(
        &self,
        kind: &str,
        position: Coordinate,
        description: &str,
        created_at: DateTime<Utc>,
    ) -> Result<Report, TransitError> {
        // validar antes de tocar el registro
        let kind: ReportKind = kind.parse()?;

        let report = Report {
            id: Uuid::new_v4().to_string(),
            kind,
            position,
            description: description.to_string(),
            created_at,
        };

        self.write().push(report.clone());
        info!("Stored {} report {}", report.kind, report.id);
        Ok(report)
    }

    /// Reportes con menos de una ventana de antigüedad respecto a `now`, en orden de llegada
    pub fn recent(&self, now: DateTime<Utc>) -> Vec<Report> {
        self.read()
            .iter()
            .filter(|report| now - report.created_at < self.window)
            .cloned()
            .collect()
    }

    /// Total almacenado, incluidos los que ya no son visibles
    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }
}
