use crate::planner::_structs::Route;

/// Catálogo estático de rutas, en el orden en que se cargaron.
#[derive(Debug, Clone, Default)]
pub struct RouteCatalog {
    routes: Vec<Route>,
}

impl RouteCatalog {
    pub fn new(routes: Vec<Route>) -> Self {
        Self { routes }
    }

    pub fn all(&self) -> &[Route] {
        &self.routes
    }

    pub fn get(&self, id: &str) -> Option<&Route> {
        self.routes.iter().find(|route| route.id == id)
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}
