use std::sync::Arc;

use sea_orm::DatabaseConnection;

#[derive(Clone)]
pub struct AppState {
    pub orm: Arc<DatabaseConnection>,
}

impl AppState {
    pub fn new(orm: DatabaseConnection) -> Self {
        Self { orm: Arc::new(orm) }
    }

    pub fn db(&self) -> &DatabaseConnection {
        &self.orm
    }
}
