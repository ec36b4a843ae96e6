#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::collections::BTreeMap;

use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use sea_orm_migration::MigratorTrait;
use settings_auth::Identity;

use crate::infra::storage::migrations::Migrator;

/// Fresh in-memory SQLite with the schema applied. One connection, so every
/// query sees the same database.
pub async fn inmem_db() -> DatabaseConnection {
    let mut opts = ConnectOptions::new("sqlite::memory:");
    opts.max_connections(1).min_connections(1).sqlx_logging(false);
    let db = Database::connect(opts).await.expect("sqlite connect");
    Migrator::up(&db, None).await.expect("migrations");
    db
}

pub fn user(subject: &str) -> Identity {
    Identity {
        subject: subject.to_owned(),
        name: format!("User {subject}"),
        preferred_username: Some(subject.to_owned()),
        audience: Vec::new(),
        realm_roles: Vec::new(),
        client_roles: BTreeMap::new(),
        groups: Vec::new(),
    }
}
