#![allow(dead_code)]

use std::sync::Arc;

use parking_lot::Mutex;
use sea_orm::{Database, DatabaseConnection};
use sea_orm_migration::MigratorTrait;

use projects::contract::client::ProjectsApi;
use projects::domain::events::ProjectDomainEvent;
use projects::domain::ports::EventPublisher;
use projects::domain::repo::ProjectsRepository;
use projects::domain::service::{Service, ServiceConfig};
use projects::gateways::local::ProjectsLocalClient;
use projects::infra::storage::memory_repo::InMemoryProjectsRepository;
use projects::infra::storage::migrations::Migrator;
use projects::infra::storage::sea_orm_repo::SeaOrmProjectsRepository;

pub const OWNER: u64 = 1;
pub const COLLAB: u64 = 2;
pub const STRANGER: u64 = 3;

/// Captures published events for assertions.
#[derive(Default)]
pub struct RecordingPublisher {
    events: Mutex<Vec<ProjectDomainEvent>>,
}

impl RecordingPublisher {
    pub fn names(&self) -> Vec<&'static str> {
        self.events.lock().iter().map(|e| e.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.events.lock().len()
    }
}

impl EventPublisher<ProjectDomainEvent> for RecordingPublisher {
    fn publish(&self, event: &ProjectDomainEvent) {
        self.events.lock().push(event.clone());
    }
}

pub struct Harness {
    pub api: Arc<dyn ProjectsApi>,
    pub service: Arc<Service>,
    pub events: Arc<RecordingPublisher>,
}

pub fn harness_with(repo: Arc<dyn ProjectsRepository>) -> Harness {
    let events = Arc::new(RecordingPublisher::default());
    let service = Arc::new(Service::new(
        repo,
        events.clone(),
        ServiceConfig::default(),
    ));
    Harness {
        api: Arc::new(ProjectsLocalClient::new(service.clone())),
        service,
        events,
    }
}

pub fn memory_harness() -> Harness {
    harness_with(Arc::new(InMemoryProjectsRepository::new()))
}

/// Fresh in-memory SQLite DB with migrations applied.
pub async fn create_test_db() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("Failed to connect to test database");
    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");
    db
}

pub async fn sqlite_harness() -> Harness {
    let db = create_test_db().await;
    harness_with(Arc::new(SeaOrmProjectsRepository::new(db)))
}
