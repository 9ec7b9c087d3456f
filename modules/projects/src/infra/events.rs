use tracing::info;

use crate::domain::events::ProjectDomainEvent;
use crate::domain::ports::EventPublisher;

/// Publishes domain events as structured log records.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingEventPublisher;

impl EventPublisher<ProjectDomainEvent> for TracingEventPublisher {
    fn publish(&self, event: &ProjectDomainEvent) {
        info!(
            target: "projects::events",
            event = event.name(),
            project_id = event.project_id(),
            details = ?event,
            "domain event"
        );
    }
}

/// Drops every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopEventPublisher;

impl EventPublisher<ProjectDomainEvent> for NoopEventPublisher {
    fn publish(&self, _event: &ProjectDomainEvent) {}
}
