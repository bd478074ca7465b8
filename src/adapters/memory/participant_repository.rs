//! In-memory participant repository for testing.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::RwLock;

use crate::domain::foundation::{DomainError, ParticipantRef};
use crate::ports::ParticipantRepository;

/// In-memory participant repository for testing.
///
/// Keyed by the full reference, so an exhibitor and a visitor that
/// happen to share an ID stay distinct records.
#[derive(Debug, Default)]
pub struct InMemoryParticipantRepository {
    names: RwLock<HashMap<ParticipantRef, String>>,
}

impl InMemoryParticipantRepository {
    /// Creates a new empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a participant with a display name.
    pub fn with_participant(self, participant: ParticipantRef, name: impl Into<String>) -> Self {
        self.names.write().unwrap().insert(participant, name.into());
        self
    }

    /// Adds a participant at runtime.
    pub fn add_participant(&self, participant: ParticipantRef, name: impl Into<String>) {
        self.names.write().unwrap().insert(participant, name.into());
    }
}

#[async_trait]
impl ParticipantRepository for InMemoryParticipantRepository {
    async fn display_name(
        &self,
        participant: &ParticipantRef,
    ) -> Result<Option<String>, DomainError> {
        Ok(self.names.read().unwrap().get(participant).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{ParticipantId, ParticipantRef};

    #[tokio::test]
    async fn returns_name_for_known_participant() {
        let participant = ParticipantRef::exhibitor(ParticipantId::new());
        let repo = InMemoryParticipantRepository::new().with_participant(participant, "Acme Corp");

        let name = repo.display_name(&participant).await.unwrap();

        assert_eq!(name.as_deref(), Some("Acme Corp"));
    }

    #[tokio::test]
    async fn returns_none_for_unknown_participant() {
        let repo = InMemoryParticipantRepository::new();

        let name = repo
            .display_name(&ParticipantRef::visitor(ParticipantId::new()))
            .await
            .unwrap();

        assert!(name.is_none());
    }

    #[tokio::test]
    async fn lookup_dispatches_on_kind() {
        let id = ParticipantId::new();
        let repo = InMemoryParticipantRepository::new()
            .with_participant(ParticipantRef::exhibitor(id), "Acme Corp");

        let as_visitor = repo
            .display_name(&ParticipantRef::visitor(id))
            .await
            .unwrap();

        assert!(as_visitor.is_none());
    }
}
