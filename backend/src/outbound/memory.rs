//! Process-local POS repository.
//!
//! Holds records in a mutex-guarded map so the create-or-update contract,
//! identifier assignment, and the unique name constraint behave like the
//! PostgreSQL adapter without a database. Used by tests and by the CLI's
//! `--in-memory` mode.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use mockable::Clock;

use crate::domain::ports::{PosRepository, PosRepositoryError};
use crate::domain::{Pos, PosId};

#[derive(Debug)]
struct State {
    next_id: i64,
    records: BTreeMap<PosId, Pos>,
}

impl Default for State {
    fn default() -> Self {
        Self {
            next_id: 1,
            records: BTreeMap::new(),
        }
    }
}

impl State {
    fn name_taken_by_other(&self, name: &str, own_id: Option<PosId>) -> bool {
        self.records
            .values()
            .any(|stored| stored.name == name && stored.id != own_id)
    }
}

/// In-memory implementation of [`PosRepository`].
///
/// Identifiers start at 1 and are never reused, even after
/// [`PosRepository::clear`].
pub struct InMemoryPosRepository {
    state: Mutex<State>,
    clock: Arc<dyn Clock>,
}

impl InMemoryPosRepository {
    /// Create an empty repository stamping records with `clock`.
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            state: Mutex::new(State::default()),
            clock,
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, State>, PosRepositoryError> {
        self.state
            .lock()
            .map_err(|_| PosRepositoryError::query("in-memory POS store lock poisoned"))
    }
}

#[async_trait]
impl PosRepository for InMemoryPosRepository {
    async fn get_by_id(&self, id: PosId) -> Result<Pos, PosRepositoryError> {
        let state = self.lock()?;
        state
            .records
            .get(&id)
            .cloned()
            .ok_or_else(|| PosRepositoryError::not_found(id))
    }

    async fn get_all(&self) -> Result<Vec<Pos>, PosRepositoryError> {
        let state = self.lock()?;
        Ok(state.records.values().cloned().collect())
    }

    async fn upsert(&self, pos: &Pos) -> Result<Pos, PosRepositoryError> {
        let now = self.clock.utc();
        let mut state = self.lock()?;

        if state.name_taken_by_other(&pos.name, pos.id) {
            return Err(PosRepositoryError::duplicate_name(pos.name.clone()));
        }

        let stored = match pos.id {
            None => {
                let id = PosId::new(state.next_id);
                state.next_id += 1;
                Pos {
                    id: Some(id),
                    created_at: Some(now),
                    updated_at: Some(now),
                    ..pos.clone()
                }
            }
            Some(id) => {
                let existing = state
                    .records
                    .get(&id)
                    .ok_or_else(|| PosRepositoryError::not_found(id))?;
                Pos {
                    created_at: existing.created_at.or(Some(now)),
                    updated_at: Some(now),
                    ..pos.clone()
                }
            }
        };

        if let Some(id) = stored.id {
            state.records.insert(id, stored.clone());
        }
        Ok(stored)
    }

    async fn clear(&self) -> Result<(), PosRepositoryError> {
        self.lock()?.records.clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    //! Contract coverage for the in-memory adapter.

    use super::*;
    use chrono::{DateTime, Duration, Local, TimeZone, Utc};
    use rstest::{fixture, rstest};

    use crate::domain::{CampusType, PosType};

    struct SteppingClock {
        start: DateTime<Utc>,
        ticks: Mutex<i64>,
    }

    impl Clock for SteppingClock {
        fn local(&self) -> DateTime<Local> {
            self.utc().with_timezone(&Local)
        }

        fn utc(&self) -> DateTime<Utc> {
            let mut ticks = self.ticks.lock().expect("clock lock");
            let now = self.start + Duration::minutes(*ticks);
            *ticks += 1;
            now
        }
    }

    fn start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 19, 8, 0, 0)
            .single()
            .expect("valid fixture timestamp")
    }

    #[fixture]
    fn repository() -> InMemoryPosRepository {
        InMemoryPosRepository::new(Arc::new(SteppingClock {
            start: start(),
            ticks: Mutex::new(0),
        }))
    }

    fn pos(name: &str) -> Pos {
        Pos {
            id: None,
            name: name.to_owned(),
            description: String::new(),
            pos_type: PosType::Cafe,
            campus: CampusType::Altstadt,
            street: "Untere Straße".to_owned(),
            house_number: "21".to_owned(),
            postal_code: 69117,
            city: "Heidelberg".to_owned(),
            created_at: None,
            updated_at: None,
        }
    }

    #[rstest]
    #[tokio::test]
    async fn create_assigns_sequential_ids_and_timestamps(repository: InMemoryPosRepository) {
        let first = repository.upsert(&pos("Rada")).await.expect("create");
        let second = repository.upsert(&pos("Botanik")).await.expect("create");

        assert_eq!(first.id, Some(PosId::new(1)));
        assert_eq!(second.id, Some(PosId::new(2)));
        assert_eq!(first.created_at, Some(start()));
        assert_eq!(first.created_at, first.updated_at);
    }

    #[rstest]
    #[tokio::test]
    async fn update_keeps_creation_time_and_refreshes_update_time(
        repository: InMemoryPosRepository,
    ) {
        let created = repository.upsert(&pos("Rada")).await.expect("create");
        let mut changed = created.clone();
        changed.description = "Roastery".to_owned();
        changed.created_at = None;

        let updated = repository.upsert(&changed).await.expect("update");

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.description, "Roastery");
        assert_eq!(updated.created_at, created.created_at);
        assert!(updated.updated_at > created.updated_at);
    }

    #[rstest]
    #[tokio::test]
    async fn duplicate_name_is_rejected_on_create(repository: InMemoryPosRepository) {
        repository.upsert(&pos("Rada")).await.expect("create");
        let error = repository
            .upsert(&pos("Rada"))
            .await
            .expect_err("name is taken");

        assert_eq!(error, PosRepositoryError::duplicate_name("Rada"));
        assert_eq!(repository.get_all().await.expect("listing").len(), 1);
    }

    #[rstest]
    #[tokio::test]
    async fn renaming_onto_another_record_is_rejected(repository: InMemoryPosRepository) {
        repository.upsert(&pos("Rada")).await.expect("create");
        let mut other = repository.upsert(&pos("Botanik")).await.expect("create");
        other.name = "Rada".to_owned();

        let error = repository.upsert(&other).await.expect_err("name is taken");
        assert_eq!(error, PosRepositoryError::duplicate_name("Rada"));
    }

    #[rstest]
    #[tokio::test]
    async fn update_of_unknown_id_is_not_found(repository: InMemoryPosRepository) {
        let mut ghost = pos("Ghost");
        ghost.id = Some(PosId::new(7));

        let error = repository.upsert(&ghost).await.expect_err("no such record");
        assert_eq!(error, PosRepositoryError::not_found(PosId::new(7)));
    }

    #[rstest]
    #[tokio::test]
    async fn clear_removes_records_without_reusing_ids(repository: InMemoryPosRepository) {
        repository.upsert(&pos("Rada")).await.expect("create");
        repository.clear().await.expect("clear");

        assert!(repository.get_all().await.expect("listing").is_empty());
        assert_eq!(
            repository.get_by_id(PosId::new(1)).await,
            Err(PosRepositoryError::not_found(PosId::new(1)))
        );

        let recreated = repository.upsert(&pos("Rada")).await.expect("create");
        assert_eq!(recreated.id, Some(PosId::new(2)));
    }
}
