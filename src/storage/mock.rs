//! Mock vote storage for testing.
//!
//! One shared-state mock implements all three storage seams so a test can
//! seed agendas, live votes, and archived tallies in one place.

use super::traits::*;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// In-memory storage mock. Clones share state.
#[derive(Clone, Default)]
pub struct MockVoteStore {
    state: Arc<Mutex<MockState>>,
}

#[derive(Default)]
struct MockState {
    agendas: Vec<Agenda>,
    /// select option -> owning agenda
    select_options: HashMap<SelectOptionId, AgendaId>,
    live_votes: HashMap<SelectOptionId, Vec<UserId>>,
    histories: Vec<VoteHistory>,
    archived_counts: HashMap<SelectOptionId, u64>,
    archived_rosters: HashMap<SelectOptionId, Vec<UserId>>,
    /// When set, every storage call fails with this error.
    fail_with: Option<StorageError>,
    /// Number of storage reads performed, for "never touched storage" assertions.
    reads: u64,
}

impl MockVoteStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed an agenda and the select options belonging to it.
    pub fn add_agenda(&self, agenda: Agenda, select_options: &[SelectOptionId]) {
        let mut state = self.state.lock().unwrap();
        for &option in select_options {
            state.select_options.insert(option, agenda.id);
        }
        state.agendas.push(agenda);
    }

    /// Record a live (in-progress) vote.
    pub fn add_live_vote(&self, option: SelectOptionId, user: UserId) {
        let mut state = self.state.lock().unwrap();
        state.live_votes.entry(option).or_default().push(user);
    }

    /// Record a past-submission row for history lookups.
    pub fn add_history(&self, history: VoteHistory) {
        self.state.lock().unwrap().histories.push(history);
    }

    /// Seed a finalized count.
    pub fn set_archived_count(&self, option: SelectOptionId, count: u64) {
        self.state.lock().unwrap().archived_counts.insert(option, count);
    }

    /// Seed a finalized roster.
    pub fn set_archived_roster(&self, option: SelectOptionId, voters: Vec<UserId>) {
        self.state.lock().unwrap().archived_rosters.insert(option, voters);
    }

    /// Make every subsequent storage call fail.
    pub fn fail_with(&self, error: StorageError) {
        self.state.lock().unwrap().fail_with = Some(error);
    }

    /// Stop injected failures.
    pub fn clear_failure(&self) {
        self.state.lock().unwrap().fail_with = None;
    }

    /// Total storage reads performed so far.
    pub fn read_count(&self) -> u64 {
        self.state.lock().unwrap().reads
    }

    fn touch(state: &mut MockState) -> StorageResult<()> {
        state.reads += 1;
        match &state.fail_with {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl AgendaStore for MockVoteStore {
    async fn find_by_agenda_id(&self, id: AgendaId) -> StorageResult<Option<Agenda>> {
        let mut state = self.state.lock().unwrap();
        Self::touch(&mut state)?;
        Ok(state.agendas.iter().find(|a| a.id == id).cloned())
    }

    async fn find_by_select_option_id(
        &self,
        id: SelectOptionId,
    ) -> StorageResult<Option<Agenda>> {
        let mut state = self.state.lock().unwrap();
        Self::touch(&mut state)?;
        let Some(agenda_id) = state.select_options.get(&id).copied() else {
            return Ok(None);
        };
        Ok(state.agendas.iter().find(|a| a.id == agenda_id).cloned())
    }
}

#[async_trait]
impl LiveVoteStore for MockVoteStore {
    async fn count_for_select_option(
        &self,
        id: SelectOptionId,
    ) -> StorageResult<Option<u64>> {
        let mut state = self.state.lock().unwrap();
        Self::touch(&mut state)?;
        Ok(state.live_votes.get(&id).map(|votes| votes.len() as u64))
    }

    async fn voter_ids_for_select_option(
        &self,
        id: SelectOptionId,
    ) -> StorageResult<Vec<UserId>> {
        let mut state = self.state.lock().unwrap();
        Self::touch(&mut state)?;
        Ok(state.live_votes.get(&id).cloned().unwrap_or_default())
    }

    async fn vote_history(
        &self,
        user_id: UserId,
        agenda_id: AgendaId,
    ) -> StorageResult<Option<VoteHistory>> {
        let mut state = self.state.lock().unwrap();
        Self::touch(&mut state)?;
        Ok(state
            .histories
            .iter()
            .find(|h| h.user_id == user_id && h.agenda_id == agenda_id)
            .cloned())
    }
}

#[async_trait]
impl ArchiveStore for MockVoteStore {
    async fn archived_count(&self, id: SelectOptionId) -> StorageResult<Option<u64>> {
        let mut state = self.state.lock().unwrap();
        Self::touch(&mut state)?;
        Ok(state.archived_counts.get(&id).copied())
    }

    async fn archived_voter_ids(&self, id: SelectOptionId) -> StorageResult<Vec<UserId>> {
        let mut state = self.state.lock().unwrap();
        Self::touch(&mut state)?;
        Ok(state.archived_rosters.get(&id).cloned().unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn agenda(id: u64) -> Agenda {
        Agenda {
            id: AgendaId(id),
            apartment_code: "A-101".to_string(),
            end_date: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
            secret: false,
        }
    }

    #[tokio::test]
    async fn resolves_agenda_by_select_option() {
        let store = MockVoteStore::new();
        store.add_agenda(agenda(1), &[SelectOptionId(10), SelectOptionId(11)]);

        let found = store
            .find_by_select_option_id(SelectOptionId(11))
            .await
            .unwrap();
        assert_eq!(found.unwrap().id, AgendaId(1));

        let missing = store
            .find_by_select_option_id(SelectOptionId(99))
            .await
            .unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn live_count_is_none_without_votes() {
        let store = MockVoteStore::new();
        assert_eq!(
            store
                .count_for_select_option(SelectOptionId(10))
                .await
                .unwrap(),
            None
        );

        store.add_live_vote(SelectOptionId(10), UserId(7));
        store.add_live_vote(SelectOptionId(10), UserId(8));
        assert_eq!(
            store
                .count_for_select_option(SelectOptionId(10))
                .await
                .unwrap(),
            Some(2)
        );
    }

    #[tokio::test]
    async fn injected_failure_poisons_every_read() {
        let store = MockVoteStore::new();
        store.fail_with(StorageError::Connection("down".to_string()));
        assert!(store.find_by_agenda_id(AgendaId(1)).await.is_err());

        store.clear_failure();
        assert!(store.find_by_agenda_id(AgendaId(1)).await.is_ok());
    }
}
