//! Vote core: submission, history, and tally streaming.
//!
//! The four public operations share two pure helpers ([`gate::authorize`]
//! and [`gate::voting_closed`]) and branch between live storage (agenda
//! open) and archived storage (agenda closed). Closed-ness is re-evaluated
//! from the calendar on every call; there is no close event to observe.

pub mod error;
pub mod gate;
pub mod stream;

#[cfg(test)]
mod proptests;

use crate::broker::traits::{EventPublisher, PublishAck, VoteEvent};
use crate::context::UserInfo;
use crate::storage::traits::{
    Agenda, AgendaId, AgendaStore, ArchiveStore, LiveVoteStore, SelectOptionId, UserId,
    VoteHistory,
};
use chrono::Utc;
use error::{VoteError, VoteResult};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use stream::TallyStream;
use tracing::{debug, info};

/// An incoming vote, not yet attributed to a user. Attribution happens when
/// the transport's authenticated identity is merged in during submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteCreationRequest {
    pub select_option_id: SelectOptionId,
}

/// The vote core service, generic over its storage and broker seams.
pub struct VoteCore<A, L, R, P> {
    agendas: A,
    live: L,
    archive: R,
    publisher: P,
    event_delay: Duration,
}

impl<A, L, R, P> VoteCore<A, L, R, P>
where
    A: AgendaStore,
    L: LiveVoteStore + Clone + Send + Sync + 'static,
    R: ArchiveStore,
    P: EventPublisher,
{
    /// Wire the core to its collaborators. `event_delay` is the live-stream
    /// tick interval, one process-wide tunable from the operator config.
    pub fn new(agendas: A, live: L, archive: R, publisher: P, event_delay: Duration) -> Self {
        Self {
            agendas,
            live,
            archive,
            publisher,
            event_delay,
        }
    }

    /// Submit a vote: resolve the owning agenda, gate it, and publish the
    /// vote event. No publish attempt is made on any validation failure.
    pub async fn submit_vote(
        &self,
        request: VoteCreationRequest,
        user: &UserInfo,
    ) -> VoteResult<PublishAck> {
        let agenda = self
            .agendas
            .find_by_select_option_id(request.select_option_id)
            .await?
            .ok_or(VoteError::AgendaNotFound)?;
        gate::authorize(&agenda, user)?;
        if gate::voting_closed(&agenda, gate::today()) {
            return Err(VoteError::VotingClosed);
        }

        let event = VoteEvent {
            select_option_id: request.select_option_id,
            user_id: user.id,
            cast_at: Utc::now(),
        };
        info!(
            agenda = %agenda.id,
            select_option = %event.select_option_id,
            user = %event.user_id,
            "vote accepted, publishing event"
        );
        let ack = self
            .publisher
            .publish(event)
            .await
            .map_err(VoteError::PublishFailed)?;
        debug!(offset = ?ack.offset, "vote event acknowledged");
        Ok(ack)
    }

    /// The caller's own past submission on an agenda. Identity is the only
    /// gate here; there is no agenda-scope check.
    pub async fn vote_history(
        &self,
        agenda_id: AgendaId,
        user: &UserInfo,
    ) -> VoteResult<VoteHistory> {
        self.live
            .vote_history(user.id, agenda_id)
            .await?
            .ok_or(VoteError::NoVoteFound)
    }

    /// Vote count for one select option.
    ///
    /// Closed agenda: one finalized value (archived, else live, else zero).
    /// Open agenda: a live tick stream, unless the agenda is secret — an
    /// ongoing secret vote never exposes intermediate counts. A secret
    /// agenda that has closed does expose its count.
    pub async fn select_option_count(
        &self,
        agenda_id: AgendaId,
        select_option_id: SelectOptionId,
        user: &UserInfo,
    ) -> VoteResult<TallyStream<u64>> {
        let agenda = self.resolve_authorized(agenda_id, user).await?;

        if gate::voting_closed(&agenda, gate::today()) {
            let count = match self.archive.archived_count(select_option_id).await? {
                Some(count) => count,
                None => self
                    .live
                    .count_for_select_option(select_option_id)
                    .await?
                    .unwrap_or(0),
            };
            info!(agenda = %agenda_id, select_option = %select_option_id, count, "final count");
            return Ok(TallyStream::once(count));
        }
        if agenda.secret {
            return Err(VoteError::SecretCountForbidden);
        }

        info!(
            agenda = %agenda_id,
            select_option = %select_option_id,
            delay_secs = self.event_delay.as_secs(),
            "live count stream opened"
        );
        let live = self.live.clone();
        Ok(TallyStream::live(self.event_delay, move || {
            let live = live.clone();
            async move {
                Ok(live
                    .count_for_select_option(select_option_id)
                    .await?
                    .unwrap_or(0))
            }
        }))
    }

    /// Ids of users who voted for one select option.
    ///
    /// Rosters of secret agendas are never revealed, open or closed. For a
    /// public agenda the closed/open branching mirrors the count stream.
    pub async fn voter_roster(
        &self,
        agenda_id: AgendaId,
        select_option_id: SelectOptionId,
        user: &UserInfo,
    ) -> VoteResult<TallyStream<Vec<UserId>>> {
        let agenda = self.resolve_authorized(agenda_id, user).await?;

        if agenda.secret {
            return Err(VoteError::SecretRosterForbidden);
        }
        if gate::voting_closed(&agenda, gate::today()) {
            let mut roster = self.archive.archived_voter_ids(select_option_id).await?;
            if roster.is_empty() {
                roster = self
                    .live
                    .voter_ids_for_select_option(select_option_id)
                    .await?;
            }
            return Ok(TallyStream::once(roster));
        }

        info!(
            agenda = %agenda_id,
            select_option = %select_option_id,
            delay_secs = self.event_delay.as_secs(),
            "live roster stream opened"
        );
        let live = self.live.clone();
        Ok(TallyStream::live(self.event_delay, move || {
            let live = live.clone();
            async move { Ok(live.voter_ids_for_select_option(select_option_id).await?) }
        }))
    }

    /// Resolve an agenda by id and run the authorization gate. Nothing else
    /// is read from storage before this succeeds.
    async fn resolve_authorized(
        &self,
        agenda_id: AgendaId,
        user: &UserInfo,
    ) -> VoteResult<Agenda> {
        let agenda = self
            .agendas
            .find_by_agenda_id(agenda_id)
            .await?
            .ok_or(VoteError::AgendaNotFound)?;
        gate::authorize(&agenda, user)?;
        Ok(agenda)
    }
}
