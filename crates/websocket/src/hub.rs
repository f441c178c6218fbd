use std::sync::Arc;

use tracing::{info, warn};
use uuid::Uuid;

use domain::auth::{Actor, AuthProvider, SessionIdentity};
use domain::errors::{DomainError, DomainResult};
use domain::events::{EventSink, ServerEvent};
use domain::repositories::{Gateway, TradeRepository};
use domain::services::CoordinatorRegistry;

use crate::manager::{RoomManager, SessionSender};
use crate::messages::ClientMessage;

/// A joined session's standing in its draft room.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DraftSession {
    pub session_id: Uuid,
    pub user_id: Uuid,
    pub league_id: Uuid,
    pub team_id: Option<Uuid>,
    pub is_commissioner: bool,
}

impl DraftSession {
    fn actor(&self) -> Actor {
        Actor::member(self.user_id, self.team_id, self.is_commissioner)
    }

    fn owns_team(&self, team_id: Uuid) -> bool {
        self.team_id == Some(team_id)
    }
}

/// The subscription hub: membership checks on join, the per-intent
/// authorization table, and routing into the league coordinator's serial
/// queue. Refusals are unicast to the requester only; peers never see them.
pub struct SubscriptionHub {
    rooms: Arc<RoomManager>,
    registry: Arc<CoordinatorRegistry>,
    gateway: Gateway,
    auth: Arc<dyn AuthProvider>,
}

impl SubscriptionHub {
    pub fn new(
        rooms: Arc<RoomManager>,
        registry: Arc<CoordinatorRegistry>,
        gateway: Gateway,
        auth: Arc<dyn AuthProvider>,
    ) -> Self {
        Self {
            rooms,
            registry,
            gateway,
            auth,
        }
    }

    pub fn rooms(&self) -> &Arc<RoomManager> {
        &self.rooms
    }

    /// Verify membership, register the session's outbound queue and answer
    /// it (alone) with a full snapshot. Idempotent per session id.
    pub async fn join(
        &self,
        session_id: Uuid,
        identity: SessionIdentity,
        league_id: Uuid,
        team_id_hint: Option<Uuid>,
        sender: SessionSender,
    ) -> DomainResult<DraftSession> {
        let membership = self
            .auth
            .league_membership(identity.user_id, league_id)
            .await?;

        if !membership.is_member && !identity.is_admin {
            return Err(DomainError::Unauthorized(format!(
                "User {} is not a member of league {}",
                identity.user_id, league_id
            )));
        }

        let is_commissioner = membership.is_commissioner || identity.is_admin;
        let team_id = match team_id_hint {
            Some(hint) => {
                if membership.team_id != Some(hint) && !is_commissioner {
                    return Err(DomainError::Unauthorized(
                        "Cannot join as a team you do not own".to_string(),
                    ));
                }
                Some(hint)
            }
            None => membership.team_id,
        };

        let session = DraftSession {
            session_id,
            user_id: identity.user_id,
            league_id,
            team_id,
            is_commissioner,
        };

        let coordinator = self.registry.acquire(league_id);
        coordinator.add_subscriber();
        self.rooms.add_session(session_id, league_id, sender);

        let snapshot = coordinator.snapshot().await?;
        self.rooms
            .unicast(session_id, ServerEvent::StateSync(snapshot))
            .await;

        info!(
            session_id = %session_id,
            league_id = %league_id,
            commissioner = is_commissioner,
            "Session joined draft room"
        );
        Ok(session)
    }

    /// Re-send an authoritative snapshot to an already-joined session
    /// (reconnection recovery, repeated joins).
    pub async fn resync(&self, session: &DraftSession) -> DomainResult<()> {
        let coordinator = self.registry.acquire(session.league_id);
        let snapshot = coordinator.snapshot().await?;
        self.rooms
            .unicast(session.session_id, ServerEvent::StateSync(snapshot))
            .await;
        Ok(())
    }

    pub async fn leave(&self, session: &DraftSession) {
        self.rooms.remove_session(session.session_id);
        self.registry.release(session.league_id).await;
    }

    /// Route one intent. Authorization failures and coordinator refusals
    /// are unicast back to the requesting session; nothing is broadcast.
    pub async fn publish_intent(&self, session: &DraftSession, intent: ClientMessage) {
        if let ClientMessage::Ping = intent {
            self.rooms.unicast(session.session_id, ServerEvent::Pong).await;
            return;
        }

        if intent.league_id() != Some(session.league_id) {
            self.refuse(
                session,
                DomainError::ValidationError(
                    "Intent addresses a league this session has not joined".to_string(),
                ),
            )
            .await;
            return;
        }

        if let Err(e) = self.authorize(session, &intent).await {
            self.refuse(session, e).await;
            return;
        }

        if let Err(e) = self.dispatch(session, intent).await {
            self.refuse(session, e).await;
        }
    }

    /// Per-intent authorization gate. Turn order stays with the
    /// coordinator (it owns draft state); this table covers identity:
    /// commissioner verbs, team ownership, and trade-party checks.
    async fn authorize(&self, session: &DraftSession, intent: &ClientMessage) -> DomainResult<()> {
        let commissioner_only = || {
            if session.is_commissioner {
                Ok(())
            } else {
                Err(DomainError::Unauthorized(
                    "Commissioner privileges required".to_string(),
                ))
            }
        };

        match intent {
            ClientMessage::StartDraft { .. }
            | ClientMessage::PauseDraft { .. }
            | ClientMessage::ResumeDraft { .. }
            | ClientMessage::ResetDraft { .. }
            | ClientMessage::ForcePick { .. }
            | ClientMessage::UndoLastPick { .. }
            | ClientMessage::UpdateOrder { .. }
            | ClientMessage::ForceAcceptTrade { .. }
            | ClientMessage::VetoTrade { .. } => commissioner_only(),

            ClientMessage::MakePick { team_id, .. } => {
                if session.owns_team(*team_id) || session.is_commissioner {
                    Ok(())
                } else {
                    Err(DomainError::Unauthorized(
                        "Cannot pick for a team you do not own".to_string(),
                    ))
                }
            }

            ClientMessage::ProposeTrade { .. } | ClientMessage::UpdateQueue { .. } => {
                let acting = match intent {
                    ClientMessage::UpdateQueue { team_id, .. } => Some(*team_id),
                    _ => session.team_id,
                };
                match acting {
                    Some(team_id) if session.owns_team(team_id) => Ok(()),
                    _ => Err(DomainError::Unauthorized(
                        "Session does not own the acting team".to_string(),
                    )),
                }
            }

            ClientMessage::AcceptTrade { trade_id, .. }
            | ClientMessage::RejectTrade { trade_id, .. } => {
                self.require_trade_party(session, *trade_id, TradeParty::Receiver)
                    .await
            }
            ClientMessage::CancelTrade { trade_id, .. } => {
                self.require_trade_party(session, *trade_id, TradeParty::Initiator)
                    .await
            }

            ClientMessage::JoinDraftRoom { .. } | ClientMessage::LeaveDraftRoom { .. } => {
                Err(DomainError::ValidationError(
                    "Room membership changes are not draft intents".to_string(),
                ))
            }

            ClientMessage::Ping => Ok(()),
        }
    }

    async fn dispatch(&self, session: &DraftSession, intent: ClientMessage) -> DomainResult<()> {
        let coordinator = self.registry.acquire(session.league_id);
        let actor = session.actor();

        match intent {
            ClientMessage::StartDraft { .. } => coordinator.start_draft(&actor).await,
            ClientMessage::PauseDraft { reason, .. } => {
                coordinator.pause_draft(&actor, reason).await
            }
            ClientMessage::ResumeDraft { .. } => coordinator.resume_draft(&actor).await,
            ClientMessage::MakePick {
                team_id, player_id, ..
            } => coordinator.make_pick(&actor, team_id, player_id).await,
            ClientMessage::ForcePick { player_id, .. } => {
                coordinator.force_pick(&actor, player_id).await
            }
            ClientMessage::UndoLastPick { .. } => coordinator.undo_last_pick(&actor).await,
            ClientMessage::ResetDraft { .. } => coordinator.reset_draft(&actor).await,
            ClientMessage::UpdateOrder { team_ids, .. } => {
                coordinator.set_draft_order(&actor, &team_ids).await
            }
            ClientMessage::ProposeTrade {
                receiver_team_id,
                assets,
                ..
            } => coordinator
                .propose_trade(&actor, receiver_team_id, assets)
                .await
                .map(|_| ()),
            ClientMessage::AcceptTrade { trade_id, .. } => {
                coordinator.accept_trade(&actor, trade_id, false).await
            }
            ClientMessage::ForceAcceptTrade { trade_id, .. } => {
                coordinator.accept_trade(&actor, trade_id, true).await
            }
            ClientMessage::RejectTrade { trade_id, .. } => {
                coordinator.reject_trade(&actor, trade_id).await
            }
            ClientMessage::CancelTrade { trade_id, .. } => {
                coordinator.cancel_trade(&actor, trade_id).await
            }
            ClientMessage::VetoTrade { trade_id, notes, .. } => {
                coordinator.veto_trade(&actor, trade_id, notes).await
            }
            ClientMessage::UpdateQueue {
                team_id,
                player_ids,
                ..
            } => coordinator.update_queue(&actor, team_id, player_ids).await,
            ClientMessage::JoinDraftRoom { .. }
            | ClientMessage::LeaveDraftRoom { .. }
            | ClientMessage::Ping => Ok(()),
        }
    }

    async fn require_trade_party(
        &self,
        session: &DraftSession,
        trade_id: Uuid,
        party: TradeParty,
    ) -> DomainResult<()> {
        if session.is_commissioner {
            return Ok(());
        }

        let (trade, _) = self
            .gateway
            .trades
            .get_with_assets(trade_id)
            .await?
            .ok_or_else(|| DomainError::TradeNotFound(format!("Trade {} not found", trade_id)))?;

        let required_team = match party {
            TradeParty::Initiator => trade.initiator_team_id,
            TradeParty::Receiver => trade.receiver_team_id,
        };

        if session.owns_team(required_team) {
            Ok(())
        } else {
            Err(DomainError::Unauthorized(format!(
                "Session does not control team {}",
                required_team
            )))
        }
    }

    async fn refuse(&self, session: &DraftSession, error: DomainError) {
        warn!(
            session_id = %session.session_id,
            league_id = %session.league_id,
            code = error.code(),
            "Intent refused: {}",
            error
        );
        self.rooms
            .unicast(
                session.session_id,
                ServerEvent::error(Some(session.league_id), error.code(), error.to_string()),
            )
            .await;
    }
}

#[derive(Debug, Clone, Copy)]
enum TradeParty {
    Initiator,
    Receiver,
}
