//! Trade engine scenarios: mid-draft pick swaps with auto-pause, player
//! assets, refusals and expiry-on-touch.

mod common;

use chrono::{Duration, Utc};
use common::{build_league, connect, draft_state, LeagueSpec};
use domain::models::{
    AcquisitionKind, AssetRef, DraftType, ProposedAsset, Trade, TradeStatus,
};
use domain::repositories::{PickRepository, RosterRepository, TradeRepository};
use websocket::ClientMessage;

async fn pick_id_by_overall(fixture: &common::TestLeague, overall: i32) -> uuid::Uuid {
    fixture
        .state
        .gateway
        .picks
        .get_by_overall(fixture.league_id, 2026, overall)
        .await
        .unwrap()
        .unwrap()
        .id
}

#[tokio::test]
async fn test_trade_of_current_pick_pauses_and_reconciles() {
    // Snake, 2 teams: picks 1 and 4 belong to A, picks 2 and 3 to B.
    let fixture = build_league(LeagueSpec {
        draft_type: DraftType::Snake,
        ..LeagueSpec::default()
    });
    let league_id = fixture.league_id;
    let team_a = fixture.teams[0].id;
    let team_b = fixture.teams[1].id;

    let commish = connect(&fixture, fixture.commissioner_user).await;
    let owner_a = connect(&fixture, fixture.owners[0]).await;
    let mut owner_b = connect(&fixture, fixture.owners[1]).await;

    fixture
        .state
        .hub
        .publish_intent(&commish.session, ClientMessage::StartDraft { league_id })
        .await;
    assert_eq!(draft_state(&fixture).await.current_team_id, Some(team_a));

    // A offers pick #1 for B's pick #3 while pick #1 is on the clock
    let pick1 = pick_id_by_overall(&fixture, 1).await;
    let pick3 = pick_id_by_overall(&fixture, 3).await;
    fixture
        .state
        .hub
        .publish_intent(
            &owner_a.session,
            ClientMessage::ProposeTrade {
                league_id,
                receiver_team_id: team_b,
                assets: vec![
                    ProposedAsset {
                        from_team_id: team_a,
                        asset: AssetRef::DraftPick { pick_id: pick1 },
                    },
                    ProposedAsset {
                        from_team_id: team_b,
                        asset: AssetRef::DraftPick { pick_id: pick3 },
                    },
                ],
            },
        )
        .await;

    let pending = fixture
        .state
        .gateway
        .trades
        .list_pending(league_id)
        .await
        .unwrap();
    assert_eq!(pending.len(), 1);
    let trade_id = pending[0].0.id;

    owner_b.drain();
    fixture
        .state
        .hub
        .publish_intent(
            &owner_b.session,
            ClientMessage::AcceptTrade { league_id, trade_id },
        )
        .await;

    // Ownership swapped 1:1, nothing vanished
    let picks = fixture
        .state
        .gateway
        .picks
        .list_season(league_id, 2026)
        .await
        .unwrap();
    assert_eq!(picks[0].current_owner_team_id, team_b);
    assert_eq!(picks[0].original_owner_team_id, team_a);
    assert_eq!(picks[2].current_owner_team_id, team_a);

    // Whose-turn-it-is reconciled to the new owner of the current pick,
    // and the pause-on-trade policy kicked in
    let state = draft_state(&fixture).await;
    assert_eq!(state.current_team_id, Some(team_b));
    assert!(state.is_paused);
    assert_eq!(
        state.pause_reason.as_deref(),
        Some("Trade completed — draft paused for review")
    );
    assert!(state.timer_started_at.is_none());

    let trade = fixture
        .state
        .gateway
        .trades
        .get_with_assets(trade_id)
        .await
        .unwrap()
        .unwrap()
        .0;
    assert_eq!(trade.status, TradeStatus::Completed);
    assert!(trade.processed_at.is_some());

    // The pause is broadcast before the completion
    let events = owner_b.drain();
    let names: Vec<&str> = events
        .iter()
        .map(|e| e["event"].as_str().unwrap())
        .collect();
    let paused_at = names.iter().position(|n| *n == "DraftPaused").unwrap();
    let accepted_at = names.iter().position(|n| *n == "TradeAccepted").unwrap();
    assert!(paused_at < accepted_at);

    let accepted = &events[accepted_at];
    assert_eq!(accepted["draftPaused"], true);

    // Resume puts B on the clock with a full timer
    fixture
        .state
        .hub
        .publish_intent(&commish.session, ClientMessage::ResumeDraft { league_id })
        .await;
    let state = draft_state(&fixture).await;
    assert!(state.is_live());
    assert_eq!(state.current_team_id, Some(team_b));
    assert_eq!(state.timer_seconds_remaining, Some(90));
}

#[tokio::test]
async fn test_player_asset_moves_roster_entry() {
    let fixture = build_league(LeagueSpec {
        pause_on_trade: false,
        ..LeagueSpec::default()
    });
    let league_id = fixture.league_id;
    let team_a = fixture.teams[0].id;
    let team_b = fixture.teams[1].id;
    let p1 = fixture.players[0].id;

    let commish = connect(&fixture, fixture.commissioner_user).await;
    let owner_a = connect(&fixture, fixture.owners[0]).await;
    let owner_b = connect(&fixture, fixture.owners[1]).await;

    fixture
        .state
        .hub
        .publish_intent(&commish.session, ClientMessage::StartDraft { league_id })
        .await;
    fixture
        .state
        .hub
        .publish_intent(
            &owner_a.session,
            ClientMessage::MakePick {
                league_id,
                team_id: team_a,
                player_id: p1,
            },
        )
        .await;

    // A flips the drafted player for B's round-2 pick (#3 in linear order)
    let pick3 = pick_id_by_overall(&fixture, 3).await;
    fixture
        .state
        .hub
        .publish_intent(
            &owner_a.session,
            ClientMessage::ProposeTrade {
                league_id,
                receiver_team_id: team_b,
                assets: vec![
                    ProposedAsset {
                        from_team_id: team_a,
                        asset: AssetRef::Player { player_id: p1 },
                    },
                    ProposedAsset {
                        from_team_id: team_b,
                        asset: AssetRef::DraftPick { pick_id: pick3 },
                    },
                ],
            },
        )
        .await;
    let trade_id = fixture
        .state
        .gateway
        .trades
        .list_pending(league_id)
        .await
        .unwrap()[0]
        .0
        .id;

    fixture
        .state
        .hub
        .publish_intent(
            &owner_b.session,
            ClientMessage::AcceptTrade { league_id, trade_id },
        )
        .await;

    let entry = fixture
        .state
        .gateway
        .rosters
        .get_by_player(league_id, p1)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(entry.team_id, team_b);
    assert_eq!(entry.acquired_via, AcquisitionKind::Traded);

    let pick3 = fixture
        .state
        .gateway
        .picks
        .get(pick3)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(pick3.current_owner_team_id, team_a);

    // pause_on_trade=false: the draft keeps running
    let state = draft_state(&fixture).await;
    assert!(state.is_live());
    // A trade invalidates the undo window
    assert!(!state.undo_available);
}

#[tokio::test]
async fn test_reject_cancel_and_veto_are_terminal() {
    let fixture = build_league(LeagueSpec::default());
    let league_id = fixture.league_id;
    let team_a = fixture.teams[0].id;
    let team_b = fixture.teams[1].id;

    let commish = connect(&fixture, fixture.commissioner_user).await;
    let owner_a = connect(&fixture, fixture.owners[0]).await;
    let owner_b = connect(&fixture, fixture.owners[1]).await;

    let propose = |pick_overall: i32| {
        let state = &fixture.state;
        let owner_a = &owner_a;
        let fixture = &fixture;
        async move {
            let pick_id = pick_id_by_overall(fixture, pick_overall).await;
            state
                .hub
                .publish_intent(
                    &owner_a.session,
                    ClientMessage::ProposeTrade {
                        league_id,
                        receiver_team_id: team_b,
                        assets: vec![ProposedAsset {
                            from_team_id: team_a,
                            asset: AssetRef::DraftPick { pick_id },
                        }],
                    },
                )
                .await;
            let pending = state.gateway.trades.list_pending(league_id).await.unwrap();
            pending.last().unwrap().0.id
        }
    };

    // Board exists only once the draft starts or the order is set; fix it
    fixture
        .state
        .hub
        .publish_intent(
            &commish.session,
            ClientMessage::UpdateOrder {
                league_id,
                team_ids: vec![team_a, team_b],
            },
        )
        .await;

    let rejected = propose(1).await;
    fixture
        .state
        .hub
        .publish_intent(
            &owner_b.session,
            ClientMessage::RejectTrade {
                league_id,
                trade_id: rejected,
            },
        )
        .await;

    let cancelled = propose(1).await;
    fixture
        .state
        .hub
        .publish_intent(
            &owner_a.session,
            ClientMessage::CancelTrade {
                league_id,
                trade_id: cancelled,
            },
        )
        .await;

    let vetoed = propose(1).await;
    fixture
        .state
        .hub
        .publish_intent(
            &commish.session,
            ClientMessage::VetoTrade {
                league_id,
                trade_id: vetoed,
                notes: Some("collusion".to_string()),
            },
        )
        .await;

    for (trade_id, expected) in [
        (rejected, TradeStatus::Rejected),
        (cancelled, TradeStatus::Cancelled),
        (vetoed, TradeStatus::Vetoed),
    ] {
        let (trade, _) = fixture
            .state
            .gateway
            .trades
            .get_with_assets(trade_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(trade.status, expected);
    }

    // No pending trades remain, no ownership changed
    assert!(fixture
        .state
        .gateway
        .trades
        .list_pending(league_id)
        .await
        .unwrap()
        .is_empty());
    let picks = fixture
        .state
        .gateway
        .picks
        .list_season(league_id, 2026)
        .await
        .unwrap();
    assert!(picks
        .iter()
        .all(|p| p.current_owner_team_id == p.original_owner_team_id));
}

#[tokio::test]
async fn test_expired_trade_flips_on_touch() {
    let fixture = build_league(LeagueSpec::default());
    let league_id = fixture.league_id;
    let team_a = fixture.teams[0].id;
    let team_b = fixture.teams[1].id;

    let commish = connect(&fixture, fixture.commissioner_user).await;
    let mut owner_b = connect(&fixture, fixture.owners[1]).await;

    fixture
        .state
        .hub
        .publish_intent(
            &commish.session,
            ClientMessage::UpdateOrder {
                league_id,
                team_ids: vec![team_a, team_b],
            },
        )
        .await;

    // Plant a trade whose lifetime has already lapsed
    let pick_id = pick_id_by_overall(&fixture, 1).await;
    let (mut trade, assets) = Trade::propose(
        league_id,
        team_a,
        team_b,
        &[ProposedAsset {
            from_team_id: team_a,
            asset: AssetRef::DraftPick { pick_id },
        }],
    )
    .unwrap();
    trade.expires_at = Utc::now() - Duration::hours(1);
    TradeRepository::create(&fixture.store, &trade, &assets)
        .await
        .unwrap();

    owner_b.drain();
    fixture
        .state
        .hub
        .publish_intent(
            &owner_b.session,
            ClientMessage::AcceptTrade {
                league_id,
                trade_id: trade.id,
            },
        )
        .await;

    let (reloaded, _) = fixture
        .state
        .gateway
        .trades
        .get_with_assets(trade.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(reloaded.status, TradeStatus::Expired);

    // Requester was told, nothing was broadcast
    let events = owner_b.drain();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0]["event"], "Error");
    assert_eq!(events[0]["code"], "TRADE_EXPIRED");

    let pick = fixture
        .state
        .gateway
        .picks
        .get(pick_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(pick.current_owner_team_id, team_a);
}

#[tokio::test]
async fn test_force_accept_by_commissioner() {
    let fixture = build_league(LeagueSpec {
        pause_on_trade: false,
        ..LeagueSpec::default()
    });
    let league_id = fixture.league_id;
    let team_a = fixture.teams[0].id;
    let team_b = fixture.teams[1].id;

    let commish = connect(&fixture, fixture.commissioner_user).await;
    let owner_a = connect(&fixture, fixture.owners[0]).await;

    fixture
        .state
        .hub
        .publish_intent(
            &commish.session,
            ClientMessage::UpdateOrder {
                league_id,
                team_ids: vec![team_a, team_b],
            },
        )
        .await;

    let pick_id = pick_id_by_overall(&fixture, 1).await;
    fixture
        .state
        .hub
        .publish_intent(
            &owner_a.session,
            ClientMessage::ProposeTrade {
                league_id,
                receiver_team_id: team_b,
                assets: vec![ProposedAsset {
                    from_team_id: team_a,
                    asset: AssetRef::DraftPick { pick_id },
                }],
            },
        )
        .await;
    let trade_id = fixture
        .state
        .gateway
        .trades
        .list_pending(league_id)
        .await
        .unwrap()[0]
        .0
        .id;

    fixture
        .state
        .hub
        .publish_intent(
            &commish.session,
            ClientMessage::ForceAcceptTrade { league_id, trade_id },
        )
        .await;

    let (trade, _) = fixture
        .state
        .gateway
        .trades
        .get_with_assets(trade_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(trade.status, TradeStatus::Completed);
    assert!(trade.forced_by_commissioner);
}
