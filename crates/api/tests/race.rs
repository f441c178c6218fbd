//! Duplicate-pick race: two concurrent intents for the same player resolve
//! to exactly one success.

mod common;

use common::{build_league, connect, draft_state, roster_player_ids, LeagueSpec};
use domain::auth::Actor;
use domain::repositories::{PickRepository, RosterRepository};
use domain::errors::DomainError;
use websocket::ClientMessage;

#[tokio::test]
async fn test_concurrent_picks_of_same_player_single_success() {
    let fixture = build_league(LeagueSpec::default());
    let league_id = fixture.league_id;
    let team_a = fixture.teams[0].id;
    let p1 = fixture.players[0].id;

    let commish = connect(&fixture, fixture.commissioner_user).await;
    fixture
        .state
        .hub
        .publish_intent(&commish.session, ClientMessage::StartDraft { league_id })
        .await;

    let coordinator = fixture.state.registry.acquire(league_id);
    let actor = Actor::member(fixture.owners[0], Some(team_a), false);

    // The owner double-submits the same pick
    let (first, second) = tokio::join!(
        coordinator.make_pick(&actor, team_a, p1),
        coordinator.make_pick(&actor, team_a, p1),
    );

    let results = [first, second];
    let successes = results.iter().filter(|r| r.is_ok()).count();
    assert_eq!(successes, 1, "exactly one of the two picks must land");

    let failure = results
        .iter()
        .find_map(|r| r.as_ref().err())
        .expect("one pick must fail");
    assert!(
        matches!(failure, DomainError::PlayerUnavailable(_)),
        "loser gets PLAYER_UNAVAILABLE, got {:?}",
        failure
    );

    // State is exactly what a single successful pick produces
    let state = draft_state(&fixture).await;
    assert_eq!(state.current_pick, 2);
    assert_eq!(roster_player_ids(&fixture, team_a).await, vec![p1]);

    let pick1 = fixture
        .state
        .gateway
        .picks
        .get_by_overall(league_id, 2026, 1)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(pick1.selected_player_id, Some(p1));
    assert!(pick1.is_complete);
}

#[tokio::test]
async fn test_concurrent_picks_of_different_players() {
    let fixture = build_league(LeagueSpec::default());
    let league_id = fixture.league_id;
    let team_a = fixture.teams[0].id;
    let team_b = fixture.teams[1].id;

    let commish = connect(&fixture, fixture.commissioner_user).await;
    fixture
        .state
        .hub
        .publish_intent(&commish.session, ClientMessage::StartDraft { league_id })
        .await;

    let coordinator = fixture.state.registry.acquire(league_id);
    let actor_a = Actor::member(fixture.owners[0], Some(team_a), false);
    let actor_b = Actor::member(fixture.owners[1], Some(team_b), false);

    // A picks while B races to pick out of turn with a different player.
    // Whichever order the queue settles on, the books must balance: every
    // completed pick's player is rostered exactly once.
    let (_ra, _rb) = tokio::join!(
        coordinator.make_pick(&actor_a, team_a, fixture.players[0].id),
        coordinator.make_pick(&actor_b, team_b, fixture.players[1].id),
    );

    let picks = fixture
        .state
        .gateway
        .picks
        .list_season(league_id, 2026)
        .await
        .unwrap();
    let rosters = fixture
        .state
        .gateway
        .rosters
        .list(league_id)
        .await
        .unwrap();

    for pick in picks.iter().filter(|p| p.is_complete) {
        let player_id = pick.selected_player_id.unwrap();
        let holders: Vec<_> = rosters.iter().filter(|r| r.player_id == player_id).collect();
        assert_eq!(holders.len(), 1);
        assert_eq!(holders[0].team_id, pick.current_owner_team_id);
    }
    // No player appears on two rosters
    let mut seen = std::collections::HashSet::new();
    for entry in &rosters {
        assert!(seen.insert(entry.player_id));
    }
}
