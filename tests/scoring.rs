//! Integration tests for score validation and score submission / editing.

use badminton_tournament_web::{
    edit_score, is_valid_score, schedule_round_robin, submit_score, Player, Team, Tournament,
    TournamentError, TournamentStatus,
};
use uuid::Uuid;

fn tournament_with_teams(n: usize) -> Tournament {
    let players: Vec<Player> = (0..n * 2).map(|i| Player::new(format!("P{i}"))).collect();
    let teams = players
        .chunks_exact(2)
        .map(|pair| Team::new(pair[0].id, pair[1].id).unwrap())
        .collect();
    let mut t = Tournament::new("Cup", Uuid::new_v4(), players, teams);
    schedule_round_robin(&mut t);
    t
}

#[test]
fn score_table_matches_badminton_rules() {
    let cases = [
        ((21, 19), true),
        ((21, 20), false),
        ((22, 20), true),
        ((23, 21), true),
        ((23, 20), false),
        ((29, 27), true),
        ((30, 29), true),
        ((30, 28), false),
        ((31, 29), false),
        ((20, 18), false),
        ((21, 0), true),
        ((21, 21), false),
        ((0, 0), false),
    ];
    for ((a, b), expected) in cases {
        assert_eq!(is_valid_score(a, b), expected, "{a}-{b}");
        assert_eq!(is_valid_score(b, a), expected, "{b}-{a}");
    }
}

#[test]
fn score_past_21_must_be_won_by_exactly_two() {
    assert!(is_valid_score(25, 23));
    assert!(!is_valid_score(25, 22));
    assert!(!is_valid_score(25, 20));
}

#[test]
fn negative_scores_are_rejected() {
    assert!(!is_valid_score(-1, 21));
    assert!(!is_valid_score(21, -2));
}

#[test]
fn invalid_score_leaves_match_untouched() {
    let mut t = tournament_with_teams(4);
    let id = t.matches[0].id;
    let err = submit_score(&mut t, id, 21, 20).unwrap_err();
    assert_eq!(err, TournamentError::InvalidScore { score_1: 21, score_2: 20 });
    let m = t.get_match(id).unwrap();
    assert!(!m.completed);
    assert_eq!((m.score_1, m.score_2), (0, 0));
}

#[test]
fn submit_records_score_and_completes_match() {
    let mut t = tournament_with_teams(4);
    let id = t.matches[0].id;
    submit_score(&mut t, id, 19, 21).unwrap();
    let m = t.get_match(id).unwrap();
    assert!(m.completed);
    assert_eq!((m.score_1, m.score_2), (19, 21));
    assert_eq!(m.winner(), Some(m.team_2));
    assert_eq!(m.loser(), Some(m.team_1));
}

#[test]
fn submit_twice_requires_edit_first() {
    let mut t = tournament_with_teams(4);
    let id = t.matches[0].id;
    submit_score(&mut t, id, 21, 10).unwrap();
    assert_eq!(
        submit_score(&mut t, id, 21, 12),
        Err(TournamentError::MatchAlreadyCompleted(id))
    );
    edit_score(&mut t, id).unwrap();
    submit_score(&mut t, id, 21, 12).unwrap();
    assert_eq!(t.get_match(id).unwrap().score_2, 12);
}

#[test]
fn unknown_match_is_reported() {
    let mut t = tournament_with_teams(4);
    let id = Uuid::new_v4();
    assert_eq!(submit_score(&mut t, id, 21, 10), Err(TournamentError::MatchNotFound(id)));
    assert_eq!(edit_score(&mut t, id), Err(TournamentError::MatchNotFound(id)));
}

#[test]
fn edit_pending_match_is_rejected() {
    let mut t = tournament_with_teams(4);
    let id = t.matches[0].id;
    assert_eq!(edit_score(&mut t, id), Err(TournamentError::MatchNotCompleted(id)));
}

#[test]
fn edit_reverts_only_that_match() {
    let mut t = tournament_with_teams(4);
    let first = t.matches[0].id;
    let second = t.matches[1].id;
    submit_score(&mut t, first, 21, 10).unwrap();
    submit_score(&mut t, second, 21, 11).unwrap();

    edit_score(&mut t, first).unwrap();

    let m = t.get_match(first).unwrap();
    assert!(!m.completed);
    assert_eq!((m.score_1, m.score_2), (0, 0));
    assert!(t.get_match(second).unwrap().completed);
    assert_eq!(t.status, TournamentStatus::Ongoing);
}

#[test]
fn cancelled_tournament_rejects_scores() {
    let mut t = tournament_with_teams(1);
    assert_eq!(t.status, TournamentStatus::Cancelled);
    assert!(t.matches.is_empty());
    assert_eq!(
        submit_score(&mut t, Uuid::new_v4(), 21, 10),
        Err(TournamentError::InvalidState)
    );
}
