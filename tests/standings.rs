//! Integration tests for standings aggregation, ranking and CSV export.

use badminton_tournament_web::{
    compute_standings, schedule_round_robin, submit_score, tournament_standings,
    write_standings_csv, GameMatch, Player, StageTag, Team, Tournament,
};
use uuid::Uuid;

fn team() -> Team {
    Team::new(Uuid::new_v4(), Uuid::new_v4()).unwrap()
}

fn played(team_1: Team, team_2: Team, score_1: u32, score_2: u32) -> GameMatch {
    let mut m = GameMatch::new(team_1, team_2, StageTag::RoundRobin);
    m.score_1 = score_1;
    m.score_2 = score_2;
    m.completed = true;
    m
}

#[test]
fn aggregates_sets_wins_and_points() {
    let (x, y, z) = (team(), team(), team());
    let matches = vec![played(x, y, 21, 15), played(z, x, 19, 21), played(y, z, 23, 21)];

    let standings = compute_standings(&[x, y, z], &matches);

    let top = &standings[0];
    assert_eq!(top.team, x);
    assert_eq!((top.played, top.wins, top.losses, top.points), (2, 2, 0, 4));
    assert_eq!((top.sets_for, top.sets_against, top.set_difference), (42, 34, 8));

    let second = &standings[1];
    assert_eq!(second.team, y);
    assert_eq!((second.wins, second.losses, second.points), (1, 1, 2));
    assert_eq!(second.set_difference, 38 - 42);

    let last = &standings[2];
    assert_eq!(last.team, z);
    assert_eq!((last.played, last.wins, last.losses, last.points), (2, 0, 2, 0));
}

#[test]
fn set_difference_breaks_points_ties() {
    let (x, y, z) = (team(), team(), team());
    let matches = vec![played(x, z, 21, 10), played(y, z, 21, 15)];

    let standings = compute_standings(&[y, x, z], &matches);

    let order: Vec<Team> = standings.iter().map(|s| s.team).collect();
    assert_eq!(order, vec![x, y, z]);
}

#[test]
fn sets_for_breaks_set_difference_ties() {
    let (x, y, z) = (team(), team(), team());
    let matches = vec![played(x, z, 21, 19), played(y, z, 23, 21)];

    let standings = compute_standings(&[x, y, z], &matches);

    assert_eq!(standings[0].team, y);
    assert_eq!(standings[1].team, x);
    assert_eq!(standings[0].set_difference, standings[1].set_difference);
}

#[test]
fn full_ties_keep_team_order() {
    let teams = [team(), team(), team(), team()];
    let standings = compute_standings(&teams, &[]);
    let order: Vec<Team> = standings.iter().map(|s| s.team).collect();
    assert_eq!(order, teams.to_vec());
    assert!(standings.iter().all(|s| s.played == 0 && s.points == 0));
}

#[test]
fn only_completed_round_robin_matches_count() {
    let (x, y) = (team(), team());
    let mut pending = played(y, x, 21, 5);
    pending.completed = false;
    let mut final_match = played(y, x, 21, 5);
    final_match.stage = StageTag::Final;
    let outsider = played(team(), x, 21, 5);

    let standings = compute_standings(&[x, y], &[pending, final_match, outsider]);

    assert!(standings.iter().all(|s| s.played == 0));
}

#[test]
fn standings_are_a_pure_function_of_the_inputs() {
    let (x, y, z) = (team(), team(), team());
    let teams = [x, y, z];
    let matches = vec![played(x, y, 21, 15), played(y, z, 21, 17)];
    assert_eq!(compute_standings(&teams, &matches), compute_standings(&teams, &matches));
}

#[test]
fn csv_export_lists_every_team_in_rank_order() {
    let players: Vec<Player> = ["Ann", "Ben", "Cat", "Dan", "Eve", "Fay"]
        .into_iter()
        .map(Player::new)
        .collect();
    let teams = players
        .chunks_exact(2)
        .map(|p| Team::new(p[0].id, p[1].id).unwrap())
        .collect();
    let mut t = Tournament::new("Export", Uuid::new_v4(), players, teams);
    schedule_round_robin(&mut t);
    let first = t.matches[0].id;
    submit_score(&mut t, first, 21, 12).unwrap();

    let mut buf = Vec::new();
    write_standings_csv(&t, &mut buf).unwrap();
    let text = String::from_utf8(buf).unwrap();
    let lines: Vec<&str> = text.lines().collect();

    assert_eq!(
        lines[0],
        "rank,team,played,wins,losses,points,sets_for,sets_against,set_difference"
    );
    assert_eq!(lines.len(), 4);
    let leader = t.team_label(&tournament_standings(&t)[0].team);
    assert!(lines[1].starts_with(&format!("1,{leader},1,1,0,2,21,12,9")));
}
