//! Badminton single-game score validation.

/// Points needed to win a game outright.
pub const GAME_POINT: i64 = 21;
/// Hard cap: the first side to reach it wins.
pub const SCORE_CAP: i64 = 30;

/// Whether `(a, b)` is a legal final score of one badminton game.
///
/// - A game is won at 21 with the opponent on 19 or fewer.
/// - From 20-20 play continues until one side leads by exactly 2 (22-20 .. 29-27).
/// - At 29-29 the next rally decides: 30-29 is the only score at the cap.
pub fn is_valid_score(a: i64, b: i64) -> bool {
    if a < 0 || b < 0 || a == b {
        return false;
    }
    let (hi, lo) = (a.max(b), a.min(b));
    match hi {
        h if h < GAME_POINT => false,
        GAME_POINT => lo <= GAME_POINT - 2,
        h if h < SCORE_CAP => h - lo == 2,
        SCORE_CAP => lo == SCORE_CAP - 1,
        _ => false,
    }
}
