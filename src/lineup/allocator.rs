use tracing::info;
use super::repair::repair_underplay;
use super::segment::build_segment;
use super::types::{GamePlan, LineupResult, LineupSettings, Player, SEGMENTS_PER_GAME};

/// Runs the greedy pass over all segments of one game. Counters carry over
/// between segments, so each segment sees the playtime handed out before it.
pub fn build_game_plan(roster: &mut [Player], settings: &LineupSettings) -> GamePlan {
    let segments = (0..SEGMENTS_PER_GAME)
        .map(|_| build_segment(roster, settings))
        .collect();
    GamePlan { segments }
}

/// Plans a full game for the roster.
///
/// The roster is copied with every per-game counter reset to zero; the input is
/// never touched. The returned roster carries the role, lifetime and per-game
/// counters after both the greedy pass and the underplay repair, and is meant to
/// be stored as the baseline for the next game.
pub fn allocate_game(roster: &[Player], settings: &LineupSettings) -> LineupResult {
    let mut working: Vec<Player> = roster
        .iter()
        .cloned()
        .map(|mut p| {
            p.segments_this_game = 0;
            p
        })
        .collect();

    let mut plan = build_game_plan(&mut working, settings);
    let swaps = repair_underplay(&mut working, &mut plan, settings);

    info!(
        players = working.iter().filter(|p| p.active).count(),
        segments = plan.segments.len(),
        swaps = swaps.len(),
        "Lineup generated"
    );

    LineupResult {
        plan,
        updated_roster: working,
    }
}

/// Active players still below the per-game minimum
pub fn underplayed_players<'a>(roster: &'a [Player], settings: &LineupSettings) -> Vec<&'a Player> {
    roster
        .iter()
        .filter(|p| p.active && p.segments_this_game < settings.min_segments_per_game)
        .collect()
}
