use std::cmp::Ordering;
use std::collections::HashSet;
use tracing::debug;
use super::types::{LineupSettings, Player, SlotRole};

/// Ordering used to rank candidates for a slot: fewest appearances in the
/// requested role, then fewest lifetime segments, then name.
/// Substitute slots rank by lifetime segments only.
fn compare_for_slot(a: &Player, b: &Player, target: SlotRole) -> Ordering {
    let (key_a, key_b) = match target {
        SlotRole::Field(role) => (a.role_count(role), b.role_count(role)),
        SlotRole::Substitute => (a.total_segments, b.total_segments),
    };
    key_a
        .cmp(&key_b)
        .then_with(|| a.total_segments.cmp(&b.total_segments))
        .then_with(|| a.name.cmp(&b.name))
}

/// Picks the most deserving player for the next slot of a segment.
///
/// Players already in `chosen` or marked inactive are never considered. Players
/// below the per-game minimum are served first; players at the per-game maximum
/// are passed over unless nobody else is left. A field-role pick bumps the
/// winner's role, lifetime and per-game counters; every pick is added to `chosen`.
///
/// Returns the roster index of the winner, or `None` once every active player
/// already has a place in this segment.
pub fn choose_player(
    roster: &mut [Player],
    target: SlotRole,
    chosen: &mut HashSet<String>,
    settings: &LineupSettings,
) -> Option<usize> {
    // Filter candidates
    let mut available: Vec<usize> = roster
        .iter()
        .enumerate()
        .filter(|(_, p)| p.active && !chosen.contains(&p.name))
        .map(|(idx, _)| idx)
        .collect();

    if available.is_empty() {
        return None;
    }

    // Sort by role count, lifetime total, then name
    available.sort_by(|&a, &b| compare_for_slot(&roster[a], &roster[b], target));

    // Serve players below the minimum first
    let under_min: Vec<usize> = available
        .iter()
        .copied()
        .filter(|&idx| roster[idx].segments_this_game < settings.min_segments_per_game)
        .collect();
    let pool = if under_min.is_empty() { &available } else { &under_min };

    // First candidate still under the cap
    let winner = match pool
        .iter()
        .copied()
        .find(|&idx| roster[idx].segments_this_game < settings.max_segments_per_game)
    {
        Some(idx) => idx,
        None => {
            // Everyone left is capped; take the best of the whole pool anyway
            let idx = available[0];
            debug!(
                player = %roster[idx].name,
                slot = %target,
                segments = roster[idx].segments_this_game,
                "All candidates at the per-game cap, falling back"
            );
            idx
        }
    };

    if let SlotRole::Field(role) = target {
        roster[winner].record_appearance(role);
    }
    chosen.insert(roster[winner].name.clone());
    Some(winner)
}
