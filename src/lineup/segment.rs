use std::collections::HashSet;
use super::selector::choose_player;
use super::types::{LineupSettings, Player, Role, Segment, SlotAssignment, SlotRole};

/// Fills one segment: the formation's field roles in fixed order, then every
/// remaining active player on the bench
pub fn build_segment(roster: &mut [Player], settings: &LineupSettings) -> Segment {
    let mut slots = Vec::new();
    let mut chosen: HashSet<String> = HashSet::new();

    for role in Role::ALL {
        let target = SlotRole::Field(role);
        for _ in 0..settings.required(role) {
            if let Some(idx) = choose_player(roster, target, &mut chosen, settings) {
                slots.push(SlotAssignment {
                    name: roster[idx].name.clone(),
                    role: target,
                });
            }
        }
    }

    while slots.len() < roster.len() {
        let Some(idx) = choose_player(roster, SlotRole::Substitute, &mut chosen, settings) else {
            break;
        };
        slots.push(SlotAssignment {
            name: roster[idx].name.clone(),
            role: SlotRole::Substitute,
        });
    }

    Segment { slots }
}
