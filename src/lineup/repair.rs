use tracing::{debug, warn};
use super::types::{GamePlan, LineupSettings, Player, Role, Segment, SlotAssignment, SlotRole};

/// A field slot handed from an over-served player to an under-served one
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Swap {
    pub segment: usize,
    pub role: Role,
    pub from: String,
    pub to: String,
}

/// Finds the first field slot in the segment whose holder is above the
/// per-game minimum and can give up one appearance
fn find_donor_slot(
    segment: &Segment,
    roster: &[Player],
    recipient: &str,
    min_segments: u32,
) -> Option<(usize, usize, Role)> {
    segment.slots.iter().enumerate().find_map(|(slot_idx, slot)| {
        let role = slot.role.field_role()?;
        if slot.name == recipient {
            return None;
        }
        let donor_idx = roster.iter().position(|p| p.name == slot.name)?;
        let donor = &roster[donor_idx];
        if donor.segments_this_game > min_segments && donor.can_revoke(role) {
            Some((slot_idx, donor_idx, role))
        } else {
            None
        }
    })
}

/// Hands the field slot to the recipient and moves the donor onto the bench
/// entry the recipient held, so each name still appears once in the segment
fn swap_into_segment(segment: &mut Segment, slot_idx: usize, recipient: &str) -> String {
    let donor = std::mem::replace(&mut segment.slots[slot_idx].name, recipient.to_string());
    match segment
        .slots
        .iter_mut()
        .enumerate()
        .find(|(idx, slot)| *idx != slot_idx && slot.name == recipient)
    {
        Some((_, bench)) => bench.name = donor.clone(),
        None => segment.slots.push(SlotAssignment {
            name: donor.clone(),
            role: SlotRole::Substitute,
        }),
    }
    donor
}

/// Tries to lift every player below the per-game minimum up to it by taking
/// field slots from teammates above the minimum.
///
/// Players are handled in roster order and segments in plan order. A swap is
/// never undone, so later players may be left short when earlier swaps used
/// up the donors. Counters and the plan are updated in place.
pub fn repair_underplay(
    roster: &mut [Player],
    plan: &mut GamePlan,
    settings: &LineupSettings,
) -> Vec<Swap> {
    let min_segments = settings.min_segments_per_game;
    // Collect players short of the minimum once, before any swap
    let underplayed: Vec<usize> = roster
        .iter()
        .enumerate()
        .filter(|(_, p)| p.active && p.segments_this_game < min_segments)
        .map(|(idx, _)| idx)
        .collect();

    let mut swaps = Vec::new();

    for recipient_idx in underplayed {
        let recipient = roster[recipient_idx].name.clone();

        for (segment_idx, segment) in plan.segments.iter_mut().enumerate() {
            if roster[recipient_idx].segments_this_game >= min_segments {
                break;
            }

            // Already on the field in this segment
            if segment.field_players().any(|slot| slot.name == recipient) {
                continue;
            }

            let Some((slot_idx, donor_idx, role)) =
                find_donor_slot(segment, roster, &recipient, min_segments)
            else {
                continue;
            };

            // Move the appearance from donor to recipient, then fix up the segment
            if !roster[donor_idx].revoke_appearance(role) {
                continue;
            }
            roster[recipient_idx].record_appearance(role);
            let donor = swap_into_segment(segment, slot_idx, &recipient);

            debug!(
                segment = segment_idx + 1,
                role = %role,
                from = %donor,
                to = %recipient,
                "Swapped field slot to under-served player"
            );
            swaps.push(Swap {
                segment: segment_idx,
                role,
                from: donor,
                to: recipient.clone(),
            });
        }

        let player = &roster[recipient_idx];
        // Best effort: report and move on
        if player.segments_this_game < min_segments {
            warn!(
                player = %player.name,
                segments = player.segments_this_game,
                min = min_segments,
                "Could not bring player up to the per-game minimum"
            );
        }
    }

    swaps
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slot(name: &str, role: SlotRole) -> SlotAssignment {
        SlotAssignment { name: name.to_string(), role }
    }

    fn played(name: &str, role: Role, segments: u32) -> Player {
        let mut p = Player::new(name);
        for _ in 0..segments {
            p.record_appearance(role);
        }
        p
    }

    fn settings(min: u32) -> LineupSettings {
        LineupSettings { min_segments_per_game: min, ..LineupSettings::default() }
    }

    #[test]
    fn swaps_bench_player_with_over_served_holder() {
        let goalie = SlotRole::Field(Role::Goalie);
        let mut roster = vec![played("Abel", Role::Goalie, 4), Player::new("Taj")];
        let mut plan = GamePlan {
            segments: (0..4)
                .map(|_| Segment { slots: vec![slot("Abel", goalie), slot("Taj", SlotRole::Substitute)] })
                .collect(),
        };

        let swaps = repair_underplay(&mut roster, &mut plan, &settings(2));

        assert_eq!(swaps.len(), 2);
        assert_eq!(swaps[0].segment, 0);
        assert_eq!(swaps[1].segment, 1);
        assert_eq!(plan.segments[0].slots, vec![slot("Taj", goalie), slot("Abel", SlotRole::Substitute)]);
        assert_eq!(plan.segments[2].slots, vec![slot("Abel", goalie), slot("Taj", SlotRole::Substitute)]);

        assert_eq!(roster[0].segments_this_game, 2);
        assert_eq!(roster[0].role_count(Role::Goalie), 2);
        assert_eq!(roster[0].total_segments, 2);
        assert_eq!(roster[1].segments_this_game, 2);
        assert_eq!(roster[1].role_count(Role::Goalie), 2);
        assert_eq!(roster[1].total_segments, 2);
    }

    #[test]
    fn conserves_total_playtime() {
        let def = SlotRole::Field(Role::Defender);
        let mut roster = vec![
            played("Talon", Role::Defender, 4),
            played("Xander", Role::Defender, 3),
            Player::new("James"),
            played("Zeke", Role::Defender, 1),
        ];
        let mut plan = GamePlan {
            segments: vec![
                Segment { slots: vec![slot("Talon", def), slot("Xander", def), slot("James", SlotRole::Substitute), slot("Zeke", SlotRole::Substitute)] },
                Segment { slots: vec![slot("Talon", def), slot("Xander", def), slot("James", SlotRole::Substitute), slot("Zeke", SlotRole::Substitute)] },
                Segment { slots: vec![slot("Talon", def), slot("Xander", def), slot("James", SlotRole::Substitute), slot("Zeke", SlotRole::Substitute)] },
                Segment { slots: vec![slot("Talon", def), slot("Zeke", def), slot("James", SlotRole::Substitute), slot("Xander", SlotRole::Substitute)] },
            ],
        };
        let before: u32 = roster.iter().map(|p| p.segments_this_game).sum();

        repair_underplay(&mut roster, &mut plan, &settings(2));

        let after: u32 = roster.iter().map(|p| p.segments_this_game).sum();
        assert_eq!(before, after);
        for player in &roster {
            assert_eq!(plan.field_appearances(&player.name), player.segments_this_game);
            assert!(player.segments_this_game >= 2, "{} still short", player.name);
        }
        for segment in &plan.segments {
            let mut names: Vec<&str> = segment.slots.iter().map(|s| s.name.as_str()).collect();
            names.sort();
            names.dedup();
            assert_eq!(names.len(), segment.slots.len());
        }
    }

    #[test]
    fn leaves_player_short_without_donors() {
        let fwd = SlotRole::Field(Role::Forward);
        let mut roster = vec![played("Ryder", Role::Forward, 2), Player::new("Grayson")];
        let mut plan = GamePlan {
            segments: vec![
                Segment { slots: vec![slot("Ryder", fwd), slot("Grayson", SlotRole::Substitute)] },
                Segment { slots: vec![slot("Ryder", fwd), slot("Grayson", SlotRole::Substitute)] },
            ],
        };
        let original = plan.clone();

        let swaps = repair_underplay(&mut roster, &mut plan, &settings(2));

        assert!(swaps.is_empty());
        assert_eq!(plan, original);
        assert_eq!(roster[1].segments_this_game, 0);
    }

    #[test]
    fn skips_segments_where_player_is_already_on_the_field() {
        let goalie = SlotRole::Field(Role::Goalie);
        let def = SlotRole::Field(Role::Defender);
        let mut roster = vec![played("Dana", Role::Defender, 3), played("Rhys", Role::Goalie, 1)];
        let mut plan = GamePlan {
            segments: vec![
                Segment { slots: vec![slot("Dana", def), slot("Rhys", goalie)] },
                Segment { slots: vec![slot("Dana", def), slot("Rhys", SlotRole::Substitute)] },
                Segment { slots: vec![slot("Dana", def), slot("Rhys", SlotRole::Substitute)] },
            ],
        };
        let first = plan.segments[0].clone();

        let swaps = repair_underplay(&mut roster, &mut plan, &settings(2));

        assert_eq!(swaps.len(), 1);
        assert_eq!(swaps[0].segment, 1);
        assert_eq!(swaps[0].role, Role::Defender);
        assert_eq!(plan.segments[0], first);
        assert_eq!(plan.segments[1].slots, vec![slot("Rhys", def), slot("Dana", SlotRole::Substitute)]);
        for player in &roster {
            assert_eq!(plan.field_appearances(&player.name), player.segments_this_game);
            assert_eq!(player.segments_this_game, 2);
        }
        assert_eq!(roster[0].role_count(Role::Defender), 2);
        assert_eq!(roster[1].role_count(Role::Defender), 1);
    }

    #[test]
    fn falls_through_to_next_donor_in_segment() {
        let mid = SlotRole::Field(Role::Midfielder);
        let mut hollow = Player::new("Bronx");
        hollow.segments_this_game = 3;
        let mut roster = vec![hollow, played("Cole", Role::Midfielder, 3), Player::new("Tadhg")];
        let mut plan = GamePlan {
            segments: vec![Segment {
                slots: vec![slot("Bronx", mid), slot("Cole", mid), slot("Tadhg", SlotRole::Substitute)],
            }],
        };

        let swaps = repair_underplay(&mut roster, &mut plan, &settings(1));

        assert_eq!(swaps.len(), 1);
        assert_eq!(swaps[0].from, "Cole");
        assert_eq!(swaps[0].to, "Tadhg");
        assert_eq!(
            plan.segments[0].slots,
            vec![slot("Bronx", mid), slot("Tadhg", mid), slot("Cole", SlotRole::Substitute)]
        );
        assert_eq!(roster[0].segments_this_game, 3);
        assert_eq!(roster[1].segments_this_game, 2);
        assert_eq!(roster[2].segments_this_game, 1);
        assert_eq!(roster[2].role_count(Role::Midfielder), 1);
    }

    #[test]
    fn skips_donor_whose_counters_would_go_negative() {
        let mid = SlotRole::Field(Role::Midfielder);
        let mut donor = Player::new("Bronx");
        donor.segments_this_game = 3;
        let mut roster = vec![donor, Player::new("Tadhg")];
        let mut plan = GamePlan {
            segments: vec![Segment { slots: vec![slot("Bronx", mid), slot("Tadhg", SlotRole::Substitute)] }],
        };

        let swaps = repair_underplay(&mut roster, &mut plan, &settings(1));

        assert!(swaps.is_empty());
        assert_eq!(roster[0].segments_this_game, 3);
        assert_eq!(plan.segments[0].slots[0].name, "Bronx");
    }
}
