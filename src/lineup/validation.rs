use std::collections::HashSet;
use crate::error::LineupError;
use super::types::{LineupSettings, Player};

/// Checks a roster and settings pair before generating a lineup
pub fn validate_lineup(roster: &[Player], settings: &LineupSettings) -> Result<(), LineupError> {
    if settings.min_segments_per_game > settings.max_segments_per_game {
        return Err(LineupError::MinAboveMax {
            min: settings.min_segments_per_game,
            max: settings.max_segments_per_game,
        });
    }

    let required = settings.formation_size();
    if required == 0 {
        return Err(LineupError::EmptyFormation);
    }

    let mut seen = HashSet::new();
    for player in roster {
        let name = player.name.trim();
        if name.is_empty() {
            return Err(LineupError::EmptyName);
        }
        if !seen.insert(name) {
            return Err(LineupError::DuplicateName(name.to_string()));
        }
    }

    let active = roster.iter().filter(|p| p.active).count() as u32;
    if active < required {
        return Err(LineupError::NotEnoughPlayers { required, active });
    }

    Ok(())
}
