//! Quarter-by-quarter lineup planning for youth soccer.
//!
//! [`allocate_game`] takes a roster with each player's position history and a
//! [`LineupSettings`] formation, and returns a four-quarter [`GamePlan`] plus the
//! roster with updated counters. Field slots go to whoever has played the
//! position least, players below the per-game minimum are served first, and a
//! repair pass hands slots from over-served players to anyone still short.

pub mod display;
pub mod error;
pub mod lineup;
pub mod logging;
pub mod parser;

pub use error::{LineupError, RosterError};
pub use lineup::{
    allocate_game, underplayed_players, validate_lineup, GamePlan, LineupResult, LineupSettings,
    Player, Role, Segment, SlotAssignment, SlotRole, SEGMENTS_PER_GAME,
};
