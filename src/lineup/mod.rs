pub mod types;
pub mod selector;
pub mod segment;
pub mod repair;
pub mod allocator;
pub mod validation;

pub use types::{
    GamePlan, LineupResult, LineupSettings, Player, Role, RoleCounts, Segment, SlotAssignment,
    SlotRole, SEGMENTS_PER_GAME,
};
pub use selector::choose_player;
pub use segment::build_segment;
pub use repair::{repair_underplay, Swap};
pub use allocator::{allocate_game, build_game_plan, underplayed_players};
pub use validation::validate_lineup;
