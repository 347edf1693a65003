use std::fmt;
use std::str::FromStr;
use serde::{Serialize, Deserialize};

/// Number of segments (quarters) in one game
pub const SEGMENTS_PER_GAME: usize = 4;

pub const SUBSTITUTE_LABEL: &str = "Substitute";

/// A field position with a required headcount per segment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    Goalie,
    Defender,
    Midfielder,
    Forward,
}

impl Role {
    /// Fill order used when building a segment
    pub const ALL: [Role; 4] = [Role::Goalie, Role::Defender, Role::Midfielder, Role::Forward];

    pub fn label(self) -> &'static str {
        match self {
            Role::Goalie => "Goalie",
            Role::Defender => "Defender",
            Role::Midfielder => "Midfielder",
            Role::Forward => "Forward",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::ALL
            .into_iter()
            .find(|role| role.label().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("Unknown role: {}", s))
    }
}

/// What a slot in a segment is filled for: a field role or the substitute bench
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum SlotRole {
    Field(Role),
    Substitute,
}

impl SlotRole {
    pub fn field_role(self) -> Option<Role> {
        match self {
            SlotRole::Field(role) => Some(role),
            SlotRole::Substitute => None,
        }
    }

    pub fn is_substitute(self) -> bool {
        matches!(self, SlotRole::Substitute)
    }

    pub fn label(self) -> &'static str {
        match self {
            SlotRole::Field(role) => role.label(),
            SlotRole::Substitute => SUBSTITUTE_LABEL,
        }
    }
}

impl fmt::Display for SlotRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl From<SlotRole> for String {
    fn from(slot: SlotRole) -> Self {
        slot.label().to_string()
    }
}

impl TryFrom<String> for SlotRole {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if value.trim().eq_ignore_ascii_case(SUBSTITUTE_LABEL) {
            return Ok(SlotRole::Substitute);
        }
        value.parse::<Role>().map(SlotRole::Field)
    }
}

/// Historical appearance count for every role
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleCounts {
    #[serde(default)]
    pub goalie_count: u32,
    #[serde(default)]
    pub defender_count: u32,
    #[serde(default)]
    pub midfielder_count: u32,
    #[serde(default)]
    pub forward_count: u32,
}

impl RoleCounts {
    pub fn get(&self, role: Role) -> u32 {
        match role {
            Role::Goalie => self.goalie_count,
            Role::Defender => self.defender_count,
            Role::Midfielder => self.midfielder_count,
            Role::Forward => self.forward_count,
        }
    }

    pub fn get_mut(&mut self, role: Role) -> &mut u32 {
        match role {
            Role::Goalie => &mut self.goalie_count,
            Role::Defender => &mut self.defender_count,
            Role::Midfielder => &mut self.midfielder_count,
            Role::Forward => &mut self.forward_count,
        }
    }
}

fn default_active() -> bool {
    true
}

/// A roster entry with its playtime history
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub name: String,
    #[serde(flatten)]
    pub role_counts: RoleCounts,
    #[serde(rename = "totalQuarters", default)]
    pub total_segments: u32,
    #[serde(rename = "quartersThisGame", default)]
    pub segments_this_game: u32,
    #[serde(default = "default_active")]
    pub active: bool,
}

impl Player {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            role_counts: RoleCounts::default(),
            total_segments: 0,
            segments_this_game: 0,
            active: true,
        }
    }

    pub fn role_count(&self, role: Role) -> u32 {
        self.role_counts.get(role)
    }

    /// Records one field-role appearance in the current game.
    /// Counters stop at `u32::MAX` instead of overflowing.
    pub(crate) fn record_appearance(&mut self, role: Role) {
        let count = self.role_counts.get_mut(role);
        *count = count.saturating_add(1);
        self.total_segments = self.total_segments.saturating_add(1);
        self.segments_this_game = self.segments_this_game.saturating_add(1);
    }

    /// Reverses one field-role appearance. Returns false without touching any
    /// counter when one of them is already zero.
    pub(crate) fn revoke_appearance(&mut self, role: Role) -> bool {
        if !self.can_revoke(role) {
            return false;
        }
        *self.role_counts.get_mut(role) -= 1;
        self.total_segments -= 1;
        self.segments_this_game -= 1;
        true
    }

    pub(crate) fn can_revoke(&self, role: Role) -> bool {
        self.role_count(role) > 0 && self.total_segments > 0 && self.segments_this_game > 0
    }
}

/// Formation and playtime caps for one game
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineupSettings {
    #[serde(rename = "maxQuartersPerGame", default = "LineupSettings::default_max")]
    pub max_segments_per_game: u32,
    #[serde(rename = "minQuartersPerGame", default = "LineupSettings::default_min")]
    pub min_segments_per_game: u32,
    #[serde(rename = "numGoalies", default = "LineupSettings::default_goalies")]
    pub num_goalies: u32,
    #[serde(rename = "numDefenders", default = "LineupSettings::default_defenders")]
    pub num_defenders: u32,
    #[serde(rename = "numMidfielders", default = "LineupSettings::default_midfielders")]
    pub num_midfielders: u32,
    #[serde(rename = "numForwards", default = "LineupSettings::default_forwards")]
    pub num_forwards: u32,
}

impl LineupSettings {
    fn default_max() -> u32 { 3 }
    fn default_min() -> u32 { 2 }
    fn default_goalies() -> u32 { 1 }
    fn default_defenders() -> u32 { 3 }
    fn default_midfielders() -> u32 { 2 }
    fn default_forwards() -> u32 { 1 }

    /// Required headcount for a role in every segment
    pub fn required(&self, role: Role) -> u32 {
        match role {
            Role::Goalie => self.num_goalies,
            Role::Defender => self.num_defenders,
            Role::Midfielder => self.num_midfielders,
            Role::Forward => self.num_forwards,
        }
    }

    pub fn set_required(&mut self, role: Role, count: u32) {
        match role {
            Role::Goalie => self.num_goalies = count,
            Role::Defender => self.num_defenders = count,
            Role::Midfielder => self.num_midfielders = count,
            Role::Forward => self.num_forwards = count,
        }
    }

    /// Field slots per segment across all roles
    pub fn formation_size(&self) -> u32 {
        Role::ALL.iter().map(|&role| self.required(role)).sum()
    }
}

impl Default for LineupSettings {
    fn default() -> Self {
        Self {
            max_segments_per_game: Self::default_max(),
            min_segments_per_game: Self::default_min(),
            num_goalies: Self::default_goalies(),
            num_defenders: Self::default_defenders(),
            num_midfielders: Self::default_midfielders(),
            num_forwards: Self::default_forwards(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotAssignment {
    pub name: String,
    pub role: SlotRole,
}

/// One quarter of a game
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Segment {
    pub slots: Vec<SlotAssignment>,
}

impl Segment {
    pub fn contains(&self, name: &str) -> bool {
        self.slots.iter().any(|slot| slot.name == name)
    }

    /// Slots holding a field role in this segment
    pub fn field_players(&self) -> impl Iterator<Item = &SlotAssignment> {
        self.slots.iter().filter(|slot| !slot.role.is_substitute())
    }

    pub fn role_of(&self, name: &str) -> Option<SlotRole> {
        self.slots.iter().find(|slot| slot.name == name).map(|slot| slot.role)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GamePlan {
    pub segments: Vec<Segment>,
}

impl GamePlan {
    /// Field-role slots held by a player across the whole plan
    pub fn field_appearances(&self, name: &str) -> u32 {
        self.segments
            .iter()
            .flat_map(|segment| segment.field_players())
            .filter(|slot| slot.name == name)
            .count() as u32
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineupResult {
    pub plan: GamePlan,
    pub updated_roster: Vec<Player>,
}
