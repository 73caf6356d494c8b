use serde::Serialize;

use crate::constants::{FRIGHTENED_DURATION, GHOST_CADENCE, PLAYER_CADENCE, TIMER_CADENCE};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
    None,
}

impl Direction {
    pub fn parse_move(value: &str) -> Option<Self> {
        match value {
            "up" => Some(Self::Up),
            "down" => Some(Self::Down),
            "left" => Some(Self::Left),
            "right" => Some(Self::Right),
            "none" => Some(Self::None),
            _ => None,
        }
    }

    pub fn delta(self) -> (i32, i32) {
        match self {
            Self::Up => (0, -1),
            Self::Down => (0, 1),
            Self::Left => (-1, 0),
            Self::Right => (1, 0),
            Self::None => (0, 0),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GhostMode {
    Chase,
    Scatter,
    Frightened,
    Dead,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    NotStarted,
    Running,
    GameOver,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Vec2 {
    pub x: i32,
    pub y: i32,
}

#[derive(Clone, Copy, Debug, Serialize)]
pub struct SimConfig {
    #[serde(rename = "playerCadence")]
    pub player_cadence: u32,
    #[serde(rename = "ghostCadence")]
    pub ghost_cadence: u32,
    #[serde(rename = "timerCadence")]
    pub timer_cadence: u32,
    #[serde(rename = "frightenedDuration")]
    pub frightened_duration: u32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            player_cadence: PLAYER_CADENCE,
            ghost_cadence: GHOST_CADENCE,
            timer_cadence: TIMER_CADENCE,
            frightened_duration: FRIGHTENED_DURATION,
        }
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct PlayerView {
    pub x: i32,
    pub y: i32,
    pub dir: Direction,
    pub rotation: f32,
    pub px: f32,
    pub py: f32,
}

#[derive(Clone, Debug, Serialize)]
pub struct GhostView {
    pub id: usize,
    pub x: i32,
    pub y: i32,
    pub dir: Direction,
    pub mode: GhostMode,
    pub px: f32,
    pub py: f32,
}

#[derive(Clone, Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RuntimeEvent {
    PelletEaten {
        x: i32,
        y: i32,
    },
    PowerPelletEaten {
        x: i32,
        y: i32,
    },
    GhostEaten {
        #[serde(rename = "ghostId")]
        ghost_id: usize,
    },
    GhostReturnedHome {
        #[serde(rename = "ghostId")]
        ghost_id: usize,
    },
    SessionEnded {
        score: i32,
    },
}

#[derive(Clone, Debug, Serialize)]
pub struct Snapshot {
    pub frame: u64,
    pub state: SessionState,
    pub score: i32,
    #[serde(rename = "frightenedTimer")]
    pub frightened_timer: u32,
    pub tiles: Vec<String>,
    pub player: PlayerView,
    pub ghosts: Vec<GhostView>,
    pub events: Vec<RuntimeEvent>,
}

#[derive(Clone, Debug, Serialize)]
pub struct SessionSummary {
    pub state: SessionState,
    pub score: i32,
    pub frames: u64,
    #[serde(rename = "pelletsRemaining")]
    pub pellets_remaining: usize,
}
