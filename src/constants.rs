use crate::types::Vec2;

pub const GRID_WIDTH: i32 = 21;
pub const GRID_HEIGHT: i32 = 21;

// Frames between successive updates of each subsystem.
pub const PLAYER_CADENCE: u32 = 10;
pub const GHOST_CADENCE: u32 = 25;
pub const TIMER_CADENCE: u32 = 10;

// Frightened-timer units; one unit expires per TIMER_CADENCE frames.
pub const FRIGHTENED_DURATION: u32 = 60;

pub const PELLET_SCORE: i32 = 10;
pub const POWER_PELLET_SCORE: i32 = 50;
pub const GHOST_SCORE: i32 = 200;

pub const GHOST_COUNT: usize = 4;

pub const TILE_SIZE: f32 = 25.0;

pub fn ghost_home(index: usize) -> Vec2 {
    let cx = GRID_WIDTH / 2;
    let cy = GRID_HEIGHT / 2;
    match index % GHOST_COUNT {
        0 => Vec2 { x: cx, y: cy - 2 },
        1 => Vec2 { x: cx - 1, y: cy },
        2 => Vec2 { x: cx + 1, y: cy },
        _ => Vec2 { x: cx, y: cy + 1 },
    }
}

pub fn scatter_corner(index: usize) -> Vec2 {
    match index % GHOST_COUNT {
        0 => Vec2 { x: 1, y: 1 },
        1 => Vec2 { x: GRID_WIDTH - 2, y: 1 },
        2 => Vec2 { x: 1, y: GRID_HEIGHT - 2 },
        _ => Vec2 {
            x: GRID_WIDTH - 2,
            y: GRID_HEIGHT - 2,
        },
    }
}
