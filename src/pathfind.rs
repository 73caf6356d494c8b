use std::collections::VecDeque;

use crate::grid::GridMap;
use crate::types::{Direction, Vec2};

// Fixed expansion order; ties between equal-length paths always resolve the
// same way, which keeps ghost movement reproducible.
const NEIGHBOR_ORDER: [Direction; 4] = [
    Direction::Down,
    Direction::Up,
    Direction::Right,
    Direction::Left,
];

const UNVISITED: u32 = u32::MAX;
const NO_PREDECESSOR: u32 = u32::MAX - 1;

// Breadth-first next-step search over the grid. The predecessor map is an
// arena indexed by flattened cell id, so one value can be reused across
// ticks without reallocating.
#[derive(Clone, Debug, Default)]
pub struct PathFinder {
    prev: Vec<u32>,
    queue: VecDeque<u32>,
}

impl PathFinder {
    pub fn new() -> Self {
        Self::default()
    }

    // Returns the first step of a shortest path from `from` to `to`, walls
    // tested as a ghost. The destination itself is accepted even when it is
    // a wall cell; an unreachable destination yields `Direction::None`.
    pub fn next_step(&mut self, grid: &GridMap, from: Vec2, to: Vec2) -> Direction {
        if from == to {
            return Direction::None;
        }

        let width = grid.width();
        let height = grid.height();
        self.prev.clear();
        self.prev.resize((width * height) as usize, UNVISITED);
        self.queue.clear();

        let start = (from.y * width + from.x) as u32;
        let goal = (to.y * width + to.x) as usize;
        self.prev[start as usize] = NO_PREDECESSOR;
        self.queue.push_back(start);

        let mut reached = false;
        'search: while let Some(current) = self.queue.pop_front() {
            let cx = current as i32 % width;
            let cy = current as i32 / width;
            for dir in NEIGHBOR_ORDER {
                let (dx, dy) = dir.delta();
                let nx = grid.wrap_col(cx + dx);
                let ny = cy + dy;

                if nx == to.x && ny == to.y {
                    self.prev[goal] = current;
                    reached = true;
                    break 'search;
                }
                if ny < 0 || ny >= height {
                    continue;
                }
                let next = (ny * width + nx) as usize;
                if self.prev[next] == UNVISITED && !grid.is_wall(nx, ny, true) {
                    self.prev[next] = current;
                    self.queue.push_back(next as u32);
                }
            }
        }

        if !reached {
            return Direction::None;
        }

        // Walk back until the cell whose predecessor is the start.
        let mut step = goal as u32;
        while self.prev[step as usize] != start {
            if self.prev[step as usize] == NO_PREDECESSOR {
                break;
            }
            step = self.prev[step as usize];
        }

        let sx = step as i32 % width;
        let sy = step as i32 / width;
        let mut dx = sx - from.x;
        let dy = sy - from.y;
        if dx.abs() > 1 {
            // A column delta wider than one cell means the step wrapped.
            dx = if dx < 0 { 1 } else { -1 };
        }
        direction_for(dx, dy)
    }
}

fn direction_for(dx: i32, dy: i32) -> Direction {
    match (dx, dy) {
        (0, -1) => Direction::Up,
        (0, 1) => Direction::Down,
        (-1, 0) => Direction::Left,
        (1, 0) => Direction::Right,
        _ => Direction::None,
    }
}
