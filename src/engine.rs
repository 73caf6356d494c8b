use crate::constants::{ghost_home, scatter_corner, GHOST_COUNT, GHOST_SCORE, TILE_SIZE};
use crate::grid::{GridMap, Tile};
use crate::pathfind::PathFinder;
use crate::types::{
    Direction, GhostMode, GhostView, PlayerView, RuntimeEvent, SessionState, SessionSummary,
    SimConfig, Snapshot, Vec2,
};

#[derive(Clone, Debug)]
struct PlayerInternal {
    view: PlayerView,
    requested_dir: Direction,
}

#[derive(Clone, Debug)]
struct GhostInternal {
    view: GhostView,
    home: Vec2,
    scatter_target: Vec2,
    mode: GhostMode,
}

impl GhostInternal {
    // Dead is sticky per ghost; the frightened timer is a global override;
    // everything else chases.
    fn effective_mode(&self, frightened_timer: u32) -> GhostMode {
        if self.mode == GhostMode::Dead {
            return GhostMode::Dead;
        }
        if frightened_timer > 0 {
            return GhostMode::Frightened;
        }
        GhostMode::Chase
    }
}

#[derive(Clone, Debug)]
pub struct SimulationEngine {
    pub config: SimConfig,

    grid: GridMap,
    player: PlayerInternal,
    ghosts: Vec<GhostInternal>,
    pathfinder: PathFinder,
    events: Vec<RuntimeEvent>,

    state: SessionState,
    score: i32,
    frame_count: u64,
    frightened_timer: u32,
    ticks_since_timer_decay: u32,
    ticks_since_player_move: u32,
    ticks_since_ghost_move: u32,
}

impl SimulationEngine {
    pub fn new(config: SimConfig) -> Self {
        let grid = GridMap::standard();
        let player = spawn_player(&grid);
        let ghosts = spawn_ghosts();
        Self {
            config,
            grid,
            player,
            ghosts,
            pathfinder: PathFinder::new(),
            events: Vec::new(),
            state: SessionState::NotStarted,
            score: 0,
            frame_count: 0,
            frightened_timer: 0,
            ticks_since_timer_decay: 0,
            ticks_since_player_move: 0,
            ticks_since_ghost_move: 0,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn score(&self) -> i32 {
        self.score
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    pub fn is_game_over(&self) -> bool {
        self.state == SessionState::GameOver
    }

    // A fresh board is only laid out when the displayed score is already at
    // its baseline; a game-over board stays on screen untouched until then.
    pub fn begin_session(&mut self) {
        if self.state == SessionState::Running {
            return;
        }
        if self.score == 0 {
            self.reset_session();
        }
        self.state = SessionState::Running;
    }

    pub fn request_direction(&mut self, dir: Direction) {
        if self.state != SessionState::Running || dir == Direction::None {
            return;
        }
        self.player.requested_dir = dir;
    }

    // One frame. Timer decay runs first, then the player (so item effects are
    // visible to ghosts), then ghosts (so they aim at the post-move player),
    // then the collision pass over the settled positions.
    pub fn tick(&mut self) {
        if self.state != SessionState::Running {
            return;
        }
        self.frame_count += 1;

        self.update_frightened_timer();
        self.update_player();
        self.update_ghosts();
        self.check_collisions();
    }

    pub fn build_snapshot(&mut self, include_events: bool) -> Snapshot {
        let frightened_timer = self.frightened_timer;
        for ghost in &mut self.ghosts {
            ghost.view.mode = ghost.effective_mode(frightened_timer);
        }
        let snapshot = Snapshot {
            frame: self.frame_count,
            state: self.state,
            score: self.score,
            frightened_timer,
            tiles: self.grid.rows(),
            player: self.player.view.clone(),
            ghosts: self.ghosts.iter().map(|ghost| ghost.view.clone()).collect(),
            events: if include_events {
                self.events.clone()
            } else {
                Vec::new()
            },
        };
        if include_events {
            self.events.clear();
        }
        snapshot
    }

    pub fn build_summary(&self) -> SessionSummary {
        SessionSummary {
            state: self.state,
            score: self.score,
            frames: self.frame_count,
            pellets_remaining: self.grid.pellets_remaining(),
        }
    }

    fn reset_session(&mut self) {
        self.grid = GridMap::standard();
        self.player = spawn_player(&self.grid);
        self.ghosts = spawn_ghosts();
        self.score = 0;
        self.frame_count = 0;
        self.frightened_timer = 0;
        self.ticks_since_timer_decay = 0;
        self.ticks_since_player_move = 0;
        self.ticks_since_ghost_move = 0;
    }

    fn update_frightened_timer(&mut self) {
        self.ticks_since_timer_decay += 1;
        if self.ticks_since_timer_decay < self.config.timer_cadence {
            return;
        }
        self.ticks_since_timer_decay = 0;
        if self.frightened_timer > 0 {
            self.frightened_timer -= 1;
        }
    }

    fn update_player(&mut self) {
        self.ticks_since_player_move += 1;
        if self.ticks_since_player_move < self.config.player_cadence {
            return;
        }
        self.ticks_since_player_move = 0;

        // The buffer persists; a queued turn keeps applying until replaced.
        if self.player.requested_dir != Direction::None {
            self.player.view.dir = self.player.requested_dir;
            self.player.view.rotation = rotation_for(self.player.view.dir);
        }
        if self.player.view.dir == Direction::None {
            return;
        }

        let (dx, dy) = self.player.view.dir.delta();
        let nx = self.grid.wrap_col(self.player.view.x + dx);
        let ny = self.player.view.y + dy;
        if self.grid.is_wall(nx, ny, false) {
            return;
        }

        self.player.view.x = nx;
        self.player.view.y = ny;
        self.player.view.px = pixel_of(nx);
        self.player.view.py = pixel_of(ny);
        self.apply_consumption(nx, ny);
    }

    fn apply_consumption(&mut self, x: i32, y: i32) {
        let (tile, score_delta) = self.grid.consume(x, y);
        self.score += score_delta;
        match tile {
            Tile::Pellet => self.events.push(RuntimeEvent::PelletEaten { x, y }),
            Tile::PowerPellet => {
                self.frightened_timer = self.config.frightened_duration;
                // Every ghost rejoins the hunt, even ones still heading home.
                for ghost in &mut self.ghosts {
                    ghost.mode = GhostMode::Chase;
                }
                self.events.push(RuntimeEvent::PowerPelletEaten { x, y });
            }
            _ => {}
        }
    }

    fn update_ghosts(&mut self) {
        self.ticks_since_ghost_move += 1;
        if self.ticks_since_ghost_move < self.config.ghost_cadence {
            return;
        }
        self.ticks_since_ghost_move = 0;

        let player_pos = Vec2 {
            x: self.player.view.x,
            y: self.player.view.y,
        };
        for idx in 0..self.ghosts.len() {
            let target = self.ghost_target(idx, player_pos);
            let from = Vec2 {
                x: self.ghosts[idx].view.x,
                y: self.ghosts[idx].view.y,
            };
            let dir = self.pathfinder.next_step(&self.grid, from, target);
            if dir != Direction::None {
                let (dx, dy) = dir.delta();
                let ghost = &mut self.ghosts[idx];
                ghost.view.dir = dir;
                ghost.view.x = self.grid.wrap_col(ghost.view.x + dx);
                ghost.view.y += dy;
                ghost.view.px = pixel_of(ghost.view.x);
                ghost.view.py = pixel_of(ghost.view.y);
            }

            let ghost = &mut self.ghosts[idx];
            if ghost.mode == GhostMode::Dead
                && ghost.view.x == ghost.home.x
                && ghost.view.y == ghost.home.y
            {
                ghost.mode = GhostMode::Chase;
                self.events.push(RuntimeEvent::GhostReturnedHome { ghost_id: idx });
            }
        }
    }

    fn ghost_target(&self, idx: usize, player_pos: Vec2) -> Vec2 {
        let ghost = &self.ghosts[idx];
        match ghost.effective_mode(self.frightened_timer) {
            GhostMode::Dead => ghost.home,
            GhostMode::Frightened => ghost.scatter_target,
            _ => player_pos,
        }
    }

    fn check_collisions(&mut self) {
        for idx in 0..self.ghosts.len() {
            if self.ghosts[idx].view.x != self.player.view.x
                || self.ghosts[idx].view.y != self.player.view.y
            {
                continue;
            }
            if self.ghosts[idx].mode == GhostMode::Dead {
                continue;
            }
            if self.frightened_timer > 0 {
                self.ghosts[idx].mode = GhostMode::Dead;
                self.score += GHOST_SCORE;
                self.events.push(RuntimeEvent::GhostEaten { ghost_id: idx });
            } else {
                if self.state == SessionState::Running {
                    self.events
                        .push(RuntimeEvent::SessionEnded { score: self.score });
                }
                self.state = SessionState::GameOver;
                // Displayed score resets immediately; the board itself is
                // kept until the next explicit restart.
                self.score = 0;
            }
        }
    }
}

fn spawn_player(grid: &GridMap) -> PlayerInternal {
    let spawn = grid.player_spawn();
    PlayerInternal {
        view: PlayerView {
            x: spawn.x,
            y: spawn.y,
            dir: Direction::Right,
            rotation: 0.0,
            px: pixel_of(spawn.x),
            py: pixel_of(spawn.y),
        },
        requested_dir: Direction::None,
    }
}

fn spawn_ghosts() -> Vec<GhostInternal> {
    (0..GHOST_COUNT)
        .map(|id| {
            let home = ghost_home(id);
            GhostInternal {
                view: GhostView {
                    id,
                    x: home.x,
                    y: home.y,
                    dir: Direction::None,
                    mode: GhostMode::Chase,
                    px: pixel_of(home.x),
                    py: pixel_of(home.y),
                },
                home,
                scatter_target: scatter_corner(id),
                mode: GhostMode::Chase,
            }
        })
        .collect()
}

fn pixel_of(cell: i32) -> f32 {
    cell as f32 * TILE_SIZE
}

fn rotation_for(dir: Direction) -> f32 {
    match dir {
        Direction::Right => 0.0,
        Direction::Down => 90.0,
        Direction::Left => 180.0,
        Direction::Up => 270.0,
        Direction::None => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::SimulationEngine;
    use crate::grid::Tile;
    use crate::types::{Direction, GhostMode, RuntimeEvent, SessionState, SimConfig};

    const PARKED: u32 = 100_000;

    fn config(player: u32, ghost: u32, timer: u32) -> SimConfig {
        SimConfig {
            player_cadence: player,
            ghost_cadence: ghost,
            timer_cadence: timer,
            frightened_duration: 60,
        }
    }

    fn running(config: SimConfig) -> SimulationEngine {
        let mut engine = SimulationEngine::new(config);
        engine.begin_session();
        engine
    }

    fn place_player(engine: &mut SimulationEngine, x: i32, y: i32) {
        engine.player.view.x = x;
        engine.player.view.y = y;
    }

    fn place_ghost(engine: &mut SimulationEngine, idx: usize, x: i32, y: i32) {
        engine.ghosts[idx].view.x = x;
        engine.ghosts[idx].view.y = y;
    }

    #[test]
    fn begin_session_transitions_to_running() {
        let mut engine = SimulationEngine::new(SimConfig::default());
        assert_eq!(engine.state(), SessionState::NotStarted);
        engine.begin_session();
        assert_eq!(engine.state(), SessionState::Running);
        assert_eq!(engine.frame_count(), 0);
    }

    #[test]
    fn tick_is_a_no_op_until_the_session_starts() {
        let mut engine = SimulationEngine::new(config(1, 1, 1));
        engine.tick();
        assert_eq!(engine.frame_count(), 0);
        let snapshot = engine.build_snapshot(false);
        assert_eq!(snapshot.player.x, 9);
        assert_eq!(snapshot.player.y, 14);
    }

    #[test]
    fn three_moves_right_score_thirty() {
        let mut engine = running(config(1, PARKED, PARKED));
        engine.request_direction(Direction::Right);
        for _ in 0..3 {
            engine.tick();
        }
        assert_eq!(engine.player.view.x, 12);
        assert_eq!(engine.player.view.y, 14);
        assert_eq!(engine.score(), 30);

        let snapshot = engine.build_snapshot(true);
        let pellets = snapshot
            .events
            .iter()
            .filter(|event| matches!(event, RuntimeEvent::PelletEaten { .. }))
            .count();
        assert_eq!(pellets, 3);
    }

    #[test]
    fn leftmost_column_wraps_to_rightmost() {
        let mut engine = running(config(1, PARKED, PARKED));
        place_player(&mut engine, 0, 12);
        engine.request_direction(Direction::Left);
        engine.tick();
        assert_eq!(engine.player.view.x, 20);
        assert_eq!(engine.player.view.y, 12);
    }

    #[test]
    fn rightmost_column_wraps_to_leftmost() {
        let mut engine = running(config(1, PARKED, PARKED));
        place_player(&mut engine, 20, 12);
        engine.request_direction(Direction::Right);
        engine.tick();
        assert_eq!(engine.player.view.x, 0);
        assert_eq!(engine.player.view.y, 12);
    }

    #[test]
    fn blocked_move_keeps_position_but_updates_facing() {
        let mut engine = running(config(1, PARKED, PARKED));
        place_player(&mut engine, 5, 1);
        engine.request_direction(Direction::Up);
        engine.tick();
        assert_eq!(engine.player.view.x, 5);
        assert_eq!(engine.player.view.y, 1);
        assert_eq!(engine.player.view.dir, Direction::Up);
        assert_eq!(engine.player.view.rotation, 270.0);
    }

    #[test]
    fn ghost_house_door_blocks_the_player() {
        let mut engine = running(config(1, PARKED, PARKED));
        place_player(&mut engine, 8, 8);
        engine.request_direction(Direction::Right);
        engine.tick();
        assert_eq!(engine.player.view.x, 8);
        assert_eq!(engine.player.view.y, 8);
        assert_eq!(engine.player.view.dir, Direction::Right);
    }

    #[test]
    fn buffered_direction_waits_for_the_cadence_boundary() {
        let mut engine = running(config(3, PARKED, PARKED));
        engine.request_direction(Direction::Right);
        engine.tick();
        engine.tick();
        assert_eq!(engine.player.view.x, 9);
        engine.tick();
        assert_eq!(engine.player.view.x, 10);

        // The buffer persists, so movement continues without new input.
        for _ in 0..6 {
            engine.tick();
        }
        assert_eq!(engine.player.view.x, 12);
    }

    #[test]
    fn power_pellet_frightens_and_revives_every_ghost() {
        let mut engine = running(config(1, PARKED, PARKED));
        engine.ghosts[2].mode = GhostMode::Dead;
        place_player(&mut engine, 2, 1);
        engine.request_direction(Direction::Left);
        engine.tick();

        assert_eq!(engine.player.view.x, 1);
        assert_eq!(engine.score(), 50);
        assert_eq!(engine.frightened_timer, 60);
        assert_eq!(engine.ghosts[2].mode, GhostMode::Chase);

        let snapshot = engine.build_snapshot(true);
        assert!(snapshot
            .ghosts
            .iter()
            .all(|ghost| ghost.mode == GhostMode::Frightened));
        assert!(snapshot
            .events
            .iter()
            .any(|event| matches!(event, RuntimeEvent::PowerPelletEaten { x: 1, y: 1 })));
    }

    #[test]
    fn frightened_timer_reverts_to_chase_exactly_at_zero() {
        let mut engine = running(config(PARKED, PARKED, 1));
        engine.frightened_timer = 2;

        engine.tick();
        assert_eq!(engine.frightened_timer, 1);
        let snapshot = engine.build_snapshot(false);
        assert!(snapshot
            .ghosts
            .iter()
            .all(|ghost| ghost.mode == GhostMode::Frightened));

        engine.tick();
        assert_eq!(engine.frightened_timer, 0);
        let snapshot = engine.build_snapshot(false);
        assert!(snapshot
            .ghosts
            .iter()
            .all(|ghost| ghost.mode == GhostMode::Chase));
    }

    #[test]
    fn timer_decays_once_per_cadence_window() {
        let mut engine = running(config(PARKED, PARKED, 4));
        engine.frightened_timer = 5;
        for _ in 0..3 {
            engine.tick();
        }
        assert_eq!(engine.frightened_timer, 5);
        engine.tick();
        assert_eq!(engine.frightened_timer, 4);
    }

    #[test]
    fn dead_ghost_ignores_the_frightened_override() {
        let mut engine = running(config(PARKED, PARKED, PARKED));
        engine.frightened_timer = 30;
        engine.ghosts[0].mode = GhostMode::Dead;

        assert_eq!(
            engine.ghosts[0].effective_mode(engine.frightened_timer),
            GhostMode::Dead
        );
        assert_eq!(
            engine.ghosts[1].effective_mode(engine.frightened_timer),
            GhostMode::Frightened
        );

        let player_pos = crate::types::Vec2 { x: 5, y: 4 };
        assert_eq!(engine.ghost_target(0, player_pos), engine.ghosts[0].home);
        assert_eq!(
            engine.ghost_target(1, player_pos),
            engine.ghosts[1].scatter_target
        );

        engine.frightened_timer = 0;
        assert_eq!(engine.ghost_target(1, player_pos), player_pos);
    }

    #[test]
    fn frightened_collision_eats_the_ghost() {
        let mut engine = running(config(PARKED, PARKED, PARKED));
        engine.frightened_timer = 10;
        let (px, py) = (engine.player.view.x, engine.player.view.y);
        place_ghost(&mut engine, 1, px, py);
        engine.tick();

        assert_eq!(engine.state(), SessionState::Running);
        assert_eq!(engine.score(), 200);
        assert_eq!(engine.ghosts[1].mode, GhostMode::Dead);

        let snapshot = engine.build_snapshot(true);
        assert!(snapshot
            .events
            .iter()
            .any(|event| matches!(event, RuntimeEvent::GhostEaten { ghost_id: 1 })));
    }

    #[test]
    fn dead_ghost_on_the_player_cell_is_harmless() {
        let mut engine = running(config(PARKED, PARKED, PARKED));
        engine.ghosts[0].mode = GhostMode::Dead;
        let (px, py) = (engine.player.view.x, engine.player.view.y);
        place_ghost(&mut engine, 0, px, py);
        engine.tick();
        assert_eq!(engine.state(), SessionState::Running);
    }

    #[test]
    fn lethal_collision_ends_the_session_and_zeroes_the_displayed_score() {
        let mut engine = running(config(PARKED, PARKED, PARKED));
        engine.score = 130;
        engine.grid.consume(1, 4);
        let (px, py) = (engine.player.view.x, engine.player.view.y);
        place_ghost(&mut engine, 0, px, py);
        engine.tick();

        assert_eq!(engine.state(), SessionState::GameOver);
        assert_eq!(engine.score(), 0);

        let snapshot = engine.build_snapshot(true);
        assert!(snapshot
            .events
            .iter()
            .any(|event| matches!(event, RuntimeEvent::SessionEnded { score: 130 })));
        // The board is kept as-is after the session ends.
        assert_eq!(engine.grid.tile_at(1, 4), Tile::Empty);
        assert_eq!(engine.player.view.x, 9);
    }

    #[test]
    fn restart_after_game_over_lays_out_a_fresh_board() {
        let mut engine = running(config(PARKED, PARKED, PARKED));
        engine.score = 130;
        engine.grid.consume(1, 4);
        place_player(&mut engine, 3, 12);
        place_ghost(&mut engine, 0, 3, 12);
        engine.tick();
        assert_eq!(engine.state(), SessionState::GameOver);

        // Score was zeroed by the collision, so the restart rebuilds fully.
        engine.begin_session();
        assert_eq!(engine.state(), SessionState::Running);
        assert_eq!(engine.score(), 0);
        assert_eq!(engine.frame_count(), 0);
        assert_eq!(engine.grid.tile_at(1, 4), Tile::Pellet);
        assert_eq!(engine.player.view.x, 9);
        assert_eq!(engine.player.view.y, 14);
        assert_eq!(engine.ghosts[0].view.x, engine.ghosts[0].home.x);
        assert_eq!(engine.ghosts[0].view.y, engine.ghosts[0].home.y);
    }

    #[test]
    fn ghost_steps_toward_the_player_deterministically() {
        let mut engine = running(config(PARKED, 1, PARKED));
        place_ghost(&mut engine, 0, 1, 4);
        place_player(&mut engine, 5, 4);
        engine.tick();
        assert_eq!(engine.ghosts[0].view.x, 2);
        assert_eq!(engine.ghosts[0].view.y, 4);
        assert_eq!(engine.ghosts[0].view.dir, Direction::Right);
    }

    #[test]
    fn dead_ghost_walks_home_and_revives_on_arrival() {
        let mut engine = running(config(PARKED, 1, PARKED));
        engine.ghosts[1].mode = GhostMode::Dead;
        place_ghost(&mut engine, 1, 7, 10);
        place_player(&mut engine, 1, 18);

        engine.tick();
        assert_eq!(engine.ghosts[1].view.x, 8);
        assert_eq!(engine.ghosts[1].mode, GhostMode::Dead);

        engine.tick();
        assert_eq!(engine.ghosts[1].view.x, 9);
        assert_eq!(engine.ghosts[1].view.y, 10);
        assert_eq!(engine.ghosts[1].mode, GhostMode::Chase);

        let snapshot = engine.build_snapshot(true);
        assert!(snapshot
            .events
            .iter()
            .any(|event| matches!(event, RuntimeEvent::GhostReturnedHome { ghost_id: 1 })));
    }

    #[test]
    fn ghost_with_no_route_stays_put() {
        let mut engine = running(config(PARKED, 1, PARKED));
        place_ghost(&mut engine, 0, 1, 1);
        engine.grid.consume(1, 1);
        engine.grid.set_tile(1, 2, Tile::Wall);
        engine.grid.set_tile(2, 1, Tile::Wall);
        place_player(&mut engine, 18, 14);

        engine.tick();
        assert_eq!(engine.ghosts[0].view.x, 1);
        assert_eq!(engine.ghosts[0].view.y, 1);
    }

    #[test]
    fn timer_decay_lands_before_ghost_targeting() {
        // With one frightened unit left, the decay at the top of the frame
        // expires it, so the ghost chases instead of heading for its corner.
        let mut engine = running(config(PARKED, 1, 1));
        engine.frightened_timer = 1;
        place_ghost(&mut engine, 0, 1, 4);
        place_player(&mut engine, 5, 4);
        engine.tick();
        assert_eq!(engine.frightened_timer, 0);
        assert_eq!(engine.ghosts[0].view.x, 2);
        assert_eq!(engine.ghosts[0].view.dir, Direction::Right);
    }

    #[test]
    fn collision_runs_after_the_player_moves() {
        let mut engine = running(config(1, PARKED, PARKED));
        engine.frightened_timer = 10;
        place_player(&mut engine, 3, 12);
        place_ghost(&mut engine, 3, 4, 12);
        engine.request_direction(Direction::Right);
        engine.tick();

        // The player stepped onto the ghost this very frame and ate it.
        assert_eq!(engine.player.view.x, 4);
        assert_eq!(engine.ghosts[3].mode, GhostMode::Dead);
        assert_eq!(engine.state(), SessionState::Running);
    }

    #[test]
    fn request_direction_is_ignored_before_the_session_starts() {
        let mut engine = SimulationEngine::new(config(1, PARKED, PARKED));
        engine.request_direction(Direction::Left);
        assert_eq!(engine.player.requested_dir, Direction::None);
    }

    #[test]
    fn none_request_does_not_clear_the_buffer() {
        let mut engine = running(config(1, PARKED, PARKED));
        engine.request_direction(Direction::Right);
        engine.request_direction(Direction::None);
        assert_eq!(engine.player.requested_dir, Direction::Right);
    }

    #[test]
    fn build_summary_tracks_score_and_pellets() {
        let mut engine = running(config(1, PARKED, PARKED));
        let before = engine.build_summary().pellets_remaining;
        engine.request_direction(Direction::Right);
        engine.tick();

        let summary = engine.build_summary();
        assert_eq!(summary.score, 10);
        assert_eq!(summary.pellets_remaining, before - 1);
        assert_eq!(summary.frames, 1);
        assert_eq!(summary.state, SessionState::Running);
    }

    #[test]
    fn build_snapshot_drains_events_when_requested() {
        let mut engine = running(config(PARKED, PARKED, PARKED));
        engine.events.push(RuntimeEvent::PelletEaten { x: 1, y: 4 });

        let first = engine.build_snapshot(true);
        let second = engine.build_snapshot(true);
        assert_eq!(first.events.len(), 1);
        assert_eq!(second.events.len(), 0);
    }

    #[test]
    fn identical_inputs_produce_identical_runs() {
        let script = [
            Direction::Right,
            Direction::Down,
            Direction::Left,
            Direction::Up,
        ];
        let mut a = running(SimConfig::default());
        let mut b = running(SimConfig::default());

        for frame in 0..400usize {
            let dir = script[(frame / 40) % script.len()];
            a.request_direction(dir);
            b.request_direction(dir);
            a.tick();
            b.tick();

            let sa = a.build_snapshot(false);
            let sb = b.build_snapshot(false);
            assert_eq!(sa.score, sb.score);
            assert_eq!(sa.state, sb.state);
            assert_eq!(sa.player.x, sb.player.x);
            assert_eq!(sa.player.y, sb.player.y);
            for (ga, gb) in sa.ghosts.iter().zip(sb.ghosts.iter()) {
                assert_eq!(ga.x, gb.x);
                assert_eq!(ga.y, gb.y);
                assert_eq!(ga.mode, gb.mode);
            }
        }
    }
}
