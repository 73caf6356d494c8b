use clap::Parser;
use maze_chase_sim::engine::SimulationEngine;
use maze_chase_sim::types::{Direction, GhostMode, RuntimeEvent, SessionState, SimConfig, Snapshot};
use serde::Serialize;
use serde_json::{json, Value};
use std::collections::HashSet;
use std::io;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Frames to simulate.
    #[arg(long, default_value_t = 6_000)]
    frames: u64,
    /// Seed for the built-in input policy.
    #[arg(long)]
    seed: Option<u64>,
    /// Scripted moves (comma-separated up/down/left/right), one per
    /// player-cadence window; disables the seeded policy.
    #[arg(long)]
    moves: Option<String>,
    #[arg(long)]
    player_cadence: Option<u32>,
    #[arg(long)]
    ghost_cadence: Option<u32>,
    #[arg(long)]
    timer_cadence: Option<u32>,
    #[arg(long)]
    run_id: Option<String>,
    #[arg(long)]
    summary_out: Option<PathBuf>,
}

// Small deterministic generator for the input policy. The simulation itself
// is fully deterministic, so all randomness lives here in the driver.
struct DriveRng {
    seed: u32,
}

impl DriveRng {
    fn new(seed: u32) -> Self {
        Self { seed }
    }

    fn next_f32(&mut self) -> f32 {
        self.seed = self.seed.wrapping_add(0x6d2b79f5);
        let mut t = self.seed;
        t = (t ^ (t >> 15)).wrapping_mul(t | 1);
        t ^= t.wrapping_add((t ^ (t >> 7)).wrapping_mul(t | 61));
        let out = t ^ (t >> 14);
        (out as f64 / 4_294_967_296.0) as f32
    }

    fn pick_direction(&mut self) -> Direction {
        match (self.next_f32() * 4.0).floor() as u32 {
            0 => Direction::Up,
            1 => Direction::Down,
            2 => Direction::Left,
            _ => Direction::Right,
        }
    }
}

#[derive(Clone, Debug, Serialize)]
struct AnomalyRecord {
    frame: u64,
    message: String,
}

#[derive(Clone, Debug, Serialize)]
struct RunSummary {
    #[serde(rename = "runId")]
    run_id: String,
    #[serde(rename = "startedAtMs")]
    started_at_ms: u64,
    #[serde(rename = "finishedAtMs")]
    finished_at_ms: u64,
    frames: u64,
    sessions: u64,
    #[serde(rename = "gameOvers")]
    game_overs: u64,
    #[serde(rename = "pelletsEaten")]
    pellets_eaten: u64,
    #[serde(rename = "powerPelletsEaten")]
    power_pellets_eaten: u64,
    #[serde(rename = "ghostsEaten")]
    ghosts_eaten: u64,
    #[serde(rename = "finalScore")]
    final_score: i32,
    #[serde(rename = "pelletsRemaining")]
    pellets_remaining: usize,
    #[serde(rename = "anomalyCount")]
    anomaly_count: usize,
    anomalies: Vec<String>,
}

#[derive(Clone, Debug, Serialize)]
struct StructuredLogLine {
    #[serde(rename = "timestampMs")]
    timestamp_ms: u64,
    level: String,
    event: String,
    #[serde(rename = "runId")]
    run_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    frame: Option<u64>,
    details: Value,
}

fn main() {
    let cli = Cli::parse();
    let started_at_ms = now_ms();
    let seed = normalize_seed(cli.seed.unwrap_or(started_at_ms));
    let run_id = cli
        .run_id
        .clone()
        .unwrap_or_else(|| default_run_id(seed, started_at_ms));
    let config = resolve_config(&cli);
    let script = cli.moves.as_deref().map(parse_moves);

    emit_log(
        "info",
        "run_started",
        &run_id,
        None,
        json!({
            "frames": cli.frames,
            "seed": seed,
            "config": config,
            "scripted": script.is_some(),
        }),
    );

    let outcome = run_session_loop(config, cli.frames, seed, script.as_deref());

    for anomaly in &outcome.anomaly_records {
        emit_log(
            "warn",
            "anomaly_detected",
            &run_id,
            Some(anomaly.frame),
            json!({ "message": anomaly.message }),
        );
    }

    let finished_at_ms = now_ms();
    let summary = build_run_summary(run_id.clone(), started_at_ms, finished_at_ms, &outcome);

    if let Some(path) = cli.summary_out.as_ref() {
        if let Err(error) = write_summary(path, &summary) {
            emit_log(
                "error",
                "summary_write_failed",
                &run_id,
                None,
                json!({
                    "path": path.to_string_lossy(),
                    "error": error.to_string(),
                }),
            );
            std::process::exit(2);
        }
    }

    emit_log(
        "info",
        "run_finished",
        &run_id,
        None,
        json!({
            "sessions": summary.sessions,
            "gameOvers": summary.game_overs,
            "anomalyCount": summary.anomaly_count,
        }),
    );

    println!(
        "{}",
        serde_json::to_string(&summary).expect("run summary should serialize")
    );

    if !summary.anomalies.is_empty() {
        std::process::exit(1);
    }
}

#[derive(Clone, Debug, Default)]
struct RunOutcome {
    frames: u64,
    sessions: u64,
    game_overs: u64,
    pellets_eaten: u64,
    power_pellets_eaten: u64,
    ghosts_eaten: u64,
    final_score: i32,
    pellets_remaining: usize,
    anomalies: Vec<String>,
    anomaly_records: Vec<AnomalyRecord>,
}

fn run_session_loop(
    config: SimConfig,
    frames: u64,
    seed: u32,
    script: Option<&[Direction]>,
) -> RunOutcome {
    let mut engine = SimulationEngine::new(config);
    engine.begin_session();

    let mut rng = DriveRng::new(seed);
    let mut outcome = RunOutcome {
        sessions: 1,
        ..RunOutcome::default()
    };
    let mut anomaly_seen = HashSet::new();
    let mut scripted_moves = script.unwrap_or(&[]).iter();
    let mut pellets_on_board = usize::MAX;

    for frame in 0..frames {
        if frame % config.player_cadence as u64 == 0 {
            if let Some(dir) = next_input(&mut scripted_moves, script.is_some(), &mut rng) {
                engine.request_direction(dir);
            }
        }

        engine.tick();
        let snapshot = engine.build_snapshot(true);

        for event in &snapshot.events {
            match event {
                RuntimeEvent::PelletEaten { .. } => outcome.pellets_eaten += 1,
                RuntimeEvent::PowerPelletEaten { .. } => outcome.power_pellets_eaten += 1,
                RuntimeEvent::GhostEaten { .. } => outcome.ghosts_eaten += 1,
                _ => {}
            }
        }

        for message in collect_snapshot_anomalies(&snapshot, &mut pellets_on_board) {
            push_anomaly(
                &mut outcome.anomalies,
                &mut outcome.anomaly_records,
                &mut anomaly_seen,
                snapshot.frame,
                message,
            );
        }

        outcome.frames = frame + 1;
        if snapshot.state == SessionState::GameOver {
            outcome.game_overs += 1;
            // Score is already zeroed, so this lays out a fresh board.
            engine.begin_session();
            outcome.sessions += 1;
            pellets_on_board = usize::MAX;
        }
    }

    let summary = engine.build_summary();
    outcome.final_score = summary.score;
    outcome.pellets_remaining = summary.pellets_remaining;
    outcome
}

fn next_input<'a>(
    scripted_moves: &mut std::slice::Iter<'a, Direction>,
    scripted: bool,
    rng: &mut DriveRng,
) -> Option<Direction> {
    if scripted {
        return scripted_moves.next().copied();
    }
    // Mostly hold course; turn often enough to cover the maze.
    if rng.next_f32() < 0.35 {
        return Some(rng.pick_direction());
    }
    None
}

// Invariant checks over a drawable snapshot; every hit is a defect in the
// simulation, not in the scenario.
fn collect_snapshot_anomalies(snapshot: &Snapshot, pellets_on_board: &mut usize) -> Vec<String> {
    let mut anomalies = Vec::new();
    let height = snapshot.tiles.len() as i32;
    let width = snapshot
        .tiles
        .first()
        .map(|row| row.len() as i32)
        .unwrap_or(0);

    let player = &snapshot.player;
    if player.x < 0 || player.x >= width || player.y < 0 || player.y >= height {
        anomalies.push(format!(
            "player out of bounds: ({},{})",
            player.x, player.y
        ));
    } else if tile_char(snapshot, player.x, player.y) == '#' {
        anomalies.push(format!("player inside a wall: ({},{})", player.x, player.y));
    }

    for ghost in &snapshot.ghosts {
        if ghost.x < 0 || ghost.x >= width || ghost.y < 0 || ghost.y >= height {
            anomalies.push(format!(
                "ghost {} out of bounds: ({},{})",
                ghost.id, ghost.x, ghost.y
            ));
        }
        if snapshot.frightened_timer > 0
            && ghost.mode != GhostMode::Dead
            && ghost.mode != GhostMode::Frightened
        {
            anomalies.push(format!(
                "ghost {} not frightened while the timer runs",
                ghost.id
            ));
        }
    }

    if snapshot.score < 0 {
        anomalies.push(format!("negative score: {}", snapshot.score));
    }

    let pellets = snapshot
        .tiles
        .iter()
        .flat_map(|row| row.chars())
        .filter(|tile| *tile == '.' || *tile == 'o')
        .count();
    if pellets > *pellets_on_board {
        anomalies.push(format!(
            "pellets regenerated mid-session: {} -> {}",
            *pellets_on_board, pellets
        ));
    }
    *pellets_on_board = pellets;

    anomalies
}

fn tile_char(snapshot: &Snapshot, x: i32, y: i32) -> char {
    snapshot.tiles[y as usize]
        .chars()
        .nth(x as usize)
        .unwrap_or('#')
}

fn parse_moves(value: &str) -> Vec<Direction> {
    value
        .split(',')
        .filter_map(|token| Direction::parse_move(token.trim()))
        .collect()
}

fn normalize_seed(seed: u64) -> u32 {
    seed as u32
}

fn default_run_id(seed: u32, timestamp_ms: u64) -> String {
    format!("sim-{seed}-{timestamp_ms}")
}

fn resolve_config(cli: &Cli) -> SimConfig {
    let defaults = SimConfig::default();
    SimConfig {
        player_cadence: cli.player_cadence.unwrap_or(defaults.player_cadence).max(1),
        ghost_cadence: cli.ghost_cadence.unwrap_or(defaults.ghost_cadence).max(1),
        timer_cadence: cli.timer_cadence.unwrap_or(defaults.timer_cadence).max(1),
        frightened_duration: defaults.frightened_duration,
    }
}

fn push_anomaly(
    anomalies: &mut Vec<String>,
    anomaly_records: &mut Vec<AnomalyRecord>,
    anomaly_seen: &mut HashSet<String>,
    frame: u64,
    message: String,
) {
    anomaly_records.push(AnomalyRecord {
        frame,
        message: message.clone(),
    });
    if anomaly_seen.insert(message.clone()) {
        anomalies.push(message);
    }
}

fn build_run_summary(
    run_id: String,
    started_at_ms: u64,
    finished_at_ms: u64,
    outcome: &RunOutcome,
) -> RunSummary {
    RunSummary {
        run_id,
        started_at_ms,
        finished_at_ms,
        frames: outcome.frames,
        sessions: outcome.sessions,
        game_overs: outcome.game_overs,
        pellets_eaten: outcome.pellets_eaten,
        power_pellets_eaten: outcome.power_pellets_eaten,
        ghosts_eaten: outcome.ghosts_eaten,
        final_score: outcome.final_score,
        pellets_remaining: outcome.pellets_remaining,
        anomaly_count: outcome.anomaly_records.len(),
        anomalies: outcome.anomalies.clone(),
    }
}

fn emit_log(level: &str, event: &str, run_id: &str, frame: Option<u64>, details: Value) {
    let log_line = StructuredLogLine {
        timestamp_ms: now_ms(),
        level: level.to_string(),
        event: event.to_string(),
        run_id: run_id.to_string(),
        frame,
        details,
    };
    eprintln!(
        "{}",
        serde_json::to_string(&log_line).expect("structured log should serialize")
    );
}

fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}

fn write_summary(path: &Path, summary: &RunSummary) -> io::Result<()> {
    let summary_text = serde_json::to_string_pretty(summary).expect("run summary should serialize");
    std::fs::write(path, summary_text)
}
