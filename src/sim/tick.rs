//! Per-frame simulation tick and session transitions
//!
//! One `tick` runs per rendered frame while the session is running. Motion is
//! per tick, not scaled by frame time, so game speed follows the display
//! refresh rate.

use super::collision::{actor_hits_obstacle, has_cleared};
use super::state::{GameEvent, GameState, Outcome, SessionPhase};

/// Begin a session. Ignored unless idle.
pub fn start(state: &mut GameState, now_ms: f64) -> bool {
    if state.phase != SessionPhase::Idle {
        return false;
    }
    state.reset();
    state.clock = super::clock::SessionClock::started_at(now_ms);
    state.phase = SessionPhase::Running;
    log::info!(
        "Session started: {} obstacles over {}s",
        state.total_obstacles(),
        state.tuning.game_duration
    );
    true
}

/// Freeze a running session
pub fn pause(state: &mut GameState, now_ms: f64) -> bool {
    if state.phase != SessionPhase::Running {
        return false;
    }
    state.clock.freeze(now_ms);
    state.elapsed_secs = state.clock.elapsed_secs(now_ms);
    state.phase = SessionPhase::Paused;
    log::info!("Paused at {:.2}s", state.elapsed_secs);
    true
}

/// Continue a paused session; the paused interval does not count
pub fn resume(state: &mut GameState, now_ms: f64) -> bool {
    if state.phase != SessionPhase::Paused {
        return false;
    }
    state.clock.thaw(now_ms);
    state.phase = SessionPhase::Running;
    log::info!("Resumed at {:.2}s", state.clock.elapsed_secs(now_ms));
    true
}

/// Jump request from the player. Ignored unless running.
pub fn request_jump(state: &mut GameState) -> bool {
    if state.phase != SessionPhase::Running {
        return false;
    }
    let jumped = state.actor.jump();
    if jumped {
        state.events.push(GameEvent::Jumped);
    }
    jumped
}

/// Advance the session by one frame
pub fn tick(state: &mut GameState, now_ms: f64) {
    if state.phase != SessionPhase::Running {
        return;
    }

    state.time_ticks += 1;
    state.elapsed_secs = state.clock.elapsed_secs(now_ms);

    // Time is up once every obstacle has been sent
    if state.time_remaining() == 0 && state.obstacles_spawned() >= state.total_obstacles() {
        end(state, Outcome::Won);
        return;
    }

    if let Some(id) = state.stream.maybe_spawn(state.elapsed_secs) {
        log::debug!(
            "Spawned obstacle {} ({}/{})",
            id,
            state.stream.spawned,
            state.total_obstacles()
        );
        state.events.push(GameEvent::ObstacleSpawned { id });
    }

    state.actor.update();

    // Spawn order; removal happens in place so nothing is skipped
    let inset = state.tuning.hit_inset;
    let speed = state.stream.speed();
    let mut i = 0;
    while i < state.stream.obstacles.len() {
        let obstacle = &mut state.stream.obstacles[i];
        obstacle.advance(speed);

        if actor_hits_obstacle(&state.actor, obstacle, inset) {
            log::debug!("Hit obstacle {} at {:.2}s", obstacle.id, state.elapsed_secs);
            end(state, Outcome::Lost);
            return;
        }

        if !obstacle.passed && has_cleared(obstacle, &state.actor) {
            obstacle.passed = true;
            let id = obstacle.id;
            state.obstacles_passed += 1;
            log::debug!("Passed obstacle {}", id);
            state.events.push(GameEvent::ObstaclePassed { id });
        }

        if obstacle.is_off_screen() {
            state.stream.obstacles.remove(i);
        } else {
            i += 1;
        }
    }
}

/// Finish the session. Only a running session can end, and only once.
fn end(state: &mut GameState, outcome: Outcome) {
    if state.phase != SessionPhase::Running || state.outcome.is_some() {
        return;
    }
    state.phase = SessionPhase::Ended;
    state.outcome = Some(outcome);

    if let Some(result) = state.result() {
        log::info!(
            "Session ended ({:?}): score {}, {}/{} obstacles passed",
            outcome,
            result.score,
            result.obstacles_passed,
            state.total_obstacles()
        );
        state.events.push(GameEvent::SessionEnded(result));
    }
}
