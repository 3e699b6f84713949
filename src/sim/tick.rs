//! Fixed timestep simulation tick
//!
//! Core game loop that advances the round deterministically.

use glam::Vec2;
use rand::Rng;

use super::asteroid::AsteroidTier;
use super::body::Movable;
use super::projectile::Projectile;
use super::state::{CONTINUE_PROMPT, EXIT_PROMPT, GameEvent, GamePhase, GameState};
use crate::consts::*;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickInput {
    /// Turn counter-clockwise (screen coordinates)
    pub rotate_left: bool,
    /// Turn clockwise; wins over `rotate_left`
    pub rotate_right: bool,
    pub thrust: bool,
    /// Level-triggered, rate limited by the weapon cooldown
    pub fire: bool,
    /// Continue after a pause prompt (edge-triggered)
    pub continue_game: bool,
    /// Leave after game over (edge-triggered)
    pub exit_game: bool,
    /// Last pointer press point while the pointer is held
    pub pointer: Option<Vec2>,
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput) {
    match state.phase {
        GamePhase::Ended => return,
        GamePhase::WaitingInitial | GamePhase::WaitingAfterHit => {
            if input.continue_game {
                if state.phase == GamePhase::WaitingInitial {
                    state.events.push(GameEvent::RoundStarted { round: state.round });
                }
                state.phase = GamePhase::Running;
                state.status.clear();
                log::info!("Round {} running", state.round);
            }
            return;
        }
        GamePhase::WaitingGameOver => {
            if input.exit_game {
                state.phase = GamePhase::Ended;
                state.events.push(GameEvent::GameEnded {
                    final_score: state.score,
                });
                log::info!("Game ended with score {}", state.score);
            }
            return;
        }
        GamePhase::RoundCleared => {
            start_next_round(state);
            return;
        }
        GamePhase::Running => {}
    }

    state.time_ticks += 1;
    let area = state.area;

    // Controls
    if input.rotate_right {
        state.ship.body_mut().rotate(SHIP_TURN_DEGREES);
    } else if input.rotate_left {
        state.ship.body_mut().rotate(-SHIP_TURN_DEGREES);
    } else if let Some(target) = input.pointer {
        state.ship.steer_toward(target);
    }
    state.ship.set_engines_on(input.thrust);
    if input.fire && state.invulnerable_ticks == 0 && state.ship.fire() {
        spawn_projectile(state);
    }

    state.ship.advance(&area);

    // Asteroids: movement, ship hits, projectile hits
    let mut ship_hit = false;
    let mut destroyed: Vec<(usize, AsteroidTier)> = Vec::new();
    let mut fragments = Vec::new();
    for (index, asteroid) in state.asteroids.iter_mut().enumerate() {
        asteroid.advance(&area);

        if !ship_hit && state.invulnerable_ticks == 0 && asteroid.collides_with(&state.ship) {
            ship_hit = true;
        }

        let Some(projectile) = state
            .projectiles
            .iter_mut()
            .find(|p| !p.is_expired() && asteroid.collides_with(&**p))
        else {
            continue;
        };
        projectile.expire();

        let tier = asteroid.tier();
        let center = asteroid.body().center();
        for mut fragment in asteroid.split(&mut state.rng) {
            let jitter = Vec2::new(
                state.rng.random_range(-FRAGMENT_JITTER..FRAGMENT_JITTER),
                state.rng.random_range(-FRAGMENT_JITTER..FRAGMENT_JITTER),
            );
            fragment.body_mut().place_center_at(center + jitter);
            fragments.push(fragment);
        }
        destroyed.push((index, tier));
        state.events.push(GameEvent::AsteroidDestroyed {
            tier,
            points: tier.reward(),
        });
        log::debug!("{:?} asteroid destroyed at {:?}", tier, center);
    }

    // Projectiles
    for projectile in &mut state.projectiles {
        projectile.advance(&area);
    }
    state.projectiles.retain(|p| !p.is_expired());

    if ship_hit {
        handle_ship_hit(state);
    }

    // Removals in reverse so earlier indices stay valid
    for &(index, _) in destroyed.iter().rev() {
        state.asteroids.remove(index);
    }
    state.asteroids.extend(fragments);

    state.score += destroyed.iter().map(|(_, tier)| tier.reward()).sum::<u64>();

    // Invulnerability blink
    state.invulnerable_ticks = state.invulnerable_ticks.saturating_sub(1);
    let visible = blink_visible(state.invulnerable_ticks);
    state.ship.body_mut().set_visible(visible);
    state.lives_shown = if visible { state.lives } else { 0 };

    if state.asteroids.is_empty() && state.phase == GamePhase::Running {
        state.phase = GamePhase::RoundCleared;
        log::info!("Round {} cleared", state.round);
    }
}

/// Ship and life indicator visibility for the remaining invulnerable ticks
pub fn blink_visible(invulnerable_ticks: u32) -> bool {
    invulnerable_ticks == 0 || (invulnerable_ticks / BLINK_INTERVAL_TICKS) % 2 == 0
}

/// Projectile centered ahead of the ship, moving along its facing
fn spawn_projectile(state: &mut GameState) {
    let body = state.ship.body();
    let facing = body.direction_vector();
    let muzzle = body.center() + facing * PROJECTILE_MUZZLE_OFFSET;
    let direction = body.direction();

    let mut projectile = Projectile::new(PROJECTILE_LIFETIME_TICKS);
    let projectile_body = projectile.body_mut();
    projectile_body.set_direction(direction);
    projectile_body.place_center_at(muzzle);
    projectile_body.set_velocity(facing * PROJECTILE_SPEED);

    state.projectiles.push(projectile);
    state.events.push(GameEvent::ProjectileFired);
}

fn handle_ship_hit(state: &mut GameState) {
    state.lives = state.lives.saturating_sub(1);
    state.events.push(GameEvent::ShipHit {
        lives_left: state.lives,
    });
    log::debug!("Ship hit, {} lives left", state.lives);

    if state.lives > 0 {
        state.invulnerable_ticks = INVULNERABLE_TICKS;
        state.phase = GamePhase::WaitingAfterHit;
        state.status = CONTINUE_PROMPT.to_string();
    } else {
        state.phase = GamePhase::WaitingGameOver;
        state.status = EXIT_PROMPT.to_string();
        state.events.push(GameEvent::GameOver { score: state.score });
        log::info!("Game over with score {}", state.score);
    }
}

/// Award the round bonus and set up the next wave, paused behind the
/// continue prompt
pub fn start_next_round(state: &mut GameState) {
    let extra_life = state.lives < MAX_LIVES;
    let bonus = if extra_life {
        state.lives += 1;
        ROUND_CLEAR_BONUS
    } else {
        ROUND_CLEAR_BONUS + FULL_LIVES_BONUS
    };
    state.score += bonus;
    state.events.push(GameEvent::RoundCleared {
        round: state.round,
        bonus,
        extra_life,
    });

    state.round += 1;
    state.projectiles.clear();
    state.asteroids.clear();
    state.spawn_wave();
    state.place_ship();
    state.invulnerable_ticks = INVULNERABLE_TICKS;
    state.lives_shown = state.lives;
    state.phase = GamePhase::WaitingAfterHit;
    state.status = CONTINUE_PROMPT.to_string();
    state.events.push(GameEvent::RoundStarted { round: state.round });
    log::info!(
        "Round {} ready: bonus {}, {} lives, score {}",
        state.round,
        bonus,
        state.lives,
        state.score
    );
}
