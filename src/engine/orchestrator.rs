//! Tick orchestration
//!
//! One orchestrator plus exactly three long-lived workers, one per entity
//! class. Per tick the orchestrator applies queued input, dispatches the
//! workers, renders the frame once the vessel's tick work is observed,
//! broadcasts the render release (unblocking asteroid and bullet position
//! advances), waits for the completion counter, then resolves collisions and
//! termination with exclusive access to the stores.
//!
//! Ordering guarantees, in happens-before terms: input application before
//! dispatch; dispatch before each worker's force computation; vessel
//! completion before render; render release before asteroid/bullet position
//! advance; all completions before the next tick's input application.
//! Collision resolution runs strictly between ticks.

use std::sync::Arc;
use std::thread::{self, JoinHandle};

use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::render::{InputSource, Renderer};
use crate::sim::{GameOutcome, asteroid, bullet, collision};

use super::context::{SimContext, World};

/// Owns the tick loop and the three worker threads
pub struct Engine {
    ctx: Arc<SimContext>,
    world: Arc<World>,
    rng: Pcg32,
}

impl Engine {
    pub fn new(ctx: Arc<SimContext>, world: Arc<World>) -> Self {
        let rng = Pcg32::seed_from_u64(ctx.tuning.seed);
        Self { ctx, world, rng }
    }

    /// Run the simulation to its terminal state.
    ///
    /// Spawns the vessel, asteroid and bullet workers, drives the tick loop
    /// on the calling thread, and joins every worker before returning.
    pub fn run(&mut self, renderer: &mut dyn Renderer, input: &mut dyn InputSource) -> GameOutcome {
        let workers = self.spawn_workers();
        log::info!(
            "simulation started: {} asteroid(s), seed {}",
            self.world.asteroids.lock().expect("asteroid store poisoned").len(),
            self.ctx.tuning.seed
        );

        let outcome = self.tick_loop(renderer, input);
        self.shutdown(workers);

        log::info!("simulation ended: {outcome:?}");
        outcome
    }

    fn spawn_workers(&self) -> Vec<JoinHandle<()>> {
        let spawn = |name: &str, f: fn(Arc<SimContext>, Arc<World>)| {
            let ctx = Arc::clone(&self.ctx);
            let world = Arc::clone(&self.world);
            thread::Builder::new()
                .name(name.to_owned())
                .spawn(move || f(ctx, world))
                .expect("failed to spawn worker thread")
        };

        vec![
            spawn("vessel", vessel_worker),
            spawn("asteroids", asteroid_worker),
            spawn("bullets", bullet_worker),
        ]
    }

    fn tick_loop(&mut self, renderer: &mut dyn Renderer, input: &mut dyn InputSource) -> GameOutcome {
        let ctx = Arc::clone(&self.ctx);
        let sync = &ctx.sync;

        loop {
            self.ctx.clock.advance(self.ctx.tuning.dt);
            self.ctx.apply_action(input.poll());
            if self.ctx.game_ended() {
                return GameOutcome::Quit;
            }

            sync.vessel.dispatch();
            sync.asteroids.dispatch();
            sync.bullets.dispatch();

            // The frame draws the vessel, so its tick work must be observed
            // first. Asteroid force accumulation may still be running; the
            // store locks below serialize the snapshot reads against it.
            sync.vessel.await_done();
            self.render_frame(renderer);

            sync.asteroids.release_render();
            sync.bullets.release_render();

            // All position advances commit before collision resolution
            sync.tick_done.wait_all();
            sync.asteroids.await_done();
            sync.bullets.await_done();

            if let Some(outcome) = self.resolve_collisions() {
                sync.end_game();
                return outcome;
            }
        }
    }

    fn render_frame(&self, renderer: &mut dyn Renderer) {
        renderer.clear();

        {
            let asteroids = self.world.asteroids.lock().expect("asteroid store poisoned");
            for ast in asteroids.iter() {
                renderer.draw_circle(ast.pos, ast.radius);
            }
        }
        {
            let bullets = self.world.bullets.lock().expect("bullet store poisoned");
            for b in bullets.iter() {
                renderer.draw_dot(b.pos);
            }
        }
        {
            let vessel = self.world.vessel.lock().expect("vessel poisoned");
            renderer.draw_triangle(&vessel.pose(), vessel.is_invincible(&self.ctx.clock));
        }

        renderer.present();
    }

    /// Between-tick resolution pass: bullet impacts, fragmentation, vessel
    /// contact, then the terminal-state check.
    fn resolve_collisions(&mut self) -> Option<GameOutcome> {
        let mut asteroids = self.world.asteroids.lock().expect("asteroid store poisoned");
        let mut bullets = self.world.bullets.lock().expect("bullet store poisoned");
        let mut vessel = self.world.vessel.lock().expect("vessel poisoned");

        collision::resolve_bullet_impacts(
            &mut asteroids,
            &mut bullets,
            self.ctx.tuning.dt,
            &mut self.rng,
        );
        collision::resolve_vessel_contact(&mut vessel, &asteroids, &self.ctx.clock);

        collision::check_termination(&asteroids, &vessel)
    }

    /// Wake every parked worker so it can observe the termination flag, then
    /// join all three.
    fn shutdown(&self, workers: Vec<JoinHandle<()>>) {
        let sync = &self.ctx.sync;
        sync.end_game();
        sync.vessel.dispatch();
        sync.asteroids.dispatch();
        sync.bullets.dispatch();

        for handle in workers {
            handle.join().expect("worker thread panicked");
        }
    }
}

/// Vessel worker: firing, thrust application and movement, once per dispatch.
///
/// A fired bullet is pushed into the bullet store here; the bullet worker
/// only scans that store after the render release, so the push is ordered
/// before any scan of the same tick.
fn vessel_worker(ctx: Arc<SimContext>, world: Arc<World>) {
    let tuning = &ctx.tuning;

    loop {
        ctx.sync.vessel.await_dispatch();
        if ctx.game_ended() {
            break;
        }

        let input = *ctx.input.lock().expect("control input poisoned");
        let mut vessel = world.vessel.lock().expect("vessel poisoned");

        if input.fire_requested
            && let Some(b) = vessel.fire(
                &ctx.clock,
                tuning.bullet_speed,
                tuning.bullet_max_distance,
                tuning.dt,
            )
        {
            world.bullets.lock().expect("bullet store poisoned").push(b);
            log::debug!("bullet fired");
        }

        vessel.reset_acceleration();
        vessel.apply_thrust(input.linear_accel);
        vessel.apply_torque(input.angular_accel);
        vessel.advance(tuning.dt, &tuning.bounds);
        drop(vessel);

        ctx.sync.vessel.finish();
    }
}

/// Asteroid worker: all-pairs forces before the render gate, position
/// advance after it, so the rendered frame never shows half-advanced state.
fn asteroid_worker(ctx: Arc<SimContext>, world: Arc<World>) {
    let tuning = &ctx.tuning;

    loop {
        ctx.sync.asteroids.await_dispatch();
        if ctx.game_ended() {
            break;
        }

        {
            let mut asteroids = world.asteroids.lock().expect("asteroid store poisoned");
            asteroid::reset_accelerations(&mut asteroids);
            asteroid::accumulate_forces(
                &mut asteroids,
                tuning.gravity,
                tuning.repulsion,
                &tuning.bounds,
            );
        }

        ctx.sync.asteroids.await_render();

        {
            let mut asteroids = world.asteroids.lock().expect("asteroid store poisoned");
            asteroid::integrate(&mut asteroids, tuning.dt, &tuning.bounds);
        }

        ctx.sync.asteroids.finish();
        ctx.sync.tick_done.arrive();
    }
}

/// Bullet worker: bullets carry no forces, so all movement waits on the
/// render release, then expired bullets are swept.
fn bullet_worker(ctx: Arc<SimContext>, world: Arc<World>) {
    let tuning = &ctx.tuning;

    loop {
        ctx.sync.bullets.await_dispatch();
        if ctx.game_ended() {
            break;
        }

        ctx.sync.bullets.await_render();

        {
            let mut bullets = world.bullets.lock().expect("bullet store poisoned");
            bullet::advance_all(&mut bullets, tuning.dt, &tuning.bounds);
            bullet::remove_expired(&mut bullets);
        }

        ctx.sync.bullets.finish();
        ctx.sync.tick_done.arrive();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{Action, NullRenderer, ScriptedInput};
    use crate::sim::Asteroid;
    use crate::tuning::Tuning;
    use glam::DVec2;

    /// Script that fires early, idles, then quits after `quit_at` polls
    fn fire_then_quit(quit_at: usize) -> ScriptedInput {
        let mut actions = vec![Action::Fire; 5];
        actions.resize(quit_at, Action::Idle);
        ScriptedInput::new(actions, Action::Quit)
    }

    fn run_scenario(tuning: Tuning, asteroids: Vec<Asteroid>, input: &mut ScriptedInput) -> (GameOutcome, Arc<World>) {
        let ctx = Arc::new(SimContext::new(tuning.clone()));
        let world = Arc::new(World::with_entities(&tuning, asteroids, Vec::new(), 0.0));
        let outcome = Engine::new(Arc::clone(&ctx), Arc::clone(&world))
            .run(&mut NullRenderer, input);
        (outcome, world)
    }

    #[test]
    fn bullet_fragments_asteroid_end_to_end() {
        let tuning = Tuning::default();
        // Stationary generation-0 asteroid straight ahead of the vessel
        let asteroids = vec![Asteroid::with_velocity(
            DVec2::new(0.5, 0.8),
            DVec2::ZERO,
            0.05,
            1.0,
            0,
            tuning.asteroid_max_speed,
            tuning.dt,
        )];

        let (outcome, world) = run_scenario(tuning, asteroids, &mut fire_then_quit(150));

        assert_eq!(outcome, GameOutcome::Quit);
        let asteroids = world.asteroids.lock().expect("poisoned");
        assert_eq!(asteroids.len(), 2);
        assert!(asteroids.iter().all(|a| a.generation == 1));
        assert!(world.bullets.lock().expect("poisoned").is_empty());
        assert_eq!(world.vessel.lock().expect("poisoned").remaining_lives, 2);
    }

    #[test]
    fn destroying_the_last_asteroid_wins() {
        let tuning = Tuning::default();
        // A final-generation asteroid fragments into nothing
        let asteroids = vec![Asteroid::with_velocity(
            DVec2::new(0.5, 0.8),
            DVec2::ZERO,
            0.05,
            1.0,
            2,
            tuning.asteroid_max_speed,
            tuning.dt,
        )];

        let (outcome, world) = run_scenario(tuning, asteroids, &mut fire_then_quit(400));

        assert_eq!(outcome, GameOutcome::Won);
        assert!(world.asteroids.lock().expect("poisoned").is_empty());
    }

    #[test]
    fn exhausting_lives_loses() {
        let tuning = Tuning {
            vessel_lives: 1,
            invincibility_duration: 0.0,
            ..Tuning::default()
        };
        // Asteroid sitting on the vessel spawn point
        let asteroids = vec![Asteroid::with_velocity(
            tuning.vessel_pos,
            DVec2::ZERO,
            0.05,
            1.0,
            0,
            tuning.asteroid_max_speed,
            tuning.dt,
        )];

        let mut input = ScriptedInput::new(Vec::new(), Action::Idle);
        let (outcome, world) = run_scenario(tuning, asteroids, &mut input);

        assert_eq!(outcome, GameOutcome::Lost);
        assert_eq!(world.vessel.lock().expect("poisoned").remaining_lives, 0);
    }

    #[test]
    fn quit_terminates_immediately() {
        let tuning = Tuning::default();
        let asteroids = vec![Asteroid::with_velocity(
            DVec2::new(0.2, 0.2),
            DVec2::ZERO,
            0.05,
            1.0,
            0,
            tuning.asteroid_max_speed,
            tuning.dt,
        )];

        let mut input = ScriptedInput::new(Vec::new(), Action::Quit);
        let (outcome, world) = run_scenario(tuning, asteroids, &mut input);

        assert_eq!(outcome, GameOutcome::Quit);
        // Quit on the first poll: no tick ever ran
        assert_eq!(world.asteroids.lock().expect("poisoned").len(), 1);
    }
}
