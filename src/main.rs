//! Headless demo runner
//!
//! Drives the engine with a scripted input loop and a frame-counting
//! renderer. A real front end plugs in through the `Renderer` and
//! `InputSource` traits; this binary exists to exercise the full pipeline
//! from the command line:
//!
//! ```text
//! toroids [tuning.json]
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use glam::DVec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use toroids::Tuning;
use toroids::engine::{Engine, SimContext, World};
use toroids::render::{Action, Renderer, ScriptedInput};
use toroids::sim::Triangle;

/// Logs a frame summary once per simulated second
#[derive(Debug, Default)]
struct TraceRenderer {
    frames: u64,
    circles: usize,
    dots: usize,
}

impl Renderer for TraceRenderer {
    fn clear(&mut self) {
        self.circles = 0;
        self.dots = 0;
    }

    fn draw_circle(&mut self, _center: DVec2, _radius: f64) {
        self.circles += 1;
    }

    fn draw_dot(&mut self, _pos: DVec2) {
        self.dots += 1;
    }

    fn draw_triangle(&mut self, _pose: &Triangle, _invincible: bool) {}

    fn present(&mut self) {
        self.frames += 1;
        if self.frames % 24 == 0 {
            log::info!(
                "frame {}: {} asteroid(s), {} bullet(s)",
                self.frames,
                self.circles,
                self.dots
            );
        }
    }
}

/// A canned pilot: spin, thrust and fire until the tick budget runs out
fn demo_script(ticks: usize) -> ScriptedInput {
    let pattern = [
        Action::TurnLeft,
        Action::Idle,
        Action::ThrustForward,
        Action::Idle,
        Action::Fire,
        Action::Idle,
    ];
    let actions = pattern.iter().copied().cycle().take(ticks).collect();
    ScriptedInput::new(actions, Action::Quit)
}

fn main() {
    env_logger::init();

    let path = std::env::args().nth(1).map(PathBuf::from);
    let tuning = Tuning::load_or_default(path.as_deref());

    let mut rng = Pcg32::seed_from_u64(tuning.seed);
    let ctx = Arc::new(SimContext::new(tuning.clone()));
    let world = Arc::new(World::new(&tuning, &mut rng, ctx.clock.now()));

    let mut renderer = TraceRenderer::default();
    let mut input = demo_script(24 * 60);

    let outcome = Engine::new(ctx, world).run(&mut renderer, &mut input);
    log::info!("demo finished after {} frame(s): {outcome:?}", renderer.frames);
}
