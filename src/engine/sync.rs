//! Worker synchronization primitives
//!
//! Each worker advances through an explicit per-tick state machine, guarded
//! by a single mutex + condvar pair per worker. The render release is a
//! sticky token inside the same lock, so the orchestrator may grant it before
//! the worker reaches the render gate without losing the wakeup.
//!
//! Protocol per tick:
//! - orchestrator: `dispatch` (AwaitingDispatch -> ComputingPhysics)
//! - worker: `await_render` if it must see the frame out first
//!   (ComputingPhysics -> AwaitingRender -> ComputingPhysics)
//! - worker: `finish` (ComputingPhysics -> Done)
//! - orchestrator: `await_done` (observes Done, rearms to AwaitingDispatch)
//!
//! Asteroid and bullet workers additionally report through the shared
//! `TickBarrier`; the vessel worker has its own completion path because the
//! frame cannot be presented until its tick work is observed.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Condvar, Mutex};

use crate::consts::COUNTED_WORKERS;

/// Per-tick worker state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkerPhase {
    /// Parked until the orchestrator starts the next tick
    AwaitingDispatch,
    /// Running this tick's physics work
    ComputingPhysics,
    /// Forces computed; blocked until the frame has been presented
    AwaitingRender,
    /// Tick work complete, not yet observed by the orchestrator
    Done,
}

#[derive(Debug)]
struct GateState {
    phase: WorkerPhase,
    render_released: bool,
}

/// One worker's rendezvous point with the orchestrator
#[derive(Debug)]
pub struct PhaseGate {
    state: Mutex<GateState>,
    cond: Condvar,
}

impl Default for PhaseGate {
    fn default() -> Self {
        Self::new()
    }
}

impl PhaseGate {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(GateState {
                phase: WorkerPhase::AwaitingDispatch,
                render_released: false,
            }),
            cond: Condvar::new(),
        }
    }

    /// Orchestrator: release the worker into this tick
    pub fn dispatch(&self) {
        let mut state = self.state.lock().expect("phase gate poisoned");
        debug_assert_eq!(state.phase, WorkerPhase::AwaitingDispatch);
        state.phase = WorkerPhase::ComputingPhysics;
        self.cond.notify_one();
    }

    /// Worker: park until dispatched
    pub fn await_dispatch(&self) {
        let mut state = self.state.lock().expect("phase gate poisoned");
        while state.phase != WorkerPhase::ComputingPhysics {
            state = self.cond.wait(state).expect("phase gate poisoned");
        }
    }

    /// Worker: park until the orchestrator has presented the frame
    pub fn await_render(&self) {
        let mut state = self.state.lock().expect("phase gate poisoned");
        debug_assert_eq!(state.phase, WorkerPhase::ComputingPhysics);
        state.phase = WorkerPhase::AwaitingRender;
        while !state.render_released {
            state = self.cond.wait(state).expect("phase gate poisoned");
        }
        state.render_released = false;
        state.phase = WorkerPhase::ComputingPhysics;
    }

    /// Orchestrator: grant this tick's render release (sticky)
    pub fn release_render(&self) {
        let mut state = self.state.lock().expect("phase gate poisoned");
        state.render_released = true;
        self.cond.notify_one();
    }

    /// Worker: report this tick's work complete
    pub fn finish(&self) {
        let mut state = self.state.lock().expect("phase gate poisoned");
        debug_assert_eq!(state.phase, WorkerPhase::ComputingPhysics);
        state.phase = WorkerPhase::Done;
        self.cond.notify_one();
    }

    /// Orchestrator: observe completion and rearm for the next dispatch
    pub fn await_done(&self) {
        let mut state = self.state.lock().expect("phase gate poisoned");
        while state.phase != WorkerPhase::Done {
            state = self.cond.wait(state).expect("phase gate poisoned");
        }
        state.phase = WorkerPhase::AwaitingDispatch;
    }

    #[cfg(test)]
    pub fn phase(&self) -> WorkerPhase {
        self.state.lock().expect("phase gate poisoned").phase
    }
}

/// Counts worker completions per tick; the orchestrator blocks until all
/// expected workers have arrived, then the counter resets for the next tick.
#[derive(Debug)]
pub struct TickBarrier {
    count: Mutex<usize>,
    cond: Condvar,
    expected: usize,
}

impl TickBarrier {
    pub fn new(expected: usize) -> Self {
        Self {
            count: Mutex::new(0),
            cond: Condvar::new(),
            expected,
        }
    }

    /// Worker: report completion
    pub fn arrive(&self) {
        let mut count = self.count.lock().expect("tick barrier poisoned");
        *count += 1;
        debug_assert!(*count <= self.expected);
        self.cond.notify_one();
    }

    /// Orchestrator: block until every expected worker arrived, then reset
    pub fn wait_all(&self) {
        let mut count = self.count.lock().expect("tick barrier poisoned");
        while *count != self.expected {
            count = self.cond.wait(count).expect("tick barrier poisoned");
        }
        *count = 0;
    }
}

/// The rendezvous primitives every thread shares
#[derive(Debug)]
pub struct SyncState {
    pub vessel: PhaseGate,
    pub asteroids: PhaseGate,
    pub bullets: PhaseGate,
    /// Completion counter for the asteroid and bullet workers
    pub tick_done: TickBarrier,
    /// Cooperative cancellation, polled at tick boundaries only
    pub game_ended: AtomicBool,
}

impl Default for SyncState {
    fn default() -> Self {
        Self::new()
    }
}

impl SyncState {
    pub fn new() -> Self {
        Self {
            vessel: PhaseGate::new(),
            asteroids: PhaseGate::new(),
            bullets: PhaseGate::new(),
            tick_done: TickBarrier::new(COUNTED_WORKERS),
            game_ended: AtomicBool::new(false),
        }
    }

    pub fn game_ended(&self) -> bool {
        self.game_ended.load(Ordering::Acquire)
    }

    pub fn end_game(&self) {
        self.game_ended.store(true, Ordering::Release);
    }
}
