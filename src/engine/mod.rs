//! Staged tick pipeline
//!
//! The concurrency layer: shared context, phase-gate synchronization and the
//! orchestrator that sequences input, physics, rendering and collision
//! resolution across one orchestrator thread plus three entity-class
//! workers.

pub mod context;
pub mod orchestrator;
pub mod sync;

pub use context::{ControlInput, SimContext, World};
pub use orchestrator::Engine;
pub use sync::{PhaseGate, SyncState, TickBarrier, WorkerPhase};
