//! 核心编排层：错误、阶段状态机、节奏控制、阶段编排器、状态投影、对局宿主

pub mod error;
pub mod host;
pub mod orchestrator;
pub mod pacing;
pub mod phase;
pub mod state;

pub use error::GameError;
pub use host::{create_game, Command, GameHandle, GameHost};
pub use orchestrator::{PhaseOrchestrator, Progress};
pub use pacing::{Beat, InstantPacer, Pacer, TimedPacer};
pub use phase::{Awaiting, Phase};
pub use state::SessionSnapshot;
