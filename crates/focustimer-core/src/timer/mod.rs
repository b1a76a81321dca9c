mod countdown;
mod orchestrator;
mod ticker;

pub use countdown::{CountdownEngine, EngineMode, Listener, ZeroReached};
pub use orchestrator::{ActiveSession, SessionOrchestrator, Status};
pub use ticker::{Ticker, TICK_PERIOD};
