//! Session module
//!
//! The session state machine, per-tick processing and the views handed to
//! renderers.

mod engine;
mod history;
mod loader;
mod notices;
mod snapshot;
mod state;

pub use history::{PerformanceHistory, PerformancePoint};
pub use loader::load_historical;
pub use notices::{Notice, NoticeBoard, NoticeKind};
pub use engine::{AdvancePreset, Session, TickOutcome, TickReport};
pub use snapshot::{AccountSnapshot, NoticeView, SessionSnapshot};
pub use state::{SessionError, SessionPhase};

use std::sync::Arc;
use tokio::sync::RwLock;

/// Session shared between the tick loop and user actions
pub type SharedSession = Arc<RwLock<Session>>;
