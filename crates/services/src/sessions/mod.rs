mod engine;
mod progress;
mod queue;
mod quiz;
mod round;
mod state;

// Public API of the session subsystem.
pub use engine::{EngineBuilder, SessionEngine};
pub use progress::SessionProgress;
pub use queue::{DrawQueue, shuffle};
pub use quiz::Quiz;
pub use round::{DISTRACTORS, Round, is_fair_distractor};
pub use state::{GuessOutcome, PREFETCH_AHEAD, RoundContext, SessionEvent, SessionState};
