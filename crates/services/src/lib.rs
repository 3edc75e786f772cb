#![forbid(unsafe_code)]

pub mod app_services;
pub mod error;
pub mod prefetch;
pub mod sessions;

pub use app_services::{initialize, initialize_from_config};
pub use error::AppServicesError;
pub use prefetch::{HttpPrefetch, NoopPrefetch, Prefetch};
pub use sessions::{
    GuessOutcome, Quiz, Round, SessionEngine, SessionEvent, SessionProgress, SessionState,
};
