pub mod aggregator;
pub mod config;
pub mod credential;
pub mod export;
pub mod io;
pub mod profile;
pub mod report;
pub mod stats;
pub mod verifier;

pub mod prelude {
    pub use crate::aggregator::{Aggregator, RunReport};
    pub use crate::config::CheckerConfig;
    pub use crate::credential::Credential;
    pub use crate::verifier::{HttpVerifier, VerificationOutcome, Verify};
}
