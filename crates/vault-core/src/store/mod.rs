//! Collaborator contracts.
//!
//! The core does not own persistence. These traits describe what it needs
//! from the user store and the challenge store; [`MemoryStore`] implements
//! both for tests and local tooling.

pub mod memory;
pub mod traits;
pub mod types;

pub use memory::MemoryStore;
pub use traits::{ChallengeStore, UserStore};
pub use types::UserRecord;
