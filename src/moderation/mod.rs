// Moderation pipeline: verdicts, scoring policy, and the orchestrator that
// sequences the local and remote checks.

pub mod moderator;
pub mod once;
pub mod policy;
pub mod verdict;

pub use moderator::Moderator;
pub use policy::ScoringPolicy;
pub use verdict::ModerationVerdict;
