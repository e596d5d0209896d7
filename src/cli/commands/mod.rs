pub mod init;
pub mod prune;

pub use prune::PruneSummary;
