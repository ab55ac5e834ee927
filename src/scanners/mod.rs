pub mod runs;

pub use runs::{all_quintets, first_triplet, QuintetSet, RunSummary};
