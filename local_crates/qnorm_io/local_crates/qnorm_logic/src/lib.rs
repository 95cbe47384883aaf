mod core;
mod normalization;
mod sat;
mod utils;

pub use crate::core::Clause;
pub use crate::core::Formula;
pub use crate::core::Literal;
pub use crate::core::MAX_VARS;
pub use crate::core::VarId;

pub use normalization::normalize;
pub use normalization::ClauseAssembler;
pub use normalization::OccurrenceIndex;
pub use normalization::VariableSplitter;
pub use normalization::MIN_SPLITTING_THRESHOLD;
pub use normalization::MIN_THRESHOLD;

pub use sat::default_sat_solver;
pub use sat::is_true_2qbf;
pub use sat::BruteForceSatSolver;
pub use sat::CadicalSatSolver;
pub use sat::ConsistencyCheckResult;
pub use sat::SatSolver;
pub use sat::MAX_BRUTE_FORCE_VARS;
pub use sat::MAX_UNIVERSALS;
pub use sat::MAYBE_TIMEOUT_MSG;

pub use utils::RcMut;
