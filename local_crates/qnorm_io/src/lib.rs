//! Text formats and external collaborators for the QDIMACS normalization tools.
//!
//! This crate reads and writes the QDIMACS format, drives an external QBF solver,
//! and provides the helpers used to process directories of formulas.
//! The formula model and the normalization itself are re-exported from `qnorm_logic`.

mod batch;
pub use batch::list_input_files;
pub use batch::normalized_file_name;
pub use batch::Statistics;

mod io;
pub use io::QdimacsReader;
pub use io::QdimacsWriter;

mod solver;
pub use solver::Evaluation;
pub use solver::ExternalSolver;
pub use solver::Measurement;
pub use solver::SolverOptions;
pub use solver::SolverStatus;

pub use qnorm_logic::{
    default_sat_solver, is_true_2qbf, normalize, BruteForceSatSolver, CadicalSatSolver, Clause,
    ClauseAssembler, ConsistencyCheckResult, Formula, Literal, OccurrenceIndex, SatSolver, VarId,
    VariableSplitter, MIN_SPLITTING_THRESHOLD, MIN_THRESHOLD,
};
