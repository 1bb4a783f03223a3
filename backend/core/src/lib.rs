pub mod diagnosis;
pub mod error;
pub mod session;

pub use diagnosis::{
    AnalysisOutcome, AnalysisResult, Icd10Entry, TcmPattern, Treatment, VisualFindings,
};
pub use error::{ShezhenError, GENERIC_ANALYSIS_ERROR};
pub use session::{AnalysisSession, SessionPhase};
