//! Single-flight session state machine.
//!
//! The whole screen lives in one of four phases: `Idle → Loading →
//! {Success, Error} → Loading` on the next upload. One enum value owns the
//! result or the error, so a simultaneous success-and-error display is
//! unrepresentable.

use serde::{Deserialize, Serialize};

use crate::diagnosis::{AnalysisOutcome, AnalysisResult};
use crate::error::ShezhenError;

/// Current phase of the analysis screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum SessionPhase {
    Idle,
    Loading,
    Success { result: AnalysisResult },
    Error { message: String },
}

/// Single-owner analysis session.
///
/// `begin` is the hard in-flight guard: while a request is outstanding any
/// further submission is refused with `Busy` instead of racing the first.
#[derive(Debug, Default)]
pub struct AnalysisSession {
    phase: SessionPhase,
}

impl Default for SessionPhase {
    fn default() -> Self {
        Self::Idle
    }
}

impl AnalysisSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new analysis. Clears any previous result and error.
    ///
    /// Returns `Busy` when one is already in flight; the caller must not
    /// issue a request in that case.
    pub fn begin(&mut self) -> Result<(), ShezhenError> {
        if matches!(self.phase, SessionPhase::Loading) {
            return Err(ShezhenError::Busy);
        }
        self.phase = SessionPhase::Loading;
        Ok(())
    }

    /// Record the outcome of the in-flight analysis.
    ///
    /// A declined analysis routes to the error display carrying the model's
    /// own explanation.
    pub fn complete(&mut self, outcome: AnalysisOutcome) {
        self.phase = match outcome {
            AnalysisOutcome::Diagnosis(result) => SessionPhase::Success { result },
            AnalysisOutcome::Declined(message) => SessionPhase::Error { message },
        };
    }

    /// Record an infrastructure failure with a user-visible message.
    pub fn fail(&mut self, message: impl Into<String>) {
        self.phase = SessionPhase::Error {
            message: message.into(),
        };
    }

    pub fn phase(&self) -> &SessionPhase {
        &self.phase
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.phase, SessionPhase::Loading)
    }

    /// The current result, if the last analysis succeeded.
    pub fn result(&self) -> Option<&AnalysisResult> {
        match &self.phase {
            SessionPhase::Success { result } => Some(result),
            _ => None,
        }
    }

    /// The current error message, if the last analysis failed or was declined.
    pub fn error(&self) -> Option<&str> {
        match &self.phase {
            SessionPhase::Error { message } => Some(message),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnosis::{Icd10Entry, TcmPattern, Treatment, VisualFindings};
    use crate::error::GENERIC_ANALYSIS_ERROR;

    fn diagnosis() -> AnalysisResult {
        AnalysisResult {
            visual_findings: VisualFindings {
                color: "Pale Red".into(),
                shape: "Normal".into(),
                coating: "Tipis putih".into(),
                moisture: "Normal".into(),
                fissures: "Tidak ada".into(),
                features: "Tidak ada".into(),
            },
            tcm_pattern: TcmPattern {
                vital_substances: "Qi normal".into(),
                zang_fu: "Seimbang".into(),
                condition: "Normal".into(),
                pathogen: "Tidak ada".into(),
            },
            diagnosis_reasoning: "Lidah dalam batas normal.".into(),
            treatment: Treatment {
                acupuncture_points: vec![],
                technique: "Tidak diperlukan".into(),
                herbal_recommendations: vec![],
            },
            icd10: vec![Icd10Entry {
                code: "Z00.0".into(),
                description: "General examination".into(),
            }],
        }
    }

    #[test]
    fn successful_flow_ends_in_success_only() {
        let mut session = AnalysisSession::new();
        session.begin().unwrap();
        assert!(session.is_loading());
        session.complete(AnalysisOutcome::Diagnosis(diagnosis()));
        assert!(session.result().is_some());
        assert!(session.error().is_none());
    }

    #[test]
    fn declined_outcome_routes_to_error_verbatim() {
        let mut session = AnalysisSession::new();
        session.begin().unwrap();
        session.complete(AnalysisOutcome::Declined(
            "Maaf, gambar ini bukan lidah manusia".into(),
        ));
        assert_eq!(session.error(), Some("Maaf, gambar ini bukan lidah manusia"));
        assert!(session.result().is_none());
    }

    #[test]
    fn infrastructure_failure_shows_generic_message() {
        let mut session = AnalysisSession::new();
        session.begin().unwrap();
        session.fail(GENERIC_ANALYSIS_ERROR);
        assert_eq!(session.error(), Some(GENERIC_ANALYSIS_ERROR));
    }

    #[test]
    fn begin_clears_previous_result_and_error() {
        let mut session = AnalysisSession::new();
        session.begin().unwrap();
        session.complete(AnalysisOutcome::Diagnosis(diagnosis()));
        session.begin().unwrap();
        assert!(session.result().is_none());
        assert!(session.error().is_none());
        assert!(session.is_loading());

        session.fail("boom");
        session.begin().unwrap();
        assert!(session.error().is_none());
    }

    #[test]
    fn second_begin_while_loading_is_refused() {
        let mut session = AnalysisSession::new();
        session.begin().unwrap();
        assert!(matches!(session.begin(), Err(ShezhenError::Busy)));
        // The refused submission leaves the first one loading.
        assert!(session.is_loading());
    }

    #[test]
    fn phase_serializes_with_tag() {
        let mut session = AnalysisSession::new();
        session.begin().unwrap();
        session.fail("x");
        let json = serde_json::to_value(session.phase()).unwrap();
        assert_eq!(json["phase"], "error");
        assert_eq!(json["message"], "x");
    }
}
