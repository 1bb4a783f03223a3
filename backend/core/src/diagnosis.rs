use serde::{Deserialize, Serialize};

/// Visual descriptors of the tongue body and coating.
///
/// Every field is required on the wire; a missing field is a decode error,
/// never a silent default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisualFindings {
    /// Tongue body color (e.g. Pucat, Merah, Ungu).
    pub color: String,
    /// Body shape (e.g. Bengkak, Tipis, Tanda Gigi).
    pub shape: String,
    /// Coating quality (e.g. Tebal, Tipis, Mengupas).
    pub coating: String,
    /// Moisture level (e.g. Kering, Basah, Licin).
    pub moisture: String,
    /// Cracks in the tongue body.
    pub fissures: String,
    /// Other features: petechiae, sublingual veins, etc.
    pub features: String,
}

/// The inferred TCM syndrome pattern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TcmPattern {
    /// Disturbance of Qi, Xue, Yin, or Yang.
    pub vital_substances: String,
    /// Involved Zang Fu organ systems.
    pub zang_fu: String,
    /// Excess (Shi) or deficiency (Xu).
    pub condition: String,
    /// Pathogenic factor: Heat, Cold, Dampness, Wind.
    pub pathogen: String,
}

/// Suggested therapy. List fields may be empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Treatment {
    pub acupuncture_points: Vec<String>,
    pub technique: String,
    pub herbal_recommendations: Vec<String>,
}

/// One ICD-10 reference code loosely associated with the pattern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Icd10Entry {
    pub code: String,
    pub description: String,
}

/// The structured analysis returned by the model for one uploaded image.
///
/// Created once per request, replaced wholesale by the next submission,
/// never patched field-by-field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub visual_findings: VisualFindings,
    pub tcm_pattern: TcmPattern,
    pub diagnosis_reasoning: String,
    pub treatment: Treatment,
    pub icd10: Vec<Icd10Entry>,
}

/// Discriminated outcome of a completed model call.
///
/// The model signals a declined analysis (not a tongue, too unclear) by
/// returning a schema-conforming payload with an empty `color` and an
/// apology in `diagnosisReasoning`. `classify` lifts that wire convention
/// into an explicit variant so callers never re-check it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalysisOutcome {
    /// A usable diagnosis.
    Diagnosis(AnalysisResult),
    /// The model declined; carries its own human-readable explanation.
    Declined(String),
}

impl AnalysisOutcome {
    /// Classify a decoded payload as a diagnosis or a polite decline.
    ///
    /// A decline is an empty `visualFindings.color` combined with the
    /// case-insensitive substring "error" in the reasoning text.
    pub fn classify(result: AnalysisResult) -> Self {
        let declined = result.visual_findings.color.is_empty()
            && result
                .diagnosis_reasoning
                .to_lowercase()
                .contains("error");
        if declined {
            Self::Declined(result.diagnosis_reasoning)
        } else {
            Self::Diagnosis(result)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_result(color: &str, reasoning: &str) -> AnalysisResult {
        AnalysisResult {
            visual_findings: VisualFindings {
                color: color.into(),
                shape: "Bengkak".into(),
                coating: "Tipis".into(),
                moisture: "Basah".into(),
                fissures: "Tidak ada".into(),
                features: "Tanda gigi di tepi".into(),
            },
            tcm_pattern: TcmPattern {
                vital_substances: "Defisiensi Qi".into(),
                zang_fu: "Limpa".into(),
                condition: "Xu".into(),
                pathogen: "Lembab".into(),
            },
            diagnosis_reasoning: reasoning.into(),
            treatment: Treatment {
                acupuncture_points: vec!["ST36".into(), "SP6".into()],
                technique: "Tonifikasi".into(),
                herbal_recommendations: vec!["Jahe".into()],
            },
            icd10: vec![Icd10Entry {
                code: "R68.89".into(),
                description: "Other general symptoms and signs".into(),
            }],
        }
    }

    #[test]
    fn classifies_populated_result_as_diagnosis() {
        let result = sample_result("Pale Red", "Lidah pucat menunjukkan defisiensi Qi.");
        match AnalysisOutcome::classify(result.clone()) {
            AnalysisOutcome::Diagnosis(r) => assert_eq!(r, result),
            other => panic!("expected diagnosis, got {other:?}"),
        }
    }

    #[test]
    fn classifies_empty_color_with_error_keyword_as_declined() {
        let result = sample_result("", "Error: Maaf, gambar ini bukan lidah manusia");
        match AnalysisOutcome::classify(result) {
            AnalysisOutcome::Declined(msg) => {
                assert_eq!(msg, "Error: Maaf, gambar ini bukan lidah manusia");
            }
            other => panic!("expected declined, got {other:?}"),
        }
    }

    #[test]
    fn error_keyword_match_is_case_insensitive() {
        let result = sample_result("", "ERROR: gambar tidak jelas");
        assert!(matches!(
            AnalysisOutcome::classify(result),
            AnalysisOutcome::Declined(_)
        ));
    }

    #[test]
    fn empty_color_without_keyword_is_still_a_diagnosis() {
        // The heuristic needs both signals; one alone is not a decline.
        let result = sample_result("", "Warna tidak dapat ditentukan dari foto ini.");
        assert!(matches!(
            AnalysisOutcome::classify(result),
            AnalysisOutcome::Diagnosis(_)
        ));
    }

    #[test]
    fn wire_names_are_camel_case() {
        let json = serde_json::to_value(sample_result("Merah", "ok")).unwrap();
        assert!(json["visualFindings"]["color"].is_string());
        assert!(json["tcmPattern"]["vitalSubstances"].is_string());
        assert!(json["tcmPattern"]["zangFu"].is_string());
        assert!(json["treatment"]["acupuncturePoints"].is_array());
        assert!(json["treatment"]["herbalRecommendations"].is_array());
        assert!(json["diagnosisReasoning"].is_string());
    }

    #[test]
    fn missing_field_is_a_decode_error() {
        let mut json = serde_json::to_value(sample_result("Merah", "ok")).unwrap();
        json["visualFindings"]
            .as_object_mut()
            .unwrap()
            .remove("coating");
        let err = serde_json::from_value::<AnalysisResult>(json);
        assert!(err.is_err());
    }
}
