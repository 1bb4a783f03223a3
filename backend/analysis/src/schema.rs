//! Instruction prompt and structured-output schema for the model call.
//!
//! The schema constrains the model to exactly the result shape; every field
//! is marked required, so conformance is enforced remotely and a
//! non-decodable body on receipt is an infrastructure error.

use serde_json::{json, Value};

/// Fixed instruction describing the five analytical steps, plus the
/// polite-decline convention for non-tongue images.
pub const ANALYSIS_PROMPT: &str = "\
Anda adalah ahli TCM (Traditional Chinese Medicine) tingkat senior.
Tugas Anda adalah menganalisis gambar lidah yang diberikan.

Lakukan langkah berikut:
1. Analisis visual: Warna, Bentuk, Tepi, Fissure, Coating, Kelembapan, Petechiae, dll.
2. Tentukan Pola TCM: Qi/Xue/Yin/Yang, Zang Fu, Shi/Xu, Panas/Dingin.
3. Jelaskan alasannya.
4. Berikan Tatalaksana: Titik akupunktur, Teknik, dan Herbal sederhana.
5. Tautkan ke kemungkinan diagnosis medis Barat dan ICD-10.

Gunakan Bahasa Indonesia yang profesional dan jelas.
Jika gambar tersebut BUKAN lidah manusia atau tidak jelas, kembalikan data \
kosong dengan diagnosisReasoning berisi pesan error yang sopan.";

/// Declared output schema for the `generateContent` call.
pub fn response_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "visualFindings": {
                "type": "OBJECT",
                "properties": {
                    "color": { "type": "STRING", "description": "Warna tubuh lidah (mis: Pucat, Merah, Ungu)" },
                    "shape": { "type": "STRING", "description": "Bentuk lidah (mis: Bengkak, Tipis, Tanda Gigi)" },
                    "coating": { "type": "STRING", "description": "Selaput lidah (mis: Tebal, Tipis, Mengupas, Tanpa Selaput)" },
                    "moisture": { "type": "STRING", "description": "Kelembapan (mis: Kering, Basah, Licin)" },
                    "fissures": { "type": "STRING", "description": "Retakan (mis: Retak tengah, Retak horizontal)" },
                    "features": { "type": "STRING", "description": "Fitur lain (mis: Bintik merah/petechiae, vena sublingual)" }
                },
                "required": ["color", "shape", "coating", "moisture", "fissures", "features"]
            },
            "tcmPattern": {
                "type": "OBJECT",
                "properties": {
                    "vitalSubstances": { "type": "STRING", "description": "Gangguan Qi, Xue, Yin, Yang" },
                    "zangFu": { "type": "STRING", "description": "Organ Zang Fu yang terlibat (mis: Limpa, Hati, Ginjal)" },
                    "condition": { "type": "STRING", "description": "Kondisi (Kelebihan/Xu atau Kekurangan/Shi)" },
                    "pathogen": { "type": "STRING", "description": "Patogen (Panas, Dingin, Lembab, Angin)" }
                },
                "required": ["vitalSubstances", "zangFu", "condition", "pathogen"]
            },
            "diagnosisReasoning": {
                "type": "STRING",
                "description": "Penjelasan rinci mengapa pola ini dipilih berdasarkan temuan visual."
            },
            "treatment": {
                "type": "OBJECT",
                "properties": {
                    "acupuncturePoints": {
                        "type": "ARRAY",
                        "items": { "type": "STRING" },
                        "description": "Daftar titik akupunktur utama dan tambahan."
                    },
                    "technique": {
                        "type": "STRING",
                        "description": "Teknik terapi (Tonifikasi, Sedasi, Moksibusi, dll)."
                    },
                    "herbalRecommendations": {
                        "type": "ARRAY",
                        "items": { "type": "STRING" },
                        "description": "Saran herbal sederhana yang aman."
                    }
                },
                "required": ["acupuncturePoints", "technique", "herbalRecommendations"]
            },
            "icd10": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "code": { "type": "STRING" },
                        "description": { "type": "STRING" }
                    },
                    "required": ["code", "description"]
                },
                "description": "Kemungkinan kode ICD-10 yang relevan dengan gejala klinis yang biasanya menyertai pola lidah ini."
            }
        },
        "required": ["visualFindings", "tcmPattern", "diagnosisReasoning", "treatment", "icd10"]
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn top_level_fields_are_all_required() {
        let schema = response_schema();
        let required: Vec<&str> = schema["required"]
            .as_array()
            .unwrap()
            .iter()
            .map(|v| v.as_str().unwrap())
            .collect();
        assert_eq!(
            required,
            ["visualFindings", "tcmPattern", "diagnosisReasoning", "treatment", "icd10"]
        );
    }

    #[test]
    fn visual_findings_lists_six_descriptors() {
        let schema = response_schema();
        let required = schema["properties"]["visualFindings"]["required"]
            .as_array()
            .unwrap();
        assert_eq!(required.len(), 6);
    }

    #[test]
    fn prompt_names_the_five_steps() {
        for step in ["1.", "2.", "3.", "4.", "5."] {
            assert!(ANALYSIS_PROMPT.contains(step));
        }
        assert!(ANALYSIS_PROMPT.contains("ICD-10"));
    }
}
