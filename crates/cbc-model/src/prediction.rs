use serde::{Deserialize, Serialize};

/// Condition labels in the fixed order the classifiers were trained on.
/// The first five come from the tree ensemble, the last from the neural
/// network.
pub const CONDITION_LABELS: [&str; 6] = [
    "is_anemia",
    "is_thalassemia_suspected",
    "is_microcytic_rbc",
    "is_infection_inflammation",
    "is_allergy_parasite",
    "is_high_lipids",
];

/// Screening outcome for one patient record: six 0/1 condition flags.
/// Produced per request, never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub is_anemia: u8,
    pub is_thalassemia_suspected: u8,
    pub is_microcytic_rbc: u8,
    pub is_infection_inflammation: u8,
    pub is_allergy_parasite: u8,
    pub is_high_lipids: u8,
}

impl PredictionResult {
    /// All flags clear.
    pub fn negative() -> Self {
        Self {
            is_anemia: 0,
            is_thalassemia_suspected: 0,
            is_microcytic_rbc: 0,
            is_infection_inflammation: 0,
            is_allergy_parasite: 0,
            is_high_lipids: 0,
        }
    }

    /// Flags paired with their labels, in [`CONDITION_LABELS`] order.
    pub fn flags(&self) -> [(&'static str, u8); 6] {
        [
            (CONDITION_LABELS[0], self.is_anemia),
            (CONDITION_LABELS[1], self.is_thalassemia_suspected),
            (CONDITION_LABELS[2], self.is_microcytic_rbc),
            (CONDITION_LABELS[3], self.is_infection_inflammation),
            (CONDITION_LABELS[4], self.is_allergy_parasite),
            (CONDITION_LABELS[5], self.is_high_lipids),
        ]
    }

    /// Number of conditions flagged positive.
    pub fn positive_count(&self) -> usize {
        self.flags().iter().filter(|(_, value)| *value == 1).count()
    }
}

/// Response body of the screening endpoint.
///
/// The transport layer is external to this workspace; the wire contract is
/// not, so the shape lives here next to the record it answers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScreenResponse {
    pub predictions: PredictionResult,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn response_serializes_flag_names() {
        let mut result = PredictionResult::negative();
        result.is_anemia = 1;
        let response = ScreenResponse {
            predictions: result,
        };
        let json = serde_json::to_value(&response).expect("serialize response");
        assert_eq!(json["predictions"]["is_anemia"], 1);
        assert_eq!(json["predictions"]["is_high_lipids"], 0);
    }

    #[test]
    fn flags_follow_label_order() {
        let result = PredictionResult {
            is_anemia: 1,
            is_thalassemia_suspected: 0,
            is_microcytic_rbc: 1,
            is_infection_inflammation: 0,
            is_allergy_parasite: 0,
            is_high_lipids: 1,
        };
        let flags = result.flags();
        for (index, (label, _)) in flags.iter().enumerate() {
            assert_eq!(*label, CONDITION_LABELS[index]);
        }
        assert_eq!(result.positive_count(), 3);
    }
}
