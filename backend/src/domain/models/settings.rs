use serde::{Deserialize, Serialize};

/// Display unit preference for weights.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum WeightUnit {
    #[default]
    Kilograms,
    PoundsOunces,
}

/// Per-user preferences persisted across sessions.
///
/// Read once at startup and written whenever the selection or unit
/// changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct UserSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_baby_id: Option<String>,
    #[serde(default)]
    pub weight_unit: WeightUnit,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = UserSettings::default();
        assert!(settings.selected_baby_id.is_none());
        assert_eq!(settings.weight_unit, WeightUnit::Kilograms);
    }

    #[test]
    fn test_round_trip() {
        let settings = UserSettings {
            selected_baby_id: Some("baby-1".to_string()),
            weight_unit: WeightUnit::PoundsOunces,
        };

        let yaml = serde_yaml::to_string(&settings).unwrap();
        assert!(yaml.contains("weightUnit: poundsOunces"));

        let parsed: UserSettings = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(parsed, settings);
    }
}
