use std::collections::BTreeMap;

use serde::Deserialize;

/// Reported or inferred sample sex. Sex-dependent rules (G6PD) branch on
/// this; `Unknown` is a first-class state, never a silent default to one sex.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Sex {
    Male,
    Female,
    #[default]
    Unknown,
}

impl Sex {
    /// Accepts the loose spellings upstream tools emit ("M", "female",
    /// "XY", ...). Anything unrecognized stays Unknown.
    pub fn parse(raw: &str) -> Sex {
        match raw.trim().to_ascii_lowercase().as_str() {
            "m" | "male" | "xy" => Sex::Male,
            "f" | "female" | "xx" => Sex::Female,
            _ => Sex::Unknown,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Sex::Male => "male",
            Sex::Female => "female",
            Sex::Unknown => "unknown",
        }
    }
}

/// QC statistics produced by the upstream file-level QC step. Every field is
/// optional: an older or partial summary.json still renders a report.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct QcSummary {
    #[serde(default)]
    pub total_markers: Option<u64>,
    #[serde(default)]
    pub call_rate: Option<f64>,
    #[serde(default)]
    pub heterozygosity_rate: Option<f64>,
    #[serde(default)]
    pub inferred_sex: Option<String>,
    #[serde(default)]
    pub detected_build: Option<String>,
    #[serde(default)]
    pub ambiguous_count: Option<u64>,
    #[serde(default)]
    pub duplicate_rsids: Option<u64>,
    #[serde(default)]
    pub per_chromosome_missingness: BTreeMap<String, f64>,
}

impl QcSummary {
    /// Effective sex for rule evaluation: an explicit CLI override wins over
    /// the QC-inferred value.
    pub fn effective_sex(&self, override_sex: Option<Sex>) -> Sex {
        if let Some(sex) = override_sex {
            return sex;
        }
        self.inferred_sex
            .as_deref()
            .map(Sex::parse)
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sex_parse_variants() {
        assert_eq!(Sex::parse("Male"), Sex::Male);
        assert_eq!(Sex::parse("XX"), Sex::Female);
        assert_eq!(Sex::parse("f"), Sex::Female);
        assert_eq!(Sex::parse("ambiguous"), Sex::Unknown);
    }

    #[test]
    fn test_summary_tolerates_missing_fields() {
        let summary: QcSummary = serde_json::from_str("{\"call_rate\": 0.987}").unwrap();
        assert_eq!(summary.call_rate, Some(0.987));
        assert!(summary.total_markers.is_none());
        assert!(summary.per_chromosome_missingness.is_empty());
    }

    #[test]
    fn test_effective_sex_prefers_override() {
        let summary = QcSummary {
            inferred_sex: Some("female".to_string()),
            ..Default::default()
        };
        assert_eq!(summary.effective_sex(None), Sex::Female);
        assert_eq!(summary.effective_sex(Some(Sex::Male)), Sex::Male);
    }
}
