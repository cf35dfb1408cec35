use std::collections::BTreeMap;

use serde::Deserialize;

/// One panel-query output file (core_traits.json and friends). Each carries a
/// genotype map and the non-SNP placeholder calls that could not be reduced
/// to a two-allele genotype.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PanelPayload {
    #[serde(default)]
    pub genotypes: BTreeMap<String, String>,
    #[serde(default)]
    pub non_snp_genotypes: BTreeMap<String, String>,
}

/// clinical_interpretations.json: a flat map from combined-genotype key
/// ("<rs429358 genotype>|<rs7412 genotype>") to a haplotype label.
pub type ApoeMap = BTreeMap<String, String>;

/// One registry trial attached to a finding label.
#[derive(Debug, Clone, Deserialize)]
pub struct TrialEntry {
    pub nct_id: String,
    pub title: String,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

/// trials_by_finding.json: finding label -> trials, assembled by the external
/// registry-search collaborator.
pub type TrialsByFinding = BTreeMap<String, Vec<TrialEntry>>;

/// One literature annotation from research_findings.json.
#[derive(Debug, Clone, Deserialize)]
pub struct ResearchFinding {
    pub rsid: String,
    pub title: String,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_panel_payload_defaults_when_keys_absent() {
        let payload: PanelPayload = serde_json::from_str("{}").unwrap();
        assert!(payload.genotypes.is_empty());
        assert!(payload.non_snp_genotypes.is_empty());
    }

    #[test]
    fn test_panel_payload_parses_both_maps() {
        let payload: PanelPayload = serde_json::from_str(
            r#"{"genotypes": {"rs1": "AG"}, "non_snp_genotypes": {"rs2": "I/D"}}"#,
        )
        .unwrap();
        assert_eq!(payload.genotypes.get("rs1").map(String::as_str), Some("AG"));
        assert_eq!(
            payload.non_snp_genotypes.get("rs2").map(String::as_str),
            Some("I/D")
        );
    }

    #[test]
    fn test_trial_entry_optional_fields() {
        let trial: TrialEntry =
            serde_json::from_str(r#"{"nct_id": "NCT01234567", "title": "Dose study"}"#).unwrap();
        assert_eq!(trial.nct_id, "NCT01234567");
        assert!(trial.status.is_none());
    }
}
