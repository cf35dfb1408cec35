use tracing::{info, warn};

use crate::input::RunInputs;
use crate::input::genotypes::GenotypeStore;
use crate::input::summary::Sex;
use crate::panels::defs::{APOE_RS429358, APOE_RS7412};

/// APOE haplotype assignment from the rs429358/rs7412 pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApoeCall {
    /// Combined-genotype key used for the map lookup ("CT|CC").
    pub genotype_key: String,
    pub label: String,
}

impl ApoeCall {
    pub fn carries_e4(&self) -> bool {
        self.label.to_lowercase().contains("e4")
    }
}

#[derive(Debug)]
pub struct MergeOutput {
    pub genotypes: GenotypeStore,
    pub sex: Sex,
    pub apoe: Option<ApoeCall>,
}

/// Stage 2: fold the panel payloads into one genotype store (last writer
/// wins), settle effective sex, and look up the APOE haplotype.
pub fn run(inputs: &RunInputs, sex_override: Option<Sex>) -> MergeOutput {
    let mut genotypes = GenotypeStore::default();
    for payload in &inputs.panel_payloads {
        genotypes.merge(&payload.genotypes, &payload.non_snp_genotypes);
    }
    if genotypes.is_empty() {
        warn!("genotype store is empty; the report will carry no findings");
    } else {
        info!(markers = genotypes.len(), "merged genotype store");
    }

    let sex = inputs.summary.effective_sex(sex_override);

    let apoe = match (genotypes.get(APOE_RS429358), genotypes.get(APOE_RS7412)) {
        (Some(g1), Some(g2)) => {
            let key = format!("{g1}|{g2}");
            inputs.apoe_map.get(&key).map(|label| ApoeCall {
                genotype_key: key,
                label: label.clone(),
            })
        }
        _ => None,
    };

    MergeOutput { genotypes, sex, apoe }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::artifacts::PanelPayload;
    use std::collections::BTreeMap;

    fn payload(pairs: &[(&str, &str)]) -> PanelPayload {
        PanelPayload {
            genotypes: pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            non_snp_genotypes: BTreeMap::new(),
        }
    }

    #[test]
    fn test_merge_order_last_writer_wins() {
        let inputs = RunInputs {
            panel_payloads: vec![payload(&[("rs1", "AA")]), payload(&[("rs1", "AG")])],
            ..Default::default()
        };
        let out = run(&inputs, None);
        assert_eq!(out.genotypes.get("rs1"), Some("AG"));
    }

    #[test]
    fn test_apoe_lookup() {
        let mut inputs = RunInputs {
            panel_payloads: vec![payload(&[("rs429358", "CT"), ("rs7412", "CC")])],
            ..Default::default()
        };
        inputs
            .apoe_map
            .insert("CT|CC".to_string(), "APOE e3/e4".to_string());
        let out = run(&inputs, None);
        let apoe = out.apoe.unwrap();
        assert_eq!(apoe.label, "APOE e3/e4");
        assert!(apoe.carries_e4());
    }

    #[test]
    fn test_apoe_absent_when_pair_incomplete() {
        let inputs = RunInputs {
            panel_payloads: vec![payload(&[("rs429358", "CT")])],
            ..Default::default()
        };
        assert!(run(&inputs, None).apoe.is_none());
    }

    #[test]
    fn test_sex_override_wins() {
        let mut inputs = RunInputs::default();
        inputs.summary.inferred_sex = Some("male".to_string());
        let out = run(&inputs, Some(Sex::Female));
        assert_eq!(out.sex, Sex::Female);
    }
}
