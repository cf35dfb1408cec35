pub mod artifacts;
pub mod genotypes;
pub mod summary;
pub mod verification;

use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{info, warn};

use crate::input::artifacts::{ApoeMap, PanelPayload, ResearchFinding, TrialsByFinding};
use crate::input::summary::QcSummary;
use crate::input::verification::{VerificationEntry, VerificationFeed};

#[derive(Debug, Error)]
pub enum InputError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to read reference catalog {path}: {source}")]
    Catalog {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

/// Panel-query artifacts in genotype merge order. Later files win on
/// duplicate rsids.
const PANEL_ARTIFACTS: [&str; 4] = [
    "core_traits.json",
    "healthy_aging.json",
    "hidden_risks.json",
    "expanded_panels.json",
];

/// Everything one report run reads, loaded up front. Every artifact is
/// optional at the filesystem level: a missing or unparseable file degrades
/// to its empty default with a warning, per the graceful-missing policy.
#[derive(Debug, Default)]
pub struct RunInputs {
    /// Panel-query payloads in merge order; stage 2 folds them into the
    /// genotype store.
    pub panel_payloads: Vec<PanelPayload>,
    pub verification: VerificationFeed,
    pub summary: QcSummary,
    pub trials: TrialsByFinding,
    pub research: Vec<ResearchFinding>,
    pub apoe_map: ApoeMap,
}

impl RunInputs {
    pub fn load(run_dir: &Path, data_dir: &Path) -> RunInputs {
        let panel_payloads: Vec<PanelPayload> = PANEL_ARTIFACTS
            .iter()
            .map(|artifact| load_json_or_default(&run_dir.join(artifact)))
            .collect();

        let entries: Vec<VerificationEntry> =
            load_json_or_default(&run_dir.join("variant_verification.json"));
        let verification = VerificationFeed::from_entries(entries);
        info!(entries = verification.len(), "loaded verification feed");

        RunInputs {
            panel_payloads,
            verification,
            summary: load_json_or_default(&run_dir.join("summary.json")),
            trials: load_json_or_default(&run_dir.join("trials_by_finding.json")),
            research: load_json_or_default(&run_dir.join("research_findings.json")),
            apoe_map: load_json_or_default(&data_dir.join("clinical_interpretations.json")),
        }
    }
}

/// Strict JSON read, used where the caller decides how to degrade.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, InputError> {
    let raw = std::fs::read_to_string(path).map_err(|source| InputError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|source| InputError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Graceful read: missing or malformed artifacts become their empty default.
/// The run proceeds; the gap shows up in coverage notes rather than as an
/// abort.
pub fn load_json_or_default<T: DeserializeOwned + Default>(path: &Path) -> T {
    match read_json(path) {
        Ok(value) => value,
        Err(err) => {
            warn!(path = %path.display(), error = %err, "artifact unavailable, using empty default");
            T::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;

    #[test]
    fn test_missing_artifact_degrades_to_default() {
        let dir = tempfile::tempdir().unwrap();
        let payload: PanelPayload = load_json_or_default(&dir.path().join("absent.json"));
        assert!(payload.genotypes.is_empty());
    }

    #[test]
    fn test_malformed_artifact_degrades_to_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(b"{not json").unwrap();
        let payload: PanelPayload = load_json_or_default(&path);
        assert!(payload.genotypes.is_empty());
    }

    #[test]
    fn test_run_inputs_keeps_payloads_in_merge_order() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("core_traits.json"),
            r#"{"genotypes": {"rs1": "AA", "rs2": "CC"}}"#,
        )
        .unwrap();
        std::fs::write(
            dir.path().join("expanded_panels.json"),
            r#"{"genotypes": {"rs1": "AG"}}"#,
        )
        .unwrap();
        let inputs = RunInputs::load(dir.path(), dir.path());
        assert_eq!(inputs.panel_payloads.len(), 4);
        // core_traits first, expanded_panels last.
        assert!(inputs.panel_payloads[0].genotypes.contains_key("rs2"));
        assert!(inputs.panel_payloads[3].genotypes.contains_key("rs1"));
    }
}
