use std::path::Path;

use serde::Deserialize;
use tracing::{info, warn};

use crate::input::InputError;

/// One reference-catalog row. A marker may appear under several panels; each
/// membership is its own record.
#[derive(Debug, Clone, Deserialize)]
pub struct MarkerRecord {
    pub rsid: String,
    pub label: String,
    pub panel: String,
    #[serde(default)]
    pub effect_allele: String,
    #[serde(default)]
    pub effect_trait: String,
    #[serde(default)]
    pub non_effect_trait: String,
    #[serde(default)]
    pub evidence_note: String,
    #[serde(default)]
    pub notes: String,
}

impl MarkerRecord {
    /// Single-character effect allele, when the catalog declares one.
    pub fn effect_allele_char(&self) -> Option<char> {
        let trimmed = self.effect_allele.trim().to_ascii_uppercase();
        let mut chars = trimmed.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) if crate::model::genotype::is_valid_allele(c) => Some(c),
            _ => None,
        }
    }
}

/// The reference catalog, loaded once per run and read-only thereafter.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    records: Vec<MarkerRecord>,
}

impl Catalog {
    pub fn from_records(records: Vec<MarkerRecord>) -> Catalog {
        Catalog { records }
    }

    /// Reads `snp_reference.csv`. A missing catalog degrades to empty (the
    /// report then carries no wellness tables); a present-but-corrupt row is
    /// a hard error since it means the data package itself is broken.
    pub fn load(path: &Path) -> Result<Catalog, InputError> {
        if !path.exists() {
            warn!(path = %path.display(), "reference catalog missing, panels will be empty");
            return Ok(Catalog::default());
        }
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_path(path)
            .map_err(|source| InputError::Catalog {
                path: path.to_path_buf(),
                source,
            })?;
        let mut records = Vec::new();
        for row in reader.deserialize() {
            let record: MarkerRecord = row.map_err(|source| InputError::Catalog {
                path: path.to_path_buf(),
                source,
            })?;
            records.push(record);
        }
        info!(records = records.len(), "loaded reference catalog");
        Ok(Catalog { records })
    }

    pub fn panel(&self, panel: &str) -> Vec<&MarkerRecord> {
        self.records.iter().filter(|r| r.panel == panel).collect()
    }

    /// Panel names in first-appearance order.
    pub fn panel_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for record in &self.records {
            if !names.contains(&record.panel.as_str()) {
                names.push(&record.panel);
            }
        }
        names
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
rsid,label,panel,effect_allele,effect_trait,non_effect_trait,evidence_note,notes
rs1801133,MTHFR C677T,Methylation,A,reduced enzyme activity,typical activity,strong,
rs1801133,MTHFR C677T,Wellness,A,reduced enzyme activity,typical activity,strong,
rs4680,COMT V158M,Hormone,A,slower dopamine clearance,faster clearance,strong,
";

    fn sample_catalog() -> Catalog {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("snp_reference.csv");
        std::fs::write(&path, SAMPLE).unwrap();
        Catalog::load(&path).unwrap()
    }

    #[test]
    fn test_load_and_panel_lookup() {
        let catalog = sample_catalog();
        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog.panel("Methylation").len(), 1);
        assert_eq!(catalog.panel_names(), vec!["Methylation", "Wellness", "Hormone"]);
    }

    #[test]
    fn test_marker_appears_in_multiple_panels() {
        let catalog = sample_catalog();
        let hits: Vec<_> = catalog
            .panel("Wellness")
            .into_iter()
            .filter(|r| r.rsid == "rs1801133")
            .collect();
        assert_eq!(hits.len(), 1);
    }

    #[test]
    fn test_missing_catalog_is_empty_not_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let catalog = Catalog::load(&dir.path().join("absent.csv")).unwrap();
        assert!(catalog.is_empty());
    }

    #[test]
    fn test_effect_allele_char() {
        let catalog = sample_catalog();
        let record = catalog.panel("Hormone")[0];
        assert_eq!(record.effect_allele_char(), Some('A'));
    }
}
