use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::info;

use crate::input::genotypes::GenotypeStore;
use crate::pipeline::stage6_validate::{ValidationError, validate};
use crate::report::{ReportData, html, markdown};

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("report data failed validation: {0}")]
    Validation(#[from] ValidationError),
    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

fn write(path: &Path, contents: &str) -> Result<(), ReportError> {
    std::fs::write(path, contents).map_err(|source| ReportError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Stage 7: validate, then render and write both documents. Validation runs
/// before the output directory is touched, so a failing run leaves no
/// partial report behind.
pub fn run(
    data: &ReportData,
    store: &GenotypeStore,
    out_dir: &Path,
) -> Result<(PathBuf, PathBuf), ReportError> {
    let all_tables = data.tables.wellness.iter().chain(&data.tables.functional);
    validate(&data.cards, all_tables, store)?;

    std::fs::create_dir_all(out_dir).map_err(|source| ReportError::Io {
        path: out_dir.to_path_buf(),
        source,
    })?;

    let html_path = out_dir.join(format!("{}_Report.html", data.base_name));
    let md_path = out_dir.join(format!("{}_Report.md", data.base_name));
    write(&html_path, &html::render(data))?;
    write(&md_path, &markdown::render(data))?;
    info!(html = %html_path.display(), markdown = %md_path.display(), "report written");
    Ok((html_path, md_path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::summary::{QcSummary, Sex};
    use crate::model::cards::{Category, RiskCard, RiskLevel};
    use crate::panels::coverage::CoverageNotes;
    use crate::pipeline::stage5_rows::RowTables;

    fn empty_data() -> ReportData {
        ReportData {
            base_name: "sample".to_string(),
            generated_on: "2026-08-29".to_string(),
            summary: QcSummary::default(),
            sex: Sex::Unknown,
            apoe: None,
            cards: Vec::new(),
            tables: RowTables::default(),
            coverage: CoverageNotes::default(),
            proxy_screen: Vec::new(),
            reverse_complement_rsids: Vec::new(),
            verification_tally: Vec::new(),
            strand_flip_details: Vec::new(),
            trials: Default::default(),
            research: Vec::new(),
            include_trials: false,
            qc_appendix: false,
        }
    }

    #[test]
    fn test_writes_both_documents() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("reports");
        let (html, md) = run(&empty_data(), &GenotypeStore::default(), &out).unwrap();
        assert!(html.exists());
        assert!(md.exists());
        assert!(std::fs::read_to_string(&html).unwrap().contains("<html"));
        assert!(std::fs::read_to_string(&md).unwrap().contains("# Genotype Report"));
    }

    #[test]
    fn test_validation_failure_leaves_output_untouched() {
        let mut data = empty_data();
        // A sickle-phenotype card with rs334 never called trips the guardrail.
        data.cards.push(RiskCard {
            label: "Sickle Cell (HbS)".to_string(),
            level: RiskLevel::High,
            description: "HbS detected".to_string(),
            action: "confirm".to_string(),
            evidence: "ACMG-reportable".to_string(),
            category: Category::Clinical,
        });
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("reports");
        let err = run(&data, &GenotypeStore::default(), &out).unwrap_err();
        assert!(matches!(err, ReportError::Validation(_)));
        assert!(!out.exists());
    }
}
