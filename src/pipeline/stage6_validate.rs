use thiserror::Error;

use crate::input::genotypes::GenotypeStore;
use crate::model::cards::RiskCard;
use crate::model::rows::{PanelTable, RowType, TraitRow};
use crate::panels::defs::SICKLE_RSID;

/// Structural self-contradictions in assembled report data. Always fatal:
/// better no report than an internally inconsistent one. Offender identity
/// is carried as fields so tests and callers can assert on it.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error(
        "panel '{panel}' summary claims no risk but child '{label}' ({rsid}) is flagged '{value}'"
    )]
    SummaryChildConflict {
        panel: String,
        rsid: String,
        label: String,
        value: String,
    },
    #[error("card '{label}' mentions warfarin but its text lacks '{missing_piece}'")]
    WarfarinDisclaimer {
        label: String,
        missing_piece: &'static str,
    },
    #[error("panel '{panel}' child {rsid} is not assessed but absent from the summary detail")]
    MissingMarkerRollup { panel: String, rsid: String },
    #[error("card '{label}' mentions an HbS/HbC phenotype but rs334 was never called")]
    SickleGuardrail { label: String },
}

/// Phrases in a summary value that assert an all-clear panel.
const NO_RISK_PHRASES: [&str; 2] = ["no risk", "no high-confidence adverse flags"];

/// Child value fragments that contradict an all-clear summary.
const FLAGGED_VALUE_FRAGMENTS: [&str; 3] = ["risk allele present", "not assessed", "incomplete"];

/// Markers exempt from the summary/child and rollup checks: proxy assays
/// whose rows intentionally stay inconclusive.
const ALLOWED_RSIDS: [&str; 2] = ["rs2395029", "rs9263726"];

/// Panels whose lead row is a phenotype call rather than an aggregation, so
/// the rollup check does not apply.
const ROLLUP_EXEMPT_PANELS: [&str; 1] = ["Detox/Acetylation"];

fn summary_row(table: &PanelTable) -> Option<&TraitRow> {
    table.rows.iter().find(|r| r.row_type == RowType::Summary)
}

fn check_summary_child(table: &PanelTable) -> Result<(), ValidationError> {
    let Some(summary) = summary_row(table) else {
        return Ok(());
    };
    let value = summary.value.to_lowercase();
    if !NO_RISK_PHRASES.iter().any(|p| value.contains(p)) {
        return Ok(());
    }
    for child in table.rows.iter().filter(|r| r.row_type == RowType::Child) {
        let rsid = child.rsid.as_deref().unwrap_or("");
        if ALLOWED_RSIDS.contains(&rsid) {
            continue;
        }
        let child_value = child.value.to_lowercase();
        let flagged = child.status.is_flagged()
            || FLAGGED_VALUE_FRAGMENTS.iter().any(|f| child_value.contains(f));
        if flagged {
            return Err(ValidationError::SummaryChildConflict {
                panel: table.panel.clone(),
                rsid: rsid.to_string(),
                label: child.label.clone(),
                value: child.value.clone(),
            });
        }
    }
    Ok(())
}

fn check_warfarin_disclaimers(cards: &[RiskCard]) -> Result<(), ValidationError> {
    for card in cards {
        let text = card.combined_text();
        if !text.contains("warfarin") {
            continue;
        }
        let missing_piece = if !text.contains("warfarin panel status:") {
            Some("warfarin panel status:")
        } else if !text.contains("vkorc1") {
            Some("vkorc1")
        } else if !text.contains("present") && !text.contains("missing") {
            Some("present/missing")
        } else {
            None
        };
        if let Some(missing_piece) = missing_piece {
            return Err(ValidationError::WarfarinDisclaimer {
                label: card.label.clone(),
                missing_piece,
            });
        }
    }
    Ok(())
}

fn check_missing_rollup(table: &PanelTable) -> Result<(), ValidationError> {
    if ROLLUP_EXEMPT_PANELS.contains(&table.panel.as_str()) {
        return Ok(());
    }
    let Some(summary) = summary_row(table) else {
        return Ok(());
    };
    let detail = summary.detail.as_deref().unwrap_or("");
    for child in table.rows.iter().filter(|r| r.row_type == RowType::Child) {
        if !child.value.to_lowercase().contains("not assessed") {
            continue;
        }
        let Some(rsid) = child.rsid.as_deref() else {
            continue;
        };
        if ALLOWED_RSIDS.contains(&rsid) {
            continue;
        }
        if !detail.contains(rsid) {
            return Err(ValidationError::MissingMarkerRollup {
                panel: table.panel.clone(),
                rsid: rsid.to_string(),
            });
        }
    }
    Ok(())
}

fn check_sickle_guardrail(
    cards: &[RiskCard],
    store: &GenotypeStore,
) -> Result<(), ValidationError> {
    if store.contains(SICKLE_RSID) {
        return Ok(());
    }
    const PHENOTYPES: [&str; 3] = ["hbs", "hbc", "sickle"];
    for card in cards {
        let text = card.combined_text();
        if PHENOTYPES.iter().any(|p| text.contains(p)) {
            return Err(ValidationError::SickleGuardrail {
                label: card.label.clone(),
            });
        }
    }
    Ok(())
}

/// Stage 6: all four invariant checks, run before any output file is opened.
pub fn validate<'a>(
    cards: &[RiskCard],
    tables: impl IntoIterator<Item = &'a PanelTable>,
    store: &GenotypeStore,
) -> Result<(), ValidationError> {
    check_warfarin_disclaimers(cards)?;
    check_sickle_guardrail(cards, store)?;
    for table in tables {
        check_summary_child(table)?;
        check_missing_rollup(table)?;
    }
    Ok(())
}
