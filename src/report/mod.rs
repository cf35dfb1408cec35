pub mod html;
pub mod markdown;

use crate::input::artifacts::{ResearchFinding, TrialsByFinding};
use crate::input::summary::{QcSummary, Sex};
use crate::model::cards::{Category, RiskCard, RiskLevel};
use crate::panels::coverage::CoverageNotes;
use crate::panels::defs::PROXY_MARKERS;
use crate::pipeline::stage2_merge::ApoeCall;
use crate::pipeline::stage5_rows::RowTables;

/// Everything the renderers need, assembled once after validation-relevant
/// stages and shared by both output formats.
#[derive(Debug)]
pub struct ReportData {
    pub base_name: String,
    /// Report date line, e.g. "2026-08-29".
    pub generated_on: String,
    pub summary: QcSummary,
    pub sex: Sex,
    pub apoe: Option<ApoeCall>,
    pub cards: Vec<RiskCard>,
    pub tables: RowTables,
    pub coverage: CoverageNotes,
    /// (rsid, assayed?) pairs for the proxy-marker screening section.
    pub proxy_screen: Vec<ProxyScreenRow>,
    pub reverse_complement_rsids: Vec<String>,
    pub verification_tally: Vec<(&'static str, usize)>,
    pub strand_flip_details: Vec<String>,
    pub trials: TrialsByFinding,
    pub research: Vec<ResearchFinding>,
    pub include_trials: bool,
    pub qc_appendix: bool,
}

#[derive(Debug, Clone)]
pub struct ProxyScreenRow {
    pub rsid: &'static str,
    pub target: &'static str,
    pub called: bool,
}

impl ReportData {
    pub fn clinical_cards(&self) -> impl Iterator<Item = &RiskCard> {
        self.cards.iter().filter(|c| c.category == Category::Clinical)
    }

    pub fn association_cards(&self) -> impl Iterator<Item = &RiskCard> {
        self.cards
            .iter()
            .filter(|c| c.category == Category::Association)
    }

    pub fn high_cards(&self) -> impl Iterator<Item = &RiskCard> {
        self.cards.iter().filter(|c| c.level == RiskLevel::High)
    }

    /// Monogenic screening findings for the hidden-risk section.
    pub fn hidden_risk_cards(&self) -> impl Iterator<Item = &RiskCard> {
        self.cards.iter().filter(|c| c.evidence.contains("ACMG"))
    }

    pub fn has_clinical_cards(&self) -> bool {
        self.clinical_cards().next().is_some()
    }
}

pub fn proxy_screen(store: &crate::input::genotypes::GenotypeStore) -> Vec<ProxyScreenRow> {
    PROXY_MARKERS
        .iter()
        .map(|p| ProxyScreenRow {
            rsid: p.rsid,
            target: p.target,
            called: store.contains(p.rsid),
        })
        .collect()
}

/// Fixed limitations wording shared by both renderers.
pub const DISCLAIMER: &str = "This report is generated from consumer genotyping array data and is \
not a clinical diagnostic. Array calls carry a small per-marker error rate, proxy markers are \
imperfect stand-ins for the variants they tag, and absence of a finding is not evidence of absence. \
Confirm any actionable result with a clinical-grade assay before medical decisions.";

pub const HLA_B27_STRAND_NOTE: &str = "The HLA-B*27 proxy (rs4349859) is reported on the opposite \
strand by some array builds; its displayed alleles should not be interpreted without the strand \
verification feed.";
