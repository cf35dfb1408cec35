use crate::input::genotypes::GenotypeStore;
use crate::input::summary::Sex;
use crate::input::verification::VerificationFeed;
use crate::model::rows::{FunCard, PanelTable, TraitRow};
use crate::panels::defs::{FUNCTIONAL_PANELS, NO_SUMMARY_PANELS};
use crate::panels::loader::Catalog;
use crate::panels::rows::{fun_cards, marker_row, nat2_status_row, panel_summary};

/// Catalog panels rendered as fun cards instead of trait tables.
const FUN_PANELS: [&str; 3] = ["Appearance", "Fun Traits", "Sensory"];

/// Catalog panels rendered as plain genotype context, not interpretation.
const EXPANDED_PREFIX: &str = "Expanded";

/// One row of the expanded-panels context section: genotype shown as-is,
/// with a per-marker strand caution when the feed flags it.
#[derive(Debug, Clone)]
pub struct ExpandedRow {
    pub label: String,
    pub rsid: String,
    pub genotype: String,
    pub caution: Option<String>,
}

#[derive(Debug, Default)]
pub struct RowTables {
    pub wellness: Vec<PanelTable>,
    pub functional: Vec<PanelTable>,
    pub fun: Vec<FunCard>,
    pub expanded: Vec<ExpandedRow>,
}

fn build_table(
    panel: &str,
    catalog: &Catalog,
    store: &GenotypeStore,
    feed: &VerificationFeed,
    sex: Sex,
) -> PanelTable {
    let children: Vec<TraitRow> = catalog
        .panel(panel)
        .into_iter()
        .map(|record| marker_row(record, store, feed, sex))
        .collect();
    let mut rows = Vec::with_capacity(children.len() + 1);
    if NO_SUMMARY_PANELS.contains(&panel) {
        rows.push(nat2_status_row(store, feed));
    } else {
        rows.push(panel_summary(panel, &children));
    }
    rows.extend(children);
    PanelTable {
        panel: panel.to_string(),
        rows,
    }
}

/// Stage 5: renders every catalog panel into its display form. Functional
/// panels keep the fixed display order; wellness panels follow catalog order;
/// fun panels become cards; `Expanded*` panels become genotype context rows.
pub fn run(catalog: &Catalog, store: &GenotypeStore, feed: &VerificationFeed, sex: Sex) -> RowTables {
    let mut tables = RowTables::default();
    let catalog_panels = catalog.panel_names();

    for panel in FUNCTIONAL_PANELS {
        if catalog_panels.contains(&panel) {
            tables
                .functional
                .push(build_table(panel, catalog, store, feed, sex));
        }
    }

    let mut fun_records = Vec::new();
    for panel in &catalog_panels {
        if FUNCTIONAL_PANELS.contains(panel) {
            continue;
        }
        if FUN_PANELS.contains(panel) {
            fun_records.extend(catalog.panel(panel));
            continue;
        }
        if panel.starts_with(EXPANDED_PREFIX) {
            for record in catalog.panel(panel) {
                let genotype = store
                    .get(&record.rsid)
                    .map(str::to_string)
                    .unwrap_or_else(|| crate::panels::rows::VALUE_NOT_ASSESSED.to_string());
                let caution = feed.get(&record.rsid).and_then(|entry| {
                    entry.match_status.needs_strand_caution().then(|| {
                        format!(
                            "Strand caution ({}); displayed alleles may be on the opposite strand",
                            entry.match_status.name()
                        )
                    })
                });
                tables.expanded.push(ExpandedRow {
                    label: record.label.clone(),
                    rsid: record.rsid.clone(),
                    genotype,
                    caution,
                });
            }
            continue;
        }
        tables
            .wellness
            .push(build_table(panel, catalog, store, feed, sex));
    }

    tables.fun = fun_cards(&fun_records, store);
    tables
}
