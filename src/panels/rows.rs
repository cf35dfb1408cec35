use crate::input::genotypes::GenotypeStore;
use crate::input::summary::Sex;
use crate::input::verification::VerificationFeed;
use crate::model::resolver::{risk_allele_present, zygosity};
use crate::model::rows::{FunCard, FunCategory, RowStatus, RowType, TraitRow};
use crate::panels::defs::{
    self, ESTROGEN_NOTE_FEMALE, ESTROGEN_NOTE_MALE, ESTROGEN_SENSITIVE_RSIDS, NAT2_MARKERS,
};
use crate::panels::loader::MarkerRecord;

pub const VALUE_NOT_ASSESSED: &str = "Not assessed";
pub const VALUE_NOT_ASSESSED_NON_SNP: &str = "Not assessed (non-SNP call)";
pub const VALUE_RISK_PRESENT: &str = "Risk allele present";
pub const VALUE_NO_FLAGS: &str = "No high-confidence adverse flags";

/// Builds one display row for a catalog marker, applying the state
/// precedence: non-SNP call, then uncalled, then proxy, then the
/// effect-allele rule, then plain genotype observation. First match wins.
pub fn marker_row(
    record: &MarkerRecord,
    store: &GenotypeStore,
    feed: &VerificationFeed,
    sex: Sex,
) -> TraitRow {
    let mut row = TraitRow::child(record.label.clone());
    row.rsid = Some(record.rsid.clone());
    if let Some(meta) = defs::marker_meta(&record.rsid) {
        row.evidence = Some(meta.evidence.to_string());
        row.tags = Some(meta.tags.to_string());
        row.next_test = Some(meta.next_test.to_string());
    } else if !record.evidence_note.is_empty() {
        row.evidence = Some(record.evidence_note.clone());
    }

    let genotype = store.get(&record.rsid);
    if store.non_snp_call(&record.rsid).is_some() {
        row.status = RowStatus::Missing;
        row.value = VALUE_NOT_ASSESSED_NON_SNP.to_string();
        row.sub = "Call is an indel or repeat placeholder, not a two-allele genotype".to_string();
    } else if genotype.is_none() {
        row.status = RowStatus::Missing;
        row.value = VALUE_NOT_ASSESSED.to_string();
        row.sub = "Marker not present in this file build".to_string();
    } else if let Some(target) = defs::proxy_target(&record.rsid) {
        row.status = RowStatus::Proxy;
        row.value = format!("Proxy marker for {target}");
        row.sub = "Imperfect stand-in; confirmatory typing required for clinical use".to_string();
        if let Some(entry) = feed.get(&record.rsid)
            && let Some(note) = entry.proxy_note.as_deref()
        {
            row.detail = Some(note.to_string());
        }
    } else if let Some(allele) = record.effect_allele_char() {
        if risk_allele_present(&record.rsid, genotype, allele, feed) {
            row.status = RowStatus::Risk;
            row.value = VALUE_RISK_PRESENT.to_string();
            row.sub = format!(
                "{} ({})",
                record.effect_trait,
                zygosity(&record.rsid, genotype, allele, feed).label()
            );
        } else {
            row.status = RowStatus::Protective;
            row.value = VALUE_NO_FLAGS.to_string();
            row.sub = record.non_effect_trait.clone();
        }
    } else if let Some(genotype) = genotype {
        row.status = RowStatus::Info;
        row.value = format!("Genotype {genotype}");
        row.sub = record.effect_trait.clone();
    }

    // Per-marker strand caution only; a flagged neighbor never taints this row.
    if let Some(entry) = feed.get(&record.rsid)
        && entry.match_status.needs_strand_caution()
    {
        row.indicator = Some(format!(
            "Strand caution: reported orientation is {} against the reference allele set",
            entry.match_status.name()
        ));
    }

    if ESTROGEN_SENSITIVE_RSIDS.contains(&record.rsid.as_str()) {
        let note = match sex {
            Sex::Female => ESTROGEN_NOTE_FEMALE,
            _ => ESTROGEN_NOTE_MALE,
        };
        row.detail = Some(note.to_string());
    }

    row
}

/// Aggregates a panel's child rows into its summary row. Bucket precedence:
/// any risk child wins, then missing, then proxy, then protective. The detail
/// string lists every contributing rsid per bucket; the missing-marker rollup
/// validator checks against it.
pub fn panel_summary(panel: &str, children: &[TraitRow]) -> TraitRow {
    let mut risk: Vec<&str> = Vec::new();
    let mut missing: Vec<&str> = Vec::new();
    let mut proxy: Vec<&str> = Vec::new();
    for child in children {
        let Some(rsid) = child.rsid.as_deref() else {
            continue;
        };
        match child.status {
            RowStatus::Risk => risk.push(rsid),
            RowStatus::Missing => missing.push(rsid),
            RowStatus::Proxy => proxy.push(rsid),
            _ => {}
        }
    }

    let (status, value) = if !risk.is_empty() {
        (RowStatus::Risk, "Risk alleles present in this panel")
    } else if !missing.is_empty() {
        (RowStatus::Missing, "Panel coverage incomplete")
    } else if !proxy.is_empty() {
        (RowStatus::Proxy, "Proxy markers only")
    } else {
        (RowStatus::Protective, VALUE_NO_FLAGS)
    };

    let mut detail_parts: Vec<String> = Vec::new();
    if !risk.is_empty() {
        detail_parts.push(format!("risk: {}", risk.join(", ")));
    }
    if !missing.is_empty() {
        detail_parts.push(format!("missing: {}", missing.join(", ")));
    }
    if !proxy.is_empty() {
        detail_parts.push(format!("proxy: {}", proxy.join(", ")));
    }

    TraitRow {
        label: panel.to_string(),
        status,
        sub: String::new(),
        value: value.to_string(),
        detail: if detail_parts.is_empty() {
            None
        } else {
            Some(detail_parts.join("; "))
        },
        emoji: "\u{1F4CB}",
        indicator: None,
        evidence: None,
        tags: None,
        next_test: None,
        row_type: RowType::Summary,
        rsid: None,
    }
}

/// NAT2 acetylator status row; stands in for the Detox/Acetylation summary.
/// All three markers must be called before a phenotype is assigned.
pub fn nat2_status_row(store: &GenotypeStore, feed: &VerificationFeed) -> TraitRow {
    let mut row = TraitRow::child("NAT2 Acetylator Status");
    row.row_type = RowType::Summary;
    let missing: Vec<&str> = NAT2_MARKERS
        .iter()
        .filter(|m| !store.contains(m.rsid))
        .map(|m| m.rsid)
        .collect();
    if !missing.is_empty() {
        row.status = RowStatus::Missing;
        row.value = "Acetylator status unknown".to_string();
        row.detail = Some(format!("missing: {}", missing.join(", ")));
        row.sub = "Phenotype requires all three NAT2 markers".to_string();
        return row;
    }
    let slow_count: usize = NAT2_MARKERS
        .iter()
        .map(|m| usize::from(risk_allele_present(m.rsid, store.get(m.rsid), m.allele, feed)))
        .sum();
    let (status, value, sub) = match slow_count {
        0 => (RowStatus::Info, "Likely fast acetylator", "Faster clearance of NAT2 substrates"),
        1 => (RowStatus::Info, "Likely intermediate acetylator", "Intermediate clearance of NAT2 substrates"),
        _ => (
            RowStatus::Caution,
            "Likely slow acetylator",
            "Slower clearance of isoniazid, hydralazine, sulfonamides, and dietary amines",
        ),
    };
    row.status = status;
    row.value = value.to_string();
    row.sub = sub.to_string();
    row
}

fn fun_category(panel: &str) -> FunCategory {
    match panel {
        "Sensory" => FunCategory::Sensory,
        "Fun Traits" => FunCategory::Lifestyle,
        _ => FunCategory::Appearance,
    }
}

/// Builds the fun/appearance cards in the fixed display order (eye color,
/// pigmentation, MC1R, cilantro), remaining markers after in catalog order.
pub fn fun_cards(records: &[&MarkerRecord], store: &GenotypeStore) -> Vec<FunCard> {
    let mut cards: Vec<FunCard> = Vec::new();
    for record in records {
        let value = match store.get(&record.rsid) {
            Some(genotype) => {
                let carries = record
                    .effect_allele_char()
                    .map(|a| crate::model::genotype::has_allele(genotype, a))
                    .unwrap_or(false);
                if carries && !record.effect_trait.is_empty() {
                    record.effect_trait.clone()
                } else if !record.non_effect_trait.is_empty() {
                    record.non_effect_trait.clone()
                } else {
                    format!("Genotype {genotype}")
                }
            }
            None => VALUE_NOT_ASSESSED.to_string(),
        };
        cards.push(FunCard {
            label: record.label.clone(),
            value,
            emoji: "\u{1F3A8}",
            category: fun_category(&record.panel),
            sub: record.notes.clone(),
            rsid: record.rsid.clone(),
        });
    }
    cards.sort_by_key(|card| defs::appearance_rank(&card.rsid));
    cards
}
