use tracing::warn;

use crate::input::genotypes::GenotypeStore;
use crate::input::verification::VerificationFeed;
use crate::model::cards::{Category, RiskCard, sort_cards};
use crate::model::resolver::risk_allele_count;
use crate::panels::defs::{
    CYP3A5_MARKER, DPYD_MARKERS, HLA_B5701_MARKER, RuleMarker, SLCO1B1_MARKER, TPMT_NUDT15_MARKERS,
    Tier, UGT1A1_28_MARKER,
};

struct EscalationRule {
    /// Must equal the primary builder's label; the pass is keyed on it.
    label: &'static str,
    markers: &'static [RuleMarker],
    tier: Tier,
    description: &'static str,
    action: &'static str,
}

/// High-evidence pharmacogenomic findings that must never be dropped, even if
/// the primary rule set drifts. Wording is deliberately independent of the
/// primary builder's.
const ESCALATION_RULES: [EscalationRule; 6] = [
    EscalationRule {
        label: "Fluoropyrimidine Toxicity (DPYD)",
        markers: &DPYD_MARKERS,
        tier: Tier::FixedHigh,
        description: "Safety re-check: a DPYD reduced-function allele is present in this sample. Standard-dose 5-FU or capecitabine may cause severe toxicity.",
        action: "Do not start fluoropyrimidine chemotherapy without DPYD-informed dosing review.",
    },
    EscalationRule {
        label: "Statin Myopathy Risk (SLCO1B1)",
        markers: &[SLCO1B1_MARKER],
        tier: Tier::Tiered,
        description: "Safety re-check: the SLCO1B1 c.521T>C allele is present; simvastatin myopathy risk applies.",
        action: "Raise SLCO1B1 status before any simvastatin prescription.",
    },
    EscalationRule {
        label: "Tacrolimus Metabolism (CYP3A5)",
        markers: &[CYP3A5_MARKER],
        tier: Tier::FixedMed,
        description: "Safety re-check: a CYP3A5 expresser allele is present; standard tacrolimus starting doses tend to undershoot target levels.",
        action: "Raise CYP3A5 expresser status if transplant immunosuppression is ever planned.",
    },
    EscalationRule {
        label: "Irinotecan/Atazanavir Sensitivity (UGT1A1*28)",
        markers: &[UGT1A1_28_MARKER],
        tier: Tier::Tiered,
        description: "Safety re-check: the UGT1A1*28 tag allele is present; reduced glucuronidation applies to irinotecan and atazanavir.",
        action: "Raise UGT1A1 status before irinotecan or atazanavir therapy.",
    },
    EscalationRule {
        label: "Thiopurine Sensitivity (TPMT/NUDT15)",
        markers: &TPMT_NUDT15_MARKERS,
        tier: Tier::Tiered,
        description: "Safety re-check: a TPMT or NUDT15 reduced-function allele is present; standard thiopurine doses risk myelosuppression.",
        action: "Raise thiopurine genotype status before azathioprine or 6-mercaptopurine therapy.",
    },
    EscalationRule {
        label: "Abacavir Hypersensitivity (HLA-B*57:01)",
        markers: &[HLA_B5701_MARKER],
        tier: Tier::FixedHigh,
        description: "Safety re-check: the HCP5 proxy for HLA-B*57:01 is present; abacavir hypersensitivity risk applies pending confirmatory typing.",
        action: "Confirmatory HLA-B*57:01 typing is mandatory before abacavir.",
    },
];

/// Stage 4: defense-in-depth re-scan. Appends a card for any high-evidence
/// rule with risk-allele presence whose label the primary pass missed, then
/// re-sorts. Label-keyed, so running it twice adds nothing.
pub fn escalate(
    mut cards: Vec<RiskCard>,
    store: &GenotypeStore,
    feed: &VerificationFeed,
) -> Vec<RiskCard> {
    for rule in &ESCALATION_RULES {
        if cards.iter().any(|c| c.label == rule.label) {
            continue;
        }
        let aggregate: usize = rule
            .markers
            .iter()
            .map(|m| risk_allele_count(m.rsid, store.get(m.rsid), m.allele, feed))
            .sum();
        let Some(level) = rule.tier.level(aggregate) else {
            continue;
        };
        warn!(label = rule.label, "escalation pass injected a card the primary builder missed");
        cards.push(RiskCard {
            label: rule.label.to_string(),
            level,
            description: rule.description.to_string(),
            action: rule.action.to_string(),
            evidence: "CPIC level A".to_string(),
            category: Category::Clinical,
        });
    }
    sort_cards(&mut cards);
    cards
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::summary::Sex;
    use crate::model::cards::RiskLevel;
    use crate::pipeline::stage3_cards::build_risk_cards;
    use std::collections::BTreeMap;

    fn store_with(pairs: &[(&str, &str)]) -> GenotypeStore {
        let mut store = GenotypeStore::default();
        let map: BTreeMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        store.merge(&map, &BTreeMap::new());
        store
    }

    #[test]
    fn test_injects_when_primary_pass_empty() {
        let store = store_with(&[("rs4149056", "CT")]);
        let feed = VerificationFeed::default();
        let cards = escalate(Vec::new(), &store, &feed);
        assert_eq!(cards.len(), 1);
        assert!(cards[0].label.contains("SLCO1B1"));
        assert_eq!(cards[0].level, RiskLevel::Med);
        assert!(cards[0].description.contains("Safety re-check"));
    }

    #[test]
    fn test_no_duplicate_when_primary_found_it() {
        let store = store_with(&[("rs4149056", "CT")]);
        let feed = VerificationFeed::default();
        let primary = build_risk_cards(&store, &feed, Sex::Unknown, None);
        let before = primary.len();
        let after = escalate(primary, &store, &feed);
        assert_eq!(after.len(), before);
    }

    #[test]
    fn test_idempotent() {
        let store = store_with(&[("rs3918290", "AG"), ("rs2395029", "GT")]);
        let feed = VerificationFeed::default();
        let once = escalate(Vec::new(), &store, &feed);
        let twice = escalate(once.clone(), &store, &feed);
        assert_eq!(once.len(), twice.len());
        let labels: Vec<&String> = twice.iter().map(|c| &c.label).collect();
        let mut deduped = labels.clone();
        deduped.dedup();
        assert_eq!(labels, deduped);
    }

    #[test]
    fn test_no_injection_without_risk_alleles() {
        let store = store_with(&[("rs4149056", "TT")]); // reference genotype
        let feed = VerificationFeed::default();
        assert!(escalate(Vec::new(), &store, &feed).is_empty());
    }

    #[test]
    fn test_output_stays_sorted() {
        let store = store_with(&[("rs3918290", "AG"), ("rs776746", "AG")]);
        let feed = VerificationFeed::default();
        let cards = escalate(Vec::new(), &store, &feed);
        let ranks: Vec<u8> = cards.iter().map(|c| c.level.rank()).collect();
        let mut sorted = ranks.clone();
        sorted.sort_unstable();
        assert_eq!(ranks, sorted);
    }
}
