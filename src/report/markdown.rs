use crate::model::rows::{RowType, TraitRow};
use crate::report::{DISCLAIMER, HLA_B27_STRAND_NOTE, ReportData};

fn push_line(out: &mut String, line: &str) {
    out.push_str(line);
    out.push('\n');
}

fn push_card(out: &mut String, card: &crate::model::cards::RiskCard) {
    push_line(
        out,
        &format!("### {} `[{}]`", card.label, card.level.name()),
    );
    push_line(out, "");
    push_line(out, &card.description);
    push_line(out, "");
    push_line(out, &format!("*Action:* {}", card.action));
    push_line(out, &format!("*Evidence:* {}", card.evidence));
    push_line(out, "");
}

fn push_row(out: &mut String, row: &TraitRow) {
    let prefix = match row.row_type {
        RowType::Summary => "**",
        RowType::Child => "",
    };
    let rsid = row
        .rsid
        .as_deref()
        .map(|r| format!(" ({r})"))
        .unwrap_or_default();
    let mut notes = row.sub.clone();
    if let Some(indicator) = &row.indicator {
        notes.push_str(&format!(" ({indicator})"));
    }
    push_line(
        out,
        &format!(
            "| {prefix}{}{prefix}{rsid} | {} | {} | {notes} |",
            row.label,
            row.status.name(),
            row.value
        ),
    );
    if let Some(detail) = &row.detail {
        push_line(out, &format!("| | | _{detail}_ | |"));
    }
}

fn push_table(out: &mut String, table: &crate::model::rows::PanelTable) {
    push_line(out, &format!("### {}", table.panel));
    push_line(out, "");
    push_line(out, "| Marker | Status | Result | Notes |");
    push_line(out, "| --- | --- | --- | --- |");
    for row in &table.rows {
        push_row(out, row);
    }
    push_line(out, "");
}

pub fn render(data: &ReportData) -> String {
    let mut out = String::new();
    push_line(&mut out, &format!("# Genotype Report — {}", data.base_name));
    push_line(&mut out, "");
    push_line(&mut out, &format!("Generated {}", data.generated_on));
    push_line(&mut out, "");

    push_line(&mut out, "## QC Summary");
    push_line(&mut out, "");
    let s = &data.summary;
    if let Some(total) = s.total_markers {
        push_line(&mut out, &format!("- Total markers: {total}"));
    }
    if let Some(rate) = s.call_rate {
        push_line(&mut out, &format!("- Call rate: {:.2}%", rate * 100.0));
    }
    if let Some(het) = s.heterozygosity_rate {
        push_line(&mut out, &format!("- Heterozygosity rate: {het:.3}"));
    }
    push_line(&mut out, &format!("- Sex (effective): {}", data.sex.name()));
    if let Some(build) = &s.detected_build {
        push_line(&mut out, &format!("- Genome build: {build}"));
    }
    if let Some(ambiguous) = s.ambiguous_count {
        push_line(&mut out, &format!("- Ambiguous-strand markers: {ambiguous}"));
    }
    if let Some(dupes) = s.duplicate_rsids {
        push_line(&mut out, &format!("- Duplicate rsids: {dupes}"));
    }
    if !s.per_chromosome_missingness.is_empty() {
        let worst = s
            .per_chromosome_missingness
            .iter()
            .max_by(|a, b| a.1.total_cmp(b.1));
        if let Some((chrom, rate)) = worst {
            push_line(
                &mut out,
                &format!("- Highest per-chromosome missingness: {chrom} ({:.2}%)", rate * 100.0),
            );
        }
    }
    push_line(
        &mut out,
        "- Demographics notice: effect sizes and allele frequencies derive mostly from European-ancestry cohorts; transferability varies.",
    );
    push_line(&mut out, "");

    push_line(&mut out, "## Actionable Clinical & Pharmacogenomics");
    push_line(&mut out, "");
    let mut any = false;
    for card in data.clinical_cards() {
        push_card(&mut out, card);
        any = true;
    }
    if !any {
        push_line(&mut out, "No actionable clinical findings in this sample.");
        push_line(&mut out, "");
    }

    push_line(&mut out, "## High-Priority Findings");
    push_line(&mut out, "");
    let mut any = false;
    for card in data.high_cards() {
        push_line(&mut out, &format!("- **{}** — {}", card.label, card.description));
        any = true;
    }
    if !any {
        push_line(&mut out, "None.");
    }
    push_line(&mut out, "");

    push_line(&mut out, "## Lifestyle & Association Findings");
    push_line(&mut out, "");
    let mut any = false;
    for card in data.association_cards() {
        push_card(&mut out, card);
        any = true;
    }
    if !any {
        push_line(&mut out, "No association-grade findings to report.");
        push_line(&mut out, "");
    }

    push_line(&mut out, "## Hidden-Risk Screening");
    push_line(&mut out, "");
    let mut any = false;
    for card in data.hidden_risk_cards() {
        push_line(&mut out, &format!("- **{}** ({})", card.label, card.level.name()));
        any = true;
    }
    if !any {
        push_line(&mut out, "No reportable monogenic screening findings detected.");
    }
    push_line(&mut out, "");

    push_line(&mut out, "## Coverage Notes");
    push_line(&mut out, "");
    if data.coverage.is_empty() {
        push_line(&mut out, "All critical assays covered directly.");
    } else {
        if !data.coverage.missing.is_empty() {
            push_line(&mut out, &format!("- Missing from this file build: {}", data.coverage.missing.join("; ")));
        }
        if !data.coverage.proxy.is_empty() {
            push_line(&mut out, &format!("- Called via proxy only: {}", data.coverage.proxy.join("; ")));
        }
        if !data.coverage.limitation.is_empty() {
            push_line(&mut out, &format!("- Expected array limitations: {}", data.coverage.limitation.join("; ")));
        }
    }
    push_line(&mut out, "");

    push_line(&mut out, "## Proxy-Marker Screening");
    push_line(&mut out, "");
    push_line(&mut out, "| Proxy rsid | Stands in for | Assayed |");
    push_line(&mut out, "| --- | --- | --- |");
    for row in &data.proxy_screen {
        push_line(
            &mut out,
            &format!("| {} | {} | {} |", row.rsid, row.target, if row.called { "yes" } else { "no" }),
        );
    }
    push_line(&mut out, "");

    push_line(&mut out, "## Wellness & Lifestyle");
    push_line(&mut out, "");
    for table in &data.tables.wellness {
        push_table(&mut out, table);
    }

    push_line(&mut out, "## Functional Health");
    push_line(&mut out, "");
    for table in &data.tables.functional {
        push_table(&mut out, table);
    }
    if let Some(apoe) = &data.apoe {
        push_line(&mut out, &format!("APOE haplotype: **{}** (from {}).", apoe.label, apoe.genotype_key));
        push_line(&mut out, "");
    }

    push_line(&mut out, "## Appearance & Fun Traits");
    push_line(&mut out, "");
    for card in &data.tables.fun {
        push_line(
            &mut out,
            &format!(
                "- **{}** ({}, {}): {}",
                card.label,
                card.rsid,
                card.category.name(),
                card.value
            ),
        );
    }
    push_line(&mut out, "");

    push_line(&mut out, "## Expanded Panels");
    push_line(&mut out, "");
    for row in &data.tables.expanded {
        let caution = row
            .caution
            .as_deref()
            .map(|c| format!(" — {c}"))
            .unwrap_or_default();
        push_line(&mut out, &format!("- {} ({}): {}{caution}", row.label, row.rsid, row.genotype));
    }
    push_line(&mut out, "");

    if !data.research.is_empty() {
        push_line(&mut out, "## Research Augmentation");
        push_line(&mut out, "");
        for finding in &data.research {
            let url = finding
                .url
                .as_deref()
                .map(|u| format!(" <{u}>"))
                .unwrap_or_default();
            push_line(&mut out, &format!("- {} ({}){url}", finding.title, finding.rsid));
            if let Some(summary) = &finding.summary {
                push_line(&mut out, &format!("  {summary}"));
            }
        }
        push_line(&mut out, "");
    }

    if data.include_trials && data.has_clinical_cards() && !data.trials.is_empty() {
        push_line(&mut out, "## Clinical Trials by Finding");
        push_line(&mut out, "");
        for (finding, trials) in &data.trials {
            push_line(&mut out, &format!("### {finding}"));
            for trial in trials {
                let status = trial
                    .status
                    .as_deref()
                    .map(|s| format!(" [{s}]"))
                    .unwrap_or_default();
                let url = trial
                    .url
                    .as_deref()
                    .map(|u| format!(" <{u}>"))
                    .unwrap_or_default();
                push_line(
                    &mut out,
                    &format!("- {}: {}{status}{url}", trial.nct_id, trial.title),
                );
            }
            push_line(&mut out, "");
        }
    }

    push_line(&mut out, "## Limitations & Disclaimer");
    push_line(&mut out, "");
    push_line(&mut out, DISCLAIMER);
    push_line(&mut out, "");
    push_line(
        &mut out,
        &format!(
            "{} marker(s) in this sample required reverse-complement strand correction{}",
            data.reverse_complement_rsids.len(),
            if data.reverse_complement_rsids.is_empty() {
                ".".to_string()
            } else {
                format!(": {}.", data.reverse_complement_rsids.join(", "))
            }
        ),
    );
    push_line(&mut out, HLA_B27_STRAND_NOTE);
    push_line(&mut out, "");

    if data.qc_appendix {
        push_line(&mut out, "## Developer / QC Appendix");
        push_line(&mut out, "");
        push_line(&mut out, "Verification feed tally by match status:");
        for (status, count) in &data.verification_tally {
            push_line(&mut out, &format!("- {status}: {count}"));
        }
        if !data.strand_flip_details.is_empty() {
            push_line(&mut out, "");
            push_line(&mut out, "Strand-corrected markers:");
            for line in &data.strand_flip_details {
                push_line(&mut out, &format!("- {line}"));
            }
        }
        push_line(&mut out, "");
    }

    out
}
