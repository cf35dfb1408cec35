use crate::model::cards::RiskCard;
use crate::model::rows::{PanelTable, RowType};
use crate::report::{DISCLAIMER, HLA_B27_STRAND_NOTE, ReportData};

/// Self-contained document shell; the original shipped a template file, but
/// embedding it keeps the binary standalone. Placeholders are substituted
/// once at render time.
const TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{{TITLE}}</title>
<style>
body { font-family: -apple-system, "Segoe UI", Helvetica, Arial, sans-serif; margin: 2rem auto; max-width: 60rem; color: #1d2733; }
h1 { border-bottom: 2px solid #2b6cb0; padding-bottom: .3rem; }
h2 { margin-top: 2rem; color: #2b6cb0; }
table { border-collapse: collapse; width: 100%; margin: .8rem 0; }
th, td { text-align: left; padding: .4rem .6rem; border-bottom: 1px solid #e2e8f0; vertical-align: top; }
tr.summary td { font-weight: 600; background: #f7fafc; }
.card { border: 1px solid #e2e8f0; border-left: 5px solid #a0aec0; border-radius: 4px; padding: .8rem 1rem; margin: .8rem 0; }
.card.level-high { border-left-color: #c53030; }
.card.level-med { border-left-color: #dd6b20; }
.card.level-low { border-left-color: #2f855a; }
.pill { display: inline-block; padding: .1rem .55rem; border-radius: 999px; font-size: .78rem; background: #edf2f7; }
.status-risk { background: #fed7d7; }
.status-protective { background: #c6f6d5; }
.status-missing { background: #e2e8f0; }
.status-proxy { background: #bee3f8; }
.status-caution { background: #feebc8; }
.status-high { background: #fed7d7; }
.status-med { background: #feebc8; }
.status-low { background: #c6f6d5; }
.status-neutral { background: #edf2f7; }
.muted { color: #718096; font-size: .85rem; }
</style>
</head>
<body>
<h1>{{TITLE}}</h1>
<p class="muted">Generated {{DATE}}</p>
{{BODY}}
</body>
</html>
"#;

fn escape(raw: &str) -> String {
    raw.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

fn card_html(card: &RiskCard) -> String {
    format!(
        "<div class=\"card level-{level}\"><h3>{label} <span class=\"pill status-{level}\">{level}</span></h3>\
<p>{description}</p><p><strong>Action:</strong> {action}</p>\
<p class=\"muted\">Evidence: {evidence} &middot; {category}</p></div>\n",
        level = card.level.name(),
        label = escape(&card.label),
        description = escape(&card.description),
        action = escape(&card.action),
        evidence = escape(&card.evidence),
        category = card.category.name(),
    )
}

fn table_html(table: &PanelTable) -> String {
    let mut out = format!("<h3>{}</h3>\n<table>\n<tr><th>Marker</th><th>Result</th><th>Notes</th></tr>\n", escape(&table.panel));
    for row in &table.rows {
        let class = match row.row_type {
            RowType::Summary => " class=\"summary\"",
            RowType::Child => "",
        };
        let rsid = row
            .rsid
            .as_deref()
            .map(|r| format!(" <span class=\"muted\">{}</span>", escape(r)))
            .unwrap_or_default();
        let mut notes = escape(&row.sub);
        if let Some(indicator) = &row.indicator {
            notes.push_str(&format!("<br><em>{}</em>", escape(indicator)));
        }
        if let Some(detail) = &row.detail {
            notes.push_str(&format!("<br><span class=\"muted\">{}</span>", escape(detail)));
        }
        if let Some(evidence) = &row.evidence {
            notes.push_str(&format!("<br><span class=\"muted\">Evidence: {}</span>", escape(evidence)));
        }
        if let Some(tags) = &row.tags {
            notes.push_str(&format!("<br><span class=\"muted\">Tags: {}</span>", escape(tags)));
        }
        if let Some(next_test) = &row.next_test {
            notes.push_str(&format!("<br><span class=\"muted\">Next test: {}</span>", escape(next_test)));
        }
        out.push_str(&format!(
            "<tr{class}><td>{} {}{rsid}</td><td><span class=\"pill {}\">{}</span></td><td>{notes}</td></tr>\n",
            row.emoji,
            escape(&row.label),
            row.status.pill_class(),
            escape(&row.value),
        ));
    }
    out.push_str("</table>\n");
    out
}

pub fn render(data: &ReportData) -> String {
    let mut body = String::new();

    body.push_str("<h2>QC Summary</h2>\n<ul>\n");
    let s = &data.summary;
    if let Some(total) = s.total_markers {
        body.push_str(&format!("<li>Total markers: {total}</li>\n"));
    }
    if let Some(rate) = s.call_rate {
        body.push_str(&format!("<li>Call rate: {:.2}%</li>\n", rate * 100.0));
    }
    if let Some(het) = s.heterozygosity_rate {
        body.push_str(&format!("<li>Heterozygosity rate: {het:.3}</li>\n"));
    }
    body.push_str(&format!("<li>Sex (effective): {}</li>\n", data.sex.name()));
    if let Some(build) = &s.detected_build {
        body.push_str(&format!("<li>Genome build: {}</li>\n", escape(build)));
    }
    if let Some(ambiguous) = s.ambiguous_count {
        body.push_str(&format!("<li>Ambiguous-strand markers: {ambiguous}</li>\n"));
    }
    if let Some(dupes) = s.duplicate_rsids {
        body.push_str(&format!("<li>Duplicate rsids: {dupes}</li>\n"));
    }
    if let Some((chrom, rate)) = s
        .per_chromosome_missingness
        .iter()
        .max_by(|a, b| a.1.total_cmp(b.1))
    {
        body.push_str(&format!(
            "<li>Highest per-chromosome missingness: {} ({:.2}%)</li>\n",
            escape(chrom),
            rate * 100.0
        ));
    }
    body.push_str("<li class=\"muted\">Demographics notice: effect sizes and allele frequencies derive mostly from European-ancestry cohorts; transferability varies.</li>\n</ul>\n");

    body.push_str("<h2>Actionable Clinical &amp; Pharmacogenomics</h2>\n");
    let mut any = false;
    for card in data.clinical_cards() {
        body.push_str(&card_html(card));
        any = true;
    }
    if !any {
        body.push_str("<p>No actionable clinical findings in this sample.</p>\n");
    }

    body.push_str("<h2>High-Priority Findings</h2>\n");
    let highs: Vec<&RiskCard> = data.high_cards().collect();
    if highs.is_empty() {
        body.push_str("<p>None.</p>\n");
    } else {
        body.push_str("<ul>\n");
        for card in highs {
            body.push_str(&format!(
                "<li><strong>{}</strong> — {}</li>\n",
                escape(&card.label),
                escape(&card.description)
            ));
        }
        body.push_str("</ul>\n");
    }

    body.push_str("<h2>Lifestyle &amp; Association Findings</h2>\n");
    let mut any = false;
    for card in data.association_cards() {
        body.push_str(&card_html(card));
        any = true;
    }
    if !any {
        body.push_str("<p>No association-grade findings to report.</p>\n");
    }

    body.push_str("<h2>Hidden-Risk Screening</h2>\n");
    let hidden: Vec<&RiskCard> = data.hidden_risk_cards().collect();
    if hidden.is_empty() {
        body.push_str("<p>No reportable monogenic screening findings detected.</p>\n");
    } else {
        body.push_str("<ul>\n");
        for card in hidden {
            body.push_str(&format!(
                "<li><strong>{}</strong> <span class=\"pill status-{}\">{}</span></li>\n",
                escape(&card.label),
                card.level.name(),
                card.level.name()
            ));
        }
        body.push_str("</ul>\n");
    }

    body.push_str("<h2>Coverage Notes</h2>\n");
    if data.coverage.is_empty() {
        body.push_str("<p>All critical assays covered directly.</p>\n");
    } else {
        body.push_str("<ul>\n");
        if !data.coverage.missing.is_empty() {
            body.push_str(&format!(
                "<li>Missing from this file build: {}</li>\n",
                escape(&data.coverage.missing.join("; "))
            ));
        }
        if !data.coverage.proxy.is_empty() {
            body.push_str(&format!(
                "<li>Called via proxy only: {}</li>\n",
                escape(&data.coverage.proxy.join("; "))
            ));
        }
        if !data.coverage.limitation.is_empty() {
            body.push_str(&format!(
                "<li>Expected array limitations: {}</li>\n",
                escape(&data.coverage.limitation.join("; "))
            ));
        }
        body.push_str("</ul>\n");
    }

    body.push_str("<h2>Proxy-Marker Screening</h2>\n<table>\n<tr><th>Proxy rsid</th><th>Stands in for</th><th>Assayed</th></tr>\n");
    for row in &data.proxy_screen {
        body.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td>{}</td></tr>\n",
            row.rsid,
            escape(row.target),
            if row.called { "yes" } else { "no" }
        ));
    }
    body.push_str("</table>\n");

    body.push_str("<h2>Wellness &amp; Lifestyle</h2>\n");
    for table in &data.tables.wellness {
        body.push_str(&table_html(table));
    }

    body.push_str("<h2>Functional Health</h2>\n");
    for table in &data.tables.functional {
        body.push_str(&table_html(table));
    }
    if let Some(apoe) = &data.apoe {
        body.push_str(&format!(
            "<p>APOE haplotype: <strong>{}</strong> (from {}).</p>\n",
            escape(&apoe.label),
            escape(&apoe.genotype_key)
        ));
    }

    body.push_str("<h2>Appearance &amp; Fun Traits</h2>\n<ul>\n");
    for card in &data.tables.fun {
        let sub = if card.sub.is_empty() {
            String::new()
        } else {
            format!(" <span class=\"muted\">{}</span>", escape(&card.sub))
        };
        body.push_str(&format!(
            "<li>{} <strong>{}</strong> <span class=\"muted\">({}, {})</span>: {}{sub}</li>\n",
            card.emoji,
            escape(&card.label),
            escape(&card.rsid),
            card.category.name(),
            escape(&card.value)
        ));
    }
    body.push_str("</ul>\n");

    body.push_str("<h2>Expanded Panels</h2>\n<table>\n<tr><th>Marker</th><th>Genotype</th><th>Note</th></tr>\n");
    for row in &data.tables.expanded {
        body.push_str(&format!(
            "<tr><td>{} <span class=\"muted\">{}</span></td><td>{}</td><td>{}</td></tr>\n",
            escape(&row.label),
            escape(&row.rsid),
            escape(&row.genotype),
            escape(row.caution.as_deref().unwrap_or(""))
        ));
    }
    body.push_str("</table>\n");

    if !data.research.is_empty() {
        body.push_str("<h2>Research Augmentation</h2>\n<ul>\n");
        for finding in &data.research {
            let link = match finding.url.as_deref() {
                Some(url) => format!(" <a href=\"{}\">source</a>", escape(url)),
                None => String::new(),
            };
            body.push_str(&format!(
                "<li><strong>{}</strong> ({}){link}",
                escape(&finding.title),
                escape(&finding.rsid)
            ));
            if let Some(summary) = &finding.summary {
                body.push_str(&format!("<br>{}", escape(summary)));
            }
            body.push_str("</li>\n");
        }
        body.push_str("</ul>\n");
    }

    if data.include_trials && data.has_clinical_cards() && !data.trials.is_empty() {
        body.push_str("<h2>Clinical Trials by Finding</h2>\n");
        for (finding, trials) in &data.trials {
            body.push_str(&format!("<h3>{}</h3>\n<ul>\n", escape(finding)));
            for trial in trials {
                let status = trial
                    .status
                    .as_deref()
                    .map(|s| format!(" [{}]", escape(s)))
                    .unwrap_or_default();
                let link = match trial.url.as_deref() {
                    Some(url) => format!(" <a href=\"{}\">registry</a>", escape(url)),
                    None => String::new(),
                };
                body.push_str(&format!(
                    "<li>{}: {}{status}{link}</li>\n",
                    escape(&trial.nct_id),
                    escape(&trial.title)
                ));
            }
            body.push_str("</ul>\n");
        }
    }

    body.push_str("<h2>Limitations &amp; Disclaimer</h2>\n");
    body.push_str(&format!("<p>{}</p>\n", escape(DISCLAIMER)));
    body.push_str(&format!(
        "<p>{} marker(s) required reverse-complement strand correction{}</p>\n",
        data.reverse_complement_rsids.len(),
        if data.reverse_complement_rsids.is_empty() {
            ".".to_string()
        } else {
            format!(": {}.", escape(&data.reverse_complement_rsids.join(", ")))
        }
    ));
    body.push_str(&format!("<p>{}</p>\n", escape(HLA_B27_STRAND_NOTE)));

    if data.qc_appendix {
        body.push_str("<h2>Developer / QC Appendix</h2>\n<table>\n<tr><th>Match status</th><th>Count</th></tr>\n");
        for (status, count) in &data.verification_tally {
            body.push_str(&format!("<tr><td>{status}</td><td>{count}</td></tr>\n"));
        }
        body.push_str("</table>\n");
        if !data.strand_flip_details.is_empty() {
            body.push_str("<p>Strand-corrected markers:</p>\n<ul>\n");
            for line in &data.strand_flip_details {
                body.push_str(&format!("<li>{}</li>\n", escape(line)));
            }
            body.push_str("</ul>\n");
        }
    }

    TEMPLATE
        .replace("{{TITLE}}", &escape(&format!("Genotype Report — {}", data.base_name)))
        .replace("{{DATE}}", &escape(&data.generated_on))
        .replace("{{BODY}}", &body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::summary::{QcSummary, Sex};
    use crate::model::cards::{Category, RiskLevel};
    use crate::panels::coverage::CoverageNotes;
    use crate::pipeline::stage5_rows::RowTables;

    fn data_with_card() -> ReportData {
        ReportData {
            base_name: "sample".to_string(),
            generated_on: "2026-08-29".to_string(),
            summary: QcSummary::default(),
            sex: Sex::Unknown,
            apoe: None,
            cards: vec![RiskCard {
                label: "Factor V Leiden Thrombophilia".to_string(),
                level: RiskLevel::High,
                description: "detected <variant>".to_string(),
                action: "discuss".to_string(),
                evidence: "ACMG-reportable".to_string(),
                category: Category::Clinical,
            }],
            tables: RowTables::default(),
            coverage: CoverageNotes::default(),
            proxy_screen: Vec::new(),
            reverse_complement_rsids: vec!["rs4349859".to_string()],
            verification_tally: Vec::new(),
            strand_flip_details: Vec::new(),
            trials: Default::default(),
            research: Vec::new(),
            include_trials: false,
            qc_appendix: false,
        }
    }

    #[test]
    fn test_template_placeholders_substituted() {
        let html = render(&data_with_card());
        assert!(!html.contains("{{TITLE}}"));
        assert!(!html.contains("{{BODY}}"));
        assert!(html.contains("Genotype Report"));
    }

    #[test]
    fn test_card_text_is_escaped() {
        let html = render(&data_with_card());
        assert!(html.contains("detected &lt;variant&gt;"));
        assert!(!html.contains("detected <variant>"));
    }

    #[test]
    fn test_high_card_reaches_priority_section() {
        let html = render(&data_with_card());
        let priority = html.find("High-Priority Findings").unwrap();
        assert!(html[priority..].contains("Factor V Leiden"));
    }

    #[test]
    fn test_strand_correction_count_in_limitations() {
        let html = render(&data_with_card());
        assert!(html.contains("1 marker(s) required reverse-complement strand correction"));
        assert!(html.contains("rs4349859"));
    }
}
