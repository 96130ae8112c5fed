//! Output formatters for analysis reports and dashboard views

use crate::config::OutputFormat;
use crate::dashboard::{DashboardHistory, DashboardSummary};
use crate::error::{MatcherError, Result};
use crate::output::report::AnalysisReport;
use crate::processing::explanation::MatchTier;
use crate::processing::matcher::MatchType;
use askama::Template;
use colored::{Color, Colorize};
use std::path::{Path, PathBuf};

/// Trait for formatting analysis reports
pub trait OutputFormatter {
    fn format_report(&self, report: &AnalysisReport) -> Result<String>;
    fn supports_format(&self) -> OutputFormat;
}

/// Console formatter with optional colors
pub struct ConsoleFormatter {
    use_colors: bool,
    detailed: bool,
}

/// JSON formatter for scripting and storage
pub struct JsonFormatter {
    pretty: bool,
}

/// Markdown formatter for sharing reports
pub struct MarkdownFormatter {
    include_metadata: bool,
}

/// HTML formatter rendered through an askama template
pub struct HtmlFormatter {
    include_styles: bool,
}

/// Dispatches a report to the formatter for the requested format
pub struct ReportGenerator {
    console_formatter: ConsoleFormatter,
    json_formatter: JsonFormatter,
    markdown_formatter: MarkdownFormatter,
    html_formatter: HtmlFormatter,
}

#[derive(Template)]
#[template(source = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Resume Match Report</title>
    {% if include_styles %}
    <style>
        body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif; line-height: 1.6; color: #333; max-width: 900px; margin: 0 auto; padding: 20px; background: #f8f9fa; }
        .container { background: white; padding: 30px; border-radius: 8px; box-shadow: 0 2px 10px rgba(0,0,0,0.1); }
        .header { text-align: center; border-bottom: 3px solid #007acc; padding-bottom: 20px; }
        .badge { display: inline-block; padding: 6px 14px; border-radius: 20px; font-weight: bold; color: white; margin-left: 10px; }
        .tier-strong { background: #28a745; }
        .tier-moderate { background: #ffc107; color: #000; }
        .tier-weak { background: #dc3545; }
        .section h2 { color: #007acc; border-bottom: 2px solid #e9ecef; padding-bottom: 8px; }
        table { border-collapse: collapse; width: 100%; }
        th, td { text-align: left; padding: 6px 10px; border-bottom: 1px solid #e9ecef; }
        .missing li { color: #dc3545; }
        .metadata { background: #e9ecef; padding: 15px; border-radius: 6px; margin-top: 30px; font-size: 0.9em; color: #6c757d; }
    </style>
    {% endif %}
</head>
<body>
    <div class="container">
        <div class="header">
            <h1>Resume Match Report</h1>
            <p>Generated: {{ generated_at }}</p>
        </div>

        <div class="section">
            <h2>Overall Score: {{ score }}% <span class="badge {{ tier_class }}">{{ tier_label }}</span></h2>
            <p>{{ recommendation }}</p>
        </div>

        <div class="section">
            <h2>Matched Skills ({{ matched.len() }})</h2>
            {% if matched.is_empty() %}
            <p>No skills matched.</p>
            {% else %}
            <table>
                <tr><th>Job keyword</th><th>Resume keyword</th><th>Type</th><th>Similarity</th><th>Importance</th></tr>
                {% for row in matched %}
                <tr><td>{{ row.job_keyword }}</td><td>{{ row.resume_keyword }}</td><td>{{ row.match_type }}</td><td>{{ row.similarity }}</td><td>{{ row.importance }}</td></tr>
                {% endfor %}
            </table>
            {% endif %}
        </div>

        {% if !missing.is_empty() %}
        <div class="section missing">
            <h2>Missing Skills ({{ missing.len() }})</h2>
            <ul>
                {% for skill in missing %}
                <li>{{ skill }}</li>
                {% endfor %}
            </ul>
        </div>
        {% endif %}

        <div class="metadata">
            <p><strong>Generated by resume-matcher v{{ version }}</strong></p>
            <p><strong>Resume:</strong> {{ resume_source }} | <strong>Job:</strong> {{ job_source }}</p>
        </div>
    </div>
</body>
</html>"#, ext = "html")]
struct HtmlTemplate {
    include_styles: bool,
    generated_at: String,
    score: String,
    tier_class: &'static str,
    tier_label: String,
    recommendation: &'static str,
    matched: Vec<HtmlMatchRow>,
    missing: Vec<String>,
    version: String,
    resume_source: String,
    job_source: String,
}

struct HtmlMatchRow {
    job_keyword: String,
    resume_keyword: String,
    match_type: String,
    similarity: String,
    importance: String,
}

fn format_timestamp(report: &AnalysisReport) -> String {
    report
        .metadata
        .generated_at
        .format("%Y-%m-%d %H:%M:%S UTC")
        .to_string()
}

impl ConsoleFormatter {
    pub fn new(use_colors: bool, detailed: bool) -> Self {
        Self { use_colors, detailed }
    }

    fn colorize(&self, text: &str, color: Color) -> String {
        if self.use_colors {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn format_header(&self, title: &str, level: u8) -> String {
        let (prefix, color) = match level {
            1 => ("█", Color::Blue),
            2 => ("▓", Color::Green),
            _ => ("▒", Color::Yellow),
        };

        if self.use_colors {
            format!("\n{} {}\n", prefix.color(color).bold(), title.color(color).bold())
        } else {
            format!("\n{} {}\n", prefix, title)
        }
    }

    fn format_tier_badge(&self, tier: MatchTier) -> String {
        let (label, color) = match tier {
            MatchTier::Strong => ("STRONG", Color::Green),
            MatchTier::Moderate => ("MODERATE", Color::Yellow),
            MatchTier::Weak => ("WEAK", Color::Red),
        };

        if self.use_colors {
            format!("[{}]", label.color(color).bold())
        } else {
            format!("[{}]", label)
        }
    }

    pub fn format_dashboard(&self, summary: &DashboardSummary, history: &DashboardHistory) -> String {
        let mut output = String::new();

        output.push_str(&self.format_header("📈 ANALYSIS DASHBOARD", 1));
        output.push_str(&format!("Total analyses: {}\n", summary.total_analyses));
        output.push_str(&format!("Average score:  {:.2}%\n", summary.average_match_score));
        output.push_str(&format!("Highest score:  {:.2}%\n", summary.highest_match_score));
        output.push_str(&format!("Lowest score:   {:.2}%\n", summary.lowest_match_score));

        output.push_str(&self.format_header("Most Common Missing Skills", 2));
        if summary.most_common_missing_skills.is_empty() {
            output.push_str("  (none)\n");
        }
        for (i, stat) in summary.most_common_missing_skills.iter().enumerate() {
            output.push_str(&format!(
                "  {}. {}: {} time(s), {:.2}%\n",
                i + 1,
                self.colorize(&stat.skill, Color::Red),
                stat.count,
                stat.frequency
            ));
        }

        output.push_str(&self.format_header(
            &format!("Recent Analyses ({} of {})", history.analyses.len(), history.total),
            2,
        ));
        for item in &history.analyses {
            output.push_str(&format!(
                "  {}  {:>6.2}%  {} vs {}\n",
                item.generated_at.format("%Y-%m-%d %H:%M"),
                item.match_score,
                item.resume_source,
                item.job_source
            ));
        }

        output
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_report(&self, report: &AnalysisReport) -> Result<String> {
        let outcome = &report.outcome;
        let mut output = String::new();

        output.push_str(&self.format_header("📊 RESUME MATCH ANALYSIS", 1));
        output.push_str(&format!("Generated: {}\n", format_timestamp(report)));

        output.push_str(&self.format_header("Summary", 2));
        output.push_str(&format!(
            "Match Score: {:.2}% {}\n",
            outcome.match_score,
            self.format_tier_badge(outcome.tier)
        ));
        output.push_str(&format!(
            "Keywords: {} in job description, {} in resume\n",
            outcome.job_keyword_count, outcome.resume_keyword_count
        ));
        output.push_str(&format!(
            "Matches: {} exact, {} partial, {} missing\n",
            report.exact_match_count(),
            report.partial_match_count(),
            outcome.missing_keywords.len()
        ));
        output.push_str(&format!(
            "Verdict: {}\n",
            self.colorize(outcome.tier.recommendation(), Color::Cyan)
        ));

        output.push_str(&self.format_header("✅ Matched Skills", 2));
        if outcome.matched_keywords.is_empty() {
            output.push_str("  (none)\n");
        }
        for (job_keyword, entry) in report.ranked_matches() {
            let line = match entry.match_type {
                MatchType::Exact => format!("  • {} (exact)", self.colorize(job_keyword, Color::Green)),
                MatchType::Partial => format!(
                    "  • {} (partial via '{}', {:.0}% similar)",
                    self.colorize(job_keyword, Color::Yellow),
                    entry.resume_keyword,
                    entry.similarity * 100.0
                ),
            };
            output.push_str(&line);
            if self.detailed {
                output.push_str(&format!(" importance {:.4}", entry.weight));
            }
            output.push('\n');
        }

        if !outcome.missing_keywords.is_empty() {
            output.push_str(&self.format_header("⚠️ Missing Skills", 2));
            for keyword in &outcome.missing_keywords {
                output.push_str(&format!("  • {}\n", self.colorize(keyword, Color::Red)));
            }
        }

        if self.detailed {
            if !outcome.extra_keywords.is_empty() {
                output.push_str(&self.format_header("Additional Resume Keywords", 3));
                output.push_str(&format!("  {}\n", outcome.extra_keywords.join(", ")));
            }

            output.push_str(&self.format_header("Explanation", 3));
            output.push_str(&outcome.explanation);
        }

        output.push_str(&format!(
            "\nResume: {} | Job: {}\n",
            report.metadata.resume_source, report.metadata.job_source
        ));

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Console
    }
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }

    pub fn format_value<T: serde::Serialize>(&self, value: &T) -> Result<String> {
        if self.pretty {
            Ok(serde_json::to_string_pretty(value)?)
        } else {
            Ok(serde_json::to_string(value)?)
        }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_report(&self, report: &AnalysisReport) -> Result<String> {
        self.format_value(report)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Json
    }
}

impl HtmlFormatter {
    pub fn new(include_styles: bool) -> Self {
        Self { include_styles }
    }

    fn create_template_data(&self, report: &AnalysisReport) -> HtmlTemplate {
        let outcome = &report.outcome;
        let tier_class = match outcome.tier {
            MatchTier::Strong => "tier-strong",
            MatchTier::Moderate => "tier-moderate",
            MatchTier::Weak => "tier-weak",
        };

        let matched = report
            .ranked_matches()
            .into_iter()
            .map(|(job_keyword, entry)| HtmlMatchRow {
                job_keyword: job_keyword.clone(),
                resume_keyword: entry.resume_keyword.clone(),
                match_type: entry.match_type.to_string(),
                similarity: format!("{:.0}%", entry.similarity * 100.0),
                importance: format!("{:.4}", entry.weight),
            })
            .collect();

        HtmlTemplate {
            include_styles: self.include_styles,
            generated_at: format_timestamp(report),
            score: format!("{:.2}", outcome.match_score),
            tier_class,
            tier_label: outcome.tier.to_string(),
            recommendation: outcome.tier.recommendation(),
            matched,
            missing: outcome.missing_keywords.clone(),
            version: report.metadata.version.clone(),
            resume_source: report.metadata.resume_source.clone(),
            job_source: report.metadata.job_source.clone(),
        }
    }
}

impl OutputFormatter for HtmlFormatter {
    fn format_report(&self, report: &AnalysisReport) -> Result<String> {
        self.create_template_data(report)
            .render()
            .map_err(|e| MatcherError::OutputFormatting(e.to_string()))
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Html
    }
}

impl MarkdownFormatter {
    pub fn new(include_metadata: bool) -> Self {
        Self { include_metadata }
    }

    fn markdown_tier_badge(tier: MatchTier) -> &'static str {
        match tier {
            MatchTier::Strong => "🟢 Strong",
            MatchTier::Moderate => "🟡 Moderate",
            MatchTier::Weak => "🔴 Weak",
        }
    }
}

impl OutputFormatter for MarkdownFormatter {
    fn format_report(&self, report: &AnalysisReport) -> Result<String> {
        let outcome = &report.outcome;
        let mut output = String::new();

        output.push_str("# 📊 Resume Match Report\n\n");

        if self.include_metadata {
            output.push_str(&format!("**Generated:** {}\n", format_timestamp(report)));
            output.push_str(&format!(
                "**Resume:** `{}` | **Job:** `{}`\n\n",
                report.metadata.resume_source, report.metadata.job_source
            ));
        }

        output.push_str("## Summary\n\n");
        output.push_str(&format!(
            "**Match Score:** {:.2}% {}\n\n",
            outcome.match_score,
            Self::markdown_tier_badge(outcome.tier)
        ));
        output.push_str(&format!("**Verdict:** {}\n\n", outcome.tier.recommendation()));

        output.push_str("## ✅ Matched Skills\n\n");
        if outcome.matched_keywords.is_empty() {
            output.push_str("_No skills matched._\n\n");
        } else {
            output.push_str("| Job keyword | Resume keyword | Type | Similarity | Importance |\n");
            output.push_str("|---|---|---|---|---|\n");
            for (job_keyword, entry) in report.ranked_matches() {
                output.push_str(&format!(
                    "| {} | {} | {} | {:.0}% | {:.4} |\n",
                    job_keyword,
                    entry.resume_keyword,
                    entry.match_type,
                    entry.similarity * 100.0,
                    entry.weight
                ));
            }
            output.push('\n');
        }

        if !outcome.missing_keywords.is_empty() {
            output.push_str("## ⚠️ Missing Skills\n\n");
            for (i, keyword) in outcome.missing_keywords.iter().enumerate() {
                output.push_str(&format!("{}. {}\n", i + 1, keyword));
            }
            output.push('\n');
        }

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Markdown
    }
}

impl ReportGenerator {
    pub fn new() -> Self {
        Self::with_options(true, false, true, true, true)
    }

    pub fn with_options(
        use_colors: bool,
        detailed: bool,
        pretty_json: bool,
        include_metadata: bool,
        include_html_styles: bool,
    ) -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(use_colors, detailed),
            json_formatter: JsonFormatter::new(pretty_json),
            markdown_formatter: MarkdownFormatter::new(include_metadata),
            html_formatter: HtmlFormatter::new(include_html_styles),
        }
    }

    pub fn generate_report(&self, report: &AnalysisReport, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Console => self.console_formatter.format_report(report),
            OutputFormat::Json => self.json_formatter.format_report(report),
            OutputFormat::Markdown => self.markdown_formatter.format_report(report),
            OutputFormat::Html => self.html_formatter.format_report(report),
        }
    }

    pub fn generate_dashboard(
        &self,
        summary: &DashboardSummary,
        history: &DashboardHistory,
        format: OutputFormat,
    ) -> Result<String> {
        match format {
            OutputFormat::Console => Ok(self.console_formatter.format_dashboard(summary, history)),
            OutputFormat::Json => self.json_formatter.format_value(&serde_json::json!({
                "summary": summary,
                "history": history,
            })),
            other => Err(MatcherError::OutputFormatting(format!(
                "Dashboard output supports console and json, not {:?}",
                other
            ))),
        }
    }
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self::new()
    }
}

pub fn save_report_to_file(content: &str, file_path: &Path) -> Result<()> {
    if let Some(parent) = file_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(file_path, content)?;
    Ok(())
}

/// Where `--save` writes: the path itself, or a suggested file inside it when it is a directory
pub fn resolve_save_path(save: &Path, format: OutputFormat, resume_name: &str) -> PathBuf {
    if save.is_dir() {
        save.join(suggest_filename(format, resume_name, true))
    } else {
        save.to_path_buf()
    }
}

pub fn suggest_filename(format: OutputFormat, resume_name: &str, timestamp: bool) -> String {
    let base_name = Path::new(resume_name)
        .file_stem()
        .unwrap_or_default()
        .to_string_lossy();

    let timestamp_suffix = if timestamp {
        format!("_{}", chrono::Utc::now().format("%Y%m%d_%H%M%S"))
    } else {
        String::new()
    };

    let extension = match format {
        OutputFormat::Console => "txt",
        OutputFormat::Json => "json",
        OutputFormat::Markdown => "md",
        OutputFormat::Html => "html",
    };

    format!("{}_match{}.{}", base_name, timestamp_suffix, extension)
}
