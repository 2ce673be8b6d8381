use anyhow::Result;
use serde::Serialize;
use tabled::settings::Style;
use tabled::{Table, Tabled};
use valuecalc_lib::report::{format_currency, MetricRow};
use valuecalc_lib::{FinancialRecord, ValuationReport};

#[derive(Clone, Debug, PartialEq)]
pub enum OutputFormat {
    Table,
    Json,
    Csv,
    Markdown,
}

impl OutputFormat {
    /// Unknown names fall back to a table.
    pub fn parse(name: &str) -> Self {
        match name.trim().to_lowercase().as_str() {
            "json" => OutputFormat::Json,
            "csv" => OutputFormat::Csv,
            "markdown" | "md" => OutputFormat::Markdown,
            _ => OutputFormat::Table,
        }
    }
}

#[derive(Tabled, Serialize)]
struct FieldRow {
    #[tabled(rename = "Field")]
    #[serde(rename = "Field")]
    field: String,
    #[tabled(rename = "Value")]
    #[serde(rename = "Value")]
    value: String,
}

#[derive(Tabled, Serialize)]
struct KeyMetricRow {
    #[tabled(rename = "Metric")]
    #[serde(rename = "Metric")]
    metric: String,
    #[tabled(rename = "Value")]
    #[serde(rename = "Value")]
    value: String,
}

#[derive(Tabled, Serialize)]
struct ValuationRow {
    #[tabled(rename = "Method")]
    #[serde(rename = "Method")]
    method: String,
    #[tabled(rename = "Result")]
    #[serde(rename = "Result")]
    label: String,
    #[tabled(rename = "Value")]
    #[serde(rename = "Value")]
    value: String,
}

#[derive(Serialize)]
struct CsvRow {
    #[serde(rename = "Section")]
    section: &'static str,
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "Value")]
    value: String,
}

/// JSON shape for the `metrics` subcommand: the report without valuations.
#[derive(Serialize)]
struct MetricsView<'a> {
    ticker: &'a str,
    record: &'a FinancialRecord,
    key_metrics: &'a [MetricRow],
}

// -- Row builders --

fn build_field_rows(record: &FinancialRecord) -> Vec<FieldRow> {
    record
        .iter()
        .map(|(metric, value)| FieldRow {
            field: metric.label().to_string(),
            value: value.to_string(),
        })
        .collect()
}

fn build_key_metric_rows(rows: &[MetricRow]) -> Vec<KeyMetricRow> {
    rows.iter()
        .map(|r| KeyMetricRow {
            metric: r.metric.to_string(),
            value: r.value.to_string(),
        })
        .collect()
}

/// Only methods that produced a value get a row.
fn build_valuation_rows(report: &ValuationReport) -> Vec<ValuationRow> {
    report
        .computed()
        .filter_map(|line| {
            line.value.map(|v| ValuationRow {
                method: line.title.to_string(),
                label: line.label.to_string(),
                value: format_currency(v),
            })
        })
        .collect()
}

fn build_csv_rows(report: &ValuationReport, with_valuations: bool) -> Vec<CsvRow> {
    let mut rows: Vec<CsvRow> = build_field_rows(&report.record)
        .into_iter()
        .map(|r| CsvRow {
            section: "financials",
            name: r.field,
            value: r.value,
        })
        .collect();
    rows.extend(
        build_key_metric_rows(&report.key_metrics)
            .into_iter()
            .map(|r| CsvRow {
                section: "key_metrics",
                name: r.metric,
                value: r.value,
            }),
    );
    if with_valuations {
        rows.extend(build_valuation_rows(report).into_iter().map(|r| CsvRow {
            section: "valuation",
            name: r.label,
            value: r.value,
        }));
    }
    rows
}

// -- Rendering --

fn render_text(report: &ValuationReport, markdown: bool, with_valuations: bool) -> String {
    let style = |mut table: Table| {
        if markdown {
            table.with(Style::markdown());
        }
        table.to_string()
    };
    let heading = |title: &str| {
        if markdown {
            format!("### {}", title)
        } else {
            format!("== {} ==", title)
        }
    };

    let mut sections = vec![
        heading(&format!("Stock Financials: {}", report.ticker)),
        style(Table::new(build_field_rows(&report.record))),
        heading("Key Financial Metrics"),
        style(Table::new(build_key_metric_rows(&report.key_metrics))),
    ];

    if with_valuations {
        for row in build_valuation_rows(report) {
            sections.push(heading(&row.method));
            if markdown {
                sections.push(format!("**{}:** {}", row.label, row.value));
            } else {
                sections.push(format!("{}: {}", row.label, row.value));
            }
        }
    }

    sections.join("\n\n")
}

fn render_csv(rows: &[CsvRow]) -> Result<String> {
    let mut wtr = csv::Writer::from_writer(Vec::new());
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(String::from_utf8(wtr.into_inner()?)?)
}

/// Prints the full report: record, key metrics, and computed valuations.
pub fn print_report(report: &ValuationReport, format: &OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Table => println!("{}", render_text(report, false, true)),
        OutputFormat::Markdown => println!("{}", render_text(report, true, true)),
        OutputFormat::Csv => print!("{}", render_csv(&build_csv_rows(report, true))?),
        OutputFormat::Json => print_json(report),
    }
    Ok(())
}

/// Prints only the record and the key metrics table.
pub fn print_metrics(report: &ValuationReport, format: &OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Table => println!("{}", render_text(report, false, false)),
        OutputFormat::Markdown => println!("{}", render_text(report, true, false)),
        OutputFormat::Csv => print!("{}", render_csv(&build_csv_rows(report, false))?),
        OutputFormat::Json => print_json(&MetricsView {
            ticker: &report.ticker,
            record: &report.record,
            key_metrics: &report.key_metrics,
        }),
    }
    Ok(())
}

// -- JSON output --

pub fn print_json<T: serde::Serialize>(data: &T) {
    match serde_json::to_string_pretty(data) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Failed to serialize to JSON: {}", e),
    }
}

#[cfg(test)]
#[path = "output_tests.rs"]
mod tests;
