use std::fmt::Write as _;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use data_insight::analysis::{ChartKind, PointValue, StatValue};
use data_insight::types::Value;
use data_insight::{AnalysisOptions, analyze, analyze_path};

fn tmp_file(ext: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    std::env::temp_dir().join(format!("data-insight-pipeline-{nanos}.{ext}"))
}

#[test]
fn csv_header_columns_are_exact() {
    let result = analyze(b"a,b,c\n1,2,3\n", "text/csv", "abc.csv").unwrap();
    assert_eq!(result.raw_data.column_names(), vec!["a", "b", "c"]);
    assert_eq!(result.statistics.count("total_columns"), Some(3));
}

#[test]
fn seventy_percent_rule_applies_end_to_end() {
    let mostly_numeric = analyze(b"v\n1\n2\nx\n4\n5\n", "text/csv", "v.csv").unwrap();
    assert_eq!(mostly_numeric.statistics.count("numeric_columns"), Some(1));
    assert_eq!(mostly_numeric.statistics.text("v_sum"), Some("12.00"));

    let mostly_text = analyze(b"v\n1\nx\ny\nz\nw\n", "text/csv", "v.csv").unwrap();
    assert_eq!(mostly_text.statistics.count("categorical_columns"), Some(1));
    assert!(mostly_text.statistics.get("v_sum").is_none());
}

#[test]
fn histogram_counts_match_valid_values() {
    let mut csv = String::from("amount\n");
    for i in 0..237 {
        writeln!(csv, "{}", (i * 37 % 101) as f64 / 3.0).unwrap();
    }
    writeln!(csv, "not a number").unwrap();

    let result = analyze(csv.as_bytes(), "text/csv", "amounts.csv").unwrap();
    let dist = result
        .charts
        .iter()
        .find(|c| c.title == "Distribution of amount")
        .expect("distribution chart");
    assert_eq!(dist.kind, ChartKind::Bar);
    assert_eq!(dist.data.len(), 10);
    let total: u64 = dist
        .data
        .iter()
        .map(|p| match p.value {
            PointValue::Count(n) => n,
            PointValue::Measure(_) => panic!("histogram bins hold counts"),
        })
        .sum();
    assert_eq!(total, 237);
}

#[test]
fn empty_and_blank_inputs_report_no_structured_data() {
    for (bytes, media, name) in [
        (&b""[..], "text/plain", "empty.txt"),
        (&b"   \n\t\n  "[..], "", "blank"),
        (&b"a,b\n,\n ,  \n"[..], "text/csv", "blank.csv"),
    ] {
        let result = analyze(bytes, media, name).unwrap();
        assert_eq!(
            result.statistics.get("message"),
            Some(&StatValue::Text("No structured data found".to_string())),
            "input {name}"
        );
        assert_eq!(result.statistics.get("file_processed"), Some(&StatValue::Flag(true)));
        assert_eq!(result.insights.len(), 3);
        assert!(result.charts.is_empty());
    }
}

#[test]
fn total_rows_equals_raw_data_length() {
    let result = analyze(b"x,y\n1,a\n,\n2,b\n3,\n", "text/csv", "xy.csv").unwrap();
    assert_eq!(result.statistics.count("total_rows"), Some(result.raw_data.row_count() as u64));
    assert_eq!(result.raw_data.row_count(), 3);
}

#[test]
fn analysis_is_idempotent() {
    let input = b"region,sales\nnorth,10\nsouth,12.5\nnorth,7\n";
    let first = analyze(input, "text/csv", "sales.csv").unwrap();
    let second = analyze(input, "text/csv", "sales.csv").unwrap();
    assert_eq!(first, second);
    assert_eq!(first.to_json().unwrap(), second.to_json().unwrap());
}

#[test]
fn categorical_charts_are_capped() {
    let mut csv = String::from("c1,c2,c3,c4\n");
    for i in 0..15 {
        for _ in 0..(15 - i) {
            writeln!(csv, "v{i},a,b,d").unwrap();
        }
    }

    let result = analyze(csv.as_bytes(), "text/csv", "cats.csv").unwrap();
    assert_eq!(result.statistics.count("categorical_columns"), Some(4));
    assert_eq!(result.charts.len(), 6);
    assert!(result.charts.iter().all(|c| c.data.len() <= 10));
    assert!(!result.charts.iter().any(|c| c.title.ends_with("c4")));

    let pie = &result.charts[0];
    assert_eq!(pie.kind, ChartKind::Pie);
    assert_eq!(pie.title, "Distribution of c1");
    assert_eq!(pie.data.len(), 10);
    assert_eq!(pie.data[0].name, "v0");
    assert_eq!(pie.data[0].value, PointValue::Count(15));
}

#[test]
fn free_text_falls_back_to_content_snippet() {
    let text = "just some prose without any structure at all. ".repeat(20);
    let result = analyze(text.as_bytes(), "text/plain", "essay.txt").unwrap();
    assert_eq!(result.raw_data.column_names(), vec!["content"]);
    match result.raw_data.records[0].get("content") {
        Some(Value::Text(s)) => assert_eq!(s.chars().count(), 500),
        other => panic!("unexpected content: {other:?}"),
    }
    assert_eq!(result.statistics.count("categorical_columns"), Some(1));
}

#[test]
fn numeric_text_lines_feed_statistics() {
    let result = analyze(b"1 10\n2 20\n3 30\n", "", "series.dat").unwrap();
    assert_eq!(result.statistics.count("numeric_columns"), Some(2));
    assert_eq!(result.statistics.text("value_avg"), Some("20.00"));
    assert!(result.charts.iter().any(|c| c.title == "Trend of value"));
}

#[test]
fn broken_pdf_is_recoverable() {
    let result = analyze(b"%PDF-1.7\nthis is not a real pdf", "application/pdf", "scan.pdf").unwrap();
    let record = &result.raw_data.records[0];
    assert_eq!(record.get("type"), Some(&Value::text("PDF")));
    assert_eq!(result.statistics.count("total_rows"), Some(1));
}

#[test]
fn word_documents_use_text_heuristics() {
    let result = analyze(b"Title: Plan\nOwner: Ada\n", "application/msword", "plan.doc").unwrap();
    assert_eq!(result.raw_data.row_count(), 2);
    assert_eq!(result.raw_data.records[0].get("Title"), Some(&Value::text("Plan")));
}

#[test]
fn analyze_path_reads_file_and_uses_its_name() {
    let path = tmp_file("csv");
    std::fs::write(&path, "k,v\na,1\nb,2\n").unwrap();

    let result = analyze_path(&path, "", &AnalysisOptions::default()).unwrap();
    assert_eq!(result.statistics.count("total_rows"), Some(2));

    let _ = std::fs::remove_file(&path);
}

#[test]
fn analyze_path_missing_file_is_fatal() {
    let err = analyze_path("does/not/exist.csv", "", &AnalysisOptions::default()).unwrap_err();
    assert!(err.to_string().starts_with("failed to process file: "));
}

#[test]
fn result_json_contract() {
    let result = analyze(b"label,n\nx,1\ny,2\n", "text/csv", "x.csv").unwrap();
    let json: serde_json::Value = serde_json::from_str(&result.to_json().unwrap()).unwrap();
    let keys: Vec<&str> = json.as_object().unwrap().keys().map(String::as_str).collect();
    for key in ["charts", "statistics", "rawData", "insights"] {
        assert!(keys.contains(&key), "missing {key}");
    }
    assert_eq!(json["charts"][0]["type"], "bar");
    assert_eq!(json["charts"][0]["series"][0]["key"], "value");
    assert_eq!(json["charts"][0]["series"][0]["name"], "Frequency");
    assert_eq!(json["rawData"][1]["label"], "y");
}

#[test]
fn unit_suffixed_values_count_in_numeric_columns() {
    let mut csv = String::from("w\n");
    for i in 1..10 {
        writeln!(csv, "{i}").unwrap();
    }
    writeln!(csv, "10kg").unwrap();

    let result = analyze(csv.as_bytes(), "text/csv", "weights.csv").unwrap();
    assert_eq!(result.statistics.count("numeric_columns"), Some(1));
    assert_eq!(result.statistics.text("w_sum"), Some("55.00"));
    let dist = result.charts.iter().find(|c| c.title == "Distribution of w").unwrap();
    let total: f64 = dist.data.iter().map(|p| p.value.as_f64()).sum();
    assert_eq!(total, 10.0);
}

#[test]
fn two_decimal_statistics_round_ties_up() {
    let result = analyze(b"v\n0.25\n0\n", "text/csv", "v.csv").unwrap();
    assert_eq!(result.statistics.text("v_avg"), Some("0.13"));
}

#[test]
fn semicolon_and_tab_separated_uploads_are_split() {
    let semi = analyze(b"a;b;c\n1;2;3\n", "text/csv", "export.csv").unwrap();
    assert_eq!(semi.raw_data.column_names(), vec!["a", "b", "c"]);
    assert_eq!(semi.statistics.count("numeric_columns"), Some(3));

    let tabs = analyze(b"city\tvisits\nParis\t3\nLyon\t5\n", "text/csv", "visits.csv").unwrap();
    assert_eq!(tabs.raw_data.column_names(), vec!["city", "visits"]);
    assert_eq!(tabs.statistics.text("visits_sum"), Some("8.00"));
}
