//! Short narrative observations about an analysis.

use super::PREVIEW_ROWS;

/// Insights for a non-empty dataset.
pub fn generate_insights(total_rows: usize, numeric_columns: usize, categorical_columns: usize) -> Vec<String> {
    let mut insights = vec![format!("Analyzed {total_rows} rows of data")];
    if numeric_columns > 0 {
        insights.push(format!(
            "Found {numeric_columns} numeric column(s) for quantitative analysis"
        ));
    }
    if categorical_columns > 0 {
        insights.push(format!(
            "Found {categorical_columns} categorical column(s) for distribution analysis"
        ));
    }
    if total_rows > PREVIEW_ROWS {
        insights.push(format!(
            "Large dataset detected - showing first {PREVIEW_ROWS} rows in table view"
        ));
    }
    insights
}

/// The three canned insights of the "no structured data" branch.
pub fn no_data_insights() -> Vec<String> {
    vec![
        "No structured data could be extracted from the file.".to_string(),
        "The file may contain unstructured text or be in an unsupported format.".to_string(),
        "Try uploading a CSV, Excel, or structured text file.".to_string(),
    ]
}
