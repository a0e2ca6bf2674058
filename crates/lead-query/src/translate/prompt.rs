//! System prompt for SQL translation.

use lead_model::{EMP_SIZE_NUM, REVENUE_SIZE, SchemaDescriptor};

/// Colloquial terms and the column each one maps to.
const TERM_MAPPINGS: [(&str, &str); 3] = [
    ("\"revenue\", \"annual revenue\", \"total revenue\"", REVENUE_SIZE),
    ("\"employee size\", \"headcount\"", EMP_SIZE_NUM),
    ("\"employees\", \"staff count\"", EMP_SIZE_NUM),
];

/// Renders the system prompt for a schema.
///
/// The output depends only on the descriptor. Term mappings are listed only
/// for target columns the schema actually has.
pub fn render_system_prompt(schema: &SchemaDescriptor) -> String {
    let relation = &schema.relation;
    let columns = schema.describe_columns();
    let samples = schema.render_sample_rows();

    let mappings: Vec<String> = TERM_MAPPINGS
        .iter()
        .filter(|(_, column)| schema.has_column(column))
        .map(|(terms, column)| format!("    - {terms} -> \"{column}\""))
        .collect();
    let mapping_rule = if mappings.is_empty() {
        "10. Only map general terms to columns that exist in the schema above.".to_string()
    } else {
        format!(
            "10. Map general terms to the actual column names:\n{}",
            mappings.join("\n")
        )
    };

    let emp_rule = if schema.has_column(EMP_SIZE_NUM) {
        format!(
            "1. If a column contains ranges like \"1001-5000\" or \"10,001+\", use the \"{EMP_SIZE_NUM}\" column for numeric filtering.\n\
             2. If employee size is missing but revenue exists, \"{EMP_SIZE_NUM}\" may have been inferred from revenue."
        )
    } else {
        "1. Columns with ranges like \"1001-5000\" are text; filter them with ILIKE.\n\
         2. Do not reference an employee-size number column; none exists."
            .to_string()
    };

    format!(
        r#"You are a smart SQL assistant that converts natural language into precise SQL queries for Polars SQL.

### CONTEXT:
You will be working with a table named: {relation}
This table was loaded from a CSV/XLS file, so column types may vary (dates as strings, numbers with symbols).
The user may not know exact column names or data types; interpret intent and output valid SQL.

### RULES FOR WRITING SQL:
- Always use only the table name: {relation}
- Wrap all column names in double quotes
- Do NOT guess column names; only use those provided
- Ensure the SQL is compatible with Polars SQL syntax

### COLUMN METADATA:
{columns}

### SAMPLE ROWS:
{samples}

### SPECIAL HANDLING RULES:
{emp_rule}
3. For partial text matches (job titles, industries), use ILIKE '%keyword%'.
4. For boolean-like values ("is verified", "has funding"), match 'yes', 'true' or 1.
5. When comparing string columns, CAST first: dates with CAST("Last Funding Date" AS DATE), numbers with CAST("Revenue Size" AS DOUBLE).
6. For windows like "last 60 days", use CAST("Last Funding Date" AS DATE) >= CURRENT_DATE - INTERVAL '60 days'.
7. Always cast before numeric or date comparisons.
8. Handle missing values with IS NOT NULL where needed.
9. Combine multiple conditions with AND/OR using parentheses.
{mapping_rule}
11. When the question filters leads by an attribute, return whole rows with SELECT * instead of projecting single columns.

### OUTPUT FORMAT:
Respond with only the SQL query (no markdown, no extra text, no explanations)."#
    )
}

#[cfg(test)]
mod tests {
    use lead_model::{ColumnSchema, SampleRow};
    use serde_json::Value;

    use super::*;

    fn schema(columns: &[(&str, &str)]) -> SchemaDescriptor {
        let mut row = SampleRow::default();
        row.push("Company", Value::from("Acme"));
        SchemaDescriptor {
            relation: "leads".to_string(),
            columns: columns
                .iter()
                .map(|(name, dtype)| ColumnSchema::new(*name, *dtype))
                .collect(),
            sample_rows: vec![row],
        }
    }

    #[test]
    fn test_prompt_embeds_schema_and_samples() {
        let prompt = render_system_prompt(&schema(&[("Company", "str"), ("Revenue Size", "f64")]));

        assert!(prompt.contains("table named: leads"));
        assert!(prompt.contains("- \"Company\" (str)\n- \"Revenue Size\" (f64)"));
        assert!(prompt.contains("{\"Company\": \"Acme\"}"));
        assert!(prompt.contains("ILIKE '%keyword%'"));
        assert!(prompt.contains(
            "CAST(\"Last Funding Date\" AS DATE) >= CURRENT_DATE - INTERVAL '60 days'"
        ));
        assert!(!prompt.contains("AS TIMESTAMP"));
        assert!(prompt.ends_with("no extra text, no explanations)."));
    }

    #[test]
    fn test_mappings_follow_present_columns() {
        let with_revenue = render_system_prompt(&schema(&[("Revenue Size", "f64")]));
        assert!(with_revenue.contains("-> \"Revenue Size\""));
        assert!(!with_revenue.contains("-> \"Emp Size Num\""));

        let with_both = render_system_prompt(&schema(&[
            ("Revenue Size", "f64"),
            ("Emp Size Num", "i64"),
        ]));
        assert!(with_both.contains("\"headcount\" -> \"Emp Size Num\""));
        assert!(!with_both.contains("company size"));

        let with_neither = render_system_prompt(&schema(&[("Company", "str")]));
        assert!(!with_neither.contains(" -> "));
    }

    #[test]
    fn test_prompt_is_deterministic() {
        let descriptor = schema(&[("Company", "str")]);
        assert_eq!(
            render_system_prompt(&descriptor),
            render_system_prompt(&descriptor)
        );
    }
}
