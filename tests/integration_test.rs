//! Integration tests for the DAX template renderer

use chat_with_data::{classify, render, GroupColumn, Schema};
use serde_json::json;

fn fixture_schema() -> Schema {
    Schema::load("tests/fixtures/pbi_schema.json").expect("load fixture schema")
}

#[test]
fn test_top_regions_example() {
    let question = "What are the top regions by sales?";
    let result = render(question, &fixture_schema());

    assert!(result.success);
    let dax = result.dax_query.expect("dax query");
    assert!(dax.contains("TOPN(\n    5,"), "unexpected DAX: {dax}");
    assert!(dax.contains("'Geography'[Region]"));
    assert_eq!(
        result.answer,
        "Showing top 5 groups based on total sales for your question: \
         'What are the top regions by sales?'"
    );
    assert!(result.error.is_none());
}

#[test]
fn test_sales_by_city_example() {
    let result = render("Show sales by city", &fixture_schema());

    assert!(result.success);
    let dax = result.dax_query.expect("dax query");
    assert!(dax.starts_with("EVALUATE\nSUMMARIZECOLUMNS(\n    'Geography'[City],"));
    assert!(!dax.contains("TOPN"));
    assert_eq!(
        result.answer,
        "Showing total sales grouped by location for your question: 'Show sales by city'"
    );
}

#[test]
fn test_top_n_keywords_any_case() {
    let schema = fixture_schema();
    for question in [
        "TOP cities",
        "Which city has the Highest revenue",
        "where do we sell MOST",
        "top 10 regions please",
    ] {
        let result = render(question, &schema);
        assert!(result.answer.contains("top 5"), "{question}: {}", result.answer);
        assert!(result.dax_query.unwrap().contains("TOPN"));
    }

    for question in ["Show sales by city", "Revenue per region", "sales"] {
        let result = render(question, &schema);
        assert!(!result.answer.contains("top 5"), "{question}: {}", result.answer);
        assert!(!result.dax_query.unwrap().contains("TOPN"));
    }
}

#[test]
fn test_grouping_column_precedence() {
    let schema = fixture_schema();
    let cases = [
        ("sales by REGION", "'Geography'[Region]"),
        ("compare each city and region", "'Geography'[Region]"),
        ("sales by City", "'Geography'[City]"),
        ("total sales", "'Geography'[City]"),
    ];

    for (question, column) in cases {
        let dax = render(question, &schema).dax_query.expect("dax query");
        assert!(dax.contains(column), "{question} should group by {column}");
    }

    assert_eq!(classify("by region and city").group_by, GroupColumn::Region);
}

#[test]
fn test_measure_is_fixed() {
    let dax = render("anything", &fixture_schema()).dax_query.unwrap();
    assert!(dax.contains("\"Total Sales\", SUM('Sales'[SalesAmount])"));
}

#[test]
fn test_question_echoed_verbatim() {
    let question = "Top cities for 'Contoso' <b>now</b>";
    let result = render(question, &fixture_schema());
    assert!(result.answer.ends_with(&format!("'{question}'")));
}

#[test]
fn test_render_is_deterministic() {
    let schema = fixture_schema();
    let a = render("Which region sells the most?", &schema);
    let b = render("Which region sells the most?", &schema);
    assert_eq!(a, b, "render should be a pure function of its inputs");
}

#[test]
fn test_array_root_schema_fails_generation() {
    let schema = Schema::from_value(json!([{ "name": "Sales" }]));
    let result = render("top regions", &schema);

    assert!(!result.success);
    assert_eq!(result.answer, "Could not generate DAX query");
    assert!(result.dax_query.is_none());
    assert!(result.error.is_some());
}

#[test]
fn test_table_name_value_is_not_validated() {
    let schema = Schema::from_value(json!({ "tables": [{ "name": 5 }] }));
    let result = render("top regions", &schema);

    assert!(result.success);
    assert_eq!(result.dax_query, render("top regions", &fixture_schema()).dax_query);
}

#[test]
fn test_empty_or_missing_tables_still_render() {
    for schema in [json!({}), json!({ "tables": {} }), json!({ "tables": "" })] {
        assert!(render("sales by city", &Schema::from_value(schema)).success);
    }
    assert!(!render("sales by city", &Schema::from_value(json!(7))).success);
}
