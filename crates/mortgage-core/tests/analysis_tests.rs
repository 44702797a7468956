use mortgage_core::affordability::ratios::EffortBand;
use mortgage_core::analysis::{analyze_mortgage, MortgageInput};
use pretty_assertions::assert_eq;
use rust_decimal_macros::dec;

// ===========================================================================
// Full pipeline from JSON input
// ===========================================================================

fn input_from_json(json: &str) -> MortgageInput {
    serde_json::from_str(json).unwrap()
}

#[test]
fn test_dashboard_defaults_end_to_end() {
    let input = input_from_json(
        r#"{
            "property_price": 200000,
            "down_payment_percent": 20,
            "term_years": 25,
            "annual_rate_percent": 3.0,
            "closing_costs": {},
            "net_monthly_income": 2500
        }"#,
    );
    let out = analyze_mortgage(&input).unwrap();
    let analysis = &out.result;

    assert_eq!(analysis.principal, dec!(160000));
    assert_eq!(analysis.ltv_percent, dec!(80));
    assert!((analysis.monthly_payment - dec!(758.74)).abs() < dec!(0.01));
    assert_eq!(analysis.closing_costs.as_ref().unwrap().total, dec!(5800));
    assert_eq!(
        analysis.financial_effort.as_ref().unwrap().band,
        EffortBand::Elevated
    );

    let terms: Vec<u32> = analysis
        .term_comparison
        .iter()
        .map(|t| t.row.term_years)
        .collect();
    assert_eq!(terms, vec![10, 15, 20, 25, 30, 35, 40]);
}

#[test]
fn test_output_serializes_flat_comparison_rows() {
    let input = input_from_json(
        r#"{
            "property_price": "150000",
            "down_payment_percent": "10",
            "term_years": 10,
            "annual_rate_percent": "2.5",
            "comparison_terms": [10, 20]
        }"#,
    );
    let out = analyze_mortgage(&input).unwrap();
    let value = serde_json::to_value(&out).unwrap();

    let first = &value["result"]["term_comparison"][0];
    assert_eq!(first["term_years"], serde_json::json!(10));
    assert_eq!(first["is_selected"], serde_json::json!(true));
    assert!(first.get("monthly_payment").is_some());
    assert!(value["result"].get("closing_costs").is_none());
    assert_eq!(value["assumptions"]["term_years"], serde_json::json!(10));
}

#[test]
fn test_analysis_is_repeatable() {
    let input = input_from_json(
        r#"{
            "property_price": 350000,
            "down_payment_percent": 25,
            "term_years": 30,
            "annual_rate_percent": 4.1
        }"#,
    );
    let a = analyze_mortgage(&input).unwrap().result;
    let b = analyze_mortgage(&input).unwrap().result;
    assert_eq!(a.schedule, b.schedule);
    assert_eq!(a.term_comparison, b.term_comparison);
    assert_eq!(a.total_interest, b.total_interest);
}
