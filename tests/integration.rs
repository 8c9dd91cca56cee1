//! Integration tests for the Parafiscal Calculation Engine.
//!
//! This test suite covers the quotation flow end to end:
//! - Traditional vs structured scenarios and savings
//! - Proportional and fixed bonus allocation
//! - Statutory ceiling validation and excess redistribution
//! - Progressive and flat commission schedules
//! - Error cases

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use rust_decimal::Decimal;
use serde_json::{json, Value};
use std::str::FromStr;
use tower::ServiceExt;

use parafiscal_engine::api::{create_router, AppState};
use parafiscal_engine::calculation::{allocate_fixed, redistribute_excess, validate_allocation};
use parafiscal_engine::config::ConfigLoader;
use parafiscal_engine::models::Employee;

// =============================================================================
// Test Helpers
// =============================================================================

fn create_test_state() -> AppState {
    let config = ConfigLoader::load("./config/co_2025").expect("Failed to load config");
    AppState::new(config)
}

fn create_router_for_test() -> Router {
    create_router(create_test_state())
}

fn decimal(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

async fn post_json(router: Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let response = router
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("Content-Type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json)
}

fn sample_employees() -> Value {
    json!([
        {"id": "emp_001", "name": "Ana Torres", "salary": "3000000"},
        {"id": "emp_002", "name": "Luis Gómez", "salary": "4000000"},
        {"id": "emp_003", "name": "Marta Ruiz", "salary": "5000000"}
    ])
}

fn create_quote_request(allocation: Value, auto_redistribute: bool) -> Value {
    json!({
        "employees": sample_employees(),
        "salary_percentage": "70",
        "risk_class": "III",
        "allocation": allocation,
        "auto_redistribute": auto_redistribute,
        "fee_schedule": "discretionary_bonus"
    })
}

/// Asserts a decimal-as-string JSON field equals `expected`, ignoring scale.
fn assert_decimal(value: &Value, expected: &str) {
    let actual = value
        .as_str()
        .unwrap_or_else(|| panic!("Expected a decimal string, got {}", value));
    assert_eq!(
        decimal(actual),
        decimal(expected),
        "Expected {}, got {}",
        expected,
        actual
    );
}

fn sample_roster() -> Vec<Employee> {
    vec![
        Employee::new("emp_001", "Ana Torres", decimal("3000000")),
        Employee::new("emp_002", "Luis Gómez", decimal("4000000")),
        Employee::new("emp_003", "Marta Ruiz", decimal("5000000")),
    ]
}

// =============================================================================
// SECTION 1: Scenarios and Savings
// =============================================================================

#[tokio::test]
async fn test_70_30_split_scenarios() {
    // 12M total compensation, 30% redirected to exempt bonus
    let router = create_router_for_test();
    let request = create_quote_request(json!({"method": "proportional"}), false);

    let (status, result) = post_json(router, "/quote", request).await;

    assert_eq!(status, StatusCode::OK);
    let traditional = &result["savings"]["traditional"];
    let structured = &result["savings"]["structured"];
    assert_decimal(&traditional["total_compensation"], "12000000");
    assert_decimal(&traditional["salary_percentage"], "100");
    assert_decimal(&traditional["bonus_percentage"], "0");
    assert_decimal(&structured["salary_base_total"], "8400000");
    assert_decimal(&structured["bonus_total"], "3600000");
    assert_decimal(&structured["bonus_percentage"], "30");
}

#[tokio::test]
async fn test_savings_match_contribution_difference() {
    // Class III: 8.5 + 12 + 2.436 + 2 + 3 + 4 = 31.936%
    // 12M x 31.936% = 3,832,320; 8.4M x 31.936% = 2,682,624
    let router = create_router_for_test();
    let request = create_quote_request(json!({"method": "proportional"}), false);

    let (_, result) = post_json(router, "/quote", request).await;

    assert_decimal(&result["savings"]["traditional"]["contributions"]["total"], "3832320");
    assert_decimal(&result["savings"]["structured"]["contributions"]["total"], "2682624");
    assert_decimal(&result["savings"]["structured"]["contributions"]["work_injury"], "204624");
    assert_decimal(&result["summary"]["monthly_savings"], "1149696");
    assert_decimal(&result["summary"]["annual_savings"], "13796352");
    assert_decimal(&result["summary"]["percentage_reduction"], "30");
}

#[tokio::test]
async fn test_lower_risk_class_saves_less() {
    let router = create_router_for_test();
    let mut request = create_quote_request(json!({"method": "proportional"}), false);
    request["risk_class"] = json!("I");

    let (status, result) = post_json(router, "/quote", request).await;

    // Class I: 30.022% of the 3.6M moved out of the base
    assert_eq!(status, StatusCode::OK);
    assert_decimal(&result["summary"]["monthly_savings"], "1080792");
}

// =============================================================================
// SECTION 2: Allocation, Validation and Redistribution
// =============================================================================

#[tokio::test]
async fn test_proportional_allocation_clamps_at_statutory_ceiling() {
    // Shares of 3.6M: 900,000 / 1,200,000 / 1,500,000; ceiling 1,423,500
    let router = create_router_for_test();
    let request = create_quote_request(json!({"method": "proportional"}), false);

    let (_, result) = post_json(router, "/quote", request).await;

    let assignments = result["assignments"].as_array().unwrap();
    assert_decimal(&assignments[0]["allocated_bonus"], "900000");
    assert_decimal(&assignments[1]["allocated_bonus"], "1200000");
    assert_decimal(&assignments[2]["allocated_bonus"], "1423500");
    assert_eq!(assignments[2]["exceeds_cap"], true);
    assert_decimal(&assignments[2]["excess_amount"], "76500");

    assert_eq!(result["validation"]["valid"], false);
    assert_decimal(&result["validation"]["total_excess"], "76500");
    assert!(result["redistribution"].is_null());
    assert_decimal(&result["summary"]["bonus_pool"], "3523500");
    assert_eq!(result["audit_trace"]["warnings"][0]["code"], "CAP_EXCEEDED");
}

#[tokio::test]
async fn test_redistribution_places_excess_by_headroom() {
    // Headroom 523,500 and 223,500 absorb 76,500
    let router = create_router_for_test();
    let request = create_quote_request(json!({"method": "proportional"}), true);

    let (_, result) = post_json(router, "/quote", request).await;

    let redistribution = &result["redistribution"];
    assert_decimal(&redistribution["redistributed_amount"], "76500");
    assert_decimal(&redistribution["undistributed_amount"], "0");

    let repaired = redistribution["assignments"].as_array().unwrap();
    assert_decimal(&repaired[0]["allocated_bonus"], "953611.45");
    assert_decimal(&repaired[1]["allocated_bonus"], "1222888.55");
    assert_decimal(&repaired[2]["allocated_bonus"], "1423500");
    assert!(repaired.iter().all(|a| a["exceeds_cap"] == false));

    assert_decimal(&result["summary"]["bonus_pool"], "3600000");
    assert!(result["audit_trace"]["warnings"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_uncapped_allocation_still_reports_violation() {
    let router = create_router_for_test();
    let mut request = create_quote_request(json!({"method": "proportional"}), false);
    request["cap_at_ceiling"] = json!(false);

    let (_, result) = post_json(router, "/quote", request).await;

    let assignments = result["assignments"].as_array().unwrap();
    assert_decimal(&assignments[2]["allocated_bonus"], "1500000");
    assert_eq!(result["validation"]["valid"], false);
    assert_decimal(&result["validation"]["violations"][0]["excess_amount"], "76500");
    assert_decimal(&result["summary"]["bonus_pool"], "3600000");
}

#[tokio::test]
async fn test_uncapped_allocation_is_repaired_by_redistribution() {
    let router = create_router_for_test();
    let mut request = create_quote_request(json!({"method": "proportional"}), true);
    request["cap_at_ceiling"] = json!(false);

    let (status, result) = post_json(router, "/quote", request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(result["validation"]["valid"], false);
    let redistribution = &result["redistribution"];
    assert_decimal(&redistribution["redistributed_amount"], "76500");
    assert_decimal(&redistribution["undistributed_amount"], "0");
    let assignments = redistribution["assignments"].as_array().unwrap();
    assert_decimal(&assignments[0]["allocated_bonus"], "953611.45");
    assert_decimal(&assignments[1]["allocated_bonus"], "1222888.55");
    assert_decimal(&assignments[2]["allocated_bonus"], "1423500");
    assert_decimal(&result["summary"]["bonus_pool"], "3600000");
    assert!(result["audit_trace"]["warnings"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_uncapped_fixed_allocation_without_headroom_is_not_double_counted() {
    let router = create_router_for_test();
    let mut request = create_quote_request(
        json!({"method": "fixed", "amount_per_employee": "1500000"}),
        true,
    );
    request["cap_at_ceiling"] = json!(false);

    let (status, result) = post_json(router, "/quote", request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(result["validation"]["valid"], false);
    let redistribution = &result["redistribution"];
    assert_decimal(&redistribution["redistributed_amount"], "0");
    assert_decimal(&redistribution["undistributed_amount"], "0");
    for assignment in redistribution["assignments"].as_array().unwrap() {
        assert_decimal(&assignment["allocated_bonus"], "1500000");
    }
    // Allocated plus unplaced must equal the nominal 3 x 1,500,000.
    assert_decimal(&result["summary"]["bonus_pool"], "4500000");
    let warnings = result["audit_trace"]["warnings"].as_array().unwrap();
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0]["code"], "CAP_EXCEEDED");
}

#[test]
fn test_unclamped_redistribution_without_headroom_keeps_nominal() {
    let assignments = allocate_fixed(&sample_roster(), decimal("600000"), None).unwrap();

    let result = redistribute_excess(&assignments, decimal("500000"));
    let allocated: Decimal = result.assignments.iter().map(|a| a.allocated_bonus).sum();

    assert_eq!(result.assignments, assignments);
    assert_eq!(result.undistributed_amount, Decimal::ZERO);
    assert_eq!(allocated + result.undistributed_amount, decimal("1800000"));
}

#[test]
fn test_fixed_allocation_above_ceiling_is_clamped_and_flagged() {
    // Fixed 600,000 per head with a 500,000 ceiling
    let assignments =
        allocate_fixed(&sample_roster(), decimal("600000"), Some(decimal("500000"))).unwrap();

    for assignment in &assignments {
        assert_eq!(assignment.allocated_bonus, decimal("500000"));
        assert!(assignment.exceeds_cap);
        assert_eq!(assignment.excess_amount, decimal("100000"));
    }

    let validation = validate_allocation(&assignments, decimal("500000"));
    assert!(!validation.valid);
    assert_eq!(validation.violations.len(), 3);
    assert_eq!(validation.total_excess, decimal("300000"));
}

#[test]
fn test_redistribution_without_headroom_returns_input_unchanged() {
    let assignments =
        allocate_fixed(&sample_roster(), decimal("600000"), Some(decimal("500000"))).unwrap();

    let result = redistribute_excess(&assignments, decimal("500000"));

    assert_eq!(result.assignments, assignments);
    assert_eq!(result.redistributed_amount, Decimal::ZERO);
    assert_eq!(result.undistributed_amount, decimal("300000"));
}

#[tokio::test]
async fn test_fixed_quote_above_ceiling_leaves_excess_unplaced() {
    let router = create_router_for_test();
    let request = create_quote_request(
        json!({"method": "fixed", "amount_per_employee": "1500000"}),
        true,
    );

    let (status, result) = post_json(router, "/quote", request).await;

    assert_eq!(status, StatusCode::OK);
    assert_decimal(&result["redistribution"]["redistributed_amount"], "0");
    assert_decimal(&result["redistribution"]["undistributed_amount"], "229500");
    assert_decimal(&result["summary"]["bonus_pool"], "4270500");
    assert_eq!(
        result["audit_trace"]["warnings"][0]["code"],
        "EXCESS_UNDISTRIBUTED"
    );
}

// =============================================================================
// SECTION 3: Commission
// =============================================================================

#[tokio::test]
async fn test_fee_in_middle_bracket() {
    // 15M sits in [10M, 30M): 3.5% = 525,000, plus 19% tax = 99,750
    let router = create_router_for_test();
    let request = json!({"pool": "15000000", "schedule": "discretionary_bonus"});

    let (status, fee) = post_json(router, "/fee", request).await;

    assert_eq!(status, StatusCode::OK);
    assert_decimal(&fee["rate"], "0.035");
    assert_decimal(&fee["base_commission"], "525000");
    assert_decimal(&fee["tax"], "99750");
    assert_decimal(&fee["total"], "624750");
    assert_eq!(fee["tier_label"], "10M to 30M");
}

#[tokio::test]
async fn test_fee_bracket_boundaries_are_half_open() {
    let cases = [
        ("9999999.99", "0.04"),
        ("10000000", "0.035"),
        ("29999999.99", "0.035"),
        ("30000000", "0.025"),
        ("500000000", "0.025"),
    ];

    for (pool, expected_rate) in cases {
        let router = create_router_for_test();
        let (status, fee) = post_json(
            router,
            "/fee",
            json!({"pool": pool, "schedule": "discretionary_bonus"}),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_decimal(&fee["rate"], expected_rate);
    }
}

#[tokio::test]
async fn test_meal_subsidy_fee_is_flat() {
    let router = create_router_for_test();
    let request = json!({"pool": "50000000", "schedule": "meal_subsidy"});

    let (_, fee) = post_json(router, "/fee", request).await;

    assert_decimal(&fee["rate"], "0.03");
    assert_decimal(&fee["base_commission"], "1500000");
    assert_decimal(&fee["total"], "1785000");
}

#[tokio::test]
async fn test_quote_summary_against_commission() {
    // 3.6M at 4% = 144,000 + 27,360 tax = 171,360
    let router = create_router_for_test();
    let request = create_quote_request(json!({"method": "proportional"}), true);

    let (_, result) = post_json(router, "/quote", request).await;

    assert_decimal(&result["fee"]["total"], "171360");
    assert_decimal(&result["summary"]["commission_total"], "171360");
    assert_decimal(&result["summary"]["net_monthly_benefit"], "978336");
    assert_decimal(&result["summary"]["savings_to_commission_ratio"], "6.71");
    assert_eq!(result["summary"]["employee_count"], 3);
}

// =============================================================================
// SECTION 4: Audit Trace
// =============================================================================

#[tokio::test]
async fn test_quote_carries_audit_trace_and_metadata() {
    let router = create_router_for_test();
    let request = create_quote_request(json!({"method": "proportional"}), true);

    let (_, result) = post_json(router, "/quote", request).await;

    assert_eq!(result["ruleset_code"], "CO-2025");
    assert!(result["quotation_id"].as_str().is_some());
    let steps = result["audit_trace"]["steps"].as_array().unwrap();
    assert_eq!(steps.len(), 7);
    assert_eq!(steps[0]["rule_id"], "traditional_scenario");
    assert_eq!(steps[6]["rule_id"], "commission");
    assert!(steps.iter().all(|s| !s["reasoning"].as_str().unwrap().is_empty()));
}

// =============================================================================
// SECTION 5: Error Cases
// =============================================================================

#[tokio::test]
async fn test_negative_salary_is_rejected() {
    let router = create_router_for_test();
    let mut request = create_quote_request(json!({"method": "proportional"}), false);
    request["employees"][1]["salary"] = json!("-4000000");

    let (status, error) = post_json(router, "/quote", request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "INVALID_EMPLOYEE");
    assert!(error["message"].as_str().unwrap().contains("emp_002"));
}

#[tokio::test]
async fn test_salary_percentage_above_100_is_rejected() {
    let router = create_router_for_test();
    let mut request = create_quote_request(json!({"method": "proportional"}), false);
    request["salary_percentage"] = json!("150");

    let (status, error) = post_json(router, "/quote", request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "INVALID_PERCENTAGE");
}

#[tokio::test]
async fn test_negative_fixed_amount_is_rejected() {
    let router = create_router_for_test();
    let request = create_quote_request(
        json!({"method": "fixed", "amount_per_employee": "-1"}),
        false,
    );

    let (status, error) = post_json(router, "/quote", request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "INVALID_INPUT");
}

#[tokio::test]
async fn test_missing_allocation_is_validation_error() {
    let router = create_router_for_test();
    let request = json!({
        "employees": sample_employees(),
        "salary_percentage": "70",
        "risk_class": "III"
    });

    let (status, error) = post_json(router, "/quote", request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_empty_roster_quotes_to_zero() {
    let router = create_router_for_test();
    let mut request = create_quote_request(json!({"method": "proportional"}), true);
    request["employees"] = json!([]);

    let (status, result) = post_json(router, "/quote", request).await;

    assert_eq!(status, StatusCode::OK);
    assert!(result["assignments"].as_array().unwrap().is_empty());
    assert_eq!(result["validation"]["valid"], true);
    assert_decimal(&result["summary"]["monthly_savings"], "0");
    assert_decimal(&result["summary"]["commission_total"], "0");
}
