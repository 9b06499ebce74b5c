//! JSON bodies as the backend spells them, and the one place where local
//! camelCase names meet wire snake_case names.

use serde::{Deserialize, Serialize};

use crate::core::{
    DiagnosisInput, DiagnosisResult, PortfolioAllocation, SimulationParams, SimulationPoint,
    SimulationResult,
};

/// `(local name, wire name)` pairs. Each table is total for its body.
/// The `From` impls below do the translation; tests hold them to these tables.
pub type FieldMap = &'static [(&'static str, &'static str)];

pub const DIAGNOSE_REQUEST_FIELDS: FieldMap = &[
    ("bankBalance", "bank_balance"),
    ("monthlySurplus", "monthly_surplus"),
];

pub const DIAGNOSE_RESPONSE_FIELDS: FieldMap = &[
    ("investAmount", "invest_amount"),
    ("targetName", "target_name"),
    ("keepAmount", "keep_amount"),
    ("advice", "advice"),
];

pub const SIMULATE_REQUEST_FIELDS: FieldMap = &[
    ("age", "age"),
    ("monthlyInvestment", "monthly_investment"),
    ("riskTolerance", "risk_tolerance"),
    ("initialAssets", "initial_assets"),
];

pub const SIMULATE_RESPONSE_FIELDS: FieldMap = &[("points", "results"), ("portfolio", "portfolio")];

pub const SIMULATE_POINT_FIELDS: FieldMap = &[
    ("year", "year"),
    ("age", "age"),
    ("p10", "p10"),
    ("p50", "p50"),
    ("p90", "p90"),
    ("shock", "shock"),
];

pub const PORTFOLIO_FIELDS: FieldMap = &[
    ("name", "name"),
    ("allocations", "allocations"),
    ("description", "description"),
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiagnoseRequest {
    pub bank_balance: f64,
    pub monthly_surplus: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiagnoseResponse {
    pub invest_amount: f64,
    pub target_name: String,
    pub keep_amount: f64,
    pub advice: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulateRequest {
    pub age: u32,
    pub monthly_investment: f64,
    pub risk_tolerance: u32,
    pub initial_assets: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulatePoint {
    // The backend models these as integers; a float such as `30.0` is a decode failure.
    pub year: u32,
    pub age: u32,
    pub p10: f64,
    pub p50: f64,
    pub p90: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shock: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Portfolio {
    pub name: String,
    pub allocations: Vec<String>,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulateResponse {
    pub results: Vec<SimulatePoint>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub portfolio: Option<Portfolio>,
}

impl From<&DiagnosisInput> for DiagnoseRequest {
    fn from(value: &DiagnosisInput) -> Self {
        Self {
            bank_balance: value.bank_balance,
            monthly_surplus: value.monthly_surplus,
        }
    }
}

impl From<DiagnoseRequest> for DiagnosisInput {
    fn from(value: DiagnoseRequest) -> Self {
        Self {
            bank_balance: value.bank_balance,
            monthly_surplus: value.monthly_surplus,
        }
    }
}

impl From<DiagnoseResponse> for DiagnosisResult {
    fn from(value: DiagnoseResponse) -> Self {
        Self {
            invest_amount: value.invest_amount,
            target_name: value.target_name,
            keep_amount: value.keep_amount,
            advice: value.advice,
        }
    }
}

impl From<&DiagnosisResult> for DiagnoseResponse {
    fn from(value: &DiagnosisResult) -> Self {
        Self {
            invest_amount: value.invest_amount,
            target_name: value.target_name.clone(),
            keep_amount: value.keep_amount,
            advice: value.advice.clone(),
        }
    }
}

impl From<&SimulationParams> for SimulateRequest {
    fn from(value: &SimulationParams) -> Self {
        Self {
            age: value.age,
            monthly_investment: value.monthly_investment,
            risk_tolerance: value.risk_tolerance,
            initial_assets: value.initial_assets,
        }
    }
}

impl From<SimulateRequest> for SimulationParams {
    fn from(value: SimulateRequest) -> Self {
        Self {
            age: value.age,
            monthly_investment: value.monthly_investment,
            risk_tolerance: value.risk_tolerance,
            initial_assets: value.initial_assets,
        }
    }
}

impl From<SimulatePoint> for SimulationPoint {
    fn from(value: SimulatePoint) -> Self {
        Self {
            year: value.year,
            age: value.age,
            p10: value.p10,
            p50: value.p50,
            p90: value.p90,
            shock: value.shock,
        }
    }
}

impl From<&SimulationPoint> for SimulatePoint {
    fn from(value: &SimulationPoint) -> Self {
        Self {
            year: value.year,
            age: value.age,
            p10: value.p10,
            p50: value.p50,
            p90: value.p90,
            shock: value.shock,
        }
    }
}

impl From<Portfolio> for PortfolioAllocation {
    fn from(value: Portfolio) -> Self {
        Self {
            name: value.name,
            allocations: value.allocations,
            description: value.description,
        }
    }
}

impl From<&PortfolioAllocation> for Portfolio {
    fn from(value: &PortfolioAllocation) -> Self {
        Self {
            name: value.name.clone(),
            allocations: value.allocations.clone(),
            description: value.description.clone(),
        }
    }
}

impl From<SimulateResponse> for SimulationResult {
    fn from(value: SimulateResponse) -> Self {
        Self {
            points: value.results.into_iter().map(SimulationPoint::from).collect(),
            portfolio: value.portfolio.map(PortfolioAllocation::from),
        }
    }
}

impl From<&SimulationResult> for SimulateResponse {
    fn from(value: &SimulationResult) -> Self {
        Self {
            results: value.points.iter().map(SimulatePoint::from).collect(),
            portfolio: value.portfolio.as_ref().map(Portfolio::from),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Serialize;
    use serde_json::Value;
    use std::collections::BTreeSet;

    fn keys<T: Serialize>(value: &T) -> BTreeSet<String> {
        match serde_json::to_value(value).expect("serializable") {
            Value::Object(map) => map.keys().cloned().collect(),
            other => panic!("expected an object, got {other}"),
        }
    }

    fn assert_table_matches<L: Serialize, W: Serialize>(table: FieldMap, local: &L, wire: &W) {
        let local_names: BTreeSet<String> = table.iter().map(|(l, _)| l.to_string()).collect();
        let wire_names: BTreeSet<String> = table.iter().map(|(_, w)| w.to_string()).collect();
        assert_eq!(local_names.len(), table.len(), "duplicate local name");
        assert_eq!(wire_names.len(), table.len(), "duplicate wire name");
        assert_eq!(keys(local), local_names);
        assert_eq!(keys(wire), wire_names);
    }

    fn sample_point() -> SimulationPoint {
        SimulationPoint {
            year: 5,
            age: 35,
            p10: 2_100_000.0,
            p50: 3_400_000.0,
            p90: 5_250_000.5,
            shock: Some(1_900_000.0),
        }
    }

    fn sample_portfolio() -> PortfolioAllocation {
        PortfolioAllocation {
            name: "Aggressive Strategy".to_string(),
            allocations: vec!["Global Stocks (All Country): 100%".to_string()],
            description: "Long horizon, high volatility.".to_string(),
        }
    }

    #[test]
    fn diagnose_tables_cover_every_field() {
        let input = DiagnosisInput {
            bank_balance: 1_500_000.0,
            monthly_surplus: 35_000.0,
        };
        assert_table_matches(DIAGNOSE_REQUEST_FIELDS, &input, &DiagnoseRequest::from(&input));

        let result = DiagnosisResult {
            invest_amount: 45_000.0,
            target_name: "eMAXIS Slim All Country".to_string(),
            keep_amount: 0.0,
            advice: "Start small.".to_string(),
        };
        assert_table_matches(
            DIAGNOSE_RESPONSE_FIELDS,
            &result,
            &DiagnoseResponse::from(&result),
        );
    }

    #[test]
    fn simulate_tables_cover_every_field() {
        let params = SimulationParams {
            age: 30,
            monthly_investment: 50_000.0,
            risk_tolerance: 70,
            initial_assets: 0.0,
        };
        assert_table_matches(SIMULATE_REQUEST_FIELDS, &params, &SimulateRequest::from(&params));

        let point = sample_point();
        assert_table_matches(SIMULATE_POINT_FIELDS, &point, &SimulatePoint::from(&point));

        let portfolio = sample_portfolio();
        assert_table_matches(PORTFOLIO_FIELDS, &portfolio, &Portfolio::from(&portfolio));

        let result = SimulationResult {
            points: vec![point],
            portfolio: Some(portfolio),
        };
        assert_table_matches(
            SIMULATE_RESPONSE_FIELDS,
            &result,
            &SimulateResponse::from(&result),
        );
    }

    #[test]
    fn local_to_wire_to_local_is_lossless() {
        let input = DiagnosisInput {
            bank_balance: 1_234_567.89,
            monthly_surplus: 0.5,
        };
        assert_eq!(DiagnosisInput::from(DiagnoseRequest::from(&input)), input);

        let params = SimulationParams {
            age: 80,
            monthly_investment: 12_345.678,
            risk_tolerance: 0,
            initial_assets: 9_999_999.0,
        };
        assert_eq!(SimulationParams::from(SimulateRequest::from(&params)), params);

        let result = SimulationResult {
            points: vec![sample_point(), SimulationPoint { shock: None, ..sample_point() }],
            portfolio: Some(sample_portfolio()),
        };
        assert_eq!(SimulationResult::from(SimulateResponse::from(&result)), result);
    }

    #[test]
    fn diagnose_response_maps_without_transforming_values() {
        let body = r#"{
          "invest_amount": 45000,
          "target_name": "eMAXIS Slim All Country",
          "keep_amount": 1200000,
          "advice": "Keep the emergency fund, invest the surplus."
        }"#;
        let wire: DiagnoseResponse = serde_json::from_str(body).expect("valid body");
        let result = DiagnosisResult::from(wire);
        assert_eq!(result.invest_amount, 45_000.0);
        assert_eq!(result.target_name, "eMAXIS Slim All Country");
        assert_eq!(result.keep_amount, 1_200_000.0);
        assert_eq!(result.advice, "Keep the emergency fund, invest the surplus.");
    }

    #[test]
    fn request_bodies_use_wire_names_and_unrounded_values() {
        let body = serde_json::to_value(DiagnoseRequest::from(&DiagnosisInput {
            bank_balance: 1_500_000.4,
            monthly_surplus: 35_000.0,
        }))
        .expect("serializable");
        assert_eq!(
            body,
            serde_json::json!({ "bank_balance": 1_500_000.4, "monthly_surplus": 35_000.0 })
        );
    }

    #[test]
    fn simulate_response_accepts_minimal_body_and_ignores_extras() {
        let body = r#"{
          "results": [
            {"year": 0, "age": 30, "p10": 100, "p50": 200, "p90": 300},
            {"year": 1, "age": 31, "p10": 110, "p50": 210, "p90": 310, "note": "extra"}
          ]
        }"#;
        let wire: SimulateResponse = serde_json::from_str(body).expect("valid body");
        let result = SimulationResult::from(wire);
        assert_eq!(result.points.len(), 2);
        assert_eq!(result.points[1].p90, 310.0);
        assert!(result.portfolio.is_none());
    }

    #[test]
    fn missing_field_is_a_decode_failure() {
        let body = r#"{"invest_amount": 1, "keep_amount": 0, "advice": ""}"#;
        assert!(serde_json::from_str::<DiagnoseResponse>(body).is_err());
        assert!(serde_json::from_str::<SimulateResponse>(r#"{"points": []}"#).is_err());
    }

    #[test]
    fn year_and_age_must_be_integers() {
        let body = r#"{"results": [{"year": 0, "age": 30.0, "p10": 1, "p50": 2, "p90": 3}]}"#;
        assert!(serde_json::from_str::<SimulateResponse>(body).is_err());
        let body = r#"{"results": [{"year": 0, "age": 30, "p10": 1, "p50": 2, "p90": 3}]}"#;
        let wire: SimulateResponse = serde_json::from_str(body).expect("integer age");
        assert_eq!(wire.results[0].age, 30);
    }
}
