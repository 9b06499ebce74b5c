//! Result screens. Pure functions of the result value; they hold no state of their own.

use std::fmt::Write as _;

use super::flow::{Form, Phase, Screen};
use super::format::format_yen;
use super::types::{DiagnosisResult, PortfolioAllocation, SimulationPoint, SimulationResult};

pub const LOADING_MESSAGE: &str = "Calculating the best allocation...";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagnosisView {
    pub invest_amount: String,
    pub target_name: String,
    /// Absent when there is nothing to keep aside.
    pub keep_amount: Option<String>,
    pub advice: String,
}

impl From<&DiagnosisResult> for DiagnosisView {
    fn from(result: &DiagnosisResult) -> Self {
        Self {
            invest_amount: format_yen(result.invest_amount),
            target_name: result.target_name.clone(),
            keep_amount: (result.keep_amount > 0.0).then(|| format_yen(result.keep_amount)),
            advice: result.advice.clone(),
        }
    }
}

impl DiagnosisView {
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        out.push_str("== Priority action ==\n");
        let _ = writeln!(out, "Place this order: {}", self.invest_amount);
        let _ = writeln!(out, "Target: {}", self.target_name);
        if let Some(keep) = &self.keep_amount {
            out.push_str("== Do not touch ==\n");
            let _ = writeln!(out, "Keep as cash: {keep}");
        }
        out.push_str("== Advice ==\n");
        out.push_str(&self.advice);
        out.push('\n');
        out
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Band {
    P90,
    P50,
    P10,
    Shock,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Stroke {
    /// Solid line over a filled area.
    Filled,
    /// Dashed line, no fill.
    Dashed,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Series {
    pub band: Band,
    pub label: &'static str,
    pub column: &'static str,
    pub stroke: Stroke,
}

const OPTIMISTIC: Series = Series {
    band: Band::P90,
    label: "Optimistic (top 10%)",
    column: "Optimistic",
    stroke: Stroke::Filled,
};
const MEDIAN: Series = Series {
    band: Band::P50,
    label: "Median",
    column: "Median",
    stroke: Stroke::Filled,
};
const CONSERVATIVE: Series = Series {
    band: Band::P10,
    label: "Conservative (bottom 10%)",
    column: "Conservative",
    stroke: Stroke::Dashed,
};
const MARKET_SHOCK: Series = Series {
    band: Band::Shock,
    label: "Market shock",
    column: "Shock",
    stroke: Stroke::Dashed,
};

#[derive(Debug, Clone, PartialEq)]
pub struct ChartView {
    pub series: Vec<Series>,
    /// Points exactly as received, in received order.
    pub points: Vec<SimulationPoint>,
    pub portfolio: Option<PortfolioAllocation>,
}

impl From<&SimulationResult> for ChartView {
    fn from(result: &SimulationResult) -> Self {
        let mut series = vec![OPTIMISTIC, MEDIAN, CONSERVATIVE];
        if result.points.iter().any(|p| p.shock.is_some()) {
            series.push(MARKET_SHOCK);
        }
        Self {
            series,
            points: result.points.clone(),
            portfolio: result.portfolio.clone(),
        }
    }
}

fn band_value(point: &SimulationPoint, band: Band) -> Option<f64> {
    match band {
        Band::P90 => Some(point.p90),
        Band::P50 => Some(point.p50),
        Band::P10 => Some(point.p10),
        Band::Shock => point.shock,
    }
}

const AGE_WIDTH: usize = 5;
const MONEY_WIDTH: usize = 16;

impl ChartView {
    pub fn value(&self, index: usize, band: Band) -> Option<f64> {
        self.points.get(index).and_then(|p| band_value(p, band))
    }

    pub fn render_text(&self) -> String {
        let mut out = String::new();
        out.push_str("== Future asset projection ==\n");
        for series in &self.series {
            let style = match series.stroke {
                Stroke::Filled => "filled",
                Stroke::Dashed => "dashed",
            };
            let _ = writeln!(out, "  {} [{style}]", series.label);
        }

        let _ = write!(out, "{:>AGE_WIDTH$}", "Age");
        for series in &self.series {
            let _ = write!(out, " {:>MONEY_WIDTH$}", series.column);
        }
        out.push('\n');

        for point in &self.points {
            let _ = write!(out, "{:>AGE_WIDTH$}", point.age);
            for series in &self.series {
                let cell = band_value(point, series.band)
                    .map(format_yen)
                    .unwrap_or_else(|| "-".to_string());
                let _ = write!(out, " {cell:>MONEY_WIDTH$}");
            }
            out.push('\n');
        }

        if let Some(portfolio) = &self.portfolio {
            let _ = writeln!(out, "== {} ==", portfolio.name);
            for line in &portfolio.allocations {
                let _ = writeln!(out, "  - {line}");
            }
            out.push_str(&portfolio.description);
            out.push('\n');
        }
        out
    }
}

/// Text for whatever phase a screen is in.
pub fn render_screen<F: Form, R>(
    screen: &Screen<F, R>,
    render_result: impl Fn(&R) -> String,
) -> String {
    match (screen.phase(), screen.result()) {
        (Phase::Loading, _) => format!("{LOADING_MESSAGE}\n"),
        (Phase::Result, Some(result)) => render_result(result),
        _ => screen
            .notice()
            .map(|notice| format!("{notice}\n"))
            .unwrap_or_default(),
    }
}
