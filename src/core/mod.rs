mod flow;
mod format;
mod input;
mod quiz;
mod types;
mod view;

pub use flow::{DiagnosisScreen, Form, Phase, Screen, SimulationScreen, SubmitRequest};
pub use format::format_yen;
pub use input::{DiagnosisForm, ParameterForm, parse_amount};
pub use quiz::{
    MAX_AGE, MIN_AGE, QUESTIONS, Question, QuestionText, QuizAnswer, QuizOutcome, QuizStep,
    RiskQuiz, risk_score,
};
pub use types::{
    DiagnosisInput, DiagnosisResult, HealthStatus, PortfolioAllocation, SimulationParams,
    SimulationPoint, SimulationResult,
};
pub use view::{
    Band, ChartView, DiagnosisView, LOADING_MESSAGE, Series, Stroke, render_screen,
};
