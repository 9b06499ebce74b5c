use std::process::ExitCode;
use std::time::Duration;

use anyhow::Context;
use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::Serialize;

use crate::api::{ApiClient, ClientConfig, DEFAULT_BASE_URL};
use crate::core::{
    ChartView, DiagnosisForm, DiagnosisScreen, DiagnosisView, Form, LOADING_MESSAGE,
    ParameterForm, Phase, QUESTIONS, Question, QuizAnswer, RiskQuiz, Screen, SimulationScreen,
    SubmitRequest, render_screen,
};
use crate::error::ValidationError;

/// How a command ended. Maps onto the process exit status.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Exit {
    Success,
    SubmissionFailed,
    InvalidInput,
}

impl From<Exit> for ExitCode {
    fn from(exit: Exit) -> Self {
        match exit {
            Exit::Success => ExitCode::SUCCESS,
            Exit::SubmissionFailed => ExitCode::from(1),
            Exit::InvalidInput => ExitCode::from(2),
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
pub enum CliQuizAnswer {
    Defensive,
    Neutral,
    Aggressive,
}

impl From<CliQuizAnswer> for QuizAnswer {
    fn from(value: CliQuizAnswer) -> Self {
        match value {
            CliQuizAnswer::Defensive => QuizAnswer::Defensive,
            CliQuizAnswer::Neutral => QuizAnswer::Neutral,
            CliQuizAnswer::Aggressive => QuizAnswer::Aggressive,
        }
    }
}

#[derive(Parser, Debug)]
#[command(
    name = "smartfolio",
    about = "Financial diagnosis and asset-growth simulation client"
)]
pub struct Cli {
    #[arg(
        long,
        global = true,
        env = "SMARTFOLIO_BASE_URL",
        default_value = DEFAULT_BASE_URL,
        help = "Backend base URL"
    )]
    base_url: String,
    #[arg(long, global = true, help = "Give up on the backend after this many seconds")]
    timeout_secs: Option<u64>,
    #[arg(long, global = true, help = "Print the result as JSON instead of text")]
    json: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Recommend one action from a bank balance and a monthly surplus
    Diagnose {
        #[arg(long, help = "Current bank balance, e.g. 1,500,000")]
        bank_balance: String,
        #[arg(long, help = "Money left over this month, e.g. 35,000")]
        monthly_surplus: String,
    },
    /// Project p10/p50/p90 asset growth
    Simulate(SimulateArgs),
    /// Print the risk quiz questions and answer values
    Quiz,
    /// Check that the backend is up
    Health,
}

#[derive(Args, Debug)]
struct SimulateArgs {
    #[arg(long, default_value = "30", help = "Current age (18-80)")]
    age: String,
    #[arg(long, default_value = "50,000", help = "Monthly investment")]
    monthly_investment: String,
    #[arg(long, default_value = "0", help = "Assets already invested")]
    initial_assets: String,
    #[arg(
        long,
        conflicts_with_all = ["q1", "q2"],
        help = "Risk tolerance 0-100; omit to derive it from --q1/--q2"
    )]
    risk_tolerance: Option<String>,
    #[arg(long, value_enum, requires = "q2", help = "Quiz Q1: reaction to a 30% drop")]
    q1: Option<CliQuizAnswer>,
    #[arg(long, value_enum, requires = "q1", help = "Quiz Q2: main investment goal")]
    q2: Option<CliQuizAnswer>,
}

impl Cli {
    fn client_config(&self) -> ClientConfig {
        let config = ClientConfig::new(self.base_url.clone());
        match self.timeout_secs {
            Some(secs) => config.with_timeout(Duration::from_secs(secs)),
            None => config,
        }
    }
}

pub async fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let client = ApiClient::new(cli.client_config()).context("failed to build HTTP client")?;
    dispatch(cli.command, &client, cli.json).await.map(ExitCode::from)
}

async fn dispatch(command: Command, client: &ApiClient, json: bool) -> anyhow::Result<Exit> {
    match command {
        Command::Diagnose {
            bank_balance,
            monthly_surplus,
        } => {
            let form = DiagnosisForm::new(bank_balance, monthly_surplus);
            let screen = DiagnosisScreen::with_form(form);
            run_screen(screen, client, json, |r| DiagnosisView::from(r).render_text()).await
        }
        Command::Simulate(args) => {
            let form = match parameter_form(args) {
                Ok(form) => form,
                Err(err) => {
                    eprintln!("Error: {err}");
                    return Ok(Exit::InvalidInput);
                }
            };
            let screen = SimulationScreen::with_form(form);
            run_screen(screen, client, json, |r| ChartView::from(r).render_text()).await
        }
        Command::Quiz => {
            print!("{}", quiz_text());
            Ok(Exit::Success)
        }
        Command::Health => Ok(run_health(client).await),
    }
}

/// With `--q1/--q2` the quiz supplies only the risk tolerance. Age and monthly
/// investment are checked against the quiz bounds and then kept as typed.
fn parameter_form(args: SimulateArgs) -> Result<ParameterForm, ValidationError> {
    let mut form = ParameterForm {
        age: args.age,
        monthly_investment: args.monthly_investment,
        risk_tolerance: args.risk_tolerance.unwrap_or_default(),
        initial_assets: args.initial_assets,
    };
    if args.q1.is_none() && args.q2.is_none() {
        return Ok(form);
    }

    let (age, monthly_investment) = form.quiz_basic_info()?;
    let mut quiz = RiskQuiz::new();
    quiz.set_age(age);
    quiz.set_monthly_investment(monthly_investment);
    quiz.next();
    if let Some(q1) = args.q1 {
        quiz.answer(Question::MarketDrop, q1.into());
    }
    if let Some(q2) = args.q2 {
        quiz.answer(Question::InvestmentGoal, q2.into());
    }
    form.risk_tolerance = quiz.complete()?.risk_tolerance.to_string();
    Ok(form)
}

async fn run_screen<F, R>(
    mut screen: Screen<F, R>,
    client: &ApiClient,
    json: bool,
    render: impl Fn(&R) -> String,
) -> anyhow::Result<Exit>
where
    F: Form,
    F::Request: Sync,
    R: Serialize,
    ApiClient: SubmitRequest<F::Request, Output = R>,
{
    if let Err(err) = screen.form().validate() {
        eprintln!("Error: {err}");
        return Ok(Exit::InvalidInput);
    }

    eprintln!("{LOADING_MESSAGE}");
    match screen.submit(client).await {
        Phase::Result => {
            let text = match (json, screen.result()) {
                (true, Some(result)) => {
                    let mut text =
                        serde_json::to_string_pretty(result).context("failed to encode result")?;
                    text.push('\n');
                    text
                }
                _ => render_screen(&screen, render),
            };
            print!("{text}");
            Ok(Exit::Success)
        }
        Phase::Input | Phase::Loading => {
            eprint!("{}", render_screen(&screen, render));
            Ok(Exit::SubmissionFailed)
        }
    }
}

async fn run_health(client: &ApiClient) -> Exit {
    match client.health().await {
        Ok(health) if health.is_healthy() => {
            println!("{}: {}", client.config().base_url, health.status);
            Exit::Success
        }
        Ok(health) => {
            eprintln!("{}: {}", client.config().base_url, health.status);
            Exit::SubmissionFailed
        }
        Err(err) => {
            tracing::debug!(%err, "health check failed");
            eprintln!("{}", err.notice());
            Exit::SubmissionFailed
        }
    }
}

fn quiz_text() -> String {
    let mut out = String::new();
    for (flag, question) in ["--q1", "--q2"].iter().zip(QUESTIONS.iter()) {
        out.push_str(question.prompt);
        out.push('\n');
        for (answer, label) in QuizAnswer::ALL.iter().zip(question.choices.iter()) {
            let value = match answer {
                QuizAnswer::Defensive => "defensive",
                QuizAnswer::Neutral => "neutral",
                QuizAnswer::Aggressive => "aggressive",
            };
            out.push_str(&format!(
                "  {flag} {value:<10} {label} (score {})\n",
                answer.score()
            ));
        }
    }
    out
}
