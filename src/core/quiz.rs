use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

pub const MIN_AGE: u32 = 18;
pub const MAX_AGE: u32 = 80;
pub const DEFAULT_AGE: u32 = 30;
pub const DEFAULT_MONTHLY_INVESTMENT: f64 = 50_000.0;
pub const MONTHLY_INVESTMENT_MAX: f64 = 300_000.0;
pub const MONTHLY_INVESTMENT_STEP: f64 = 1_000.0;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum QuizAnswer {
    Defensive,
    Neutral,
    Aggressive,
}

impl QuizAnswer {
    pub const ALL: [QuizAnswer; 3] = [
        QuizAnswer::Defensive,
        QuizAnswer::Neutral,
        QuizAnswer::Aggressive,
    ];

    pub fn score(self) -> u32 {
        match self {
            QuizAnswer::Defensive => 10,
            QuizAnswer::Neutral => 50,
            QuizAnswer::Aggressive => 90,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Question {
    MarketDrop,
    InvestmentGoal,
}

pub struct QuestionText {
    pub question: Question,
    pub prompt: &'static str,
    /// Labels in `QuizAnswer::ALL` order.
    pub choices: [&'static str; 3],
}

pub const QUESTIONS: [QuestionText; 2] = [
    QuestionText {
        question: Question::MarketDrop,
        prompt: "Q1. Your holdings temporarily drop 30%. What do you do?",
        choices: [
            "Sell right away to stop the losses",
            "Wait and see (do nothing)",
            "Treat it as a chance and buy more",
        ],
    },
    QuestionText {
        question: Question::InvestmentGoal,
        prompt: "Q2. What is the main goal of your investing?",
        choices: [
            "Protect what I have without shrinking it",
            "Grow enough to keep up with inflation",
            "Grow as much as possible, even with risk",
        ],
    },
];

/// Mean of the two answers. Always one of 10, 30, 50, 70, 90.
pub fn risk_score(q1: QuizAnswer, q2: QuizAnswer) -> u32 {
    (q1.score() + q2.score()) / 2
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum QuizStep {
    BasicInfo,
    Questions,
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizOutcome {
    pub age: u32,
    pub monthly_investment: f64,
    pub risk_tolerance: u32,
}

/// Two-step data collection. Produces a `QuizOutcome` and never talks to the backend.
#[derive(Debug, Clone)]
pub struct RiskQuiz {
    step: QuizStep,
    age: u32,
    monthly_investment: f64,
    market_drop: Option<QuizAnswer>,
    investment_goal: Option<QuizAnswer>,
}

impl Default for RiskQuiz {
    fn default() -> Self {
        Self::new()
    }
}

impl RiskQuiz {
    pub fn new() -> Self {
        Self {
            step: QuizStep::BasicInfo,
            age: DEFAULT_AGE,
            monthly_investment: DEFAULT_MONTHLY_INVESTMENT,
            market_drop: None,
            investment_goal: None,
        }
    }

    pub fn step(&self) -> QuizStep {
        self.step
    }

    pub fn age(&self) -> u32 {
        self.age
    }

    pub fn monthly_investment(&self) -> f64 {
        self.monthly_investment
    }

    pub fn set_age(&mut self, age: u32) {
        self.age = age.clamp(MIN_AGE, MAX_AGE);
    }

    /// Slider semantics: clamped to the slider range and snapped to its step.
    pub fn set_monthly_investment(&mut self, amount: f64) {
        if !amount.is_finite() {
            return;
        }
        let snapped = (amount / MONTHLY_INVESTMENT_STEP).round() * MONTHLY_INVESTMENT_STEP;
        // `+ 0.0` turns a snapped -0.0 into 0.0.
        self.monthly_investment = snapped.clamp(0.0, MONTHLY_INVESTMENT_MAX) + 0.0;
    }

    pub fn next(&mut self) {
        self.step = QuizStep::Questions;
    }

    pub fn answer(&mut self, question: Question, answer: QuizAnswer) {
        match question {
            Question::MarketDrop => self.market_drop = Some(answer),
            Question::InvestmentGoal => self.investment_goal = Some(answer),
        }
    }

    pub fn answer_for(&self, question: Question) -> Option<QuizAnswer> {
        match question {
            Question::MarketDrop => self.market_drop,
            Question::InvestmentGoal => self.investment_goal,
        }
    }

    pub fn can_complete(&self) -> bool {
        self.step == QuizStep::Questions
            && self.market_drop.is_some()
            && self.investment_goal.is_some()
    }

    pub fn complete(&self) -> Result<QuizOutcome, ValidationError> {
        let (Some(q1), Some(q2)) = (self.market_drop, self.investment_goal) else {
            return Err(ValidationError::Unanswered);
        };
        if self.step != QuizStep::Questions {
            return Err(ValidationError::Unanswered);
        }
        Ok(QuizOutcome {
            age: self.age,
            monthly_investment: self.monthly_investment,
            risk_tolerance: risk_score(q1, q2),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::{prop_assert, prop_assert_eq, proptest};
    use proptest::sample::select;

    fn answered(q1: QuizAnswer, q2: QuizAnswer) -> RiskQuiz {
        let mut quiz = RiskQuiz::new();
        quiz.next();
        quiz.answer(Question::MarketDrop, q1);
        quiz.answer(Question::InvestmentGoal, q2);
        quiz
    }

    #[test]
    fn risk_score_matches_known_pairs() {
        assert_eq!(risk_score(QuizAnswer::Defensive, QuizAnswer::Aggressive), 50);
        assert_eq!(risk_score(QuizAnswer::Aggressive, QuizAnswer::Aggressive), 90);
        assert_eq!(risk_score(QuizAnswer::Defensive, QuizAnswer::Defensive), 10);
        assert_eq!(risk_score(QuizAnswer::Defensive, QuizAnswer::Neutral), 30);
        assert_eq!(risk_score(QuizAnswer::Neutral, QuizAnswer::Aggressive), 70);
    }

    #[test]
    fn all_nine_combinations_land_on_the_five_scores() {
        let mut seen = Vec::new();
        for q1 in QuizAnswer::ALL {
            for q2 in QuizAnswer::ALL {
                let score = risk_score(q1, q2);
                assert!([10, 30, 50, 70, 90].contains(&score));
                if !seen.contains(&score) {
                    seen.push(score);
                }
            }
        }
        seen.sort_unstable();
        assert_eq!(seen, vec![10, 30, 50, 70, 90]);
    }

    #[test]
    fn complete_is_disabled_until_both_questions_answered() {
        let mut quiz = RiskQuiz::new();
        assert_eq!(quiz.step(), QuizStep::BasicInfo);
        assert_eq!(quiz.complete(), Err(ValidationError::Unanswered));

        quiz.next();
        assert_eq!(quiz.step(), QuizStep::Questions);
        quiz.answer(Question::MarketDrop, QuizAnswer::Neutral);
        assert!(!quiz.can_complete());
        assert_eq!(quiz.complete(), Err(ValidationError::Unanswered));

        quiz.answer(Question::InvestmentGoal, QuizAnswer::Aggressive);
        let outcome = quiz.complete().expect("both answered");
        assert_eq!(outcome.risk_tolerance, 70);
        assert_eq!(outcome.age, DEFAULT_AGE);
        assert_eq!(outcome.monthly_investment, DEFAULT_MONTHLY_INVESTMENT);
    }

    #[test]
    fn answers_given_before_next_still_need_the_questions_step() {
        let mut quiz = RiskQuiz::new();
        quiz.answer(Question::MarketDrop, QuizAnswer::Neutral);
        quiz.answer(Question::InvestmentGoal, QuizAnswer::Neutral);
        assert!(!quiz.can_complete());
        assert_eq!(quiz.complete(), Err(ValidationError::Unanswered));
        quiz.next();
        assert_eq!(quiz.complete().map(|o| o.risk_tolerance), Ok(50));
    }

    #[test]
    fn later_answer_replaces_earlier_one() {
        let mut quiz = answered(QuizAnswer::Defensive, QuizAnswer::Defensive);
        quiz.answer(Question::MarketDrop, QuizAnswer::Aggressive);
        assert_eq!(
            quiz.answer_for(Question::MarketDrop),
            Some(QuizAnswer::Aggressive)
        );
        assert_eq!(quiz.complete().map(|o| o.risk_tolerance), Ok(50));
    }

    #[test]
    fn basic_info_is_clamped_and_snapped() {
        let mut quiz = RiskQuiz::new();
        quiz.set_age(12);
        assert_eq!(quiz.age(), MIN_AGE);
        quiz.set_age(99);
        assert_eq!(quiz.age(), MAX_AGE);

        quiz.set_monthly_investment(12_345.0);
        assert_eq!(quiz.monthly_investment(), 12_000.0);
        quiz.set_monthly_investment(1_000_000.0);
        assert_eq!(quiz.monthly_investment(), MONTHLY_INVESTMENT_MAX);
        quiz.set_monthly_investment(-5.0);
        assert_eq!(quiz.monthly_investment(), 0.0);
        quiz.set_monthly_investment(f64::NAN);
        assert_eq!(quiz.monthly_investment(), 0.0);
    }

    #[test]
    fn small_negative_amount_snaps_to_positive_zero() {
        let mut quiz = RiskQuiz::new();
        for amount in [-5.0, -499.0, -0.0] {
            quiz.set_monthly_investment(amount);
            assert_eq!(quiz.monthly_investment(), 0.0);
            assert!(quiz.monthly_investment().is_sign_positive(), "{amount} kept its sign");
        }
        let mut quiz = answered(QuizAnswer::Neutral, QuizAnswer::Neutral);
        quiz.set_monthly_investment(-5.0);
        let body =
            serde_json::to_string(&quiz.complete().expect("answered")).expect("serializable");
        assert!(body.contains("\"monthlyInvestment\":0.0"), "{body}");
    }

    #[test]
    fn question_table_covers_both_questions() {
        assert_eq!(QUESTIONS[0].question, Question::MarketDrop);
        assert_eq!(QUESTIONS[1].question, Question::InvestmentGoal);
        assert!(QUESTIONS.iter().all(|q| q.choices.len() == QuizAnswer::ALL.len()));
    }

    proptest! {
        #![proptest_config(proptest::test_runner::Config::with_cases(32))]
        #[test]
        fn quiz_outcome_is_pure_in_the_two_answers(
            q1 in select(QuizAnswer::ALL.to_vec()),
            q2 in select(QuizAnswer::ALL.to_vec()),
            age in 0u32..120,
        ) {
            let mut quiz = answered(q1, q2);
            quiz.set_age(age);
            let first = quiz.complete().expect("answered");
            let second = quiz.complete().expect("answered");
            prop_assert_eq!(first, second);
            prop_assert_eq!(first.risk_tolerance, (q1.score() + q2.score()) / 2);
            prop_assert!((MIN_AGE..=MAX_AGE).contains(&first.age));
        }
    }
}
