//! Public request/response structs for the HTTP endpoints (serde ready).
//! Wire fields are camelCase to match the SPA client; keep this small and
//! stable to evolve backend and frontend independently.

use serde::{Deserialize, Serialize};

use crate::domain::{
    BudgetItem, Difficulty, GameScore, GameType, InvestmentOption, MarketCondition, QuizAttempt,
};

#[derive(Serialize)]
pub struct HealthOut {
    pub ok: bool,
}

#[derive(Serialize)]
pub struct ErrorOut {
    pub error: String,
}

/// Onboarding payload. Points/level/streak always start at their defaults.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUserIn {
    pub username: String,
    pub email: String,
    pub age: String,
    pub region: String,
    pub financial_goal: String,
    pub knowledge_level: Difficulty,
    #[serde(default)]
    pub language: Option<String>,
}

/// Partial user update; absent fields are left untouched.
#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct UserUpdateIn {
    #[serde(default)] pub username: Option<String>,
    #[serde(default)] pub email: Option<String>,
    #[serde(default)] pub age: Option<String>,
    #[serde(default)] pub region: Option<String>,
    #[serde(default)] pub financial_goal: Option<String>,
    #[serde(default)] pub knowledge_level: Option<Difficulty>,
    #[serde(default)] pub language: Option<String>,
    #[serde(default)] pub points: Option<i64>,
    #[serde(default)] pub level: Option<i64>,
    #[serde(default)] pub streak: Option<i64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressIn {
    pub user_id: i64,
    pub module: String,
    #[serde(default)]
    pub completed_lessons: Option<i64>,
    pub total_lessons: i64,
}

#[derive(Debug, Deserialize)]
pub struct QuizQuery {
    pub module: String,
    /// Defaults to `advanced`, i.e. the unfiltered pool.
    pub level: Option<Difficulty>,
    /// Defaults to 5.
    pub count: Option<usize>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizAttemptIn {
    pub user_id: i64,
    pub module: String,
    /// Number of correct answers.
    pub score: i64,
    pub total_questions: i64,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizAttemptOut {
    #[serde(flatten)]
    pub attempt: QuizAttempt,
    pub points_earned: i64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameScoreIn {
    pub user_id: i64,
    pub game_type: GameType,
    pub score: i64,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameScoreOut {
    #[serde(flatten)]
    pub game_score: GameScore,
    pub points_earned: i64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetScoreIn {
    pub items: Vec<BudgetItem>,
    /// Defaults to the game's fixed income (4000).
    #[serde(default)]
    pub monthly_income: Option<f64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvestmentScoreIn {
    pub options: Vec<InvestmentOption>,
    pub market_condition: MarketCondition,
}

#[derive(Serialize)]
pub struct ScoreOut {
    pub score: u32,
}

/// Everything a client needs to start a game round. Exactly one of the two
/// setup branches is present, matching `game_type`.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSessionOut {
    pub game_type: GameType,
    pub time_limit_secs: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub budget: Option<BudgetSetup>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub investment: Option<InvestmentSetup>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetSetup {
    pub monthly_income: f64,
    pub items: Vec<BudgetItem>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvestmentSetup {
    pub capital: f64,
    pub market_condition: MarketCondition,
    pub options: Vec<InvestmentOption>,
}
