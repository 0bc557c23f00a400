//! Domain models used by the backend: quiz questions, budget/investment game
//! pieces, users and their progress/attempt records.

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Question difficulty, doubling as the user's declared knowledge level.
/// Ordering matters: a level admits every difficulty at or below it.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
  Beginner,
  Intermediate,
  Advanced,
}
impl Default for Difficulty {
  fn default() -> Self { Difficulty::Beginner }
}

/// One multiple-choice question from the catalog (3-4 options).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct QuizQuestion {
  pub id: String,
  pub question: String,
  pub options: Vec<String>,
  pub correct_answer: usize,
  pub explanation: String,
  pub difficulty: Difficulty,
}

/// Need vs want split used by the budget game's balanced-spending component.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum BudgetCategory {
  Need,
  Want,
}
impl BudgetCategory {
  /// Input-layer cap per category (matches the client's slider ranges).
  pub fn max_amount(self) -> f64 {
    match self {
      BudgetCategory::Need => 2000.0,
      BudgetCategory::Want => 1000.0,
    }
  }
}

/// One expense line in the budget simulator. `amount` is user-adjusted;
/// bounds are enforced at the input layer, not by the scorer.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetItem {
  pub id: String,
  pub name: String,
  pub category: BudgetCategory,
  pub amount: f64,
  #[serde(default)] pub description: String,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RiskTag {
  Low,
  Medium,
  High,
}

/// One asset class in the investment challenge. `allocation` is the user's
/// percentage (0-100); the portfolio is valid only when allocations sum to 100.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvestmentOption {
  pub id: String,
  pub name: String,
  pub risk: RiskTag,
  pub expected_return: f64,
  #[serde(default)] pub description: String,
  pub allocation: u32,
}

/// Market scenario drawn once per investment game.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MarketCondition {
  Bull,
  Bear,
  Stable,
}
impl MarketCondition {
  pub fn multiplier(self) -> f64 {
    match self {
      MarketCondition::Bull => 1.2,
      MarketCondition::Bear => 0.8,
      MarketCondition::Stable => 1.0,
    }
  }

  /// Uniform draw. The rng is injected so tests can seed it.
  pub fn draw<R: Rng + ?Sized>(rng: &mut R) -> Self {
    match rng.gen_range(0..3) {
      0 => MarketCondition::Bull,
      1 => MarketCondition::Bear,
      _ => MarketCondition::Stable,
    }
  }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum GameType {
  BudgetSimulator,
  InvestmentChallenge,
}

/// A registered learner. `points` is cumulative and only ever increases.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
  pub id: i64,
  pub username: String,
  pub email: String,
  pub age: String,
  pub region: String,
  pub financial_goal: String,
  pub knowledge_level: Difficulty,
  pub language: String,
  pub points: i64,
  pub level: i64,
  pub streak: i64,
  pub created_at: DateTime<Utc>,
}

/// Per-module lesson completion counters.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProgress {
  pub id: i64,
  pub user_id: i64,
  pub module: String,
  pub completed_lessons: i64,
  pub total_lessons: i64,
  pub last_accessed: DateTime<Utc>,
}

/// One finished quiz: `score` is the number of correct answers.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizAttempt {
  pub id: i64,
  pub user_id: i64,
  pub module: String,
  pub score: i64,
  pub total_questions: i64,
  pub completed_at: DateTime<Utc>,
}

/// One finished game round.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameScore {
  pub id: i64,
  pub user_id: i64,
  pub game_type: GameType,
  pub score: i64,
  pub completed_at: DateTime<Utc>,
}

/// Static comparison figures shown on the dashboard per region.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionalSnapshot {
  pub average_savings_rate: &'static str,
  pub average_emergency_fund: &'static str,
  pub investment_participation: &'static str,
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn difficulty_ordering_nests_levels() {
    assert!(Difficulty::Beginner < Difficulty::Intermediate);
    assert!(Difficulty::Intermediate < Difficulty::Advanced);
  }

  #[test]
  fn wire_format_is_camel_case() {
    let q = QuizQuestion {
      id: "cc1".into(),
      question: "q".into(),
      options: vec!["a".into(), "b".into(), "c".into()],
      correct_answer: 0,
      explanation: "e".into(),
      difficulty: Difficulty::Beginner,
    };
    let v = serde_json::to_value(&q).unwrap();
    assert_eq!(v["correctAnswer"], 0);
    assert_eq!(v["difficulty"], "beginner");
    assert_eq!(
      serde_json::to_value(GameType::BudgetSimulator).unwrap(),
      "budget-simulator"
    );
  }
}
