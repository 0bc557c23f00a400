//! Core behaviors behind the HTTP handlers: quiz selection, game sessions,
//! input-layer validation, and the points awarded on quiz/game completion.

use rand::Rng;
use tracing::{info, instrument, warn};

use crate::catalog::{
  default_budget_items, default_investment_options, INVESTMENT_CAPITAL, MONTHLY_INCOME,
};
use crate::domain::{
  BudgetItem, Difficulty, GameScore, GameType, InvestmentOption, MarketCondition, QuizAttempt,
  QuizQuestion,
};
use crate::protocol::{
  BudgetSetup, GameScoreIn, GameSessionOut, InvestmentSetup, QuizAttemptIn,
};
use crate::state::AppState;

/// Time limit per game, seconds (budget 15 min, investment 20 min). The
/// countdown itself runs client-side.
pub fn time_limit_secs(game_type: GameType) -> u64 {
  match game_type {
    GameType::BudgetSimulator => 900,
    GameType::InvestmentChallenge => 1200,
  }
}

/// Largest question count a submitted attempt may claim. Real quizzes are a
/// handful of questions; the bound keeps arbitrary i64 payloads out.
pub const MAX_QUIZ_QUESTIONS: i64 = 1000;

/// Largest game score a submission may claim. Both scorers top out in the
/// low thousands; the bound keeps point awards within sane range.
pub const MAX_GAME_SCORE: i64 = 100_000;

/// Points for a finished quiz: floor(correct/total × 100). A zero-question
/// quiz earns nothing. Widened to i128 so the multiply cannot overflow on
/// extreme inputs.
pub fn quiz_points(correct: i64, total_questions: i64) -> i64 {
  if total_questions <= 0 || correct <= 0 {
    return 0;
  }
  ((i128::from(correct) * 100) / i128::from(total_questions)) as i64
}

/// Points for a finished game: floor(score / 10).
pub fn game_points(score: i64) -> i64 {
  if score <= 0 { 0 } else { score / 10 }
}

#[instrument(level = "info", skip(state), fields(%module, ?level, %count))]
pub async fn select_quiz(
  state: &AppState,
  module: &str,
  level: Difficulty,
  count: usize,
) -> Vec<QuizQuestion> {
  let questions = state.quiz_questions(module, level, count).await;
  info!(target: "quiz", %module, ?level, served = questions.len(), "Quiz questions selected");
  questions
}

/// Record the attempt, then award points to the user. The two writes are
/// separate store operations; the points increment itself is serialized in
/// `AppState::add_points`.
#[instrument(level = "info", skip(state, input), fields(user_id = input.user_id, module = %input.module))]
pub async fn submit_quiz_attempt(state: &AppState, input: QuizAttemptIn) -> (QuizAttempt, i64) {
  let attempt = state
    .record_quiz_attempt(input.user_id, &input.module, input.score, input.total_questions)
    .await;

  let earned = quiz_points(input.score, input.total_questions);
  let earned = match state.add_points(input.user_id, earned).await {
    Some(total) => {
      info!(target: "quiz", user_id = input.user_id, earned, total, "Quiz points awarded");
      earned
    }
    None => {
      warn!(target: "quiz", user_id = input.user_id, "Attempt recorded for unknown user; no points awarded");
      0
    }
  };
  (attempt, earned)
}

#[instrument(level = "info", skip(state, input), fields(user_id = input.user_id, game_type = ?input.game_type))]
pub async fn submit_game_score(state: &AppState, input: GameScoreIn) -> (GameScore, i64) {
  let row = state
    .record_game_score(input.user_id, input.game_type, input.score)
    .await;

  let earned = game_points(input.score);
  let earned = match state.add_points(input.user_id, earned).await {
    Some(total) => {
      info!(target: "game", user_id = input.user_id, earned, total, "Game points awarded");
      earned
    }
    None => {
      warn!(target: "game", user_id = input.user_id, "Score recorded for unknown user; no points awarded");
      0
    }
  };
  (row, earned)
}

/// Build the setup a client needs to start a round. The investment game gets
/// a market condition drawn from the injected rng (the handler passes
/// `thread_rng`; tests seed a `StdRng`).
pub fn game_session<R: Rng + ?Sized>(game_type: GameType, rng: &mut R) -> GameSessionOut {
  let (budget, investment) = match game_type {
    GameType::BudgetSimulator => (
      Some(BudgetSetup {
        monthly_income: MONTHLY_INCOME,
        items: default_budget_items(),
      }),
      None,
    ),
    GameType::InvestmentChallenge => {
      let market = MarketCondition::draw(rng);
      info!(target: "game", ?market, "Market condition drawn");
      (
        None,
        Some(InvestmentSetup {
          capital: INVESTMENT_CAPITAL,
          market_condition: market,
          options: default_investment_options(),
        }),
      )
    }
  };
  GameSessionOut {
    game_type,
    time_limit_secs: time_limit_secs(game_type),
    budget,
    investment,
  }
}

/// Input-layer bounds for a submitted quiz attempt: a plausible question
/// count and a correct-answer count within it.
pub fn validate_quiz_attempt(input: &QuizAttemptIn) -> Result<(), String> {
  if input.total_questions < 0 || input.total_questions > MAX_QUIZ_QUESTIONS {
    return Err(format!("totalQuestions must be between 0 and {MAX_QUIZ_QUESTIONS}"));
  }
  if input.score < 0 || input.score > input.total_questions {
    return Err("score must be between 0 and totalQuestions".into());
  }
  Ok(())
}

/// Input-layer bounds for a submitted game score.
pub fn validate_game_score(input: &GameScoreIn) -> Result<(), String> {
  if input.score < 0 || input.score > MAX_GAME_SCORE {
    return Err(format!("score must be between 0 and {MAX_GAME_SCORE}"));
  }
  Ok(())
}

/// Input-layer bounds for budget scoring: non-negative amounts within the
/// per-category cap. The scorer itself does not re-check these.
pub fn validate_budget_items(items: &[BudgetItem]) -> Result<(), String> {
  for item in items {
    let cap = item.category.max_amount();
    if !item.amount.is_finite() || item.amount < 0.0 || item.amount > cap {
      return Err(format!("Amount for '{}' must be between 0 and {}", item.id, cap));
    }
  }
  Ok(())
}

/// Input-layer bounds for investment scoring: each allocation is a 0-100
/// percentage. The sum-to-100 rule is the scorer's own business.
pub fn validate_allocations(options: &[InvestmentOption]) -> Result<(), String> {
  for option in options {
    if option.allocation > 100 {
      return Err(format!("Allocation for '{}' exceeds 100%", option.id));
    }
  }
  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::BudgetCategory;
  use crate::protocol::NewUserIn;
  use rand::rngs::StdRng;
  use rand::SeedableRng;

  #[test]
  fn quiz_points_floor_the_ratio() {
    assert_eq!(quiz_points(3, 5), 60);
    assert_eq!(quiz_points(2, 3), 66);
    assert_eq!(quiz_points(4, 4), 100);
    assert_eq!(quiz_points(0, 4), 0);
    assert_eq!(quiz_points(3, 0), 0);
  }

  #[test]
  fn quiz_points_survive_extreme_counts() {
    // Near-i64 inputs must not overflow the ratio multiply.
    let huge = i64::MAX / 50;
    let points = quiz_points(huge, huge);
    assert_eq!(points, 100);
    assert_eq!(quiz_points(i64::MAX, i64::MAX), 100);
    // i64::MAX / 2 floors, so the ratio lands just under one half.
    assert_eq!(quiz_points(i64::MAX / 2, i64::MAX), 49);
  }

  #[test]
  fn quiz_attempt_validation_bounds_the_count() {
    let attempt = |score, total_questions| QuizAttemptIn {
      user_id: 1,
      module: "savings".into(),
      score,
      total_questions,
    };
    assert!(validate_quiz_attempt(&attempt(3, 5)).is_ok());
    assert!(validate_quiz_attempt(&attempt(0, 0)).is_ok());
    assert!(validate_quiz_attempt(&attempt(6, 5)).is_err());
    assert!(validate_quiz_attempt(&attempt(-1, 5)).is_err());
    assert!(validate_quiz_attempt(&attempt(3, -5)).is_err());
    let huge = i64::MAX / 50;
    assert!(validate_quiz_attempt(&attempt(huge, huge)).is_err());
  }

  #[test]
  fn game_score_validation_bounds_the_score() {
    let submission = |score| GameScoreIn {
      user_id: 1,
      game_type: GameType::BudgetSimulator,
      score,
    };
    assert!(validate_game_score(&submission(0)).is_ok());
    assert!(validate_game_score(&submission(2500)).is_ok());
    assert!(validate_game_score(&submission(-1)).is_err());
    assert!(validate_game_score(&submission(MAX_GAME_SCORE + 1)).is_err());
    assert!(validate_game_score(&submission(i64::MAX)).is_err());
  }

  #[test]
  fn game_points_floor_score_over_ten() {
    assert_eq!(game_points(159), 15);
    assert_eq!(game_points(900), 90);
    assert_eq!(game_points(9), 0);
    assert_eq!(game_points(-5), 0);
  }

  #[test]
  fn budget_session_has_fixed_income_and_no_market() {
    let session = game_session(GameType::BudgetSimulator, &mut StdRng::seed_from_u64(1));
    assert_eq!(session.time_limit_secs, 900);
    let budget = session.budget.expect("budget setup");
    assert_eq!(budget.monthly_income, MONTHLY_INCOME);
    assert_eq!(budget.items.len(), 8);
    assert!(session.investment.is_none());
  }

  #[test]
  fn investment_session_draw_is_deterministic_under_a_seed() {
    let mut a = StdRng::seed_from_u64(42);
    let mut b = StdRng::seed_from_u64(42);
    let first = game_session(GameType::InvestmentChallenge, &mut a);
    let second = game_session(GameType::InvestmentChallenge, &mut b);
    let (i, j) = (first.investment.unwrap(), second.investment.unwrap());
    assert_eq!(i.market_condition, j.market_condition);
    assert_eq!(i.options.len(), 5);
    assert!(i.options.iter().all(|o| o.allocation == 0));
    assert_eq!(first.time_limit_secs, 1200);
  }

  #[test]
  fn budget_validation_enforces_category_caps() {
    let mut items = default_budget_items();
    assert!(validate_budget_items(&items).is_ok());
    items[0].amount = 2500.0; // need cap is 2000
    assert!(validate_budget_items(&items).is_err());
    items[0].amount = -1.0;
    assert!(validate_budget_items(&items).is_err());
    let want_over = BudgetItem {
      id: "dining-out".into(),
      name: "Dining Out".into(),
      category: BudgetCategory::Want,
      amount: 1200.0,
      description: String::new(),
    };
    assert!(validate_budget_items(&[want_over]).is_err());
  }

  #[test]
  fn allocation_validation_caps_at_100() {
    let mut options = default_investment_options();
    assert!(validate_allocations(&options).is_ok());
    options[2].allocation = 101;
    assert!(validate_allocations(&options).is_err());
  }

  #[tokio::test]
  async fn quiz_submission_awards_floored_points() {
    let state = AppState::new();
    let user = state
      .create_user(NewUserIn {
        username: "bo".into(),
        email: "bo@example.com".into(),
        age: "18-24".into(),
        region: "africa".into(),
        financial_goal: "invest".into(),
        knowledge_level: Difficulty::Beginner,
        language: Some("en".into()),
      })
      .await;

    let (attempt, earned) = submit_quiz_attempt(
      &state,
      QuizAttemptIn {
        user_id: user.id,
        module: "savings".into(),
        score: 3,
        total_questions: 5,
      },
    )
    .await;
    assert_eq!(attempt.score, 3);
    assert_eq!(earned, 60);
    assert_eq!(state.get_user(user.id).await.unwrap().points, 60);
  }

  #[tokio::test]
  async fn game_submission_for_unknown_user_still_records() {
    let state = AppState::new();
    let (row, earned) = submit_game_score(
      &state,
      GameScoreIn {
        user_id: 7,
        game_type: GameType::InvestmentChallenge,
        score: 159,
      },
    )
    .await;
    assert_eq!(row.score, 159);
    assert_eq!(earned, 0);
    assert_eq!(state.game_scores_for_user(7).await.len(), 1);
  }
}
