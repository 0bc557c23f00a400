//! Scoring engines for the two mini-games. Both scorers are pure functions
//! of their inputs; randomness (the market condition) is drawn by the caller
//! and passed in.

use crate::catalog::EMERGENCY_FUND_ID;
use crate::domain::{BudgetCategory, BudgetItem, InvestmentOption, MarketCondition, RiskTag};

/// Hard ceiling on the budget score.
pub const BUDGET_SCORE_CAP: u32 = 2500;

/// Score a budget allocation against a fixed monthly income.
///
/// Three components, each tiered, summed and scaled by 10:
/// savings rate (0-40), emergency fund amount (0-30), needs/total ratio
/// (0-30). The emergency fund is found by its semantic id; a missing item
/// scores that component 0, and a zero-expense budget skips the ratio
/// component rather than dividing by zero.
pub fn score_budget(items: &[BudgetItem], monthly_income: f64) -> u32 {
  let total_expenses: f64 = items.iter().map(|i| i.amount).sum();
  let mut score: u32 = 0;

  // Savings rate (0-40 points)
  if monthly_income > 0.0 {
    let savings_rate = (monthly_income - total_expenses) / monthly_income;
    if savings_rate >= 0.2 {
      score += 40;
    } else if savings_rate >= 0.15 {
      score += 30;
    } else if savings_rate >= 0.1 {
      score += 20;
    } else if savings_rate >= 0.05 {
      score += 10;
    }
  }

  // Emergency fund (0-30 points)
  let emergency_fund = items
    .iter()
    .find(|i| i.id == EMERGENCY_FUND_ID)
    .map(|i| i.amount)
    .unwrap_or(0.0);
  if emergency_fund >= 500.0 {
    score += 30;
  } else if emergency_fund >= 300.0 {
    score += 20;
  } else if emergency_fund >= 100.0 {
    score += 10;
  }

  // Balanced spending between needs and wants (0-30 points)
  if total_expenses > 0.0 {
    let needs_total: f64 = items
      .iter()
      .filter(|i| i.category == BudgetCategory::Need)
      .map(|i| i.amount)
      .sum();
    let needs_ratio = needs_total / total_expenses;
    if (0.7..=0.8).contains(&needs_ratio) {
      score += 30;
    } else if (0.6..=0.85).contains(&needs_ratio) {
      score += 20;
    } else if (0.5..=0.9).contains(&needs_ratio) {
      score += 10;
    }
  }

  (score * 10).min(BUDGET_SCORE_CAP)
}

/// Score an investment portfolio under a market condition.
///
/// Allocations must sum to exactly 100 or the score is 0 with no partial
/// credit. The per-risk and diversification bonuses count options with any
/// non-zero allocation regardless of size, deliberately rewarding spread
/// over concentration.
pub fn score_investment(options: &[InvestmentOption], market: MarketCondition) -> u32 {
  let total_allocation: u32 = options.iter().map(|o| o.allocation).sum();
  if total_allocation != 100 {
    return 0;
  }

  let mut expected_return = 0.0;
  let mut risk_score: u32 = 0;
  for option in options {
    expected_return += option.expected_return * f64::from(option.allocation) / 100.0;
    if option.allocation > 0 {
      risk_score += match option.risk {
        RiskTag::Low => 10,
        RiskTag::Medium => 15,
        RiskTag::High => 5,
      };
    }
  }

  expected_return *= market.multiplier();

  let diversification_bonus = options.iter().filter(|o| o.allocation > 0).count() as u32 * 5;

  (expected_return * 10.0 + f64::from(risk_score + diversification_bonus)).round() as u32
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::catalog::{default_budget_items, default_investment_options, MONTHLY_INCOME};
  use crate::domain::BudgetCategory::{Need, Want};

  fn budget_item(id: &str, category: BudgetCategory, amount: f64) -> BudgetItem {
    BudgetItem {
      id: id.into(),
      name: id.into(),
      category,
      amount,
      description: String::new(),
    }
  }

  fn with_allocations(allocations: [u32; 5]) -> Vec<InvestmentOption> {
    let mut options = default_investment_options();
    for (option, allocation) in options.iter_mut().zip(allocations) {
      option.allocation = allocation;
    }
    options
  }

  #[test]
  fn default_budget_scores_900() {
    // Defaults: expenses 3150 of 4000 (rate 0.2125 -> 40), emergency fund
    // 300 -> 20, needs 2400/3150 = 0.762 -> 30. (40+20+30) * 10 = 900.
    assert_eq!(score_budget(&default_budget_items(), MONTHLY_INCOME), 900);
  }

  #[test]
  fn worked_example_3700_of_4000() {
    let items = vec![
      budget_item("rent", Need, 1200.0),
      budget_item("groceries", Need, 400.0),
      budget_item("car-payment", Need, 350.0),
      budget_item("utilities", Need, 150.0),
      budget_item(EMERGENCY_FUND_ID, Need, 300.0),
      budget_item("dining-out", Want, 500.0),
      budget_item("entertainment", Want, 400.0),
      budget_item("shopping", Want, 400.0),
    ];
    // Rate 300/4000 = 0.075 -> 10, fund 300 -> 20, needs 2400/3700 = 0.649 -> 20.
    assert_eq!(score_budget(&items, 4000.0), 500);
  }

  #[test]
  fn higher_savings_rate_never_scores_lower() {
    // Ratio pinned at 1.0 (all needs) so only the savings component moves.
    let at_total = |rent: f64| {
      vec![
        budget_item("rent", Need, rent),
        budget_item(EMERGENCY_FUND_ID, Need, 300.0),
      ]
    };
    let mut previous = 0;
    for rent in [3700.0, 3500.0, 3300.0, 2900.0, 2500.0, 0.0] {
      let score = score_budget(&at_total(rent), 4000.0);
      assert!(score >= previous, "score dropped as savings rate rose");
      previous = score;
    }
  }

  #[test]
  fn zero_expense_budget_is_guarded() {
    assert_eq!(score_budget(&[], 4000.0), 400); // rate 1.0 -> 40, rest 0
    let zeroed = vec![budget_item(EMERGENCY_FUND_ID, Need, 0.0)];
    assert_eq!(score_budget(&zeroed, 4000.0), 400);
  }

  #[test]
  fn missing_emergency_fund_scores_that_component_zero() {
    let items = vec![budget_item("rent", Need, 3000.0)];
    // Rate 0.25 -> 40, no fund -> 0, ratio 1.0 -> 0.
    assert_eq!(score_budget(&items, 4000.0), 400);
  }

  #[test]
  fn budget_score_stays_within_cap() {
    // Best possible: 40 + 30 + 30 components -> 1000, under the 2500 cap.
    let items = vec![
      budget_item("rent", Need, 1800.0),
      budget_item(EMERGENCY_FUND_ID, Need, 500.0),
      budget_item("dining-out", Want, 900.0),
    ];
    let score = score_budget(&items, 4000.0);
    assert_eq!(score, 1000);
    assert!(score <= BUDGET_SCORE_CAP);
  }

  #[test]
  fn worked_investment_example_stable_market() {
    // 20/30/20/20/10: return 8.4, risk 10+15+5+15+5 = 50, diversification 25.
    let options = with_allocations([20, 30, 20, 20, 10]);
    assert_eq!(score_investment(&options, MarketCondition::Stable), 159);
  }

  #[test]
  fn market_condition_scales_the_return_component() {
    let options = with_allocations([20, 30, 20, 20, 10]);
    assert_eq!(score_investment(&options, MarketCondition::Bull), 176); // 8.4 * 1.2
    assert_eq!(score_investment(&options, MarketCondition::Bear), 142); // 8.4 * 0.8
  }

  #[test]
  fn allocations_must_sum_to_exactly_100() {
    let short = with_allocations([40, 40, 0, 0, 0]);
    assert_eq!(score_investment(&short, MarketCondition::Stable), 0);
    let over = with_allocations([60, 60, 0, 0, 0]);
    assert_eq!(score_investment(&over, MarketCondition::Bull), 0);
    let exact = with_allocations([50, 50, 0, 0, 0]);
    assert!(score_investment(&exact, MarketCondition::Stable) > 0);
  }

  #[test]
  fn scorers_are_idempotent() {
    let items = default_budget_items();
    assert_eq!(score_budget(&items, MONTHLY_INCOME), score_budget(&items, MONTHLY_INCOME));
    let options = with_allocations([0, 50, 0, 50, 0]);
    assert_eq!(
      score_investment(&options, MarketCondition::Bear),
      score_investment(&options, MarketCondition::Bear)
    );
  }
}
