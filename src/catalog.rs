//! Built-in content: the default quiz question bank, the fixtures both
//! mini-games start from, and the static regional comparison figures.

use std::collections::HashMap;

use crate::domain::{
  BudgetCategory, BudgetItem, Difficulty, InvestmentOption, QuizQuestion, RegionalSnapshot,
  RiskTag,
};

/// Fixed monthly income the budget simulator hands the player.
pub const MONTHLY_INCOME: f64 = 4000.0;

/// Capital shown in the investment challenge (display only; scoring works
/// on percentages).
pub const INVESTMENT_CAPITAL: f64 = 10_000.0;

/// Budget item id the emergency-fund score component reads. Items are
/// matched by this semantic id, never by position.
pub const EMERGENCY_FUND_ID: &str = "emergency-fund";

fn q(
  id: &str,
  question: &str,
  options: &[&str],
  correct_answer: usize,
  explanation: &str,
  difficulty: Difficulty,
) -> QuizQuestion {
  QuizQuestion {
    id: id.into(),
    question: question.into(),
    options: options.iter().map(|s| (*s).into()).collect(),
    correct_answer,
    explanation: explanation.into(),
    difficulty,
  }
}

/// The default question bank, keyed by module name. Config-bank entries are
/// merged on top of this at startup.
pub fn question_bank() -> HashMap<String, Vec<QuizQuestion>> {
  use Difficulty::*;
  let mut bank = HashMap::new();

  bank.insert(
    "credit-cards".to_string(),
    vec![
      q(
        "cc1",
        "What factor has the biggest impact on your credit score?",
        &[
          "Payment history (35%)",
          "Credit utilization (30%)",
          "Length of credit history (15%)",
          "Types of credit accounts (10%)",
        ],
        0,
        "Payment history accounts for 35% of your credit score and is the most important factor.",
        Beginner,
      ),
      q(
        "cc2",
        "What is considered a good credit utilization ratio?",
        &["Below 30%", "Below 50%", "Below 70%", "Below 90%"],
        0,
        "Keeping your credit utilization below 30% is recommended for maintaining a good credit score.",
        Beginner,
      ),
      q(
        "cc3",
        "How long do negative marks typically stay on your credit report?",
        &["3 years", "5 years", "7 years", "10 years"],
        2,
        "Most negative marks stay on your credit report for 7 years, though some bankruptcies can stay for 10 years.",
        Intermediate,
      ),
      q(
        "cc4",
        "What is the difference between a charge card and a credit card?",
        &[
          "Charge cards must be paid in full each month",
          "Credit cards have higher interest rates",
          "Charge cards have spending limits",
          "There is no difference",
        ],
        0,
        "Charge cards require the full balance to be paid each month, while credit cards allow you to carry a balance.",
        Advanced,
      ),
    ],
  );

  bank.insert(
    "investments".to_string(),
    vec![
      q(
        "inv1",
        "What is diversification in investing?",
        &[
          "Investing in only one type of asset",
          "Spreading investments across different assets",
          "Only investing in stocks",
          "Keeping all money in savings",
        ],
        1,
        "Diversification means spreading your investments across different asset classes to reduce risk.",
        Beginner,
      ),
      q(
        "inv2",
        "What does P/E ratio stand for?",
        &["Price/Earnings", "Profit/Equity", "Price/Equity", "Profit/Earnings"],
        0,
        "P/E ratio stands for Price-to-Earnings ratio, which compares a company's stock price to its earnings per share.",
        Intermediate,
      ),
      q(
        "inv3",
        "What is compound interest?",
        &[
          "Interest paid only on the principal",
          "Interest paid on principal and accumulated interest",
          "A type of investment fee",
          "Interest that decreases over time",
        ],
        1,
        "Compound interest is interest calculated on both the initial principal and accumulated interest from previous periods.",
        Beginner,
      ),
      q(
        "inv4",
        "What is a bear market?",
        &[
          "A market with rising prices",
          "A market with falling prices of 20% or more",
          "A market with stable prices",
          "A market for trading animal stocks",
        ],
        1,
        "A bear market is characterized by falling stock prices of 20% or more from recent highs.",
        Intermediate,
      ),
    ],
  );

  bank.insert(
    "savings".to_string(),
    vec![
      q(
        "sav1",
        "What is the recommended emergency fund size for most people?",
        &[
          "1-2 months of expenses",
          "3-6 months of expenses",
          "1 year of expenses",
          "2 years of expenses",
        ],
        1,
        "Financial experts typically recommend having 3-6 months of living expenses saved for emergencies.",
        Beginner,
      ),
      q(
        "sav2",
        "What is the 50/30/20 budgeting rule?",
        &[
          "50% needs, 30% wants, 20% savings",
          "50% savings, 30% needs, 20% wants",
          "50% wants, 30% needs, 20% savings",
          "50% investments, 30% savings, 20% spending",
        ],
        0,
        "The 50/30/20 rule suggests allocating 50% for needs, 30% for wants, and 20% for savings and debt repayment.",
        Beginner,
      ),
      q(
        "sav3",
        "What type of account typically offers the highest interest rates for savings?",
        &[
          "Traditional savings account",
          "Checking account",
          "High-yield savings account",
          "Certificate of deposit (CD)",
        ],
        3,
        "CDs typically offer the highest interest rates among savings options, but require you to lock up your money for a specific term.",
        Intermediate,
      ),
      q(
        "sav4",
        "What is the purpose of an emergency fund?",
        &[
          "To invest in the stock market",
          "To cover unexpected expenses",
          "To buy luxury items",
          "To lend money to friends",
        ],
        1,
        "An emergency fund is designed to cover unexpected expenses like job loss, medical bills, or major repairs.",
        Beginner,
      ),
    ],
  );

  bank
}

fn item(id: &str, name: &str, category: BudgetCategory, amount: f64, description: &str) -> BudgetItem {
  BudgetItem {
    id: id.into(),
    name: name.into(),
    category,
    amount,
    description: description.into(),
  }
}

/// Starting allocation for the budget simulator.
pub fn default_budget_items() -> Vec<BudgetItem> {
  use BudgetCategory::*;
  vec![
    item("rent", "Rent", Need, 1200.0, "Monthly housing cost"),
    item("groceries", "Groceries", Need, 400.0, "Essential food items"),
    item("car-payment", "Car Payment", Need, 350.0, "Transportation costs"),
    item("utilities", "Utilities", Need, 150.0, "Electricity, water, internet"),
    item("dining-out", "Dining Out", Want, 300.0, "Restaurants and takeout"),
    item("entertainment", "Entertainment", Want, 200.0, "Movies, games, subscriptions"),
    item("shopping", "Shopping", Want, 250.0, "Clothes and misc items"),
    item(
      EMERGENCY_FUND_ID,
      "Emergency Fund",
      Need,
      300.0,
      "Savings for unexpected expenses",
    ),
  ]
}

fn option(id: &str, name: &str, risk: RiskTag, expected_return: f64, description: &str) -> InvestmentOption {
  InvestmentOption {
    id: id.into(),
    name: name.into(),
    risk,
    expected_return,
    description: description.into(),
    allocation: 0,
  }
}

/// The five asset classes of the investment challenge, all unallocated.
pub fn default_investment_options() -> Vec<InvestmentOption> {
  use RiskTag::*;
  vec![
    option("gov-bonds", "Government Bonds", Low, 3.0, "Safe, guaranteed returns"),
    option("index-funds", "Index Funds", Medium, 7.0, "Diversified market exposure"),
    option("growth-stocks", "Growth Stocks", High, 12.0, "High potential, high risk"),
    option("real-estate", "Real Estate", Medium, 9.0, "Property investment"),
    option("crypto", "Cryptocurrency", High, 15.0, "Volatile digital assets"),
  ]
}

/// Static regional comparison figures. Lookup is case-insensitive.
pub fn regional_snapshot(region: &str) -> Option<RegionalSnapshot> {
  let s = |a, b, c| RegionalSnapshot {
    average_savings_rate: a,
    average_emergency_fund: b,
    investment_participation: c,
  };
  match region.to_lowercase().as_str() {
    "north-america" => Some(s("4.2%", "$3,200", "28%")),
    "europe" => Some(s("5.8%", "€2,800", "35%")),
    "asia-pacific" => Some(s("8.1%", "¥180,000", "22%")),
    "latin-america" => Some(s("3.5%", "$1,800", "15%")),
    "africa" => Some(s("6.2%", "$1,200", "12%")),
    _ => None,
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn every_module_has_a_beginner_question() {
    for (module, questions) in question_bank() {
      assert!(
        questions.iter().any(|q| q.difficulty == Difficulty::Beginner),
        "module {module} has no beginner questions"
      );
      for q in &questions {
        assert!((3..=4).contains(&q.options.len()), "{}: bad option count", q.id);
        assert!(q.correct_answer < q.options.len(), "{}: answer out of range", q.id);
      }
    }
  }

  #[test]
  fn default_items_stay_within_category_caps() {
    for item in default_budget_items() {
      assert!(item.amount >= 0.0 && item.amount <= item.category.max_amount());
    }
    assert!(default_budget_items().iter().any(|i| i.id == EMERGENCY_FUND_ID));
  }

  #[test]
  fn unknown_region_has_no_snapshot() {
    assert!(regional_snapshot("atlantis").is_none());
    assert!(regional_snapshot("Europe").is_some());
  }
}
