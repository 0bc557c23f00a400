//! Loading an extra quiz question bank from TOML.
//!
//! Deployments can point QUIZ_BANK_PATH at a TOML file to add questions on
//! top of the built-in catalog. Schema:
//!
//! ```toml
//! [[questions]]
//! module = "savings"
//! question = "..."
//! options = ["a", "b", "c"]
//! correct_answer = 1
//! explanation = "..."
//! difficulty = "intermediate"   # beginner | intermediate | advanced
//! # id = "sav9"                 # optional, uuid assigned when absent
//! ```

use serde::Deserialize;
use tracing::{error, info};
use uuid::Uuid;

use crate::domain::{Difficulty, QuizQuestion};

#[derive(Clone, Debug, Deserialize, Default)]
pub struct QuizBankConfig {
  #[serde(default)]
  pub questions: Vec<QuestionCfg>,
}

/// Question entry accepted in TOML configuration.
#[derive(Clone, Debug, Deserialize)]
pub struct QuestionCfg {
  #[serde(default)] pub id: Option<String>,
  pub module: String,
  pub question: String,
  pub options: Vec<String>,
  pub correct_answer: usize,
  #[serde(default)] pub explanation: String,
  #[serde(default)] pub difficulty: Difficulty,
}

/// Turn a parsed bank into (module, question) pairs ready to merge.
/// Individually malformed entries (wrong option count, answer index out of
/// range) are skipped with an error log; the rest still load.
pub fn questions_from_config(cfg: QuizBankConfig) -> Vec<(String, QuizQuestion)> {
  let mut out = Vec::new();
  for qc in cfg.questions {
    let id = qc.id.unwrap_or_else(|| Uuid::new_v4().to_string());
    if !(3..=4).contains(&qc.options.len()) || qc.correct_answer >= qc.options.len() {
      error!(target: "quiz", %id, module = %qc.module, "Skipping bank item: bad options or answer index.");
      continue;
    }
    out.push((
      qc.module,
      QuizQuestion {
        id,
        question: qc.question,
        options: qc.options,
        correct_answer: qc.correct_answer,
        explanation: qc.explanation,
        difficulty: qc.difficulty,
      },
    ));
  }
  out
}

/// Read QUIZ_BANK_PATH and return the merge-ready pairs. Missing env var,
/// unreadable file, or a parse error all yield an empty list.
pub fn load_quiz_bank_from_env() -> Vec<(String, QuizQuestion)> {
  let Ok(path) = std::env::var("QUIZ_BANK_PATH") else {
    return Vec::new();
  };
  let cfg = match std::fs::read_to_string(&path) {
    Ok(s) => match toml::from_str::<QuizBankConfig>(&s) {
      Ok(cfg) => {
        info!(target: "finlit_backend", %path, entries = cfg.questions.len(), "Loaded quiz bank (TOML)");
        cfg
      }
      Err(e) => {
        error!(target: "finlit_backend", %path, error = %e, "Failed to parse TOML quiz bank");
        return Vec::new();
      }
    },
    Err(e) => {
      error!(target: "finlit_backend", %path, error = %e, "Failed to read TOML quiz bank file");
      return Vec::new();
    }
  };
  questions_from_config(cfg)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn parses_bank_and_defaults_difficulty() {
    let toml_src = r#"
      [[questions]]
      module = "savings"
      question = "Extra?"
      options = ["a", "b", "c"]
      correct_answer = 2
    "#;
    let cfg: QuizBankConfig = toml::from_str(toml_src).unwrap();
    assert_eq!(cfg.questions.len(), 1);
    assert_eq!(cfg.questions[0].difficulty, Difficulty::Beginner);
    assert!(cfg.questions[0].id.is_none());
  }

  #[test]
  fn malformed_entries_are_skipped_not_fatal() {
    let toml_src = r#"
      [[questions]]
      module = "savings"
      question = "Too few options"
      options = ["a", "b"]
      correct_answer = 0

      [[questions]]
      module = "savings"
      question = "Answer out of range"
      options = ["a", "b", "c"]
      correct_answer = 3

      [[questions]]
      id = "sav9"
      module = "savings"
      question = "Fine"
      options = ["a", "b", "c"]
      correct_answer = 1
      difficulty = "advanced"
    "#;
    let cfg: QuizBankConfig = toml::from_str(toml_src).unwrap();
    let loaded = questions_from_config(cfg);
    assert_eq!(loaded.len(), 1);
    let (module, question) = &loaded[0];
    assert_eq!(module, "savings");
    assert_eq!(question.id, "sav9");
    assert_eq!(question.difficulty, Difficulty::Advanced);
  }

  #[test]
  fn entries_without_id_get_one_assigned() {
    let cfg: QuizBankConfig = toml::from_str(
      r#"
      [[questions]]
      module = "investments"
      question = "Extra?"
      options = ["a", "b", "c", "d"]
      correct_answer = 2
    "#,
    )
    .unwrap();
    let loaded = questions_from_config(cfg);
    assert_eq!(loaded.len(), 1);
    assert!(!loaded[0].1.id.is_empty());
  }
}
