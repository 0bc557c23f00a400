//! Quiz question selection: filter the module's pool by the user's knowledge
//! level, shuffle, and take the requested count.

use std::collections::HashMap;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::domain::{Difficulty, QuizQuestion};

/// Pick up to `count` questions for `module` at `level`.
///
/// A level admits every difficulty at or below it, so the pools nest:
/// beginner ⊆ intermediate ⊆ advanced. Order is a fresh uniform shuffle on
/// every call; an unknown module yields an empty result and the caller must
/// cope with a zero-question quiz.
pub fn select_questions<R: Rng + ?Sized>(
  bank: &HashMap<String, Vec<QuizQuestion>>,
  module: &str,
  level: Difficulty,
  count: usize,
  rng: &mut R,
) -> Vec<QuizQuestion> {
  let mut pool: Vec<QuizQuestion> = bank
    .get(module)
    .map(|questions| {
      questions
        .iter()
        .filter(|q| q.difficulty <= level)
        .cloned()
        .collect()
    })
    .unwrap_or_default();

  pool.shuffle(rng);
  pool.truncate(count);
  pool
}
