//! Application state: the in-memory stores and the quiz question bank.
//!
//! This module owns:
//!   - user / progress / quiz-attempt / game-score stores (by id, with
//!     sequential id counters, behind RwLocks)
//!   - the question bank (built-in catalog merged with the optional TOML bank)
//!
//! Points mutations go through `add_points`, which performs the
//! read-modify-write under a single write lock so concurrent submissions for
//! the same user cannot drop an increment.

use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use rand::thread_rng;
use tokio::sync::RwLock;
use tracing::{info, instrument};

use crate::catalog::question_bank;
use crate::config::load_quiz_bank_from_env;
use crate::domain::{
    Difficulty, GameScore, GameType, QuizAttempt, QuizQuestion, User, UserProgress,
};
use crate::protocol::{NewUserIn, UserUpdateIn};

#[derive(Clone)]
pub struct AppState {
    pub users: Arc<RwLock<HashMap<i64, User>>>,
    pub progress: Arc<RwLock<HashMap<i64, UserProgress>>>,
    pub quiz_attempts: Arc<RwLock<HashMap<i64, QuizAttempt>>>,
    pub game_scores: Arc<RwLock<HashMap<i64, GameScore>>>,
    next_user_id: Arc<AtomicI64>,
    next_progress_id: Arc<AtomicI64>,
    next_attempt_id: Arc<AtomicI64>,
    next_score_id: Arc<AtomicI64>,
    /// Immutable after startup.
    pub bank: HashMap<String, Vec<QuizQuestion>>,
}

impl AppState {
    /// Build state from env: built-in question catalog plus the optional
    /// TOML bank, empty stores, counters starting at 1.
    #[instrument(level = "info", skip_all)]
    pub fn new() -> Self {
        let mut bank = question_bank();
        for question in load_quiz_bank_from_env() {
            bank.entry(question.0).or_default().push(question.1);
        }

        // Inventory summary by module/difficulty.
        for (module, questions) in &bank {
            let mut by_diff: HashMap<Difficulty, usize> = HashMap::new();
            for q in questions {
                *by_diff.entry(q.difficulty).or_default() += 1;
            }
            info!(
                target: "quiz",
                %module,
                total = questions.len(),
                beginner = by_diff.get(&Difficulty::Beginner).copied().unwrap_or(0),
                intermediate = by_diff.get(&Difficulty::Intermediate).copied().unwrap_or(0),
                advanced = by_diff.get(&Difficulty::Advanced).copied().unwrap_or(0),
                "Startup question inventory"
            );
        }

        Self {
            users: Arc::new(RwLock::new(HashMap::new())),
            progress: Arc::new(RwLock::new(HashMap::new())),
            quiz_attempts: Arc::new(RwLock::new(HashMap::new())),
            game_scores: Arc::new(RwLock::new(HashMap::new())),
            next_user_id: Arc::new(AtomicI64::new(1)),
            next_progress_id: Arc::new(AtomicI64::new(1)),
            next_attempt_id: Arc::new(AtomicI64::new(1)),
            next_score_id: Arc::new(AtomicI64::new(1)),
            bank,
        }
    }

    // -------- users --------

    #[instrument(level = "debug", skip(self, input), fields(username = %input.username))]
    pub async fn create_user(&self, input: NewUserIn) -> User {
        let user = User {
            id: self.next_user_id.fetch_add(1, Ordering::Relaxed),
            username: input.username,
            email: input.email,
            age: input.age,
            region: input.region,
            financial_goal: input.financial_goal,
            knowledge_level: input.knowledge_level,
            language: input.language.unwrap_or_else(|| "en".into()),
            points: 0,
            level: 1,
            streak: 0,
            created_at: Utc::now(),
        };
        self.users.write().await.insert(user.id, user.clone());
        user
    }

    pub async fn get_user(&self, id: i64) -> Option<User> {
        self.users.read().await.get(&id).cloned()
    }

    pub async fn get_user_by_email(&self, email: &str) -> Option<User> {
        self.users
            .read()
            .await
            .values()
            .find(|u| u.email == email)
            .cloned()
    }

    /// Apply a partial update; absent fields keep their value.
    #[instrument(level = "debug", skip(self, updates), fields(%id))]
    pub async fn update_user(&self, id: i64, updates: UserUpdateIn) -> Option<User> {
        let mut users = self.users.write().await;
        let user = users.get_mut(&id)?;
        if let Some(v) = updates.username { user.username = v; }
        if let Some(v) = updates.email { user.email = v; }
        if let Some(v) = updates.age { user.age = v; }
        if let Some(v) = updates.region { user.region = v; }
        if let Some(v) = updates.financial_goal { user.financial_goal = v; }
        if let Some(v) = updates.knowledge_level { user.knowledge_level = v; }
        if let Some(v) = updates.language { user.language = v; }
        if let Some(v) = updates.points { user.points = v; }
        if let Some(v) = updates.level { user.level = v; }
        if let Some(v) = updates.streak { user.streak = v; }
        Some(user.clone())
    }

    /// Add earned points to the user's running total. Read-modify-write under
    /// one write lock; increments from concurrent submissions serialize here.
    #[instrument(level = "debug", skip(self), fields(%user_id, %delta))]
    pub async fn add_points(&self, user_id: i64, delta: i64) -> Option<i64> {
        let mut users = self.users.write().await;
        let user = users.get_mut(&user_id)?;
        user.points = user.points.saturating_add(delta);
        Some(user.points)
    }

    // -------- progress --------

    pub async fn progress_for_user(&self, user_id: i64) -> Vec<UserProgress> {
        self.progress
            .read()
            .await
            .values()
            .filter(|p| p.user_id == user_id)
            .cloned()
            .collect()
    }

    pub async fn progress_for_module(&self, user_id: i64, module: &str) -> Option<UserProgress> {
        self.progress
            .read()
            .await
            .values()
            .find(|p| p.user_id == user_id && p.module == module)
            .cloned()
    }

    /// Update the module row in place if it exists, otherwise insert a new
    /// one. `last_accessed` is refreshed either way.
    #[instrument(level = "debug", skip(self), fields(%user_id, %module))]
    pub async fn upsert_progress(
        &self,
        user_id: i64,
        module: &str,
        completed_lessons: Option<i64>,
        total_lessons: i64,
    ) -> UserProgress {
        let mut progress = self.progress.write().await;
        if let Some(existing) = progress
            .values_mut()
            .find(|p| p.user_id == user_id && p.module == module)
        {
            if let Some(done) = completed_lessons {
                existing.completed_lessons = done;
            }
            existing.last_accessed = Utc::now();
            return existing.clone();
        }

        let row = UserProgress {
            id: self.next_progress_id.fetch_add(1, Ordering::Relaxed),
            user_id,
            module: module.to_string(),
            completed_lessons: completed_lessons.unwrap_or(0),
            total_lessons,
            last_accessed: Utc::now(),
        };
        progress.insert(row.id, row.clone());
        row
    }

    // -------- quiz --------

    /// Select questions for a quiz round using the process rng.
    pub async fn quiz_questions(
        &self,
        module: &str,
        level: Difficulty,
        count: usize,
    ) -> Vec<QuizQuestion> {
        crate::quiz::select_questions(&self.bank, module, level, count, &mut thread_rng())
    }

    pub async fn record_quiz_attempt(
        &self,
        user_id: i64,
        module: &str,
        score: i64,
        total_questions: i64,
    ) -> QuizAttempt {
        let attempt = QuizAttempt {
            id: self.next_attempt_id.fetch_add(1, Ordering::Relaxed),
            user_id,
            module: module.to_string(),
            score,
            total_questions,
            completed_at: Utc::now(),
        };
        self.quiz_attempts
            .write()
            .await
            .insert(attempt.id, attempt.clone());
        attempt
    }

    pub async fn quiz_attempts_for_user(&self, user_id: i64) -> Vec<QuizAttempt> {
        let mut attempts: Vec<QuizAttempt> = self
            .quiz_attempts
            .read()
            .await
            .values()
            .filter(|a| a.user_id == user_id)
            .cloned()
            .collect();
        attempts.sort_by_key(|a| a.id);
        attempts
    }

    pub async fn quiz_attempts_for_module(&self, user_id: i64, module: &str) -> Vec<QuizAttempt> {
        let mut attempts: Vec<QuizAttempt> = self
            .quiz_attempts
            .read()
            .await
            .values()
            .filter(|a| a.user_id == user_id && a.module == module)
            .cloned()
            .collect();
        attempts.sort_by_key(|a| a.id);
        attempts
    }

    // -------- games --------

    pub async fn record_game_score(
        &self,
        user_id: i64,
        game_type: GameType,
        score: i64,
    ) -> GameScore {
        let row = GameScore {
            id: self.next_score_id.fetch_add(1, Ordering::Relaxed),
            user_id,
            game_type,
            score,
            completed_at: Utc::now(),
        };
        self.game_scores.write().await.insert(row.id, row.clone());
        row
    }

    pub async fn game_scores_for_user(&self, user_id: i64) -> Vec<GameScore> {
        let mut scores: Vec<GameScore> = self
            .game_scores
            .read()
            .await
            .values()
            .filter(|s| s.user_id == user_id)
            .cloned()
            .collect();
        scores.sort_by_key(|s| s.id);
        scores
    }

    pub async fn best_game_score(&self, user_id: i64, game_type: GameType) -> Option<GameScore> {
        self.game_scores
            .read()
            .await
            .values()
            .filter(|s| s.user_id == user_id && s.game_type == game_type)
            .max_by_key(|s| s.score)
            .cloned()
    }
}
