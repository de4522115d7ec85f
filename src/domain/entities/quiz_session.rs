//! Local quiz-taking flow: browse the catalogue, answer questions one by one,
//! then score the recorded answers.
//!
//! The session never talks to storage. Finishing returns a [`QuizResult`] and
//! the caller decides how to persist it. The quiz time limit is display-only
//! and not enforced here.

use derive_more::Display;
use uuid::Uuid;

use crate::entities::quiz::{Quiz, QuizQuestion, QuizResult};

#[derive(Debug, Display, PartialEq, Eq)]
pub enum QuizSessionError {
    #[display("Quiz has no questions")]
    NoQuestions,

    #[display("Option {_0} does not exist for this question")]
    InvalidOption(usize),

    #[display("A quiz is already in progress")]
    AlreadyStarted,

    #[display("No quiz is in progress")]
    NotInQuiz,
}

impl std::error::Error for QuizSessionError {}

#[derive(Debug, Clone, PartialEq)]
pub struct ActiveQuiz {
    pub quiz_id: Uuid,
    pub questions: Vec<QuizQuestion>,
    pub passing_score: i32,
    pub index: usize,
    pub selected: Option<usize>,
    pub answers: Vec<Option<usize>>,
}

impl ActiveQuiz {
    pub fn current_question(&self) -> &QuizQuestion {
        &self.questions[self.index]
    }

    pub fn is_last_question(&self) -> bool {
        self.index + 1 == self.questions.len()
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum QuizSession {
    #[default]
    Browsing,
    InQuiz(ActiveQuiz),
    Finished { quiz_id: Uuid, result: QuizResult },
}

impl QuizSession {
    pub fn new() -> Self {
        QuizSession::Browsing
    }

    /// Browsing → InQuiz. A quiz without questions leaves the session as is.
    pub fn start(&mut self, quiz: &Quiz) -> Result<(), QuizSessionError> {
        if matches!(self, QuizSession::InQuiz(_)) {
            return Err(QuizSessionError::AlreadyStarted);
        }
        if quiz.questions().is_empty() {
            return Err(QuizSessionError::NoQuestions);
        }

        let questions = quiz.questions().to_vec();
        *self = QuizSession::InQuiz(ActiveQuiz {
            quiz_id: quiz.id,
            answers: vec![None; questions.len()],
            questions,
            passing_score: quiz.passing_score,
            index: 0,
            selected: None,
        });
        Ok(())
    }

    pub fn select(&mut self, option: usize) -> Result<(), QuizSessionError> {
        let active = self.active_mut()?;
        if option >= active.current_question().options.len() {
            return Err(QuizSessionError::InvalidOption(option));
        }
        active.selected = Some(option);
        Ok(())
    }

    /// Records the current selection and moves forward. On the last question
    /// the session is scored and moves to `Finished`.
    pub fn next(&mut self) -> Result<Option<QuizResult>, QuizSessionError> {
        let active = self.active_mut()?;
        active.answers[active.index] = active.selected;

        if !active.is_last_question() {
            active.index += 1;
            active.selected = active.answers[active.index];
            return Ok(None);
        }

        let result = score_answers(&active.questions, &active.answers, active.passing_score);
        let quiz_id = active.quiz_id;
        *self = QuizSession::Finished { quiz_id, result };
        Ok(Some(result))
    }

    /// Steps back and restores the answer recorded for that question.
    pub fn previous(&mut self) -> Result<(), QuizSessionError> {
        let active = self.active_mut()?;
        if active.index > 0 {
            active.index -= 1;
            active.selected = active.answers[active.index];
        }
        Ok(())
    }

    pub fn reset(&mut self) {
        *self = QuizSession::Browsing;
    }

    pub fn result(&self) -> Option<&QuizResult> {
        match self {
            QuizSession::Finished { result, .. } => Some(result),
            _ => None,
        }
    }

    fn active_mut(&mut self) -> Result<&mut ActiveQuiz, QuizSessionError> {
        match self {
            QuizSession::InQuiz(active) => Ok(active),
            _ => Err(QuizSessionError::NotInQuiz),
        }
    }
}

/// Percentage of correct answers, rounded to the nearest integer.
pub fn score_answers(questions: &[QuizQuestion], answers: &[Option<usize>], passing_score: i32) -> QuizResult {
    let total = questions.len();
    let correct = questions
        .iter()
        .zip(answers.iter())
        .filter(|(question, answer)| **answer == Some(question.correct_answer))
        .count();

    let score = if total == 0 {
        0
    } else {
        (correct as f64 / total as f64 * 100.0).round() as i32
    };

    QuizResult {
        score,
        correct,
        total,
        passed: score >= passing_score,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::quiz::QuizDifficulty;
    use chrono::Utc;
    use sqlx::types::Json;

    fn question(correct_answer: usize) -> QuizQuestion {
        QuizQuestion {
            question: "Pick one".into(),
            options: vec!["a".into(), "b".into(), "c".into()],
            correct_answer,
        }
    }

    fn quiz(questions: Vec<QuizQuestion>) -> Quiz {
        let now = Utc::now();
        Quiz {
            id: Uuid::new_v4(),
            title: "Ownership".into(),
            description: "Borrowing rules".into(),
            questions: Json(questions),
            time_limit: 15,
            passing_score: 60,
            category: "rust".into(),
            difficulty: QuizDifficulty::Moyen,
            completed: false,
            score: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn quiz_without_questions_cannot_start() {
        let mut session = QuizSession::new();
        assert_eq!(session.start(&quiz(vec![])), Err(QuizSessionError::NoQuestions));
        assert_eq!(session, QuizSession::Browsing);
    }

    #[test]
    fn answering_every_question_finishes_with_score() {
        let mut session = QuizSession::new();
        session.start(&quiz(vec![question(0), question(1), question(2)])).unwrap();

        session.select(0).unwrap();
        assert_eq!(session.next().unwrap(), None);
        session.select(1).unwrap();
        assert_eq!(session.next().unwrap(), None);
        session.select(0).unwrap();
        let result = session.next().unwrap().unwrap();

        assert_eq!(result.correct, 2);
        assert_eq!(result.total, 3);
        assert_eq!(result.score, 67);
        assert!(result.passed);
        assert_eq!(session.result(), Some(&result));
    }

    #[test]
    fn previous_restores_recorded_selection() {
        let mut session = QuizSession::new();
        session.start(&quiz(vec![question(0), question(1)])).unwrap();

        session.select(2).unwrap();
        session.next().unwrap();
        session.previous().unwrap();

        let QuizSession::InQuiz(active) = &session else { panic!("expected quiz in progress") };
        assert_eq!(active.index, 0);
        assert_eq!(active.selected, Some(2));
    }

    #[test]
    fn moving_forward_restores_later_answers() {
        let mut session = QuizSession::new();
        session.start(&quiz(vec![question(0), question(1), question(2)])).unwrap();

        session.select(0).unwrap();
        session.next().unwrap();
        session.select(1).unwrap();
        session.next().unwrap();
        session.previous().unwrap();
        session.previous().unwrap();
        session.next().unwrap();

        let QuizSession::InQuiz(active) = &session else { panic!("expected quiz in progress") };
        assert_eq!(active.index, 1);
        assert_eq!(active.selected, Some(1));
    }

    #[test]
    fn previous_on_first_question_is_a_no_op() {
        let mut session = QuizSession::new();
        session.start(&quiz(vec![question(0)])).unwrap();
        session.previous().unwrap();

        let QuizSession::InQuiz(active) = &session else { panic!("expected quiz in progress") };
        assert_eq!(active.index, 0);
    }

    #[test]
    fn invalid_option_is_rejected() {
        let mut session = QuizSession::new();
        session.start(&quiz(vec![question(0)])).unwrap();
        assert_eq!(session.select(3), Err(QuizSessionError::InvalidOption(3)));
    }

    #[test]
    fn skipped_questions_count_as_wrong() {
        let result = score_answers(&[question(0), question(1)], &[None, Some(1)], 60);
        assert_eq!(result.score, 50);
        assert!(!result.passed);
    }

    #[test]
    fn transitions_outside_a_quiz_fail() {
        let mut session = QuizSession::new();
        assert_eq!(session.next(), Err(QuizSessionError::NotInQuiz));
        assert_eq!(session.previous(), Err(QuizSessionError::NotInQuiz));

        session.start(&quiz(vec![question(0)])).unwrap();
        session.reset();
        assert_eq!(session, QuizSession::Browsing);
    }
}
