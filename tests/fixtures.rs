use chrono::Utc;
use learning_tracker::entities::{
    project::{Difficulty, Project},
    quiz::{Quiz, QuizDifficulty, QuizQuestion},
    step::{ProjectStep, StepInsert, StepPriority, StepStatus},
    user::User,
};
use sqlx::types::Json;
use uuid::Uuid;

#[allow(dead_code)]
pub fn project(id: Uuid) -> Project {
    let now = Utc::now();
    Project {
        id,
        title: "Markdown blog engine".into(),
        description: "Render posts from markdown files".into(),
        difficulty: Difficulty::Intermediate,
        duration: "3 weeks".into(),
        technologies: vec!["Rust".into(), "actix-web".into()],
        objectives: vec!["Parse front matter".into()],
        prerequisites: vec![],
        resources: vec![],
        github_url: Some("https://github.com/learner/blog".into()),
        demo_url: None,
        created_at: now,
        updated_at: now,
    }
}

#[allow(dead_code)]
pub fn step(project_id: Uuid, status: StepStatus, order: i32) -> ProjectStep {
    let now = Utc::now();
    ProjectStep {
        id: Uuid::new_v4(),
        project_id,
        title: format!("Step {}", order),
        description: String::new(),
        status,
        priority: StepPriority::Medium,
        hours: 2.0,
        actual_hours: 0.0,
        start_date: None,
        end_date: None,
        notes: String::new(),
        order,
        created_at: now,
        updated_at: now,
    }
}

#[allow(dead_code)]
pub fn stored_step(insert: StepInsert) -> ProjectStep {
    let now = Utc::now();
    ProjectStep {
        id: Uuid::new_v4(),
        project_id: insert.project_id,
        title: insert.title,
        description: insert.description,
        status: insert.status,
        priority: insert.priority,
        hours: insert.hours,
        actual_hours: insert.actual_hours,
        start_date: insert.start_date,
        end_date: insert.end_date,
        notes: insert.notes,
        order: insert.order,
        created_at: now,
        updated_at: now,
    }
}

#[allow(dead_code)]
pub fn user(email: &str, cv_url: Option<String>) -> User {
    let now = Utc::now();
    User {
        id: Uuid::new_v4(),
        email: email.into(),
        cv_url,
        created_at: now,
        updated_at: now,
    }
}

#[allow(dead_code)]
pub fn quiz(id: Uuid, correct_answers: &[usize]) -> Quiz {
    let now = Utc::now();
    Quiz {
        id,
        title: "Ownership".into(),
        description: "Moves, borrows and lifetimes".into(),
        questions: Json(
            correct_answers
                .iter()
                .map(|&correct_answer| QuizQuestion {
                    question: "Which is valid?".into(),
                    options: vec!["first".into(), "second".into(), "third".into()],
                    correct_answer,
                })
                .collect(),
        ),
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
