pub mod projects;
pub mod quizzes;
pub mod steps;
pub mod upload;
pub mod users;
