pub mod home;
pub mod projects;
pub mod quizzes;
pub mod steps;
pub mod system;
pub mod upload;
pub mod users;
