pub mod entities;
pub mod step_lifecycle;
pub mod use_cases;
