pub mod option_fields;
pub mod project;
pub mod quiz;
pub mod quiz_session;
pub mod step;
pub mod user;
pub mod validation;
