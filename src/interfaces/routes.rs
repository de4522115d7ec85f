use actix_web::web;

use crate::handlers::{home::home, system::health_check};

mod json_error;
mod projects;
mod quizzes;
mod steps;
mod upload;
mod users;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(home);

    cfg.service(
        web::scope("/api")
            .service(health_check)
            .configure(steps::config_routes)
            .configure(projects::config_routes)
            .configure(upload::config_routes)
            .configure(quizzes::config_routes)
            .configure(users::config_routes)
    );

    cfg.configure(json_error::config_routes);
}
