use actix_web::web;

use crate::handlers::quizzes;

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/quiz")
            .service(
                web::resource("")
                    .route(web::get().to(quizzes::list_quizzes))
                    .route(web::post().to(quizzes::create_quiz))
            )
            .service(
                web::resource("/{quiz_id}")
                    .route(web::get().to(quizzes::get_quiz))
                    .route(web::put().to(quizzes::update_quiz))
            )
            .service(
                web::resource("/{quiz_id}/submit")
                    .route(web::post().to(quizzes::submit_quiz))
            )
    );
}
