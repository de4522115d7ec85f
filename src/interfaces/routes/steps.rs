use actix_web::web;

use crate::handlers::steps;

/// Registered ahead of the project scope so `/projects/{id}/steps/...`
/// is not swallowed by it.
pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/projects/{project_id}/steps")
            .service(
                web::resource("")
                    .route(web::get().to(steps::list_steps))
                    .route(web::post().to(steps::create_step))
                    .route(web::put().to(steps::reorder_steps))
            )
            .service(
                web::resource("/defaults")
                    .route(web::post().to(steps::seed_default_steps))
            )
            .service(
                web::resource("/{step_id}")
                    .route(web::get().to(steps::get_step))
                    .route(web::put().to(steps::update_step))
                    .route(web::delete().to(steps::delete_step))
            )
    );
}
