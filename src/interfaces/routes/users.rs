use actix_web::web;

use crate::handlers::users;

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/users")
            .service(web::resource("").route(web::post().to(users::create_user)))
            .service(web::resource("/{email}").route(web::get().to(users::get_user)))
    );
}
