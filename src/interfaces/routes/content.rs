use actix_web::web;

use crate::handlers::{home, posts, projects};

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/home")
            .route(web::get().to(home::home_content))
    );

    cfg.service(
        web::scope("/posts")
            .service(
                web::resource("")
                    .route(web::get().to(posts::get_published_posts))
            )
            .service(
                web::resource("/{slug}")
                    .route(web::get().to(posts::get_post_by_slug))
            )
    );

    cfg.service(
        web::scope("/projects")
            .service(
                web::resource("")
                    .route(web::get().to(projects::get_all_projects))
            )
            .service(
                web::resource("/{slug}")
                    .route(web::get().to(projects::get_project_by_slug))
            )
    );
}
