use actix_web::web;

use crate::handlers::{auth, posts, projects, system::admin_health_check};

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/admin")
            .service(admin_health_check)
            .service(auth::admin_dashboard)
            .service(
                web::scope("/posts")
                    .service(
                        web::resource("")
                            .route(web::get().to(posts::admin_get_all_posts))
                            .route(web::post().to(posts::create_post))
                    )
                    .service(
                        web::resource("/{post_id}/publish")
                            .route(web::post().to(posts::toggle_publish_post))
                    )
                    .service(
                        web::resource("/{post_id}")
                            .route(web::get().to(posts::admin_get_post))
                            .route(web::put().to(posts::update_post))
                            .route(web::delete().to(posts::delete_post))
                    )
            )
            .service(
                web::scope("/projects")
                    .service(
                        web::resource("")
                            .route(web::get().to(projects::admin_get_all_projects))
                            .route(web::post().to(projects::create_project))
                    )
                    .service(
                        web::resource("/{project_id}")
                            .route(web::get().to(projects::admin_get_project))
                            .route(web::put().to(projects::update_project))
                            .route(web::delete().to(projects::delete_project))
                    )
            )
    );
}
