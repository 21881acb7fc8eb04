use actix_web::web;

use crate::handlers::{feeds, home::home, upload};

mod admin;
mod auth;
mod content;
mod json_error;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(home);
    cfg.service(feeds::sitemap);
    cfg.service(feeds::rss);

    cfg.service(
        web::scope("/api")
            .service(web::resource("/upload").route(web::post().to(upload::upload_image)))
            .service(
                web::scope("/v1")
                    .configure(auth::config_routes)
                    .configure(content::config_routes)
                    .configure(admin::config_routes),
            ),
    );

    cfg.configure(json_error::config_routes);
}
