use actix_web::web;

use crate::handlers::{github, projects};

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/projects")
            .service(
                web::resource("")
                    .route(web::get().to(projects::list_projects))
                    .route(web::post().to(projects::create_project))
            )
            // registered before /{project_id} so the literal segment wins
            .service(
                web::resource("/sync-github")
                    .route(web::post().to(github::sync_github))
            )
            .service(
                web::resource("/{project_id}")
                    .route(web::patch().to(projects::update_project))
                    .route(web::delete().to(projects::delete_project))
            )
            .service(
                web::resource("/{project_id}/view")
                    .route(web::post().to(projects::track_view))
            )
    );
}
