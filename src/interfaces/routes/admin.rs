use actix_web::web;

use crate::{handlers::admin, middlewares::admin_guard::AdminGuardMiddleware};

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/admin")
            .route("/stats", web::get().to(admin::admin_stats))
            .route("/projects", web::get().to(admin::admin_list_projects))
            .route("/analytics", web::get().to(admin::admin_analytics))
            .wrap(AdminGuardMiddleware)
    );
}
