pub mod health;
pub mod pages;
pub mod tools;

use actix_web::web;

/// Register every route on an app or scope
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(pages::index)
        .service(pages::tool_page)
        .service(health::health)
        .service(tools::list_tools)
        .service(tools::extract)
        .service(tools::generate)
        .service(tools::render)
        .service(tools::run);
}
