use actix_web::web;

use crate::handlers::{create_handler, list_handler, resolve_handler};

// Configure short link routes. The catch-all resolve route is registered
// last so the fixed paths keep precedence.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/short", web::post().to(create_handler));
    cfg.route("/urls", web::get().to(list_handler));
    cfg.route("/{short_code}", web::get().to(resolve_handler));
}
