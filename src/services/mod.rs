use std::sync::Arc;

use actix_web::web;

mod allocator;
mod short_link;

pub use allocator::{CodeAllocator, ALPHABET};
pub use short_link::{ShortLinkService, ShortLinkServiceTrait};

use crate::{config::AllocatorConfig, db::Database, repositories::ShortLinkRepository};

/// Service Register
pub fn register(db: Database, allocator_config: &AllocatorConfig, cfg: &mut web::ServiceConfig) {
    let repository = Arc::new(ShortLinkRepository::new(db));
    let allocator = CodeAllocator::new(repository.clone(), allocator_config);
    let service = ShortLinkService::new(repository, allocator);
    cfg.app_data(web::Data::new(service));
}
