use actix_web::{web, HttpResponse, Responder};
use log::{debug, info};

use crate::{
    errors::AppError,
    models::{CreateShortLinkDto, ResolvedUrlDto},
    repositories::ShortLinkRepository,
    services::{ShortLinkService, ShortLinkServiceTrait},
};

pub type ShortLinkServiceType = ShortLinkService<ShortLinkRepository>;

type Result<T> = std::result::Result<T, AppError>;

/// Create short link route handler
pub async fn create_handler(
    dto: web::Json<CreateShortLinkDto>,
    service: web::Data<ShortLinkServiceType>,
) -> Result<impl Responder> {
    let link = service.create(dto.into_inner()).await?;

    info!(
        "Created short link '{}' -> '{}'",
        link.short_code, link.original_url
    );
    Ok(HttpResponse::Created().json(link))
}

/// List all short links route handler
pub async fn list_handler(service: web::Data<ShortLinkServiceType>) -> Result<impl Responder> {
    let links = service.list().await?;

    Ok(HttpResponse::Ok().json(links))
}

/// Resolve route handler: looks up the code, counts the click and returns
/// the original URL. Issuing the actual HTTP redirect is left to callers.
pub async fn resolve_handler(
    path: web::Path<String>,
    service: web::Data<ShortLinkServiceType>,
) -> Result<impl Responder> {
    let short_code = path.into_inner();
    debug!("Resolve requested for code: {}", short_code);

    let link = service.resolve(&short_code).await?;

    info!(
        "Resolved '{}' to '{}' (click {})",
        short_code, link.original_url, link.clicks
    );
    Ok(HttpResponse::Ok().json(ResolvedUrlDto::from(link)))
}
