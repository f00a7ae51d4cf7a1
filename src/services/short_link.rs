// Business logic for short links
use std::sync::Arc;

use async_trait::async_trait;
use validator::Validate;

use crate::errors::ServiceError;
use crate::models::{CreateShortLinkDto, ShortLink, ShortLinkResponseDto};
use crate::repositories::ShortLinkRepositoryTrait;
use crate::services::CodeAllocator;

type Result<T> = std::result::Result<T, ServiceError>;

#[async_trait]
pub trait ShortLinkServiceTrait {
    /// Validates the request, allocates a unique code and persists the link.
    async fn create(&self, dto: CreateShortLinkDto) -> Result<ShortLinkResponseDto>;

    /// Returns all stored links, newest first.
    async fn list(&self) -> Result<Vec<ShortLinkResponseDto>>;

    /// Resolves a code to its original URL, counting the click.
    async fn resolve(&self, code: &str) -> Result<ShortLink>;
}

pub struct ShortLinkService<R> {
    repository: Arc<R>,
    allocator: CodeAllocator<R>,
}

impl<R: ShortLinkRepositoryTrait + Send + Sync> ShortLinkService<R> {
    pub fn new(repository: Arc<R>, allocator: CodeAllocator<R>) -> Self {
        Self {
            repository,
            allocator,
        }
    }
}

#[async_trait]
impl<R: ShortLinkRepositoryTrait + Send + Sync> ShortLinkServiceTrait for ShortLinkService<R> {
    async fn create(&self, dto: CreateShortLinkDto) -> Result<ShortLinkResponseDto> {
        if let Err(e) = dto.validate() {
            return Err(ServiceError::Validation(e.to_string()));
        }

        let link = self.allocator.allocate(&dto.original_url).await?;

        Ok(ShortLinkResponseDto::from(link))
    }

    async fn list(&self) -> Result<Vec<ShortLinkResponseDto>> {
        let links = self.repository.find_all().await?;

        Ok(links.into_iter().map(ShortLinkResponseDto::from).collect())
    }

    async fn resolve(&self, code: &str) -> Result<ShortLink> {
        match self.repository.resolve_and_count(code).await? {
            Some(link) => Ok(link),
            None => Err(ServiceError::NotFound(format!(
                "No URL recorded for code '{}'",
                code
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AllocatorConfig;
    use crate::errors::RepositoryError;
    use crate::repositories::MockShortLinkRepositoryTrait;
    use chrono::Utc;
    use uuid::Uuid;

    fn link(code: &str, url: &str, clicks: i64) -> ShortLink {
        ShortLink {
            id: Uuid::new_v4(),
            original_url: url.to_string(),
            short_code: code.to_string(),
            clicks,
            created_at: Utc::now(),
        }
    }

    fn service(repo: MockShortLinkRepositoryTrait) -> ShortLinkService<MockShortLinkRepositoryTrait> {
        let repo = Arc::new(repo);
        let config = AllocatorConfig {
            code_length: 6,
            max_attempts: 10,
        };
        let allocator = CodeAllocator::new(repo.clone(), &config);
        ShortLinkService::new(repo, allocator)
    }

    #[tokio::test]
    async fn create_rejects_invalid_url_without_touching_storage() {
        let mut repo = MockShortLinkRepositoryTrait::new();
        repo.expect_insert_with_code().times(0);

        let svc = service(repo);
        let err = svc
            .create(CreateShortLinkDto {
                original_url: "not a url".to_string(),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, ServiceError::Validation(_)));
    }

    #[tokio::test]
    async fn create_returns_allocated_link() {
        let mut repo = MockShortLinkRepositoryTrait::new();
        repo.expect_insert_with_code()
            .times(1)
            .returning(|url, code| Ok(link(code, url, 0)));

        let svc = service(repo);
        let dto = svc
            .create(CreateShortLinkDto {
                original_url: "https://example.com/very/long/path".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(dto.original_url, "https://example.com/very/long/path");
        assert_eq!(dto.short_code.len(), 6);
        assert_eq!(dto.clicks, 0);
    }

    #[tokio::test]
    async fn create_surfaces_exhaustion_distinctly() {
        let mut repo = MockShortLinkRepositoryTrait::new();
        repo.expect_insert_with_code()
            .returning(|_, _| Err(RepositoryError::Conflict("short_code taken".to_string())));

        let svc = service(repo);
        let err = svc
            .create(CreateShortLinkDto {
                original_url: "https://example.com".to_string(),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, ServiceError::CodeSpaceExhausted(10)));
    }

    #[tokio::test]
    async fn list_maps_records_to_response_dtos() {
        let mut repo = MockShortLinkRepositoryTrait::new();
        repo.expect_find_all().times(1).returning(|| {
            Ok(vec![
                link("aZ3kLq", "https://example.com/a", 2),
                link("Bc9xYz", "https://example.com/b", 0),
            ])
        });

        let svc = service(repo);
        let links = svc.list().await.unwrap();

        assert_eq!(links.len(), 2);
        assert_eq!(links[0].short_code, "aZ3kLq");
        assert_eq!(links[0].clicks, 2);
    }

    #[tokio::test]
    async fn resolve_counts_the_click() {
        let mut repo = MockShortLinkRepositoryTrait::new();
        repo.expect_resolve_and_count()
            .withf(|code| code == "aZ3kLq")
            .times(1)
            .returning(|code| Ok(Some(link(code, "https://example.com/very/long/path", 1))));

        let svc = service(repo);
        let resolved = svc.resolve("aZ3kLq").await.unwrap();

        assert_eq!(resolved.original_url, "https://example.com/very/long/path");
        assert_eq!(resolved.clicks, 1);
    }

    #[tokio::test]
    async fn resolve_unknown_code_is_not_found() {
        let mut repo = MockShortLinkRepositoryTrait::new();
        repo.expect_resolve_and_count()
            .times(1)
            .returning(|_| Ok(None));

        let svc = service(repo);
        let err = svc.resolve("zzzzzz").await.unwrap_err();

        assert!(matches!(err, ServiceError::NotFound(_)));
    }
}
