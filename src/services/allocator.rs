// Race-safe short code allocation
use std::sync::Arc;

use log::{debug, warn};
use rand::Rng;

use crate::config::AllocatorConfig;
use crate::errors::{AllocatorError, RepositoryError};
use crate::models::ShortLink;
use crate::repositories::ShortLinkRepositoryTrait;

/// The 62-symbol alphabet codes are drawn from (0-9, A-Z, a-z)
pub const ALPHABET: &[u8] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

type Result<T> = std::result::Result<T, AllocatorError>;

/// Samples a candidate code of `length` characters, each drawn
/// independently and uniformly from the alphabet.
fn sample_code(length: usize) -> String {
    let mut rng = rand::rng();
    (0..length)
        .map(|_| ALPHABET[rng.random_range(0..ALPHABET.len())] as char)
        .collect()
}

/// Allocates unique short codes by racing candidates against the storage
/// layer's unique constraint.
///
/// Each attempt draws a fresh candidate and tries an atomic insert; losing
/// the race on a code is only ever signalled by the insert's uniqueness
/// conflict, so two concurrent callers can never both claim the same code.
/// Retries are bounded: once `max_attempts` conflicts pile up the allocator
/// reports exhaustion instead of spinning.
pub struct CodeAllocator<R> {
    repository: Arc<R>,
    code_length: usize,
    max_attempts: u32,
}

impl<R: ShortLinkRepositoryTrait + Send + Sync> CodeAllocator<R> {
    pub fn new(repository: Arc<R>, config: &AllocatorConfig) -> Self {
        Self {
            repository,
            code_length: config.code_length,
            max_attempts: config.max_attempts,
        }
    }

    /// Reserves a fresh code and persists the record under it in one step.
    pub async fn allocate(&self, original_url: &str) -> Result<ShortLink> {
        for attempt in 1..=self.max_attempts {
            let code = sample_code(self.code_length);

            match self.repository.insert_with_code(original_url, &code).await {
                Ok(link) => {
                    debug!(
                        "Allocated code '{}' on attempt {}/{}",
                        link.short_code, attempt, self.max_attempts
                    );
                    return Ok(link);
                }
                // Lost the race on this candidate; redraw
                Err(RepositoryError::Conflict(_)) => {
                    debug!(
                        "Code collision on attempt {}/{}, redrawing",
                        attempt, self.max_attempts
                    );
                }
                // Anything else is not a collision and must propagate unchanged
                Err(e) => return Err(e.into()),
            }
        }

        warn!(
            "Short code space exhausted after {} attempts (length {})",
            self.max_attempts, self.code_length
        );
        Err(AllocatorError::CodeSpaceExhausted {
            attempts: self.max_attempts,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::MockShortLinkRepositoryTrait;
    use chrono::Utc;
    use uuid::Uuid;

    fn link_with_code(code: &str) -> ShortLink {
        ShortLink {
            id: Uuid::new_v4(),
            original_url: "https://example.com/very/long/path".to_string(),
            short_code: code.to_string(),
            clicks: 0,
            created_at: Utc::now(),
        }
    }

    fn allocator_config(code_length: usize, max_attempts: u32) -> AllocatorConfig {
        AllocatorConfig {
            code_length,
            max_attempts,
        }
    }

    #[test]
    fn sampled_codes_have_requested_length_and_alphabet() {
        for length in [1, 6, 12] {
            let code = sample_code(length);
            assert_eq!(code.len(), length);
            assert!(code.bytes().all(|b| ALPHABET.contains(&b)));
        }
    }

    #[test]
    fn sampled_codes_vary() {
        // 62^16 candidates; two equal draws in a row means broken sampling
        assert_ne!(sample_code(16), sample_code(16));
    }

    #[tokio::test]
    async fn allocate_returns_link_on_first_success() {
        let mut repo = MockShortLinkRepositoryTrait::new();
        repo.expect_insert_with_code()
            .times(1)
            .returning(|_, code| Ok(link_with_code(code)));

        let allocator = CodeAllocator::new(Arc::new(repo), &allocator_config(6, 10));
        let link = allocator.allocate("https://example.com").await.unwrap();

        assert_eq!(link.short_code.len(), 6);
        assert!(link.short_code.bytes().all(|b| ALPHABET.contains(&b)));
    }

    #[tokio::test]
    async fn allocate_redraws_on_conflict_until_insert_wins() {
        let mut repo = MockShortLinkRepositoryTrait::new();
        let mut calls = 0;
        repo.expect_insert_with_code()
            .times(3)
            .returning(move |_, code| {
                calls += 1;
                if calls < 3 {
                    Err(RepositoryError::Conflict("short_code taken".to_string()))
                } else {
                    Ok(link_with_code(code))
                }
            });

        let allocator = CodeAllocator::new(Arc::new(repo), &allocator_config(6, 10));
        let link = allocator.allocate("https://example.com").await.unwrap();
        assert_eq!(link.original_url, "https://example.com/very/long/path");
    }

    #[tokio::test]
    async fn allocate_reports_exhaustion_after_max_attempts() {
        let mut repo = MockShortLinkRepositoryTrait::new();
        repo.expect_insert_with_code()
            .times(4)
            .returning(|_, _| Err(RepositoryError::Conflict("short_code taken".to_string())));

        let allocator = CodeAllocator::new(Arc::new(repo), &allocator_config(1, 4));
        let err = allocator.allocate("https://example.com").await.unwrap_err();

        assert!(matches!(
            err,
            AllocatorError::CodeSpaceExhausted { attempts: 4 }
        ));
    }

    #[tokio::test]
    async fn allocate_propagates_storage_errors_without_retrying() {
        let mut repo = MockShortLinkRepositoryTrait::new();
        repo.expect_insert_with_code()
            .times(1)
            .returning(|_, _| Err(RepositoryError::Database(sqlx::Error::PoolClosed)));

        let allocator = CodeAllocator::new(Arc::new(repo), &allocator_config(6, 10));
        let err = allocator.allocate("https://example.com").await.unwrap_err();

        assert!(matches!(
            err,
            AllocatorError::Repository(RepositoryError::Database(_))
        ));
    }
}
