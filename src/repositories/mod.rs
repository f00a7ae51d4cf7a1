mod short_link;

pub use short_link::{ShortLinkRepository, ShortLinkRepositoryTrait};

#[cfg(test)]
pub use short_link::MockShortLinkRepositoryTrait;
