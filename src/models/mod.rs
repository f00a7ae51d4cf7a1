mod short_link;

pub use short_link::{CreateShortLinkDto, ResolvedUrlDto, ShortLink, ShortLinkResponseDto};
