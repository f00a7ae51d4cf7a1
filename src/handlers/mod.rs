mod short_link;

pub use short_link::{create_handler, list_handler, resolve_handler, ShortLinkServiceType};
