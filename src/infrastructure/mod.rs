pub mod http_client;
pub mod photo_listing;
pub mod placeholder_directory;
pub mod session_store;

pub use http_client::*;
pub use photo_listing::*;
pub use placeholder_directory::*;
pub use session_store::*;
