pub mod album;
pub mod collection;
pub mod profile;
pub mod registry;
pub mod stats;
pub mod travellers;
pub mod view;
#[cfg(test)]
pub mod test_support;

pub use album::*;
pub use collection::*;
pub use profile::*;
pub use registry::*;
pub use stats::*;
pub use travellers::*;
pub use view::*;
