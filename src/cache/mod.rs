//! Bundle cache: deterministic file names and the on-disk store.

mod name;
mod store;

pub use name::bundle_file_name;
pub use store::{BundleStore, Ensured};
