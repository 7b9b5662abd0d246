pub mod client;
pub mod datastore;
pub mod error;
pub mod keys;
pub mod messaging;
pub mod ordered;

pub use client::{CloudService, UserInfo};
pub use error::CloudError;
pub use keys::KeyStore;
pub use ordered::{OrderedEntry, OrderedEntryPage};
