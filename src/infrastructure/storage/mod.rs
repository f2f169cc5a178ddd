mod azure_store;
mod connection_string;
mod local_store;
mod object_blob_store;
mod store_factory;

pub use connection_string::StorageConnectionString;
pub use object_blob_store::ObjectBlobStore;
pub use store_factory::{BlobContainers, BlobStoreFactory};
