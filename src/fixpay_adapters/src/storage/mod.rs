pub mod local_object_storage;

pub use local_object_storage::LocalObjectStorage;
