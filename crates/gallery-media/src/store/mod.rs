//! Image store adapters

mod local;

pub use local::LocalImageStore;
