//! Layout constants shared by the key-blob readers

pub mod blob;
