// Публичный API хранилища

pub mod jar;

pub use jar::StorageJar;
