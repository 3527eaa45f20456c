pub mod file_ops;
pub mod trash;
pub mod navigator;
pub mod browser;
pub mod undo;
