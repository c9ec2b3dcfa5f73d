pub mod archive;
pub mod article;
