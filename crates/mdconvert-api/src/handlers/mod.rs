pub mod convert;
pub mod delete;
pub mod download;
pub mod files;
pub mod health;
pub mod info;
pub mod upload;
