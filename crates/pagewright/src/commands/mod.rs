pub mod build;
pub mod init;
pub mod paths;
pub mod render;
pub mod serve;
