pub mod classify;
pub mod config;
pub mod info;
pub mod init;
pub mod replay;
