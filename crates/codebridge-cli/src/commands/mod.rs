pub mod analyze;
pub mod ask;
pub mod example;
pub mod init;
pub mod realworld;
pub mod run;
pub mod status;
pub mod utils;
