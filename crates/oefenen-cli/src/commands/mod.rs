pub mod grade;
pub mod init;
pub mod levels;
pub mod path;
pub mod serve;
pub mod validate;
