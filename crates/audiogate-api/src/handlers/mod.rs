pub mod audio;
pub mod ping;
pub mod users;
