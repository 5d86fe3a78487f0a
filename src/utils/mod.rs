pub mod dir_utils;
pub mod file;
pub mod generate;
pub mod normalize;
pub mod secret;
pub mod time_utils;
