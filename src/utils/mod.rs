pub mod format;
pub mod parse;
pub mod time_utils;
