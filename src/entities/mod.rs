pub mod access_code;
pub mod word_bank;
