pub mod code_registry;
pub mod word_store;
