pub mod chat;
pub mod listmodels;
