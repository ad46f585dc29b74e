pub mod auth;
pub mod company;
pub mod configuration;
pub mod contact;
pub mod contact_import;
pub mod metadata;
pub mod user;
