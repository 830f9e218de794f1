// Business domains
pub mod activity;
pub mod auth;
pub mod profiles;
pub mod studio;
pub mod tools;
pub mod vault;
