pub mod bidding;
pub mod clock;
pub mod config;
pub mod database;
pub mod error;
pub mod formatting;
pub mod handlers;
pub mod listing;
pub mod marketplace;
pub mod repository;
pub mod timer;
pub mod views;
