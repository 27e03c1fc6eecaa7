pub mod config;
pub mod db;
pub mod matching;
pub mod models;
pub mod service;
pub mod tournament;
