// src/lib.rs

pub mod aggregate;
pub mod config;
pub mod db;
pub mod error;
pub mod extract;
pub mod nutrition;
pub mod repository;
pub mod service;
