/// Database configuration and connection management
pub mod database;

/// Seed catalog (units, products, groups) loaded from config.toml
pub mod catalog;
