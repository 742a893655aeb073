pub mod config;
pub mod engine;
pub mod knowledge;
pub mod locator;
pub mod matcher;
pub mod models;
pub mod services;

pub use engine::ChatEngine;
pub use knowledge::KnowledgeBase;
pub use locator::FacilityLocator;
pub use matcher::SymptomMatcher;
