//! LearnScope - Adaptive learning-difficulty screening engine
//!
//! This crate turns a child's emotion feed, answered questions and
//! finished mini-games into per-channel risk scores and a report, while
//! adapting question difficulty per task domain.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
