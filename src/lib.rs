//! Thread Press library.
//!
//! A service that reads a local collection of discussion-thread posts, rewrites
//! each one into a cohesive Markdown article with an LLM, persists the results
//! as a flat JSON collection, and serves a web UI for browsing them.

pub mod articles;
pub mod config;
pub mod generator;
pub mod posts;
pub mod store;
pub mod web;
