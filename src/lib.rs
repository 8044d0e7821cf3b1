//! Batch Image Upload Service
//!
//! This library provides the core functionality for imgbatch: accept a batch
//! of image URLs as a job, download each one concurrently, re-upload the
//! successful fetches to a remote image host, and track per-URL outcome in a
//! pollable job record.

pub mod app_state;
pub mod config;
pub mod models;
pub mod routes;
pub mod services;
pub mod store;
