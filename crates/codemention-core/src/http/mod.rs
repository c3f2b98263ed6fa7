//! HTTP clients for external services

pub mod client;

pub use client::GitHubApiClient;
