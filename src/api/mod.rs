//! HTTP gateway shared by the GitHub and Vercel collaborators.
//!
//! [`Gateway`] is the seam: production code talks to the network through
//! [`ApiClient`], tests substitute a recording mock.

mod client;
mod endpoints;
mod gateway;
#[cfg(test)]
pub(crate) mod mock;

pub use client::ApiClient;
pub use endpoints::{Endpoints, DEFAULT_GITHUB_API_URL, DEFAULT_VERCEL_API_URL};
pub use gateway::{ApiResponse, Gateway};
