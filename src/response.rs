//! The JSON envelopes for successful responses.
//!
//! Failures use the same envelope with `success: false`, see [crate::Error].

use serde::{Deserialize, Serialize};

/// A successful response carrying `data`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// Always true, failures are reported by [crate::Error].
    pub success: bool,
    /// The response payload.
    pub data: T,
}

impl<T> ApiResponse<T> {
    /// Wrap `data` in a successful response.
    pub fn new(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// A successful response carrying a list of items and a summary of them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListResponse<T> {
    /// Always true, failures are reported by [crate::Error].
    pub success: bool,
    /// The number of items in `data`.
    pub count: usize,
    /// The sum of the amounts of the items in `data`.
    pub total: f64,
    /// The items.
    pub data: Vec<T>,
}

/// An empty object, for responses that have nothing to return.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Empty {}
