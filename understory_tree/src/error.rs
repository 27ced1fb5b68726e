// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors raised while building trees.

/// Error returned when serialized tree data cannot be read.
#[derive(Debug, thiserror::Error)]
pub enum TreeError {
    /// The input is not valid JSON, or a record is missing its `id`.
    #[error("malformed tree records: {0}")]
    Json(#[from] serde_json::Error),
}
