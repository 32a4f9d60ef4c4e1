// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the `casetel` library.
//!
//! This module provides the error hierarchy for failures across the library:
//! value validation, telnet session communication, and response parsing.

use thiserror::Error;

use crate::types::ZoneId;

/// The main error type for this library.
///
/// This enum encompasses all possible errors that can occur when talking
/// to a Lutron bridge.
#[derive(Debug, Error)]
pub enum Error {
    /// Error occurred during value validation.
    #[error("value error: {0}")]
    Value(#[from] ValueError),

    /// Error occurred during session communication.
    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    /// Error occurred while parsing a response line.
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// Failed to read a file (for example an integration report).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A zone id was not found in the registry.
    #[error("zone {0} is not known")]
    UnknownZone(ZoneId),

    /// An operation was interrupted before it completed.
    #[error("interrupted")]
    Interrupted,
}

/// Errors related to value validation and constraints.
///
/// These errors occur when attempting to create constrained types
/// with invalid values.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValueError {
    /// A light level is outside the allowed range.
    #[error("level {actual} is out of range [0.0, 100.0]")]
    LevelOutOfRange {
        /// The actual value that was provided.
        actual: f32,
    },

    /// A zone id is not a positive integer.
    #[error("invalid zone id: {0}")]
    InvalidZoneId(String),

    /// A pair of intervals is inverted (minimum exceeds maximum).
    #[error("minimum interval {min}s exceeds maximum interval {max}s")]
    IntervalOrder {
        /// The provided minimum, in seconds.
        min: f32,
        /// The provided maximum, in seconds.
        max: f32,
    },

    /// A duration in seconds is negative or not a number.
    #[error("duration {actual}s is not a non-negative number")]
    InvalidDuration {
        /// The actual value that was provided.
        actual: f32,
    },

    /// A fade time cannot be carried on the wire, which takes whole seconds.
    #[error("fade time {0:?} is not a whole number of seconds")]
    InvalidFadeTime(std::time::Duration),
}

/// Errors related to the telnet session with the bridge.
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// The underlying socket operation failed.
    #[error("socket error: {0}")]
    Io(#[from] std::io::Error),

    /// Connection to the bridge failed.
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// The bridge closed the connection.
    #[error("connection closed by bridge")]
    ConnectionClosed,

    /// An expected sentinel did not arrive in time.
    #[error("timed out after {0} ms waiting for the bridge")]
    Timeout(u64),

    /// The bridge reported an error in a command response.
    #[error("bridge error: {0}")]
    Bridge(String),

    /// Internal event channel was closed.
    #[error("event channel closed")]
    ChannelClosed,
}

/// Errors related to parsing bridge response lines.
#[derive(Debug, Error)]
pub enum ParseError {
    /// JSON parsing of an integration report failed.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// Expected field is missing from a response line.
    #[error("missing field in response: {0}")]
    MissingField(String),

    /// A line does not match the expected `~`-prefixed shape.
    #[error("unexpected response format: {0}")]
    UnexpectedFormat(String),

    /// Failed to parse a specific field value.
    #[error("failed to parse {field}: {message}")]
    InvalidValue {
        /// The field that failed to parse.
        field: String,
        /// Description of the parsing failure.
        message: String,
    },
}

/// A specialized Result type for this library.
pub type Result<T> = std::result::Result<T, Error>;
