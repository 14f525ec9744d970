/// Utility helpers shared by the remote adapters.
///
/// This module contains:
/// - Typed field extraction from JSON payloads
/// - Chia root / certificate path resolution
///
/// IMPORTANT:
/// - No source-specific business logic should live here.
/// - Field lookups use JSON pointers ("/a/b/0/c") so error
///   messages name the exact missing field.
///
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::error::AdapterError;

/// Read a numeric field as f64.
///
/// Accepts integers and floats. Network space exceeds u64 on
/// mainnet and arrives as a float, so f64 is the common type.
pub fn number_at(v: &Value, pointer: &str) -> Result<f64, AdapterError> {
    v.pointer(pointer)
        .ok_or_else(|| AdapterError::malformed(format!("missing field {pointer}")))?
        .as_f64()
        .ok_or_else(|| AdapterError::malformed(format!("field {pointer} is not a number")))
}

pub fn u64_at(v: &Value, pointer: &str) -> Result<u64, AdapterError> {
    v.pointer(pointer)
        .ok_or_else(|| AdapterError::malformed(format!("missing field {pointer}")))?
        .as_u64()
        .ok_or_else(|| {
            AdapterError::malformed(format!("field {pointer} is not an unsigned integer"))
        })
}

pub fn bool_at(v: &Value, pointer: &str) -> Result<bool, AdapterError> {
    v.pointer(pointer)
        .ok_or_else(|| AdapterError::malformed(format!("missing field {pointer}")))?
        .as_bool()
        .ok_or_else(|| AdapterError::malformed(format!("field {pointer} is not a boolean")))
}

pub fn array_at<'a>(v: &'a Value, pointer: &str) -> Result<&'a Vec<Value>, AdapterError> {
    v.pointer(pointer)
        .ok_or_else(|| AdapterError::malformed(format!("missing field {pointer}")))?
        .as_array()
        .ok_or_else(|| AdapterError::malformed(format!("field {pointer} is not an array")))
}

/// Default chia root.
///
/// `$CHIA_ROOT` wins, then `$HOME/.chia/mainnet`, then the
/// location used inside the official container image.
pub fn default_chia_root() -> PathBuf {
    if let Some(root) = std::env::var_os("CHIA_ROOT") {
        return PathBuf::from(root);
    }

    match std::env::var_os("HOME") {
        Some(home) => PathBuf::from(home).join(".chia").join("mainnet"),
        None => PathBuf::from("/root/.chia/mainnet"),
    }
}

/// Private client certificate and key of a node service.
///
/// Example for `full_node`:
///     <root>/config/ssl/full_node/private_full_node.crt
///     <root>/config/ssl/full_node/private_full_node.key
pub fn private_ssl_paths(chia_root: &Path, service: &str) -> (PathBuf, PathBuf) {
    let dir = chia_root.join("config").join("ssl").join(service);
    (
        dir.join(format!("private_{service}.crt")),
        dir.join(format!("private_{service}.key")),
    )
}
