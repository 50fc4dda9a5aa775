//! # Runtime Arguments
//!
//! Typed session arguments as the contract expects them. The wire type of
//! each argument is fixed by its variant; numeric inputs are parsed from
//! decimal text so that bit-width overflow is reported instead of wrapped.

use std::fmt;

use primitive_types::{U256, U512};
use serde::ser::{Serialize, SerializeStruct, Serializer};

use crate::domain::{AccountHash, ContractHash, MarketplaceError, Result};

/// Value of a session argument.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ArgValue {
    /// `String`.
    String(String),
    /// `u8`.
    U8(u8),
    /// `u64`.
    U64(u64),
    /// `u256`.
    U256(U256),
    /// `u512`.
    U512(U512),
    /// `key` holding an account hash.
    AccountKey(AccountHash),
    /// `key` holding a contract hash.
    ContractKey(ContractHash),
}

impl ArgValue {
    /// CLType name used by the submitter.
    pub fn cl_type_name(&self) -> &'static str {
        match self {
            ArgValue::String(_) => "String",
            ArgValue::U8(_) => "u8",
            ArgValue::U64(_) => "u64",
            ArgValue::U256(_) => "u256",
            ArgValue::U512(_) => "u512",
            ArgValue::AccountKey(_) | ArgValue::ContractKey(_) => "key",
        }
    }
}

impl fmt::Display for ArgValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgValue::String(s) => f.write_str(s),
            ArgValue::U8(v) => write!(f, "{v}"),
            ArgValue::U64(v) => write!(f, "{v}"),
            ArgValue::U256(v) => write!(f, "{v}"),
            ArgValue::U512(v) => write!(f, "{v}"),
            ArgValue::AccountKey(h) => f.write_str(&h.to_formatted_string()),
            ArgValue::ContractKey(h) => f.write_str(&h.to_formatted_string()),
        }
    }
}

/// Named session argument.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NamedArg {
    /// Argument name, verbatim as the contract reads it.
    pub name: &'static str,
    /// Typed value.
    pub value: ArgValue,
}

impl NamedArg {
    /// `name:type='value'` form accepted by `casper-client --session-arg`.
    pub fn to_simple_arg(&self) -> String {
        format!("{}:{}='{}'", self.name, self.value.cl_type_name(), self.value)
    }
}

impl Serialize for NamedArg {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("NamedArg", 3)?;
        state.serialize_field("name", self.name)?;
        state.serialize_field("cl_type", self.value.cl_type_name())?;
        state.serialize_field("value", &self.value.to_string())?;
        state.end()
    }
}

/// Ordered argument list of one deploy.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize)]
#[serde(transparent)]
pub struct RuntimeArgs(Vec<NamedArg>);

impl RuntimeArgs {
    /// Empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an argument, keeping insertion order.
    pub fn insert(&mut self, name: &'static str, value: ArgValue) {
        self.0.push(NamedArg { name, value });
    }

    /// Value of the argument called `name`.
    pub fn get(&self, name: &str) -> Option<&ArgValue> {
        self.0.iter().find(|arg| arg.name == name).map(|arg| &arg.value)
    }

    /// Arguments in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &NamedArg> {
        self.0.iter()
    }

    /// Number of arguments.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when no argument was added.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

// =============================================================================
// Bounded numeric parsing
// =============================================================================

fn digits<'a>(argument: &'static str, value: &'a str) -> Result<&'a str> {
    let trimmed = value.trim();
    if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return Err(MarketplaceError::InvalidArgument {
            argument,
            reason: format!("'{value}' is not an unsigned decimal integer"),
        });
    }
    Ok(trimmed)
}

fn out_of_range(argument: &'static str, value: &str, bound: &str) -> MarketplaceError {
    MarketplaceError::ArgumentOutOfRange {
        argument,
        value: value.trim().to_string(),
        bound: bound.to_string(),
    }
}

/// Parse an 8-bit unsigned argument.
pub fn parse_u8(argument: &'static str, value: &str) -> Result<u8> {
    digits(argument, value)?
        .parse()
        .map_err(|_| out_of_range(argument, value, "0..=255"))
}

/// Parse a 64-bit unsigned argument.
pub fn parse_u64(argument: &'static str, value: &str) -> Result<u64> {
    digits(argument, value)?
        .parse()
        .map_err(|_| out_of_range(argument, value, "0..2^64"))
}

/// Parse a 256-bit unsigned argument.
pub fn parse_u256(argument: &'static str, value: &str) -> Result<U256> {
    // Only overflow is left once the input is known to be all digits
    U256::from_dec_str(digits(argument, value)?).map_err(|_| out_of_range(argument, value, "0..2^256"))
}
