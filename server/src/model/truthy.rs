// III-IV
// Copyright 2023 Julio Merino
//
// Licensed under the Apache License, Version 2.0 (the "License"); you may not
// use this file except in compliance with the License.  You may obtain a copy
// of the License at:
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS, WITHOUT
// WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.  See the
// License for the specific language governing permissions and limitations
// under the License.

//! Helpers to interpret loosely-typed request fields.

use serde::de::{DeserializeOwned, Error as _};
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use stayhub_core::model::{ModelError, ModelResult};
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{Date, OffsetDateTime, UtcOffset};

/// Values that can be "falsy", which the API treats as if they had not been provided.
///
/// Empty strings and zeros are falsy.  Partial updates ignore falsy fields, so they cannot be used
/// to clear a field or to set it to zero.
pub trait Truthy {
    /// Returns true if the value is not falsy.
    fn is_truthy(&self) -> bool;
}

impl Truthy for String {
    fn is_truthy(&self) -> bool {
        !self.is_empty()
    }
}

impl Truthy for i32 {
    fn is_truthy(&self) -> bool {
        *self != 0
    }
}

impl Truthy for f64 {
    fn is_truthy(&self) -> bool {
        *self != 0.0 && !self.is_nan()
    }
}

/// Discards `value` if it is falsy.
pub fn truthy<T: Truthy>(value: Option<T>) -> Option<T> {
    value.filter(Truthy::is_truthy)
}

/// Deserializes an optional field so that falsy JSON values (`null`, `false`, `""` and `0`) yield
/// `None` whatever the type of the field is.
///
/// Any other value must be valid for `T`.  Use with `#[serde(default, deserialize_with = ...)]`.
pub fn falsy_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    let falsy = match &value {
        Value::Null | Value::Bool(false) => true,
        Value::String(s) => s.is_empty(),
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::Bool(true) | Value::Array(_) | Value::Object(_) => false,
    };
    if falsy {
        return Ok(None);
    }
    T::deserialize(value).map(Some).map_err(D::Error::custom)
}

/// Parses a timestamp given either as an RFC 3339 string or as a plain `YYYY-MM-DD` date, which
/// is interpreted as midnight UTC.
///
/// The result is in UTC and truncated to microseconds, which is what the database can store.
pub fn parse_timestamp(s: &str) -> ModelResult<OffsetDateTime> {
    let ts = match OffsetDateTime::parse(s, &Rfc3339) {
        Ok(ts) => ts,
        Err(_) => match Date::parse(s, format_description!("[year]-[month]-[day]")) {
            Ok(date) => date.midnight().assume_utc(),
            Err(e) => return Err(ModelError(format!("Invalid date '{}': {}", s, e))),
        },
    };
    let ts = ts.to_offset(UtcOffset::UTC);
    Ok(ts.replace_nanosecond(ts.nanosecond() / 1000 * 1000).unwrap_or(ts))
}
