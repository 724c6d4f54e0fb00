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

//! Typed access to configuration passed in environment variables.
//!
//! Variables are named `<prefix>_<suffix>`, which lets services group related settings (such as
//! all database options) under a common prefix.  An empty prefix names the variable `<suffix>`.

use std::env;
use std::time::Duration;

/// Result type for this module.  Errors are ready-to-print messages.
type Result<T> = std::result::Result<T, String>;

/// Raw value of a variable, converted to the requested type with `TryFrom`.
pub struct Value(String);

impl TryFrom<Value> for String {
    type Error = String;

    fn try_from(value: Value) -> std::result::Result<Self, Self::Error> {
        Ok(value.0)
    }
}

/// Implements `TryFrom<Value>` for a type via its `FromStr` implementation.
macro_rules! tryfrom_value_for_fromstr [
    ( $t:ty ) => {
        impl TryFrom<Value> for $t {
            type Error = String;

            fn try_from(value: Value) -> std::result::Result<Self, Self::Error> {
                value.0.parse::<$t>().map_err(|e| format!("Invalid {}: {}", stringify!($t), e))
            }
        }
    }
];

tryfrom_value_for_fromstr!(i32);
tryfrom_value_for_fromstr!(i64);
tryfrom_value_for_fromstr!(u16);
tryfrom_value_for_fromstr!(u32);
tryfrom_value_for_fromstr!(u64);
tryfrom_value_for_fromstr!(usize);

impl TryFrom<Value> for Duration {
    type Error = String;

    /// Parses durations of the form `<number><unit>` where the unit is one of `s`, `m`, `h` or
    /// `d`.  A bare number is interpreted as seconds.
    fn try_from(value: Value) -> std::result::Result<Self, Self::Error> {
        let s = value.0.trim();
        let (number, unit) = match s.find(|c: char| !c.is_ascii_digit()) {
            Some(pos) => s.split_at(pos),
            None => (s, "s"),
        };

        let number = number
            .parse::<u64>()
            .map_err(|e| format!("Invalid Duration '{}': {}", value.0, e))?;
        let multiplier = match unit {
            "s" => 1,
            "m" => 60,
            "h" => 60 * 60,
            "d" => 24 * 60 * 60,
            _ => return Err(format!("Invalid Duration '{}': unknown unit '{}'", value.0, unit)),
        };

        match number.checked_mul(multiplier) {
            Some(secs) => Ok(Duration::from_secs(secs)),
            None => Err(format!("Invalid Duration '{}': too large", value.0)),
        }
    }
}

/// Joins `prefix` and `suffix` with an underscore unless `prefix` is empty.
fn var_name(prefix: &str, suffix: &str) -> String {
    if prefix.is_empty() { suffix.to_owned() } else { format!("{}_{}", prefix, suffix) }
}

/// Reads `<prefix>_<suffix>` (or just `suffix` with an empty prefix) as a `T`.  An unset variable
/// yields `None`.
pub fn get_optional_var<T: TryFrom<Value, Error = String>>(
    prefix: &str,
    suffix: &str,
) -> Result<Option<T>> {
    let name = var_name(prefix, suffix);
    match env::var(&name) {
        Ok(value) => match Value(value).try_into() {
            Ok(value) => Ok(Some(value)),
            Err(e) => Err(format!("Invalid type in environment variable {}: {}", name, e)),
        },
        Err(env::VarError::NotPresent) => Ok(None),
        Err(env::VarError::NotUnicode(_)) => {
            Err(format!("Invalid value in environment variable {}", name))
        }
    }
}

/// Like `get_optional_var`, but an unset variable is an error.
pub fn get_required_var<T: TryFrom<Value, Error = String>>(
    prefix: &str,
    suffix: &str,
) -> Result<T> {
    match get_optional_var(prefix, suffix)? {
        Some(value) => Ok(value),
        None => Err(format!(
            "Required environment variable {} not present",
            var_name(prefix, suffix)
        )),
    }
}
