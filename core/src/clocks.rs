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

//! Sources of the current time, injectable so that tests control it.

use time::OffsetDateTime;

/// Provider of the current time.
pub trait Clock {
    /// Returns the current time in UTC.
    fn now_utc(&self) -> OffsetDateTime;
}

/// Clock that reads the operating system time.
#[derive(Clone, Default)]
pub struct SystemClock {}

impl Clock for SystemClock {
    fn now_utc(&self) -> OffsetDateTime {
        let now = OffsetDateTime::now_utc();

        // Timestamps in PostgreSQL have microsecond resolution.  Truncate here so that values
        // stored in and read back from the database compare equal.
        now.replace_nanosecond(now.nanosecond() / 1000 * 1000).unwrap_or(now)
    }
}

/// Test utilities.
#[cfg(feature = "testutils")]
pub mod testutils {
    use super::*;
    use std::sync::Mutex;
    use std::time::Duration;

    /// Clock frozen at a given instant until a test moves it.
    pub struct SettableClock {
        /// Current fake time.
        now: Mutex<OffsetDateTime>,
    }

    impl SettableClock {
        /// Creates a new clock that returns `now` until reconfigured with `set` or `advance`.
        pub fn new(now: OffsetDateTime) -> Self {
            Self { now: Mutex::new(now) }
        }

        /// Jumps to `now`.
        pub fn set(&self, now: OffsetDateTime) {
            *self.now.lock().unwrap() = now;
        }

        /// Moves the clock forward by `delta`.
        pub fn advance(&self, delta: Duration) {
            let mut now = self.now.lock().unwrap();
            *now += delta;
        }
    }

    impl Clock for SettableClock {
        fn now_utc(&self) -> OffsetDateTime {
            *self.now.lock().unwrap()
        }
    }

}
