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

//! Building blocks shared by the StayHub crates.
//!
//! Code is split in layers, and every crate that builds on these modules mirrors them:
//!
//! 1.  `model`: domain types.  They validate their input on construction and hold no other
//!     logic.
//!
//! 1.  `db`: persistence.  Free functions receive an `Executor` and carry one query per supported
//!     backend.
//!
//! 1.  `driver`: business rules.  A `Driver` owns the database handle plus any other state and
//!     groups related `db` calls into a single transaction.
//!
//! 1.  `rest`: the HTTP surface.  An `axum::Router` whose handlers delegate to the `Driver`.
//!
//! 1.  `main`: the launcher.  Reads configuration from the environment and calls `serve`.
//!
//! Each layer has its own error type (`ModelError`, `DbError`, `DriverError`, `RestError`) and
//! converts from the one below, so `?` carries failures upwards until they become HTTP statuses.

// Keep these in sync with other top-level files.
#![warn(anonymous_parameters, bad_style, clippy::missing_docs_in_private_items, missing_docs)]
#![warn(unused, unused_extern_crates, unused_import_braces, unused_qualifications)]
#![warn(unsafe_code)]

pub mod clocks;
pub mod db;
pub mod driver;
pub mod env;
pub mod model;
pub mod rest;
