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

//! Token-based authentication for web services.
//!
//! Clients exchange their credentials for a signed, time-limited token and then present that token
//! in the `Authorization: Bearer` header of every request that requires authentication.
//!
//! This crate does not know about users: services are responsible for storing accounts and for
//! checking passwords, using the `model::Password` and `model::HashedPassword` types, before asking
//! the `driver::TokenAuthority` to issue a token.

// Keep these in sync with other top-level files.
#![warn(anonymous_parameters, bad_style, clippy::missing_docs_in_private_items, missing_docs)]
#![warn(unused, unused_extern_crates, unused_import_braces, unused_qualifications)]
#![warn(unsafe_code)]

pub mod driver;
pub mod model;
pub mod rest;
