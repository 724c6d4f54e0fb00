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

//! Entry point to the rental service.

// Keep these in sync with other top-level files.
#![warn(anonymous_parameters, bad_style, clippy::missing_docs_in_private_items, missing_docs)]
#![warn(unused, unused_extern_crates, unused_import_braces, unused_qualifications)]
#![warn(unsafe_code)]

use stayhub::db::init_schema;
use stayhub::{ServiceOptions, serve};
use stayhub_core::clocks::SystemClock;
use stayhub_core::db::Db;
use stayhub_core::db::postgres::{PostgresDb, PostgresOptions};
use std::error::Error;
use std::net::Ipv4Addr;
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let opts = ServiceOptions::from_env()?;
    let addr = (Ipv4Addr::UNSPECIFIED, opts.port);

    let db_opts = PostgresOptions::from_env("DATABASE")?;
    let db = Arc::from(PostgresDb::connect(db_opts)?);

    let result = async {
        init_schema(&mut db.ex().await?).await?;
        serve(addr, db.clone(), Arc::from(SystemClock::default()), opts).await
    }
    .await;
    db.close().await;
    result
}
