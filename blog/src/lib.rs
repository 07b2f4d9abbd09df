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

//! REST service to manage users, their posts and their profiles.

// Keep these in sync with other top-level files.
#![warn(anonymous_parameters, bad_style, clippy::missing_docs_in_private_items, missing_docs)]
#![warn(unused, unused_extern_crates, unused_import_braces, unused_qualifications)]
#![warn(unsafe_code)]

use iii_iv_core::db::Db;
use iii_iv_core::env::get_optional_var;
use log::{info, warn};
use std::error::Error;
use std::future::Future;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::sync::Arc;
use tokio::net::TcpListener;

mod db;
mod driver;
use driver::Driver;
pub(crate) mod model;
mod rest;
use rest::app;

/// Default port to listen on when none is configured.
const DEFAULT_PORT: u16 = 8081;

/// Options to configure the HTTP listener.
#[derive(Debug, PartialEq)]
pub struct ServerOptions {
    /// Address of the interface to listen on.
    pub host: IpAddr,

    /// Port to listen on.
    pub port: u16,
}

impl Default for ServerOptions {
    fn default() -> Self {
        Self { host: IpAddr::V4(Ipv4Addr::UNSPECIFIED), port: DEFAULT_PORT }
    }
}

impl ServerOptions {
    /// Initializes a set of options from environment variables whose name is prefixed with the
    /// given `prefix`.
    ///
    /// This will use the optional variables `<prefix>_HOST` and `<prefix>_PORT`, falling back to
    /// listening on all interfaces on port 8081.
    pub fn from_env(prefix: &str) -> Result<Self, String> {
        let defaults = Self::default();
        Ok(Self {
            host: get_optional_var::<IpAddr>(prefix, "HOST")?.unwrap_or(defaults.host),
            port: get_optional_var::<u16>(prefix, "PORT")?.unwrap_or(defaults.port),
        })
    }

    /// Returns the socket address to bind to.
    fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

/// Waits for an interrupt from the user.
async fn interrupted() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Interrupted; shutting down"),
        Err(e) => {
            warn!("Cannot listen for interrupts: {}", e);
            std::future::pending::<()>().await
        }
    }
}

/// Initializes the schema and serves the application until `shutdown` completes.
async fn run_server<F>(
    opts: &ServerOptions,
    db: Arc<dyn Db + Send + Sync>,
    shutdown: F,
) -> Result<(), Box<dyn Error>>
where
    F: Future<Output = ()> + Send + 'static,
{
    db::init_schema(&mut db.ex().await?).await?;

    let listener = TcpListener::bind(opts.bind_addr()).await?;
    info!("Listening on {}", listener.local_addr()?);

    let app = app(Driver::new(db));
    axum::serve(listener, app).with_graceful_shutdown(shutdown).await?;
    Ok(())
}

/// Serves the application until `shutdown` completes.
///
/// The database is closed before returning, regardless of the outcome.
async fn serve_until<F>(
    opts: &ServerOptions,
    db: Arc<dyn Db + Send + Sync>,
    shutdown: F,
) -> Result<(), Box<dyn Error>>
where
    F: Future<Output = ()> + Send + 'static,
{
    let result = run_server(opts, db.clone(), shutdown).await;
    db.close().await;
    result
}

/// Instantiates all resources to serve the application as configured by `opts`, using `db` for
/// persistence, until the user interrupts the process.
///
/// While it'd be nice to push this responsibility to `main`, doing so would force us to expose many
/// crate-internal types to the public, which in turn would make dead code detection harder.
pub async fn serve(
    opts: &ServerOptions,
    db: Arc<dyn Db + Send + Sync>,
) -> Result<(), Box<dyn Error>> {
    serve_until(opts, db, interrupted()).await
}
