//! Web server for browser-based catalog browsing.
//!
//! Serves a single-page interface backed by two JSON endpoints. Selection
//! and the live details filter run in the page; the de-duplicating merge
//! runs server-side in the details endpoint.
//!
//! ## Starting the Server
//!
//! ```text
//! # Start on default port 8080
//! threat-browser serve
//!
//! # Custom port and auto-open browser
//! threat-browser serve --port 3000 --open
//!
//! # Serve a remote dataset fetched once at startup
//! threat-browser serve --catalog-url https://example.org/threats.json
//! ```
//!
//! ## API Endpoints
//!
//! - `GET /` - Main page with the selectable threat list
//! - `GET /api/threats` - Threat identifiers in catalog order
//! - `GET /api/details?ids=T.1,T.2` - Combined details for the given ids
pub mod server;
