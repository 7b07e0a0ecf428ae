//! JSON web API for compatibility scoring.
//!
//! ## Starting the Server
//!
//! ```text
//! # Start on default port 8080 with the embedded catalog
//! sequence-fit serve
//!
//! # Custom port and catalog
//! sequence-fit serve --port 3000 --catalog my_catalog.json
//! ```
//!
//! ## API Endpoints
//!
//! - `GET /health` - Liveness check with catalog size
//! - `GET /api/catalog` - List all sequences in the catalog
//! - `POST /api/compatibility/score` - Score one sequence's profiles against a buyer
//! - `POST /api/compatibility/sequences` - Rank, filter and page the catalog for a buyer

pub mod server;
