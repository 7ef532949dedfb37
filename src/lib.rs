//! Core library for the netbox-export command line application.
//!
//! The crate extracts device and rack inventory from a NetBox-style asset
//! API, normalises the heterogeneous per-record custom attributes into a
//! fixed report schema, derives equipment age, and emits a delimited file
//! plus formatted Excel workbooks. The modules are structured to keep
//! responsibilities narrow and composable: the API boundary lives in
//! [`client`], payload views in [`model`], row shaping in [`normalize`],
//! accumulation in [`aggregate`], the report sinks under [`sink`], and the
//! age write-back in [`writeback`].

pub mod age;
pub mod aggregate;
pub mod client;
pub mod config;
pub mod error;
pub mod model;
pub mod normalize;
pub mod sink;
pub mod writeback;

pub use error::{ExportError, Result};
