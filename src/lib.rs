//! Flight-performance analytics over the airline, airport and flight tables.
//!
//! Data flows loader → [`index::JoinIndex`] → [`reports::ReportEngine`] → sink:
//! a [`readers::DatasetLoader`] produces a [`models::FlightDataset`], the
//! reports resolve codes to names through the index, and each result table is
//! handed to a [`writers::ResultSink`].

pub mod cli;
pub mod config;
pub mod error;
pub mod index;
pub mod models;
pub mod processors;
pub mod readers;
pub mod reports;
pub mod utils;
pub mod writers;

pub use error::{ProcessingError, Result};
