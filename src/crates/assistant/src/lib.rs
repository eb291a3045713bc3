//! # Genesis Assistant
//!
//! Answers natural-language questions about the Genesis IoT monitoring
//! platform (sensors, units, warehouses) by translating free text into
//! parameterized calls against the fixed Genesis REST endpoints and
//! reformatting the JSON responses into readable reports.
//!
//! The request pipeline is one sequential pass per query:
//!
//! ```text
//! extract entities -> resolve identifiers -> invoke backend -> format response
//! ```
//!
//! A failure at any stage short-circuits to a terminal user-facing message;
//! nothing is retried and no state survives a request.
//!
//! ## Modules
//!
//! - `location` - warehouse location-code grammar (parse/render, wildcards)
//! - `sensor` - sensor type vocabulary and synonym normalization
//! - `extract` - entity extraction from free text via a completion model
//! - `resolve` - name/pattern to numeric-ID resolution with disambiguation
//! - `report` - grouped, human-readable metric report formatting
//! - `dispatch` - operation registry and per-request orchestration
//! - `route` - operation selection from free text (LLM with keyword fallback)
//! - `config` - process-wide settings loaded once from the environment

pub mod config;
pub mod dispatch;
pub mod extract;
pub mod location;
pub mod report;
pub mod resolve;
pub mod route;
pub mod sensor;

pub use config::Settings;
pub use dispatch::{Dispatcher, Operation};
pub use location::{LocationCode, LocationParseError};
pub use resolve::Resolution;
pub use route::{KeywordRouter, LlmRouter, OperationRouter};
pub use sensor::SensorType;
