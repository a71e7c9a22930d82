//! Client for a remote dispatching-rule scheduling service.
//!
//! Uploads a job dataset (an `.xlsx` workbook) with a chosen set of
//! dispatching rules, and presents the per-rule schedules and optional
//! cross-rule comparison the service returns. Scheduling itself, chart
//! rasterization and statistics all happen inside the service.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `RuleId`, `RuleCatalog`, `Dataset`,
//!   `FileIntake`, `RuleSelection`, `Mode`, `ResultSet` and its parts
//! - **`validation`**: Client-local input errors (file type, selection size)
//! - **`request`**: `RequestBuilder`, producing deterministic requests
//! - **`client`**: `ExecutionController` state machine and the HTTP transport
//! - **`presenter`**: Payload → `ResultSet` mapping and text rendering
//! - **`session`**: View-model tying inputs and controller together
//! - **`config`**, **`logging`**: TOML configuration and `tracing` setup
//!
//! # Data flow
//!
//! ```text
//! FileIntake + RuleSelection → RequestBuilder → ExecutionController → presenter
//! ```
//!
//! # Example
//!
//! ```
//! use u_dispatch::models::{FileCandidate, FileIntake, Mode, RuleId, RuleSelection, SPREADSHEET_MIME};
//! use u_dispatch::request::RequestBuilder;
//!
//! let mut intake = FileIntake::new();
//! intake.accept(Some(FileCandidate::new(vec![0u8; 8], SPREADSHEET_MIME, "jobs.xlsx"))).unwrap();
//!
//! let mut selection = RuleSelection::new();
//! selection.toggle(RuleId::Edd);
//! selection.toggle(RuleId::Spt);
//!
//! let request = RequestBuilder::build(intake.dataset(), &selection, Mode::Execute).unwrap();
//! assert_eq!(request.rules(), &[RuleId::Spt, RuleId::Edd]);
//! ```
//!
//! # References
//!
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems"
//! - Baker & Trietsch (2019), "Principles of Sequencing and Scheduling"

pub mod client;
pub mod config;
pub mod logging;
pub mod models;
pub mod presenter;
pub mod request;
pub mod session;
pub mod validation;
