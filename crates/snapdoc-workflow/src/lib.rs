//! snapdoc-workflow: Pure conversion workflow state machine (sans-IO).
//!
//! Models the select -> preview -> convert -> save interaction of the
//! image-to-document front-end as explicit states with typed transitions
//! and staleness-guarded completions.
//!
//! This crate has **no I/O dependencies** -- it operates on in-memory
//! bytes and returns structured outcomes. Reading picked files, calling
//! the conversion endpoint, and managing browser resources all live in
//! `snapdoc-io`.

pub mod config;
pub mod preview;
pub mod validate;
pub mod workflow;

pub use config::ClientConfig;
pub use preview::PreviewImage;
pub use validate::{ImageFormat, ValidationError};
pub use workflow::{
    ConfirmError, ConversionOutcome, ConversionResult, ConversionTicket, ConversionWorkflow,
    SelectedFile, SelectionError, SelectionOutcome, SelectionTicket, WorkflowState,
};
