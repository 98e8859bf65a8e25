//! snapdoc-io: Browser I/O and Dioxus component library.
//!
//! Handles the multipart conversion request, object-URL resource
//! handles, Blob downloads, transient notices, and provides reusable UI
//! components for the snapdoc web application.

pub mod client;
pub mod components;
pub mod download;
pub mod object_url;

pub use client::ConvertError;
pub use components::{
    Notice, NoticeBanner, NoticeKind, PreviewCard, ResultPanel, UploadZone, push_notice,
};
pub use object_url::ObjectUrl;
