//! Dioxus UI components for snapdoc.
//!
//! Provides the upload drop zone, selected-image preview card, converted
//! document panel, and the transient notice banner.

mod notice;
mod preview_card;
mod result_panel;
mod upload;

pub use notice::Notice;
pub use notice::NoticeBanner;
pub use notice::NoticeKind;
pub use notice::push_notice;
pub use preview_card::PreviewCard;
pub use result_panel::ResultPanel;
pub use upload::UploadZone;
