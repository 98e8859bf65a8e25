//! Transient user notices.
//!
//! Success and error feedback appears as a short-lived banner, the way
//! toast messages behave in upload UIs. A notice dismisses itself after
//! a few seconds; the timer carries the id of the notice it belongs to,
//! so a newer notice is never dismissed by an older timer.

use dioxus::prelude::*;
use dioxus_free_icons::Icon;
use dioxus_free_icons::icons::ld_icons::{LdCheck, LdX};
use gloo_timers::future::TimeoutFuture;

/// How long a notice stays visible, in milliseconds.
const DISMISS_AFTER_MS: u32 = 3_000;

/// Visual category of a notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

/// A transient message with an identity for dismissal guarding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    id: u64,
    kind: NoticeKind,
    text: String,
}

/// Replace the current notice and schedule its dismissal.
///
/// Publishing bumps the id; when the timer fires it only clears the
/// slot if its notice is still the one on display.
pub fn push_notice(mut slot: Signal<Option<Notice>>, kind: NoticeKind, text: impl Into<String>) {
    let id = slot.peek().as_ref().map_or(0, |current| current.id + 1);
    slot.set(Some(Notice {
        id,
        kind,
        text: text.into(),
    }));
    spawn(async move {
        TimeoutFuture::new(DISMISS_AFTER_MS).await;
        if slot.peek().as_ref().is_some_and(|current| current.id == id) {
            slot.set(None);
        }
    });
}

/// Props for the [`NoticeBanner`] component.
#[derive(Props, Clone, PartialEq)]
pub struct NoticeBannerProps {
    /// The notice to show; `None` renders nothing.
    notice: Option<Notice>,
}

/// Banner showing the current notice, if any.
#[component]
pub fn NoticeBanner(props: NoticeBannerProps) -> Element {
    let Some(notice) = props.notice else {
        return rsx! {};
    };
    let class = match notice.kind {
        NoticeKind::Success => "notice success",
        NoticeKind::Error => "notice error",
    };
    rsx! {
        div { class: "{class}",
            if notice.kind == NoticeKind::Error {
                Icon { icon: LdX, width: 16, height: 16 }
            } else {
                Icon { icon: LdCheck, width: 16, height: 16 }
            }
            span { class: "notice-text", "{notice.text}" }
        }
    }
}
