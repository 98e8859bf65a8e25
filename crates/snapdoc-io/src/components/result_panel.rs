//! Converted-document panel: inline viewer plus save and restart actions.

use dioxus::prelude::*;
use dioxus_free_icons::Icon;
use dioxus_free_icons::icons::ld_icons::{LdDownload, LdRotateCcw};

/// Props for the [`ResultPanel`] component.
#[derive(Props, Clone, PartialEq)]
pub struct ResultPanelProps {
    /// Object URL of the converted document, shown in the inline viewer.
    url: String,
    /// Called when the user saves the document.
    on_download: EventHandler<()>,
    /// Called when the user discards everything to start over.
    on_reset: EventHandler<()>,
}

/// Viewer and actions for the converted document.
///
/// The iframe displays the document through the workflow's object URL.
/// The handle behind that URL stays owned by the workflow, so this
/// component never revokes anything.
#[component]
pub fn ResultPanel(props: ResultPanelProps) -> Element {
    rsx! {
        div { class: "result-panel",
            h3 { class: "panel-title", "PDF Preview" }
            iframe {
                class: "result-frame",
                src: "{props.url}",
                title: "Converted document",
            }
            div { class: "result-actions",
                button {
                    class: "button primary",
                    onclick: move |_| props.on_download.call(()),
                    Icon { icon: LdDownload, width: 16, height: 16 }
                    "Download"
                }
                button {
                    class: "button subtle",
                    onclick: move |_| props.on_reset.call(()),
                    Icon { icon: LdRotateCcw, width: 16, height: 16 }
                    "Start over"
                }
            }
        }
    }
}
