//! Drop-zone component for picking the image to convert.

use dioxus::html::{FileData, HasFileData};
use dioxus::prelude::*;
use dioxus_free_icons::Icon;
use dioxus_free_icons::icons::ld_icons::LdInbox;
use snapdoc_workflow::validate::ACCEPT_ATTRIBUTE;

/// Props for the [`UploadZone`] component.
#[derive(Props, Clone, PartialEq)]
pub struct UploadZoneProps {
    /// Called with the first file of a pick or drop. Validation and
    /// reading are the caller's job; the workflow owns both.
    on_pick: EventHandler<FileData>,
    /// Disables picking while a conversion is in flight.
    #[props(default = false)]
    disabled: bool,
}

/// A drag-and-drop zone that doubles as a file picker.
///
/// The whole zone is a label over a hidden file input, so clicking
/// anywhere opens the picker. One file is forwarded per pick; extra
/// files in a multi-file drop are ignored.
#[component]
pub fn UploadZone(props: UploadZoneProps) -> Element {
    let mut dragging = use_signal(|| false);

    let forward_first = move |files: Vec<FileData>| {
        if let Some(file) = files.first() {
            props.on_pick.call(file.clone());
        }
    };

    let handle_files = move |evt: FormEvent| {
        forward_first(evt.files());
    };

    let handle_drop = move |evt: DragEvent| {
        evt.prevent_default();
        dragging.set(false);
        if !props.disabled {
            forward_first(evt.files());
        }
    };

    let zone_class = if props.disabled {
        "upload-zone disabled"
    } else if dragging() {
        "upload-zone dragging"
    } else {
        "upload-zone"
    };

    rsx! {
        label {
            class: "{zone_class}",
            ondragover: move |evt| {
                evt.prevent_default();
                if !props.disabled {
                    dragging.set(true);
                }
            },
            ondragleave: move |_| {
                dragging.set(false);
            },
            ondrop: handle_drop,

            input {
                r#type: "file",
                accept: ACCEPT_ATTRIBUTE,
                class: "hidden-input",
                disabled: props.disabled,
                onchange: handle_files,
            }

            span { class: "upload-icon",
                Icon { icon: LdInbox, width: 48, height: 48 }
            }

            p { class: "upload-hint", "Click or drag image here to upload" }
            p { class: "upload-note", "Only one image file at a time is allowed" }
        }
    }
}
