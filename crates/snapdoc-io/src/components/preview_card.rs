//! Card showing the currently selected image.

use dioxus::prelude::*;

/// Props for the [`PreviewCard`] component.
#[derive(Props, Clone, PartialEq)]
pub struct PreviewCardProps {
    /// `data:` URL of the selected image.
    data_url: String,
    /// File name shown under the image.
    filename: String,
}

/// Preview of the selected image with its file name.
///
/// The image renders from a data URL, so the card holds no browser
/// resource and needs no cleanup when it unmounts.
#[component]
pub fn PreviewCard(props: PreviewCardProps) -> Element {
    rsx! {
        div { class: "preview-card",
            h3 { class: "panel-title", "Selected Image" }
            img {
                class: "preview-image",
                src: "{props.data_url}",
                alt: "Preview of {props.filename}",
            }
            p { class: "preview-filename", "{props.filename}" }
        }
    }
}
