use dioxus::html::FileData;
use dioxus::prelude::*;
use dioxus_free_icons::Icon;
use dioxus_free_icons::icons::ld_icons::{LdFileImage, LdUpload};
use snapdoc_io::{
    Notice, NoticeBanner, NoticeKind, ObjectUrl, PreviewCard, ResultPanel, UploadZone, client,
    download, push_notice,
};
use snapdoc_workflow::{
    ClientConfig, ConversionOutcome, ConversionResult, ConversionWorkflow, SelectionError,
    SelectionOutcome, WorkflowState,
};
use tracing::{info, warn};

fn main() {
    dioxus::launch(app);
}

/// The workflow as instantiated in the browser, where the conversion
/// result's display handle is a revocable object URL.
type Workflow = ConversionWorkflow<ObjectUrl>;

/// Root application component.
///
/// Owns the conversion workflow and the notice slot, wires the upload,
/// preview, and result components to the workflow's transitions, and
/// gates every affordance on the current state. Async completions go
/// back through the workflow with the ticket they were issued, so
/// whatever lands late is discarded there.
#[allow(clippy::too_many_lines)]
fn app() -> Element {
    // --- Application state ---
    let mut workflow = use_signal(Workflow::new);
    let notice = use_signal(|| Option::<Notice>::None);
    let config = use_signal(ClientConfig::default);

    // --- Pick handler ---
    let on_pick = move |file: FileData| {
        let name = file.name();
        let begun = workflow.write().begin_selection(&name);
        let ticket = match begun {
            Ok(ticket) => ticket,
            Err(error) => {
                warn!(file = %name, %error, state = %workflow.peek().state(), "pick refused");
                let text = match &error {
                    SelectionError::Rejected(_) => {
                        "Only image files (.jpg, .jpeg, .png, .bmp, .webp) are allowed!".to_owned()
                    }
                    SelectionError::ConversionInProgress => error.to_string(),
                };
                push_notice(notice, NoticeKind::Error, text);
                return;
            }
        };
        spawn(async move {
            match file.read_bytes().await {
                Ok(bytes) => {
                    let outcome = workflow.write().complete_selection(ticket, bytes.to_vec());
                    match outcome {
                        SelectionOutcome::Selected => info!(file = %name, "file selected"),
                        SelectionOutcome::Cleared => {
                            push_notice(notice, NoticeKind::Error, "The selected file is empty");
                        }
                        SelectionOutcome::Stale => {}
                    }
                }
                Err(error) => {
                    warn!(file = %name, %error, "file read failed");
                    let outcome = workflow.write().fail_selection(ticket);
                    if outcome == SelectionOutcome::Cleared {
                        push_notice(
                            notice,
                            NoticeKind::Error,
                            format!("Failed to read file: {error}"),
                        );
                    }
                }
            }
        });
    };

    // --- Convert handler ---
    let on_confirm = move |_| {
        let ticket = match workflow.write().begin_conversion() {
            Ok(ticket) => ticket,
            Err(error) => {
                push_notice(notice, NoticeKind::Error, error.to_string());
                return;
            }
        };
        let selected = workflow.peek().selected_file().cloned();
        let Some(file) = selected else {
            let _ = workflow.write().fail_conversion(ticket);
            return;
        };
        let endpoint = config.peek().endpoint.clone();
        info!(file = %file.name, state = %workflow.peek().state(), "conversion started");
        spawn(async move {
            // Yield to the browser event loop so it can paint the
            // Converting state before the request work starts.
            gloo_timers::future::TimeoutFuture::new(0).await;

            let converted = client::convert(&endpoint, &file).await.and_then(|bytes| {
                let handle = ObjectUrl::from_bytes(&bytes, download::DOCUMENT_MEDIA_TYPE)
                    .map_err(|error| client::ConvertError::JsError(error.to_string()))?;
                Ok(ConversionResult { bytes, handle })
            });

            match converted {
                Ok(result) => {
                    let outcome = workflow.write().complete_conversion(ticket, result);
                    if outcome == ConversionOutcome::Ready {
                        info!("conversion ready");
                        push_notice(notice, NoticeKind::Success, "Conversion successful!");
                    }
                }
                Err(error) => {
                    warn!(%error, "conversion failed");
                    let outcome = workflow.write().fail_conversion(ticket);
                    if outcome == ConversionOutcome::Failed {
                        push_notice(
                            notice,
                            NoticeKind::Error,
                            "An error occurred while processing the image",
                        );
                    }
                }
            }
        });
    };

    // --- Download handler ---
    let on_download = move |()| {
        let document = workflow.peek().result().map(|result| result.bytes.clone());
        let Some(bytes) = document else {
            return;
        };
        match download::save_document(&bytes) {
            Ok(()) => push_notice(notice, NoticeKind::Success, "Download started!"),
            Err(error) => {
                warn!(%error, "download failed");
                push_notice(notice, NoticeKind::Error, format!("Download failed: {error}"));
            }
        }
    };

    // --- Start-over handler ---
    let on_reset = move |()| {
        workflow.write().reset();
        info!(state = %workflow.peek().state(), "workflow reset");
    };

    // --- Render snapshot ---
    let (state, can_confirm, preview, selected_name, result_url) = {
        let snapshot = workflow.read();
        (
            snapshot.state(),
            snapshot.can_confirm(),
            snapshot.preview().map(|p| p.data_url().to_owned()),
            snapshot.selected_file().map(|f| f.name.clone()),
            snapshot.result().map(|r| r.handle.as_str().to_owned()),
        )
    };
    let year = js_sys::Date::new_0().get_full_year();

    // --- Layout ---
    rsx! {
        style { dangerous_inner_html: include_str!("../assets/app.css") }

        div { class: "app-shell",
            header { class: "app-header",
                span { class: "brand-icon",
                    Icon { icon: LdFileImage, width: 24, height: 24 }
                }
                h1 { class: "brand", "Image to PDF Converter" }
            }

            main { class: "content",
                div { class: "card",
                    h2 { class: "intro-title", "Upload your image" }
                    p { class: "intro-hint", "Supported formats: JPG, JPEG, PNG, BMP, WEBP" }

                    NoticeBanner { notice: notice() }

                    UploadZone {
                        on_pick: on_pick,
                        disabled: state == WorkflowState::Converting,
                    }

                    if let Some(ref data_url) = preview {
                        PreviewCard {
                            data_url: data_url.clone(),
                            filename: selected_name.clone().unwrap_or_default(),
                        }
                    }

                    if state == WorkflowState::ConversionFailed {
                        div { class: "failed-banner",
                            p { "The conversion failed. Try again or pick a different image." }
                        }
                    }

                    if can_confirm {
                        div { class: "convert-row",
                            button {
                                class: "button primary large",
                                onclick: on_confirm,
                                Icon { icon: LdUpload, width: 16, height: 16 }
                                "Convert to PDF"
                            }
                        }
                    }

                    if state == WorkflowState::Converting {
                        div { class: "convert-row",
                            button {
                                class: "button primary large",
                                disabled: true,
                                "Processing..."
                            }
                        }
                        div { class: "processing",
                            div { class: "spinner" }
                            p { "Processing your image..." }
                        }
                    }

                    if let Some(ref url) = result_url {
                        ResultPanel {
                            url: url.clone(),
                            on_download: on_download,
                            on_reset: on_reset,
                        }
                    }
                }
            }

            footer { class: "app-footer",
                p { "Image to PDF Converter © {year}" }
            }
        }
    }
}
