//! Conversion workflow state machine.
//!
//! Models the select → preview → convert → save interaction as explicit
//! states with typed transitions. The machine is purely synchronous: the
//! surrounding application performs the asynchronous work (reading the
//! picked file, calling the conversion endpoint) and delivers the outcome
//! back here, presenting the ticket it was issued when the operation
//! began.
//!
//! Tickets carry an epoch counter. Starting a new operation, confirming a
//! conversion, or resetting bumps the relevant epoch, so a completion
//! arriving for a superseded operation compares unequal and is discarded
//! without touching state. This is what keeps an abandoned file read from
//! overwriting a newer pick, and a parked conversion response from
//! resurrecting after a reset.

use std::fmt;

use crate::preview::PreviewImage;
use crate::validate::{self, ImageFormat, ValidationError};

/// The file currently owned by the workflow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    /// Raw bytes as read from the picker.
    pub bytes: Vec<u8>,
    /// File name as reported by the browser.
    pub name: String,
    /// Validated format, which supplies the declared media type.
    pub format: ImageFormat,
}

/// A completed conversion: the document bytes plus its display handle.
///
/// `H` is the platform resource behind the in-page viewer. In the browser
/// it is an object URL wrapper whose `Drop` revokes the URL; in tests it
/// is a test double recording release. The workflow never inspects the handle,
/// it only guarantees that at most one is alive and that superseded or
/// stale results are dropped promptly.
#[derive(Debug)]
pub struct ConversionResult<H> {
    /// Binary document returned by the endpoint.
    pub bytes: Vec<u8>,
    /// Display handle for the in-page viewer.
    pub handle: H,
}

/// Which affordances the interface may currently offer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WorkflowState {
    /// No usable selection. Picking is enabled, everything else is not.
    Idle,
    /// A validated file is loaded and previewed, awaiting confirmation.
    FileSelected,
    /// The conversion request is in flight. Picking and confirmation are
    /// disabled until it settles.
    Converting,
    /// A converted document is held and displayable.
    ConversionReady,
    /// The last conversion failed. The selection is retained for retry.
    ConversionFailed,
}

impl WorkflowState {
    /// Display label for the state.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::FileSelected => "file selected",
            Self::Converting => "converting",
            Self::ConversionReady => "conversion ready",
            Self::ConversionFailed => "conversion failed",
        }
    }
}

impl fmt::Display for WorkflowState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Permission to deliver the outcome of one file read.
///
/// Issued by [`ConversionWorkflow::begin_selection`] and consumed by
/// [`ConversionWorkflow::complete_selection`] or
/// [`ConversionWorkflow::fail_selection`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub struct SelectionTicket {
    epoch: u64,
    name: String,
    format: ImageFormat,
}

/// Permission to deliver the outcome of one conversion request.
///
/// Issued by [`ConversionWorkflow::begin_conversion`] and consumed by
/// [`ConversionWorkflow::complete_conversion`] or
/// [`ConversionWorkflow::fail_conversion`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub struct ConversionTicket {
    epoch: u64,
}

/// Why a pick was refused.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SelectionError {
    /// The file name failed validation. Any previous selection was
    /// cleared; a displayed conversion result is kept.
    #[error(transparent)]
    Rejected(#[from] ValidationError),
    /// Picking is disabled while a conversion is in flight.
    #[error("a conversion is in progress")]
    ConversionInProgress,
}

/// Why a confirmation was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ConfirmError {
    /// There is nothing to convert.
    #[error("no file is selected")]
    NoFileSelected,
    /// A conversion request is already in flight.
    #[error("a conversion is already in progress")]
    AlreadyConverting,
    /// The held document came from this selection; converting again
    /// requires picking a new image first.
    #[error("this image is already converted")]
    AlreadyConverted,
}

/// Outcome of delivering a file-read completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub enum SelectionOutcome {
    /// The read belonged to the current pick; state is now
    /// [`WorkflowState::FileSelected`].
    Selected,
    /// The read failed or produced nothing; the selection was cleared.
    Cleared,
    /// The read belonged to a superseded pick; nothing changed.
    Stale,
}

/// Outcome of delivering a conversion completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub enum ConversionOutcome {
    /// The result was accepted; state is now
    /// [`WorkflowState::ConversionReady`].
    Ready,
    /// The failure was recorded; state is now
    /// [`WorkflowState::ConversionFailed`].
    Failed,
    /// The completion belonged to a superseded request; nothing changed
    /// and any delivered result was dropped (releasing its handle).
    Stale,
}

/// Client-side state machine for the image-to-document conversion flow.
///
/// Owns the single selected file, its preview, and at most one conversion
/// result. All mutation goes through the transition methods; accessors
/// expose the payloads read-only. After every transition the struct
/// upholds:
///
/// - a preview exists if and only if a file is selected,
/// - a result exists if and only if the state is `ConversionReady`,
/// - `FileSelected`, `Converting` and `ConversionFailed` always hold a
///   selected file, and `Idle` holds nothing.
#[derive(Debug)]
pub struct ConversionWorkflow<H> {
    state: WorkflowState,
    selected: Option<SelectedFile>,
    preview: Option<PreviewImage>,
    result: Option<ConversionResult<H>>,
    /// Bumped whenever the current pick changes identity.
    selection_epoch: u64,
    /// Bumped whenever a conversion starts or the workflow resets.
    conversion_epoch: u64,
}

impl<H> ConversionWorkflow<H> {
    /// Create an empty workflow in [`WorkflowState::Idle`].
    #[must_use]
    pub const fn new() -> Self {
        Self {
            state: WorkflowState::Idle,
            selected: None,
            preview: None,
            result: None,
            selection_epoch: 0,
            conversion_epoch: 0,
        }
    }

    /// Current state.
    #[must_use]
    pub const fn state(&self) -> WorkflowState {
        self.state
    }

    /// The currently selected file, if any.
    #[must_use]
    pub const fn selected_file(&self) -> Option<&SelectedFile> {
        self.selected.as_ref()
    }

    /// Preview of the currently selected file, if any.
    #[must_use]
    pub const fn preview(&self) -> Option<&PreviewImage> {
        self.preview.as_ref()
    }

    /// The held conversion result, if any.
    #[must_use]
    pub const fn result(&self) -> Option<&ConversionResult<H>> {
        self.result.as_ref()
    }

    /// Whether picking a file is currently allowed.
    #[must_use]
    pub fn can_select(&self) -> bool {
        self.state != WorkflowState::Converting
    }

    /// Whether confirming a conversion is currently allowed.
    #[must_use]
    pub fn can_confirm(&self) -> bool {
        matches!(
            self.state,
            WorkflowState::FileSelected | WorkflowState::ConversionFailed
        )
    }

    /// Start selecting `name`.
    ///
    /// On success the caller reads the file's bytes and delivers them via
    /// [`Self::complete_selection`] (or [`Self::fail_selection`] if the
    /// read fails). Either way this supersedes any still-pending read.
    ///
    /// # Errors
    ///
    /// [`SelectionError::ConversionInProgress`] while a conversion is in
    /// flight, and [`SelectionError::Rejected`] when the name fails
    /// validation. A rejected pick clears the current selection, because
    /// the user's latest intent was the rejected file.
    pub fn begin_selection(&mut self, name: &str) -> Result<SelectionTicket, SelectionError> {
        if self.state == WorkflowState::Converting {
            return Err(SelectionError::ConversionInProgress);
        }
        // The pick changes identity even when it is about to be rejected;
        // a read still pending for the previous pick must not land.
        self.selection_epoch += 1;
        match validate::validate(name) {
            Ok(format) => Ok(SelectionTicket {
                epoch: self.selection_epoch,
                name: name.to_owned(),
                format,
            }),
            Err(error) => {
                self.clear_selection();
                Err(SelectionError::Rejected(error))
            }
        }
    }

    /// Deliver the bytes read for `ticket`.
    ///
    /// A stale ticket leaves the workflow untouched. An empty payload is
    /// treated as a failed read. Otherwise the selection becomes current:
    /// the preview is rebuilt and a previously held result is dropped,
    /// releasing its handle.
    pub fn complete_selection(
        &mut self,
        ticket: SelectionTicket,
        bytes: Vec<u8>,
    ) -> SelectionOutcome {
        if ticket.epoch != self.selection_epoch {
            return SelectionOutcome::Stale;
        }
        if bytes.is_empty() {
            return self.fail_selection(ticket);
        }
        self.preview = Some(PreviewImage::new(&bytes, ticket.format));
        self.selected = Some(SelectedFile {
            bytes,
            name: ticket.name,
            format: ticket.format,
        });
        self.result = None;
        self.state = WorkflowState::FileSelected;
        self.debug_check();
        SelectionOutcome::Selected
    }

    /// Record that the read for `ticket` failed.
    ///
    /// A stale ticket leaves the workflow untouched; a current one clears
    /// the selection.
    pub fn fail_selection(&mut self, ticket: SelectionTicket) -> SelectionOutcome {
        if ticket.epoch != self.selection_epoch {
            return SelectionOutcome::Stale;
        }
        self.clear_selection();
        SelectionOutcome::Cleared
    }

    /// Confirm the current selection for conversion.
    ///
    /// On success the workflow enters [`WorkflowState::Converting`] and
    /// the caller performs the request, delivering its outcome via
    /// [`Self::complete_conversion`] or [`Self::fail_conversion`].
    ///
    /// # Errors
    ///
    /// [`ConfirmError::NoFileSelected`] with nothing to convert,
    /// [`ConfirmError::AlreadyConverting`] while a request is in flight,
    /// and [`ConfirmError::AlreadyConverted`] when the held document
    /// already came from this selection.
    pub fn begin_conversion(&mut self) -> Result<ConversionTicket, ConfirmError> {
        match self.state {
            WorkflowState::Idle => Err(ConfirmError::NoFileSelected),
            WorkflowState::Converting => Err(ConfirmError::AlreadyConverting),
            WorkflowState::ConversionReady => Err(ConfirmError::AlreadyConverted),
            WorkflowState::FileSelected | WorkflowState::ConversionFailed => {
                // The user converts what is on screen. A read still
                // pending for a newer pick is superseded here, otherwise
                // it could swap the selection mid-request.
                self.selection_epoch += 1;
                self.conversion_epoch += 1;
                self.state = WorkflowState::Converting;
                self.debug_check();
                Ok(ConversionTicket {
                    epoch: self.conversion_epoch,
                })
            }
        }
    }

    /// Deliver a successful conversion for `ticket`.
    ///
    /// A stale ticket drops `result` (releasing its handle) and leaves
    /// the workflow untouched. A current one stores the result and enters
    /// [`WorkflowState::ConversionReady`].
    pub fn complete_conversion(
        &mut self,
        ticket: ConversionTicket,
        result: ConversionResult<H>,
    ) -> ConversionOutcome {
        if !self.conversion_current(&ticket) {
            return ConversionOutcome::Stale;
        }
        self.result = Some(result);
        self.state = WorkflowState::ConversionReady;
        self.debug_check();
        ConversionOutcome::Ready
    }

    /// Record that the conversion for `ticket` failed.
    ///
    /// A stale ticket leaves the workflow untouched. A current one enters
    /// [`WorkflowState::ConversionFailed`], keeping the selection so the
    /// user can retry.
    pub fn fail_conversion(&mut self, ticket: ConversionTicket) -> ConversionOutcome {
        if !self.conversion_current(&ticket) {
            return ConversionOutcome::Stale;
        }
        self.state = WorkflowState::ConversionFailed;
        self.debug_check();
        ConversionOutcome::Failed
    }

    /// Discard everything and return to [`WorkflowState::Idle`].
    ///
    /// Both epochs are bumped, so completions of any in-flight read or
    /// request arrive stale. Dropping the held result releases its
    /// handle.
    pub fn reset(&mut self) {
        self.selection_epoch += 1;
        self.conversion_epoch += 1;
        self.selected = None;
        self.preview = None;
        self.result = None;
        self.state = WorkflowState::Idle;
        self.debug_check();
    }

    fn conversion_current(&self, ticket: &ConversionTicket) -> bool {
        ticket.epoch == self.conversion_epoch && self.state == WorkflowState::Converting
    }

    fn clear_selection(&mut self) {
        self.selected = None;
        self.preview = None;
        // States whose affordances need the file lose their meaning with
        // it; a displayed result stays displayable.
        if matches!(
            self.state,
            WorkflowState::FileSelected | WorkflowState::ConversionFailed
        ) {
            self.state = WorkflowState::Idle;
        }
        self.debug_check();
    }

    fn debug_check(&self) {
        debug_assert_eq!(
            self.preview.is_some(),
            self.selected.is_some(),
            "preview must exist exactly when a file is selected"
        );
        debug_assert_eq!(
            self.result.is_some(),
            self.state == WorkflowState::ConversionReady,
            "result must exist exactly in ConversionReady"
        );
        debug_assert!(
            match self.state {
                WorkflowState::Idle => self.selected.is_none(),
                WorkflowState::FileSelected
                | WorkflowState::Converting
                | WorkflowState::ConversionFailed => self.selected.is_some(),
                WorkflowState::ConversionReady => true,
            },
            "selection presence must match the state"
        );
    }
}

impl<H> Default for ConversionWorkflow<H> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::*;

    /// Test double for the display handle: records its own release.
    #[derive(Debug)]
    struct TrackedHandle(Rc<Cell<bool>>);

    impl Drop for TrackedHandle {
        fn drop(&mut self) {
            self.0.set(true);
        }
    }

    fn tracked_handle() -> (TrackedHandle, Rc<Cell<bool>>) {
        let released = Rc::new(Cell::new(false));
        (TrackedHandle(Rc::clone(&released)), released)
    }

    type Workflow = ConversionWorkflow<TrackedHandle>;

    /// Drive a pick through validation and read completion.
    fn select(workflow: &mut Workflow, name: &str, bytes: &[u8]) {
        let ticket = workflow.begin_selection(name).unwrap();
        assert_eq!(
            workflow.complete_selection(ticket, bytes.to_vec()),
            SelectionOutcome::Selected
        );
    }

    /// Drive a selected workflow through a successful conversion,
    /// returning the release flag of the stored handle.
    fn convert(workflow: &mut Workflow, document: &[u8]) -> Rc<Cell<bool>> {
        let ticket = workflow.begin_conversion().unwrap();
        let (handle, released) = tracked_handle();
        assert_eq!(
            workflow.complete_conversion(
                ticket,
                ConversionResult {
                    bytes: document.to_vec(),
                    handle,
                },
            ),
            ConversionOutcome::Ready
        );
        released
    }

    #[test]
    fn new_workflow_is_idle_and_empty() {
        let workflow = Workflow::new();
        assert_eq!(workflow.state(), WorkflowState::Idle);
        assert!(workflow.selected_file().is_none());
        assert!(workflow.preview().is_none());
        assert!(workflow.result().is_none());
        assert!(workflow.can_select());
        assert!(!workflow.can_confirm());
    }

    #[test]
    fn state_labels_describe_each_phase() {
        assert_eq!(WorkflowState::Idle.label(), "idle");
        assert_eq!(WorkflowState::FileSelected.label(), "file selected");
        assert_eq!(WorkflowState::Converting.label(), "converting");
        assert_eq!(WorkflowState::ConversionReady.label(), "conversion ready");
        assert_eq!(WorkflowState::ConversionFailed.label(), "conversion failed");
        assert_eq!(
            WorkflowState::Converting.to_string(),
            "converting",
            "Display must route through the label"
        );
    }

    #[test]
    fn valid_pick_reaches_file_selected_with_preview() {
        let mut workflow = Workflow::new();
        select(&mut workflow, "photo.png", b"pngbytes");

        assert_eq!(workflow.state(), WorkflowState::FileSelected);
        let file = workflow.selected_file().unwrap();
        assert_eq!(file.name, "photo.png");
        assert_eq!(file.format, ImageFormat::Png);
        assert_eq!(file.bytes, b"pngbytes");
        assert!(
            workflow
                .preview()
                .unwrap()
                .data_url()
                .starts_with("data:image/png;base64,"),
            "preview must carry the pick's media type"
        );
        assert!(workflow.can_confirm());
    }

    #[test]
    fn rejected_pick_clears_the_previous_selection() {
        let mut workflow = Workflow::new();
        select(&mut workflow, "photo.jpg", b"jpegbytes");

        let error = workflow.begin_selection("scan.pdf").unwrap_err();
        assert!(matches!(error, SelectionError::Rejected(_)));
        assert_eq!(workflow.state(), WorkflowState::Idle);
        assert!(workflow.selected_file().is_none());
        assert!(workflow.preview().is_none());
    }

    #[test]
    fn picking_is_refused_while_converting() {
        let mut workflow = Workflow::new();
        select(&mut workflow, "photo.jpg", b"jpegbytes");
        let _ticket = workflow.begin_conversion().unwrap();

        assert_eq!(
            workflow.begin_selection("other.png"),
            Err(SelectionError::ConversionInProgress)
        );
        assert!(!workflow.can_select());
        // The in-flight request is unaffected.
        assert_eq!(workflow.state(), WorkflowState::Converting);
    }

    #[test]
    fn empty_read_clears_the_selection() {
        let mut workflow = Workflow::new();
        let ticket = workflow.begin_selection("photo.webp").unwrap();
        assert_eq!(
            workflow.complete_selection(ticket, Vec::new()),
            SelectionOutcome::Cleared
        );
        assert_eq!(workflow.state(), WorkflowState::Idle);
        assert!(workflow.preview().is_none());
    }

    #[test]
    fn failed_read_clears_the_selection() {
        let mut workflow = Workflow::new();
        select(&mut workflow, "photo.bmp", b"bmpbytes");
        let ticket = workflow.begin_selection("retake.bmp").unwrap();

        assert_eq!(workflow.fail_selection(ticket), SelectionOutcome::Cleared);
        assert_eq!(workflow.state(), WorkflowState::Idle);
        assert!(workflow.selected_file().is_none());
    }

    #[test]
    fn superseded_read_is_discarded() {
        let mut workflow = Workflow::new();
        let first = workflow.begin_selection("first.png").unwrap();
        let second = workflow.begin_selection("second.jpg").unwrap();

        assert_eq!(
            workflow.complete_selection(second, b"second".to_vec()),
            SelectionOutcome::Selected
        );
        // The slower first read lands afterwards and must not win.
        assert_eq!(
            workflow.complete_selection(first, b"first".to_vec()),
            SelectionOutcome::Stale
        );
        assert_eq!(workflow.selected_file().unwrap().name, "second.jpg");
    }

    #[test]
    fn read_pending_at_rejection_is_discarded() {
        let mut workflow = Workflow::new();
        let pending = workflow.begin_selection("photo.png").unwrap();
        workflow.begin_selection("scan.pdf").unwrap_err();

        assert_eq!(
            workflow.complete_selection(pending, b"pngbytes".to_vec()),
            SelectionOutcome::Stale
        );
        assert_eq!(workflow.state(), WorkflowState::Idle);
        assert!(workflow.preview().is_none());
    }

    #[test]
    fn confirming_requires_a_selection() {
        let mut workflow = Workflow::new();
        assert_eq!(
            workflow.begin_conversion(),
            Err(ConfirmError::NoFileSelected)
        );
    }

    #[test]
    fn only_one_conversion_may_be_in_flight() {
        let mut workflow = Workflow::new();
        select(&mut workflow, "photo.jpeg", b"jpegbytes");
        let _ticket = workflow.begin_conversion().unwrap();

        assert_eq!(
            workflow.begin_conversion(),
            Err(ConfirmError::AlreadyConverting)
        );
        assert!(
            !workflow.can_confirm(),
            "confirmation stays off while the request is in flight"
        );
    }

    #[test]
    fn converted_selection_cannot_be_confirmed_again() {
        let mut workflow = Workflow::new();
        select(&mut workflow, "photo.jpg", b"jpegbytes");
        let _released = convert(&mut workflow, b"%PDF-");

        assert_eq!(
            workflow.begin_conversion(),
            Err(ConfirmError::AlreadyConverted)
        );
        assert!(!workflow.can_confirm());
    }

    #[test]
    fn successful_conversion_stores_the_result() {
        let mut workflow = Workflow::new();
        select(&mut workflow, "photo.jpg", b"jpegbytes");
        let released = convert(&mut workflow, b"%PDF-1.7");

        assert_eq!(workflow.state(), WorkflowState::ConversionReady);
        assert_eq!(workflow.result().unwrap().bytes, b"%PDF-1.7");
        assert!(!released.get(), "the stored handle must stay alive");
    }

    #[test]
    fn failed_conversion_keeps_the_file_for_retry() {
        let mut workflow = Workflow::new();
        select(&mut workflow, "photo.jpg", b"jpegbytes");
        let ticket = workflow.begin_conversion().unwrap();

        assert_eq!(workflow.fail_conversion(ticket), ConversionOutcome::Failed);
        assert_eq!(workflow.state(), WorkflowState::ConversionFailed);
        assert_eq!(workflow.selected_file().unwrap().name, "photo.jpg");
        assert!(workflow.result().is_none());
        // Retry goes straight back to Converting.
        assert!(workflow.begin_conversion().is_ok());
        assert_eq!(workflow.state(), WorkflowState::Converting);
    }

    #[test]
    fn rejected_pick_after_a_failure_demotes_to_idle() {
        let mut workflow = Workflow::new();
        select(&mut workflow, "photo.jpg", b"jpegbytes");
        let ticket = workflow.begin_conversion().unwrap();
        assert_eq!(workflow.fail_conversion(ticket), ConversionOutcome::Failed);

        let error = workflow.begin_selection("scan.pdf").unwrap_err();
        assert!(matches!(error, SelectionError::Rejected(_)));
        assert_eq!(workflow.state(), WorkflowState::Idle);
        assert!(workflow.selected_file().is_none());
        assert!(workflow.preview().is_none());
        // Retry went away with the file.
        assert!(!workflow.can_confirm());
    }

    #[test]
    fn new_pick_after_a_failure_replaces_the_selection() {
        let mut workflow = Workflow::new();
        select(&mut workflow, "photo.jpg", b"jpegbytes");
        let ticket = workflow.begin_conversion().unwrap();
        assert_eq!(workflow.fail_conversion(ticket), ConversionOutcome::Failed);

        select(&mut workflow, "retake.png", b"pngbytes");
        assert_eq!(workflow.state(), WorkflowState::FileSelected);
        assert_eq!(workflow.selected_file().unwrap().name, "retake.png");
        assert!(workflow.can_confirm());
    }

    #[test]
    fn read_pending_at_rejection_after_a_failure_is_discarded() {
        let mut workflow = Workflow::new();
        select(&mut workflow, "photo.jpg", b"jpegbytes");
        let ticket = workflow.begin_conversion().unwrap();
        assert_eq!(workflow.fail_conversion(ticket), ConversionOutcome::Failed);

        let pending = workflow.begin_selection("retake.png").unwrap();
        workflow.begin_selection("scan.pdf").unwrap_err();

        assert_eq!(
            workflow.complete_selection(pending, b"pngbytes".to_vec()),
            SelectionOutcome::Stale
        );
        assert_eq!(workflow.state(), WorkflowState::Idle);
        assert!(workflow.selected_file().is_none());
    }

    #[test]
    fn conversion_landing_after_reset_is_discarded_and_released() {
        let mut workflow = Workflow::new();
        select(&mut workflow, "photo.jpg", b"jpegbytes");
        let ticket = workflow.begin_conversion().unwrap();
        workflow.reset();

        let (handle, released) = tracked_handle();
        assert_eq!(
            workflow.complete_conversion(
                ticket,
                ConversionResult {
                    bytes: b"%PDF-".to_vec(),
                    handle,
                },
            ),
            ConversionOutcome::Stale
        );
        assert_eq!(workflow.state(), WorkflowState::Idle);
        assert!(workflow.result().is_none());
        assert!(released.get(), "a stale result's handle must be released");
    }

    #[test]
    fn failure_landing_after_reset_is_discarded() {
        let mut workflow = Workflow::new();
        select(&mut workflow, "photo.jpg", b"jpegbytes");
        let ticket = workflow.begin_conversion().unwrap();
        workflow.reset();

        assert_eq!(workflow.fail_conversion(ticket), ConversionOutcome::Stale);
        assert_eq!(workflow.state(), WorkflowState::Idle);
    }

    #[test]
    fn new_pick_releases_the_previous_result() {
        let mut workflow = Workflow::new();
        select(&mut workflow, "photo.jpg", b"jpegbytes");
        let released = convert(&mut workflow, b"%PDF-");

        select(&mut workflow, "retake.png", b"pngbytes");
        assert_eq!(workflow.state(), WorkflowState::FileSelected);
        assert!(workflow.result().is_none());
        assert!(
            released.get(),
            "replacing the selection must release the old handle"
        );
    }

    #[test]
    fn rejected_pick_keeps_the_displayed_result() {
        let mut workflow = Workflow::new();
        select(&mut workflow, "photo.jpg", b"jpegbytes");
        let released = convert(&mut workflow, b"%PDF-");

        workflow.begin_selection("scan.pdf").unwrap_err();
        assert_eq!(workflow.state(), WorkflowState::ConversionReady);
        assert!(workflow.result().is_some());
        assert!(!released.get(), "the displayed handle must stay alive");
        // The selection itself is gone, so there is nothing to confirm.
        assert!(workflow.selected_file().is_none());
        assert!(!workflow.can_confirm());
    }

    #[test]
    fn confirmation_supersedes_a_pending_read() {
        let mut workflow = Workflow::new();
        select(&mut workflow, "photo.jpg", b"jpegbytes");
        let pending = workflow.begin_selection("newer.png").unwrap();
        let _ticket = workflow.begin_conversion().unwrap();

        // The read for the newer pick lands mid-request.
        assert_eq!(
            workflow.complete_selection(pending, b"pngbytes".to_vec()),
            SelectionOutcome::Stale
        );
        assert_eq!(workflow.state(), WorkflowState::Converting);
        assert_eq!(workflow.selected_file().unwrap().name, "photo.jpg");
    }

    #[test]
    fn reset_returns_to_idle_and_releases_everything() {
        let mut workflow = Workflow::new();
        select(&mut workflow, "photo.jpg", b"jpegbytes");
        let released = convert(&mut workflow, b"%PDF-");

        workflow.reset();
        assert_eq!(workflow.state(), WorkflowState::Idle);
        assert!(workflow.selected_file().is_none());
        assert!(workflow.preview().is_none());
        assert!(workflow.result().is_none());
        assert!(released.get(), "reset must release the held handle");
    }

    #[test]
    fn duplicate_completion_for_one_ticket_is_stale() {
        let mut workflow = Workflow::new();
        select(&mut workflow, "photo.jpg", b"jpegbytes");
        let ticket = workflow.begin_conversion().unwrap();

        let (first_handle, _first_released) = tracked_handle();
        assert_eq!(
            workflow.complete_conversion(
                ticket.clone(),
                ConversionResult {
                    bytes: b"%PDF-".to_vec(),
                    handle: first_handle,
                },
            ),
            ConversionOutcome::Ready
        );
        let (second_handle, second_released) = tracked_handle();
        assert_eq!(
            workflow.complete_conversion(
                ticket,
                ConversionResult {
                    bytes: b"%PDF-".to_vec(),
                    handle: second_handle,
                },
            ),
            ConversionOutcome::Stale
        );
        assert!(second_released.get(), "the duplicate's handle must drop");
    }
}
