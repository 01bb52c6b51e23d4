//! Printing: page setup, the page drawing device, and the job lifecycle.
//!
//! A print document runs `begin` -> (`start_page` -> draw -> `end_page`)* ->
//! `finish`. Device and paper selection dialogs, and delivering the finished
//! stream to a spooler, belong to the platform layer; this module only
//! renders pages. A job can be stopped between pages with
//! [`PrintJob::cancel`].

pub mod device;
pub mod setup;

use thiserror::Error;

pub use device::PageDevice;
pub use setup::{PageSetup, ScaleOverrides};

/// Errors raised by the print lifecycle.
#[derive(Debug, Error)]
pub enum PrintError {
    #[error("print call out of order: {0}")]
    InvalidState(&'static str),

    #[error("cairo operation failed: {0}")]
    Cairo(#[from] cairo::Error),
}

/// Whether the caller should render further pages.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PageDecision {
    Continue,
    Stop,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum JobState {
    DocStarted,
    PageStarted,
}

/// A print document in progress.
///
/// Owns the [`PageDevice`] and enforces page bracketing: drawing happens
/// between `start_page` and `end_page`, and `finish` is only valid outside a
/// page.
pub struct PrintJob {
    device: PageDevice,
    surface: cairo::Surface,
    state: JobState,
    keep_going: bool,
    pages: u32,
}

impl PrintJob {
    /// Starts a document on the given page surface (PDF, PostScript, or
    /// recording), applying the document transform for `setup`.
    pub fn begin(
        surface: &cairo::Surface,
        setup: &PageSetup,
        overrides: &ScaleOverrides,
    ) -> Result<Self, PrintError> {
        let setup = setup.normalized();
        let device = PageDevice::new(surface, &setup, overrides)?;
        log::debug!(
            "print document started: paper {}x{}in, scale {}",
            setup.paper_width,
            setup.paper_height,
            overrides.scale_adjust
        );
        Ok(Self {
            device,
            surface: surface.clone(),
            state: JobState::DocStarted,
            keep_going: true,
            pages: 0,
        })
    }

    /// Opens the next page and returns the device to draw it with.
    pub fn start_page(&mut self) -> Result<&mut PageDevice, PrintError> {
        if self.state != JobState::DocStarted {
            return Err(PrintError::InvalidState("start_page inside an open page"));
        }
        self.device.context().save()?;
        self.state = JobState::PageStarted;
        self.pages += 1;
        Ok(&mut self.device)
    }

    /// Emits the current page and reports whether to keep printing.
    pub fn end_page(&mut self) -> Result<PageDecision, PrintError> {
        if self.state != JobState::PageStarted {
            return Err(PrintError::InvalidState("end_page without start_page"));
        }
        self.device.context().show_page()?;
        self.device.context().restore()?;
        self.state = JobState::DocStarted;
        Ok(if self.keep_going {
            PageDecision::Continue
        } else {
            PageDecision::Stop
        })
    }

    /// Requests a stop after the current page. Takes effect at the next
    /// `end_page`; may be called from anywhere that holds the job.
    pub fn cancel(&mut self) {
        self.keep_going = false;
    }

    /// Number of pages started so far.
    pub fn pages(&self) -> u32 {
        self.pages
    }

    /// Finalizes the stream. The surface is flushed and finished; any error
    /// the backend accumulated while writing surfaces here.
    pub fn finish(self) -> Result<u32, PrintError> {
        if self.state != JobState::DocStarted {
            return Err(PrintError::InvalidState("finish inside an open page"));
        }
        self.surface.finish();
        self.surface.status()?;
        log::debug!("print document finished: {} pages", self.pages);
        Ok(self.pages)
    }
}
