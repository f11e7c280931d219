//! Display handles and the release contract.
//!
//! Every successful engine call allocates exactly one display handle (in a
//! browser, an object URL pointing at the encoded bytes). The engine does
//! not track handles after returning them. Whoever holds a
//! [`ProcessingResult`] must call [`ProcessingResult::release`], or keep it
//! in a [`ResultSlot`], which releases the previous result before installing
//! the next one.

use std::fmt;

use thiserror::Error;

use crate::engine::ProcessingResult;
use crate::format::ImageFormat;

/// The platform refused to create a display handle.
#[derive(Debug, Error)]
#[error("Cannot create display handle: {0}")]
pub struct HandleError(pub String);

/// A revocable reference to encoded bytes.
pub trait DisplayHandle {
    /// Give the reference back to the platform. Consumes the handle, so it
    /// cannot be released twice.
    fn release(self);
}

/// Creates one display handle per engine result.
pub trait HandleAllocator {
    type Handle: DisplayHandle;

    fn allocate(&self, bytes: &[u8], format: ImageFormat) -> Result<Self::Handle, HandleError>;
}

/// Handle for callers with nothing to display, e.g. native tools that write
/// the bytes straight to disk.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoHandle;

impl DisplayHandle for NoHandle {
    fn release(self) {}
}

/// Allocator producing [`NoHandle`].
#[derive(Debug, Clone, Copy, Default)]
pub struct NoHandles;

impl HandleAllocator for NoHandles {
    type Handle = NoHandle;

    fn allocate(&self, _bytes: &[u8], _format: ImageFormat) -> Result<NoHandle, HandleError> {
        Ok(NoHandle)
    }
}

/// Single-slot owner of the current result of an editing session.
///
/// Installing a new result releases the previous one's handle first.
/// Dropping the slot releases whatever it still holds.
pub struct ResultSlot<H: DisplayHandle> {
    current: Option<ProcessingResult<H>>,
}

impl<H: DisplayHandle> ResultSlot<H> {
    pub fn new() -> Self {
        Self { current: None }
    }

    /// Replace the current result, releasing the old one.
    pub fn install(&mut self, result: ProcessingResult<H>) {
        self.clear();
        self.current = Some(result);
    }

    pub fn current(&self) -> Option<&ProcessingResult<H>> {
        self.current.as_ref()
    }

    /// Take ownership of the current result without releasing it.
    pub fn take(&mut self) -> Option<ProcessingResult<H>> {
        self.current.take()
    }

    /// Release and drop the current result.
    pub fn clear(&mut self) {
        if let Some(mut previous) = self.current.take() {
            previous.release();
        }
    }

    pub fn is_empty(&self) -> bool {
        self.current.is_none()
    }
}

impl<H: DisplayHandle> Default for ResultSlot<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H: DisplayHandle> Drop for ResultSlot<H> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<H: DisplayHandle + fmt::Debug> fmt::Debug for ResultSlot<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResultSlot")
            .field("current", &self.current)
            .finish()
    }
}
