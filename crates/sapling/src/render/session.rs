//! Scoped ownership of an open backend document.

use log::{debug, warn};

use crate::backend::{Backend, BackendError};

/// Closes a backend exactly once.
///
/// [`finish`](Self::finish) closes the backend and reports the result. If the
/// session is dropped without being finished, as happens when a render fails
/// half way, the backend is closed on drop and a failure to close is logged.
pub struct DocumentSession<'b, B: Backend + ?Sized> {
    backend: &'b mut B,
    closed: bool,
}

impl<'b, B: Backend + ?Sized> DocumentSession<'b, B> {
    pub fn new(backend: &'b mut B) -> Self {
        Self {
            backend,
            closed: false,
        }
    }

    /// Returns the backend for drawing.
    pub fn backend(&mut self) -> &mut B {
        self.backend
    }

    /// Closes the backend.
    pub fn finish(mut self) -> Result<(), BackendError> {
        self.closed = true;
        debug!("Closing document");
        self.backend.close()
    }
}

impl<B: Backend + ?Sized> Drop for DocumentSession<'_, B> {
    fn drop(&mut self) {
        if self.closed {
            return;
        }
        if let Err(err) = self.backend.close() {
            warn!(err:err; "Failed to close document after an aborted render");
        }
    }
}

#[cfg(test)]
mod tests {
    use sapling_core::geometry::Size;

    use super::*;
    use crate::backend::{Canvas, recording::RecordingBackend};

    #[test]
    fn test_finish_closes_once() {
        let mut backend = RecordingBackend::new();
        let session = DocumentSession::new(&mut backend);
        session.finish().unwrap();

        assert_eq!(backend.close_calls(), 1);
    }

    #[test]
    fn test_drop_closes_on_failure_path() {
        let mut backend = RecordingBackend::new();

        let result: Result<(), BackendError> = (|| {
            let mut session = DocumentSession::new(&mut backend);
            session.backend().begin_page(Size::new(10.0, 10.0))?;
            session.backend().draw_text("outside a text block")?;
            session.finish()
        })();

        assert!(result.is_err());
        assert_eq!(backend.close_calls(), 1);
        assert!(backend.is_closed());
    }

    #[test]
    fn test_failed_close_on_drop_is_swallowed() {
        let mut backend = RecordingBackend::new().with_failure("close");
        drop(DocumentSession::new(&mut backend));
        assert_eq!(backend.close_calls(), 1);
    }

    #[test]
    fn test_failed_finish_is_reported() {
        let mut backend = RecordingBackend::new().with_failure("close");
        let session = DocumentSession::new(&mut backend);
        assert!(session.finish().is_err());
        assert_eq!(backend.close_calls(), 1);
    }
}
