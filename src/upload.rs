//! Asynchronous background decoding.
//!
//! Uploaded files decode on a worker thread. The result only becomes visible
//! once decoding has fully finished, which is the one async boundary in the
//! pipeline.

use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use crate::error::{Error, Result};
use crate::renderer::{BackgroundImage, ImageSource};

/// Handle to a decode running on a worker thread.
pub struct BackgroundLoader {
    source: ImageSource,
    rx: Receiver<Result<BackgroundImage>>,
}

impl BackgroundLoader {
    /// Start decoding `source` in the background.
    pub fn spawn(source: ImageSource) -> Self {
        let (tx, rx) = mpsc::channel();
        let job = source.clone();
        thread::spawn(move || {
            let result = job.decode();
            if let Err(e) = &result {
                log::warn!("Background decode failed: {}", e);
            }
            // The receiver may be gone if the upload was superseded
            let _ = tx.send(result);
        });
        Self { source, rx }
    }

    pub fn source(&self) -> &ImageSource {
        &self.source
    }

    /// Non-blocking check; `None` while the decode is still running.
    pub fn try_take(&self) -> Option<Result<BackgroundImage>> {
        match self.rx.try_recv() {
            Ok(result) => Some(result),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => Some(Err(Error::LoaderDisconnected)),
        }
    }

    /// Block until decoding finishes.
    pub fn wait(self) -> Result<BackgroundImage> {
        self.rx.recv().map_err(|_| Error::LoaderDisconnected)?
    }
}

impl std::fmt::Debug for BackgroundLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BackgroundLoader")
            .field("source", &self.source)
            .finish_non_exhaustive()
    }
}
