//! Asynchronous raster decoding.
//!
//! Decoding an encoded signature is the only suspension point of the surface.
//! Each decode runs on its own worker thread and reports through a oneshot
//! channel; the receiving half is a [`DecodeTask`], a future the surface polls
//! from its event loop.
//!
//! Cancellation is ownership: dropping a `DecodeTask` closes the channel, and
//! the worker's late result is discarded without touching any surface.

use crate::encoding::EncodedRaster;
use crate::error::{SignatureError, SignatureResult};
use crate::profile_scope;
use futures::channel::oneshot;
use image::RgbaImage;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use std::thread;
use tracing::{error, trace};

/// Decoded pixels (or the reason there are none)
pub type DecodeResult = SignatureResult<RgbaImage>;

/// Handle to an in-flight decode.
#[must_use = "dropping a DecodeTask cancels the decode"]
pub struct DecodeTask {
    receiver: oneshot::Receiver<DecodeResult>,
}

impl DecodeTask {
    /// Start decoding `encoded` on a worker thread.
    ///
    /// The string is validated on the worker too, so malformed input surfaces
    /// as an `Err` result rather than at spawn time.
    pub fn spawn(encoded: impl Into<String>) -> Self {
        let encoded = encoded.into();
        let (sender, receiver) = oneshot::channel();

        let spawned = thread::Builder::new()
            .name("signature-decode".into())
            .spawn(move || {
                let result = decode_now(&encoded);
                if sender.send(result).is_err() {
                    trace!("Decode finished after its task was dropped");
                }
            });

        // On spawn failure the closure (and the sender) is dropped, which
        // resolves the task as cancelled.
        if let Err(e) = spawned {
            error!("Failed to spawn decode worker: {}", e);
        }

        Self { receiver }
    }

    /// Decode an already-validated raster.
    pub fn spawn_raster(raster: EncodedRaster) -> Self {
        Self::spawn(raster.into_string())
    }

    /// A task that is already resolved, without spawning a worker.
    pub fn ready(result: DecodeResult) -> Self {
        let (sender, receiver) = oneshot::channel();
        let _ = sender.send(result);
        Self { receiver }
    }

    /// Take the result if the decode has finished.
    ///
    /// Returns `None` while the worker is still running. After a result has
    /// been taken, further calls report `DecodeCancelled`.
    pub fn try_take(&mut self) -> Option<DecodeResult> {
        match self.receiver.try_recv() {
            Ok(Some(result)) => Some(result),
            Ok(None) => None,
            Err(oneshot::Canceled) => Some(Err(SignatureError::DecodeCancelled)),
        }
    }

    /// Block the current thread until the decode resolves.
    pub fn wait(self) -> DecodeResult {
        futures::executor::block_on(self)
    }
}

impl Future for DecodeTask {
    type Output = DecodeResult;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.receiver)
            .poll(cx)
            .map(|received| received.unwrap_or(Err(SignatureError::DecodeCancelled)))
    }
}

/// Synchronously validate and decode a data URI.
pub fn decode_now(encoded: &str) -> DecodeResult {
    profile_scope!("decode");
    EncodedRaster::parse(encoded)?.decode()
}
