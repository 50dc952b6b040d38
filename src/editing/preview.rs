// Copyright 2025 the Symbology Authors
// SPDX-License-Identifier: Apache-2.0

//! Preview requests and last-writer-wins delivery.
//!
//! A session never waits for a preview and never reads one back; it sends a
//! `PreviewRequest` carrying a copy of the style and moves on. Every request
//! has a generation number, and a renderer only keeps a frame if it is newer
//! than the one it already shows.
//!
//! `PreviewWorker` rasterizes on a background thread. Requests that pile up
//! while a frame is being drawn are drained and only the newest is drawn.

use kurbo::Size;
use peniko::Color;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;

use crate::model::{RasterHandle, StyleModel};

/// A request to draw `style` into a `size` preview
#[derive(Debug, Clone)]
pub struct PreviewRequest {
    /// From [`next_generation`]; later requests carry larger numbers
    pub generation: u64,
    /// Style as of the request
    pub style: StyleModel,
    pub size: Size,
    pub background: Color,
}

static PREVIEW_GENERATION: AtomicU64 = AtomicU64::new(1);

/// Generation for a new request.
///
/// Shared by every session in the process, so a renderer reused by a later
/// session never mistakes its requests for stale ones.
pub fn next_generation() -> u64 {
    PREVIEW_GENERATION.fetch_add(1, Ordering::Relaxed)
}

/// The rendering engine that turns a style into an image
pub trait Rasterizer: Send + Sync + 'static {
    fn rasterize(&self, style: &StyleModel, size: Size, background: Color) -> RasterHandle;
}

/// Receives preview requests from a session
pub trait PreviewRenderer: Send + Sync {
    fn request_preview(&self, request: PreviewRequest);
}

/// A finished preview
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PreviewFrame {
    pub generation: u64,
    pub raster: RasterHandle,
}

/// Newest accepted frame
#[derive(Debug, Default)]
struct LatestFrame(Mutex<Option<PreviewFrame>>);

impl LatestFrame {
    /// Keep `frame` unless an equal or newer generation is already shown.
    fn offer(&self, frame: PreviewFrame) -> bool {
        let mut latest = self.0.lock().unwrap_or_else(|poisoned| {
            tracing::warn!("Preview lock was poisoned, recovering");
            poisoned.into_inner()
        });
        match *latest {
            Some(current) if current.generation >= frame.generation => {
                tracing::debug!(
                    "Dropping stale preview {} (showing {})",
                    frame.generation,
                    current.generation
                );
                false
            }
            _ => {
                *latest = Some(frame);
                true
            }
        }
    }

    fn get(&self) -> Option<PreviewFrame> {
        *self.0.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

// ============================================================================
// RENDERERS
// ============================================================================

/// Ignores every request
#[derive(Debug, Default, Clone, Copy)]
pub struct NoPreview;

impl PreviewRenderer for NoPreview {
    fn request_preview(&self, _request: PreviewRequest) {}
}

/// Rasterizes on the calling thread
pub struct InlinePreview<R> {
    rasterizer: R,
    latest: LatestFrame,
}

impl<R: Rasterizer> InlinePreview<R> {
    pub fn new(rasterizer: R) -> Self {
        Self {
            rasterizer,
            latest: LatestFrame::default(),
        }
    }

    pub fn latest(&self) -> Option<PreviewFrame> {
        self.latest.get()
    }
}

impl<R: Rasterizer> PreviewRenderer for InlinePreview<R> {
    fn request_preview(&self, request: PreviewRequest) {
        let raster = self
            .rasterizer
            .rasterize(&request.style, request.size, request.background);
        self.latest.offer(PreviewFrame {
            generation: request.generation,
            raster,
        });
    }
}

/// Rasterizes on a background thread, newest request first
pub struct PreviewWorker {
    sender: Option<Sender<PreviewRequest>>,
    latest: Arc<LatestFrame>,
    thread: Option<JoinHandle<()>>,
}

impl PreviewWorker {
    pub fn spawn<R: Rasterizer>(rasterizer: R) -> Self {
        let (sender, receiver) = mpsc::channel();
        let latest = Arc::new(LatestFrame::default());
        let thread = {
            let latest = Arc::clone(&latest);
            std::thread::Builder::new()
                .name("style-preview".into())
                .spawn(move || render_loop(rasterizer, receiver, latest))
        };
        let thread = match thread {
            Ok(handle) => Some(handle),
            Err(e) => {
                tracing::error!("Failed to start preview worker: {}", e);
                None
            }
        };
        Self {
            sender: thread.as_ref().map(|_| sender),
            latest,
            thread,
        }
    }

    /// Newest frame drawn so far
    pub fn latest(&self) -> Option<PreviewFrame> {
        self.latest.get()
    }

    /// Finish queued work, stop the thread and return the final frame.
    pub fn shutdown(mut self) -> Option<PreviewFrame> {
        self.stop();
        self.latest()
    }

    fn stop(&mut self) {
        self.sender.take();
        if let Some(thread) = self.thread.take() {
            if thread.join().is_err() {
                tracing::error!("Preview worker panicked");
            }
        }
    }
}

impl PreviewRenderer for PreviewWorker {
    fn request_preview(&self, request: PreviewRequest) {
        let Some(sender) = &self.sender else {
            tracing::warn!("Preview worker is not running; request {} dropped", request.generation);
            return;
        };
        if sender.send(request).is_err() {
            tracing::warn!("Preview worker stopped; request dropped");
        }
    }
}

impl Drop for PreviewWorker {
    fn drop(&mut self) {
        self.stop();
    }
}

fn render_loop<R: Rasterizer>(
    rasterizer: R,
    receiver: Receiver<PreviewRequest>,
    latest: Arc<LatestFrame>,
) {
    while let Ok(mut request) = receiver.recv() {
        // Only the newest pending request is worth drawing
        let mut skipped = 0;
        while let Ok(newer) = receiver.try_recv() {
            request = newer;
            skipped += 1;
        }
        if skipped > 0 {
            tracing::debug!("Skipped {} superseded preview requests", skipped);
        }

        let raster = rasterizer.rasterize(&request.style, request.size, request.background);
        latest.offer(PreviewFrame {
            generation: request.generation,
            raster,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(generation: u64, size: f64) -> PreviewRequest {
        let mut style = StyleModel::default();
        style.marker.size = size;
        PreviewRequest {
            generation,
            style,
            size: Size::new(32.0, 32.0),
            background: Color::from_rgb8(0xff, 0xff, 0xff),
        }
    }

    #[derive(Default)]
    struct Recording {
        drawn: Arc<Mutex<Vec<f64>>>,
    }

    impl Rasterizer for Recording {
        fn rasterize(&self, style: &StyleModel, _size: Size, _bg: Color) -> RasterHandle {
            self.drawn.lock().unwrap().push(style.marker.size);
            RasterHandle::next()
        }
    }

    /// Blocks on the first frame until released
    struct Gated {
        drawn: Arc<Mutex<Vec<f64>>>,
        started: Mutex<Sender<()>>,
        release: Mutex<Receiver<()>>,
    }

    impl Rasterizer for Gated {
        fn rasterize(&self, style: &StyleModel, _size: Size, _bg: Color) -> RasterHandle {
            if self.drawn.lock().unwrap().is_empty() {
                self.started.lock().unwrap().send(()).unwrap();
                self.release.lock().unwrap().recv().unwrap();
            }
            self.drawn.lock().unwrap().push(style.marker.size);
            RasterHandle::next()
        }
    }

    #[test]
    fn stale_frames_are_rejected() {
        let latest = LatestFrame::default();
        let newer = PreviewFrame {
            generation: 5,
            raster: RasterHandle::next(),
        };
        let older = PreviewFrame {
            generation: 3,
            raster: RasterHandle::next(),
        };
        assert!(latest.offer(newer));
        assert!(!latest.offer(older));
        assert_eq!(latest.get(), Some(newer));
    }

    #[test]
    fn inline_preview_keeps_latest_frame() {
        let preview = InlinePreview::new(Recording::default());
        preview.request_preview(request(1, 4.0));
        preview.request_preview(request(2, 6.0));
        assert_eq!(preview.latest().map(|f| f.generation), Some(2));
        assert_eq!(*preview.rasterizer.drawn.lock().unwrap(), vec![4.0, 6.0]);
    }

    #[test]
    fn worker_skips_superseded_requests() {
        let drawn = Arc::new(Mutex::new(Vec::new()));
        let (started_tx, started_rx) = mpsc::channel();
        let (release_tx, release_rx) = mpsc::channel();
        let worker = PreviewWorker::spawn(Gated {
            drawn: Arc::clone(&drawn),
            started: Mutex::new(started_tx),
            release: Mutex::new(release_rx),
        });

        worker.request_preview(request(1, 1.0));
        started_rx.recv().unwrap();
        worker.request_preview(request(2, 2.0));
        worker.request_preview(request(3, 3.0));
        worker.request_preview(request(4, 4.0));
        release_tx.send(()).unwrap();

        let latest = worker.shutdown();
        assert_eq!(*drawn.lock().unwrap(), vec![1.0, 4.0]);
        assert_eq!(latest.map(|f| f.generation), Some(4));
    }
}
