//! Lazy images - swap in the real source once an image scrolls into view.
//!
//! Each image is registered with a deferred source and no live one. The
//! first time its box overlaps the viewport, the deferred source becomes the
//! live source and the image is no longer watched. Images scrolled past
//! without ever overlapping stay deferred until they do.

use spark_signals::{signal, Signal};
use tracing::{debug, trace};

use crate::types::Viewport;

struct LazyImage {
    top: f64,
    height: f64,
    /// Taken on load; `None` means the image is no longer watched.
    deferred: Option<String>,
    src: Signal<Option<String>>,
}

/// Images addressed by registration index.
#[derive(Default)]
pub struct LazyImages {
    images: Vec<LazyImage>,
}

impl LazyImages {
    pub fn new() -> Self {
        Self::default()
    }

    /// Watch an image whose box starts at document `top`. Returns its index.
    ///
    /// An empty deferred source never loads.
    pub fn register(&mut self, deferred: impl Into<String>, top: f64, height: f64) -> usize {
        let deferred = deferred.into();
        if deferred.is_empty() {
            debug!(top, "lazy image without a source");
        }
        self.images.push(LazyImage {
            top,
            height,
            deferred: (!deferred.is_empty()).then_some(deferred),
            src: signal(None),
        });
        self.images.len() - 1
    }

    /// Move image `index` after a layout change.
    pub fn set_bounds(&mut self, index: usize, top: f64, height: f64) {
        if let Some(image) = self.images.get_mut(index) {
            image.top = top;
            image.height = height;
        }
    }

    /// Intersection callback. Returns `true` if this call loaded the image.
    pub fn on_intersect(&mut self, index: usize, is_intersecting: bool) -> bool {
        if !is_intersecting {
            return false;
        }
        match self.images.get_mut(index) {
            Some(image) => Self::load(index, image),
            None => {
                trace!(index, "intersection for unknown image");
                false
            }
        }
    }

    /// Load every watched image overlapping the viewport.
    /// Returns how many were loaded.
    pub fn check_viewport(&mut self, viewport: &Viewport) -> usize {
        let mut loaded = 0;
        for (index, image) in self.images.iter_mut().enumerate() {
            let top = viewport.relative_top(image.top);
            if top < viewport.height && top + image.height > 0.0 && Self::load(index, image) {
                loaded += 1;
            }
        }
        loaded
    }

    fn load(index: usize, image: &mut LazyImage) -> bool {
        let Some(src) = image.deferred.take() else {
            return false;
        };
        trace!(index, src = %src, "image loaded");
        image.src.set(Some(src));
        true
    }

    /// Live source; `None` until loaded.
    pub fn src(&self, index: usize) -> Option<String> {
        self.images.get(index).and_then(|image| image.src.get())
    }

    pub fn src_signal(&self, index: usize) -> Option<Signal<Option<String>>> {
        self.images.get(index).map(|image| image.src.clone())
    }

    pub fn is_loaded(&self, index: usize) -> bool {
        self.src(index).is_some()
    }

    pub fn is_watched(&self, index: usize) -> bool {
        self.images
            .get(index)
            .is_some_and(|image| image.deferred.is_some())
    }

    /// Images still waiting to load.
    pub fn pending(&self) -> usize {
        self.images.iter().filter(|image| image.deferred.is_some()).count()
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }
}
