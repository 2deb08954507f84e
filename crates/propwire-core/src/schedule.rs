#![forbid(unsafe_code)]

//! Re-render scheduling seam.
//!
//! The binding table does not render. After every successful change it asks
//! a [`RenderScheduler`] for a render and moves on.

/// Receives a render request after each successful property change.
pub trait RenderScheduler {
    fn request_render(&mut self, tag: &str, property: &str);
}

impl<S: RenderScheduler + ?Sized> RenderScheduler for &mut S {
    fn request_render(&mut self, tag: &str, property: &str) {
        (**self).request_render(tag, property);
    }
}

impl<S: RenderScheduler + ?Sized> RenderScheduler for Box<S> {
    fn request_render(&mut self, tag: &str, property: &str) {
        (**self).request_render(tag, property);
    }
}

/// Discards every request.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopScheduler;

impl RenderScheduler for NoopScheduler {
    fn request_render(&mut self, _tag: &str, _property: &str) {}
}

/// One recorded render request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderRequest {
    pub tag: String,
    pub property: String,
}

/// Records every request in arrival order.
#[derive(Debug, Clone, Default)]
pub struct RenderLog {
    requests: Vec<RenderRequest>,
}

impl RenderLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn requests(&self) -> &[RenderRequest] {
        &self.requests
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.requests.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }

    /// Properties that triggered a render, in order.
    pub fn properties(&self) -> impl Iterator<Item = &str> {
        self.requests.iter().map(|r| r.property.as_str())
    }

    pub fn clear(&mut self) {
        self.requests.clear();
    }
}

impl RenderScheduler for RenderLog {
    fn request_render(&mut self, tag: &str, property: &str) {
        self.requests.push(RenderRequest {
            tag: tag.to_owned(),
            property: property.to_owned(),
        });
    }
}
