//! Per-request state threaded through every middleware.
//!
//! # Responsibilities
//! - Carry the request head (method, original URI, headers)
//! - Expose the mutable, possibly rewritten `path`
//! - Record the prefix of the innermost active mount
//! - Accumulate the response (status, body, headers)
//!
//! # Design Decisions
//! - Owned by the pipeline driver, lent to stages as `&mut Context`
//! - Mounts rewrite only `path` and `mount_path`, and always restore both

use std::ops::{Deref, DerefMut};

use axum::body::Bytes;
use axum::http::uri::InvalidUri;
use axum::http::{request::Parts, HeaderMap, Method, StatusCode, Uri};

/// Where the pipeline currently "is": the visible path and mount root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    pub path: String,
    pub mount_path: Option<String>,
}

/// Mutable request context.
#[derive(Debug)]
pub struct Context {
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    path: String,
    mount_path: Option<String>,
    status: Option<StatusCode>,
    body: Option<Bytes>,
    response_headers: HeaderMap,
}

impl Context {
    /// Create a context for `method` on `uri`.
    pub fn new(method: Method, uri: Uri) -> Self {
        let path = uri.path().to_string();
        Self {
            method,
            uri,
            headers: HeaderMap::new(),
            path,
            mount_path: None,
            status: None,
            body: None,
            response_headers: HeaderMap::new(),
        }
    }

    /// Build a context from an incoming request head.
    pub fn from_parts(parts: &Parts) -> Self {
        let mut ctx = Self::new(parts.method.clone(), parts.uri.clone());
        ctx.headers = parts.headers.clone();
        ctx
    }

    /// Shorthand for a `GET` context, mostly useful in tests.
    pub fn get(path: &str) -> Result<Self, InvalidUri> {
        Ok(Self::new(Method::GET, path.parse::<Uri>()?))
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    /// The URI as received, unaffected by mounts.
    pub fn original_uri(&self) -> &Uri {
        &self.uri
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// The currently visible path, relative to the innermost mount.
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn set_path(&mut self, path: impl Into<String>) {
        self.path = path.into();
    }

    /// Prefix of the innermost mount this request is running under.
    pub fn mount_path(&self) -> Option<&str> {
        self.mount_path.as_deref()
    }

    pub(crate) fn location(&self) -> Location {
        Location {
            path: self.path.clone(),
            mount_path: self.mount_path.clone(),
        }
    }

    pub(crate) fn set_location(&mut self, location: Location) {
        self.path = location.path;
        self.mount_path = location.mount_path;
    }

    pub fn status(&self) -> Option<StatusCode> {
        self.status
    }

    pub fn set_status(&mut self, status: StatusCode) {
        self.status = Some(status);
    }

    pub fn body(&self) -> Option<&Bytes> {
        self.body.as_ref()
    }

    pub fn set_body(&mut self, body: impl Into<Bytes>) {
        self.body = Some(body.into());
    }

    pub fn response_headers(&self) -> &HeaderMap {
        &self.response_headers
    }

    pub fn response_headers_mut(&mut self) -> &mut HeaderMap {
        &mut self.response_headers
    }

    pub(crate) fn into_response_parts(self) -> (Option<StatusCode>, Option<Bytes>, HeaderMap) {
        (self.status, self.body, self.response_headers)
    }
}

/// Switches a context to another location and switches it back on drop.
///
/// Restoration runs on every exit path: normal return, `?`, panic unwinding
/// and cancellation of the enclosing future.
pub(crate) struct LocationGuard<'c> {
    ctx: &'c mut Context,
    restore: Option<Location>,
}

impl<'c> LocationGuard<'c> {
    pub(crate) fn enter(ctx: &'c mut Context, location: Location, restore: Location) -> Self {
        ctx.set_location(location);
        Self {
            ctx,
            restore: Some(restore),
        }
    }
}

impl Deref for LocationGuard<'_> {
    type Target = Context;

    fn deref(&self) -> &Context {
        &*self.ctx
    }
}

impl DerefMut for LocationGuard<'_> {
    fn deref_mut(&mut self) -> &mut Context {
        &mut *self.ctx
    }
}

impl Drop for LocationGuard<'_> {
    fn drop(&mut self) {
        if let Some(location) = self.restore.take() {
            self.ctx.set_location(location);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    #[test]
    fn test_path_comes_from_uri_without_query() {
        let ctx = Context::get("/foo/bar?x=1").unwrap();
        assert_eq!(ctx.path(), "/foo/bar");
        assert_eq!(ctx.original_uri().query(), Some("x=1"));
        assert_eq!(ctx.mount_path(), None);
    }

    #[test]
    fn test_get_rejects_invalid_path() {
        assert!(Context::get("/with space").is_err());
        assert!(Context::get("/ok").is_ok());
    }

    #[test]
    fn test_from_parts_copies_head() {
        let (parts, _) = Request::builder()
            .method(Method::POST)
            .uri("http://example.com/api/v1")
            .header("x-test", "1")
            .body(())
            .unwrap()
            .into_parts();

        let ctx = Context::from_parts(&parts);
        assert_eq!(*ctx.method(), Method::POST);
        assert_eq!(ctx.path(), "/api/v1");
        assert_eq!(ctx.headers().get("x-test").unwrap(), "1");
    }

    #[test]
    fn test_location_roundtrip() {
        let mut ctx = Context::get("/a/b").unwrap();
        let outer = ctx.location();

        ctx.set_location(Location {
            path: "/b".into(),
            mount_path: Some("/a".into()),
        });
        assert_eq!(ctx.path(), "/b");
        assert_eq!(ctx.mount_path(), Some("/a"));

        ctx.set_location(outer);
        assert_eq!(ctx.path(), "/a/b");
        assert_eq!(ctx.mount_path(), None);
    }

    #[test]
    fn test_guard_restores_on_drop() {
        let mut ctx = Context::get("/a/b").unwrap();
        let outer = ctx.location();
        {
            let mut guard = LocationGuard::enter(
                &mut ctx,
                Location {
                    path: "/b".into(),
                    mount_path: Some("/a".into()),
                },
                outer.clone(),
            );
            assert_eq!(guard.path(), "/b");
            guard.set_path("/changed");
        }
        assert_eq!(ctx.location(), outer);
    }

    #[test]
    fn test_response_fields_start_empty() {
        let mut ctx = Context::get("/").unwrap();
        assert!(ctx.status().is_none());
        assert!(ctx.body().is_none());

        ctx.set_status(StatusCode::NO_CONTENT);
        ctx.set_body("hi");
        assert_eq!(ctx.status(), Some(StatusCode::NO_CONTENT));
        assert_eq!(ctx.body().unwrap().as_ref(), b"hi");
    }
}
