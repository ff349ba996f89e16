use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};
use reqwest::Url;

use crate::todos::TodoId;

pub const MACHINE_INFO_ROUTE: &str = "/api/machine-info";
pub const TODOS_ROUTE: &str = "/api/todos";

/// Characters escaped in a single path segment: the URL path set plus `/`
/// and `%`, so an id can never address another resource.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Derives the backend base from the configured origin.
///
/// An empty result means "same origin as the page": endpoint paths stay
/// relative and are resolved against `page_origin` when a request is built.
/// A host matching `internal_host` is only reachable inside the backend
/// network, so the page origin is used in its place.
pub fn resolve_api_base(raw: &str, page_origin: &str, internal_host: &str) -> String {
    let value = raw.trim();
    if value.is_empty() {
        return String::new();
    }

    let trimmed = value.trim_end_matches('/');
    let parsed = Url::parse(page_origin).and_then(|origin| origin.join(trimmed));
    match parsed {
        Ok(url) => {
            let is_internal = url
                .host_str()
                .is_some_and(|host| host.eq_ignore_ascii_case(internal_host));
            if is_internal {
                page_origin.trim_end_matches('/').to_owned()
            } else {
                trimmed.to_owned()
            }
        }
        Err(_) => trimmed.to_owned(),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiEndpoints {
    base: String,
    page_origin: String,
}

impl ApiEndpoints {
    pub fn new(raw_api_url: Option<&str>, page_origin: &str, internal_host: &str) -> Self {
        Self {
            base: resolve_api_base(raw_api_url.unwrap_or_default(), page_origin, internal_host),
            page_origin: page_origin.trim_end_matches('/').to_owned(),
        }
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    pub fn machine_info_path(&self) -> String {
        self.route(MACHINE_INFO_ROUTE)
    }

    pub fn todos_path(&self) -> String {
        self.route(TODOS_ROUTE)
    }

    pub fn todo_path(&self, id: &TodoId) -> String {
        let segment = utf8_percent_encode(id.as_str(), PATH_SEGMENT);
        self.route(&format!("{TODOS_ROUTE}/{segment}"))
    }

    /// Turns an endpoint path into a URL a native client can send to.
    pub fn absolute(&self, path: &str) -> String {
        if Url::parse(path).is_ok() {
            return path.to_owned();
        }

        match Url::parse(&self.page_origin).and_then(|origin| origin.join(path)) {
            Ok(url) => url.to_string(),
            Err(_) => format!("{}{path}", self.page_origin),
        }
    }

    fn route(&self, route: &str) -> String {
        if self.base.is_empty() {
            route.to_owned()
        } else {
            format!("{}{route}", self.base.trim_end_matches('/'))
        }
    }
}
