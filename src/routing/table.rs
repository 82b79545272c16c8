//! Ordered route table.
//!
//! Entries are scanned in registration order and the first one whose method
//! and template both match wins. When templates can overlap (`/products/new`
//! vs `/products/{id}`), register the more specific one first.

use super::template::{Params, Template};
use crate::error::TemplateError;
use axum::http::Method;

#[derive(Debug)]
struct Route<H> {
    method: Method,
    template: Template,
    handler: H,
}

/// Successful dispatch: the registered handler and the captured parameters.
#[derive(Debug)]
pub struct Match<'a, H> {
    pub handler: &'a H,
    pub template: &'a Template,
    pub params: Params,
}

/// Immutable after startup; share it behind an `Arc`.
#[derive(Debug)]
pub struct RouteTable<H> {
    routes: Vec<Route<H>>,
}

impl<H> Default for RouteTable<H> {
    fn default() -> Self {
        Self { routes: Vec::new() }
    }
}

impl<H> RouteTable<H> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compile `template` and append it. A malformed template is a programming
    /// error; callers propagate it out of startup.
    pub fn route(
        &mut self,
        method: Method,
        template: &str,
        handler: H,
    ) -> Result<&mut Self, TemplateError> {
        let template = Template::parse(template)?;
        tracing::debug!(%method, template = template.as_str(), "route registered");
        self.routes.push(Route {
            method,
            template,
            handler,
        });
        Ok(self)
    }

    /// `None` means no entry matched (the not-found outcome).
    pub fn dispatch(&self, method: &Method, path: &str) -> Option<Match<'_, H>> {
        self.routes
            .iter()
            .filter(|r| r.method == *method)
            .find_map(|r| {
                r.template.matches(path).map(|params| Match {
                    handler: &r.handler,
                    template: &r.template,
                    params,
                })
            })
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}
