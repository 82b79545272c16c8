//! Request routing: template compilation, ordered dispatch, parameter extraction.
//!
//! ```text
//! startup:  (method, "/products/{id}", handler) → Template → RouteTable
//! request:  raw path → decode_path → normalize_path → RouteTable::dispatch → (handler, Params) | None
//! ```

pub mod table;
pub mod template;

pub use table::{Match, RouteTable};
pub use template::{Params, Template, Token};

use percent_encoding::percent_decode_str;
use std::borrow::Cow;

/// Percent-decode a request path. `None` when the decoded bytes are not UTF-8.
/// Malformed escapes such as `%zz` are kept as written.
pub fn decode_path(raw: &str) -> Option<Cow<'_, str>> {
    percent_decode_str(raw).decode_utf8().ok()
}

/// Strip a single trailing `/`; the empty path becomes `/`.
pub fn normalize_path(path: &str) -> &str {
    let trimmed = path.strip_suffix('/').unwrap_or(path);
    if trimmed.is_empty() {
        "/"
    } else {
        trimmed
    }
}
