//! Markup rendering: hrefs, cache-busting parameters and tag builders.

mod href;
mod tags;

pub use href::{complete_href, href_with_imprint};
pub use tags::{Indent, link_tag, script_tag};
