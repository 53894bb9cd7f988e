//! Human-readable descriptions of an object.

use ferry_common::prelude::*;
use handlebars::{no_escape, Handlebars};

/// Render the specified textual description, filling in the supplied values
/// using [Handlebars][].
///
/// We're writing to a terminal, not a web page, so nothing gets
/// HTML-escaped.
///
/// [Handlebars]: https://handlebarsjs.com/
pub fn render_description<T: Serialize>(template: &str, params: &T) -> Result<String> {
    let mut handlebars = Handlebars::new();
    handlebars.set_strict_mode(true);
    handlebars.register_escape_fn(no_escape);
    handlebars
        .render_template(template, params)
        .context("error rendering description template")
}
