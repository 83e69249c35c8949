pub mod client;
pub mod models;
pub mod responses;

use minijinja::{AutoEscape, Environment};
use ocg_core::GeneratorError;

use crate::sanitize::{escape_doc, escape_string};

/// Render one embedded template.
///
/// Block tags are trimmed so that `{% for %}` lines leave no trace in the
/// output. Nothing is auto-escaped; the `doc` and `cs_string` filters escape
/// values for doc comments and string literals.
pub(crate) fn render(
    name: &'static str,
    source: &'static str,
    ctx: minijinja::Value,
) -> Result<String, GeneratorError> {
    let mut env = Environment::new();
    env.set_trim_blocks(true);
    env.set_lstrip_blocks(true);
    env.set_auto_escape_callback(|_| AutoEscape::None);
    env.add_filter("doc", |value: String| escape_doc(&value));
    env.add_filter("cs_string", |value: String| escape_string(&value));
    env.add_template(name, source)
        .map_err(|e| render_error(name, e))?;
    let tmpl = env.get_template(name).map_err(|e| render_error(name, e))?;
    tmpl.render(ctx).map_err(|e| render_error(name, e))
}

fn render_error(template: &str, err: minijinja::Error) -> GeneratorError {
    GeneratorError::Render {
        template: template.to_string(),
        message: err.to_string(),
    }
}
