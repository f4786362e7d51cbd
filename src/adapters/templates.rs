//! Minijinja renderer over the embedded template assets.

use std::path::Path;

use include_dir::{Dir, DirEntry, include_dir};
use minijinja::{AutoEscape, Environment, UndefinedBehavior, Value};
use serde::Serialize;

use crate::domain::AppError;
use crate::ports::TemplateRenderer;

static TEMPLATE_DIR: Dir<'_> = include_dir!("$CARGO_MANIFEST_DIR/src/assets/templates");

const TEMPLATE_SUFFIX: &str = ".j2";

/// One `.j2` file, named by its path relative to the template root.
#[derive(Debug, Clone, Copy)]
struct TemplateSource {
    name: &'static str,
    content: &'static str,
}

fn collect_templates(dir: &'static Dir<'static>) -> Result<Vec<TemplateSource>, AppError> {
    let mut sources = Vec::new();
    collect_entries(dir, dir.path(), &mut sources)?;
    sources.sort_by(|a, b| a.name.cmp(b.name));
    Ok(sources)
}

fn collect_entries(
    dir: &'static Dir<'static>,
    base_path: &Path,
    sources: &mut Vec<TemplateSource>,
) -> Result<(), AppError> {
    for entry in dir.entries() {
        match entry {
            DirEntry::File(file) => {
                let file_path: &'static Path = file.path();
                let relative = file_path.strip_prefix(base_path).unwrap_or(file_path);
                let name = relative.to_str().ok_or_else(|| AppError::Template {
                    name: file_path.to_string_lossy().to_string(),
                    reason: "template path is not valid UTF-8".to_string(),
                })?;
                if !name.ends_with(TEMPLATE_SUFFIX) {
                    continue;
                }
                let content = file.contents_utf8().ok_or_else(|| AppError::Template {
                    name: name.to_string(),
                    reason: "template is not valid UTF-8".to_string(),
                })?;
                sources.push(TemplateSource { name, content });
            }
            DirEntry::Dir(subdir) => collect_entries(subdir, base_path, sources)?,
        }
    }
    Ok(())
}

fn auto_escape(name: &str) -> AutoEscape {
    let name = name.strip_suffix(TEMPLATE_SUFFIX).unwrap_or(name);
    if name.ends_with(".html") { AutoEscape::Html } else { AutoEscape::None }
}

/// Escapes a URL for HTML text and attributes, leaving `/` and `:` readable.
fn url_filter(value: &str) -> Value {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            c => out.push(c),
        }
    }
    Value::from_safe_string(out)
}

/// Renders the bundle templates compiled into the binary.
#[derive(Debug)]
pub struct MinijinjaRenderer {
    env: Environment<'static>,
}

impl MinijinjaRenderer {
    pub fn embedded() -> Result<Self, AppError> {
        let mut env = Environment::new();
        env.set_keep_trailing_newline(true);
        env.set_trim_blocks(true);
        env.set_lstrip_blocks(true);
        env.set_undefined_behavior(UndefinedBehavior::Strict);
        env.set_auto_escape_callback(auto_escape);
        env.add_filter("url", url_filter);

        for source in collect_templates(&TEMPLATE_DIR)? {
            env.add_template(source.name, source.content).map_err(|e| AppError::Template {
                name: source.name.to_string(),
                reason: e.to_string(),
            })?;
        }

        Ok(Self { env })
    }

    /// Names of every registered template.
    pub fn template_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.env.templates().map(|(name, _)| name).collect();
        names.sort();
        names
    }
}

impl TemplateRenderer for MinijinjaRenderer {
    fn render<S: Serialize>(&self, name: &str, context: &S) -> Result<String, AppError> {
        let template = self.env.get_template(name).map_err(|e| AppError::Template {
            name: name.to_string(),
            reason: e.to_string(),
        })?;

        template
            .render(context)
            .map_err(|e| AppError::Template { name: name.to_string(), reason: e.to_string() })
    }
}
