//! Template loader module.
//!
//! Loads templates from a directory by relative name, e.g. `home.html` or
//! `registration/password_reset_email.txt`.

use std::fs;
use std::path::{Component, Path, PathBuf};

use super::{render_str, Result, TemplateContext, TemplateError};

/// Template loader reading files below a base directory.
#[derive(Debug, Clone)]
pub struct TemplateLoader {
    base_path: PathBuf,
}

impl TemplateLoader {
    /// Create a new template loader.
    pub fn new<P: AsRef<Path>>(base_path: P) -> Self {
        Self {
            base_path: base_path.as_ref().to_path_buf(),
        }
    }

    /// Resolve a template name to a path, rejecting names that leave the base directory.
    fn template_path(&self, name: &str) -> Result<PathBuf> {
        let relative = Path::new(name);
        let is_safe = relative
            .components()
            .all(|c| matches!(c, Component::Normal(_)));

        if name.is_empty() || !is_safe {
            return Err(TemplateError::NotFound(name.to_string()));
        }

        Ok(self.base_path.join(relative))
    }

    /// Load a template's source text.
    pub fn load(&self, name: &str) -> Result<String> {
        let path = self.template_path(name)?;

        if !path.is_file() {
            return Err(TemplateError::NotFound(format!(
                "Template '{name}' not found at {path:?}"
            )));
        }

        fs::read_to_string(&path)
            .map_err(|e| TemplateError::Render(format!("Failed to read template '{name}': {e}")))
    }

    /// Render a template.
    ///
    /// `.html` templates are HTML-escaped; every other extension is plain text.
    pub fn render(&self, name: &str, context: &TemplateContext) -> Result<String> {
        let content = self.load(name)?;
        render_str(&content, context, is_html(name))
    }
}

fn is_html(name: &str) -> bool {
    Path::new(name)
        .extension()
        .is_some_and(|ext| ext == "html" || ext == "htm")
}
