use std::{
    fs, io,
    path::{Path, PathBuf},
};

use minijinja::{Environment, UndefinedBehavior};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Index,
    Scheduler,
}

impl Page {
    pub const ALL: [Page; 2] = [Page::Index, Page::Scheduler];

    pub fn template_name(self) -> &'static str {
        match self {
            Self::Index => "index.html",
            Self::Scheduler => "scheduler.html",
        }
    }
}

#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("template file '{}' not found", path.display())]
    Missing { path: PathBuf },
    #[error("failed to read template '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("template '{name}' is malformed: {source}")]
    Syntax {
        name: &'static str,
        #[source]
        source: minijinja::Error,
    },
    #[error("failed to render '{name}': {source}")]
    Render {
        name: &'static str,
        #[source]
        source: minijinja::Error,
    },
}

/// Every page template, parsed once at startup and read-only afterwards.
#[derive(Debug)]
pub struct TemplateRegistry {
    env: Environment<'static>,
}

impl TemplateRegistry {
    pub fn load(dir: &Path) -> Result<Self, TemplateError> {
        let mut env = Environment::new();
        env.set_undefined_behavior(UndefinedBehavior::Strict);

        for page in Page::ALL {
            let name = page.template_name();
            let path = dir.join(name);
            let source = fs::read_to_string(&path).map_err(|source| {
                if source.kind() == io::ErrorKind::NotFound {
                    TemplateError::Missing { path: path.clone() }
                } else {
                    TemplateError::Io {
                        path: path.clone(),
                        source,
                    }
                }
            })?;
            env.add_template_owned(name, source)
                .map_err(|source| TemplateError::Syntax { name, source })?;
        }

        Ok(Self { env })
    }

    pub fn render<S: Serialize>(&self, page: Page, view: &S) -> Result<String, TemplateError> {
        let name = page.template_name();
        self.env
            .get_template(name)
            .and_then(|template| template.render(view))
            .map_err(|source| TemplateError::Render { name, source })
    }
}

#[cfg(test)]
mod tests {
    use std::time::{SystemTime, UNIX_EPOCH};

    use super::*;

    fn temp_dir(tag: &str) -> PathBuf {
        let suffix = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock")
            .as_nanos();
        let dir = std::env::temp_dir().join(format!("frontend_templates_{tag}_{suffix}"));
        fs::create_dir_all(&dir).expect("temp dir");
        dir
    }

    #[test]
    fn loads_shipped_templates() {
        let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("templates");
        TemplateRegistry::load(&dir).expect("shipped templates load");
    }

    #[test]
    fn missing_template_fails_load() {
        let dir = temp_dir("missing");
        fs::write(dir.join("index.html"), "<p>{{ backend_url }}</p>").expect("write");

        let err = TemplateRegistry::load(&dir).expect_err("scheduler.html is absent");
        assert!(matches!(err, TemplateError::Missing { .. }), "got {err}");

        fs::remove_dir_all(dir).expect("cleanup");
    }

    #[test]
    fn malformed_template_fails_load() {
        let dir = temp_dir("malformed");
        fs::write(dir.join("index.html"), "{% for asset in assets %}").expect("write");
        fs::write(dir.join("scheduler.html"), "ok").expect("write");

        let err = TemplateRegistry::load(&dir).expect_err("unclosed block");
        assert!(matches!(err, TemplateError::Syntax { name: "index.html", .. }));

        fs::remove_dir_all(dir).expect("cleanup");
    }

    #[test]
    fn render_escapes_html_and_reports_undefined_values() {
        let dir = temp_dir("render");
        fs::write(dir.join("index.html"), "<p>{{ backend_url }}</p>").expect("write");
        fs::write(dir.join("scheduler.html"), "{{ missing.field }}").expect("write");
        let registry = TemplateRegistry::load(&dir).expect("load");

        let html = registry
            .render(
                Page::Index,
                &serde_json::json!({ "backend_url": "<script>x</script>" }),
            )
            .expect("render");
        assert!(html.starts_with("<p>&lt;script&gt;x"), "got {html}");
        assert!(!html.contains("<script>"));

        let err = registry
            .render(Page::Scheduler, &serde_json::json!({}))
            .expect_err("strict undefined");
        assert!(matches!(err, TemplateError::Render { name: "scheduler.html", .. }));

        fs::remove_dir_all(dir).expect("cleanup");
    }
}
