use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::errors::WikiError;
use crate::fs_utils::{copy_file, exists, read_to_string};
use crate::types::Page;

pub const VIEW: &str = "view";
pub const EDIT: &str = "edit";

const DEFAULT_VIEW: &str = r#"<h1>{{TITLE}}</h1>
<p>
    <a href="/edit/{{TITLE}}">
        edit
    </a>
</p>
<div>
    {{BODY}}
</div>
"#;

const DEFAULT_EDIT: &str = r#"<h1>Editing {{TITLE}}</h1>
<form action="/save/{{TITLE}}" method="POST">
    <div>
        <textarea name="body" rows="20" cols="80">{{BODY}}</textarea>
    </div>
    <div>
        <input type="submit" value="Save">
    </div>
</form>
"#;

fn default_template(name: &str) -> &'static str {
    if name == VIEW { DEFAULT_VIEW } else { DEFAULT_EDIT }
}

fn template_file(dir: &Path, name: &str) -> PathBuf {
    dir.join(format!("{}.html", name))
}

/// The named HTML templates pages are rendered through
#[derive(Debug, Clone)]
pub struct TemplateSet {
    templates: HashMap<String, String>,
}

impl TemplateSet {
    /// Build a set from in-memory sources
    pub fn from_sources<I, K, V>(sources: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            templates: sources.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }

    /// The built-in `view` and `edit` templates
    pub fn builtin() -> Self {
        Self::from_sources([(VIEW, DEFAULT_VIEW), (EDIT, DEFAULT_EDIT)])
    }

    /// Make sure `view.html` and `edit.html` exist in `doc_root`, then load them.
    ///
    /// A missing file is copied from `source_dir` when it has one, otherwise the
    /// built-in default is written. Existing files are left alone.
    pub fn bootstrap(doc_root: &Path, source_dir: Option<&Path>) -> Result<Self, WikiError> {
        for name in [VIEW, EDIT] {
            let target = template_file(doc_root, name);
            if exists(&target) {
                log::debug!("Keeping existing template {:?}", target);
                continue;
            }
            match source_dir.map(|dir| template_file(dir, name)) {
                Some(source) if exists(&source) => {
                    copy_file(&source, &target)?;
                    log::info!("Copied template {:?} to {:?}", source, target);
                }
                _ => {
                    fs::write(&target, default_template(name))?;
                    log::info!("Wrote default template {:?}", target);
                }
            }
        }
        Self::load(doc_root)
    }

    /// Load `view.html` and `edit.html` from `dir`
    pub fn load(dir: &Path) -> Result<Self, WikiError> {
        let mut templates = HashMap::new();
        for name in [VIEW, EDIT] {
            let path = template_file(dir, name);
            let source = read_to_string(&path).map_err(|e| {
                log::error!("Failed to read template {:?}: {}", path, e);
                WikiError::Io(e)
            })?;
            templates.insert(name.to_string(), source);
        }
        Ok(Self { templates })
    }

    /// Render `page` through the template called `name`.
    ///
    /// The body is spliced in byte for byte: no decoding, no escaping.
    pub fn render(&self, name: &str, page: &Page) -> Result<Vec<u8>, WikiError> {
        let template = self.templates.get(name).ok_or_else(|| {
            WikiError::RenderError(format!("template {:?} is not defined", name))
        })?;
        let filled = template.replace("{{TITLE}}", page.title.as_str());
        let mut out = Vec::with_capacity(filled.len() + page.body.len());
        for (i, chunk) in filled.split("{{BODY}}").enumerate() {
            if i > 0 {
                out.extend_from_slice(&page.body);
            }
            out.extend_from_slice(chunk.as_bytes());
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Title;

    fn page(title: &str, body: &str) -> Page {
        Page::new(Title::parse(title).unwrap(), body)
    }

    fn render_str(set: &TemplateSet, name: &str, page: &Page) -> String {
        String::from_utf8(set.render(name, page).unwrap()).unwrap()
    }

    #[test]
    fn bootstrap_writes_defaults_into_empty_root() {
        let dir = tempfile::tempdir().unwrap();

        TemplateSet::bootstrap(dir.path(), None).unwrap();

        assert_eq!(fs::read_to_string(dir.path().join("view.html")).unwrap(), DEFAULT_VIEW);
        assert_eq!(fs::read_to_string(dir.path().join("edit.html")).unwrap(), DEFAULT_EDIT);
    }

    #[test]
    fn bootstrap_keeps_existing_templates() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("view.html"), "<p>{{BODY}}</p>").unwrap();

        let set = TemplateSet::bootstrap(dir.path(), None).unwrap();

        assert_eq!(render_str(&set, VIEW, &page("ABC", "hi")), "<p>hi</p>");
        assert!(dir.path().join("edit.html").is_file());
    }

    #[test]
    fn bootstrap_copies_from_source_dir() {
        let root = tempfile::tempdir().unwrap();
        let source = tempfile::tempdir().unwrap();
        fs::write(source.path().join("edit.html"), "custom {{TITLE}}").unwrap();

        let set = TemplateSet::bootstrap(root.path(), Some(source.path())).unwrap();

        assert_eq!(render_str(&set, EDIT, &page("ABC", "")), "custom ABC");
        // view.html was not in the source dir, so the default is used
        assert_eq!(fs::read_to_string(root.path().join("view.html")).unwrap(), DEFAULT_VIEW);
    }

    #[test]
    fn view_fills_title_and_body() {
        let html = render_str(&TemplateSet::builtin(), VIEW, &page("ABC", "This is a sample page."));
        assert!(html.contains("<h1>ABC</h1>"));
        assert!(html.contains("href=\"/edit/ABC\""));
        assert!(html.contains("This is a sample page."));
    }

    #[test]
    fn edit_posts_to_save() {
        let html = render_str(&TemplateSet::builtin(), EDIT, &page("ABC", "text"));
        assert!(html.contains("<h1>Editing ABC</h1>"));
        assert!(html.contains("action=\"/save/ABC\""));
        assert!(html.contains(">text</textarea>"));
    }

    #[test]
    fn body_bytes_are_spliced_verbatim() {
        let body: &[u8] = b"a<b & c\xff\xfe";
        let page = Page::new(Title::parse("ABC").unwrap(), body);
        let set = TemplateSet::from_sources([(VIEW, "[{{BODY}}]({{BODY}})")]);

        let out = set.render(VIEW, &page).unwrap();

        let mut expected = b"[".to_vec();
        expected.extend_from_slice(body);
        expected.extend_from_slice(b"](");
        expected.extend_from_slice(body);
        expected.extend_from_slice(b")");
        assert_eq!(out, expected);
    }

    #[test]
    fn unknown_template_is_render_error() {
        let err = TemplateSet::builtin().render("missing", &page("ABC", "")).unwrap_err();
        assert!(matches!(err, WikiError::RenderError(ref msg) if msg.contains("missing")));
    }
}
