use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::Path;

use log::{debug, info};

use crate::errors::WikiError;
use crate::services::link_service::render_links;
use crate::types::{Page, PageListing, PageName};
use crate::utils::escape_html;

/// The named templates a response can be rendered with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TemplateId {
    View,
    Edit,
    Index,
}

impl TemplateId {
    pub const ALL: [TemplateId; 3] = [TemplateId::View, TemplateId::Edit, TemplateId::Index];

    pub fn file_name(self) -> &'static str {
        match self {
            TemplateId::View => "view.html",
            TemplateId::Edit => "edit.html",
            TemplateId::Index => "index.html",
        }
    }

    fn builtin_source(self) -> &'static str {
        match self {
            TemplateId::View => include_str!("../../templates/view.html"),
            TemplateId::Edit => include_str!("../../templates/edit.html"),
            TemplateId::Index => include_str!("../../templates/index.html"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Segment {
    Literal(String),
    Placeholder { key: String, filter: Option<String> },
}

/// A template split into literal text and `{{KEY}}` / `{{KEY|filter}}` placeholders
#[derive(Debug, Clone)]
struct CompiledTemplate {
    segments: Vec<Segment>,
}

impl CompiledTemplate {
    fn compile(id: TemplateId, source: &str) -> Result<Self, WikiError> {
        let mut segments = Vec::new();
        let mut rest = source;
        while let Some(start) = rest.find("{{") {
            if start > 0 {
                segments.push(Segment::Literal(rest[..start].to_string()));
            }
            let after = &rest[start + 2..];
            let end = after.find("}}").ok_or_else(|| {
                WikiError::TemplateError(format!("{}: unclosed placeholder", id.file_name()))
            })?;
            let inner = after[..end].trim();
            let (key, filter) = match inner.split_once('|') {
                Some((key, filter)) => (key.trim(), Some(filter.trim().to_string())),
                None => (inner, None),
            };
            if key.is_empty() {
                return Err(WikiError::TemplateError(format!(
                    "{}: empty placeholder",
                    id.file_name()
                )));
            }
            segments.push(Segment::Placeholder { key: key.to_string(), filter });
            rest = &after[end + 2..];
        }
        if !rest.is_empty() {
            segments.push(Segment::Literal(rest.to_string()));
        }
        Ok(Self { segments })
    }
}

/// Values a template can reference
enum Value<'a> {
    Text(&'a str),
    Body(&'a [u8]),
    Names(&'a [PageName]),
}

impl Value<'_> {
    fn apply(&self, key: &str, filter: Option<&str>) -> Result<String, WikiError> {
        match (self, filter) {
            (Value::Text(text), None) => Ok(escape_html(text)),
            (Value::Body(body), None) => Ok(escape_html(&String::from_utf8_lossy(body))),
            (Value::Body(body), Some("links")) => Ok(render_links(body)),
            (Value::Names(names), Some("list")) => Ok(render_name_list(names)),
            (_, Some(other)) => Err(WikiError::TemplateError(format!(
                "filter '{}' cannot be applied to {}",
                other, key
            ))),
            (Value::Names(_), None) => Err(WikiError::TemplateError(format!(
                "{} needs the 'list' filter",
                key
            ))),
        }
    }
}

fn render_name_list(names: &[PageName]) -> String {
    if names.is_empty() {
        return "<p class=\"empty\">No pages yet. Create one below.</p>".to_string();
    }
    let mut html = String::from("<ul class=\"pages\">\n");
    for name in names {
        html.push_str(&format!(
            "  <li><a href=\"/view/{name}\">{name}</a></li>\n",
            name = escape_html(name.as_str())
        ));
    }
    html.push_str("</ul>");
    html
}

/// Registry of compiled templates, built once at startup and read-only afterwards
#[derive(Debug, Clone)]
pub struct TemplateComponent {
    templates: HashMap<TemplateId, CompiledTemplate>,
}

impl TemplateComponent {
    /// Templates compiled into the binary
    pub fn builtin() -> Result<Self, WikiError> {
        let mut templates = HashMap::new();
        for id in TemplateId::ALL {
            templates.insert(id, CompiledTemplate::compile(id, id.builtin_source())?);
        }
        Ok(Self { templates })
    }

    /// Load templates from `dir`, using the built-in version of any file that is absent
    pub fn load(dir: &Path) -> Result<Self, WikiError> {
        let mut component = Self::builtin()?;
        for id in TemplateId::ALL {
            let path = dir.join(id.file_name());
            match fs::read_to_string(&path) {
                Ok(source) => {
                    info!("Loaded template {:?}", path);
                    component = component.with_template(id, &source)?;
                }
                Err(e) if e.kind() == io::ErrorKind::NotFound => {
                    debug!("No {:?}, using built-in {}", path, id.file_name());
                }
                Err(e) => {
                    return Err(WikiError::TemplateError(format!(
                        "failed to read {:?}: {}",
                        path, e
                    )));
                }
            }
        }
        Ok(component)
    }

    /// Replace one template with `source`
    pub fn with_template(mut self, id: TemplateId, source: &str) -> Result<Self, WikiError> {
        self.templates.insert(id, CompiledTemplate::compile(id, source)?);
        Ok(self)
    }

    /// Render a page with the view or edit template.
    ///
    /// `NAME` and `BODY` are escaped; `BODY|links` renders wiki links.
    pub fn render_page(&self, id: TemplateId, page: &Page) -> Result<String, WikiError> {
        self.render(id, |key| match key {
            "NAME" => Some(Value::Text(page.name.as_str())),
            "BODY" => Some(Value::Body(&page.body)),
            _ => None,
        })
    }

    /// Render the page listing with the index template
    pub fn render_index(&self, listing: &PageListing) -> Result<String, WikiError> {
        self.render(TemplateId::Index, |key| match key {
            "PAGES" => Some(Value::Names(&listing.names)),
            _ => None,
        })
    }

    fn render<'a, F>(&self, id: TemplateId, lookup: F) -> Result<String, WikiError>
    where
        F: Fn(&str) -> Option<Value<'a>>,
    {
        let template = self.templates.get(&id).ok_or_else(|| {
            WikiError::TemplateError(format!("template {} is not registered", id.file_name()))
        })?;

        let mut out = String::new();
        for segment in &template.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Placeholder { key, filter } => {
                    let value = lookup(key.as_str()).ok_or_else(|| {
                        WikiError::TemplateError(format!(
                            "{}: unknown placeholder {}",
                            id.file_name(),
                            key
                        ))
                    })?;
                    out.push_str(&value.apply(key, filter.as_deref())?);
                }
            }
        }
        Ok(out)
    }
}
