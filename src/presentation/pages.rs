use handlebars::{Handlebars, RenderError, TemplateError};
use serde_json::{Value, json};

use crate::application::services::{Narration, RefreshSummary};

const ENTRIES_PARTIAL: &str = include_str!("../../templates/entries.hbs");
const INITIAL: &str = include_str!("../../templates/initial.hbs");
const RESULT: &str = include_str!("../../templates/result.hbs");
const NOT_FOUND: &str = include_str!("../../templates/not_found.hbs");
const UPDATED: &str = include_str!("../../templates/updated.hbs");

/// Values shared by every page.
#[derive(Debug, Clone)]
pub struct PageContext {
    pub endpoint: String,
    pub access_code: String,
    pub entries: Vec<String>,
}

impl PageContext {
    fn to_value(&self) -> Value {
        json!({
            "endpoint": self.endpoint,
            "access_code": self.access_code,
            "entries": self.entries,
        })
    }
}

/// HTML pages. Values are HTML-escaped on render.
pub struct Pages {
    registry: Handlebars<'static>,
}

impl Pages {
    pub fn new() -> Result<Self, TemplateError> {
        let mut registry = Handlebars::new();
        registry.set_strict_mode(true);
        registry.register_partial("entries", ENTRIES_PARTIAL)?;
        registry.register_template_string("initial", INITIAL)?;
        registry.register_template_string("result", RESULT)?;
        registry.register_template_string("not_found", NOT_FOUND)?;
        registry.register_template_string("updated", UPDATED)?;
        Ok(Self { registry })
    }

    pub fn initial(&self, ctx: &PageContext) -> Result<String, RenderError> {
        self.registry.render("initial", &ctx.to_value())
    }

    pub fn result(&self, ctx: &PageContext, narration: &Narration) -> Result<String, RenderError> {
        let mut data = ctx.to_value();
        data["filename"] = json!(narration.filename);
        data["information"] = json!(narration.record.information);
        data["blob_url"] = json!(narration.locator);
        self.registry.render("result", &data)
    }

    pub fn not_found(&self, ctx: &PageContext, keyword: &str) -> Result<String, RenderError> {
        let mut data = ctx.to_value();
        data["keyword"] = json!(keyword);
        self.registry.render("not_found", &data)
    }

    pub fn updated(
        &self,
        ctx: &PageContext,
        summary: &RefreshSummary,
    ) -> Result<String, RenderError> {
        let mut data = ctx.to_value();
        data["documents"] = json!(summary.documents);
        self.registry.render("updated", &data)
    }
}
