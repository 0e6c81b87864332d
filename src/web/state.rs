use crate::web::flash::Flash;
use crate::{Config, Database};
use anyhow::Result;
use std::collections::HashMap;
use tera::{Context, Tera, Value};

pub struct AppState {
    pub config: Config,
    pub db: Database,
    pub templates: Tera,
}

impl AppState {
    pub fn new(config: Config, db: Database) -> Result<Self> {
        let mut templates = Tera::default();

        templates.register_filter("format_date", format_date_filter);
        templates.register_filter("truncate_str", truncate_str_filter);
        templates.add_raw_templates(vec![
            ("base.html", include_str!("../../templates/base.html")),
            ("404.html", include_str!("../../templates/404.html")),
            ("home.html", include_str!("../../templates/home.html")),
            ("users/index.html", include_str!("../../templates/users/index.html")),
            ("users/show.html", include_str!("../../templates/users/show.html")),
            ("users/new.html", include_str!("../../templates/users/new.html")),
            ("users/edit.html", include_str!("../../templates/users/edit.html")),
            ("posts/show.html", include_str!("../../templates/posts/show.html")),
            ("posts/new.html", include_str!("../../templates/posts/new.html")),
            ("posts/edit.html", include_str!("../../templates/posts/edit.html")),
            ("tags/index.html", include_str!("../../templates/tags/index.html")),
            ("tags/show.html", include_str!("../../templates/tags/show.html")),
            ("tags/new.html", include_str!("../../templates/tags/new.html")),
            ("tags/edit.html", include_str!("../../templates/tags/edit.html")),
        ])?;

        Ok(Self {
            config,
            db,
            templates,
        })
    }

    pub fn context(&self, flash: Option<Flash>) -> Context {
        let mut ctx = Context::new();
        ctx.insert("site", &self.config.site);
        ctx.insert("flash", &flash);
        ctx
    }
}

pub(crate) fn format_date_filter(
    value: &Value,
    args: &HashMap<String, Value>,
) -> tera::Result<Value> {
    let date_str = value
        .as_str()
        .ok_or_else(|| tera::Error::msg("format_date requires a string"))?;

    let format = args
        .get("format")
        .and_then(|v| v.as_str())
        .unwrap_or("%a %b %-d %Y, %-I:%M %p");

    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(date_str) {
        return Ok(Value::String(dt.format(format).to_string()));
    }

    if let Ok(dt) = chrono::NaiveDateTime::parse_from_str(date_str, "%Y-%m-%d %H:%M:%S") {
        return Ok(Value::String(dt.format(format).to_string()));
    }

    Ok(Value::String(date_str.to_string()))
}

pub(crate) fn truncate_str_filter(
    value: &Value,
    args: &HashMap<String, Value>,
) -> tera::Result<Value> {
    let s = value
        .as_str()
        .ok_or_else(|| tera::Error::msg("truncate_str requires a string"))?;
    let len = args.get("len").and_then(|v| v.as_u64()).unwrap_or(140) as usize;
    if s.chars().count() > len {
        let cut: String = s.chars().take(len).collect();
        Ok(Value::String(format!("{}…", cut.trim_end())))
    } else {
        Ok(Value::String(s.to_string()))
    }
}
