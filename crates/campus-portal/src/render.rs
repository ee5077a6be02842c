//! Output rendering.
//!
//! [`OutputMode`] decides how a page result is written: through a MiniJinja
//! template (styled, plain, or with visible style tags), or serialized
//! directly as JSON or YAML. Templates mark styled spans with the `style`
//! filter: `{{ course.title | style("title") }}`.

use console::Style;
use minijinja::{Environment, Value};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("template error: {0}")]
    Template(#[from] minijinja::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML serialization error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Controls how output is rendered.
///
/// This is the user-facing enum for the `--output` CLI flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputMode {
    /// Styled on a terminal, plain when piped
    #[default]
    Auto,
    /// Always apply terminal styling
    Term,
    /// Never apply styling
    Text,
    /// Show style names as `[name]text[/name]`
    TermDebug,
    /// Serialize data as JSON (skips templates)
    Json,
    /// Serialize data as YAML (skips templates)
    Yaml,
}

impl OutputMode {
    /// Returns true if data is serialized instead of rendered.
    pub fn is_structured(&self) -> bool {
        matches!(self, OutputMode::Json | OutputMode::Yaml)
    }

    /// Resolves `Auto` to `Term` or `Text` depending on whether stdout is a
    /// terminal. Other modes are returned unchanged.
    pub fn resolve_auto(&self) -> OutputMode {
        match self {
            OutputMode::Auto => {
                if console::Term::stdout().is_term() {
                    OutputMode::Term
                } else {
                    OutputMode::Text
                }
            }
            other => *other,
        }
    }

    /// The text mode for templates, `None` for structured modes.
    pub fn to_text_mode(&self) -> Option<TextMode> {
        match self.resolve_auto() {
            OutputMode::Term => Some(TextMode::Styled),
            OutputMode::TermDebug => Some(TextMode::Debug),
            OutputMode::Json | OutputMode::Yaml => None,
            OutputMode::Auto | OutputMode::Text => Some(TextMode::Plain),
        }
    }
}

/// How the `style` filter treats styled spans.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextMode {
    /// ANSI escape codes
    Styled,
    /// Text only
    Plain,
    /// `[name]text[/name]`
    Debug,
}

/// The portal's named styles. Unknown names render unstyled.
pub fn style_for(name: &str) -> Style {
    let style = Style::new().force_styling(true);
    match name {
        "title" => style.bold().cyan(),
        "accent" => style.yellow(),
        "muted" => style.dim(),
        "urgent" => style.bold().red(),
        "error" => style.red(),
        "ok" => style.green(),
        _ => style,
    }
}

const TEMPLATES: &[(&str, &str)] = &[
    ("courses", include_str!("templates/courses.jinja")),
    ("scholarships", include_str!("templates/scholarships.jinja")),
    ("forum", include_str!("templates/forum.jinja")),
    ("timetable", include_str!("templates/timetable.jinja")),
    ("announcements", include_str!("templates/announcements.jinja")),
    ("options", include_str!("templates/options.jinja")),
    ("form_errors", include_str!("templates/form_errors.jinja")),
    ("profile", include_str!("templates/profile.jinja")),
];

/// Renders page results with the bundled templates.
pub struct Renderer {
    env: Environment<'static>,
    mode: OutputMode,
}

impl Renderer {
    pub fn new(mode: OutputMode) -> Result<Self, RenderError> {
        let text_mode = mode.to_text_mode().unwrap_or(TextMode::Plain);

        let mut env = Environment::new();
        env.set_trim_blocks(true);
        env.set_lstrip_blocks(true);
        env.add_filter("style", move |value: Value, name: String| -> String {
            let text = value.to_string();
            match text_mode {
                TextMode::Styled => style_for(&name).apply_to(text).to_string(),
                TextMode::Plain => text,
                TextMode::Debug => format!("[{name}]{text}[/{name}]"),
            }
        });
        for &(name, source) in TEMPLATES {
            env.add_template(name, source)?;
        }

        Ok(Renderer { env, mode })
    }

    pub fn mode(&self) -> OutputMode {
        self.mode
    }

    /// Renders `data` with the named template, or serializes it for
    /// structured modes.
    ///
    /// `data` must serialize to a map; its keys are the template variables.
    pub fn render<T: Serialize>(&self, template: &str, data: &T) -> Result<String, RenderError> {
        match self.mode {
            OutputMode::Json => Ok(serde_json::to_string_pretty(data)?),
            OutputMode::Yaml => Ok(serde_yaml::to_string(data)?),
            _ => {
                let template = self.env.get_template(template)?;
                Ok(template.render(Value::from_serialize(data))?)
            }
        }
    }
}
