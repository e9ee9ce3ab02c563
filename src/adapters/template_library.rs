use include_dir::{Dir, include_dir};
use minijinja::{AutoEscape, Environment, ErrorKind, UndefinedBehavior};
use serde::Serialize;

use crate::domain::templates::escape::{nginx_value, quoted};
use crate::domain::{TemplateError, TemplateKind, TemplateRenderer};

static TEMPLATE_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/src/assets/templates");

const ALL_KINDS: [TemplateKind; 5] = [
    TemplateKind::ProxyServerBlock,
    TemplateKind::ImageBuildRecipe,
    TemplateKind::RuntimeConfig,
    TemplateKind::ComposeManifest,
    TemplateKind::StarterPage,
];

/// Template renderer over the embedded template set, using Minijinja.
pub struct MinijinjaTemplateLibrary {
    env: Environment<'static>,
}

impl MinijinjaTemplateLibrary {
    pub fn new() -> Result<Self, TemplateError> {
        let mut env = Environment::new();
        env.set_undefined_behavior(UndefinedBehavior::Strict);
        env.set_keep_trailing_newline(true);
        env.set_trim_blocks(true);
        env.set_lstrip_blocks(true);
        // Quoting is explicit per format via the filters below.
        env.set_auto_escape_callback(|_| AutoEscape::None);

        env.add_filter("quoted", |value: &str| -> String { quoted(value) });
        env.add_filter("nginx", |value: &str| -> String { nginx_value(value) });

        for kind in ALL_KINDS {
            let name = kind.template_name();
            let source = TEMPLATE_DIR
                .get_file(name)
                .and_then(|file| file.contents_utf8())
                .ok_or_else(|| TemplateError::UnknownTemplate(name.to_string()))?;
            env.add_template(name, source).map_err(|err| TemplateError::Render {
                template: name.to_string(),
                detail: err.to_string(),
            })?;
        }

        Ok(Self { env })
    }
}

impl TemplateRenderer for MinijinjaTemplateLibrary {
    fn render<T: Serialize>(&self, kind: TemplateKind, data: &T) -> Result<String, TemplateError> {
        let name = kind.template_name();
        let template = self
            .env
            .get_template(name)
            .map_err(|_| TemplateError::UnknownTemplate(name.to_string()))?;

        template.render(data).map_err(|err| template_render_error(name, &err))
    }
}

fn template_render_error(template_name: &str, err: &minijinja::Error) -> TemplateError {
    let template = template_name.to_string();
    let detail = match err.line() {
        Some(line) => format!("{} (line {})", err, line),
        None => err.to_string(),
    };
    match err.kind() {
        ErrorKind::UndefinedError => TemplateError::MissingField { template, detail },
        _ => TemplateError::Render { template, detail },
    }
}
