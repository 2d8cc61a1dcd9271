//! HTML pages rendered from values injected by a ConfigMap or Secret

use minijinja::{context, Environment};
use tracing::error;

use crate::config::HtmlConfig;
use crate::domain::DomainError;

const CONFIGMAP_SECRET: &str = "configmap-secret.html";
const SEALED_SECRET: &str = "sealed-secret.html";

/// Fuel limit for template evaluation
const FUEL_LIMIT: u64 = 100_000;

/// Renders the embedded page templates; `.html` names are auto-escaped
#[derive(Debug)]
pub struct HtmlRenderer {
    env: Environment<'static>,
    app_name: String,
}

impl HtmlRenderer {
    pub fn new(app_name: impl Into<String>) -> Result<Self, DomainError> {
        let mut env = Environment::new();
        env.set_fuel(Some(FUEL_LIMIT));

        for (name, source) in [
            (CONFIGMAP_SECRET, include_str!("templates/configmap-secret.html")),
            (SEALED_SECRET, include_str!("templates/sealed-secret.html")),
        ] {
            env.add_template(name, source).map_err(|e| {
                DomainError::template(format!("syntax error in template '{name}': {e}"))
            })?;
        }

        Ok(Self {
            env,
            app_name: app_name.into(),
        })
    }

    pub fn configmap_secret(&self, html: &HtmlConfig) -> Result<String, DomainError> {
        let texts = [
            &html.text_one,
            &html.text_two,
            &html.text_three,
            &html.text_four,
            &html.text_five,
            &html.text_six,
        ];

        self.render(
            CONFIGMAP_SECRET,
            context! {
                app_name => &self.app_name,
                hardcoded => &html.hardcoded,
                background_color => &html.background_color,
                text_color => &html.text_color,
                texts => texts,
            },
        )
    }

    pub fn sealed_secret(&self, html: &HtmlConfig) -> Result<String, DomainError> {
        self.render(
            SEALED_SECRET,
            context! {
                app_name => &self.app_name,
                config_file => &html.sealed_secret_config_file,
            },
        )
    }

    fn render(&self, name: &str, ctx: minijinja::Value) -> Result<String, DomainError> {
        let template = self
            .env
            .get_template(name)
            .map_err(|e| DomainError::template(format!("failed to load template '{name}': {e}")))?;

        template.render(ctx).map_err(|e| {
            error!(template = name, error = %e, "Error rendering html");
            DomainError::template(format!("error rendering template '{name}': {e}"))
        })
    }
}
