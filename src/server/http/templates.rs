//! Page templates (minijinja)

use std::path::Path;

use anyhow::Context;
use minijinja::{context, path_loader, Environment};

use crate::catalog::ImageRecord;
use crate::weather::WeatherSnapshot;

pub const INDEX_TEMPLATE: &str = "index.html";

pub struct Templates {
    env: Environment<'static>,
}

impl Templates {
    /// Load templates from `dir`. `index.html` must exist and parse; a
    /// broken template set is a startup error.
    pub fn load(dir: &Path) -> anyhow::Result<Self> {
        let mut env = Environment::new();
        env.set_loader(path_loader(dir));
        env.get_template(INDEX_TEMPLATE)
            .with_context(|| format!("failed to load {} from {}", INDEX_TEMPLATE, dir.display()))?;
        Ok(Self { env })
    }

    /// Build from an in-memory index template
    pub fn from_source(index: &str) -> anyhow::Result<Self> {
        let mut env = Environment::new();
        env.add_template_owned(INDEX_TEMPLATE, index.to_string())
            .context("failed to parse index template")?;
        Ok(Self { env })
    }

    pub fn render_index(
        &self,
        image: &ImageRecord,
        weather: &WeatherSnapshot,
    ) -> Result<String, minijinja::Error> {
        self.env
            .get_template(INDEX_TEMPLATE)?
            .render(context! { image => image, weather => weather })
    }
}
