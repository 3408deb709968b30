use anyhow::{Context as AnyhowContext, Result};
use serde::Serialize;
use std::fmt::Debug;
use std::fs::File;
use std::path::{Path, PathBuf};
use tinytemplate::TinyTemplate;

pub(crate) const COMMON_CSS: &'static str = include_str!("common.css");

fn save<D, P>(data: &D, path: &P) -> Result<()>
where
    D: Serialize + Debug,
    P: AsRef<Path> + Debug,
{
    let buf =
        serde_json::to_string(&data).with_context(|| format!("Unable to serialize {:?}", data))?;
    save_string(&buf, path)
}

pub(crate) fn save_string<P>(data: &str, path: &P) -> Result<()>
where
    P: AsRef<Path> + Debug,
{
    use std::io::Write;

    File::create(path)
        .and_then(|mut f| f.write_all(data.as_bytes()))
        .with_context(|| format!("Unable to save file {:?}", path))?;

    Ok(())
}

pub(crate) fn mkdirp<P>(path: &P) -> Result<()>
where
    P: AsRef<Path> + Debug,
{
    std::fs::create_dir_all(path.as_ref())
        .with_context(|| format!("Unable to create directory {:?}", path))?;
    Ok(())
}

fn debug_context<S: Serialize + Debug>(path: &Path, context: &S) {
    if crate::debug_enabled() {
        let mut context_path = PathBuf::from(path);
        context_path.set_extension("json");
        info!("Writing report context to {:?}", context_path);
        let result = save(context, &context_path);
        if let Err(e) = result {
            error!("Failed to write report context debug output: {}", e);
        }
    }
}

#[derive(Serialize, Debug)]
pub struct StatRow {
    pub label: String,
    pub value: String,
}

#[derive(Serialize, Debug)]
pub struct SeriesContext {
    pub name: String,
    pub scatter_svg: String,
    pub no_regression: bool,
    pub stats: Vec<StatRow>,
    /// The run configuration, passed through verbatim as compact JSON.
    pub description: String,
    pub histogram_svg: Option<String>,
    pub kde_svg: Option<String>,
    /// The resolution line shown under the distribution panel, standing in
    /// for the live slider.
    pub control: Option<String>,
    /// Marker text shown instead of a distribution panel.
    pub marker: Option<String>,
}

#[derive(Serialize, Debug)]
pub struct IndexContext {
    pub common_css: &'static str,
    pub title: String,
    pub summary_svg: String,
    pub two_columns: bool,
    pub series: Vec<SeriesContext>,
    pub generated: String,
}

pub struct Html {
    templates: TinyTemplate<'static>,
}
impl Html {
    pub fn new() -> Html {
        let mut templates = TinyTemplate::new();
        templates
            .add_template("index", include_str!("index.html.tt"))
            .expect("Unable to parse index template.");

        Html { templates }
    }

    pub fn render_index(&self, context: &IndexContext, path: &Path) -> Result<()> {
        debug_context(path, context);

        let text = self
            .templates
            .render("index", context)
            .context("Failed to render index template")?;
        save_string(&text, &path)
    }
}
