//! Command-line parsing for `trellis-dump`.

use std::path::PathBuf;

use anyhow::{Context, Result, bail};

pub const USAGE: &str = "Usage: trellis-dump <document.json> <styles.json> \
[--config engine.toml] [--size WxH] [--dpr N] [--hover ELEMENT_ID] [--metrics]";

#[derive(Debug, Clone, PartialEq)]
pub struct Args {
    pub document: PathBuf,
    pub styles: PathBuf,
    pub config: Option<PathBuf>,
    pub width: f32,
    pub height: f32,
    pub dpr: f32,
    /// Element `id` attribute to hover after the first pass.
    pub hover: Option<String>,
    /// Use font-size based text metrics for baseline alignment.
    pub metrics: bool,
}

pub fn parse_args(args: impl IntoIterator<Item = String>) -> Result<Args> {
    let mut positional = Vec::new();
    let mut parsed = Args {
        document: PathBuf::new(),
        styles: PathBuf::new(),
        config: None,
        width: 1280.0,
        height: 720.0,
        dpr: 1.0,
        hover: None,
        metrics: false,
    };

    let mut iter = args.into_iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--config" => parsed.config = Some(value(&mut iter, "--config")?.into()),
            "--size" => {
                let size = value(&mut iter, "--size")?;
                let (w, h) = size
                    .split_once('x')
                    .with_context(|| format!("--size expects WxH, got {size:?}"))?;
                parsed.width = number(w, "--size")?;
                parsed.height = number(h, "--size")?;
            },
            "--dpr" => parsed.dpr = number(&value(&mut iter, "--dpr")?, "--dpr")?,
            "--hover" => parsed.hover = Some(value(&mut iter, "--hover")?),
            "--metrics" => parsed.metrics = true,
            flag if flag.starts_with("--") => bail!("unknown argument: {flag}\n{USAGE}"),
            _ => positional.push(PathBuf::from(arg)),
        }
    }

    let [document, styles]: [PathBuf; 2] = positional
        .try_into()
        .map_err(|_| anyhow::anyhow!("expected a document and a style file\n{USAGE}"))?;
    parsed.document = document;
    parsed.styles = styles;
    Ok(parsed)
}

fn value(iter: &mut impl Iterator<Item = String>, flag: &str) -> Result<String> {
    iter.next().with_context(|| format!("{flag} needs a value"))
}

fn number(s: &str, flag: &str) -> Result<f32> {
    s.trim()
        .parse()
        .with_context(|| format!("{flag}: {s:?} is not a number"))
}
