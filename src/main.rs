//! Command-line access to the LegacyImage helpers.

use std::fs::{self, File};
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};

use gradio_legacyimage::component::LegacyImage;
use gradio_legacyimage::config::ComponentConfig;
use gradio_legacyimage::coordinates::select_data_for_click;
use gradio_legacyimage::models::{BoundingBox, ClickEvent, FileInput, ImageData, ImageElement};
use gradio_legacyimage::{blob_to_base64, normalise_file};

#[derive(Debug, Parser)]
#[command(name = "legacyimage", version, about = "LegacyImage component helpers")]
struct Cli {
  /// Configuration file; defaults to `legacyimage.config.json` in the current directory.
  #[arg(long, global = true)]
  config: Option<PathBuf>,

  #[command(subcommand)]
  command: Command,
}

#[derive(Debug, Args)]
struct RootArgs {
  /// Base URL of the serving host; overrides the configuration.
  #[arg(long)]
  root: Option<String>,
  /// Proxy base URL; overrides the configuration.
  #[arg(long)]
  root_url: Option<String>,
}

#[derive(Debug, Subcommand)]
enum Command {
  /// Print the URL at which a served file can be fetched.
  Url {
    /// File path on the serving host; omitted for the bare file route.
    path: Option<String>,
    #[command(flatten)]
    roots: RootArgs,
  },
  /// Normalise file descriptors given as JSON (`-` reads standard input).
  Normalise {
    /// JSON string, descriptor, list, or null.
    input: String,
    #[command(flatten)]
    roots: RootArgs,
  },
  /// Map a click on a rendered image to its native pixel.
  Click {
    #[arg(long, allow_hyphen_values = true)]
    client_x: f64,
    #[arg(long, allow_hyphen_values = true)]
    client_y: f64,
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    left: f64,
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    top: f64,
    /// Rendered width of the element.
    #[arg(long)]
    width: f64,
    /// Rendered height of the element.
    #[arg(long)]
    height: f64,
    #[arg(long)]
    natural_width: u32,
    #[arg(long)]
    natural_height: u32,
  },
  /// Encode a file as a base64 data URL.
  Encode {
    file: PathBuf,
    /// MIME type; sniffed from the contents when omitted.
    #[arg(long)]
    mime: Option<String>,
  },
  /// Run an image payload through preprocess and postprocess (`-` reads standard input).
  Process {
    input: String,
  },
}

fn main() -> Result<()> {
  env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

  let cli = Cli::parse();
  let config = load_config(cli.config.as_deref())?;

  match cli.command {
    Command::Url { path, roots } => {
      let context = apply_roots(&config, roots);
      println!("{}", context.fetchable_url(path.as_deref()));
    }
    Command::Normalise { input, roots } => {
      let context = apply_roots(&config, roots);
      let raw = read_input(&input)?;
      let file: Option<FileInput> =
        serde_json::from_str(&raw).context("input is not a file descriptor, list, string or null")?;
      let normalised = normalise_file(file, &context.root, context.root_url.as_deref());
      println!("{}", serde_json::to_string_pretty(&normalised)?);
    }
    Command::Click {
      client_x,
      client_y,
      left,
      top,
      width,
      height,
      natural_width,
      natural_height,
    } => {
      let event = ClickEvent { client_x, client_y };
      let image = ImageElement {
        natural_width,
        natural_height,
        bounds: BoundingBox {
          left,
          top,
          width,
          height,
        },
      };
      println!("{}", serde_json::to_string(&select_data_for_click(&event, &image))?);
    }
    Command::Encode { file, mime } => {
      let blob = File::open(&file).with_context(|| format!("failed to open {}", file.display()))?;
      let url = blob_to_base64(blob, mime.as_deref())
        .with_context(|| format!("failed to encode {}", file.display()))?;
      println!("{url}");
    }
    Command::Process { input } => {
      let component = LegacyImage::from_config(&config)?;
      let raw = read_input(&input)?;
      let payload: Option<ImageData> =
        serde_json::from_str(&raw).context("input is not an image payload")?;
      let value = component.preprocess(payload)?;
      let output = component.postprocess(value)?;
      println!("{}", serde_json::to_string_pretty(&output)?);
    }
  }

  Ok(())
}

fn load_config(path: Option<&Path>) -> Result<ComponentConfig> {
  match path {
    Some(path) => {
      let content =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
      serde_json::from_str(&content).with_context(|| format!("failed to parse {}", path.display()))
    }
    None => {
      let cwd = std::env::current_dir().context("failed to resolve the current directory")?;
      Ok(ComponentConfig::discover(&cwd))
    }
  }
}

fn apply_roots(config: &ComponentConfig, roots: RootArgs) -> gradio_legacyimage::RootContext {
  let mut context = config.root_context();
  if let Some(root) = roots.root {
    context.root = root;
  }
  if roots.root_url.is_some() {
    context.root_url = roots.root_url;
  }
  context
}

fn read_input(input: &str) -> Result<String> {
  if input != "-" {
    return Ok(input.to_string());
  }
  let mut buffer = String::new();
  io::stdin()
    .read_to_string(&mut buffer)
    .context("failed to read standard input")?;
  Ok(buffer)
}
