use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

use ocg_core::config::{self, CONFIG_FILE_NAME, OcgConfig};
use ocg_core::ir::{IrResponseBody, IrSpec};
use ocg_core::parse::spec::OpenApiSpec;
use ocg_core::parse::{self, DocumentReader, FileDocumentReader, HttpDocumentReader};
use ocg_core::transform;
use ocg_core::{CodeGenerator, GeneratedFile};
use ocg_csharp_client::CSharpClientGenerator;

#[derive(Parser)]
#[command(name = "ocg", about = "OpenAPI 3.x to C# client generator", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate models, response envelopes and the client class
    Generate {
        /// Path or http(s) URL of the OpenAPI document (YAML or JSON)
        #[arg(short, long)]
        input: Option<String>,

        /// Output directory
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Namespace of the generated code
        #[arg(long)]
        namespace: Option<String>,

        /// Name of the generated partial client class
        #[arg(long = "client")]
        client_name: Option<String>,
    },

    /// Validate an OpenAPI document
    Validate {
        /// Path or http(s) URL of the OpenAPI document
        #[arg(short, long)]
        input: String,
    },

    /// Inspect the types and operations a document produces
    Inspect {
        /// Path or http(s) URL of the OpenAPI document
        #[arg(short, long)]
        input: String,

        /// Output format
        #[arg(long, default_value = "yaml")]
        format: InspectFormat,
    },

    /// Initialize a new ocg configuration
    Init {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

#[derive(Clone, ValueEnum)]
enum InspectFormat {
    Yaml,
    Json,
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            input,
            output,
            namespace,
            client_name,
        } => cmd_generate(input, output, namespace, client_name),

        Commands::Validate { input } => cmd_validate(input),

        Commands::Inspect { input, format } => cmd_inspect(input, format),

        Commands::Init { force } => cmd_init(force),

        Commands::Completions { shell } => {
            let mut cmd = <Cli as clap::CommandFactory>::command();
            clap_complete::generate(shell, &mut cmd, "ocg", &mut std::io::stdout());
            Ok(())
        }
    }
}

/// Try to load the project config file from the current directory.
fn try_load_config() -> Result<Option<OcgConfig>> {
    let config_path = PathBuf::from(CONFIG_FILE_NAME);
    let loaded = config::load_config(&config_path).map_err(|e| anyhow::anyhow!(e))?;
    if loaded.is_some() {
        log::debug!("using {}", config_path.display());
    }
    Ok(loaded)
}

/// Pick a reader for a local path or an `http(s)://` URL.
fn document_reader(input: &str) -> Box<dyn DocumentReader> {
    if parse::is_url(input) {
        Box::new(HttpDocumentReader::new(input))
    } else {
        Box::new(FileDocumentReader::new(input))
    }
}

fn read_document(input: &str) -> Result<OpenApiSpec> {
    document_reader(input)
        .read()
        .with_context(|| format!("failed to load {input}"))
}

fn load_spec(input: &str, cfg: &OcgConfig) -> Result<IrSpec> {
    let parsed = read_document(input)?;
    Ok(transform::transform_with_options(
        &parsed,
        &cfg.transform_options(),
    ))
}

/// Write generated files to disk under the given base directory.
fn write_files(base: &Path, files: &[GeneratedFile]) -> Result<()> {
    for file in files {
        let path = base.join(&file.path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create directory {}", parent.display()))?;
        }
        fs::write(&path, &file.content)
            .with_context(|| format!("failed to write {}", path.display()))?;
        eprintln!("  wrote {}", path.display());
    }
    Ok(())
}

fn cmd_generate(
    input: Option<String>,
    output: Option<PathBuf>,
    namespace: Option<String>,
    client_name: Option<String>,
) -> Result<()> {
    let mut cfg = try_load_config()?.unwrap_or_default();
    if let Some(namespace) = namespace {
        cfg.namespace = namespace;
    }
    if let Some(client_name) = client_name {
        cfg.client_name = client_name;
    }
    let input = input.unwrap_or_else(|| cfg.input.clone());
    let output_dir = output.unwrap_or_else(|| PathBuf::from(&cfg.output));

    let ir = load_spec(&input, &cfg)?;

    eprintln!("Generating C# client → {}", output_dir.display());
    let files = CSharpClientGenerator
        .generate(&ir, &cfg.generator_config())
        .context("code generation failed")?;

    fs::create_dir_all(&output_dir).with_context(|| {
        format!("failed to create output directory {}", output_dir.display())
    })?;
    write_files(&output_dir, &files)?;

    eprintln!(
        "Generated {} files ({} enums, {} models, {} methods) in {}",
        files.len(),
        ir.enums.len(),
        ir.models.len(),
        ir.operations.len(),
        output_dir.display()
    );
    Ok(())
}

fn cmd_validate(input: String) -> Result<()> {
    let parsed = read_document(&input)?;

    eprintln!(
        "Valid OpenAPI {} document: {}",
        parsed.openapi, parsed.info.title
    );
    eprintln!("  Version: {}", parsed.info.version);
    eprintln!("  Paths: {}", parsed.paths.len());

    if let Some(ref components) = parsed.components {
        eprintln!("  Schemas: {}", components.schemas.len());
    }

    let cfg = try_load_config()?.unwrap_or_default();
    let ir = transform::transform_with_options(&parsed, &cfg.transform_options());
    eprintln!("  Operations: {}", ir.operations.len());
    eprintln!("  Enums: {}", ir.enums.len());
    eprintln!("  Models: {}", ir.models.len());

    eprintln!("Validation successful.");
    Ok(())
}

fn cmd_inspect(input: String, format: InspectFormat) -> Result<()> {
    let cfg = try_load_config()?.unwrap_or_default();
    let ir = load_spec(&input, &cfg)?;

    let summary = build_inspect_summary(&ir);

    match format {
        InspectFormat::Yaml => {
            let yaml = serde_yaml_ng::to_string(&summary)?;
            print!("{}", yaml);
        }
        InspectFormat::Json => {
            let json = serde_json::to_string_pretty(&summary)?;
            println!("{}", json);
        }
    }

    Ok(())
}

fn build_inspect_summary(ir: &IrSpec) -> serde_json::Value {
    let enums: Vec<serde_json::Value> = ir
        .enums
        .iter()
        .map(|e| {
            serde_json::json!({
                "name": e.name,
                "members": e.members.iter().map(|m| &m.name).collect::<Vec<_>>(),
            })
        })
        .collect();

    let models: Vec<serde_json::Value> = ir
        .models
        .iter()
        .map(|m| {
            let fields: serde_json::Map<String, serde_json::Value> = m
                .fields
                .iter()
                .map(|f| (f.name.clone(), f.field_type.to_string().into()))
                .collect();
            serde_json::json!({
                "name": m.name,
                "fields": fields,
            })
        })
        .collect();

    let operations: Vec<serde_json::Value> = ir
        .operations
        .iter()
        .map(|op| {
            let responses: Vec<serde_json::Value> = op
                .responses
                .iter()
                .map(|r| {
                    let body = match &r.body {
                        IrResponseBody::Json(t) => t.to_string(),
                        IrResponseBody::Binary => "binary".to_string(),
                    };
                    serde_json::json!({
                        "status": r.status,
                        "content_type": r.content_type,
                        "type": body,
                    })
                })
                .collect();
            serde_json::json!({
                "name": op.name,
                "method": op.method.as_str(),
                "path": op.path,
                "responses": responses,
            })
        })
        .collect();

    serde_json::json!({
        "info": {
            "title": ir.info.title,
            "version": ir.info.version,
        },
        "enums": enums,
        "models": models,
        "operations": operations,
    })
}

fn cmd_init(force: bool) -> Result<()> {
    let config_path = PathBuf::from(CONFIG_FILE_NAME);

    if config_path.exists() && !force {
        anyhow::bail!(
            "{} already exists. Use --force to overwrite.",
            config_path.display()
        );
    }

    fs::write(&config_path, config::default_config_content())?;
    eprintln!("Created {}", config_path.display());
    Ok(())
}
