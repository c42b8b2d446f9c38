//! Schema discovery and output writing
//!
//! Schemas live flat in one directory. Each one is read, expanded into a
//! fixture document and written back in the same notation as
//! `<helper>_output.<ext>`.

use crate::config::{GeneratorConfig, CONFIG_FILE};
use crate::error::{Error, Result};
use crate::fixture::OutputDocument;
use crate::generator::Generator;
use crate::spec::HelperSpec;
use std::path::{Path, PathBuf};

/// Suffix appended to the helper name for generated documents
pub const OUTPUT_SUFFIX: &str = "_output";

/// Notation of a schema file, chosen by extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaFormat {
    Yaml,
    Json,
}

impl SchemaFormat {
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()? {
            "yml" | "yaml" => Some(SchemaFormat::Yaml),
            "json" => Some(SchemaFormat::Json),
            _ => None,
        }
    }

    pub fn parse_schema(self, content: &str) -> Result<HelperSpec> {
        match self {
            SchemaFormat::Yaml => HelperSpec::from_yaml(content),
            SchemaFormat::Json => HelperSpec::from_json(content),
        }
    }

    pub fn render(self, document: &OutputDocument) -> Result<String> {
        match self {
            SchemaFormat::Yaml => document.to_yaml(),
            SchemaFormat::Json => document.to_json(),
        }
    }
}

/// Outcome of processing one schema file
#[derive(Debug, Clone, PartialEq)]
pub struct FileReport {
    pub path: PathBuf,
    pub output: Option<PathBuf>,
    pub fixtures: usize,
    pub error: Option<String>,
}

impl FileReport {
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

/// Top-level keys of a generated document
const OUTPUT_KEYS: [&str; 2] = ["build_test", "run_test"];

/// Whether `path` holds a document written by a previous run
///
/// Decided by content: a fixture list at the top level and no helper name.
/// Unreadable files are left to schema loading to report.
fn is_generated_output(path: &Path, format: SchemaFormat) -> bool {
    let Ok(content) = std::fs::read_to_string(path) else {
        return false;
    };
    match format {
        SchemaFormat::Yaml => match serde_norway::from_str::<serde_norway::Value>(&content) {
            Ok(serde_norway::Value::Mapping(map)) => {
                !map.contains_key("name") && OUTPUT_KEYS.iter().any(|k| map.contains_key(*k))
            }
            _ => false,
        },
        SchemaFormat::Json => match serde_json::from_str::<serde_json::Value>(&content) {
            Ok(serde_json::Value::Object(map)) => {
                !map.contains_key("name") && OUTPUT_KEYS.iter().any(|k| map.contains_key(*k))
            }
            _ => false,
        },
    }
}

/// List schema files in `dir`, sorted by path
///
/// Not recursive. The configuration file and previously generated
/// documents are skipped.
pub fn list_schemas(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut schemas = Vec::new();

    if !dir.exists() {
        return Err(Error::Config(format!(
            "Schema directory not found: {}",
            dir.display()
        )));
    }

    let entries = std::fs::read_dir(dir).map_err(Error::Io)?;
    for entry in entries {
        let entry = entry.map_err(Error::Io)?;
        let path = entry.path();

        let Some(format) = SchemaFormat::from_path(&path) else {
            continue;
        };
        if !path.is_file() || path.file_name().and_then(|n| n.to_str()) == Some(CONFIG_FILE) {
            continue;
        }
        if is_generated_output(&path, format) {
            continue;
        }
        schemas.push(path);
    }

    schemas.sort();
    Ok(schemas)
}

/// Read and validate one schema
pub fn load_schema(path: &Path) -> Result<(HelperSpec, SchemaFormat)> {
    let format = SchemaFormat::from_path(path)
        .ok_or_else(|| Error::Other(format!("Not a schema file: {}", path.display())))?;
    let content = std::fs::read_to_string(path).map_err(Error::Io)?;
    let spec = format.parse_schema(&content).map_err(|e| match e {
        Error::Schema(msg) => Error::Schema(format!("{}: {}", path.display(), msg)),
        other => other,
    })?;
    Ok((spec, format))
}

/// `<helper>_output.<ext>` next to the schema or inside `output_dir`
pub fn output_path(schema_path: &Path, helper_name: &str, output_dir: Option<&Path>) -> PathBuf {
    let extension = schema_path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("yml");
    let file_name = format!("{}{}.{}", helper_name, OUTPUT_SUFFIX, extension);
    let base = output_dir
        .or_else(|| schema_path.parent())
        .unwrap_or_else(|| Path::new("."));
    base.join(file_name)
}

/// Serialize and write a document, creating the parent directory if needed
pub fn write_document(path: &Path, format: SchemaFormat, document: &OutputDocument) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent).map_err(Error::Io)?;
        }
    }
    let content = format.render(document)?;
    std::fs::write(path, content).map_err(Error::Io)
}

/// Generate and write the document for one schema file
pub fn process_file(
    path: &Path,
    config: &GeneratorConfig,
    generator: &mut Generator,
) -> Result<(PathBuf, usize)> {
    let (spec, format) = load_schema(path)?;
    let document = generator.generate(&spec);
    let output = output_path(path, &spec.name, config.output_dir.as_deref());
    if output == path {
        return Err(Error::Other(format!(
            "{}: output would overwrite the schema",
            path.display()
        )));
    }
    write_document(&output, format, &document)?;
    Ok((output, document.len()))
}

/// Process every schema in the configured directory
///
/// A failing file is reported and does not stop the others. Progress goes
/// through the generator's sink.
pub fn process_directory(
    config: &GeneratorConfig,
    generator: &mut Generator,
) -> Result<Vec<FileReport>> {
    let schemas = list_schemas(&config.schema_dir)?;
    if schemas.is_empty() {
        generator.log().warning(&format!(
            "No schemas found in {}",
            config.schema_dir.display()
        ));
    } else {
        generator.log().info(&format!(
            "Found {} schema(s) in {}",
            schemas.len(),
            config.schema_dir.display()
        ));
    }

    let mut reports = Vec::with_capacity(schemas.len());
    for path in schemas {
        let report = match process_file(&path, config, generator) {
            Ok((output, fixtures)) => {
                generator.log().info(&format!(
                    "{} -> {} ({} fixtures)",
                    path.display(),
                    output.display(),
                    fixtures
                ));
                FileReport {
                    path,
                    output: Some(output),
                    fixtures,
                    error: None,
                }
            }
            Err(e) => {
                generator.log().error(&format!("{}: {}", path.display(), e));
                FileReport {
                    path,
                    output: None,
                    fixtures: 0,
                    error: Some(e.to_string()),
                }
            }
        };
        reports.push(report);
    }

    Ok(reports)
}
