//! `shipyard affected` - Show which deployable units are affected by changes
//!
//! Runs the change-impact analysis against the working-tree diff and prints
//! the affected units, along with a deterministic impact ID so CI can key
//! matrix runs off identical results.

use crate::core::context::ShipContext;
use crate::core::error::{ShipError, ShipResult};
use crate::impact::detect::{ImpactAnalysis, ImpactAnalyzer};
use crate::impact::unit::{DeployableUnit, UnitKind};
use sha2::{Digest, Sha256};

/// Output format for affected command
#[derive(Debug, Clone, Copy)]
enum OutputFormat {
  Text,
  Json,
  Names,
}

impl OutputFormat {
  fn from_str(s: &str) -> ShipResult<Self> {
    match s.to_lowercase().as_str() {
      "text" => Ok(Self::Text),
      "json" => Ok(Self::Json),
      "names" | "names-only" => Ok(Self::Names),
      _ => Err(ShipError::message(format!(
        "Unknown format '{}'. Valid formats: text, json, names",
        s
      ))),
    }
  }
}

/// Deterministic identifier for one impact result (SHA256 of ordered unit labels)
struct ImpactId(String);

impl ImpactId {
  fn from_units(units: &[DeployableUnit]) -> Self {
    let mut hasher = Sha256::new();
    for unit in units {
      hasher.update(unit.label.as_str().as_bytes());
      hasher.update(b"\n");
    }
    Self(format!("{:x}", hasher.finalize()))
  }

  /// Get the short ID (first 12 characters)
  fn short(&self) -> &str {
    &self.0[..12.min(self.0.len())]
  }
}

/// Run the affected command
pub fn run_affected(
  ctx: &ShipContext,
  since: Option<String>,
  kind: Option<String>,
  format: String,
  dry_run: bool,
) -> ShipResult<()> {
  let output_format = OutputFormat::from_str(&format)?;
  let kind = kind.as_deref().map(UnitKind::parse).transpose()?;

  if dry_run {
    return match since.as_deref() {
      Some(base) => {
        let files = ctx.git.changed_files_since(base)?;
        println!("DRY RUN: Would analyze {} changed files", files.len());
        for file in &files {
          println!("  - {}", file.display());
        }
        Ok(())
      }
      None => {
        println!("DRY RUN: No base ref; every deployable unit would be listed");
        Ok(())
      }
    };
  }

  let analyzer = ImpactAnalyzer::new(&ctx.graph, &ctx.git, &ctx.config.classifier);
  let analysis = analyzer.analyze(since.as_deref(), kind)?;

  display_results(&analysis, output_format)
}

/// Display impact analysis results
fn display_results(analysis: &ImpactAnalysis, format: OutputFormat) -> ShipResult<()> {
  match format {
    OutputFormat::Text => display_text(analysis),
    OutputFormat::Json => display_json(analysis),
    OutputFormat::Names => display_names(analysis),
  }
}

fn kind_icon(kind: UnitKind) -> &'static str {
  match kind {
    UnitKind::App => "📦",
    UnitKind::Chart => "⎈",
  }
}

/// Display results in human-readable text format
fn display_text(analysis: &ImpactAnalysis) -> ShipResult<()> {
  println!("Impact Analysis");
  println!("===============");
  println!();

  println!("Changed files: {}", analysis.changed_files.len());
  if !analysis.changed_files.is_empty() && analysis.changed_files.len() <= 20 {
    for file in &analysis.changed_files {
      println!("  {}", file);
    }
  }
  println!();

  println!("Directly affected targets: {}", analysis.direct.len());
  if !analysis.direct.is_empty() && analysis.direct.len() <= 20 {
    for label in &analysis.direct {
      println!("  {}", label);
    }
  }
  println!();

  println!("Affected units: {}", analysis.units.len());
  for unit in &analysis.units {
    println!("  {} {} ({})  {}", kind_icon(unit.kind), unit.path(), unit.kind, unit.label);
  }
  println!();

  let id = ImpactId::from_units(&analysis.units);
  println!("Impact ID: {}", id.short());

  Ok(())
}

/// Display results in JSON format
fn display_json(analysis: &ImpactAnalysis) -> ShipResult<()> {
  use serde_json::json;

  let direct: Vec<String> = analysis.direct.iter().map(|l| l.to_string()).collect();
  let id = ImpactId::from_units(&analysis.units);

  let output = json!({
      "changed_files": analysis.changed_files,
      "direct_targets": direct,
      "units": analysis.units,
      "summary": {
          "changed_files_count": analysis.changed_files.len(),
          "direct_count": analysis.direct.len(),
          "unit_count": analysis.units.len()
      },
      "impact_id": id.0,
      "computed_at": chrono::Utc::now().to_rfc3339()
  });

  println!("{}", serde_json::to_string_pretty(&output)?);

  Ok(())
}

/// Display only unit paths, one per line (CI matrix input)
fn display_names(analysis: &ImpactAnalysis) -> ShipResult<()> {
  for unit in &analysis.units {
    println!("{}", unit.path());
  }

  Ok(())
}
