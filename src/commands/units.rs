//! `shipyard units` - List every known deployable unit
//!
//! Exposes the unit directory directly: the same listing `affected` returns
//! when no base ref is given. Useful for bootstrapping a first release and
//! for checking that metadata targets are wired up.

use crate::core::context::ShipContext;
use crate::core::error::ShipResult;
use crate::impact::directory::UnitDirectory;
use crate::impact::unit::UnitKind;

/// Run the units command
pub fn run_units(ctx: &ShipContext, kind: Option<String>, json: bool) -> ShipResult<()> {
  let kind = kind.as_deref().map(UnitKind::parse).transpose()?;

  let directory = UnitDirectory::new(&ctx.graph);
  let units = directory.list(kind)?;

  if json {
    println!("{}", serde_json::to_string_pretty(&units)?);
    return Ok(());
  }

  println!("Deployable units: {}", units.len());
  for unit in &units {
    println!("  {} ({})  {}", unit.path(), unit.kind, unit.label);
  }

  Ok(())
}
