use clap::{Parser, Subcommand};
use shipyard::commands;
use shipyard::core::context::ShipContext;
use shipyard::core::error::{ShipError, print_error};

/// Change-impact analysis for Bazel monorepos
#[derive(Parser)]
#[command(name = "shipyard")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
#[command(styles = get_styles())]
struct Cli {
  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Show which deployable units are affected by changes
  Affected {
    /// Git ref to compare the working tree against (omit to list every unit)
    #[arg(long)]
    since: Option<String>,
    /// Restrict results to one unit kind: app, chart
    #[arg(long)]
    kind: Option<String>,
    /// Output format: text (default), json, names
    #[arg(long, default_value = "text")]
    format: String,
    /// Show the change set without running the analysis
    #[arg(long)]
    dry_run: bool,
  },

  /// List every known deployable unit
  Units {
    /// Restrict to one unit kind: app, chart
    #[arg(long)]
    kind: Option<String>,
    /// Output units in JSON format
    #[arg(long)]
    json: bool,
  },
}

fn get_styles() -> clap::builder::Styles {
  clap::builder::Styles::styled()
    .usage(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Yellow))),
    )
    .header(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Yellow))),
    )
    .literal(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Green))))
    .invalid(
      anstyle::Style::new()
        .bold()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Red))),
    )
    .error(
      anstyle::Style::new()
        .bold()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Red))),
    )
    .valid(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Green))),
    )
    .placeholder(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::White))))
}

fn main() {
  let cli = Cli::parse();

  let cwd = match std::env::current_dir() {
    Ok(dir) => dir,
    Err(e) => {
      eprintln!("Error: Failed to get current directory: {}", e);
      std::process::exit(1);
    }
  };

  // Build the invocation context once (git root, config, graph client);
  // its caches live exactly as long as this invocation
  let ctx = match ShipContext::build(&cwd) {
    Ok(ctx) => ctx,
    Err(e) => handle_error(e),
  };

  let result = match cli.command {
    Commands::Affected {
      since,
      kind,
      format,
      dry_run,
    } => commands::run_affected(&ctx, since, kind, format, dry_run),
    Commands::Units { kind, json } => commands::run_units(&ctx, kind, json),
  };

  if let Err(err) = result {
    handle_error(err);
  }
}

fn handle_error(err: ShipError) -> ! {
  print_error(&err);
  std::process::exit(err.exit_code().as_i32());
}
