use anyhow::{Context, Result};
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use std::path::PathBuf;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use variant_editor::{EditorSession, MatrixManifest};

fn main() -> Result<()> {
    let file_arg = Arg::new("file")
        .long("file")
        .short('f')
        .required(true)
        .value_parser(value_parser!(PathBuf))
        .help("Matrix manifest (YAML)");

    let cli = Command::new("variant-matrix")
        .version(variant_editor::VERSION)
        .about("Inspect product variant matrices")
        .arg_required_else_help(true)
        .arg(
            Arg::new("log-json")
                .long("log-json")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Write logs as JSON"),
        )
        .subcommand(
            Command::new("show")
                .about("List the visible variants of a manifest")
                .arg(file_arg.clone())
                .arg(
                    Arg::new("page")
                        .long("page")
                        .default_value("0")
                        .value_parser(value_parser!(usize))
                        .help("Zero-based page to print"),
                )
                .arg(
                    Arg::new("json")
                        .long("json")
                        .action(ArgAction::SetTrue)
                        .help("Output the whole matrix as JSON"),
                ),
        )
        .subcommand(
            Command::new("check")
                .about("Replay a manifest and verify the matrix invariants")
                .arg(file_arg),
        );

    let matches = cli.get_matches();
    init_logging(matches.get_flag("log-json"));

    match matches.subcommand() {
        Some(("show", args)) => show(args),
        Some(("check", args)) => check(args),
        _ => Ok(()),
    }
}

fn init_logging(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
            .init();
    }
}

fn open(args: &ArgMatches) -> Result<EditorSession> {
    let path = args
        .get_one::<PathBuf>("file")
        .context("--file is required")?;
    let manifest = MatrixManifest::load(path)
        .with_context(|| format!("loading {}", path.display()))?;
    manifest
        .into_session()
        .with_context(|| format!("replaying {}", path.display()))
}

fn show(args: &ArgMatches) -> Result<()> {
    let session = open(args)?;
    let matrix = session.matrix();

    if args.get_flag("json") {
        println!("{}", serde_json::to_string_pretty(matrix)?);
        return Ok(());
    }

    let page = session.page(args.get_one::<usize>("page").copied().unwrap_or(0));
    println!("{}", session.draft().title);
    for option in matrix.options() {
        println!("  {}: {}", option.name, option.values().join(", "));
    }
    println!(
        "Variants (page {} of {}, {} total, {} excluded):",
        page.page + 1,
        page.total_pages,
        page.total_items,
        matrix.ledger().len()
    );
    for record in page.items {
        let asset = record.dimension_asset.as_deref().unwrap_or("-");
        println!("  {}  asset: {}", record.combination, asset);
    }
    for option in matrix.empty_options() {
        println!("warning: option '{}' has no values left", option.name);
    }
    Ok(())
}

fn check(args: &ArgMatches) -> Result<()> {
    let session = open(args)?;
    let matrix = session.matrix();
    matrix
        .check_invariants()
        .context("matrix invariants violated")?;
    println!(
        "OK: {} options, {} visible of {} combinations",
        matrix.options().len(),
        matrix.variants().len(),
        matrix.full_set().len()
    );
    Ok(())
}
