//! fppolicy - Main Entry Point
//!
//! Command-line companion for the fingerprint-policy library. It generates
//! policy documents (random, seeded, or template-based) and inspects existing
//! documents by running them through the resolver.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Arg, ArgAction, ArgMatches, Command};
use tracing::{info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use fingerprint_policy::{
    load_template, resolve_document, save_document, FingerprintPolicy, GeneratorOptions,
    PolicyGenerator, NAME, VERSION,
};

/// ANSI color codes for terminal output
mod colors {
    pub const RESET: &str = "\x1b[0m";
    pub const BOLD: &str = "\x1b[1m";
    pub const DIM: &str = "\x1b[2m";
    pub const CYAN: &str = "\x1b[36m";
    pub const GREEN: &str = "\x1b[32m";
    pub const BLUE: &str = "\x1b[34m";
}

/// Print the startup banner with version and ASCII art
fn print_banner() {
    println!(
        r#"
{cyan}{bold}  __                     _ _
 / _|_ __   _ __   ___ | (_) ___ _   _
| |_| '_ \ | '_ \ / _ \| | |/ __| | | |
|  _| |_) || |_) | (_) | | | (__| |_| |
|_| | .__/ | .__/ \___/|_|_|\___|\__, |
    |_|    |_|                   |___/
{reset}
{dim}  Fingerprint Override Policy Toolkit{reset}
{dim}  Version: {version}{reset}
"#,
        cyan = colors::CYAN,
        bold = colors::BOLD,
        reset = colors::RESET,
        dim = colors::DIM,
        version = VERSION
    );
}

/// Print the active overrides of a resolved policy
fn print_policy_summary(policy: &FingerprintPolicy) {
    let active = policy.active_categories();
    println!(
        "{bold}{blue}Resolved policy:{reset} {} of 22 categories active",
        active.len(),
        bold = colors::BOLD,
        blue = colors::BLUE,
        reset = colors::RESET
    );
    for (label, value) in summary_rows(policy) {
        println!(
            "  {dim}{label:<18}{reset} {value}",
            dim = colors::DIM,
            reset = colors::RESET
        );
    }
    println!();
}

/// Label/value rows for every active category, in catalogue order.
fn summary_rows(policy: &FingerprintPolicy) -> Vec<(&'static str, String)> {
    let mut rows = Vec::new();

    if policy.language.enabled {
        let primary = policy.language.language.as_deref().unwrap_or("(unset)");
        let value = if policy.language.languages.is_empty() {
            primary.to_string()
        } else {
            format!("{primary} [{}]", policy.language.languages.join(", "))
        };
        rows.push(("Language:", value));
    }
    if policy.timezone.enabled {
        rows.push((
            "Timezone:",
            policy
                .timezone
                .timezone
                .clone()
                .unwrap_or_else(|| "(unset)".to_string()),
        ));
    }
    if policy.geolocation.enabled {
        rows.push((
            "Geolocation:",
            format!(
                "{}, {} (accuracy {}m)",
                policy.geolocation.latitude,
                policy.geolocation.longitude,
                policy.geolocation.accuracy
            ),
        ));
    }
    if policy.screen_resolution.enabled {
        rows.push((
            "Screen:",
            format!(
                "{}x{}",
                policy.screen_resolution.width, policy.screen_resolution.height
            ),
        ));
    }
    if policy.display_zoom.enabled {
        rows.push(("Display Zoom:", format!("{}x", policy.display_zoom.scale_factor)));
    }
    if policy.screen_size.enabled {
        rows.push((
            "Available Area:",
            format!(
                "{}x{}",
                policy.screen_size.available_width, policy.screen_size.available_height
            ),
        ));
    }
    if policy.color_depth.enabled {
        rows.push(("Color Depth:", format!("{}-bit", policy.color_depth.depth)));
    }
    if policy.touch_points.enabled {
        rows.push((
            "Touch Points:",
            policy.touch_points.max_touch_points.to_string(),
        ));
    }
    if policy.canvas.enabled {
        rows.push((
            "Canvas:",
            format!(
                "mode {}, noise {}",
                policy.canvas.noise_mode.as_deref().unwrap_or("(unset)"),
                policy.canvas.noise_level
            ),
        ));
    }
    if policy.canvas_font.enabled {
        rows.push((
            "Canvas Fonts:",
            format!("{} protected", policy.canvas_font.protected_fonts.len()),
        ));
    }
    if policy.css_font.enabled {
        rows.push(("CSS Fonts:", format!("noise {}", policy.css_font.noise_level)));
    }
    if policy.webrtc.enabled {
        rows.push((
            "WebRTC:",
            policy
                .webrtc
                .mode
                .clone()
                .unwrap_or_else(|| "(unset)".to_string()),
        ));
    }
    if policy.webgl.enabled {
        rows.push(("WebGL:", format!("noise {}", policy.webgl.noise_level)));
    }
    if policy.hardware_concurrency.enabled {
        rows.push((
            "CPU Cores:",
            policy.hardware_concurrency.cores.to_string(),
        ));
    }
    if policy.device_memory.enabled {
        rows.push(("Device Memory:", format!("{} GB", policy.device_memory.memory_gb)));
    }
    if policy.battery.enabled {
        let state = if policy.battery.charging {
            "charging"
        } else {
            "discharging"
        };
        rows.push((
            "Battery:",
            format!("level {:.2}, {state}", policy.battery.level),
        ));
    }
    if policy.user_agent.enabled {
        rows.push((
            "User Agent:",
            policy
                .user_agent
                .user_agent
                .clone()
                .unwrap_or_else(|| "(unset)".to_string()),
        ));
    }
    if policy.port_scan_protection {
        rows.push(("Port Scan Guard:", "on".to_string()));
    }
    if policy.console_output_disabled {
        rows.push(("Console Output:", "suppressed".to_string()));
    }
    if policy.do_not_track.enabled {
        rows.push((
            "Do Not Track:",
            policy
                .do_not_track
                .value
                .clone()
                .unwrap_or_else(|| "(unset)".to_string()),
        ));
    }
    if policy.webdriver_detection_disabled {
        rows.push(("Webdriver Checks:", "suppressed".to_string()));
    }
    if policy.cdp_protection {
        rows.push(("CDP Protection:", "on".to_string()));
    }

    rows
}

/// Build the CLI command parser
fn build_cli() -> Command {
    Command::new(NAME)
        .version(VERSION)
        .author("Fingerprint-Policy Team")
        .about("Generate and inspect fingerprint override policy documents")
        .long_about(
            "fppolicy works with the JSON policy documents the fingerprint-policy\n\
             engine consumes:\n\
             - generate random, seed-reproducible, or template-based documents\n\
             - pin individual values (language, timezone, resolution, location)\n\
             - inspect a document by resolving it and listing active overrides",
        )
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable verbose logging")
                .action(ArgAction::Count)
                .global(true),
        )
        .arg(
            Arg::new("quiet")
                .short('q')
                .long("quiet")
                .help("Suppress output except errors")
                .action(ArgAction::SetTrue)
                .conflicts_with("verbose")
                .global(true),
        )
        .subcommand(
            Command::new("generate")
                .about("Generate a policy document")
                .arg(
                    Arg::new("output")
                        .short('o')
                        .long("output")
                        .value_name("FILE")
                        .help("Write the document to a file instead of stdout")
                        .value_parser(clap::value_parser!(PathBuf)),
                )
                .arg(
                    Arg::new("template")
                        .short('t')
                        .long("template")
                        .value_name("FILE")
                        .help("Derive the document from an existing template")
                        .value_parser(clap::value_parser!(PathBuf)),
                )
                .arg(
                    Arg::new("seed")
                        .long("seed")
                        .value_name("STRING")
                        .help("Produce the same document for the same seed")
                        .conflicts_with("template"),
                )
                .arg(
                    Arg::new("language")
                        .long("language")
                        .value_name("TAG")
                        .help("Pin the browser language (e.g. zh-CN)"),
                )
                .arg(
                    Arg::new("timezone")
                        .long("timezone")
                        .value_name("TZ")
                        .help("Pin the IANA timezone (e.g. Asia/Shanghai)"),
                )
                .arg(
                    Arg::new("resolution")
                        .long("resolution")
                        .value_name("WIDTHxHEIGHT")
                        .help("Pin the screen resolution (e.g. 1920x1080)"),
                )
                .arg(
                    Arg::new("latitude")
                        .long("latitude")
                        .value_name("DEGREES")
                        .help("Pin the geolocation latitude")
                        .value_parser(clap::value_parser!(f64))
                        .requires("longitude"),
                )
                .arg(
                    Arg::new("longitude")
                        .long("longitude")
                        .value_name("DEGREES")
                        .help("Pin the geolocation longitude")
                        .value_parser(clap::value_parser!(f64))
                        .requires("latitude"),
                ),
        )
        .subcommand(
            Command::new("inspect")
                .about("Resolve a policy document and print the active overrides")
                .arg(
                    Arg::new("file")
                        .value_name("FILE")
                        .help("Policy document to resolve")
                        .required(true)
                        .value_parser(clap::value_parser!(PathBuf)),
                )
                .arg(
                    Arg::new("json")
                        .long("json")
                        .help("Print the resolved policy as JSON")
                        .action(ArgAction::SetTrue),
                ),
        )
}

/// Collect pinned generator values from the generate subcommand matches
fn generator_options(matches: &ArgMatches) -> Result<GeneratorOptions> {
    let mut options = GeneratorOptions::new();

    if let Some(language) = matches.get_one::<String>("language") {
        options = options.with_language(language);
    }
    if let Some(timezone) = matches.get_one::<String>("timezone") {
        options = options.with_timezone(timezone);
    }
    if let Some(resolution) = matches.get_one::<String>("resolution") {
        let (width, height) = parse_resolution(resolution).with_context(|| {
            format!("Invalid resolution '{resolution}', expected WIDTHxHEIGHT (e.g. 1920x1080)")
        })?;
        options = options.with_resolution(width, height);
    }
    if let (Some(latitude), Some(longitude)) = (
        matches.get_one::<f64>("latitude").copied(),
        matches.get_one::<f64>("longitude").copied(),
    ) {
        options = options.with_coordinates(latitude, longitude);
    }

    Ok(options)
}

/// Parse a "WIDTHxHEIGHT" resolution string
fn parse_resolution(value: &str) -> Result<(u32, u32)> {
    let (width, height) = value
        .split_once(['x', 'X'])
        .context("missing 'x' separator")?;
    Ok((width.trim().parse()?, height.trim().parse()?))
}

/// Initialize the tracing/logging subsystem
///
/// Logs go to stderr so generated documents on stdout stay machine-readable.
fn init_tracing(verbosity: u8, quiet: bool) {
    let level = if quiet {
        Level::ERROR
    } else {
        match verbosity {
            0 => Level::INFO,
            1 => Level::DEBUG,
            _ => Level::TRACE,
        }
    };

    let filter = EnvFilter::from_default_env().add_directive(level.into());

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(true)
                .with_thread_ids(false)
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}

/// Run the generate subcommand
fn run_generate(matches: &ArgMatches, quiet: bool) -> Result<()> {
    let options = generator_options(matches)?;
    let generator = PolicyGenerator::with_options(options);

    let document = if let Some(template_path) = matches.get_one::<PathBuf>("template") {
        let template = load_template(template_path).with_context(|| {
            format!("Failed to load template {}", template_path.display())
        })?;
        generator
            .from_template(template)
            .context("Failed to derive document from template")?
    } else if let Some(seed) = matches.get_one::<String>("seed") {
        info!("Generating seed-reproducible policy document");
        generator.consistent(seed)
    } else {
        info!("Generating random policy document");
        generator.random()
    };

    match matches.get_one::<PathBuf>("output") {
        Some(path) => {
            if !quiet {
                print_banner();
            }
            save_document(&document, path)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            println!(
                "{green}{bold}Policy document saved:{reset} {}",
                path.display(),
                green = colors::GREEN,
                bold = colors::BOLD,
                reset = colors::RESET
            );
        }
        None => {
            // No banner or colors here: stdout carries the document itself.
            println!("{}", serde_json::to_string_pretty(&document)?);
        }
    }

    Ok(())
}

/// Run the inspect subcommand
fn run_inspect(matches: &ArgMatches, quiet: bool) -> Result<()> {
    let path = matches
        .get_one::<PathBuf>("file")
        .cloned()
        .context("Missing FILE argument")?;

    let content = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read policy document {}", path.display()))?;

    let policy = resolve_document(&content).ok_or_else(|| {
        anyhow::anyhow!(
            "{} is not a usable policy document (expected a JSON object with a settings object)",
            path.display()
        )
    })?;

    if matches.get_flag("json") {
        println!("{}", serde_json::to_string_pretty(&policy)?);
        return Ok(());
    }

    if !quiet {
        print_banner();
    }
    print_policy_summary(&policy);

    Ok(())
}

/// Main application entry point
fn main() -> Result<()> {
    // Parse CLI arguments
    let matches = build_cli().get_matches();

    // Get verbosity settings before doing any work
    let verbosity = matches.get_count("verbose");
    let quiet = matches.get_flag("quiet");

    // Initialize logging
    init_tracing(verbosity, quiet);

    match matches.subcommand() {
        Some(("generate", sub_matches)) => run_generate(sub_matches, quiet),
        Some(("inspect", sub_matches)) => run_inspect(sub_matches, quiet),
        _ => Ok(()),
    }
}
