//! ASRock Polychrome CLI tool
//!
//! Builds a controller on top of a dry-run adapter, to inspect the modes and zones each hardware
//! revision exposes and the writes a configuration would result in.

use std::error::Error;
use std::process;

use clap::builder::EnumValueParser;
use clap::{
    crate_description, crate_name, crate_version, value_parser, Arg, ArgMatches, Command, ValueEnum,
};
use env_logger::Env;
use polychrome::{Adapter, Controller, RgbColor, Variant, ZoneKind, ZoneSlot};

use crate::dry_run::DryRunAdapter;

mod dry_run;

/// Supported hardware revisions.
#[derive(ValueEnum, Default, PartialEq, Eq, Debug, Copy, Clone)]
enum VariantArg {
    AsrLed,
    PolychromeV1,
    #[default]
    PolychromeV2,
}

impl From<VariantArg> for Variant {
    fn from(variant: VariantArg) -> Self {
        match variant {
            VariantArg::AsrLed => Variant::AsrLed,
            VariantArg::PolychromeV1 => Variant::PolychromeV1,
            VariantArg::PolychromeV2 => Variant::PolychromeV2,
        }
    }
}

/// Mode configuration to apply.
#[derive(Debug)]
struct Config {
    mode: String,
    speed: Option<u8>,
    color: Option<RgbColor>,
}

impl Config {
    fn from_cli(matches: &ArgMatches) -> Self {
        Self {
            mode: matches.get_one::<String>("mode").cloned().unwrap_or_else(|| "Static".into()),
            speed: matches.get_one::<u8>("speed").copied(),
            color: matches.get_one::<RgbColor>("color").copied(),
        }
    }
}

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let matches = cli().get_matches();

    let variant = matches.get_one::<VariantArg>("variant").copied().unwrap_or_default();
    let zones = match zone_counts(&matches) {
        Ok(zones) => zones,
        Err(err) => {
            eprintln!("\x1b[31mError:\x1b[0m {err}");
            process::exit(1);
        },
    };
    let mut adapter = DryRunAdapter::new(variant.into(), zones);

    let mut controller = Controller::new(&mut adapter);

    match matches.subcommand() {
        Some(("apply", matches)) => {
            let config = Config::from_cli(matches);
            match apply(&mut controller, &config) {
                Ok(()) => println!("\x1b[32mSuccessfully applied changes.\x1b[0m"),
                Err(err) => {
                    eprintln!("\x1b[31mError:\x1b[0m {err}");
                    process::exit(1);
                },
            }
        },
        _ => list(&controller),
    }
}

/// Print the modes and zones of a controller.
fn list<A: Adapter + ?Sized>(controller: &Controller<'_, A>) {
    println!("{} [{}]", controller.name(), controller.version());
    println!("{}\n", controller.description());

    println!("Modes:");
    for (i, mode) in controller.modes().iter().enumerate() {
        match mode.speed_range {
            Some(range) => println!(
                "  [{}] {} (0x{:02x}, speed 0x{:02x}..=0x{:02x}, default 0x{:02x})",
                i, mode.name, mode.value, range.min, range.max, range.default
            ),
            None => println!("  [{}] {} (0x{:02x})", i, mode.name, mode.value),
        }
    }

    println!("\nZones:");
    for (i, zone) in controller.zones().iter().enumerate() {
        let kind = match zone.kind {
            ZoneKind::Single => "single",
            ZoneKind::Linear => "linear",
            ZoneKind::Matrix => "matrix",
        };
        println!("  [{}] {} ({}, {} LEDs)", i, zone.name, kind, zone.leds_count);

        for led in zone.leds() {
            println!("      {:>2}: {}", led, controller.leds()[led].name);
        }
    }
}

/// Apply a mode configuration to every LED.
fn apply<A: Adapter + ?Sized>(
    controller: &mut Controller<'_, A>,
    config: &Config,
) -> Result<(), Box<dyn Error>> {
    let index = match controller.modes().position(&config.mode) {
        Some(index) => index,
        None => return Err(format!("unsupported mode: {}", config.mode).into()),
    };

    controller.set_active_mode(index)?;

    if let Some(color) = config.color {
        controller.set_all_colors(color)?;
    }

    if let Some(speed) = config.speed {
        controller.set_speed(speed)?;
    }

    controller.update_mode()?;

    Ok(())
}

/// Read the LED count of each header slot.
fn zone_counts(matches: &ArgMatches) -> Result<Vec<u8>, String> {
    let counts: Vec<u8> = match matches.get_many::<u8>("zones") {
        Some(counts) => counts.copied().collect(),
        None => Vec::new(),
    };

    if counts.len() > ZoneSlot::HEADERS.len() {
        return Err(format!(
            "{} zone counts given, but there are only {} headers",
            counts.len(),
            ZoneSlot::HEADERS.len()
        ));
    }

    Ok(counts)
}

/// Build the clap CLI definition.
fn cli() -> Command {
    Command::new(crate_name!())
        .version(crate_version!())
        .about(crate_description!())
        .subcommand(Command::new("list").about("List available modes and zones"))
        .subcommand(
            Command::new("apply")
                .about("Apply a mode to all LEDs")
                .arg(Arg::new("mode").help("Mode name").long("mode").short('m'))
                .arg(
                    Arg::new("speed")
                        .help("Effect speed [possible values: 0..=255]")
                        .long("speed")
                        .short('s')
                        .value_parser(value_parser!(u8)),
                )
                .arg(
                    Arg::new("color")
                        .help("LED color in RGB [0xRRGGBB]")
                        .long("color")
                        .short('c')
                        .value_parser(|s: &str| s.parse::<RgbColor>()),
                ),
        )
        .arg(
            Arg::new("variant")
                .help("Hardware revision")
                .long("variant")
                .short('v')
                .global(true)
                .ignore_case(true)
                .value_parser(EnumValueParser::<VariantArg>::new()),
        )
        .arg(
            Arg::new("zones")
                .help(
                    "LED count of each header, comma separated \
                     [Fan, LED, Audio, PCH, IO Cover; at most 5 values]",
                )
                .long("zones")
                .short('z')
                .global(true)
                .value_delimiter(',')
                .value_parser(value_parser!(u8)),
        )
}
