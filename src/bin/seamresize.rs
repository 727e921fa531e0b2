use seamresize::Carver;
use std::process;

extern crate clap;
extern crate image;

use clap::{crate_authors, crate_version, App, Arg, ArgMatches};
use failure::{format_err, Error, ResultExt};
use flexi_logger::{Logger, LoggerHandle};
use log::{info, warn};

fn cli<'a, 'b>() -> App<'a, 'b> {
    App::new("seamresize")
        .version(crate_version!())
        .author(crate_authors!())
        .about("Content-aware image resizing by seam carving")
        .arg(
            Arg::with_name("input")
                .help("The image to resize")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::with_name("output")
                .help("Where to write the result; the format follows the extension")
                .required(true)
                .index(2),
        )
        .arg(
            Arg::with_name("width")
                .help("Target width in pixels [default: unchanged]")
                .short("w")
                .long("width")
                .value_name("PIXELS")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("height")
                .help("Target height in pixels [default: unchanged]")
                .short("H")
                .long("height")
                .value_name("PIXELS")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("energy")
                .help("Also write the energy map of the last seam step")
                .long("energy")
                .value_name("FILE")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("seams")
                .help("Also write the last seam step's path over its image")
                .long("seams")
                .value_name("FILE")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("verbose")
                .help("More logging; repeat for more still. RUST_LOG overrides")
                .short("v")
                .multiple(true),
        )
}

fn init_logging(verbosity: u64) -> Result<LoggerHandle, Error> {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    Logger::try_with_env_or_str(level)
        .and_then(|logger| logger.start())
        .map_err(|e| format_err!("cannot start logging: {}", e))
}

fn dimension(matches: &ArgMatches, name: &str, current: u32) -> Result<u32, Error> {
    match matches.value_of(name) {
        None => Ok(current),
        Some(value) => value
            .parse()
            .map_err(|_| format_err!("--{} expects a number of pixels, got {:?}", name, value)),
    }
}

fn path<'a>(matches: &'a ArgMatches, name: &str) -> Result<&'a str, Error> {
    matches
        .value_of(name)
        .ok_or_else(|| format_err!("missing {}", name))
}

fn run() -> Result<(), Error> {
    let matches = cli().get_matches();
    let _logger = init_logging(matches.occurrences_of("verbose"))?;

    let input = path(&matches, "input")?;
    let output = path(&matches, "output")?;
    let image = image::open(input)
        .with_context(|_| format!("cannot read {}", input))?
        .to_rgb();

    let (width, height) = image.dimensions();
    let target = (
        dimension(&matches, "width", width)?,
        dimension(&matches, "height", height)?,
    );
    info!("{}: {}x{}", input, width, height);

    let mut carver = Carver::new(image)?;
    let last = carver.resize(target.0, target.1)?;

    match last {
        Some(step) => {
            if let Some(file) = matches.value_of("energy") {
                step.energy
                    .save(file)
                    .with_context(|_| format!("cannot write {}", file))?;
            }
            if let Some(file) = matches.value_of("seams") {
                step.overlay
                    .save(file)
                    .with_context(|_| format!("cannot write {}", file))?;
            }
        }
        None => {
            if matches.is_present("energy") || matches.is_present("seams") {
                warn!("image is already {}x{}; no seams to show", width, height);
            }
        }
    }

    carver
        .into_image()
        .save(output)
        .with_context(|_| format!("cannot write {}", output))?;
    info!("{}: {}x{}", output, target.0, target.1);
    Ok(())
}

fn main() {
    if let Err(err) = run() {
        eprintln!("seamresize: {}", err);
        for cause in err.iter_causes() {
            eprintln!("  caused by: {}", cause);
        }
        process::exit(1);
    }
}
