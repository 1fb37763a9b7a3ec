// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use clap::{App, Arg, ArgMatches};
use failure::{format_err, Error, ResultExt};
use image::pnm::PNMEncoder;
use image::pnm::{PNMSubtype, SampleEncoding};
use image::ColorType;
use log::info;
use num::Complex;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::str::FromStr;

use mandelbrot::{generate_image_threaded, Grid, Region};

fn parse_pair<T>(s: &str, separator: char) -> Option<(T, T)>
where
    T: FromStr,
{
    match s.find(separator) {
        None => None,
        Some(index) => match (T::from_str(&s[..index]), T::from_str(&s[index + 1..])) {
            (Ok(l), Ok(r)) => Some((l, r)),
            _ => None,
        },
    }
}

fn parse_complex(s: &str) -> Option<Complex<f64>> {
    match parse_pair(s, ',') {
        Some((re, im)) => Some(Complex { re, im }),
        None => None,
    }
}

fn validate_pair<T: FromStr>(s: &str, separator: char, err: &str) -> Result<(), String> {
    match parse_pair::<T>(s, separator) {
        Some(_) => Ok(()),
        None => Err(err.to_string()),
    }
}

fn validate_range<T: FromStr + Ord>(
    s: &str,
    low: T,
    high: T,
    isnotanumber_err: &str,
    isnotinrange_err: &str,
) -> Result<(), String> {
    match T::from_str(s) {
        Ok(i) => {
            if i >= low && i <= high {
                Ok(())
            } else {
                Err(isnotinrange_err.to_string())
            }
        }
        Err(_) => Err(isnotanumber_err.to_string()),
    }
}

const OUTPUT: &str = "output";
const SIZE: &str = "size";
const LEFTLOWER: &str = "leftlower";
const RIGHTUPPER: &str = "rightupper";
const CHANNELS: &str = "channels";
const THREADS: &str = "threads";
const FORMAT: &str = "format";

fn args<'a>() -> ArgMatches<'a> {
    let max_threads = num_cpus::get();

    App::new("mandelbrot")
        .version("0.1.0")
        .about("Escape-time Mandelbrot image generator")
        .arg(
            Arg::with_name(OUTPUT)
                .required(true)
                .long(OUTPUT)
                .short("o")
                .takes_value(true)
                .help("Output file"),
        )
        .arg(
            Arg::with_name(SIZE)
                .required(false)
                .long(SIZE)
                .short("s")
                .takes_value(true)
                .default_value("800x600")
                .validator(|s| validate_pair::<u16>(&s, 'x', "Could not parse output image size"))
                .help("Size of output image, in pixels"),
        )
        .arg(
            Arg::with_name(LEFTLOWER)
                .required(false)
                .long(LEFTLOWER)
                .short("l")
                .takes_value(true)
                .allow_hyphen_values(true)
                .default_value("-2.0,-1.5")
                .validator(|s| validate_pair::<f64>(&s, ',', "Could not parse left lower corner"))
                .help("Left lower corner (xmin,ymin) of the region"),
        )
        .arg(
            Arg::with_name(RIGHTUPPER)
                .required(false)
                .long(RIGHTUPPER)
                .short("r")
                .takes_value(true)
                .allow_hyphen_values(true)
                .default_value("1.0,1.5")
                .validator(|s| validate_pair::<f64>(&s, ',', "Could not parse right upper corner"))
                .help("Right upper corner (xmax,ymax) of the region"),
        )
        .arg(
            Arg::with_name(CHANNELS)
                .required(false)
                .long(CHANNELS)
                .short("c")
                .takes_value(true)
                .possible_values(&["1", "3"])
                .default_value("3")
                .help("Bytes per pixel: 1 for grayscale, 3 for color"),
        )
        .arg(
            Arg::with_name(THREADS)
                .required(false)
                .long(THREADS)
                .short("t")
                .takes_value(true)
                .default_value("1")
                .validator(move |s| {
                    validate_range(
                        &s,
                        1,
                        max_threads,
                        "Could not parse thread count",
                        &format!("Thread count must be between 1 and {}", max_threads),
                    )
                })
                .help("Number of threads to use in the renderer"),
        )
        .arg(
            Arg::with_name(FORMAT)
                .required(false)
                .long(FORMAT)
                .short("f")
                .takes_value(true)
                .possible_values(&["pnm", "raw"])
                .default_value("pnm")
                .help("pnm writes a PGM or PPM; raw writes the bare pixel bytes"),
        )
        .get_matches()
}

fn write_pnm(outfile: &str, pixels: &[u8], grid: Grid) -> Result<(), Error> {
    let output = File::create(outfile).with_context(|_| format!("creating {}", outfile))?;
    let (subtype, color) = match grid.nz {
        1 => (PNMSubtype::Graymap(SampleEncoding::Binary), ColorType::Gray(8)),
        _ => (PNMSubtype::Pixmap(SampleEncoding::Binary), ColorType::RGB(8)),
    };
    let mut encoder = PNMEncoder::new(BufWriter::new(output)).with_subtype(subtype);
    encoder
        .encode(pixels, grid.nx as u32, grid.ny as u32, color)
        .with_context(|_| format!("writing {}", outfile))?;
    Ok(())
}

fn write_raw(outfile: &str, pixels: &[u8]) -> Result<(), Error> {
    let mut output =
        BufWriter::new(File::create(outfile).with_context(|_| format!("creating {}", outfile))?);
    output
        .write_all(pixels)
        .and_then(|_| output.flush())
        .with_context(|_| format!("writing {}", outfile))?;
    Ok(())
}

fn value<'a>(matches: &'a ArgMatches, name: &str) -> Result<&'a str, Error> {
    matches
        .value_of(name)
        .ok_or_else(|| format_err!("missing --{}", name))
}

fn run(matches: &ArgMatches) -> Result<(), Error> {
    let size: (usize, usize) = parse_pair(value(matches, SIZE)?, 'x')
        .ok_or_else(|| format_err!("Error parsing image dimensions"))?;
    let leftlower = parse_complex(value(matches, LEFTLOWER)?)
        .ok_or_else(|| format_err!("Error parsing left lower point"))?;
    let rightupper = parse_complex(value(matches, RIGHTUPPER)?)
        .ok_or_else(|| format_err!("Error parsing right upper point"))?;
    let channels = usize::from_str(value(matches, CHANNELS)?)?;
    let threads = usize::from_str(value(matches, THREADS)?)?;
    let outfile = value(matches, OUTPUT)?;

    let region = Region::from_corners(leftlower, rightupper);
    let grid = Grid::new(size.0, size.1, channels);
    let pixels = generate_image_threaded(region, grid, threads)?;
    info!("rendered {} bytes, writing {}", pixels.len(), outfile);

    match value(matches, FORMAT)? {
        "raw" => write_raw(outfile, &pixels),
        _ => write_pnm(outfile, &pixels, grid),
    }
}

fn main() {
    env_logger::init();
    let matches = args();
    if let Err(e) = run(&matches) {
        eprintln!("Render failure: {}", e);
        for cause in e.iter_causes() {
            eprintln!("  caused by: {}", cause);
        }
        std::process::exit(1);
    }
}
