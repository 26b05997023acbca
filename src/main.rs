use iconify::{options, pipeline};
use std::env;
use std::process;

//===========================================================================//

const HELP: &str = "\
Builds a Windows ICO file with 16, 32, 48 and 256 pixel images.

Usage: iconify [OPTIONS] [IMAGE]

Arguments:
  [IMAGE]                Default source image (same as -d IMAGE)

Options:
  -d, --default <PATH>   Default source image, used for every size
                         without an override
  -o, --output <PATH>    ICO file to write [default: IMAGE with an .ico
                         extension]
  -N[,M...] <PATH>       Source image for the listed sizes (one of 16, 32,
                         48, 256), e.g. -16,32 small.png
  -h, --help             Print help
  -V, --version          Print version

Source images may be JPEG, PNG, BMP, GIF or TARGA files.  Each one is
centered on a transparent square canvas and scaled to the icon size.";

//===========================================================================//

fn main() {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("warn"),
    )
    .format_timestamp(None)
    .init();

    let tokens: Vec<String> = env::args().skip(1).collect();
    match tokens.as_slice() {
        [] => {
            println!("{}", HELP);
            process::exit(-1);
        }
        [flag] if flag == "-h" || flag == "--help" => {
            println!("{}", HELP);
            return;
        }
        [flag] if flag == "-V" || flag == "--version" => {
            println!("iconify {}", env!("CARGO_PKG_VERSION"));
            return;
        }
        _ => {}
    }

    let result = options::resolve(&tokens)
        .and_then(|config| pipeline::run(&config));
    match result {
        Ok(path) => println!("Wrote {}", path.display()),
        Err(error) => {
            println!("{}", error);
            process::exit(-1);
        }
    }
}

//===========================================================================//
