use std::path::{Path, PathBuf};

use clap::Parser;
use image::ImageFormat;
use tracing_subscriber::EnvFilter;

use wldview::{
    decode_world, encode_image, rasterize, BoundsMode, DecodeOptions, DecodeSections, Error,
};

#[derive(Parser)]
#[command(name = "wldview", about = "Decode a Terraria world save and render a map image")]
struct Args {
    /// World save to decode (.wld)
    world: PathBuf,

    /// Output image path; format from the extension (.png or .bmp)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Which sections to decode
    #[arg(long, value_delimiter = ',', default_values = ["header", "tiles"])]
    sections: Vec<String>,

    /// Print the decoded header as JSON
    #[arg(long)]
    header_json: bool,

    /// Substitute zeros for reads past the end of the file instead of
    /// failing (diagnostic use only)
    #[arg(long)]
    lenient: bool,

    /// Suppress the progress indicator
    #[arg(short, long)]
    quiet: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(Args::parse()) {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

fn run(args: Args) -> wldview::Result<()> {
    let sections = parse_sections(&args.sections)?;
    let data = std::fs::read(&args.world)?;

    let progress = if args.quiet {
        None
    } else {
        Some(Box::new(|percent: u8| {
            eprint!("\rdecoding {percent:>3}%");
            if percent >= 100 {
                eprintln!();
            }
        }) as Box<dyn FnMut(u8)>)
    };

    let options = DecodeOptions {
        sections,
        progress,
        bounds: if args.lenient { BoundsMode::Lenient } else { BoundsMode::Strict },
    };
    let world = decode_world(&data, options)?;
    if !args.quiet {
        eprintln!(
            "version {} | {}x{} tiles",
            world.preamble.version, world.preamble.width, world.preamble.height
        );
    }

    if args.header_json {
        let header = world
            .header
            .as_ref()
            .ok_or_else(|| Error::InvalidData("--header-json needs the header section".into()))?;
        let json = serde_json::to_string_pretty(header)
            .map_err(|e| Error::InvalidData(e.to_string()))?;
        println!("{json}");
    }

    let (Some(header), Some(grid)) = (&world.header, &world.grid) else {
        return Ok(());
    };
    let output = args
        .output
        .clone()
        .unwrap_or_else(|| args.world.with_extension("png"));
    let image = rasterize(header, grid)?;
    let bytes = encode_image(&image, format_for(&output))?;
    std::fs::write(&output, bytes)?;
    if !args.quiet {
        eprintln!("wrote {}", output.display());
    }
    Ok(())
}

fn parse_sections(names: &[String]) -> wldview::Result<DecodeSections> {
    let mut sections = DecodeSections { header: false, tiles: false };
    for name in names {
        match name.as_str() {
            "header" => sections.header = true,
            "tiles" => sections.tiles = true,
            other => {
                return Err(Error::InvalidData(format!(
                    "unknown section {other:?} (expected \"header\" or \"tiles\")"
                )))
            }
        }
    }
    Ok(sections)
}

fn format_for(path: &Path) -> ImageFormat {
    match path.extension().and_then(|e| e.to_str()) {
        Some("bmp") => ImageFormat::Bmp,
        _ => ImageFormat::Png,
    }
}
