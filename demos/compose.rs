//! Render a single image from command-line arguments.
//!
//! Run with: cargo run --example compose -- "Your text" [--bg #223344] [--fg #ffffff]
//!     [--font "Times New Roman"] [--image photo.jpg] [--offset 0,-120] [--png] [--out image.jpeg]

use std::path::PathBuf;

use backdrop::prelude::*;

fn main() -> backdrop::Result<()> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let mut request = RenderRequest::default();
    let mut format = ExportFormat::default();
    let mut out: Option<PathBuf> = None;
    let mut upload: Option<ImageSource> = None;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--bg" => request.style.background_color = Color::parse(&value(&mut args, &arg))?,
            "--fg" => request.style.text_color = Color::parse(&value(&mut args, &arg))?,
            "--font" => request.style.font_family = FontFamily::from(value(&mut args, &arg)),
            "--image" => upload = Some(ImageSource::from(PathBuf::from(value(&mut args, &arg)))),
            "--offset" => request.offset = parse_offset(&value(&mut args, &arg)),
            "--png" => format = ExportFormat::Png,
            "--out" => out = Some(PathBuf::from(value(&mut args, &arg))),
            text => request.text = text.to_string(),
        }
    }

    if let Some(source) = upload {
        // Never render with a half-decoded image
        request.background_image = Some(BackgroundLoader::spawn(source).wait()?);
    }

    let lines = backdrop::wrap_text(&request.text, &request.style);
    println!("{} line(s):", lines.len());
    for line in &lines {
        println!("  {line:?}");
    }

    let surface = backdrop::render(&request);
    let out = out.unwrap_or_else(|| PathBuf::from(format.file_name()));
    backdrop::export::save(&surface, &out, format)?;
    println!("wrote {}", out.display());
    Ok(())
}

fn value(args: &mut impl Iterator<Item = String>, flag: &str) -> String {
    args.next().unwrap_or_else(|| {
        eprintln!("{flag} needs a value");
        std::process::exit(2);
    })
}

fn parse_offset(s: &str) -> Offset {
    let mut parts = s.split(',').map(|p| p.trim().parse::<f64>().unwrap_or(0.0));
    Offset::new(parts.next().unwrap_or(0.0), parts.next().unwrap_or(0.0))
}
