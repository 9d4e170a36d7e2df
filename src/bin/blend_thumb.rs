use blendthumb::{
    open_byte_source, read_preview_after_header, ByteSource, ContainerHeader, DecodeOptions,
};
use std::env;
use std::path::{Path, PathBuf};

fn main() {
    println!("Blend Preview Extractor");
    println!("=======================");

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        println!("Usage: blend_thumb <file.blend> [output.png] [--skip-legacy]");
        println!("Example: blend_thumb scene.blend scene.png");
        return;
    }
    let file_path = Path::new(&args[1]);
    let skip_legacy = args.iter().any(|a| a == "--skip-legacy");
    let output = args
        .get(2)
        .filter(|a| !a.starts_with("--"))
        .map(PathBuf::from)
        .unwrap_or_else(|| file_path.with_extension("png"));

    let options = DecodeOptions {
        skip_legacy_versions: skip_legacy,
        ..Default::default()
    };

    match extract(file_path, &output, &options) {
        Ok(_) => println!("\nPreview written to {}", output.display()),
        Err(e) => {
            println!("\nNo preview: {}", e);
            std::process::exit(1);
        }
    }
}

/// Single pass over the file: header facts first, then the preview.
fn extract(
    path: &Path,
    output: &Path,
    options: &DecodeOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut source = open_byte_source(path)?;
    let header = ContainerHeader::read(&mut source)?;
    print_header(path, source.is_compressed(), &header);

    let image = read_preview_after_header(&mut source, &header, options)?;
    println!("Preview: {}x{} RGBA", image.width, image.height);
    std::fs::write(output, image.to_png_bytes()?)?;
    Ok(())
}

fn print_header(path: &Path, compressed: bool, header: &ContainerHeader) {
    println!("File: {}", path.display());
    println!("Compressed: {}", compressed);
    println!("Pointer size: {} bytes", header.pointer_width.bytes());
    println!("Byte order: {:?}", header.byte_order);
    match header.version {
        Some(v) => println!("Version: {}", v),
        None => println!("Version: unknown"),
    }
}
