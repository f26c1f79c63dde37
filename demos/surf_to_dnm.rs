//! Wrap one or more SURF files into a DNM container
//!
//! Usage: cargo run --example surf_to_dnm -- <out.dnm> <a.srf> [b.srf ...]
//!
//! The first SURF file becomes the root node; every other file becomes a
//! child of it.

use std::env;
use std::fs::File;
use std::path::Path;
use surfdnm::parser::parse_surf_reader;
use surfdnm::{DnmDocument, SrfNode};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 3 {
        eprintln!("Usage: {} <out.dnm> <a.srf> [b.srf ...]", args[0]);
        std::process::exit(1);
    }

    let mut document = DnmDocument::new();
    for (uid, path) in args[2..].iter().enumerate() {
        let name = Path::new(path)
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or(path)
            .to_string();
        let surface = parse_surf_reader(File::open(path)?, &name)?;
        println!(
            "Read {}: {} vertices, {} faces",
            name,
            surface.geometry.vertices.len(),
            surface.geometry.faces.len()
        );

        let uid = uid as u32;
        document.nodes.push(SrfNode::new(uid, name));
        document.surfaces.push(surface);
        if uid > 0 {
            document.nodes[0].children.push(uid);
        }
    }

    document.write_to_file(&args[1])?;
    println!(
        "Wrote {} with {} surface(s)",
        args[1],
        document.surfaces.len()
    );
    Ok(())
}
