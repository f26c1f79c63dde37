//! Print a summary of a DNM file
//!
//! Usage: cargo run --example dnm_info -- <file.dnm>
//!
//! Blocks are read with the streaming reader, so every PCK block is reported
//! as soon as it is decoded. Set RUST_LOG=debug to see the decoder's log.

use std::env;
use std::fs::File;
use std::io::BufReader;
use surfdnm::streaming::{DnmReader, DnmRecord};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        eprintln!("Usage: {} <file.dnm>", args[0]);
        std::process::exit(1);
    }

    let file = File::open(&args[1])?;
    let mut reader = DnmReader::new(BufReader::new(file));
    println!("DNM version {}", reader.version()?);
    println!();

    let mut surfaces = 0;
    let mut nodes = 0;
    for record in &mut reader {
        match record? {
            DnmRecord::Surface(surface) => {
                surfaces += 1;
                println!(
                    "PCK {:<24} {:>6} vertices {:>6} faces {:>3} materials {:>4} transparent",
                    surface.name,
                    surface.geometry.vertices.len(),
                    surface.geometry.faces.len(),
                    surface.materials.len(),
                    surface.transparency.len()
                );
            }
            DnmRecord::Node(node) => {
                nodes += 1;
                let children: Vec<String> =
                    node.children.iter().map(|c| format!("{:04}", c)).collect();
                println!(
                    "SRF {:04} -> {} rotation {:?} children [{}]",
                    node.uid,
                    node.file_name,
                    node.rotation,
                    children.join(", ")
                );
            }
        }
    }

    println!();
    println!(
        "{} PCK block(s), {} SRF block(s), footer: {}",
        surfaces,
        nodes,
        if reader.saw_footer() { "yes" } else { "no" }
    );
    Ok(())
}
