//! SURF block writing
//!
//! Renders one [`Surface`] as the SURF body and wraps it in a `PCK` header
//! according to the requested [`PckShape`].

use std::fmt::Write as FmtWrite;

use crate::model::{Face, PckShape, Surface, TransparencyEntry, Vertex};

/// Transparency pairs per `ZA` line
pub(super) const ZA_PAIRS_PER_LINE: usize = 8;

/// Render the SURF body: header, vertices, faces, closing `E`, `ZA` table
///
/// The surface must already be validated.
pub(super) fn surface_body(surface: &Surface) -> String {
    let mut out = String::new();
    out.push_str("SURF\n");

    for vertex in &surface.geometry.vertices {
        write_vertex(&mut out, vertex);
    }

    for face in &surface.geometry.faces {
        write_face(&mut out, surface, face);
    }

    out.push_str("E\n");
    write_transparency(&mut out, &surface.transparency);
    out
}

/// Wrap a body in the `PCK` header for the given shape
///
/// The count in the header is the number of body lines; a blank line follows
/// the body. [`PckShape::Part`] returns the body unchanged.
pub(super) fn wrap_pck(surface: &Surface, body: String, shape: PckShape) -> String {
    let count = body.lines().count();
    match shape {
        PckShape::Part => body,
        PckShape::Embedded => format!("PCK {} {}\n{}\n", surface.name, count, body),
        PckShape::Ground => format!("PCK {}.srf {}\n{}\n", surface.base_name(), count, body),
    }
}

fn write_vertex(out: &mut String, vertex: &Vertex) {
    let p = vertex.position;
    // Writing into a String cannot fail
    let _ = write!(out, "V {:.5} {:.5} {:.5}", p.x, p.y, p.z);
    if vertex.is_smooth {
        out.push_str(" R");
    }
    out.push('\n');
}

fn write_face(out: &mut String, surface: &Surface, face: &Face) {
    out.push_str("F\n");

    if let Some(material) = face.material.and_then(|i| surface.materials.get(i)) {
        let [r, g, b] = material.wire_rgb();
        let _ = writeln!(out, "C {} {} {}", r, g, b);
        if material.bright {
            out.push_str("B\n");
        }
    }

    let m = face.median;
    let n = face.normal;
    let _ = writeln!(
        out,
        "N {:.5} {:.5} {:.5} {:.5} {:.5} {:.5}",
        m.x, m.y, m.z, n.x, n.y, n.z
    );

    out.push('V');
    for index in &face.vertices {
        let _ = write!(out, " {}", index);
    }
    out.push('\n');
    out.push_str("E\n");
}

fn write_transparency(out: &mut String, entries: &[TransparencyEntry]) {
    for chunk in entries.chunks(ZA_PAIRS_PER_LINE) {
        out.push_str("ZA");
        for entry in chunk {
            let _ = write!(out, " {} {}", entry.face, entry.level);
        }
        out.push('\n');
    }
}
