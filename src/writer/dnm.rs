//! DYNAMODEL container writing: header, SRF descriptor blocks, footer

use nalgebra::Vector3;
use std::fmt::Write as FmtWrite;

use crate::model::{Placement, SrfNode};

/// Literal written for the zero side of a node's placement
const ZERO_VECTOR: &str = "0.0000 0.0000 0.0000";

/// `DYNAMODEL` magic and version line
pub(super) fn header(version: u32) -> String {
    format!("DYNAMODEL\nDNMVER {}\n", version)
}

/// Render one `SRF` block, ending with its own `END` line
pub(super) fn srf_block(node: &SrfNode) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail
    let _ = writeln!(out, "SRF \"{:04}\"", node.uid);
    let _ = writeln!(out, "FIL {}", node.file_name);
    let _ = writeln!(out, "CLA {}", node.class);
    let _ = writeln!(out, "NST {}", node.nest);
    let [h, p, b] = node.rotation;
    let _ = writeln!(
        out,
        "POS {} {} {} {} {}",
        vector(&node.position, node.placement == Placement::Pivot),
        h,
        p,
        b,
        node.flag
    );
    let _ = writeln!(
        out,
        "CNT {}",
        vector(&node.center, node.placement == Placement::Offset)
    );
    let _ = writeln!(out, "REL {}", node.relation);
    let _ = writeln!(out, "NCH {}", node.children.len());
    for child in &node.children {
        let _ = writeln!(out, "CLD \"{:04}\"", child);
    }
    out.push_str("END\n");
    out
}

/// Computed vectors keep five decimals even when zero
fn vector(v: &Vector3<f64>, fixed_zero: bool) -> String {
    if fixed_zero && *v == Vector3::zeros() {
        ZERO_VECTOR.to_string()
    } else {
        format!("{:.5} {:.5} {:.5}", v.x, v.y, v.z)
    }
}
