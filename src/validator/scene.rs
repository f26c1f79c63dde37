//! Scene-graph validation for the SRF blocks of a DNM document

use crate::error::{Error, Result};
use crate::model::SrfNode;
use std::collections::HashSet;

/// Validates that node uids are unique
pub fn validate_node_uids(nodes: &[SrfNode]) -> Result<()> {
    let mut seen = HashSet::new();
    for node in nodes {
        if !seen.insert(node.uid) {
            return Err(Error::InvalidSurface(format!(
                "SRF \"{:04}\" is declared more than once. \
                 Every node of a document needs its own uid.",
                node.uid
            )));
        }
    }
    Ok(())
}

/// Validates that every `CLD` entry names a declared node other than itself
pub fn validate_child_references(nodes: &[SrfNode]) -> Result<()> {
    let declared: HashSet<u32> = nodes.iter().map(|n| n.uid).collect();

    for node in nodes {
        for &child in &node.children {
            if child == node.uid {
                return Err(Error::Reference(format!(
                    "SRF \"{:04}\" lists itself as a child.",
                    node.uid
                )));
            }
            if !declared.contains(&child) {
                let mut known: Vec<u32> = declared.iter().copied().collect();
                known.sort_unstable();
                return Err(Error::Reference(format!(
                    "SRF \"{:04}\" references child \"{:04}\" which is not declared \
                     (declared uids: {:?}).",
                    node.uid, child, known
                )));
            }
        }
    }
    Ok(())
}

/// Validates that no node is the child of two different parents
pub fn validate_single_parent(nodes: &[SrfNode]) -> Result<()> {
    let mut parented = HashSet::new();
    for node in nodes {
        for &child in &node.children {
            if !parented.insert(child) {
                return Err(Error::InvalidSurface(format!(
                    "SRF \"{:04}\" appears under more than one parent.",
                    child
                )));
            }
        }
    }
    Ok(())
}
