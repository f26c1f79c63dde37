//! Streaming reader for DNM files
//!
//! This module provides an iterator-based API that decodes a DYNAMODEL file
//! one block at a time instead of building a whole [`DnmDocument`]. Each PCK
//! block is available as soon as its last line is read, which lets an importer
//! create meshes while the rest of the file is still being parsed.
//!
//! # Example
//!
//! ```
//! use surfdnm::streaming::{DnmReader, DnmRecord};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let text = "DYNAMODEL\nDNMVER 1\nPCK a.srf 2\nSURF\nE\n\nEND\n";
//! let mut reader = DnmReader::new(text.as_bytes());
//! assert_eq!(reader.version()?, 1);
//!
//! for record in &mut reader {
//!     match record? {
//!         DnmRecord::Surface(surface) => println!("PCK {}", surface.name),
//!         DnmRecord::Node(node) => println!("SRF {:04}", node.uid),
//!     }
//! }
//! assert!(reader.saw_footer());
//! # Ok(())
//! # }
//! ```
//!
//! [`DnmDocument`]: crate::model::DnmDocument

use std::io::BufRead;

use crate::error::Result;
use crate::model::{SrfNode, Surface};
use crate::parser::DnmBlockReader;

/// One top-level block of a DNM file
#[derive(Debug, Clone)]
pub enum DnmRecord {
    /// A decoded `PCK` geometry block
    Surface(Surface),
    /// A decoded `SRF` descriptor block
    Node(SrfNode),
}

/// Iterator over the blocks of a DNM file
///
/// The header is read on the first call to [`DnmReader::version`] or
/// [`Iterator::next`]. After an error the iterator is fused and yields `None`.
pub struct DnmReader<R: BufRead> {
    blocks: DnmBlockReader<R>,
    failed: bool,
}

impl<R: BufRead> DnmReader<R> {
    /// Wrap a buffered reader
    pub fn new(reader: R) -> Self {
        Self {
            blocks: DnmBlockReader::new(reader),
            failed: false,
        }
    }

    /// Wrap a buffered reader, yielding only [`DnmRecord::Surface`] records
    ///
    /// SRF blocks are skipped up to their `END` without checking their
    /// directives or the uids they reference.
    pub fn geometry_only(reader: R) -> Self {
        Self {
            blocks: DnmBlockReader::geometry_only(reader),
            failed: false,
        }
    }

    /// The `DNMVER` value, reading the header if needed
    pub fn version(&mut self) -> Result<u32> {
        self.blocks.read_header()
    }

    /// Whether the `END` footer has been read so far
    pub fn saw_footer(&self) -> bool {
        self.blocks.saw_footer()
    }
}

impl<R: BufRead> Iterator for DnmReader<R> {
    type Item = Result<DnmRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        match self.blocks.next_record() {
            Ok(record) => record.map(Ok),
            Err(e) => {
                self.failed = true;
                Some(Err(e))
            }
        }
    }
}
