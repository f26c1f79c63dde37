//! DYNAMODEL container parsing
//!
//! A DNM file is a `DYNAMODEL` / `DNMVER n` header followed by any mix of:
//! - `PCK <name> <count>` blocks whose next `count` lines are a SURF body
//! - `SRF "<uid>"` descriptor blocks terminated by their own `END`
//! - a final `END` footer
//!
//! [`DnmBlockReader`] yields one block at a time so callers can act on a
//! surface as soon as it is decoded. In geometry-only mode SRF blocks are
//! skipped up to their `END` without being checked.

use log::{debug, trace};
use nalgebra::Vector3;
use std::io::BufRead;

use super::{Line, LineReader, SurfParser, unquote};
use crate::error::{Error, Result};
use crate::model::{Placement, SrfNode, Surface};
use crate::streaming::DnmRecord;

/// Block-level reader over DNM text
pub(crate) struct DnmBlockReader<R> {
    lines: LineReader<R>,
    version: Option<u32>,
    footer: bool,
    skip_nodes: bool,
}

impl<R: BufRead> DnmBlockReader<R> {
    pub(crate) fn new(inner: R) -> Self {
        Self {
            lines: LineReader::new(inner),
            version: None,
            footer: false,
            skip_nodes: false,
        }
    }

    /// Reader that yields PCK blocks only
    pub(crate) fn geometry_only(inner: R) -> Self {
        Self {
            skip_nodes: true,
            ..Self::new(inner)
        }
    }

    /// Read the `DYNAMODEL` and `DNMVER` lines, returning the version
    ///
    /// Calling it again returns the version already read.
    pub(crate) fn read_header(&mut self) -> Result<u32> {
        if let Some(version) = self.version {
            return Ok(version);
        }

        let (number, raw) = self.next_non_blank("missing DYNAMODEL header")?;
        let line = Line::new(number, &raw);
        if line.keyword() != "DYNAMODEL" {
            return Err(line.error("expected DYNAMODEL header"));
        }
        line.expect_args(0)?;

        let (number, raw) = self.next_non_blank("missing DNMVER line")?;
        let line = Line::new(number, &raw);
        if line.keyword() != "DNMVER" {
            return Err(line.error("expected DNMVER after DYNAMODEL"));
        }
        line.expect_args(1)?;
        let version = line.arg(0, "DNM version")?;

        debug!("DNM header: version {}", version);
        self.version = Some(version);
        Ok(version)
    }

    /// Whether the `END` footer has been read
    pub(crate) fn saw_footer(&self) -> bool {
        self.footer
    }

    /// Next PCK or SRF block, `None` at end of input
    pub(crate) fn next_record(&mut self) -> Result<Option<DnmRecord>> {
        self.read_header()?;

        while let Some((number, raw)) = self.lines.next_line()? {
            let line = Line::new(number, &raw);
            if line.is_blank() {
                continue;
            }
            if self.footer {
                return Err(line.error("content after the END footer"));
            }

            match line.keyword() {
                "PCK" => return self.read_pck(&line).map(|s| Some(DnmRecord::Surface(s))),
                "SRF" if self.skip_nodes => self.skip_srf(&line)?,
                "SRF" => return self.read_srf(&line).map(|n| Some(DnmRecord::Node(n))),
                "END" => {
                    line.expect_args(0)?;
                    trace!("line {}: END footer", number);
                    self.footer = true;
                }
                "DYNAMODEL" | "DNMVER" => return Err(line.error("duplicate DNM header")),
                other => {
                    return Err(line.error(format!("unknown top-level directive '{}'", other)));
                }
            }
        }
        Ok(None)
    }

    fn next_non_blank(&mut self, missing: &str) -> Result<(usize, String)> {
        while let Some((number, raw)) = self.lines.next_line()? {
            if !raw.trim().is_empty() {
                return Ok((number, raw));
            }
        }
        Err(Error::format(self.lines.line_number(), "", missing))
    }

    fn read_pck(&mut self, header: &Line<'_>) -> Result<Surface> {
        let args = header.args();
        if args.len() < 2 {
            return Err(header.error("PCK expects a name and a line count"));
        }
        let count: usize = header.arg(args.len() - 1, "PCK line count")?;
        let name = unquote(&args[..args.len() - 1].join(" ")).to_string();
        trace!("line {}: PCK '{}' with {} lines", header.number(), name, count);

        let mut parser = SurfParser::new(name.clone());
        for read in 0..count {
            let (number, raw) = self.lines.next_line()?.ok_or_else(|| {
                Error::format(
                    self.lines.line_number(),
                    "",
                    format!(
                        "PCK '{}' declares {} lines but the input ends after {}",
                        name, count, read
                    ),
                )
            })?;
            parser.feed(&Line::new(number, &raw))?;
        }
        parser.finish(self.lines.line_number())
    }

    /// Consume an SRF block through its `END` line, whatever it contains
    fn skip_srf(&mut self, header: &Line<'_>) -> Result<()> {
        let mut skipped = 0;
        while let Some((number, raw)) = self.lines.next_line()? {
            if Line::new(number, &raw).keyword() == "END" {
                break;
            }
            skipped += 1;
        }
        debug!(
            "line {}: skipped SRF block ({} lines)",
            header.number(),
            skipped
        );
        Ok(())
    }

    fn read_srf(&mut self, header: &Line<'_>) -> Result<SrfNode> {
        let mut builder = SrfBuilder::start(header)?;
        while let Some((number, raw)) = self.lines.next_line()? {
            if builder.feed(&Line::new(number, &raw))? {
                return Ok(builder.finish());
            }
        }
        Err(Error::format(
            self.lines.line_number(),
            "",
            format!("SRF \"{:04}\" is not closed by END", builder.node.uid),
        ))
    }
}

/// Parse a single `SRF ... END` block
///
/// ```
/// use surfdnm::parser::parse_srf_block;
///
/// let node = parse_srf_block(
///     "SRF \"0002\"\nFIL wing.srf\nCLA 0\nNST 0\nPOS 0 0 0 100 0 0 1\n\
///      CNT 1 2 3\nREL DEP\nNCH 1\nCLD \"0003\"\nEND\n",
/// )
/// .unwrap();
/// assert_eq!(node.uid, 2);
/// assert_eq!(node.rotation, [100, 0, 0]);
/// assert_eq!(node.children, vec![3]);
/// ```
pub fn parse_srf_block(text: &str) -> Result<SrfNode> {
    let mut builder: Option<SrfBuilder> = None;
    let mut finished: Option<SrfNode> = None;
    let mut last = 0;

    for (i, raw) in text.lines().enumerate() {
        let line = Line::new(i + 1, raw);
        last = i + 1;
        if line.is_blank() {
            continue;
        }
        if finished.is_some() {
            return Err(line.error("content after the SRF block's END"));
        }
        let closed = match builder.as_mut() {
            None => {
                if line.keyword() != "SRF" {
                    return Err(line.error("expected SRF"));
                }
                builder = Some(SrfBuilder::start(&line)?);
                false
            }
            Some(b) => b.feed(&line)?,
        };
        if closed {
            finished = builder.take().map(SrfBuilder::finish);
        }
    }

    finished.ok_or_else(|| Error::format(last, "", "SRF block is not closed by END"))
}

/// Accumulates the directives of one SRF block
struct SrfBuilder {
    node: SrfNode,
    has_file: bool,
    declared_children: Option<usize>,
    fixed_position: bool,
    fixed_center: bool,
}

/// Whether the first three arguments are the fixed zero literal
fn is_fixed_zero(args: &[&str]) -> bool {
    args.len() >= 3 && args[..3].iter().all(|a| *a == "0.0000")
}

impl SrfBuilder {
    fn start(header: &Line<'_>) -> Result<Self> {
        let text = header.rest_unquoted();
        let uid: u32 = text
            .parse()
            .map_err(|_| header.error(format!("invalid SRF uid '{}'", text)))?;
        trace!("line {}: SRF {:04}", header.number(), uid);
        Ok(Self {
            node: SrfNode::new(uid, ""),
            has_file: false,
            declared_children: None,
            fixed_position: false,
            fixed_center: false,
        })
    }

    /// Returns `true` once `END` closes the block
    fn feed(&mut self, line: &Line<'_>) -> Result<bool> {
        if line.is_blank() {
            return Ok(false);
        }
        let node = &mut self.node;
        match line.keyword() {
            "FIL" => {
                if line.args().is_empty() {
                    return Err(line.error("FIL expects a file name"));
                }
                node.file_name = line.rest_unquoted();
                self.has_file = true;
            }
            "CLA" => {
                line.expect_args(1)?;
                node.class = line.arg(0, "class")?;
            }
            "NST" => {
                line.expect_args(1)?;
                node.nest = line.arg(0, "nest")?;
            }
            "POS" => {
                let args = line.args();
                if args.len() != 6 && args.len() != 7 {
                    return Err(line.error(format!(
                        "POS expects x y z h p b [flag], found {} argument(s)",
                        args.len()
                    )));
                }
                node.position = Vector3::new(
                    line.arg(0, "position x")?,
                    line.arg(1, "position y")?,
                    line.arg(2, "position z")?,
                );
                node.rotation = [
                    line.arg(3, "heading")?,
                    line.arg(4, "pitch")?,
                    line.arg(5, "bank")?,
                ];
                if args.len() == 7 {
                    node.flag = line.arg(6, "POS flag")?;
                }
                self.fixed_position = is_fixed_zero(args);
            }
            "CNT" => {
                line.expect_args(3)?;
                node.center = Vector3::new(
                    line.arg(0, "center x")?,
                    line.arg(1, "center y")?,
                    line.arg(2, "center z")?,
                );
                self.fixed_center = is_fixed_zero(line.args());
            }
            "REL" => {
                line.expect_args(1)?;
                node.relation = line.args()[0].to_string();
            }
            "NCH" => {
                line.expect_args(1)?;
                self.declared_children = Some(line.arg(0, "child count")?);
            }
            "CLD" => {
                let text = line.rest_unquoted();
                let uid = text
                    .parse()
                    .map_err(|_| line.error(format!("invalid child uid '{}'", text)))?;
                node.children.push(uid);
            }
            "END" => {
                line.expect_args(0)?;
                if !self.has_file {
                    return Err(line.error(format!(
                        "SRF \"{:04}\" has no FIL line",
                        node.uid
                    )));
                }
                if let Some(declared) = self.declared_children {
                    if declared != node.children.len() {
                        return Err(line.error(format!(
                            "SRF \"{:04}\" declares NCH {} but lists {} CLD line(s)",
                            node.uid,
                            declared,
                            node.children.len()
                        )));
                    }
                }
                return Ok(true);
            }
            other => return Err(line.error(format!("unknown SRF directive '{}'", other))),
        }
        Ok(false)
    }

    fn finish(mut self) -> SrfNode {
        if self.fixed_center && !self.fixed_position {
            self.node.placement = Placement::Offset;
        }
        self.node
    }
}
