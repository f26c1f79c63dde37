//! SURF block parsing
//!
//! The grammar is driven by a small state machine:
//!
//! - `Header`: an optional `SURF` line
//! - `ReadingVertices`: `V x y z [R]` lines until the first `F`
//! - `ReadingFace`: `F ... E` face blocks; an `E` with no open face ends the block
//! - `BlockDone`: only `ZA` transparency lines may follow
//!
//! Inside a face `V` lists vertex indices, `C` and `B` set the candidate
//! material and `N` gives the median and normal.

use log::{debug, trace};
use nalgebra::{Point3, Vector3};

use super::Line;
use crate::error::{Error, Result};
use crate::mesh_ops::{polygon_median_weighted, polygon_normal};
use crate::model::{Face, MAX_TRANSPARENCY_LEVEL, Material, Surface, TransparencyEntry, Vertex};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Header,
    ReadingVertices,
    ReadingFace,
    BlockDone,
}

/// Directives collected for the face currently being read
#[derive(Debug)]
struct FaceAccumulator {
    indices: Vec<usize>,
    color: Option<Material>,
    median_normal: Option<(Point3<f64>, Vector3<f64>)>,
}

/// Incremental parser for one SURF block
///
/// Feed it lines in order with [`SurfParser::feed`], then call
/// [`SurfParser::finish`]. The parser is strict: anything outside the grammar
/// is a format error naming the line.
///
/// ```
/// use surfdnm::parser::{Line, SurfParser};
///
/// let mut parser = SurfParser::new("dot.srf");
/// for (i, raw) in ["V 0 0 0", "F", "V 0", "E", "E"].iter().enumerate() {
///     parser.feed(&Line::new(i + 1, raw)).unwrap();
/// }
/// assert!(parser.is_done());
/// let surface = parser.finish(5).unwrap();
/// assert_eq!(surface.geometry.faces.len(), 1);
/// ```
#[derive(Debug)]
pub struct SurfParser {
    state: State,
    surface: Surface,
    open: Option<FaceAccumulator>,
}

impl SurfParser {
    /// Start parsing a surface with the given name
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            state: State::Header,
            surface: Surface::new(name),
            open: None,
        }
    }

    /// Whether the terminating `E` has been read
    pub fn is_done(&self) -> bool {
        self.state == State::BlockDone
    }

    /// Process one line
    pub fn feed(&mut self, line: &Line<'_>) -> Result<()> {
        if line.is_blank() {
            return Ok(());
        }

        match self.state {
            State::Header => {
                self.state = State::ReadingVertices;
                if line.keyword() == "SURF" {
                    trace!("line {}: SURF header", line.number());
                    return Ok(());
                }
                self.feed_vertex_section(line)
            }
            State::ReadingVertices => self.feed_vertex_section(line),
            State::ReadingFace => match self.open.take() {
                Some(face) => self.feed_open_face(line, face),
                None => self.feed_between_faces(line),
            },
            State::BlockDone => self.feed_trailer(line),
        }
    }

    /// Finish the block and return the surface
    ///
    /// `last_line` is used for the error when the input ended before the
    /// terminating `E`.
    pub fn finish(self, last_line: usize) -> Result<Surface> {
        if self.state != State::BlockDone {
            let message = if self.open.is_some() {
                "input ends inside a face (missing E)"
            } else {
                "input ends before the surface is terminated by E"
            };
            return Err(Error::format(last_line, "", message));
        }

        debug!(
            "Decoded surface '{}': {} vertices, {} faces, {} materials, {} transparent",
            self.surface.name,
            self.surface.geometry.vertices.len(),
            self.surface.geometry.faces.len(),
            self.surface.materials.len(),
            self.surface.transparency.len()
        );
        Ok(self.surface)
    }

    fn feed_vertex_section(&mut self, line: &Line<'_>) -> Result<()> {
        match line.keyword() {
            "V" => {
                let vertex = parse_vertex(line)?;
                self.surface.geometry.push_vertex(vertex);
                Ok(())
            }
            "F" => self.open_face(line),
            "E" => self.end_block(line),
            "SURF" => Err(line.error("duplicate SURF header")),
            "C" | "B" | "N" => Err(line.error("directive outside a face")),
            "ZA" => Err(line.error("ZA before the surface is terminated")),
            other => Err(line.error(format!("unknown directive '{}'", other))),
        }
    }

    fn feed_between_faces(&mut self, line: &Line<'_>) -> Result<()> {
        match line.keyword() {
            "F" => self.open_face(line),
            "E" => self.end_block(line),
            "V" => Err(line.error("vertex after the first face")),
            "C" | "B" | "N" => Err(line.error("directive outside a face")),
            "ZA" => Err(line.error("ZA before the surface is terminated")),
            other => Err(line.error(format!("unknown directive '{}'", other))),
        }
    }

    fn feed_open_face(&mut self, line: &Line<'_>, mut face: FaceAccumulator) -> Result<()> {
        match line.keyword() {
            "V" => {
                for i in 0..line.args().len() {
                    face.indices.push(line.arg(i, "vertex index")?);
                }
            }
            "C" => face.color = Some(parse_color(line)?),
            "B" => {
                line.expect_args(0)?;
                let color = face
                    .color
                    .as_mut()
                    .ok_or_else(|| line.error("B without a preceding C"))?;
                color.bright = true;
            }
            "N" => {
                line.expect_args(6)?;
                let median = Point3::new(
                    line.arg(0, "median x")?,
                    line.arg(1, "median y")?,
                    line.arg(2, "median z")?,
                );
                let normal = Vector3::new(
                    line.arg(3, "normal x")?,
                    line.arg(4, "normal y")?,
                    line.arg(5, "normal z")?,
                );
                face.median_normal = Some((median, normal));
            }
            "E" => return self.close_face(line, face),
            "F" => return Err(line.error("F while the previous face is still open")),
            "ZA" => return Err(line.error("ZA inside a face")),
            "SURF" => return Err(line.error("SURF header inside a face")),
            other => return Err(line.error(format!("unknown directive '{}'", other))),
        }
        self.open = Some(face);
        Ok(())
    }

    fn feed_trailer(&mut self, line: &Line<'_>) -> Result<()> {
        match line.keyword() {
            "ZA" => self.parse_transparency(line),
            "E" => Err(line.error("E after the surface was terminated")),
            other => Err(line.error(format!(
                "'{}' after the surface was terminated; only ZA may follow",
                other
            ))),
        }
    }

    fn open_face(&mut self, line: &Line<'_>) -> Result<()> {
        line.expect_args(0)?;
        trace!(
            "line {}: open face {}",
            line.number(),
            self.surface.geometry.faces.len()
        );
        self.state = State::ReadingFace;
        self.open = Some(FaceAccumulator {
            indices: Vec::new(),
            color: None,
            median_normal: None,
        });
        Ok(())
    }

    fn end_block(&mut self, line: &Line<'_>) -> Result<()> {
        line.expect_args(0)?;
        trace!("line {}: end of surface", line.number());
        self.state = State::BlockDone;
        Ok(())
    }

    fn close_face(&mut self, line: &Line<'_>, face: FaceAccumulator) -> Result<()> {
        line.expect_args(0)?;
        let face_idx = self.surface.geometry.faces.len();
        if face.indices.is_empty() {
            return Err(line.error(format!("face {} has no vertex indices", face_idx)));
        }

        let num_vertices = self.surface.geometry.vertices.len();
        if let Some(&bad) = face.indices.iter().find(|&&i| i >= num_vertices) {
            return Err(Error::reference_at(
                line.number(),
                format!(
                    "face {} references vertex {} but the surface has {} vertices",
                    face_idx, bad, num_vertices
                ),
            ));
        }

        let material = face.color.map(|color| self.surface.materials.intern(color));
        let (median, normal) = match face.median_normal {
            Some(given) => given,
            None => {
                let points: Vec<Point3<f64>> = face
                    .indices
                    .iter()
                    .map(|&i| self.surface.geometry.vertices[i].position)
                    .collect();
                (polygon_median_weighted(&points), polygon_normal(&points))
            }
        };

        trace!(
            "line {}: close face {} ({} vertices, material {:?})",
            line.number(),
            face_idx,
            face.indices.len(),
            material
        );
        self.surface.geometry.push_face(Face {
            vertices: face.indices,
            material,
            median,
            normal,
        });
        Ok(())
    }

    fn parse_transparency(&mut self, line: &Line<'_>) -> Result<()> {
        let args = line.args();
        if args.is_empty() || args.len() % 2 != 0 {
            return Err(line.error("ZA expects face/level pairs"));
        }

        let num_faces = self.surface.geometry.faces.len();
        for pair in 0..args.len() / 2 {
            let face: usize = line.arg(pair * 2, "transparency face index")?;
            let level: u8 = line.arg(pair * 2 + 1, "transparency level")?;
            if face >= num_faces {
                return Err(Error::reference_at(
                    line.number(),
                    format!(
                        "ZA names face {} but the surface has {} faces",
                        face, num_faces
                    ),
                ));
            }
            if level > MAX_TRANSPARENCY_LEVEL {
                return Err(line.error(format!(
                    "transparency level {} exceeds {}",
                    level, MAX_TRANSPARENCY_LEVEL
                )));
            }
            if self.surface.transparency_of(face).is_some() {
                return Err(line.error(format!("face {} listed twice in ZA", face)));
            }
            self.surface
                .transparency
                .push(TransparencyEntry::new(face, level));
        }
        Ok(())
    }
}

fn parse_vertex(line: &Line<'_>) -> Result<Vertex> {
    let args = line.args();
    let is_smooth = match args.len() {
        3 => false,
        4 if args[3] == "R" => true,
        4 => {
            return Err(line.error(format!(
                "unexpected vertex flag '{}' (only R is allowed)",
                args[3]
            )));
        }
        n => {
            return Err(line.error(format!(
                "vertex expects 3 coordinates and an optional R, found {} argument(s)",
                n
            )));
        }
    };
    Ok(Vertex {
        position: Point3::new(line.arg(0, "x")?, line.arg(1, "y")?, line.arg(2, "z")?),
        is_smooth,
    })
}

fn parse_color(line: &Line<'_>) -> Result<Material> {
    match line.args().len() {
        1 => Ok(Material::from_packed(line.arg(0, "packed color")?)),
        3 => Ok(Material::from_rgb255(
            line.arg(0, "red channel")?,
            line.arg(1, "green channel")?,
            line.arg(2, "blue channel")?,
        )),
        n => Err(line.error(format!(
            "C expects 'r g b' or a single packed value, found {} argument(s)",
            n
        ))),
    }
}
