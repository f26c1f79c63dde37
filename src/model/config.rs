//! Export configuration

/// Rule deciding which vertices are written round (`R`)
///
/// DNM export and standalone SURF export use different rules; both are kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SmoothingPolicy {
    /// Round if at least one adjacent face is smooth shaded (DNM export)
    #[default]
    AdjacentFace,
    /// Round if every adjacent edge is smooth and at least one adjacent face
    /// is smooth shaded (standalone SURF export)
    SmoothEdgesAndFace,
}

/// How face normals are written in `N` lines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NormalMode {
    /// Negated host normal
    #[default]
    Flipped,
    /// Host normal unchanged (the "flip normals" export option)
    Host,
    /// Zero vector, which the engine reads as double-sided
    TwoSided,
}

/// Shape of a single encoded PCK block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PckShape {
    /// `PCK <name> <count>` header, body, trailing blank line
    Embedded,
    /// Body only, for a side file or a bare SURF file
    Part,
    /// Like `Embedded`, with the name cut at its first `.` and `.srf` appended
    Ground,
}

/// File layout produced by a DNM export
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DnmLayout {
    /// Header, PCK blocks, SRF blocks and footer in one file
    #[default]
    Embedded,
    /// Header and PCK blocks only
    PckOnly,
    /// PCK bodies in `parts/` side files; SRF blocks and footer inline
    Exploded,
    /// Only the `parts/` side files
    PartsOnly,
}

impl DnmLayout {
    /// Whether surface file names get the `parts/` prefix
    pub fn uses_parts(&self) -> bool {
        matches!(self, DnmLayout::Exploded | DnmLayout::PartsOnly)
    }

    /// Whether PCK blocks are embedded in the main file
    pub fn embeds_pck(&self) -> bool {
        matches!(self, DnmLayout::Embedded | DnmLayout::PckOnly)
    }

    /// Whether SRF descriptor blocks and the footer are written
    pub fn writes_nodes(&self) -> bool {
        matches!(self, DnmLayout::Embedded | DnmLayout::Exploded)
    }

    /// Whether a main DNM file is produced at all
    pub fn writes_main(&self) -> bool {
        !matches!(self, DnmLayout::PartsOnly)
    }
}

/// Settings for one export run
///
/// # Example
///
/// ```
/// use surfdnm::{DnmLayout, ExportConfig, NormalMode};
///
/// let config = ExportConfig::dnm()
///     .with_scale(0.5)
///     .with_normal_mode(NormalMode::Host)
///     .with_layout(DnmLayout::Exploded);
/// assert_eq!(config.scale, 0.5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExportConfig {
    /// Uniform scale folded into the coordinate transform
    pub scale: f64,
    /// Normal sign / two-sided handling
    pub normal_mode: NormalMode,
    /// Round-vertex rule
    pub smoothing: SmoothingPolicy,
    /// DNM file layout
    pub layout: DnmLayout,
}

impl ExportConfig {
    /// Defaults of the DNM exporter: adjacent-face smoothing, embedded layout
    pub fn dnm() -> Self {
        Self {
            scale: 1.0,
            normal_mode: NormalMode::Flipped,
            smoothing: SmoothingPolicy::AdjacentFace,
            layout: DnmLayout::Embedded,
        }
    }

    /// Defaults of the standalone SURF exporter: strict edge and face smoothing
    pub fn surf() -> Self {
        Self {
            smoothing: SmoothingPolicy::SmoothEdgesAndFace,
            ..Self::dnm()
        }
    }

    /// Set the uniform scale
    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    /// Set the normal mode
    pub fn with_normal_mode(mut self, normal_mode: NormalMode) -> Self {
        self.normal_mode = normal_mode;
        self
    }

    /// Set the smoothing policy
    pub fn with_smoothing(mut self, smoothing: SmoothingPolicy) -> Self {
        self.smoothing = smoothing;
        self
    }

    /// Set the DNM layout
    pub fn with_layout(mut self, layout: DnmLayout) -> Self {
        self.layout = layout;
        self
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self::dnm()
    }
}
