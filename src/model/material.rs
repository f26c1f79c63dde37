//! Surface materials and the deduplicating material table

/// A surface color plus its self-illumination flag
///
/// Materials are compared structurally with [`Material::matches`]: two
/// materials that write the same `C` line and brightness flag are the same
/// material, however many host-side objects they came from.
#[derive(Debug, Clone, Copy)]
pub struct Material {
    /// RGB color, each channel normalized to 0..1
    pub color: [f64; 3],
    /// Self-illuminating (`B` directive)
    pub bright: bool,
}

impl Material {
    /// Create a non-illuminated material from a normalized color
    pub fn new(r: f64, g: f64, b: f64) -> Self {
        Self {
            color: [r, g, b],
            bright: false,
        }
    }

    /// Create a material from 0-255 channel values, as written in `C r g b`
    pub fn from_rgb255(r: u8, g: u8, b: u8) -> Self {
        Self::new(
            f64::from(r) / 255.0,
            f64::from(g) / 255.0,
            f64::from(b) / 255.0,
        )
    }

    /// Decode the single-value `C packed` form
    ///
    /// The value is masked to 15 bits and split into 5-bit fields: bits 10-14
    /// green, bits 5-9 red, bits 0-4 blue. Each field is divided by 31.
    pub fn from_packed(value: u32) -> Self {
        let c = value & 0x7fff;
        let g = f64::from((c >> 10) & 31) / 31.0;
        let r = f64::from((c >> 5) & 31) / 31.0;
        let b = f64::from(c & 31) / 31.0;
        Self::new(r, g, b)
    }

    /// Set the self-illumination flag
    pub fn with_bright(mut self, bright: bool) -> Self {
        self.bright = bright;
        self
    }

    /// Color channels scaled to 0-255
    pub fn rgb255(&self) -> [f64; 3] {
        self.color.map(|c| c * 255.0)
    }

    /// Channels as written in `C r g b`, rounded and clamped to 0-255
    pub fn wire_rgb(&self) -> [u8; 3] {
        self.rgb255().map(|c| c.round().clamp(0.0, 255.0) as u8)
    }

    /// Structural equality: same wire color and same brightness flag
    pub fn matches(&self, other: &Material) -> bool {
        self.bright == other.bright && self.wire_rgb() == other.wire_rgb()
    }
}

/// Materials of a surface, deduplicated in first-seen order
///
/// Indices handed out by [`MaterialTable::intern`] are 1-based and dense.
/// Lookup is a linear scan; surfaces rarely carry more than a few dozen colors.
#[derive(Debug, Clone, Default)]
pub struct MaterialTable {
    entries: Vec<Material>,
}

impl MaterialTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the index of a structurally equal material, adding it if new
    pub fn intern(&mut self, material: Material) -> usize {
        if let Some(index) = self.index_of(&material) {
            return index;
        }
        self.entries.push(material);
        self.entries.len()
    }

    /// 1-based index of a structurally equal material
    pub fn index_of(&self, material: &Material) -> Option<usize> {
        self.entries
            .iter()
            .position(|m| m.matches(material))
            .map(|i| i + 1)
    }

    /// Material at a 1-based index
    pub fn get(&self, index: usize) -> Option<&Material> {
        index.checked_sub(1).and_then(|i| self.entries.get(i))
    }

    /// Number of distinct materials
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Materials in index order
    pub fn iter(&self) -> impl Iterator<Item = &Material> {
        self.entries.iter()
    }

    /// Drop all entries
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_packed_white() {
        let m = Material::from_packed(32767);
        assert_eq!(m.color, [1.0, 1.0, 1.0]);
        assert!(!m.bright);
    }

    #[test]
    fn test_packed_green_bit() {
        let m = Material::from_packed(1024);
        assert_eq!(m.color, [0.0, 1.0 / 31.0, 0.0]);
        let full_green = Material::from_packed(31 << 10);
        assert_eq!(full_green.color, [0.0, 1.0, 0.0]);
    }

    #[test]
    fn test_packed_masks_high_bits() {
        let m = Material::from_packed(0x8000 | 31);
        assert_eq!(m.color, [0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_intern_dedups_structurally() {
        let mut table = MaterialTable::new();
        let a = table.intern(Material::from_rgb255(10, 20, 30));
        let b = table.intern(Material::from_rgb255(10, 20, 30));
        let c = table.intern(Material::from_rgb255(10, 20, 30).with_bright(true));
        assert_eq!(a, 1);
        assert_eq!(b, 1);
        assert_eq!(c, 2);
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_intern_uses_wire_color() {
        let mut table = MaterialTable::new();
        let a = table.intern(Material::new(0.5, 0.5, 0.5));
        let b = table.intern(Material::new(0.500_000_1, 0.5, 0.5));
        let c = table.intern(Material::new(0.51, 0.5, 0.5));
        assert_eq!(a, b);
        assert_eq!(c, 2);
        assert_eq!(Material::new(0.5, 0.5, 0.5).wire_rgb(), [128, 128, 128]);
        assert_eq!(Material::new(1.2, -0.1, 0.0).wire_rgb(), [255, 0, 0]);
    }

    #[test]
    fn test_get_is_one_based() {
        let mut table = MaterialTable::new();
        table.intern(Material::new(1.0, 0.0, 0.0));
        assert!(table.get(0).is_none());
        assert_eq!(table.get(1).map(|m| m.color), Some([1.0, 0.0, 0.0]));
        assert!(table.get(2).is_none());
    }

    #[test]
    fn test_rgb255() {
        let m = Material::from_rgb255(255, 128, 0);
        let rgb = m.rgb255();
        assert!((rgb[0] - 255.0).abs() < 1e-9);
        assert!((rgb[1] - 128.0).abs() < 1e-9);
        assert_eq!(rgb[2], 0.0);
    }
}
