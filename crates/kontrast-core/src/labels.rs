//! Optional 5-bit label mask encoded in file names.
//!
//! A stem such as `post_10100` carries the mask `10100`; each character flags
//! one label, in the order of [`LABEL_NAMES`]. Stems without a well-formed
//! suffix simply have no mask.

/// Label names in bit order.
pub const LABEL_NAMES: [&str; 5] = ["meme", "location", "person", "politics", "text"];

/// A parsed label mask.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LabelMask {
    bits: [bool; 5],
}

impl LabelMask {
    /// Extract the mask from a file stem, if it ends in `_` plus five `0`/`1`.
    pub fn from_stem(stem: &str) -> Option<Self> {
        let (_, suffix) = stem.rsplit_once('_')?;
        if suffix.len() != LABEL_NAMES.len() {
            return None;
        }
        let mut bits = [false; 5];
        for (bit, ch) in bits.iter_mut().zip(suffix.chars()) {
            *bit = match ch {
                '0' => false,
                '1' => true,
                _ => return None,
            };
        }
        Some(Self { bits })
    }

    /// Whether the label at `index` (see [`LABEL_NAMES`]) is set.
    pub fn is_set(&self, index: usize) -> bool {
        self.bits.get(index).copied().unwrap_or(false)
    }

    /// Names of the set labels, in bit order.
    pub fn labels(&self) -> impl Iterator<Item = &'static str> + '_ {
        LABEL_NAMES
            .iter()
            .zip(self.bits.iter())
            .filter(|(_, set)| **set)
            .map(|(name, _)| *name)
    }

    /// Set labels joined with `+`, or an empty string.
    pub fn label(&self) -> String {
        self.labels().collect::<Vec<_>>().join("+")
    }
}

impl std::fmt::Display for LabelMask {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for &bit in &self.bits {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}
