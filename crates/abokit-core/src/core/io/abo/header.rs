use crate::core::io::error::{AboError, UnsupportedFormatKind};
use crate::core::io::normals::NormalEncoding;
use std::fmt;

/// Magic bytes following the zero sentinel in extended files.
pub const MAGIC: &[u8; 4] = b"ABOF";

/// Container flag: the body after the header is a Zstandard blob.
pub const FLAG_COMPRESSED: u8 = 1 << 0;
/// Container flag: the frames form a reaction pathway.
pub const FLAG_NEB_PATHWAY: u8 = 1 << 1;
/// Per-frame flag (version 2): a unit cell follows.
pub const FRAME_FLAG_UNIT_CELL: u8 = 1 << 0;

/// On-disk layout generation of a container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FormatVersion {
    /// No header; the file starts directly with a non-zero frame count.
    LegacyV0,
    /// `ABOF` header, octahedral normals.
    AbofV1,
    /// `ABOF` header, octahedral normals, per-frame unit cells.
    #[default]
    AbofV2,
}

impl FormatVersion {
    /// Maps the version byte of an extended header.
    pub fn from_byte(byte: u8) -> Result<Self, AboError> {
        match byte {
            1 => Ok(FormatVersion::AbofV1),
            2 => Ok(FormatVersion::AbofV2),
            other => Err(UnsupportedFormatKind::Version(other).into()),
        }
    }

    /// The version byte written in an extended header, or `None` for legacy
    /// files, which have no header.
    pub fn to_byte(self) -> Option<u8> {
        match self {
            FormatVersion::LegacyV0 => None,
            FormatVersion::AbofV1 => Some(1),
            FormatVersion::AbofV2 => Some(2),
        }
    }

    pub fn normal_encoding(self) -> NormalEncoding {
        match self {
            FormatVersion::LegacyV0 => NormalEncoding::Float32,
            FormatVersion::AbofV1 | FormatVersion::AbofV2 => NormalEncoding::Oct16,
        }
    }

    /// Whether each frame record carries a flag byte (and possibly a unit cell).
    pub fn has_frame_flags(self) -> bool {
        matches!(self, FormatVersion::AbofV2)
    }

    pub fn is_extended(self) -> bool {
        !matches!(self, FormatVersion::LegacyV0)
    }

    pub fn name(self) -> &'static str {
        match self {
            FormatVersion::LegacyV0 => "legacy",
            FormatVersion::AbofV1 => "ABOF v1",
            FormatVersion::AbofV2 => "ABOF v2",
        }
    }
}

impl fmt::Display for FormatVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Container-level information read from (or written to) the file header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AboHeader {
    pub version: FormatVersion,
    pub compressed: bool,
    pub neb_pathway: bool,
}

impl AboHeader {
    pub fn legacy() -> Self {
        Self {
            version: FormatVersion::LegacyV0,
            compressed: false,
            neb_pathway: false,
        }
    }

    pub fn extended(version: FormatVersion) -> Self {
        Self {
            version,
            ..Self::default()
        }
    }

    pub fn with_compression(mut self, compressed: bool) -> Self {
        self.compressed = compressed;
        self
    }

    pub fn with_neb_pathway(mut self, neb_pathway: bool) -> Self {
        self.neb_pathway = neb_pathway;
        self
    }

    /// Parses the flags byte of an extended header. Unknown bits are ignored.
    pub fn from_flags(version: FormatVersion, flags: u8) -> Self {
        Self {
            version,
            compressed: flags & FLAG_COMPRESSED != 0,
            neb_pathway: flags & FLAG_NEB_PATHWAY != 0,
        }
    }

    pub fn flags(&self) -> u8 {
        let mut flags = 0;
        if self.compressed {
            flags |= FLAG_COMPRESSED;
        }
        if self.neb_pathway {
            flags |= FLAG_NEB_PATHWAY;
        }
        flags
    }
}
