//! OpenGL-related settings used when creating contexts.

use std::ffi::CString;
use std::fmt::{self, Display, Formatter};
use vek::Extent2;
use crate::version_cmp;


/// Settings requested for an OpenGL pixel format.
///
/// The defaults are what widget-embedded contexts usually want:
/// RGBA8, 24-bit depth, 8-bit stencil, double-buffered.
#[derive(Debug, Copy, Clone, Hash, PartialEq, Eq)]
pub struct GLPixelFormatSettings {
    /// Number of bits used for storing per-fragment depth values.
    /// Often set to 24.
    pub depth_bits: u8,
    /// Number of bits used for storing per-fragment "stencil" values.
    /// Often set to 32-`depth_bits`.
    pub stencil_bits: u8,
    /// Use double-buffering ? Defaults to `true`; `swap_buffers()` is
    /// meaningless otherwise.
    pub double_buffer: bool,
    /// Number of bits used for storing the red channel. Often set to 8.
    pub red_bits: u8,
    /// Number of bits used for storing the green channel. Often set to 8.
    pub green_bits: u8,
    /// Number of bits used for storing the blue channel. Often set to 8.
    pub blue_bits: u8,
    /// Number of bits used for storing the alpha channel. Often set to 8.
    pub alpha_bits: u8,
}

impl Default for GLPixelFormatSettings {
    fn default() -> Self {
        Self {
            depth_bits: 24,
            stencil_bits: 8,
            double_buffer: true,
            red_bits: 8,
            green_bits: 8,
            blue_bits: 8,
            alpha_bits: 8,
        }
    }
}


/// Convenience struct for representing an OpenGL version.
#[derive(Debug, Copy, Clone, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct GLVersion {
    /// Major version number.
    pub major: u8,
    /// Minor version number.
    pub minor: u8,
}

impl GLVersion {
    /// OpenGL 1.0. Requesting it makes implementations return the newest
    /// version they have that is compatible with pre-3.0 OpenGL.
    pub const GL_1_0: Self = Self { major: 1, minor: 0 };
    /// OpenGL 3.2, the first version with core and compatibility profiles.
    pub const GL_3_2: Self = Self { major: 3, minor: 2 };
    /// OpenGL 4.2.
    pub const GL_4_2: Self = Self { major: 4, minor: 2 };

    /// Create a version from major and minor version numbers.
    pub fn new(major: u8, minor: u8) -> Self { Self { major, minor } }
    /// Is this version the same as, or more recent than, `other` ?
    pub fn is_at_least(&self, other: GLVersion) -> bool {
        version_cmp::ge((self.major, self.minor), (other.major, other.minor))
    }
}

impl Display for GLVersion {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}


/// Settings requested for an OpenGL context.
#[derive(Debug, Copy, Clone, Hash, PartialEq, Eq)]
pub struct GLContextSettings {
    /// The version requested first, when the platform can create versioned
    /// contexts at all. Defaults to 4.2.
    pub version: GLVersion,
    /// The version requested if creating a `version` context fails.
    /// Defaults to 1.0; `None` disables the retry.
    ///
    /// The retry happens for shared contexts as well as unshared ones.
    pub fallback_version: Option<GLVersion>,
}

impl Default for GLContextSettings {
    fn default() -> Self {
        Self {
            version: GLVersion::GL_4_2,
            fallback_version: Some(GLVersion::GL_1_0),
        }
    }
}


/// Everything that can be tweaked when creating a context.
///
/// `ContextSettings::default()` reproduces the behaviour of the parameterless
/// `create()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextSettings {
    /// Name of the display to connect to (on X11, e.g `:0`).
    /// `None` means the platform default (on X11, the `DISPLAY` environment variable).
    pub display_name: Option<CString>,
    /// Requested pixel format.
    pub pixel_format: GLPixelFormatSettings,
    /// Requested context versions.
    pub context: GLContextSettings,
    /// Size of the window created for unshared contexts. Defaults to 100x100.
    pub window_size: Extent2<u32>,
    /// Title of the window created for unshared contexts.
    pub window_title: String,
}

impl Default for ContextSettings {
    fn default() -> Self {
        Self {
            display_name: None,
            pixel_format: Default::default(),
            context: Default::default(),
            window_size: Extent2::new(100, 100),
            window_title: "GL 3.0 Window".to_owned(),
        }
    }
}
