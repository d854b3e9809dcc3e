//! GLX decision logic: extension lookup, FBConfig scoring and attribute lists.
//!
//! Nothing in here talks to the X server, so all of it is unit-tested.

use std::os::raw::{c_int, c_ulong};
use x11_dl::glx::*;
use x11_dl::xlib as x;
use super::missing_bits::glx::{GLX_CONTEXT_MAJOR_VERSION_ARB, GLX_CONTEXT_MINOR_VERSION_ARB};
use crate::gl::{GLPixelFormatSettings, GLVersion};

/// Name of the extension that provides `glXCreateContextAttribsARB()`.
pub const GLX_ARB_CREATE_CONTEXT: &str = "GLX_ARB_create_context";

/// Is `extension` one of the space-separated names in `ext_list` ?
///
/// Extension names don't have spaces, so a query that contains one (or is
/// empty) is never supported. Substrings don't count: `GLX_ARB_create_context`
/// is not supported by a list that only has `GLX_ARB_create_context_profile`.
pub fn is_extension_supported(ext_list: &str, extension: &str) -> bool {
    if extension.is_empty() || extension.contains(' ') {
        return false;
    }
    ext_list.split(' ').any(|name| name == extension)
}


/// What we know about one candidate FBConfig, in `glXChooseFBConfig()` order.
#[derive(Debug, Copy, Clone, Hash, PartialEq, Eq)]
pub struct FBConfigInfo {
    /// Index into the list returned by `glXChooseFBConfig()`.
    pub index: usize,
    /// ID of the visual `glXGetVisualFromFBConfig()` resolved it to.
    pub visual_id: c_ulong,
    /// `GLX_SAMPLE_BUFFERS`.
    pub sample_buffers: c_int,
    /// `GLX_SAMPLES`.
    pub samples: c_int,
}

impl FBConfigInfo {
    /// Does it advertise at least one sample buffer ?
    pub fn is_multisampled(&self) -> bool {
        self.sample_buffers > 0
    }
}

/// Result of `choose_fbconfig()`, as indices into its input slice.
#[derive(Debug, Copy, Clone, Hash, PartialEq, Eq)]
pub struct FBConfigChoice {
    /// The one to use.
    pub best: usize,
    /// Only used for diagnostics.
    pub worst: usize,
}

/// Picks the candidate with sample buffers and the most samples per pixel.
///
/// Multisampled candidates always beat the others; among equals, the first
/// one wins. If no candidate is multisampled, the first one is picked.
/// Returns `None` for an empty slice.
pub fn choose_fbconfig(candidates: &[FBConfigInfo]) -> Option<FBConfigChoice> {
    if candidates.is_empty() {
        return None;
    }
    let (mut best, mut worst) = (0, 0);
    for (i, c) in candidates.iter().enumerate().skip(1) {
        let b = &candidates[best];
        if c.is_multisampled() && (!b.is_multisampled() || c.samples > b.samples) {
            best = i;
        }
        let w = &candidates[worst];
        if (!c.is_multisampled() && w.is_multisampled())
        || (c.is_multisampled() == w.is_multisampled() && c.samples < w.samples) {
            worst = i;
        }
    }
    Some(FBConfigChoice { best, worst })
}


// Functions that generate attrib arrays (i.e 0-terminated arrays of c_int).

/// Attribute list for `glXChooseFBConfig()`.
pub fn gen_fbconfig_attribs(settings: &GLPixelFormatSettings) -> [c_int; 23] {
    let &GLPixelFormatSettings {
        depth_bits, stencil_bits, double_buffer,
        red_bits, green_bits, blue_bits, alpha_bits,
    } = settings;
    [
        GLX_X_RENDERABLE as c_int, x::True as c_int,
        GLX_DRAWABLE_TYPE as c_int, GLX_WINDOW_BIT as c_int,
        GLX_RENDER_TYPE as c_int, GLX_RGBA_BIT as c_int,
        GLX_X_VISUAL_TYPE as c_int, GLX_TRUE_COLOR as c_int,
        GLX_RED_SIZE as c_int, red_bits as c_int,
        GLX_GREEN_SIZE as c_int, green_bits as c_int,
        GLX_BLUE_SIZE as c_int, blue_bits as c_int,
        GLX_ALPHA_SIZE as c_int, alpha_bits as c_int,
        GLX_DEPTH_SIZE as c_int, depth_bits as c_int,
        GLX_STENCIL_SIZE as c_int, stencil_bits as c_int,
        GLX_DOUBLEBUFFER as c_int, double_buffer as c_int,
        0 // keep last
    ]
}

/// Attribute list for `glXCreateContextAttribsARB()`.
pub fn gen_arb_attribs(version: GLVersion) -> [c_int; 5] {
    [
        GLX_CONTEXT_MAJOR_VERSION_ARB, version.major as c_int,
        GLX_CONTEXT_MINOR_VERSION_ARB, version.minor as c_int,
        0
    ]
}
