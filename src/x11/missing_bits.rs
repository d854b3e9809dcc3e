//! Constants that `x11-dl` doesn't reliably provide.

// Items from GLX_ARB_create_context that we don't take from x11-dl, so that
// we don't depend on which version of it happens to export them.
#[allow(missing_docs)]
pub mod glx {
    use std::os::raw::c_int;

    pub const GLX_CONTEXT_MAJOR_VERSION_ARB: c_int = 0x2091;
    pub const GLX_CONTEXT_MINOR_VERSION_ARB: c_int = 0x2092;
}
