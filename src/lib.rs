//! Native OpenGL contexts bound to native windows.
//!
//! This crate creates an OpenGL rendering context on X11 through GLX, either
//! with its own small window or bound to a window handle supplied by a
//! widget toolkit. A context created with [`NativeContext::create_shared`]
//! shares GPU-resident objects (textures, buffers, programs) with a
//! previously created sibling.
//!
//! ```no_run
//! use native_gl_context::{NativeContext, OsWindowHandle};
//!
//! # fn main() -> native_gl_context::Result<()> {
//! # let widget_window: OsWindowHandle = unimplemented!();
//! let mut shared: NativeContext = NativeContext::new();
//! shared.create()?;
//!
//! let mut per_widget: NativeContext = NativeContext::new();
//! per_widget.create_shared(&shared, widget_window)?;
//! per_widget.make_current()?;
//! per_widget.swap_buffers()?;
//! # Ok(())
//! # }
//! ```
//!
//! Context creation, making contexts current and the Xlib error handler are
//! process-wide state on X11; see [`GLContextMethods`] for the constraints.

#![doc(html_root_url = "https://docs.rs/native_gl_context/0.1.0")]
#![warn(missing_docs)]

#[allow(unused_imports)]
#[macro_use]
extern crate log;
extern crate vek;

pub mod error;
pub use crate::error::{Error, ErrorKind, Result};
pub mod gl;
pub use crate::gl::{ContextSettings, GLContextSettings, GLPixelFormatSettings, GLVersion};
pub mod context;
pub use crate::context::GLContextMethods;
pub mod native_context;
pub use crate::native_context::NativeContext;

mod version_cmp;

/// Re-exported so that callers can name window sizes without depending on `vek` themselves.
pub use vek::Extent2;

macro_rules! os_mod {
    ($os:ident) => {
        mod os {
            pub mod $os;
            pub use self::$os::{OsGLContext, OsGLProc, OsWindowHandle};
        }

        /// The platform-specific context type used by [`NativeContext`] by default.
        pub type OsGLContext = os::OsGLContext;
        /// Raw OpenGL function type, with the appropriate calling convention for this platform.
        pub type OsGLProc = os::OsGLProc;
        /// Native window handle accepted by [`NativeContext::create_shared`] on this platform.
        pub type OsWindowHandle = os::OsWindowHandle;
    };
}

#[cfg(x11)]
pub mod x11;

#[cfg(all(x11, target_os = "linux"))]
os_mod! {linux}

#[cfg(all(x11, not(target_os = "linux")))]
os_mod! {bsd}

#[cfg(not(x11))]
compile_error!("native_gl_context only supports X11/GLX targets for now");
