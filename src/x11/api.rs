//! The Xlib and GLX entry points used by `X11GLContext`.
//!
//! `DlX11Api` is the real thing, loaded at runtime. The trait exists so that the
//! context creation logic can be exercised without an X server.

use std::ffi::CStr;
use std::fmt::{self, Debug, Formatter};
use std::mem;
use std::os::raw::{c_int, c_uint, c_ulong, c_void};
use std::ptr;
use std::rc::Rc;
use std::slice;
use vek::Extent2;
use x11_dl::xlib as x;
use x11_dl::glx;
use crate::error::{Error, ErrorKind, Result};
use super::X11GLProc;

/// Signature of `glXCreateContextAttribsARB()`, which is only reachable through `glXGetProcAddress()`.
#[allow(non_camel_case_types)]
pub type glXCreateContextAttribsARB = unsafe extern "C" fn(
    *mut x::Display, glx::GLXFBConfig, share_context: glx::GLXContext,
    direct: x::Bool, attrib_list: *const c_int
) -> glx::GLXContext;

/// The argument and return type of `XSetErrorHandler()`.
pub type XErrorHandler = Option<unsafe extern "C" fn(*mut x::Display, *mut x::XErrorEvent) -> c_int>;

/// The parts of an `XVisualInfo` we care about, copied so that the
/// `XVisualInfo` can be freed right away.
#[derive(Debug, Copy, Clone, Hash, PartialEq, Eq)]
#[allow(missing_docs)]
pub struct X11Visual {
    pub visual: *mut x::Visual,
    pub visual_id: x::VisualID,
    pub screen: c_int,
    pub depth: c_int,
}

/// Xlib and GLX, as needed for creating and using contexts.
///
/// All functions taking a `*mut x::Display` are unsafe because the display
/// (and any other handle passed along) must be valid.
pub trait X11Api: Debug + Sized {
    /// Gets a handle to the native libraries.
    fn load() -> Result<Self>;

    /// `XOpenDisplay()`. Returns NULL on failure.
    unsafe fn open_display(&self, name: Option<&CStr>) -> *mut x::Display;
    /// `XCloseDisplay()`.
    unsafe fn close_display(&self, x_display: *mut x::Display);
    /// `XDefaultScreen()`.
    unsafe fn default_screen(&self, x_display: *mut x::Display) -> c_int;
    /// `XRootWindow()`.
    unsafe fn root_window(&self, x_display: *mut x::Display, screen_num: c_int) -> x::Window;
    /// `XSync()` is like `XFlush()` except that it also waits for all requests
    /// to be processed. In particular, this ensures that the error handler is
    /// called before going any further.
    unsafe fn sync(&self, x_display: *mut x::Display);
    /// Installs a process-wide error handler, returning the previous one.
    unsafe fn set_error_handler(&self, handler: XErrorHandler) -> XErrorHandler;

    /// `glXQueryVersion()`, as `(major, minor)`.
    unsafe fn query_glx_version(&self, x_display: *mut x::Display) -> Option<(c_int, c_int)>;
    /// `glXQueryExtensionsString()`; empty if GLX returned NULL.
    unsafe fn query_extensions_string(&self, x_display: *mut x::Display, screen_num: c_int) -> String;
    /// Returns the matching FBConfigs, in the order the server gave them.
    unsafe fn choose_fbconfigs(&self, x_display: *mut x::Display, screen_num: c_int, attribs: &[c_int]) -> Vec<glx::GLXFBConfig>;
    /// `glXGetFBConfigAttrib()`.
    unsafe fn fbconfig_attrib(&self, x_display: *mut x::Display, fbc: glx::GLXFBConfig, attrib: c_int) -> Option<c_int>;
    /// `glXGetVisualFromFBConfig()`, copied then freed.
    unsafe fn visual_from_fbconfig(&self, x_display: *mut x::Display, fbc: glx::GLXFBConfig) -> Option<X11Visual>;

    /// `XCreateColormap()` with `AllocNone`.
    unsafe fn create_colormap(&self, x_display: *mut x::Display, root: x::Window, visual: &X11Visual) -> x::Colormap;
    /// `XFreeColormap()`.
    unsafe fn free_colormap(&self, x_display: *mut x::Display, colormap: x::Colormap);
    /// Creates an `InputOutput` window at (0, 0) that only selects `StructureNotify` events.
    unsafe fn create_window(&self, x_display: *mut x::Display, root: x::Window, visual: &X11Visual, colormap: x::Colormap, size: Extent2<u32>) -> x::Window;
    /// `XStoreName()`.
    unsafe fn store_name(&self, x_display: *mut x::Display, window: x::Window, name: &CStr);
    /// `XDestroyWindow()`.
    unsafe fn destroy_window(&self, x_display: *mut x::Display, window: x::Window);

    /// Is `glXCreateContextAttribsARB()` available at all ?
    fn has_create_context_attribs(&self) -> bool;
    /// Returns NULL if `glXCreateContextAttribsARB()` is not available.
    unsafe fn create_context_attribs(&self, x_display: *mut x::Display, fbc: glx::GLXFBConfig, share: glx::GLXContext, attribs: &[c_int]) -> glx::GLXContext;
    /// Creates a direct, RGBA context the GLX 1.3 way.
    unsafe fn create_new_context(&self, x_display: *mut x::Display, fbc: glx::GLXFBConfig, share: glx::GLXContext) -> glx::GLXContext;
    /// `glXIsDirect()`.
    unsafe fn is_direct(&self, x_display: *mut x::Display, glx_context: glx::GLXContext) -> bool;
    /// `glXMakeCurrent()`. Pass `0` and NULL to release the current context.
    unsafe fn make_current(&self, x_display: *mut x::Display, drawable: glx::GLXDrawable, glx_context: glx::GLXContext) -> bool;
    /// `glXSwapBuffers()`.
    unsafe fn swap_buffers(&self, x_display: *mut x::Display, drawable: glx::GLXDrawable);
    /// `glXDestroyContext()`.
    unsafe fn destroy_context(&self, x_display: *mut x::Display, glx_context: glx::GLXContext);
    /// Doesn't need a current context, unlike in WGL.
    unsafe fn get_proc_address(&self, name: &CStr) -> Option<X11GLProc>;
}


struct DlLibs {
    xlib: x::Xlib,
    glx: glx::Glx,
    create_context_attribs: Option<glXCreateContextAttribsARB>,
}

/// libX11 and libGL, loaded with `dlopen()` via `x11-dl`.
#[derive(Clone)]
pub struct DlX11Api(Rc<DlLibs>);

impl Debug for DlX11Api {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.debug_struct("DlX11Api")
            .field("has_create_context_attribs", &self.has_create_context_attribs())
            .finish()
    }
}

impl X11Api for DlX11Api {
    fn load() -> Result<Self> {
        let xlib = x::Xlib::open().map_err(|e| Error::new(ErrorKind::LibraryUnavailable, format!("Failed to load libX11: {}", e)))?;
        let glx = glx::Glx::open().map_err(|e| Error::new(ErrorKind::LibraryUnavailable, format!("Failed to load libGL: {}", e)))?;
        let create_context_attribs = unsafe {
            (glx.glXGetProcAddress)(b"glXCreateContextAttribsARB\0".as_ptr())
                .map(|f| mem::transmute::<X11GLProc, glXCreateContextAttribsARB>(f))
        };
        match create_context_attribs {
            Some(_) => trace!("Loaded `glXCreateContextAttribsARB`"),
            None => debug!("Couldn't load `glXCreateContextAttribsARB`"),
        }
        Ok(DlX11Api(Rc::new(DlLibs { xlib, glx, create_context_attribs })))
    }

    unsafe fn open_display(&self, name: Option<&CStr>) -> *mut x::Display {
        (self.0.xlib.XOpenDisplay)(name.map_or(ptr::null(), CStr::as_ptr))
    }
    unsafe fn close_display(&self, x_display: *mut x::Display) {
        (self.0.xlib.XCloseDisplay)(x_display);
    }
    unsafe fn default_screen(&self, x_display: *mut x::Display) -> c_int {
        (self.0.xlib.XDefaultScreen)(x_display)
    }
    unsafe fn root_window(&self, x_display: *mut x::Display, screen_num: c_int) -> x::Window {
        (self.0.xlib.XRootWindow)(x_display, screen_num)
    }
    unsafe fn sync(&self, x_display: *mut x::Display) {
        (self.0.xlib.XSync)(x_display, x::False);
    }
    unsafe fn set_error_handler(&self, handler: XErrorHandler) -> XErrorHandler {
        (self.0.xlib.XSetErrorHandler)(handler)
    }

    unsafe fn query_glx_version(&self, x_display: *mut x::Display) -> Option<(c_int, c_int)> {
        let (mut major, mut minor) = (0, 0);
        match (self.0.glx.glXQueryVersion)(x_display, &mut major, &mut minor) {
            x::False => None,
            _ => Some((major, minor)),
        }
    }
    unsafe fn query_extensions_string(&self, x_display: *mut x::Display, screen_num: c_int) -> String {
        let extensions = (self.0.glx.glXQueryExtensionsString)(x_display, screen_num);
        if extensions.is_null() {
            return String::new();
        }
        CStr::from_ptr(extensions).to_string_lossy().into_owned()
    }
    unsafe fn choose_fbconfigs(&self, x_display: *mut x::Display, screen_num: c_int, attribs: &[c_int]) -> Vec<glx::GLXFBConfig> {
        let mut fbcount: c_int = 0;
        let fbcs = (self.0.glx.glXChooseFBConfig)(x_display, screen_num, attribs.as_ptr(), &mut fbcount);
        if fbcs.is_null() {
            return Vec::new();
        }
        let out = slice::from_raw_parts(fbcs, fbcount.max(0) as usize).to_vec();
        // Be sure to free the list allocated by glXChooseFBConfig().
        (self.0.xlib.XFree)(fbcs as *mut c_void);
        out
    }
    unsafe fn fbconfig_attrib(&self, x_display: *mut x::Display, fbc: glx::GLXFBConfig, attrib: c_int) -> Option<c_int> {
        let mut value = 0;
        match (self.0.glx.glXGetFBConfigAttrib)(x_display, fbc, attrib, &mut value) {
            0 => Some(value), // Success
            _ => None,
        }
    }
    unsafe fn visual_from_fbconfig(&self, x_display: *mut x::Display, fbc: glx::GLXFBConfig) -> Option<X11Visual> {
        let vi = (self.0.glx.glXGetVisualFromFBConfig)(x_display, fbc);
        if vi.is_null() {
            return None;
        }
        let &x::XVisualInfo { visual, visualid, screen, depth, .. } = &*vi;
        (self.0.xlib.XFree)(vi as *mut c_void);
        Some(X11Visual { visual, visual_id: visualid, screen, depth })
    }

    unsafe fn create_colormap(&self, x_display: *mut x::Display, root: x::Window, visual: &X11Visual) -> x::Colormap {
        (self.0.xlib.XCreateColormap)(x_display, root, visual.visual, x::AllocNone)
    }
    unsafe fn free_colormap(&self, x_display: *mut x::Display, colormap: x::Colormap) {
        (self.0.xlib.XFreeColormap)(x_display, colormap);
    }
    unsafe fn create_window(&self, x_display: *mut x::Display, root: x::Window, visual: &X11Visual, colormap: x::Colormap, size: Extent2<u32>) -> x::Window {
        let mut swa: x::XSetWindowAttributes = mem::zeroed();
        swa.colormap = colormap;
        swa.background_pixmap = 0; // None
        swa.border_pixel = 0;
        swa.event_mask = x::StructureNotifyMask;
        let valuemask = x::CWBorderPixel | x::CWColormap | x::CWEventMask;
        let (pos_x, pos_y, border_thickness) = (0, 0, 0);
        (self.0.xlib.XCreateWindow)(
            x_display, root, pos_x, pos_y, size.w as c_uint, size.h as c_uint,
            border_thickness, visual.depth, x::InputOutput as c_uint, visual.visual,
            valuemask as c_ulong, &mut swa
        )
    }
    unsafe fn store_name(&self, x_display: *mut x::Display, window: x::Window, name: &CStr) {
        (self.0.xlib.XStoreName)(x_display, window, name.as_ptr());
    }
    unsafe fn destroy_window(&self, x_display: *mut x::Display, window: x::Window) {
        (self.0.xlib.XDestroyWindow)(x_display, window);
    }

    fn has_create_context_attribs(&self) -> bool {
        self.0.create_context_attribs.is_some()
    }
    unsafe fn create_context_attribs(&self, x_display: *mut x::Display, fbc: glx::GLXFBConfig, share: glx::GLXContext, attribs: &[c_int]) -> glx::GLXContext {
        match self.0.create_context_attribs {
            Some(f) => f(x_display, fbc, share, x::True, attribs.as_ptr()),
            None => ptr::null_mut(),
        }
    }
    unsafe fn create_new_context(&self, x_display: *mut x::Display, fbc: glx::GLXFBConfig, share: glx::GLXContext) -> glx::GLXContext {
        (self.0.glx.glXCreateNewContext)(x_display, fbc, glx::GLX_RGBA_TYPE as c_int, share, x::True)
    }
    unsafe fn is_direct(&self, x_display: *mut x::Display, glx_context: glx::GLXContext) -> bool {
        (self.0.glx.glXIsDirect)(x_display, glx_context) != x::False
    }
    unsafe fn make_current(&self, x_display: *mut x::Display, drawable: glx::GLXDrawable, glx_context: glx::GLXContext) -> bool {
        (self.0.glx.glXMakeCurrent)(x_display, drawable, glx_context) != x::False
    }
    unsafe fn swap_buffers(&self, x_display: *mut x::Display, drawable: glx::GLXDrawable) {
        (self.0.glx.glXSwapBuffers)(x_display, drawable)
    }
    unsafe fn destroy_context(&self, x_display: *mut x::Display, glx_context: glx::GLXContext) {
        // Defers destruction until it's not current to any thread.
        (self.0.glx.glXDestroyContext)(x_display, glx_context)
    }
    unsafe fn get_proc_address(&self, name: &CStr) -> Option<X11GLProc> {
        (self.0.glx.glXGetProcAddress)(name.as_ptr() as *const _)
    }
}
