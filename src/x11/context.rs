//! `X11GLContext`: a GLX context along with its drawable and display connection.

use std::borrow::Cow;
use std::ffi::{CStr, CString};
use std::os::raw::c_int;
use std::ptr;
use x11_dl::xlib as x;
use x11_dl::glx::{GLXContext, GLXFBConfig, GLX_SAMPLES, GLX_SAMPLE_BUFFERS};
use super::api::{X11Api, DlX11Api, X11Visual};
use super::glx::{self, FBConfigInfo};
use super::xlib_error::XErrorTrap;
use super::{X11GLProc, X11WindowHandle};
use crate::context::GLContextMethods;
use crate::error::{Error, ErrorKind, Result, failed};
use crate::gl::{ContextSettings, GLContextSettings, GLVersion};
use crate::version_cmp;


/// An "owned" Xlib `Display` pointer, which is closed when dropped.
#[derive(Debug)]
pub struct X11OwnedDisplay<A: X11Api> {
    api: A,
    x_display: *mut x::Display,
}

impl<A: X11Api> X11OwnedDisplay<A> {
    /// Opens the display called `name`, or the one named by `DISPLAY` if `None`.
    pub fn open(api: A, name: Option<&CStr>) -> Result<Self> {
        let shown_name = name.map_or(Cow::Borrowed("$DISPLAY"), CStr::to_string_lossy);
        let x_display = unsafe {
            api.open_display(name)
        };
        if x_display.is_null() {
            return failed(ErrorKind::DisplayUnavailable, format!("Failed to open X display `{}`", shown_name));
        }
        trace!("Opened X Display `{}`", shown_name);
        Ok(Self { api, x_display })
    }
    /// The libraries this display was opened with.
    pub fn api(&self) -> &A {
        &self.api
    }
    /// Gets the raw pointer. It's closed when `self` is dropped.
    pub fn as_ptr(&self) -> *mut x::Display {
        self.x_display
    }
}

impl<A: X11Api> Drop for X11OwnedDisplay<A> {
    fn drop(&mut self) {
        unsafe {
            self.api.sync(self.x_display);
            self.api.close_display(self.x_display);
        }
        trace!("Closed X Display {:?}", self.x_display);
    }
}


/// The window a context renders into.
#[derive(Debug, Copy, Clone, Hash, PartialEq, Eq)]
enum X11Drawable {
    /// Created along with the context; destroyed with it, then its colormap is freed.
    Owned { window: x::Window, colormap: x::Colormap },
    /// Supplied by the caller, who keeps ownership.
    Borrowed(X11WindowHandle),
}

impl X11Drawable {
    fn xid(&self) -> x::Window {
        match *self {
            X11Drawable::Owned { window, .. } => window,
            X11Drawable::Borrowed(handle) => handle.xid(),
        }
    }
}


/// A GLX context, on its own X display connection.
///
/// Contexts created with `create()` own a default window; contexts created
/// with `create_shared()` render into a borrowed one. Dropping the context
/// unbinds it, destroys it, then destroys the window and frees its colormap
/// (if owned), then closes the display connection.
#[derive(Debug)]
pub struct X11GLContext<A: X11Api = DlX11Api> {
    // NOTE: Dropped last, after `Drop::drop()` has released everything else.
    display: X11OwnedDisplay<A>,
    drawable: X11Drawable,
    glx_context: GLXContext,
    is_direct: bool,
}

impl<A: X11Api> Drop for X11GLContext<A> {
    fn drop(&mut self) {
        let x_display = self.display.as_ptr();
        let api = self.display.api();
        unsafe {
            if !self.glx_context.is_null() {
                api.make_current(x_display, 0, ptr::null_mut());
                api.destroy_context(x_display, self.glx_context);
                trace!("Destroyed GLX context {:?}", self.glx_context);
            }
            if let X11Drawable::Owned { window, colormap } = self.drawable {
                api.destroy_window(x_display, window);
                api.free_colormap(x_display, colormap);
                trace!("Destroyed window {:#x} and freed colormap {:#x}", window, colormap);
            }
        }
    }
}

impl<A: X11Api> X11GLContext<A> {
    /// (X11-only) Gets the `Display` pointer this context was created on.
    ///
    /// Be careful: It is closed when the context is dropped.
    pub fn xlib_display(&self) -> *mut x::Display {
        self.display.as_ptr()
    }
    /// (X11-only) Gets the raw GLX context.
    pub fn glx_context(&self) -> GLXContext {
        self.glx_context
    }
    /// (X11-only) Gets the window this context renders into.
    pub fn x_window(&self) -> x::Window {
        self.drawable.xid()
    }
    /// Was the window created along with this context (as opposed to borrowed) ?
    pub fn owns_window(&self) -> bool {
        match self.drawable {
            X11Drawable::Owned { .. } => true,
            X11Drawable::Borrowed(_) => false,
        }
    }

    fn create_impl(settings: &ContextSettings, share: GLXContext, window: Option<X11WindowHandle>) -> Result<Self> {
        let display = X11OwnedDisplay::open(A::load()?, settings.display_name.as_ref().map(CString::as_c_str))?;
        let screen_num = unsafe {
            display.api().default_screen(display.as_ptr())
        };

        check_glx_version(&display)?;
        let (fbc, visual) = choose_fbconfig(&display, screen_num, settings)?;
        let drawable = create_drawable(&display, &visual, settings, window)?;

        // From now on, `drop()` releases whatever was created so far.
        let mut ctx = X11GLContext {
            display, drawable, glx_context: ptr::null_mut(), is_direct: false,
        };
        ctx.glx_context = ctx.create_glx_context(fbc, share, screen_num, &settings.context)?;

        ctx.is_direct = unsafe {
            ctx.display.api().is_direct(ctx.display.as_ptr(), ctx.glx_context)
        };
        if ctx.is_direct {
            info!("Direct GLX rendering context obtained");
        } else {
            info!("Indirect GLX rendering context obtained");
        }

        info!("Making context current");
        ctx.make_current()?;
        ctx.swap_buffers();
        Ok(ctx)
    }

    fn create_glx_context(&self, fbc: GLXFBConfig, share: GLXContext, screen_num: c_int, settings: &GLContextSettings) -> Result<GLXContext> {
        let api = self.display.api();
        let x_display = self.display.as_ptr();

        let extensions = unsafe {
            api.query_extensions_string(x_display, screen_num)
        };
        trace!("GLX extensions: {}", extensions);
        let has_create_context_attribs = glx::is_extension_supported(&extensions, glx::GLX_ARB_CREATE_CONTEXT)
            && api.has_create_context_attribs();

        // Installed until the end of this function, so that a failed attempt
        // doesn't make Xlib's default handler exit the process.
        let trap = XErrorTrap::install(api);

        let glx_context = if !has_create_context_attribs {
            info!("glXCreateContextAttribsARB() not found ... using old-style GLX context");
            unsafe {
                api.create_new_context(x_display, fbc, share)
            }
        } else {
            info!("Creating GL {} context", settings.version);
            let glx_context = unsafe {
                let glx_context = api.create_context_attribs(x_display, fbc, share, &glx::gen_arb_attribs(settings.version));
                api.sync(x_display);
                glx_context
            };
            match (trap.error(), settings.fallback_version) {
                (None, _) if !glx_context.is_null() => {
                    info!("Created GL {} context", settings.version);
                    glx_context
                },
                (_, Some(fallback)) => {
                    warn!("Failed to create GL {} context ... retrying with GL {}", settings.version, fallback);
                    if !fallback.is_at_least(GLVersion::new(3, 0)) {
                        debug!("Below 3.0, implementations return the newest version compatible with pre-3.0 OpenGL");
                    }
                    unsafe {
                        destroy_if_not_null(api, x_display, glx_context);
                    }
                    trap.clear();
                    unsafe {
                        api.create_context_attribs(x_display, fbc, share, &glx::gen_arb_attribs(fallback))
                    }
                },
                (_, None) => glx_context,
            }
        };

        unsafe {
            api.sync(x_display);
        }
        let reason = match trap.error() {
            Some(e) => Some(Cow::Owned(e.to_string())),
            None if glx_context.is_null() => Some(Cow::Borrowed("GLX returned a NULL context")),
            None => None,
        };
        if let Some(reason) = reason {
            unsafe {
                destroy_if_not_null(api, x_display, glx_context);
                api.sync(x_display);
            }
            drop(trap);
            return Err(Error::new(ErrorKind::ContextCreationFailed, reason));
        }
        Ok(glx_context)
    }
}

unsafe fn destroy_if_not_null<A: X11Api>(api: &A, x_display: *mut x::Display, glx_context: GLXContext) {
    if !glx_context.is_null() {
        api.destroy_context(x_display, glx_context);
    }
}

fn check_glx_version<A: X11Api>(display: &X11OwnedDisplay<A>) -> Result<()> {
    let (major, minor) = match unsafe { display.api().query_glx_version(display.as_ptr()) } {
        Some(version) => version,
        None => return failed(ErrorKind::UnsupportedGlxVersion, "glXQueryVersion() failed"),
    };
    // FBConfigs were added in GLX version 1.3.
    if version_cmp::lt((major, minor), (1, 3)) {
        return failed(ErrorKind::UnsupportedGlxVersion, format!("GLX {}.{} is too old, 1.3 is required", major, minor));
    }
    info!("GLX version {}.{}", major, minor);
    Ok(())
}

fn choose_fbconfig<A: X11Api>(display: &X11OwnedDisplay<A>, screen_num: c_int, settings: &ContextSettings) -> Result<(GLXFBConfig, X11Visual)> {
    let api = display.api();
    let x_display = display.as_ptr();

    info!("Getting matching framebuffer configs");
    let attribs = glx::gen_fbconfig_attribs(&settings.pixel_format);
    let fbcs = unsafe {
        api.choose_fbconfigs(x_display, screen_num, &attribs)
    };
    if fbcs.is_empty() {
        return failed(ErrorKind::NoMatchingFBConfig, "glXChooseFBConfig() found nothing");
    }
    info!("Found {} matching FB configs", fbcs.len());

    let candidates: Vec<FBConfigInfo> = fbcs.iter().enumerate().filter_map(|(index, &fbc)| unsafe {
        let visual = api.visual_from_fbconfig(x_display, fbc)?;
        let sample_buffers = api.fbconfig_attrib(x_display, fbc, GLX_SAMPLE_BUFFERS as c_int).unwrap_or(0);
        let samples = api.fbconfig_attrib(x_display, fbc, GLX_SAMPLES as c_int).unwrap_or(0);
        debug!("  Matching fbconfig {}, visual ID {:#x}: SAMPLE_BUFFERS = {}, SAMPLES = {}", index, visual.visual_id, sample_buffers, samples);
        Some(FBConfigInfo { index, visual_id: visual.visual_id, sample_buffers, samples })
    }).collect();

    let choice = match glx::choose_fbconfig(&candidates) {
        Some(choice) => choice,
        None => return failed(ErrorKind::NoMatchingFBConfig, "none of the matching FBConfigs has a visual"),
    };
    let (best, worst) = (candidates[choice.best], candidates[choice.worst]);
    debug!("Worst FBConfig is {} (visual ID {:#x}, {} samples)", worst.index, worst.visual_id, worst.samples);

    let fbc = fbcs[best.index];
    let visual = match unsafe { api.visual_from_fbconfig(x_display, fbc) } {
        Some(visual) => visual,
        None => return failed(ErrorKind::NoMatchingFBConfig, "the chosen FBConfig lost its visual"),
    };
    info!("Chosen visual ID = {:#x}", visual.visual_id);
    Ok((fbc, visual))
}

fn create_drawable<A: X11Api>(display: &X11OwnedDisplay<A>, visual: &X11Visual, settings: &ContextSettings, window: Option<X11WindowHandle>) -> Result<X11Drawable> {
    if let Some(handle) = window {
        debug!("Using caller-supplied window {:#x}", handle.xid());
        return Ok(X11Drawable::Borrowed(handle));
    }

    let title = CString::new(settings.window_title.as_str())
        .map_err(|_| Error::new(ErrorKind::InvalidArgument, "the window title contains a NUL byte"))?;

    let api = display.api();
    let x_display = display.as_ptr();
    unsafe {
        let root = api.root_window(x_display, visual.screen);
        info!("Creating colormap");
        let colormap = api.create_colormap(x_display, root, visual);
        info!("Creating window");
        let window = api.create_window(x_display, root, visual, colormap, settings.window_size);
        if window == 0 {
            api.free_colormap(x_display, colormap);
            return failed(ErrorKind::WindowCreationFailed, "XCreateWindow() returned 0");
        }
        api.store_name(x_display, window, &title);
        Ok(X11Drawable::Owned { window, colormap })
    }
}


impl<A: X11Api> GLContextMethods for X11GLContext<A> {
    type WindowHandle = X11WindowHandle;
    type Proc = X11GLProc;

    fn create(settings: &ContextSettings) -> Result<Self> {
        Self::create_impl(settings, ptr::null_mut(), None)
    }
    fn create_shared(shared: &Self, window: X11WindowHandle, settings: &ContextSettings) -> Result<Self> {
        Self::create_impl(settings, shared.glx_context, Some(window))
    }
    fn make_current(&self) -> Result<()> {
        let xid = self.drawable.xid();
        let success = unsafe {
            self.display.api().make_current(self.display.as_ptr(), xid, self.glx_context)
        };
        if !success {
            return failed(ErrorKind::MakeCurrentFailed, format!("glXMakeCurrent() failed for window {:#x}", xid));
        }
        Ok(())
    }
    fn done_current(&self) -> Result<()> {
        let success = unsafe {
            self.display.api().make_current(self.display.as_ptr(), 0, ptr::null_mut())
        };
        if !success {
            return failed(ErrorKind::MakeCurrentFailed, "glXMakeCurrent() failed to release the context");
        }
        Ok(())
    }
    fn swap_buffers(&self) {
        unsafe {
            self.display.api().swap_buffers(self.display.as_ptr(), self.drawable.xid());
        }
    }
    fn is_direct(&self) -> bool {
        self.is_direct
    }
    fn get_proc_address(&self, name: &str) -> Option<X11GLProc> {
        let name = CString::new(name).ok()?;
        unsafe {
            self.display.api().get_proc_address(&name)
        }
    }
}
