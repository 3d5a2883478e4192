//! Rust bindings for libxdo2 (X11 keyboard/mouse simulation and window
//! manipulation).
//!
//! The raw C surface lives in [`ffi`]; everything else goes through [`Xdo`],
//! an owned session handle that frees the underlying `xdo_t` on drop:
//!
//! ```no_run
//! use xdo::{Window, Xdo, DEFAULT_KEY_DELAY};
//!
//! let xdo = Xdo::new()?;
//! xdo.enter_text(Window::CURRENT, "hello", DEFAULT_KEY_DELAY)?;
//! xdo.send_keysequence(Window::CURRENT, "ctrl+Return", DEFAULT_KEY_DELAY)?;
//! # Ok::<(), xdo::XdoError>(())
//! ```

pub mod ffi;

mod error;

pub use error::{Result, XdoError};

use std::ffi::{CStr, CString};
use std::fmt;
use std::os::raw::c_int;
use std::time::Duration;

use tracing::debug;

/// Per-keystroke delay libxdo tooling conventionally uses (12 ms).
pub const DEFAULT_KEY_DELAY: Duration = Duration::from_micros(12_000);

/// An X11 window identifier.
///
/// `Window::CURRENT` targets whichever window currently has input focus,
/// matching libxdo's `CURRENTWINDOW`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Window(pub u64);

impl Window {
    pub const CURRENT: Window = Window(ffi::CURRENTWINDOW as u64);

    fn raw(self) -> ffi::XWindow {
        self.0 as ffi::XWindow
    }
}

impl From<u64> for Window {
    fn from(id: u64) -> Self {
        Window(id)
    }
}

impl fmt::Display for Window {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:x}", self.0)
    }
}

/// A pointer button, in X11 numbering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    Left,
    Middle,
    Right,
    ScrollUp,
    ScrollDown,
    /// Any other X button code (side buttons etc).
    Other(i32),
}

impl Button {
    /// The raw X11 button number.
    pub fn code(self) -> i32 {
        match self {
            Button::Left => 1,
            Button::Middle => 2,
            Button::Right => 3,
            Button::ScrollUp => 4,
            Button::ScrollDown => 5,
            Button::Other(code) => code,
        }
    }

    pub fn from_code(code: i32) -> Button {
        match code {
            1 => Button::Left,
            2 => Button::Middle,
            3 => Button::Right,
            4 => Button::ScrollUp,
            5 => Button::ScrollDown,
            other => Button::Other(other),
        }
    }
}

/// Where the pointer is, as reported by the X server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MouseLocation {
    pub x: i32,
    pub y: i32,
    pub screen: i32,
}

/// The libxdo version string, e.g. `"2.20100701.2961"`.
pub fn version() -> String {
    let ptr = unsafe { ffi::xdo_version() };
    if ptr.is_null() {
        return String::new();
    }
    unsafe { CStr::from_ptr(ptr) }.to_string_lossy().into_owned()
}

/// An open libxdo session, bound to one X display connection.
///
/// Holds a raw `xdo_t` pointer and is therefore neither `Send` nor `Sync`;
/// the Xlib connection underneath is not thread-safe.
pub struct Xdo {
    handle: *mut ffi::xdo_t,
}

impl Xdo {
    /// Connects to the display named by `$DISPLAY`.
    pub fn new() -> Result<Self> {
        Self::open(None)
    }

    /// Connects to an explicitly named display, e.g. `":1"`.
    pub fn with_display(display: &str) -> Result<Self> {
        Self::open(Some(display))
    }

    fn open(display: Option<&str>) -> Result<Self> {
        let c_display = match display {
            Some(name) => Some(CString::new(name)?),
            None => None,
        };
        let ptr = c_display
            .as_ref()
            .map_or(std::ptr::null(), |name| name.as_ptr());

        let handle = unsafe { ffi::xdo_new(ptr) };
        if handle.is_null() {
            return Err(XdoError::OpenDisplay {
                display: display.map(str::to_owned),
            });
        }
        let display_name = display.unwrap_or("$DISPLAY");
        debug!(display = display_name, "opened libxdo session");
        Ok(Xdo { handle })
    }

    // -- mouse ------------------------------------------------------------

    /// Moves the pointer to absolute coordinates on the given screen.
    pub fn move_mouse(&self, x: i32, y: i32, screen: i32) -> Result<()> {
        check(
            unsafe { ffi::xdo_mousemove(self.handle, x, y, screen) },
            "xdo_mousemove",
        )
    }

    /// Moves the pointer to coordinates relative to a window's origin.
    pub fn move_mouse_relative_to_window(&self, window: Window, x: i32, y: i32) -> Result<()> {
        check(
            unsafe { ffi::xdo_mousemove_relative_to_window(self.handle, window.raw(), x, y) },
            "xdo_mousemove_relative_to_window",
        )
    }

    /// Moves the pointer relative to its current position.
    pub fn move_mouse_relative(&self, dx: i32, dy: i32) -> Result<()> {
        check(
            unsafe { ffi::xdo_mousemove_relative(self.handle, dx, dy) },
            "xdo_mousemove_relative",
        )
    }

    pub fn mouse_down(&self, window: Window, button: Button) -> Result<()> {
        check(
            unsafe { ffi::xdo_mousedown(self.handle, window.raw(), button.code()) },
            "xdo_mousedown",
        )
    }

    pub fn mouse_up(&self, window: Window, button: Button) -> Result<()> {
        check(
            unsafe { ffi::xdo_mouseup(self.handle, window.raw(), button.code()) },
            "xdo_mouseup",
        )
    }

    /// Presses and releases a button at the current pointer position.
    pub fn click(&self, window: Window, button: Button) -> Result<()> {
        check(
            unsafe { ffi::xdo_click(self.handle, window.raw(), button.code()) },
            "xdo_click",
        )
    }

    /// Current pointer coordinates and the screen they are on.
    pub fn mouse_location(&self) -> Result<MouseLocation> {
        let mut x: c_int = 0;
        let mut y: c_int = 0;
        let mut screen: c_int = 0;
        check(
            unsafe { ffi::xdo_mouselocation(self.handle, &mut x, &mut y, &mut screen) },
            "xdo_mouselocation",
        )?;
        Ok(MouseLocation { x, y, screen })
    }

    // -- keyboard ---------------------------------------------------------

    /// Types a string into a window, pausing `delay` between keystrokes.
    pub fn enter_text(&self, window: Window, text: &str, delay: Duration) -> Result<()> {
        let text = CString::new(text)?;
        check(
            unsafe { ffi::xdo_type(self.handle, window.raw(), text.as_ptr(), micros(delay)) },
            "xdo_type",
        )
    }

    /// Presses and releases a key sequence: X11 KeySym names joined by `+`,
    /// e.g. `"ctrl+alt+t"` or `"Return"`.
    pub fn send_keysequence(&self, window: Window, sequence: &str, delay: Duration) -> Result<()> {
        let sequence = CString::new(sequence)?;
        check(
            unsafe {
                ffi::xdo_keysequence(self.handle, window.raw(), sequence.as_ptr(), micros(delay))
            },
            "xdo_keysequence",
        )
    }

    /// Presses (and holds) a key sequence.
    pub fn send_keysequence_down(
        &self,
        window: Window,
        sequence: &str,
        delay: Duration,
    ) -> Result<()> {
        let sequence = CString::new(sequence)?;
        check(
            unsafe {
                ffi::xdo_keysequence_down(
                    self.handle,
                    window.raw(),
                    sequence.as_ptr(),
                    micros(delay),
                )
            },
            "xdo_keysequence_down",
        )
    }

    /// Releases a previously held key sequence.
    pub fn send_keysequence_up(
        &self,
        window: Window,
        sequence: &str,
        delay: Duration,
    ) -> Result<()> {
        let sequence = CString::new(sequence)?;
        check(
            unsafe {
                ffi::xdo_keysequence_up(self.handle, window.raw(), sequence.as_ptr(), micros(delay))
            },
            "xdo_keysequence_up",
        )
    }

    // -- windows ----------------------------------------------------------

    /// Moves a window's top-left corner to `(x, y)`.
    pub fn move_window(&self, window: Window, x: i32, y: i32) -> Result<()> {
        check(
            unsafe { ffi::xdo_window_move(self.handle, window.raw(), x, y) },
            "xdo_window_move",
        )
    }

    /// Resizes a window, in pixels.
    pub fn set_window_size(&self, window: Window, width: i32, height: i32) -> Result<()> {
        check(
            unsafe { ffi::xdo_window_setsize(self.handle, window.raw(), width, height, 0) },
            "xdo_window_setsize",
        )
    }

    /// Gives a window input focus.
    pub fn focus_window(&self, window: Window) -> Result<()> {
        check(
            unsafe { ffi::xdo_window_focus(self.handle, window.raw()) },
            "xdo_window_focus",
        )
    }

    /// Raises a window to the top of the stacking order.
    pub fn raise_window(&self, window: Window) -> Result<()> {
        check(
            unsafe { ffi::xdo_window_raise(self.handle, window.raw()) },
            "xdo_window_raise",
        )
    }

    /// Activates a window: switches to its desktop, raises it, focuses it.
    /// Requires a window manager that supports the EWMH `_NET_ACTIVE_WINDOW`
    /// hint; plain [`Xdo::focus_window`] works everywhere.
    pub fn activate_window(&self, window: Window) -> Result<()> {
        check(
            unsafe { ffi::xdo_window_activate(self.handle, window.raw()) },
            "xdo_window_activate",
        )
    }
}

impl Drop for Xdo {
    fn drop(&mut self) {
        debug!("closing libxdo session");
        unsafe { ffi::xdo_free(self.handle) };
    }
}

impl fmt::Debug for Xdo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Xdo({:p})", self.handle)
    }
}

fn check(status: c_int, call: &'static str) -> Result<()> {
    if status == ffi::XDO_SUCCESS {
        Ok(())
    } else {
        Err(XdoError::Call { call, status })
    }
}

fn micros(delay: Duration) -> ffi::useconds_t {
    ffi::useconds_t::try_from(delay.as_micros()).unwrap_or(ffi::useconds_t::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn button_codes_match_x11_numbering() {
        assert_eq!(Button::Left.code(), 1);
        assert_eq!(Button::Middle.code(), 2);
        assert_eq!(Button::Right.code(), 3);
        assert_eq!(Button::ScrollUp.code(), 4);
        assert_eq!(Button::ScrollDown.code(), 5);
        assert_eq!(Button::Other(8).code(), 8);
    }

    #[test]
    fn button_round_trips_through_raw_code() {
        for code in 1..=9 {
            assert_eq!(Button::from_code(code).code(), code);
        }
        assert_eq!(Button::from_code(3), Button::Right);
        assert_eq!(Button::from_code(9), Button::Other(9));
    }

    #[test]
    fn current_window_is_the_libxdo_sentinel() {
        assert_eq!(Window::CURRENT, Window(0));
        assert_eq!(Window::CURRENT.raw(), ffi::CURRENTWINDOW);
    }

    #[test]
    fn window_displays_as_hex() {
        assert_eq!(Window(0x3c0000a).to_string(), "0x3c0000a");
    }

    #[test]
    fn default_key_delay_is_twelve_ms() {
        assert_eq!(micros(DEFAULT_KEY_DELAY), 12_000);
    }

    #[test]
    fn oversized_delay_saturates() {
        assert_eq!(micros(Duration::from_secs(100_000)), ffi::useconds_t::MAX);
    }

    #[test]
    fn interior_nul_is_rejected_not_panicked() {
        // CString::new is the only fallible step before the FFI call; make
        // sure it surfaces as our error type.
        let err = std::ffi::CString::new("a\0b").unwrap_err();
        let err: XdoError = err.into();
        assert!(matches!(err, XdoError::Nul(_)));
        assert!(err.to_string().contains("NUL"));
    }

    #[test]
    fn call_errors_name_the_failing_function() {
        let err = check(1, "xdo_click").unwrap_err();
        assert_eq!(err.to_string(), "xdo_click failed with status 1");
    }
}
