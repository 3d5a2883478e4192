//! Raw `extern "C"` declarations for libxdo2.
//!
//! Signatures follow `xdo.h` from the 2.x series. Every status-returning
//! call uses the libxdo convention: 0 is success, anything else is failure.
//! Nothing here validates arguments; the safe layer in the crate root does.

use std::os::raw::{c_char, c_int, c_uint, c_ulong};

/// X11 window identifier, as X defines it.
pub type XWindow = c_ulong;

/// Per-keystroke delay, in microseconds.
#[allow(non_camel_case_types)]
pub type useconds_t = c_uint;

/// Opaque libxdo session. Allocated by `xdo_new`, released by `xdo_free`.
#[allow(non_camel_case_types)]
#[repr(C)]
pub struct xdo_t {
    _opaque: [u8; 0],
}

/// Status value libxdo returns on success.
pub const XDO_SUCCESS: c_int = 0;

/// Window argument meaning "the currently focused window".
pub const CURRENTWINDOW: XWindow = 0;

extern "C" {
    pub fn xdo_new(display: *const c_char) -> *mut xdo_t;
    pub fn xdo_free(xdo: *mut xdo_t);
    pub fn xdo_version() -> *const c_char;

    pub fn xdo_mousemove(xdo: *const xdo_t, x: c_int, y: c_int, screen: c_int) -> c_int;
    pub fn xdo_mousemove_relative_to_window(
        xdo: *const xdo_t,
        window: XWindow,
        x: c_int,
        y: c_int,
    ) -> c_int;
    pub fn xdo_mousemove_relative(xdo: *const xdo_t, x: c_int, y: c_int) -> c_int;
    pub fn xdo_mousedown(xdo: *const xdo_t, window: XWindow, button: c_int) -> c_int;
    pub fn xdo_mouseup(xdo: *const xdo_t, window: XWindow, button: c_int) -> c_int;
    pub fn xdo_mouselocation(
        xdo: *const xdo_t,
        x: *mut c_int,
        y: *mut c_int,
        screen: *mut c_int,
    ) -> c_int;
    pub fn xdo_click(xdo: *const xdo_t, window: XWindow, button: c_int) -> c_int;

    pub fn xdo_type(
        xdo: *const xdo_t,
        window: XWindow,
        string: *const c_char,
        delay: useconds_t,
    ) -> c_int;
    pub fn xdo_keysequence(
        xdo: *const xdo_t,
        window: XWindow,
        keysequence: *const c_char,
        delay: useconds_t,
    ) -> c_int;
    pub fn xdo_keysequence_down(
        xdo: *const xdo_t,
        window: XWindow,
        keysequence: *const c_char,
        delay: useconds_t,
    ) -> c_int;
    pub fn xdo_keysequence_up(
        xdo: *const xdo_t,
        window: XWindow,
        keysequence: *const c_char,
        delay: useconds_t,
    ) -> c_int;

    pub fn xdo_window_move(xdo: *const xdo_t, window: XWindow, x: c_int, y: c_int) -> c_int;
    pub fn xdo_window_setsize(
        xdo: *const xdo_t,
        window: XWindow,
        width: c_int,
        height: c_int,
        flags: c_int,
    ) -> c_int;
    pub fn xdo_window_focus(xdo: *const xdo_t, window: XWindow) -> c_int;
    pub fn xdo_window_raise(xdo: *const xdo_t, window: XWindow) -> c_int;
    pub fn xdo_window_activate(xdo: *const xdo_t, window: XWindow) -> c_int;
}
