//! Observational GL error checks.
//!
//! Draw-time GL errors never abort the call in progress; they are logged with
//! the operation name and numeric code so a misbehaving driver can be
//! diagnosed. The checks compile to nothing outside debug builds.

/// Log (non-fatally) any pending GL error, tagged with the operation name.
#[cfg(debug_assertions)]
pub(crate) fn check_gl_error(op: &str) {
    let code = unsafe { gl::GetError() };
    if code != gl::NO_ERROR {
        tracing::error!(op, code, "GL error");
    }
}

#[cfg(not(debug_assertions))]
#[inline(always)]
pub(crate) fn check_gl_error(_op: &str) {}

/// Drain the GL error queue so later checks report fresh errors only.
pub(crate) fn clear_gl_errors() {
    unsafe {
        while gl::GetError() != gl::NO_ERROR {}
    }
}
