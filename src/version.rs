//! Version queries against the loaded libmongoc.

use std::ffi::CStr;

use mongoc_sys as sys;

/// Runtime version string of the loaded library, e.g. `"1.27.2"`.
pub fn version() -> String {
    // mongoc_get_version returns a pointer to a static string.
    unsafe { CStr::from_ptr(sys::mongoc_get_version()) }
        .to_string_lossy()
        .into_owned()
}

/// True when the loaded library is at least `major.minor.micro`.
pub fn check_version(major: i32, minor: i32, micro: i32) -> bool {
    unsafe { sys::mongoc_check_version(major, minor, micro) }
}

/// The `MONGOC_MAJOR_VERSION` the library was compiled with.
pub fn major_version() -> i32 {
    unsafe { sys::mongoc_get_major_version() }
}

/// The `MONGOC_MINOR_VERSION` the library was compiled with.
pub fn minor_version() -> i32 {
    unsafe { sys::mongoc_get_minor_version() }
}

/// The `MONGOC_MICRO_VERSION` the library was compiled with.
pub fn micro_version() -> i32 {
    unsafe { sys::mongoc_get_micro_version() }
}
