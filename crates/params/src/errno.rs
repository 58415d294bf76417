//! errno values reported by speculation-control hooks

/// Operation not permitted
pub const EPERM: i32 = 1;

/// No such device or address
pub const ENXIO: i32 = 6;

/// No such device
pub const ENODEV: i32 = 19;

/// Invalid argument
pub const EINVAL: i32 = 22;

/// Result out of range
pub const ERANGE: i32 = 34;
