//! Local mirror of the SeAT role directory.
//!
//! Roles and memberships are written only by the role sync task; permissions are assigned by
//! administrators and reference the mirrored roles by record ID.

pub mod role;
pub mod role_permission;
pub mod role_user;
