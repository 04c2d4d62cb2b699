//! Database model type aliases for test utilities.
//!
//! Convenient aliases for the SeaORM entity models used throughout the test
//! utilities, matching the aliases tests use in the main fitment crate.

/// Type alias for the brand database model.
pub type BrandModel = entity::brand::Model;

/// Type alias for the device database model.
pub type DeviceModel = entity::device::Model;

/// Type alias for the device alias database model.
pub type DeviceAliasModel = entity::device_alias::Model;

/// Type alias for the part category database model.
pub type PartCategoryModel = entity::part_category::Model;

/// Type alias for the compatibility group database model.
pub type CompatGroupModel = entity::compat_group::Model;

/// Type alias for the compatibility group membership database model.
pub type CompatGroupMemberModel = entity::compat_group_member::Model;
