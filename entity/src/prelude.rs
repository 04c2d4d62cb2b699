pub use super::brand::Entity as Brand;
pub use super::compat_group::Entity as CompatGroup;
pub use super::compat_group_member::Entity as CompatGroupMember;
pub use super::device::Entity as Device;
pub use super::device_alias::Entity as DeviceAlias;
pub use super::part_category::Entity as PartCategory;
