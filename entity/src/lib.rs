pub mod prelude;

pub mod brand;
pub mod compat_group;
pub mod compat_group_member;
pub mod device;
pub mod device_alias;
pub mod part_category;
