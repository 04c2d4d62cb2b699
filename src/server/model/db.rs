//! Database model type aliases.
//!
//! This module provides convenient type aliases for SeaORM database entity models used
//! throughout the application. These aliases simplify type signatures and provide a single
//! point of reference for database model types, making it easier to work with entities
//! without importing from the generated `entity` crate directly.

/// Type alias for device brand database model.
///
/// Represents a phone manufacturer such as Realme or Oppo. Devices always
/// belong to exactly one brand.
///
/// # Fields (from `entity::brand::Model`)
/// - `id` - Primary key, unique brand identifier
/// - `name` - Display name of the brand
/// - `slug` - URL-safe unique identifier derived from the name
/// - `created_at` - Timestamp when the brand was created
/// - `updated_at` - Timestamp of the last brand record update
pub type BrandModel = entity::brand::Model;

/// Type alias for device database model.
///
/// Represents a phone model in the catalog. The `normalized` column holds the
/// canonical lowercase form of `{brand} {name}` that all lookups compare
/// against, and `slug` is its hyphenated twin used in URLs.
///
/// # Fields (from `entity::device::Model`)
/// - `id` - Primary key, unique device identifier
/// - `brand_id` - Foreign key to the owning brand
/// - `name` - Display name of the model, without the brand
/// - `slug` - URL-safe unique identifier, brand included
/// - `normalized` - Canonical lowercase form used for matching
/// - `created_at` - Timestamp when the device was created
/// - `updated_at` - Timestamp of the last device record update
pub type DeviceModel = entity::device::Model;

/// Type alias for device alias database model.
///
/// Represents an alternate spelling or market name for a device, such as a
/// regional model number. Aliases participate in lookups through their own
/// normal form.
///
/// # Fields (from `entity::device_alias::Model`)
/// - `id` - Primary key, unique alias identifier
/// - `device_id` - Foreign key to the aliased device
/// - `label` - Alias text as entered
/// - `normalized` - Canonical lowercase form used for matching
pub type DeviceAliasModel = entity::device_alias::Model;

/// Type alias for part category database model.
///
/// Represents a class of replacement part, such as a display frame or
/// battery. Compatibility groups are always scoped to a part category.
///
/// # Fields (from `entity::part_category::Model`)
/// - `id` - Primary key, unique part category identifier
/// - `name` - Display name of the part category
/// - `slug` - URL-safe unique identifier derived from the name
/// - `description` - Optional free-form description
/// - `created_at` - Timestamp when the part category was created
/// - `updated_at` - Timestamp of the last part category record update
pub type PartCategoryModel = entity::part_category::Model;

/// Type alias for compatibility group database model.
///
/// Represents a set of devices that share an interchangeable part. The
/// `members_key` column is the sorted member device ids joined with `-` and is
/// unique per part, so a member set exists at most once per part category.
///
/// # Fields (from `entity::compat_group::Model`)
/// - `id` - Primary key, unique group identifier
/// - `part_id` - Foreign key to the part category the group is scoped to
/// - `members_key` - Sorted member device ids joined with `-`
/// - `note` - Optional free-form note about the group
/// - `source` - Optional provenance of the compatibility claim
/// - `tags` - Optional comma-joined tag list
/// - `confidence` - Confidence in the claim, `0.0` to `1.0`
/// - `created_at` - Timestamp when the group was created
/// - `updated_at` - Timestamp of the last group record update
pub type CompatGroupModel = entity::compat_group::Model;

/// Type alias for compatibility group membership database model.
///
/// Represents one device belonging to one compatibility group. The primary
/// key is the `(group_id, device_id)` pair.
///
/// # Fields (from `entity::compat_group_member::Model`)
/// - `group_id` - Foreign key to the group
/// - `device_id` - Foreign key to the member device
pub type CompatGroupMemberModel = entity::compat_group_member::Model;
