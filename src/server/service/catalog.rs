use sea_orm::ConnectionTrait;

use crate::server::{
    data::{
        brand::BrandRepository, device::DeviceRepository, group::GroupRepository,
        part::PartRepository,
    },
    error::{catalog::CatalogError, Error},
    model::db::{BrandModel, CompatGroupModel, DeviceModel, PartCategoryModel},
    normalize::{device_normalized, device_slug, normalize, slugify},
};

/// Result of an idempotent ensure: the record plus whether this call created it.
pub struct Ensured<T> {
    pub model: T,
    pub created: bool,
}

/// Metadata fields of a group mutation. `None` keeps the stored value.
#[derive(Default)]
pub struct GroupMeta {
    pub note: Option<String>,
    pub source: Option<String>,
    pub tags: Option<Vec<String>>,
    pub confidence: Option<f64>,
}

/// Write-path mutations for the whole catalog.
///
/// Generic over the connection so the same logic runs directly against the
/// pool or inside an import transaction.
pub struct CatalogService<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> CatalogService<'a, C> {
    /// Creates a new instance of [`CatalogService`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    // Brands

    /// Get-or-create a brand by name, matching on slug first then exact name
    pub async fn ensure_brand(&self, name: &str) -> Result<Ensured<BrandModel>, Error> {
        let name = required(name, "brand name")?;
        let slug = required_slug(&name, "brand name")?;

        let brand_repository = BrandRepository::new(self.db);

        if let Some(brand) = brand_repository.get_by_slug(&slug).await? {
            return Ok(Ensured {
                model: brand,
                created: false,
            });
        }

        if let Some(brand) = brand_repository.get_by_name(&name).await? {
            return Ok(Ensured {
                model: brand,
                created: false,
            });
        }

        let brand = brand_repository.create(&name, &slug).await?;

        Ok(Ensured {
            model: brand,
            created: true,
        })
    }

    /// Renames a brand, re-deriving its slug
    pub async fn update_brand(&self, id: i32, name: &str) -> Result<BrandModel, Error> {
        let name = required(name, "brand name")?;
        let slug = required_slug(&name, "brand name")?;

        let brand_repository = BrandRepository::new(self.db);

        if brand_repository.get(id).await?.is_none() {
            return Err(CatalogError::NotFound(format!("brand {id}")).into());
        }

        if let Some(other) = brand_repository.get_by_slug(&slug).await? {
            if other.id != id {
                return Err(CatalogError::Conflict(format!("slug '{slug}' is already taken")).into());
            }
        }

        Ok(brand_repository.update(id, &name, &slug).await?)
    }

    /// Resolves a brand reference given as a slug or a display name
    pub async fn resolve_brand(&self, brand_ref: &str) -> Result<BrandModel, Error> {
        let brand_repository = BrandRepository::new(self.db);

        if let Some(brand) = brand_repository.get_by_slug(&slugify(brand_ref)).await? {
            return Ok(brand);
        }

        if let Some(brand) = brand_repository.get_by_name(brand_ref.trim()).await? {
            return Ok(brand);
        }

        Err(CatalogError::NotFound(format!("brand '{}'", brand_ref.trim())).into())
    }

    /// Deletes a brand unless devices still reference it
    pub async fn delete_brand(&self, id: i32) -> Result<(), Error> {
        let brand_repository = BrandRepository::new(self.db);

        let brand = brand_repository
            .get(id)
            .await?
            .ok_or_else(|| CatalogError::NotFound(format!("brand {id}")))?;

        if brand_repository.has_devices(id).await? {
            return Err(
                CatalogError::Conflict(format!("brand '{}' still has devices", brand.name)).into(),
            );
        }

        let _ = brand_repository.delete(id).await?;

        Ok(())
    }

    // Part categories

    /// Get-or-create a part category by name
    pub async fn ensure_part(
        &self,
        name: &str,
        description: Option<&str>,
    ) -> Result<Ensured<PartCategoryModel>, Error> {
        let name = required(name, "part category name")?;
        let slug = required_slug(&name, "part category name")?;

        let part_repository = PartRepository::new(self.db);

        if let Some(part) = part_repository.get_by_slug(&slug).await? {
            return Ok(Ensured {
                model: part,
                created: false,
            });
        }

        if let Some(part) = part_repository.get_by_name(&name).await? {
            return Ok(Ensured {
                model: part,
                created: false,
            });
        }

        let part = part_repository.create(&name, &slug, description).await?;

        Ok(Ensured {
            model: part,
            created: true,
        })
    }

    /// Rewrites a part category, re-deriving its slug
    pub async fn update_part(
        &self,
        id: i32,
        name: &str,
        description: Option<&str>,
    ) -> Result<PartCategoryModel, Error> {
        let name = required(name, "part category name")?;
        let slug = required_slug(&name, "part category name")?;

        let part_repository = PartRepository::new(self.db);

        if part_repository.get(id).await?.is_none() {
            return Err(CatalogError::NotFound(format!("part category {id}")).into());
        }

        if let Some(other) = part_repository.get_by_slug(&slug).await? {
            if other.id != id {
                return Err(CatalogError::Conflict(format!("slug '{slug}' is already taken")).into());
            }
        }

        Ok(part_repository.update(id, &name, &slug, description).await?)
    }

    /// Deletes a part category unless compatibility groups still reference it
    pub async fn delete_part(&self, id: i32) -> Result<(), Error> {
        let part_repository = PartRepository::new(self.db);

        let part = part_repository
            .get(id)
            .await?
            .ok_or_else(|| CatalogError::NotFound(format!("part category {id}")))?;

        if part_repository.has_groups(id).await? {
            return Err(CatalogError::Conflict(format!(
                "part category '{}' still has compatibility groups",
                part.name
            ))
            .into());
        }

        let _ = part_repository.delete(id).await?;

        Ok(())
    }

    /// Resolves a part category reference given as a slug or a display name
    pub async fn resolve_part(&self, part_ref: &str) -> Result<PartCategoryModel, Error> {
        let part_repository = PartRepository::new(self.db);

        if let Some(part) = part_repository.get_by_slug(&slugify(part_ref)).await? {
            return Ok(part);
        }

        if let Some(part) = part_repository.get_by_name(part_ref.trim()).await? {
            return Ok(part);
        }

        Err(CatalogError::NotFound(format!("part category '{}'", part_ref.trim())).into())
    }

    // Devices

    /// Get-or-create a device under a brand, creating the brand as needed
    ///
    /// Matches existing devices on the slug derived from brand and model name.
    /// When the device already exists the alias spellings are merged into its
    /// stored set instead of replacing it.
    pub async fn ensure_device(
        &self,
        brand_ref: &str,
        name: &str,
        aliases: &[String],
    ) -> Result<Ensured<DeviceModel>, Error> {
        let name = required(name, "device name")?;
        let brand = self.ensure_brand(brand_ref).await?.model;

        let slug = device_slug(&brand.name, &name);
        let normalized = device_normalized(&brand.name, &name);

        if normalized.is_empty() {
            return Err(CatalogError::Validation(
                "device name must contain at least one letter or digit".to_string(),
            )
            .into());
        }

        let device_repository = DeviceRepository::new(self.db);

        if let Some(device) = device_repository.get_by_slug(&slug).await? {
            self.merge_aliases(device.id, aliases).await?;

            return Ok(Ensured {
                model: device,
                created: false,
            });
        }

        let device = device_repository
            .create(brand.id, &name, &slug, &normalized)
            .await?;

        self.merge_aliases(device.id, aliases).await?;

        Ok(Ensured {
            model: device,
            created: true,
        })
    }

    /// Rewrites a device, re-deriving slug and normal form
    ///
    /// `brand_ref` and `name` keep their stored values when `None`. A `Some`
    /// alias list replaces the stored set; `None` leaves it alone.
    pub async fn update_device(
        &self,
        id: i32,
        brand_ref: Option<&str>,
        name: Option<&str>,
        aliases: Option<&[String]>,
    ) -> Result<DeviceModel, Error> {
        let device_repository = DeviceRepository::new(self.db);

        let device = device_repository
            .get(id)
            .await?
            .ok_or_else(|| CatalogError::NotFound(format!("device {id}")))?;

        let brand = match brand_ref {
            Some(brand_ref) => self.ensure_brand(brand_ref).await?.model,
            None => BrandRepository::new(self.db)
                .get(device.brand_id)
                .await?
                .ok_or_else(|| CatalogError::NotFound(format!("brand {}", device.brand_id)))?,
        };

        let name = match name {
            Some(name) => required(name, "device name")?,
            None => device.name.clone(),
        };

        let slug = device_slug(&brand.name, &name);
        let normalized = device_normalized(&brand.name, &name);

        if normalized.is_empty() {
            return Err(CatalogError::Validation(
                "device name must contain at least one letter or digit".to_string(),
            )
            .into());
        }

        if let Some(other) = device_repository.get_by_slug(&slug).await? {
            if other.id != id {
                return Err(CatalogError::Conflict(format!("slug '{slug}' is already taken")).into());
            }
        }

        let device = device_repository
            .update(id, brand.id, &name, &slug, &normalized)
            .await?;

        if let Some(aliases) = aliases {
            let pairs = alias_pairs(aliases);
            device_repository.replace_aliases(id, &pairs).await?;
        }

        Ok(device)
    }

    /// Appends one alias spelling to a device, identified by slug
    pub async fn add_alias(&self, slug: &str, alias: &str) -> Result<DeviceModel, Error> {
        let device_repository = DeviceRepository::new(self.db);

        let device = device_repository
            .get_by_slug(slug)
            .await?
            .ok_or_else(|| CatalogError::NotFound(format!("device '{slug}'")))?;

        let normalized = normalize(alias);

        if normalized.is_empty() {
            return Err(CatalogError::Validation(
                "alias must contain at least one letter or digit".to_string(),
            )
            .into());
        }

        let _ = device_repository
            .add_alias(device.id, alias.trim(), &normalized)
            .await?;

        Ok(device)
    }

    /// Deletes a device unless it is still a member of any compatibility group
    pub async fn delete_device(&self, id: i32) -> Result<(), Error> {
        let device_repository = DeviceRepository::new(self.db);

        let device = device_repository
            .get(id)
            .await?
            .ok_or_else(|| CatalogError::NotFound(format!("device {id}")))?;

        if device_repository.membership_count(id).await? > 0 {
            return Err(CatalogError::Conflict(format!(
                "device '{}' still belongs to compatibility groups",
                device.slug
            ))
            .into());
        }

        device_repository.delete(id).await?;

        Ok(())
    }

    // Compatibility groups

    /// Creates a compatibility group, or revisits the existing one
    ///
    /// A group is identified by its part and its member set; creating the same
    /// set again updates the existing group's metadata instead of inserting a
    /// second record. Members are device slugs and must all resolve.
    pub async fn create_group(
        &self,
        part_ref: &str,
        member_refs: &[String],
        meta: GroupMeta,
    ) -> Result<Ensured<CompatGroupModel>, Error> {
        let part = self.resolve_part(part_ref).await?;
        let member_ids = self.resolve_members(member_refs).await?;
        let key = members_key(&member_ids);

        let group_repository = GroupRepository::new(self.db);

        if let Some(existing) = group_repository.get_by_part_and_key(part.id, &key).await? {
            let group = self.apply_meta(&existing, meta).await?;

            return Ok(Ensured {
                model: group,
                created: false,
            });
        }

        let note = meta.note.as_deref().and_then(blank_to_none);
        let source = meta.source.as_deref().and_then(blank_to_none);
        let tags = join_tags(meta.tags.as_deref().unwrap_or(&[]));

        let group = group_repository
            .create(
                part.id,
                &key,
                &member_ids,
                note.as_deref(),
                source.as_deref(),
                tags.as_deref(),
                meta.confidence.unwrap_or(1.0),
            )
            .await?;

        Ok(Ensured {
            model: group,
            created: true,
        })
    }

    /// Rewrites a group's member set and/or metadata
    pub async fn update_group(
        &self,
        id: i32,
        member_refs: Option<&[String]>,
        meta: GroupMeta,
    ) -> Result<CompatGroupModel, Error> {
        let group_repository = GroupRepository::new(self.db);

        let group = group_repository
            .get(id)
            .await?
            .ok_or_else(|| CatalogError::NotFound(format!("compatibility group {id}")))?;

        if let Some(member_refs) = member_refs {
            let member_ids = self.resolve_members(member_refs).await?;
            let key = members_key(&member_ids);

            if let Some(other) = group_repository
                .get_by_part_and_key(group.part_id, &key)
                .await?
            {
                if other.id != id {
                    return Err(CatalogError::Conflict(
                        "another group already covers those members".to_string(),
                    )
                    .into());
                }
            }

            group_repository
                .replace_members(id, &key, &member_ids)
                .await?;
        }

        self.apply_meta(&group, meta).await
    }

    /// Deletes a group by id
    pub async fn delete_group(&self, id: i32) -> Result<(), Error> {
        let group_repository = GroupRepository::new(self.db);

        if group_repository.get(id).await?.is_none() {
            return Err(CatalogError::NotFound(format!("compatibility group {id}")).into());
        }

        group_repository.delete(id).await?;

        Ok(())
    }

    /// Deletes the group matching this exact member set under the part
    pub async fn delete_group_by_members(
        &self,
        part_ref: &str,
        member_refs: &[String],
    ) -> Result<(), Error> {
        let part = self.resolve_part(part_ref).await?;
        let member_ids = self.resolve_members(member_refs).await?;
        let key = members_key(&member_ids);

        let group_repository = GroupRepository::new(self.db);

        let group = group_repository
            .get_by_part_and_key(part.id, &key)
            .await?
            .ok_or_else(|| {
                CatalogError::NotFound(format!(
                    "compatibility group for '{}' with those members",
                    part.slug
                ))
            })?;

        group_repository.delete(group.id).await?;

        Ok(())
    }

    /// Member device slugs to distinct ids, sorted ascending
    async fn resolve_members(&self, member_refs: &[String]) -> Result<Vec<i32>, Error> {
        let mut wanted: Vec<String> = member_refs
            .iter()
            .map(|slug| slug.trim().to_string())
            .filter(|slug| !slug.is_empty())
            .collect();
        wanted.sort_unstable();
        wanted.dedup();

        if wanted.is_empty() {
            return Err(CatalogError::Validation(
                "at least one member device is required".to_string(),
            )
            .into());
        }

        let devices = DeviceRepository::new(self.db).get_by_slugs(&wanted).await?;

        let missing: Vec<&str> = wanted
            .iter()
            .filter(|slug| !devices.iter().any(|device| &device.slug == *slug))
            .map(String::as_str)
            .collect();

        if !missing.is_empty() {
            return Err(CatalogError::Validation(format!(
                "unknown member devices: {}",
                missing.join(", ")
            ))
            .into());
        }

        let mut ids: Vec<i32> = devices.iter().map(|device| device.id).collect();
        ids.sort_unstable();
        ids.dedup();

        Ok(ids)
    }

    /// Overwrites the metadata fields that were provided, keeping the rest
    async fn apply_meta(
        &self,
        group: &CompatGroupModel,
        meta: GroupMeta,
    ) -> Result<CompatGroupModel, Error> {
        let note = match &meta.note {
            Some(note) => blank_to_none(note),
            None => group.note.clone(),
        };
        let source = match &meta.source {
            Some(source) => blank_to_none(source),
            None => group.source.clone(),
        };
        let tags = match &meta.tags {
            Some(tags) => join_tags(tags),
            None => group.tags.clone(),
        };
        let confidence = meta.confidence.unwrap_or(group.confidence);

        let group = GroupRepository::new(self.db)
            .update_metadata(
                group.id,
                note.as_deref(),
                source.as_deref(),
                tags.as_deref(),
                confidence,
            )
            .await?;

        Ok(group)
    }

    async fn merge_aliases(&self, device_id: i32, aliases: &[String]) -> Result<(), Error> {
        let device_repository = DeviceRepository::new(self.db);

        for alias in aliases {
            let normalized = normalize(alias);

            if normalized.is_empty() {
                continue;
            }

            let _ = device_repository
                .add_alias(device_id, alias.trim(), &normalized)
                .await?;
        }

        Ok(())
    }
}

/// Sorted distinct member ids joined with `-`; the group identity per part
pub fn members_key(member_ids: &[i32]) -> String {
    member_ids
        .iter()
        .map(|id| id.to_string())
        .collect::<Vec<String>>()
        .join("-")
}

fn required(value: &str, field: &str) -> Result<String, Error> {
    let value = value.trim();

    if value.is_empty() {
        return Err(CatalogError::Validation(format!("{field} is required")).into());
    }

    Ok(value.to_string())
}

fn required_slug(name: &str, field: &str) -> Result<String, Error> {
    let slug = slugify(name);

    if slug.is_empty() {
        return Err(CatalogError::Validation(format!(
            "{field} must contain at least one letter or digit"
        ))
        .into());
    }

    Ok(slug)
}

fn blank_to_none(value: &str) -> Option<String> {
    let value = value.trim();

    if value.is_empty() {
        return None;
    }

    Some(value.to_string())
}

fn join_tags(tags: &[String]) -> Option<String> {
    let cleaned: Vec<String> = tags
        .iter()
        .map(|tag| tag.trim().to_string())
        .filter(|tag| !tag.is_empty())
        .collect();

    if cleaned.is_empty() {
        return None;
    }

    Some(cleaned.join(","))
}

fn alias_pairs(aliases: &[String]) -> Vec<(String, String)> {
    aliases
        .iter()
        .map(|alias| (alias.trim().to_string(), normalize(alias)))
        .filter(|(_, normalized)| !normalized.is_empty())
        .collect()
}
