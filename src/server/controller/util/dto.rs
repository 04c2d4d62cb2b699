use sea_orm::{DatabaseConnection, DbErr};

use crate::{
    model::catalog::{BrandDto, DeviceDto, GroupDto, PartCategoryDto},
    server::{
        data::{brand::BrandRepository, device::DeviceRepository},
        error::Error,
        model::db::{BrandModel, DeviceModel, PartCategoryModel},
        service::{compat::GroupView, resolver::ResolvedDevice},
    },
};

pub fn brand_dto(brand: &BrandModel) -> BrandDto {
    BrandDto {
        id: brand.id,
        name: brand.name.clone(),
        slug: brand.slug.clone(),
    }
}

pub fn part_dto(part: &PartCategoryModel) -> PartCategoryDto {
    PartCategoryDto {
        id: part.id,
        name: part.name.clone(),
        slug: part.slug.clone(),
        description: part.description.clone(),
    }
}

pub fn device_dto(device: &DeviceModel, brand: &BrandModel, aliases: Vec<String>) -> DeviceDto {
    DeviceDto {
        id: device.id,
        name: device.name.clone(),
        slug: device.slug.clone(),
        normalized: device.normalized.clone(),
        brand: brand_dto(brand),
        aliases,
    }
}

pub fn resolved_dto(resolved: &ResolvedDevice) -> DeviceDto {
    device_dto(&resolved.device, &resolved.brand, resolved.aliases.clone())
}

pub fn group_dto(view: &GroupView) -> GroupDto {
    GroupDto {
        id: view.group.id,
        part: part_dto(&view.part),
        members: view
            .members
            .iter()
            .map(|member| device_dto(&member.device, &member.brand, member.aliases.clone()))
            .collect(),
        note: view.group.note.clone(),
        source: view.group.source.clone(),
        tags: split_tags(view.group.tags.as_deref()),
        confidence: view.group.confidence,
    }
}

/// Splits the stored comma-joined tag column into a list
pub fn split_tags(tags: Option<&str>) -> Vec<String> {
    tags.unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}

/// Loads the brand and alias rows a bare device row needs to present itself
pub async fn load_device_dto(
    db: &DatabaseConnection,
    device: &DeviceModel,
) -> Result<DeviceDto, Error> {
    let brand = BrandRepository::new(db)
        .get(device.brand_id)
        .await?
        .ok_or_else(|| {
            DbErr::RecordNotFound(format!("brand {} of device {}", device.brand_id, device.id))
        })?;

    let aliases = DeviceRepository::new(db)
        .aliases_for(device.id)
        .await?
        .into_iter()
        .map(|alias| alias.label)
        .collect();

    Ok(device_dto(device, &brand, aliases))
}
