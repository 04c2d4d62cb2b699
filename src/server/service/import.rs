use sea_orm::{ConnectionTrait, DatabaseConnection, DbErr, TransactionTrait};

use crate::{
    model::import::{ImportRowErrorDto, ImportSummaryDto},
    server::{
        data::{
            brand::BrandRepository, device::DeviceRepository, group::GroupRepository,
            part::PartRepository,
        },
        error::{catalog::CatalogError, import::ImportError, Error},
        model::import::{
            BrandRow, DeviceRow, GroupRow, ImportBatch, PartRow, RowAction,
        },
        normalize::device_slug,
        service::{
            catalog::{members_key, CatalogService, GroupMeta},
            workbook,
        },
    },
};

pub struct ImportService<'a> {
    db: &'a DatabaseConnection,
    transactions: bool,
}

impl<'a> ImportService<'a> {
    /// Creates a new instance of [`ImportService`]
    pub fn new(db: &'a DatabaseConnection, transactions: bool) -> Self {
        Self { db, transactions }
    }

    // Parses workbook text and runs it against the catalog
    //
    // Structural row errors from parsing are reported alongside the apply
    // errors in the summary; they never block usable sibling rows.
    pub async fn run_workbook(
        &self,
        text: &str,
        dry_run: bool,
    ) -> Result<ImportSummaryDto, Error> {
        let (batch, parse_errors) = workbook::parse(text)?;

        let mut summary = self.run(batch, dry_run).await?;

        let mut errors = parse_errors;
        errors.append(&mut summary.errors);
        summary.errors = errors;

        Ok(summary)
    }

    // Runs a parsed batch against the catalog
    //
    // With transaction support the whole batch runs atomically: a dry run
    // always rolls back, an apply commits, and an unexpected database failure
    // aborts the lot. Without transaction support a dry run is refused
    // outright and an apply runs best-effort, keeping whatever succeeded and
    // itemizing the rest.
    pub async fn run(&self, batch: ImportBatch, dry_run: bool) -> Result<ImportSummaryDto, Error> {
        if self.transactions {
            let txn = self.db.begin().await?;

            let summary = apply_batch(&txn, &batch, dry_run, true).await?;

            if dry_run {
                txn.rollback().await?;
            } else {
                txn.commit().await?;
            }

            return Ok(summary);
        }

        if dry_run {
            return Err(ImportError::TransactionUnavailable.into());
        }

        apply_batch(self.db, &batch, dry_run, false).await
    }

    /// The whole catalog as workbook text, re-importable as-is
    pub async fn export(&self) -> Result<String, Error> {
        let brand_repository = BrandRepository::new(self.db);
        let device_repository = DeviceRepository::new(self.db);
        let group_repository = GroupRepository::new(self.db);
        let part_repository = PartRepository::new(self.db);

        let mut batch = ImportBatch::default();

        for (row, brand) in brand_repository.all().await?.iter().enumerate() {
            batch.brands.push(BrandRow {
                row: row + 1,
                action: RowAction::Create,
                name: brand.name.clone(),
            });
        }

        for (row, part) in part_repository.list_all().await?.iter().enumerate() {
            batch.parts.push(PartRow {
                row: row + 1,
                action: RowAction::Create,
                name: part.name.clone(),
                description: part.description.clone(),
            });
        }

        let devices = device_repository.all_with_brands().await?;
        let device_ids: Vec<i32> = devices.iter().map(|(device, _)| device.id).collect();
        let aliases = device_repository.aliases_for_devices(&device_ids).await?;

        for (row, (device, brand)) in devices.iter().enumerate() {
            let brand = brand.as_ref().ok_or_else(|| {
                DbErr::RecordNotFound(format!("brand {} of device {}", device.brand_id, device.id))
            })?;

            batch.devices.push(DeviceRow {
                row: row + 1,
                action: RowAction::Create,
                brand: brand.name.clone(),
                name: device.name.clone(),
                aliases: aliases
                    .iter()
                    .filter(|alias| alias.device_id == device.id)
                    .map(|alias| alias.label.clone())
                    .collect(),
            });
        }

        let groups = group_repository.all().await?;
        let group_ids: Vec<i32> = groups.iter().map(|group| group.id).collect();
        let members = group_repository.members_for_groups(&group_ids).await?;

        let mut part_ids: Vec<i32> = groups.iter().map(|group| group.part_id).collect();
        part_ids.sort_unstable();
        part_ids.dedup();
        let parts = part_repository.get_by_ids(&part_ids).await?;

        for (row, group) in groups.iter().enumerate() {
            let part = parts
                .iter()
                .find(|part| part.id == group.part_id)
                .ok_or_else(|| {
                    DbErr::RecordNotFound(format!("part {} of group {}", group.part_id, group.id))
                })?;

            let member_ids: Vec<i32> = members
                .iter()
                .filter(|member| member.group_id == group.id)
                .map(|member| member.device_id)
                .collect();

            let mut member_slugs: Vec<String> = devices
                .iter()
                .filter(|(device, _)| member_ids.contains(&device.id))
                .map(|(device, _)| device.slug.clone())
                .collect();
            member_slugs.sort_unstable();

            batch.groups.push(GroupRow {
                row: row + 1,
                action: RowAction::Create,
                part: part.name.clone(),
                members: member_slugs,
                note: group.note.clone(),
                source: group.source.clone(),
                tags: group
                    .tags
                    .as_deref()
                    .unwrap_or_default()
                    .split(',')
                    .map(str::trim)
                    .filter(|tag| !tag.is_empty())
                    .map(str::to_string)
                    .collect(),
                confidence: Some(group.confidence),
            });
        }

        Ok(workbook::encode(&batch))
    }
}

/// Sheets in dependency order, rows in file order. `strict` means a
/// transaction is underway: database failures abort instead of being
/// collected.
async fn apply_batch<C: ConnectionTrait>(
    db: &C,
    batch: &ImportBatch,
    dry_run: bool,
    strict: bool,
) -> Result<ImportSummaryDto, Error> {
    let catalog = CatalogService::new(db);

    let mut summary = ImportSummaryDto {
        dry_run,
        created: 0,
        updated: 0,
        deleted: 0,
        errors: Vec::new(),
    };

    for row in &batch.brands {
        if let Err(error) = apply_brand(&catalog, row, &mut summary).await {
            record_or_bail(strict, &mut summary, "Brands", row.row, error)?;
        }
    }

    for row in &batch.parts {
        if let Err(error) = apply_part(&catalog, row, &mut summary).await {
            record_or_bail(strict, &mut summary, "Parts", row.row, error)?;
        }
    }

    for row in &batch.devices {
        if let Err(error) = apply_device(db, &catalog, row, &mut summary).await {
            record_or_bail(strict, &mut summary, "Devices", row.row, error)?;
        }
    }

    for row in &batch.groups {
        if let Err(error) = apply_group(db, &catalog, row, &mut summary).await {
            record_or_bail(strict, &mut summary, "Groups", row.row, error)?;
        }
    }

    Ok(summary)
}

async fn apply_brand<C: ConnectionTrait>(
    catalog: &CatalogService<'_, C>,
    row: &BrandRow,
    summary: &mut ImportSummaryDto,
) -> Result<(), Error> {
    match row.action {
        RowAction::Create => {
            let ensured = catalog.ensure_brand(&row.name).await?;
            count_ensure(summary, ensured.created);
        }
        RowAction::Update => {
            // Natural keys cannot rename, so update reduces to an existence check
            let _ = catalog.resolve_brand(&row.name).await?;
            summary.updated += 1;
        }
        RowAction::Delete => {
            let brand = catalog.resolve_brand(&row.name).await?;
            catalog.delete_brand(brand.id).await?;
            summary.deleted += 1;
        }
    }

    Ok(())
}

async fn apply_part<C: ConnectionTrait>(
    catalog: &CatalogService<'_, C>,
    row: &PartRow,
    summary: &mut ImportSummaryDto,
) -> Result<(), Error> {
    match row.action {
        RowAction::Create => {
            let ensured = catalog
                .ensure_part(&row.name, row.description.as_deref())
                .await?;
            count_ensure(summary, ensured.created);
        }
        RowAction::Update => {
            let part = catalog.resolve_part(&row.name).await?;
            let _ = catalog
                .update_part(part.id, &row.name, row.description.as_deref())
                .await?;
            summary.updated += 1;
        }
        RowAction::Delete => {
            let part = catalog.resolve_part(&row.name).await?;
            catalog.delete_part(part.id).await?;
            summary.deleted += 1;
        }
    }

    Ok(())
}

async fn apply_device<C: ConnectionTrait>(
    db: &C,
    catalog: &CatalogService<'_, C>,
    row: &DeviceRow,
    summary: &mut ImportSummaryDto,
) -> Result<(), Error> {
    match row.action {
        RowAction::Create => {
            let ensured = catalog
                .ensure_device(&row.brand, &row.name, &row.aliases)
                .await?;
            count_ensure(summary, ensured.created);
        }
        RowAction::Update => {
            let device = device_by_natural_key(db, row).await?;
            let _ = catalog
                .update_device(
                    device.id,
                    Some(&row.brand),
                    Some(&row.name),
                    Some(&row.aliases),
                )
                .await?;
            summary.updated += 1;
        }
        RowAction::Delete => {
            let device = device_by_natural_key(db, row).await?;
            catalog.delete_device(device.id).await?;
            summary.deleted += 1;
        }
    }

    Ok(())
}

async fn apply_group<C: ConnectionTrait>(
    db: &C,
    catalog: &CatalogService<'_, C>,
    row: &GroupRow,
    summary: &mut ImportSummaryDto,
) -> Result<(), Error> {
    let meta = GroupMeta {
        note: row.note.clone(),
        source: row.source.clone(),
        tags: Some(row.tags.clone()),
        confidence: row.confidence,
    };

    match row.action {
        RowAction::Create => {
            let ensured = catalog.create_group(&row.part, &row.members, meta).await?;
            count_ensure(summary, ensured.created);
        }
        RowAction::Update => {
            let group = group_by_natural_key(db, catalog, row).await?;
            let _ = catalog.update_group(group.id, None, meta).await?;
            summary.updated += 1;
        }
        RowAction::Delete => {
            catalog.delete_group_by_members(&row.part, &row.members).await?;
            summary.deleted += 1;
        }
    }

    Ok(())
}

async fn device_by_natural_key<C: ConnectionTrait>(
    db: &C,
    row: &DeviceRow,
) -> Result<entity::device::Model, Error> {
    let slug = device_slug(&row.brand, &row.name);

    DeviceRepository::new(db)
        .get_by_slug(&slug)
        .await?
        .ok_or_else(|| CatalogError::NotFound(format!("device '{slug}'")).into())
}

async fn group_by_natural_key<C: ConnectionTrait>(
    db: &C,
    catalog: &CatalogService<'_, C>,
    row: &GroupRow,
) -> Result<entity::compat_group::Model, Error> {
    let part = catalog.resolve_part(&row.part).await?;

    let mut slugs: Vec<String> = row
        .members
        .iter()
        .map(|slug| slug.trim().to_string())
        .filter(|slug| !slug.is_empty())
        .collect();
    slugs.sort_unstable();
    slugs.dedup();

    let devices = DeviceRepository::new(db).get_by_slugs(&slugs).await?;

    let mut ids: Vec<i32> = devices.iter().map(|device| device.id).collect();
    ids.sort_unstable();
    ids.dedup();

    let key = members_key(&ids);

    GroupRepository::new(db)
        .get_by_part_and_key(part.id, &key)
        .await?
        .ok_or_else(|| {
            CatalogError::NotFound(format!(
                "compatibility group for '{}' with those members",
                part.slug
            ))
            .into()
        })
}

fn record_or_bail(
    strict: bool,
    summary: &mut ImportSummaryDto,
    sheet: &str,
    row: usize,
    error: Error,
) -> Result<(), Error> {
    if strict && !matches!(error, Error::CatalogError(_)) {
        return Err(error);
    }

    summary.errors.push(ImportRowErrorDto {
        sheet: sheet.to_string(),
        row: row as u64,
        error: error.to_string(),
    });

    Ok(())
}

fn count_ensure(summary: &mut ImportSummaryDto, created: bool) {
    if created {
        summary.created += 1;
    } else {
        summary.updated += 1;
    }
}
