use sea_orm::{DatabaseConnection, DbErr};

use crate::server::{
    data::{
        brand::BrandRepository, device::DeviceRepository, group::GroupRepository,
        part::PartRepository,
    },
    error::Error,
    model::db::{BrandModel, CompatGroupModel, DeviceModel, PartCategoryModel},
};

/// One device inside a group view, with its brand and alias spellings.
pub struct MemberView {
    pub device: DeviceModel,
    pub brand: BrandModel,
    pub aliases: Vec<String>,
}

/// A compatibility group with its part category and member devices attached.
pub struct GroupView {
    pub group: CompatGroupModel,
    pub part: PartCategoryModel,
    pub members: Vec<MemberView>,
}

/// Outcome of a compatibility check.
pub struct CompatReport {
    pub compatible: bool,
    pub shared_groups: Vec<GroupView>,
}

pub struct CompatService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> CompatService<'a> {
    /// Creates a new instance of [`CompatService`]
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    // Every group whose member set contains the device
    //
    // Optionally narrowed to one part category. An unknown device simply
    // belongs to no groups. Ordered by group id ascending so pagination over
    // the result is deterministic.
    pub async fn groups_for_device(
        &self,
        device_id: i32,
        part_id: Option<i32>,
    ) -> Result<Vec<GroupView>, Error> {
        let groups = GroupRepository::new(self.db)
            .groups_for_device(device_id, part_id)
            .await?;

        self.hydrate_groups(groups).await
    }

    /// Every group containing any of the given devices, for search results
    pub async fn groups_for_any(
        &self,
        device_ids: &[i32],
        part_id: Option<i32>,
    ) -> Result<Vec<GroupView>, Error> {
        let groups = GroupRepository::new(self.db)
            .groups_for_any_devices(device_ids, part_id)
            .await?;

        self.hydrate_groups(groups).await
    }

    // Checks whether all given devices share a part under one group
    //
    // Compatible means at least one group under the part holds a superset of
    // the (deduplicated) device ids; all such groups are returned. With a
    // single id this degenerates to "appears under this part at all". An
    // unknown part or an empty id set reports incompatible rather than
    // erroring; groups never span parts, so no transitive inference happens
    // here.
    pub async fn check(
        &self,
        part_id: i32,
        device_ids: &[i32],
    ) -> Result<CompatReport, Error> {
        let mut ids = device_ids.to_vec();
        ids.sort_unstable();
        ids.dedup();

        if ids.is_empty() {
            return Ok(CompatReport {
                compatible: false,
                shared_groups: Vec::new(),
            });
        }

        let group_repository = GroupRepository::new(self.db);

        let group_ids = group_repository.find_superset(part_id, &ids).await?;
        let groups = group_repository.get_by_ids(&group_ids).await?;
        let shared_groups = self.hydrate_groups(groups).await?;

        Ok(CompatReport {
            compatible: !shared_groups.is_empty(),
            shared_groups,
        })
    }

    /// Attaches part, member devices, brands and aliases to bare group rows,
    /// preserving their order
    pub async fn hydrate_groups(
        &self,
        groups: Vec<CompatGroupModel>,
    ) -> Result<Vec<GroupView>, Error> {
        if groups.is_empty() {
            return Ok(Vec::new());
        }

        let group_repository = GroupRepository::new(self.db);
        let device_repository = DeviceRepository::new(self.db);

        let group_ids: Vec<i32> = groups.iter().map(|group| group.id).collect();

        let mut part_ids: Vec<i32> = groups.iter().map(|group| group.part_id).collect();
        part_ids.sort_unstable();
        part_ids.dedup();
        let parts = PartRepository::new(self.db).get_by_ids(&part_ids).await?;

        let members = group_repository.members_for_groups(&group_ids).await?;

        let mut device_ids: Vec<i32> = members.iter().map(|member| member.device_id).collect();
        device_ids.sort_unstable();
        device_ids.dedup();
        let devices = device_repository.get_by_ids(&device_ids).await?;

        let mut brand_ids: Vec<i32> = devices.iter().map(|device| device.brand_id).collect();
        brand_ids.sort_unstable();
        brand_ids.dedup();
        let brands = BrandRepository::new(self.db).get_by_ids(&brand_ids).await?;

        let aliases = device_repository.aliases_for_devices(&device_ids).await?;

        let mut views = Vec::with_capacity(groups.len());

        for group in groups {
            let part = parts
                .iter()
                .find(|part| part.id == group.part_id)
                .cloned()
                .ok_or_else(|| {
                    DbErr::RecordNotFound(format!("part {} of group {}", group.part_id, group.id))
                })?;

            let mut member_views = Vec::new();

            for member in members.iter().filter(|member| member.group_id == group.id) {
                let device = devices
                    .iter()
                    .find(|device| device.id == member.device_id)
                    .cloned()
                    .ok_or_else(|| {
                        DbErr::RecordNotFound(format!(
                            "device {} of group {}",
                            member.device_id, group.id
                        ))
                    })?;

                let brand = brands
                    .iter()
                    .find(|brand| brand.id == device.brand_id)
                    .cloned()
                    .ok_or_else(|| {
                        DbErr::RecordNotFound(format!(
                            "brand {} of device {}",
                            device.brand_id, device.id
                        ))
                    })?;

                let aliases = aliases
                    .iter()
                    .filter(|alias| alias.device_id == device.id)
                    .map(|alias| alias.label.clone())
                    .collect();

                member_views.push(MemberView {
                    device,
                    brand,
                    aliases,
                });
            }

            views.push(GroupView {
                group,
                part,
                members: member_views,
            });
        }

        Ok(views)
    }
}
