pub use sea_orm_migration::prelude::*;

mod m20260823_000001_brand;
mod m20260823_000002_part_category;
mod m20260823_000003_device;
mod m20260823_000004_device_alias;
mod m20260823_000005_compat_group;
mod m20260823_000006_compat_group_member;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260823_000001_brand::Migration),
            Box::new(m20260823_000002_part_category::Migration),
            Box::new(m20260823_000003_device::Migration),
            Box::new(m20260823_000004_device_alias::Migration),
            Box::new(m20260823_000005_compat_group::Migration),
            Box::new(m20260823_000006_compat_group_member::Migration),
        ]
    }
}
