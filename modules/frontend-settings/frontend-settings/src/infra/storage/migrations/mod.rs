use sea_orm_migration::prelude::*;

mod default_slots_002;
mod filter_sets_003;
mod initial_001;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(initial_001::Migration),
            Box::new(default_slots_002::Migration),
            Box::new(filter_sets_003::Migration),
        ]
    }
}
