/*
 * SPDX-FileCopyrightText: 2025 Capo Contributors
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

pub use sea_orm_migration::prelude::*;

mod m20250112_101500_create_table_user;
mod m20250112_102030_create_table_project;
mod m20250112_102800_create_table_song;
mod m20250112_103415_create_table_chord;
mod m20250203_140000_add_starting_fret_to_chord;
mod m20250217_091200_create_table_project_collaborator;
mod m20250305_113000_create_table_sequence;
mod m20250305_113500_create_table_sequence_measure;
mod m20250305_114000_create_table_sequence_beat;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250112_101500_create_table_user::Migration),
            Box::new(m20250112_102030_create_table_project::Migration),
            Box::new(m20250112_102800_create_table_song::Migration),
            Box::new(m20250112_103415_create_table_chord::Migration),
            Box::new(m20250203_140000_add_starting_fret_to_chord::Migration),
            Box::new(m20250217_091200_create_table_project_collaborator::Migration),
            Box::new(m20250305_113000_create_table_sequence::Migration),
            Box::new(m20250305_113500_create_table_sequence_measure::Migration),
            Box::new(m20250305_114000_create_table_sequence_beat::Migration),
        ]
    }
}
