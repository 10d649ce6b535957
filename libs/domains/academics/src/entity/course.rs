use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Sea-ORM entity for the courses table
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "courses")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    /// Number of semesters in the full program.
    pub total_semester: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::semester::Entity")]
    Semester,
    #[sea_orm(has_many = "super::enrollment::Entity")]
    Enrollment,
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for crate::models::CourseView {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            total_semester: model.total_semester,
        }
    }
}
