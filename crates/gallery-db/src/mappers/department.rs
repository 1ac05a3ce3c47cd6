//! Department model -> entity mapper

use gallery_core::entities::Department;

use crate::models::DepartmentModel;

impl From<DepartmentModel> for Department {
    fn from(model: DepartmentModel) -> Self {
        Department {
            id: model.id,
            name: model.name,
            color: model.color,
            created_at: model.created_at,
        }
    }
}
