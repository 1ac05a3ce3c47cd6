//! Photo model -> entity mapper

use gallery_core::entities::Photo;

use crate::models::PhotoModel;

impl From<PhotoModel> for Photo {
    fn from(model: PhotoModel) -> Self {
        Photo {
            id: model.id,
            department_name: model.department_name,
            title: model.title,
            description: model.description,
            image_url: model.image_url,
            thumbnail_url: model.thumbnail_url,
            like_count: model.like_count,
            view_count: model.view_count,
            is_top_pick: model.is_top_pick,
            upload_date: model.upload_date,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
