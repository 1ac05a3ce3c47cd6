//! Comment model -> entity mapper

use gallery_core::entities::Comment;

use crate::models::CommentModel;

impl From<CommentModel> for Comment {
    fn from(model: CommentModel) -> Self {
        Comment {
            id: model.id,
            photo_id: model.photo_id,
            nickname: model.nickname,
            content: model.content,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
