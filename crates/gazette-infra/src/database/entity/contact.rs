//! Contact entity for SeaORM.

use sea_orm::Set;
use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "contacts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub email: String,
    #[sea_orm(column_type = "Text")]
    pub message: String,
    pub read: bool,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Conversion from SeaORM Model to Domain Contact.
impl From<Model> for gazette_core::domain::Contact {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            email: model.email,
            message: model.message,
            read: model.read,
            created_at: model.created_at.into(),
        }
    }
}

/// Conversion from Domain Contact to SeaORM ActiveModel.
impl From<gazette_core::domain::Contact> for ActiveModel {
    fn from(contact: gazette_core::domain::Contact) -> Self {
        Self {
            id: Set(contact.id),
            name: Set(contact.name),
            email: Set(contact.email),
            message: Set(contact.message),
            read: Set(contact.read),
            created_at: Set(contact.created_at.into()),
        }
    }
}
