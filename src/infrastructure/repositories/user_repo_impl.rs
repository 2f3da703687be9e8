// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::user::{User, UserProfile};
use crate::domain::repositories::scraping_job_repository::RepositoryError;
use crate::domain::repositories::user_repository::UserRepository;
use crate::infrastructure::database::entities::user as user_entity;
use crate::infrastructure::repositories::is_unique_violation;
use async_trait::async_trait;
use chrono::{DateTime, FixedOffset, Utc};
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

/// 用户仓库实现
#[derive(Clone)]
pub struct UserRepositoryImpl {
    db: Arc<DatabaseConnection>,
}

impl UserRepositoryImpl {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

impl From<user_entity::Model> for User {
    fn from(model: user_entity::Model) -> Self {
        Self {
            id: model.id,
            keycloak_id: model.keycloak_id,
            username: model.username,
            email: model.email,
            first_name: model.first_name,
            last_name: model.last_name,
        }
    }
}

#[async_trait]
impl UserRepository for UserRepositoryImpl {
    async fn find_or_create(&self, profile: &UserProfile) -> Result<User, RepositoryError> {
        if let Some(user) = self.find_by_keycloak_id(&profile.subject).await? {
            return Ok(user);
        }

        let now: DateTime<FixedOffset> = Utc::now().into();
        let model = user_entity::ActiveModel {
            id: Set(Uuid::new_v4()),
            keycloak_id: Set(profile.subject.clone()),
            username: Set(profile.username.clone()),
            email: Set(profile.email.clone()),
            first_name: Set(profile.first_name.clone()),
            last_name: Set(profile.last_name.clone()),
            created_at: Set(now),
            updated_at: Set(now),
        };

        match model.insert(self.db.as_ref()).await {
            Ok(inserted) => {
                info!(user_id = %inserted.id, subject = %profile.subject, "Provisioned local user");
                Ok(inserted.into())
            }
            Err(e) if is_unique_violation(&e) => self
                .find_by_keycloak_id(&profile.subject)
                .await?
                .ok_or(RepositoryError::NotFound),
            Err(e) => Err(e.into()),
        }
    }

    async fn find_by_keycloak_id(
        &self,
        keycloak_id: &str,
    ) -> Result<Option<User>, RepositoryError> {
        let model = user_entity::Entity::find()
            .filter(user_entity::Column::KeycloakId.eq(keycloak_id))
            .one(self.db.as_ref())
            .await?;

        Ok(model.map(Into::into))
    }
}
