//! MongoDB implementation of UserRepository

use async_trait::async_trait;
use chrono::Utc;
use futures_util::TryStreamExt;
use mongodb::{
    Collection, Database, IndexModel,
    bson::{Document, doc, to_bson},
    options::{IndexOptions, ReturnDocument},
};
use tracing::instrument;

use crate::error::{UserError, UserResult, is_duplicate_key};
use crate::models::{ProductItem, UserChanges, UserDocument, UserProducts};
use crate::repository::UserRepository;

pub const USERS_COLLECTION: &str = "users";

/// MongoDB implementation of the UserRepository
#[derive(Clone)]
pub struct MongoUserRepository {
    collection: Collection<UserDocument>,
}

impl MongoUserRepository {
    /// # Example
    /// ```ignore
    /// let client = Client::with_uri_str("mongodb://localhost:27017").await?;
    /// let repo = MongoUserRepository::new(&client.database("products_crud"));
    /// repo.init_indexes().await?;
    /// ```
    pub fn new(db: &Database) -> Self {
        Self::with_collection(db, USERS_COLLECTION)
    }

    pub fn with_collection(db: &Database, collection_name: &str) -> Self {
        Self {
            collection: db.collection::<UserDocument>(collection_name),
        }
    }

    /// Create the unique index on `username`. Safe to call on every start.
    #[instrument(skip(self))]
    pub async fn init_indexes(&self) -> UserResult<()> {
        let index = IndexModel::builder()
            .keys(doc! { "username": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("username_unique".to_string())
                    .build(),
            )
            .build();

        self.collection.create_index(index).await?;
        tracing::info!(collection = %self.collection.name(), "User indexes ready");
        Ok(())
    }

    /// `$set` document for a profile change. Absent optional fields are left alone.
    fn build_update(changes: &UserChanges) -> UserResult<Document> {
        let mut set = doc! {
            "email": &changes.email,
            "updated_at": to_bson(&Utc::now())?,
        };

        if let Some(ref name) = changes.name {
            set.insert("name", name);
        }
        if let Some(ref surname) = changes.surname {
            set.insert("surname", surname);
        }
        if let Some(ref password_hash) = changes.password_hash {
            set.insert("password", password_hash);
        }
        if let Some(ref address) = changes.address {
            set.insert("address", to_bson(address)?);
        }
        if let Some(ref phone) = changes.phone {
            set.insert("phone", to_bson(phone)?);
        }

        Ok(doc! { "$set": set })
    }
}

#[async_trait]
impl UserRepository for MongoUserRepository {
    #[instrument(skip(self, user), fields(username = %user.username))]
    async fn create(&self, user: UserDocument) -> UserResult<UserDocument> {
        self.collection.insert_one(&user).await.map_err(|err| {
            if is_duplicate_key(&err) {
                UserError::DuplicateUsername(user.username.clone())
            } else {
                err.into()
            }
        })?;

        tracing::info!(user_id = %user.id, "User created successfully");
        Ok(user)
    }

    #[instrument(skip(self))]
    async fn list(&self) -> UserResult<Vec<UserDocument>> {
        let cursor = self.collection.find(doc! {}).await?;
        let users: Vec<UserDocument> = cursor.try_collect().await?;
        Ok(users)
    }

    #[instrument(skip(self))]
    async fn get_by_username(&self, username: &str) -> UserResult<Option<UserDocument>> {
        let user = self.collection.find_one(doc! { "username": username }).await?;
        Ok(user)
    }

    #[instrument(skip(self))]
    async fn exists_by_username(&self, username: &str) -> UserResult<bool> {
        let count = self
            .collection
            .count_documents(doc! { "username": username })
            .limit(1)
            .await?;
        Ok(count > 0)
    }

    #[instrument(skip(self, changes))]
    async fn update(
        &self,
        username: &str,
        changes: UserChanges,
    ) -> UserResult<Option<UserDocument>> {
        let update = Self::build_update(&changes)?;

        let updated = self
            .collection
            .find_one_and_update(doc! { "username": username }, update)
            .return_document(ReturnDocument::After)
            .await?;

        if updated.is_some() {
            tracing::info!("User updated successfully");
        }
        Ok(updated)
    }

    #[instrument(skip(self))]
    async fn delete(&self, username: &str) -> UserResult<bool> {
        let result = self
            .collection
            .delete_one(doc! { "username": username })
            .await?;

        tracing::info!(deleted = result.deleted_count, "User delete finished");
        Ok(result.deleted_count > 0)
    }

    #[instrument(skip(self))]
    async fn list_products(&self) -> UserResult<Vec<UserProducts>> {
        let cursor = self
            .collection
            .clone_with_type::<UserProducts>()
            .find(doc! {})
            .projection(doc! { "_id": 0, "username": 1, "products": 1 })
            .await?;
        let users: Vec<UserProducts> = cursor.try_collect().await?;
        Ok(users)
    }

    #[instrument(skip(self, items), fields(count = items.len()))]
    async fn push_products(&self, username: &str, items: Vec<ProductItem>) -> UserResult<bool> {
        let result = self
            .collection
            .update_one(
                doc! { "username": username },
                doc! { "$push": { "products": { "$each": to_bson(&items)? } } },
            )
            .await?;

        Ok(result.matched_count > 0)
    }

    #[instrument(skip(self))]
    async fn set_product_quantity(
        &self,
        username: &str,
        item_id: &str,
        quantity: i64,
    ) -> UserResult<bool> {
        let result = self
            .collection
            .update_one(
                doc! { "username": username, "products._id": item_id },
                doc! { "$set": { "products.$.quantity": quantity } },
            )
            .await?;

        Ok(result.matched_count > 0)
    }

    #[instrument(skip(self))]
    async fn pull_products(&self, username: &str, key: &str) -> UserResult<bool> {
        let result = self
            .collection
            .update_one(
                doc! { "username": username },
                doc! {
                    "$pull": {
                        "products": { "$or": [ { "_id": key }, { "product": key } ] }
                    }
                },
            )
            .await?;

        tracing::info!(modified = result.modified_count, "Product lines removed");
        Ok(result.matched_count > 0)
    }
}
