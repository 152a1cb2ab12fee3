use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::{UserError, UserResult};
use crate::models::{ProductItem, UserChanges, UserDocument, UserProducts};

/// Persistence for users and their embedded product lines.
///
/// Every method touches a single user document.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new user; a taken username is [`UserError::DuplicateUsername`]
    async fn create(&self, user: UserDocument) -> UserResult<UserDocument>;

    async fn list(&self) -> UserResult<Vec<UserDocument>>;

    async fn get_by_username(&self, username: &str) -> UserResult<Option<UserDocument>>;

    async fn exists_by_username(&self, username: &str) -> UserResult<bool>;

    /// Apply `changes` and return the updated user, or `None` if there is no such user
    async fn update(&self, username: &str, changes: UserChanges)
    -> UserResult<Option<UserDocument>>;

    /// Returns whether a user was deleted
    async fn delete(&self, username: &str) -> UserResult<bool>;

    /// Username and products of every user
    async fn list_products(&self) -> UserResult<Vec<UserProducts>>;

    /// Append `items` to the user's products; `false` if there is no such user
    async fn push_products(&self, username: &str, items: Vec<ProductItem>) -> UserResult<bool>;

    /// Set the quantity of one product line; `false` if the user or line is missing
    async fn set_product_quantity(
        &self,
        username: &str,
        item_id: &str,
        quantity: i64,
    ) -> UserResult<bool>;

    /// Remove every product line whose id or product name equals `key`;
    /// `false` if there is no such user
    async fn pull_products(&self, username: &str, key: &str) -> UserResult<bool>;
}

/// In-memory implementation of UserRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<HashMap<String, UserDocument>>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: UserDocument) -> UserResult<UserDocument> {
        let mut users = self.users.write().await;

        if users.contains_key(&user.username) {
            return Err(UserError::DuplicateUsername(user.username));
        }

        users.insert(user.username.clone(), user.clone());

        tracing::info!(username = %user.username, "Created user");
        Ok(user)
    }

    async fn list(&self) -> UserResult<Vec<UserDocument>> {
        let users = self.users.read().await;
        let mut result: Vec<UserDocument> = users.values().cloned().collect();
        // Insertion order, like a collection scan
        result.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));
        Ok(result)
    }

    async fn get_by_username(&self, username: &str) -> UserResult<Option<UserDocument>> {
        let users = self.users.read().await;
        Ok(users.get(username).cloned())
    }

    async fn exists_by_username(&self, username: &str) -> UserResult<bool> {
        let users = self.users.read().await;
        Ok(users.contains_key(username))
    }

    async fn update(
        &self,
        username: &str,
        changes: UserChanges,
    ) -> UserResult<Option<UserDocument>> {
        let mut users = self.users.write().await;

        let Some(user) = users.get_mut(username) else {
            return Ok(None);
        };
        user.apply_changes(changes);

        tracing::info!(username, "Updated user");
        Ok(Some(user.clone()))
    }

    async fn delete(&self, username: &str) -> UserResult<bool> {
        let mut users = self.users.write().await;
        let deleted = users.remove(username).is_some();
        if deleted {
            tracing::info!(username, "Deleted user");
        }
        Ok(deleted)
    }

    async fn list_products(&self) -> UserResult<Vec<UserProducts>> {
        let users = self.list().await?;
        Ok(users.iter().map(UserProducts::from).collect())
    }

    async fn push_products(&self, username: &str, items: Vec<ProductItem>) -> UserResult<bool> {
        let mut users = self.users.write().await;

        let Some(user) = users.get_mut(username) else {
            return Ok(false);
        };
        user.products.extend(items);
        Ok(true)
    }

    async fn set_product_quantity(
        &self,
        username: &str,
        item_id: &str,
        quantity: i64,
    ) -> UserResult<bool> {
        let mut users = self.users.write().await;

        let item = users
            .get_mut(username)
            .and_then(|user| user.products.iter_mut().find(|item| item.id == item_id));

        match item {
            Some(item) => {
                item.quantity = quantity;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn pull_products(&self, username: &str, key: &str) -> UserResult<bool> {
        let mut users = self.users.write().await;

        let Some(user) = users.get_mut(username) else {
            return Ok(false);
        };
        user.products.retain(|item| item.id != key && item.product != key);
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CreateUser, NewProductItem};

    fn user(username: &str) -> UserDocument {
        UserDocument::new(
            CreateUser {
                username: username.to_string(),
                password: "12345".to_string(),
                name: None,
                surname: None,
                email: format!("{username}@aueb.gr"),
                address: None,
                phone: Vec::new(),
            },
            "hash".to_string(),
        )
    }

    fn line(product: &str, quantity: i64) -> ProductItem {
        NewProductItem { product: product.to_string(), cost: 5.0, quantity }.into_item()
    }

    #[tokio::test]
    async fn test_create_and_get_user() {
        let repo = InMemoryUserRepository::new();
        let created = repo.create(user("test30")).await.unwrap();

        let fetched = repo.get_by_username("test30").await.unwrap().unwrap();
        assert_eq!(fetched.id, created.id);
        assert!(repo.exists_by_username("test30").await.unwrap());
        assert!(!repo.exists_by_username("other").await.unwrap());
    }

    #[tokio::test]
    async fn test_duplicate_username_keeps_original() {
        let repo = InMemoryUserRepository::new();
        let original = repo.create(user("test30")).await.unwrap();

        let mut again = user("test30");
        again.email = "changed@aueb.gr".to_string();
        let result = repo.create(again).await;
        assert!(matches!(result, Err(UserError::DuplicateUsername(name)) if name == "test30"));

        let stored = repo.get_by_username("test30").await.unwrap().unwrap();
        assert_eq!(stored.email, original.email);
    }

    #[tokio::test]
    async fn test_update_missing_user_is_none() {
        let repo = InMemoryUserRepository::new();
        let changes = UserChanges { email: "x@y.gr".into(), ..Default::default() };
        assert!(repo.update("ghost", changes).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let repo = InMemoryUserRepository::new();
        repo.create(user("test30")).await.unwrap();
        assert!(repo.delete("test30").await.unwrap());
        assert!(!repo.delete("test30").await.unwrap());
    }

    #[tokio::test]
    async fn test_product_lines_lifecycle() {
        let repo = InMemoryUserRepository::new();
        repo.create(user("buyer")).await.unwrap();

        let laptop = line("Laptop", 1);
        let mouse = line("Mouse", 2);
        assert!(repo.push_products("buyer", vec![laptop.clone(), mouse.clone()]).await.unwrap());
        assert!(!repo.push_products("ghost", vec![line("Pen", 1)]).await.unwrap());

        assert!(repo.set_product_quantity("buyer", &mouse.id, 7).await.unwrap());
        assert!(!repo.set_product_quantity("buyer", "missing", 7).await.unwrap());

        let stored = repo.get_by_username("buyer").await.unwrap().unwrap();
        assert_eq!(stored.products[0].quantity, 1);
        assert_eq!(stored.products[1].quantity, 7);

        // by name, then by id
        assert!(repo.pull_products("buyer", "Laptop").await.unwrap());
        assert!(repo.pull_products("buyer", &mouse.id).await.unwrap());
        let stored = repo.get_by_username("buyer").await.unwrap().unwrap();
        assert!(stored.products.is_empty());

        assert!(!repo.pull_products("ghost", "Laptop").await.unwrap());
    }

    #[tokio::test]
    async fn test_list_products_projects_every_user() {
        let repo = InMemoryUserRepository::new();
        repo.create(user("a")).await.unwrap();
        repo.create(user("b")).await.unwrap();
        repo.push_products("b", vec![line("Pen", 3)]).await.unwrap();

        let mut listed = repo.list_products().await.unwrap();
        listed.sort_by(|x, y| x.username.cmp(&y.username));
        assert_eq!(listed.len(), 2);
        assert!(listed[0].products.is_empty());
        assert_eq!(listed[1].products[0].product, "Pen");
    }
}
