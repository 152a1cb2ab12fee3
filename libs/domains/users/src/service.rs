//! User Service - Business logic layer

use argon2::{
    Argon2,
    password_hash::{PasswordHasher, SaltString, rand_core::OsRng},
};
use std::sync::Arc;
use tracing::instrument;

use crate::error::{UserError, UserResult};
use crate::models::{
    AddProducts, CreateUser, ProductItem, UpdateProductQuantity, UpdateUser, User, UserChanges,
    UserDocument, UserProducts,
};
use crate::repository::UserRepository;
use crate::validation::validate;

/// User service providing business logic operations
///
/// Validates input, enforces the immutable username and hashes passwords
/// before anything reaches the repository.
pub struct UserService<R: UserRepository> {
    repository: Arc<R>,
}

impl<R: UserRepository> UserService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    #[instrument(skip(self))]
    pub async fn list_users(&self) -> UserResult<Vec<User>> {
        let users = self.repository.list().await?;
        Ok(users.into_iter().map(User::from).collect())
    }

    #[instrument(skip(self))]
    pub async fn get_user(&self, username: &str) -> UserResult<User> {
        self.find(username).await.map(User::from)
    }

    #[instrument(skip(self, input), fields(username = %input.username))]
    pub async fn create_user(&self, input: CreateUser) -> UserResult<User> {
        validate(&input)?;

        // The unique index catches races; this gives the common case a clean error
        if self.repository.exists_by_username(&input.username).await? {
            return Err(UserError::DuplicateUsername(input.username));
        }

        let password_hash = hash_password(&input.password)?;
        let created = self
            .repository
            .create(UserDocument::new(input, password_hash))
            .await?;
        Ok(created.into())
    }

    #[instrument(skip(self, input))]
    pub async fn update_user(&self, username: &str, input: UpdateUser) -> UserResult<User> {
        validate(&input)?;
        ensure_same_username(username, input.username.as_deref())?;

        let password_hash = input.password.as_deref().map(hash_password).transpose()?;

        self.repository
            .update(username, UserChanges::new(input, password_hash))
            .await?
            .map(User::from)
            .ok_or_else(|| UserError::NotFound(username.to_string()))
    }

    /// Succeeds whether or not the user existed
    #[instrument(skip(self))]
    pub async fn delete_user(&self, username: &str) -> UserResult<()> {
        self.repository.delete(username).await?;
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn list_user_products(&self) -> UserResult<Vec<UserProducts>> {
        self.repository.list_products().await
    }

    #[instrument(skip(self))]
    pub async fn get_user_products(&self, username: &str) -> UserResult<Vec<ProductItem>> {
        self.find(username).await.map(|user| user.products)
    }

    /// Append every line in one write; each line gets a fresh id
    #[instrument(skip(self, input), fields(username = %input.username))]
    pub async fn add_products(&self, input: AddProducts) -> UserResult<()> {
        validate(&input)?;

        let items: Vec<ProductItem> = input
            .products
            .into_iter()
            .map(|line| line.into_item())
            .collect();

        if !self.repository.push_products(&input.username, items).await? {
            return Err(UserError::NotFound(input.username));
        }
        Ok(())
    }

    #[instrument(skip(self, input))]
    pub async fn update_product_quantity(
        &self,
        username: &str,
        input: UpdateProductQuantity,
    ) -> UserResult<()> {
        validate(&input)?;
        ensure_same_username(username, input.username.as_deref())?;

        let line = input.product;
        if self
            .repository
            .set_product_quantity(username, &line.id, line.quantity)
            .await?
        {
            return Ok(());
        }

        // Nothing matched: tell a missing user apart from a missing line
        if self.repository.exists_by_username(username).await? {
            Err(UserError::ProductNotFound {
                username: username.to_string(),
                product: line.id,
            })
        } else {
            Err(UserError::NotFound(username.to_string()))
        }
    }

    /// Remove the lines whose id or name equals `product`
    #[instrument(skip(self))]
    pub async fn remove_products(&self, username: &str, product: &str) -> UserResult<()> {
        if !self.repository.pull_products(username, product).await? {
            return Err(UserError::NotFound(username.to_string()));
        }
        Ok(())
    }

    async fn find(&self, username: &str) -> UserResult<UserDocument> {
        self.repository
            .get_by_username(username)
            .await?
            .ok_or_else(|| UserError::NotFound(username.to_string()))
    }
}

impl<R: UserRepository> Clone for UserService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

fn ensure_same_username(path: &str, body: Option<&str>) -> UserResult<()> {
    match body {
        Some(body) if body != path => Err(UserError::UsernameMismatch {
            path: path.to_string(),
            body: body.to_string(),
        }),
        _ => Ok(()),
    }
}

fn hash_password(password: &str) -> UserResult<String> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| UserError::PasswordHash(e.to_string()))
}
