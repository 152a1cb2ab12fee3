//! MongoDB repository tests against a real server.
//!
//! Need Docker: `cargo test -p domain_users -- --ignored`

use domain_users::{
    CreateUser, MongoUserRepository, NewProductItem, UserDocument, UserError, UserRepository,
    models::UserChanges,
};
use test_utils::{TestDataBuilder, TestMongo};

fn document(data: &TestDataBuilder, suffix: &str) -> UserDocument {
    UserDocument::new(
        CreateUser {
            username: data.username(suffix),
            password: "12345".into(),
            name: Some("name".into()),
            surname: None,
            email: data.email(suffix),
            address: None,
            phone: Vec::new(),
        },
        "$argon2id$stub".into(),
    )
}

async fn repository(mongo: &TestMongo) -> MongoUserRepository {
    let repo = MongoUserRepository::new(&mongo.database());
    repo.init_indexes().await.unwrap();
    repo
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_unique_index_rejects_duplicate_username() {
    let mongo = TestMongo::new().await;
    let repo = repository(&mongo).await;
    let data = TestDataBuilder::from_test_name("mongo_duplicate");

    repo.create(document(&data, "a")).await.unwrap();
    let result = repo.create(document(&data, "a")).await;

    assert!(matches!(result, Err(UserError::DuplicateUsername(_))));
    assert_eq!(repo.list().await.unwrap().len(), 1);
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_update_returns_new_document() {
    let mongo = TestMongo::new().await;
    let repo = repository(&mongo).await;
    let data = TestDataBuilder::from_test_name("mongo_update");
    let user = repo.create(document(&data, "a")).await.unwrap();

    let changes = UserChanges {
        email: "changed@example.com".into(),
        ..Default::default()
    };
    let updated = repo.update(&user.username, changes).await.unwrap().unwrap();

    assert_eq!(updated.email, "changed@example.com");
    assert_eq!(updated.name.as_deref(), Some("name"));
    assert!(repo.update("ghost", UserChanges::default()).await.unwrap().is_none());
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_product_line_operations() {
    let mongo = TestMongo::new().await;
    let repo = repository(&mongo).await;
    let data = TestDataBuilder::from_test_name("mongo_products");
    let user = repo.create(document(&data, "a")).await.unwrap();

    let line = |product: &str| {
        NewProductItem {
            product: product.into(),
            cost: 10.0,
            quantity: 1,
        }
        .into_item()
    };
    let laptop = line("Laptop");
    let mouse = line("Mouse");
    assert!(
        repo.push_products(&user.username, vec![laptop.clone(), mouse.clone()])
            .await
            .unwrap()
    );
    assert!(!repo.push_products("ghost", vec![line("Pen")]).await.unwrap());

    assert!(repo.set_product_quantity(&user.username, &mouse.id, 4).await.unwrap());
    assert!(!repo.set_product_quantity(&user.username, "missing", 4).await.unwrap());

    let listed = repo.list_products().await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].products[1].quantity, 4);

    assert!(repo.pull_products(&user.username, "Laptop").await.unwrap());
    assert!(repo.pull_products(&user.username, &mouse.id).await.unwrap());
    let stored = repo.get_by_username(&user.username).await.unwrap().unwrap();
    assert!(stored.products.is_empty());

    assert!(repo.delete(&user.username).await.unwrap());
    assert!(!repo.exists_by_username(&user.username).await.unwrap());
}
