//! OpenAPI document for the whole service

use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Products CRUD API",
        version = "1.0.0",
        description = "Products Project Application",
        contact(
            name = "API Support",
            url = "https://www.example.com",
            email = "support@example.com"
        )
    ),
    servers(
        (url = "http://localhost:3000", description = "Local Server"),
        (url = "https://www.example.com", description = "Testing Server")
    ),
    nest(
        (path = "/api", api = domain_users::ApiDoc)
    ),
    tags(
        (name = "Users", description = "API for users"),
        (name = "Products", description = "API for products"),
        (name = "Users and Products", description = "API for users and products")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_describes_every_endpoint() {
        let doc = serde_json::to_value(ApiDoc::openapi()).unwrap();

        assert_eq!(doc["info"]["title"], "Products CRUD API");
        assert_eq!(doc["info"]["version"], "1.0.0");
        assert_eq!(doc["servers"].as_array().unwrap().len(), 2);

        let paths = doc["paths"].as_object().unwrap();
        for path in [
            "/api/users",
            "/api/users/{username}",
            "/api/users-products",
            "/api/users-products/{username}",
            "/api/users-products/{username}/products/{product}",
        ] {
            assert!(paths.contains_key(path), "missing {path}");
        }

        let schemas = doc["components"]["schemas"].as_object().unwrap();
        assert!(schemas.contains_key("User"));
        assert!(schemas.contains_key("Product"));
    }

    #[test]
    fn test_tags_are_declared() {
        let doc = ApiDoc::openapi();
        let tags = doc.tags.unwrap_or_default();

        for (name, description) in [
            ("Users", "API for users"),
            ("Products", "API for products"),
            ("Users and Products", "API for users and products"),
        ] {
            let tag = tags
                .iter()
                .find(|tag| tag.name == name)
                .unwrap_or_else(|| panic!("missing tag {name}"));
            assert_eq!(tag.description.as_deref(), Some(description));
        }
    }
}
