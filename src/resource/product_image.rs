// Product images: ownership is indirect, through the parent product row.
use serde_json::Value;
use uuid::Uuid;

use crate::api::Envelope;
use crate::error::ApiError;
use crate::gateway::AccessGateway;
use crate::models::{product::Product, CreateProductImageRequest, UpdateProductImageRequest};
use crate::resource::{as_object, Resource};
use crate::store::{TableStore, Where};

const TABLE: &str = "product_images";

pub struct ProductImageController<'a> {
    gateway: &'a AccessGateway,
}

impl<'a> ProductImageController<'a> {
    pub fn new(gateway: &'a AccessGateway) -> Self {
        Self { gateway }
    }

    async fn product_owner(
        store: &dyn TableStore,
        product_id: &str,
    ) -> Result<Option<String>, ApiError> {
        let rows = store
            .select(Product::SPEC.table, &Where::new().eq("id", product_id))
            .await?;
        Ok(rows
            .into_iter()
            .next()
            .and_then(|row| row.get(Product::SPEC.owner_field).and_then(Value::as_str).map(str::to_string)))
    }

    /// Fail with the same 404 whether the product is missing or owned by a
    /// different identity.
    async fn require_owned_product(
        store: &dyn TableStore,
        product_id: &str,
        owner: &Uuid,
    ) -> Result<(), ApiError> {
        match Self::product_owner(store, product_id).await? {
            Some(o) if o == owner.to_string() => Ok(()),
            _ => Err(ApiError::not_found("Product not found")),
        }
    }

    /// Resolve an image row and walk its product reference back to the
    /// verified identity. Dangling or cross-owner references look identical
    /// to a missing image.
    async fn resolve_owned_image(
        store: &dyn TableStore,
        image_id: &str,
        owner: &Uuid,
    ) -> Result<Value, ApiError> {
        let rows = store.select(TABLE, &Where::new().eq("id", image_id)).await?;
        let image = rows
            .into_iter()
            .next()
            .ok_or_else(|| ApiError::not_found("Product image not found"))?;

        let product_id = image
            .get("product_id")
            .and_then(Value::as_str)
            .ok_or_else(|| ApiError::not_found("Product image not found"))?;

        match Self::product_owner(store, product_id).await? {
            Some(o) if o == owner.to_string() => Ok(image),
            _ => Err(ApiError::not_found("Product image not found")),
        }
    }

    async fn product_ids_of(
        store: &dyn TableStore,
        owner: &str,
    ) -> Result<Vec<Value>, ApiError> {
        let products = store
            .select(Product::SPEC.table, &Where::new().eq(Product::SPEC.owner_field, owner))
            .await?;
        Ok(products
            .into_iter()
            .filter_map(|p| p.get("id").cloned())
            .collect())
    }

    pub async fn create(
        &self,
        token: Option<&str>,
        payload: &CreateProductImageRequest,
    ) -> Result<Envelope, ApiError> {
        let owner = self.gateway.verify(token).await?;
        let store = self.gateway.privileged();

        Self::require_owned_product(store, &payload.product_id, &owner).await?;

        let row = as_object(serde_json::to_value(payload)?)?;
        let rows = store.insert(TABLE, Value::Object(row)).await?;
        let created = rows
            .into_iter()
            .next()
            .ok_or_else(|| ApiError::storage("Failed to create product image"))?;

        Ok(Envelope::row_with_message("Product image created successfully", created))
    }

    /// List the caller's product images: either one product's images (after
    /// an ownership check) or every image reachable through the caller's
    /// products.
    pub async fn list(
        &self,
        token: Option<&str>,
        product_id: Option<&str>,
    ) -> Result<Envelope, ApiError> {
        let owner = self.gateway.verify(token).await?;
        let store = self.gateway.privileged();

        let rows = match product_id {
            Some(pid) => {
                Self::require_owned_product(store, pid, &owner).await?;
                store.select(TABLE, &Where::new().eq("product_id", pid)).await?
            }
            None => {
                let ids = Self::product_ids_of(store, &owner.to_string()).await?;
                if ids.is_empty() {
                    return Ok(Envelope::rows(vec![]));
                }
                store.select(TABLE, &Where::new().is_in("product_id", ids)).await?
            }
        };

        Ok(Envelope::rows(rows))
    }

    pub async fn get(&self, id: &str, token: Option<&str>) -> Result<Envelope, ApiError> {
        let owner = self.gateway.verify(token).await?;
        let image = Self::resolve_owned_image(self.gateway.privileged(), id, &owner).await?;
        Ok(Envelope::row(image))
    }

    pub async fn update(
        &self,
        id: &str,
        token: Option<&str>,
        payload: &UpdateProductImageRequest,
    ) -> Result<Envelope, ApiError> {
        let owner = self.gateway.verify(token).await?;
        let store = self.gateway.privileged();

        Self::resolve_owned_image(store, id, &owner).await?;

        let patch = as_object(serde_json::to_value(payload)?)?;
        if patch.is_empty() {
            return Err(ApiError::validation("No fields to update"));
        }

        let rows = store
            .update(TABLE, &Where::new().eq("id", id), Value::Object(patch))
            .await?;
        let updated = rows
            .into_iter()
            .next()
            .ok_or_else(|| ApiError::storage("Failed to update product image"))?;

        Ok(Envelope::row_with_message("Product image updated successfully", updated))
    }

    pub async fn delete(&self, id: &str, token: Option<&str>) -> Result<Envelope, ApiError> {
        let owner = self.gateway.verify(token).await?;
        let store = self.gateway.privileged();

        Self::resolve_owned_image(store, id, &owner).await?;
        store.delete(TABLE, &Where::new().eq("id", id)).await?;

        Ok(Envelope::message("Product image deleted successfully"))
    }

    /// Public read, scoped by a trusted caller-supplied owner (or product) id.
    pub async fn list_public(
        &self,
        owner_id: &str,
        product_id: Option<&str>,
    ) -> Result<Envelope, ApiError> {
        let store = self.gateway.public();

        let rows = match product_id {
            Some(pid) => store.select(TABLE, &Where::new().eq("product_id", pid)).await?,
            None => {
                let ids = Self::product_ids_of(store, owner_id).await?;
                if ids.is_empty() {
                    return Ok(Envelope::rows(vec![]));
                }
                store.select(TABLE, &Where::new().is_in("product_id", ids)).await?
            }
        };

        Ok(Envelope::rows(rows))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CreateProductRequest;
    use crate::resource::ResourceController;
    use crate::testing::TestPlatform;
    use serde_json::json;

    async fn seed_product(platform: &TestPlatform, token: &str) -> String {
        let gateway = platform.gateway();
        let controller = ResourceController::<Product>::new(&gateway);
        let payload: CreateProductRequest =
            serde_json::from_value(json!({ "product_name": "Widget" })).unwrap();
        let env = controller.create(Some(token), &payload).await.unwrap();
        env.data.unwrap()["id"].as_str().unwrap().to_string()
    }

    fn image_payload(product_id: &str) -> CreateProductImageRequest {
        serde_json::from_value(json!({
            "product_id": product_id,
            "image_url": "https://img.example/1.png"
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn create_requires_owning_the_parent_product() {
        let platform = TestPlatform::new();
        let (token_a, _) = platform.issue_token();
        let (token_b, _) = platform.issue_token();
        let gateway = platform.gateway();
        let controller = ProductImageController::new(&gateway);

        let product_id = seed_product(&platform, &token_a).await;

        // Valid product id, but owned by someone else: 404, not 403.
        let err = controller
            .create(Some(&token_b), &image_payload(&product_id))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::NotFound(_)));

        let env = controller
            .create(Some(&token_a), &image_payload(&product_id))
            .await
            .unwrap();
        assert_eq!(env.data.unwrap()["product_id"], json!(product_id));
    }

    #[tokio::test]
    async fn mutation_via_foreign_product_is_not_found() {
        let platform = TestPlatform::new();
        let (token_a, _) = platform.issue_token();
        let (token_b, _) = platform.issue_token();
        let gateway = platform.gateway();
        let controller = ProductImageController::new(&gateway);

        let product_id = seed_product(&platform, &token_a).await;
        let env = controller
            .create(Some(&token_a), &image_payload(&product_id))
            .await
            .unwrap();
        let image_id = env.data.unwrap()["id"].as_str().unwrap().to_string();

        let patch: UpdateProductImageRequest =
            serde_json::from_value(json!({ "description": "side view" })).unwrap();
        let err = controller
            .update(&image_id, Some(&token_b), &patch)
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::NotFound(_)));

        let err = controller.delete(&image_id, Some(&token_b)).await.unwrap_err();
        assert!(matches!(err, ApiError::NotFound(_)));

        // The rightful owner can still update.
        let env = controller.update(&image_id, Some(&token_a), &patch).await.unwrap();
        assert_eq!(env.data.unwrap()["description"], "side view");
    }

    #[tokio::test]
    async fn list_walks_through_owned_products() {
        let platform = TestPlatform::new();
        let (token, user) = platform.issue_token();
        let gateway = platform.gateway();
        let controller = ProductImageController::new(&gateway);

        let product_id = seed_product(&platform, &token).await;
        controller
            .create(Some(&token), &image_payload(&product_id))
            .await
            .unwrap();

        let env = controller.list(Some(&token), None).await.unwrap();
        assert_eq!(env.count, Some(1));

        let env = controller.list(Some(&token), Some(&product_id)).await.unwrap();
        assert_eq!(env.count, Some(1));

        let env = controller
            .list_public(&user.to_string(), None)
            .await
            .unwrap();
        assert_eq!(env.count, Some(1));
    }

    #[tokio::test]
    async fn list_with_no_products_is_empty_not_an_error() {
        let platform = TestPlatform::new();
        let (token, _) = platform.issue_token();
        let gateway = platform.gateway();
        let controller = ProductImageController::new(&gateway);

        let env = controller.list(Some(&token), None).await.unwrap();
        assert_eq!(env.count, Some(0));
    }
}
