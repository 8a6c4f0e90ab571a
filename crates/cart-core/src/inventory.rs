//! The inventory/catalog collaborator.

use std::sync::Arc;

use async_trait::async_trait;
use cart_fetch::FetchClient;
use serde::Deserialize;

use crate::error::InventoryError;
use crate::ids::ProductId;
use crate::item::{Product, StockRecord};

/// Remote source of stock levels and product details.
#[async_trait]
pub trait Inventory: Send + Sync {
    /// Current stock for `id`.
    async fn stock(&self, id: ProductId) -> Result<StockRecord, InventoryError>;

    /// Catalog details for `id`.
    async fn product(&self, id: ProductId) -> Result<Product, InventoryError>;
}

#[async_trait]
impl<T: Inventory + ?Sized> Inventory for Arc<T> {
    async fn stock(&self, id: ProductId) -> Result<StockRecord, InventoryError> {
        (**self).stock(id).await
    }

    async fn product(&self, id: ProductId) -> Result<Product, InventoryError> {
        (**self).product(id).await
    }
}

#[derive(Deserialize)]
struct StockBody {
    amount: u32,
}

/// [`Inventory`] over the REST API: `GET /stock/{id}` and `GET /products/{id}`.
#[derive(Debug, Clone)]
pub struct HttpInventory {
    client: FetchClient,
}

impl HttpInventory {
    /// Use `client`, which should carry the API base URL.
    pub fn new(client: FetchClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Inventory for HttpInventory {
    async fn stock(&self, id: ProductId) -> Result<StockRecord, InventoryError> {
        let body: StockBody = self
            .client
            .get(format!("/stock/{}", id))
            .header("Accept", "application/json")
            .send()
            .await?
            .error_for_status()?
            .json()?;
        tracing::debug!(product_id = %id, amount = body.amount, "fetched stock");
        Ok(StockRecord::new(id, body.amount))
    }

    async fn product(&self, id: ProductId) -> Result<Product, InventoryError> {
        let product: Product = self
            .client
            .get(format!("/products/{}", id))
            .header("Accept", "application/json")
            .send()
            .await?
            .error_for_status()?
            .json()?;
        if product.id != id {
            return Err(InventoryError::Unavailable(format!(
                "asked for product {}, catalog answered with {}",
                id, product.id
            )));
        }
        tracing::debug!(product_id = %id, title = %product.title, "fetched product");
        Ok(product)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cart_fetch::{FetchError, RequestBuilder, Response, Transport};
    use std::collections::HashMap;

    /// Answers from a fixed path -> (status, body) table.
    struct Routes(HashMap<&'static str, (u16, &'static str)>);

    #[async_trait]
    impl Transport for Routes {
        async fn send(&self, request: RequestBuilder) -> Result<Response, FetchError> {
            let path = request.url().trim_start_matches("http://api.test");
            match self.0.get(path) {
                Some((status, body)) => Ok(Response::new(
                    *status,
                    HashMap::new(),
                    body.as_bytes().to_vec(),
                )),
                None => Err(FetchError::RequestError(format!("connection refused: {}", path))),
            }
        }
    }

    fn inventory(routes: &[(&'static str, u16, &'static str)]) -> HttpInventory {
        let table = routes
            .iter()
            .map(|&(path, status, body)| (path, (status, body)))
            .collect();
        HttpInventory::new(
            FetchClient::with_transport(Routes(table)).with_base_url("http://api.test"),
        )
    }

    #[tokio::test]
    async fn test_stock_lookup() {
        let inv = inventory(&[("/stock/1", 200, r#"{"id":1,"amount":5}"#)]);
        let stock = inv.stock(ProductId::new(1)).await.unwrap();
        assert_eq!(stock, StockRecord::new(ProductId::new(1), 5));
    }

    #[tokio::test]
    async fn test_product_lookup() {
        let inv = inventory(&[(
            "/products/2",
            200,
            r#"{"id":2,"title":"Running shoe","price":139.9,"image":"shoe.jpg"}"#,
        )]);
        let product = inv.product(ProductId::new(2)).await.unwrap();
        assert_eq!(product.title, "Running shoe");
        assert_eq!(product.price, 139.9);
    }

    #[tokio::test]
    async fn test_not_found_status_is_error() {
        let inv = inventory(&[("/stock/3", 404, "{}")]);
        let err = inv.stock(ProductId::new(3)).await.unwrap_err();
        assert!(matches!(err, InventoryError::Fetch(ref e) if e.is_not_found()));
    }

    #[tokio::test]
    async fn test_transport_failure_is_error() {
        let inv = inventory(&[]);
        assert!(inv.stock(ProductId::new(1)).await.is_err());
        assert!(inv.product(ProductId::new(1)).await.is_err());
    }

    #[tokio::test]
    async fn test_negative_stock_is_parse_error() {
        let inv = inventory(&[("/stock/1", 200, r#"{"amount":-1}"#)]);
        let err = inv.stock(ProductId::new(1)).await.unwrap_err();
        assert!(matches!(err, InventoryError::Fetch(FetchError::ParseError(_))));
    }

    #[tokio::test]
    async fn test_mismatched_product_id() {
        let inv = inventory(&[(
            "/products/2",
            200,
            r#"{"id":9,"title":"Other","price":1.0,"image":""}"#,
        )]);
        assert!(matches!(
            inv.product(ProductId::new(2)).await,
            Err(InventoryError::Unavailable(_))
        ));
    }
}
