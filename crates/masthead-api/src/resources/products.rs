// Data product endpoints
//
// Products own their asset lists outright: an update resends the full
// list and the server replaces whatever it had stored. Assets never have
// a CRUD surface of their own.

use tracing::debug;

use crate::client::MastheadClient;
use crate::error::Error;
use crate::model::{DataProduct, Pagination};

/// Page size requested from the product list endpoint.
const PAGE_LIMIT: u32 = 100;

impl MastheadClient {
    /// List all data products, draining every page.
    ///
    /// `GET /clientApi/data-product/list?page={n}&limit=100`
    pub async fn list_data_products(&self) -> Result<Vec<DataProduct>, Error> {
        debug!("listing data products");
        self.paginate_all(|page| self.list_data_products_page(page))
            .await
    }

    async fn list_data_products_page(
        &self,
        page: u32,
    ) -> Result<(Vec<DataProduct>, Option<Pagination>), Error> {
        self.get_list(
            "clientApi/data-product/list",
            &[
                ("page", page.to_string()),
                ("limit", PAGE_LIMIT.to_string()),
            ],
        )
        .await
    }

    /// Create a data product. The server assigns the `uuid`.
    ///
    /// `POST /clientApi/data-product`
    pub async fn create_data_product(&self, product: &DataProduct) -> Result<DataProduct, Error> {
        debug!(name = %product.name, "creating data product");
        self.post("clientApi/data-product", product).await
    }

    /// Fetch a data product by uuid.
    ///
    /// `GET /clientApi/data-product/{uuid}`
    pub async fn get_data_product(&self, uuid: &str) -> Result<DataProduct, Error> {
        debug!(uuid, "fetching data product");
        self.get(&format!("clientApi/data-product/{uuid}")).await
    }

    /// Update a data product. The asset list in the payload supersedes the
    /// server's stored list wholesale. An empty `uuid` fails locally before
    /// any request is issued.
    ///
    /// `PUT /clientApi/data-product/{uuid}`
    pub async fn update_data_product(&self, product: &DataProduct) -> Result<DataProduct, Error> {
        if product.uuid.is_empty() {
            return Err(Error::Validation {
                message: "data product uuid cannot be empty".to_owned(),
            });
        }

        debug!(uuid = %product.uuid, "updating data product");
        self.put(&format!("clientApi/data-product/{}", product.uuid), product)
            .await
    }

    /// Delete a data product by uuid.
    ///
    /// `DELETE /clientApi/data-product/{uuid}`
    pub async fn delete_data_product(&self, uuid: &str) -> Result<(), Error> {
        if uuid.is_empty() {
            return Err(Error::Validation {
                message: "data product uuid cannot be empty".to_owned(),
            });
        }

        debug!(uuid, "deleting data product");
        self.delete(&format!("clientApi/data-product/{uuid}")).await
    }
}
