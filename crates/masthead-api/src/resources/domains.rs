// Data domain endpoints
//
// Domains are keyed by a server-assigned `uuid`. The list endpoint is
// paginated by page number; the aggregator in `client.rs` drains it.

use tracing::debug;

use crate::client::MastheadClient;
use crate::error::Error;
use crate::model::{Domain, Pagination};

impl MastheadClient {
    /// List all data domains, draining every page.
    ///
    /// `GET /clientApi/data-domain/list?page={n}`
    pub async fn list_domains(&self) -> Result<Vec<Domain>, Error> {
        debug!("listing data domains");
        self.paginate_all(|page| self.list_domains_page(page)).await
    }

    async fn list_domains_page(&self, page: u32) -> Result<(Vec<Domain>, Option<Pagination>), Error> {
        self.get_list("clientApi/data-domain/list", &[("page", page.to_string())])
            .await
    }

    /// Create a data domain. The server assigns the `uuid` and resolves
    /// `slack_channel_name` into a channel binding.
    ///
    /// `POST /clientApi/data-domain`
    pub async fn create_domain(&self, domain: &Domain) -> Result<Domain, Error> {
        debug!(name = %domain.name, "creating data domain");
        self.post("clientApi/data-domain", domain).await
    }

    /// Fetch a data domain by uuid.
    ///
    /// `GET /clientApi/data-domain/{uuid}`
    pub async fn get_domain(&self, uuid: &str) -> Result<Domain, Error> {
        debug!(uuid, "fetching data domain");
        self.get(&format!("clientApi/data-domain/{uuid}")).await
    }

    /// Update a data domain. The payload must carry the `uuid`; an empty
    /// one fails locally before any request is issued.
    ///
    /// `PUT /clientApi/data-domain/{uuid}`
    pub async fn update_domain(&self, domain: &Domain) -> Result<Domain, Error> {
        if domain.uuid.is_empty() {
            return Err(Error::Validation {
                message: "domain uuid cannot be empty".to_owned(),
            });
        }

        debug!(uuid = %domain.uuid, "updating data domain");
        self.put(&format!("clientApi/data-domain/{}", domain.uuid), domain)
            .await
    }

    /// Delete a data domain by uuid.
    ///
    /// `DELETE /clientApi/data-domain/{uuid}`
    pub async fn delete_domain(&self, uuid: &str) -> Result<(), Error> {
        if uuid.is_empty() {
            return Err(Error::Validation {
                message: "domain uuid cannot be empty".to_owned(),
            });
        }

        debug!(uuid, "deleting data domain");
        self.delete(&format!("clientApi/data-domain/{uuid}")).await
    }
}
