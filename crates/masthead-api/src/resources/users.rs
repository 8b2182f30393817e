// User endpoints
//
// Users are keyed by email address; there is no synthetic ID, so update
// and delete address the account by email.

use tracing::debug;

use crate::client::MastheadClient;
use crate::error::Error;
use crate::model::User;

impl MastheadClient {
    /// List all users.
    ///
    /// `GET /clientApi/user/list` (not paginated)
    pub async fn list_users(&self) -> Result<Vec<User>, Error> {
        debug!("listing users");
        let (users, _) = self.get_list("clientApi/user/list", &[]).await?;
        Ok(users)
    }

    /// Create a user.
    ///
    /// `POST /clientApi/user`
    ///
    /// Returns the server's canonical representation, which may differ
    /// from the input (defaults applied).
    pub async fn create_user(&self, user: &User) -> Result<User, Error> {
        debug!(email = %user.email, "creating user");
        self.post("clientApi/user", user).await
    }

    /// Change a user's role.
    ///
    /// `PUT /clientApi/user/role`
    pub async fn update_user_role(&self, user: &User) -> Result<User, Error> {
        if user.email.is_empty() {
            return Err(Error::Validation {
                message: "user email cannot be empty".to_owned(),
            });
        }

        debug!(email = %user.email, "updating user role");
        self.put("clientApi/user/role", user).await
    }

    /// Delete a user by email.
    ///
    /// `DELETE /clientApi/user/{email}`
    pub async fn delete_user(&self, email: &str) -> Result<(), Error> {
        if email.is_empty() {
            return Err(Error::Validation {
                message: "user email cannot be empty".to_owned(),
            });
        }

        debug!(email, "deleting user");
        self.delete(&format!("clientApi/user/{email}")).await
    }
}
