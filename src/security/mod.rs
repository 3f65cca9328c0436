//! User management through the security service.
//!
//! A user "exists" when it can be fetched. [`SecurityService::user_existence`]
//! distinguishes a missing user from a failed lookup; the boolean
//! [`SecurityService::user_exists`] treats every failure as "does not exist".

pub mod user;

pub use user::User;

use crate::client::XldClient;
use crate::error::{XldError, XldResult};
use crate::existence::Existence;
use crate::transport::{ApiRequest, Method, Transport};
use log::{debug, info};

/// Facade over the security service.
#[derive(Debug)]
pub struct SecurityService<'a, T: Transport> {
    client: &'a XldClient<T>,
}

impl<'a, T: Transport> SecurityService<'a, T> {
    pub(crate) fn new(client: &'a XldClient<T>) -> Self {
        Self { client }
    }

    fn user_path(&self, name: &str) -> String {
        format!("{}/user/{}", self.client.config().paths.security, name)
    }

    /// Fetch a user by name.
    pub async fn get_user(&self, name: &str) -> XldResult<User> {
        debug!("Getting user '{}'", name);
        let request = ApiRequest::get(self.user_path(name))?;
        self.client.send(request).await
    }

    /// Probe for a user, keeping lookup failures apart from a missing user.
    pub async fn user_existence(&self, name: &str) -> Existence {
        match self.get_user(name).await {
            Ok(_) => Existence::Present,
            Err(error) if error.is_not_found() => Existence::Absent,
            Err(error) => {
                debug!("User lookup for '{}' failed: {}", name, error);
                Existence::Unknown(error)
            }
        }
    }

    /// Whether `name` can be fetched. Any failure counts as `false`.
    pub async fn user_exists(&self, name: &str) -> bool {
        self.user_existence(name).await.is_present()
    }

    /// Create a user without a password.
    ///
    /// # Errors
    ///
    /// [`XldError::AlreadyExists`] when the user can already be fetched.
    pub async fn create_user(&self, name: &str, admin: bool) -> XldResult<User> {
        if self.user_exists(name).await {
            return Err(XldError::already_exists(format!("user '{}'", name)));
        }

        info!("Creating user '{}' (admin: {})", name, admin);
        let request = ApiRequest::new(Method::Post, self.user_path(name))?
            .with_body(&User::new(name, admin))?;
        self.client.send(request).await
    }

    /// Replace the password of an existing user.
    ///
    /// The current record is fetched and sent back in full with the new password.
    ///
    /// # Errors
    ///
    /// [`XldError::NotFound`] when the user cannot be fetched; no update is sent
    /// in that case.
    pub async fn set_password_for_user(&self, name: &str, password: &str) -> XldResult<()> {
        if !self.user_exists(name).await {
            return Err(XldError::not_found(format!("user '{}'", name)));
        }

        let user = self.get_user(name).await?.with_password(password);

        info!("Setting password for user '{}'", name);
        let request = ApiRequest::new(Method::Put, self.user_path(name))?.with_body(&user)?;
        let _: serde_json::Value = self.client.send(request).await?;
        Ok(())
    }
}
