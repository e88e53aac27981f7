//! In-memory user provider for testing

use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::Mutex;

use wicket_auth_core::{ProviderError, ProviderResult, UserProvider};
use wicket_types::Params;

/// A minimal user record for flow tests
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockUser {
    pub login: String,
    pub password: String,
    pub valid: bool,
}

/// In-memory provider backing the flow scenario tests.
///
/// Records join calls so tests can inspect the minted join token, and
/// can be told to fail join or registration with a given message.
#[derive(Default)]
pub struct MockProvider {
    users: DashMap<String, MockUser>,
    login_redirects: DashMap<String, String>,
    joins: Mutex<Vec<(Params, String)>>,
    join_error: Mutex<Option<String>>,
    register_error: Mutex<Option<String>>,
}

impl MockProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a valid user
    pub fn with_user(self, login: &str, password: &str) -> Self {
        self.users.insert(
            login.to_string(),
            MockUser {
                login: login.to_string(),
                password: password.to_string(),
                valid: true,
            },
        );
        self
    }

    /// Make handle_join fail with the given message
    pub fn fail_join(self, message: &str) -> Self {
        *self.join_error.lock().unwrap() = Some(message.to_string());
        self
    }

    /// Make handle_register fail with the given message
    pub fn fail_register(self, message: &str) -> Self {
        *self.register_error.lock().unwrap() = Some(message.to_string());
        self
    }

    /// Join calls recorded so far, as (params, minted token) pairs
    pub fn recorded_joins(&self) -> Vec<(Params, String)> {
        self.joins.lock().unwrap().clone()
    }

    /// The login redirect recorded for a login ("" for anonymous)
    pub fn recorded_login_redirect(&self, login: &str) -> Option<String> {
        self.login_redirects.get(login).map(|r| r.value().clone())
    }

    pub fn has_user(&self, login: &str) -> bool {
        self.users.contains_key(login)
    }
}

#[async_trait]
impl UserProvider for MockProvider {
    type User = MockUser;

    async fn get_user(&self, login: Option<&str>) -> ProviderResult<Option<MockUser>> {
        // No guest entity in this backend
        let Some(login) = login else { return Ok(None) };
        Ok(self.users.get(login).map(|u| u.value().clone()))
    }

    async fn user_login(&self, user: &MockUser) -> Option<String> {
        user.valid.then(|| user.login.clone())
    }

    async fn verify_password(&self, user: &MockUser, password: &str) -> ProviderResult<bool> {
        Ok(user.password == password)
    }

    async fn verify_user(&self, user: &MockUser) -> bool {
        user.valid
    }

    async fn set_password(&self, user: &MockUser, password: &str) -> ProviderResult<()> {
        let mut entry = self
            .users
            .get_mut(&user.login)
            .ok_or_else(|| ProviderError::new("no such user"))?;
        entry.password = password.to_string();
        Ok(())
    }

    async fn handle_join(&self, params: &Params, join_token: &str) -> ProviderResult<()> {
        if let Some(message) = self.join_error.lock().unwrap().clone() {
            return Err(ProviderError::new(message));
        }
        self.joins
            .lock()
            .unwrap()
            .push((params.clone(), join_token.to_string()));
        Ok(())
    }

    async fn handle_register(
        &self,
        params: &Params,
        token_payload: &Params,
    ) -> ProviderResult<MockUser> {
        if let Some(message) = self.register_error.lock().unwrap().clone() {
            return Err(ProviderError::new(message));
        }

        // The join token carried the login; the registration form
        // carries the chosen password
        let login = token_payload
            .get("login")
            .ok_or_else(|| ProviderError::new("join token carried no login"))?;
        let password = params.get("password").cloned().unwrap_or_default();

        let user = MockUser {
            login: login.clone(),
            password,
            valid: true,
        };
        self.users.insert(login.clone(), user.clone());
        Ok(user)
    }

    async fn join_path(&self) -> String {
        "/join".to_string()
    }

    async fn login_path(&self) -> String {
        "/login".to_string()
    }

    async fn login_redirect(&self, user: Option<&MockUser>) -> String {
        let key = user.map(|u| u.login.as_str()).unwrap_or("");
        self.login_redirects
            .get(key)
            .map(|r| r.value().clone())
            .unwrap_or_else(|| "/dashboard".to_string())
    }

    async fn logout_redirect(&self, user: Option<&MockUser>) -> String {
        match user {
            Some(user) => format!("/farewell/{}", user.login),
            None => "/".to_string(),
        }
    }

    async fn set_login_redirect(
        &self,
        user: Option<&MockUser>,
        location: &str,
    ) -> ProviderResult<()> {
        let key = user.map(|u| u.login.clone()).unwrap_or_default();
        self.login_redirects.insert(key, location.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_provider_lookup() {
        let provider = MockProvider::new().with_user("alice@example.com", "correct");

        let user = provider
            .get_user(Some("alice@example.com"))
            .await
            .unwrap()
            .unwrap();
        assert!(provider.verify_password(&user, "correct").await.unwrap());
        assert!(!provider.verify_password(&user, "wrong").await.unwrap());
        assert!(provider.get_user(Some("nobody")).await.unwrap().is_none());
        assert!(provider.get_user(None).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_mock_provider_set_password() {
        let provider = MockProvider::new().with_user("alice@example.com", "old");
        let user = provider
            .get_user(Some("alice@example.com"))
            .await
            .unwrap()
            .unwrap();

        provider.set_password(&user, "new").await.unwrap();

        let user = provider
            .get_user(Some("alice@example.com"))
            .await
            .unwrap()
            .unwrap();
        assert!(provider.verify_password(&user, "new").await.unwrap());
    }
}
