//! Account flow engine
//!
//! Drives the join, register, login, logout, and access-denial flows.
//! Identity state is derived per request by decoding the session cookie;
//! nothing is shared across requests, so the engine needs no locks. The
//! one cross-request hazard, the binding id, is regenerated together
//! with the new cookie on every privilege transition so a join token
//! observed before authentication cannot be replayed afterwards.

use std::sync::Arc;

use wicket_types::{AuthRequest, BindingId, CookieChange, FlashMessage, Method, Params};

use crate::config::AuthConfig;
use crate::cookie::SessionCookies;
use crate::crypto::HmacKey;
use crate::provider::{ProviderResult, UserProvider};
use crate::token::TokenCodec;
use crate::AuthError;

pub const MSG_LOGIN: &str = "You must be logged in to access that resource.";
pub const MSG_LOGIN_DIFFERENT: &str =
    "You do not have permissions to access that resources, try logging in as a different user.";
pub const MSG_INCORRECT_USER: &str = "Your username appears to be incorrect";
pub const MSG_INVALID_TOKEN: &str = "Your token is invalid or expired, please try joining again";
pub const MSG_INVALID_PASSWORD: &str = "The password you supplied was incorrect, please try again";
pub const MSG_MISSING_LOGIN_INFO: &str = "You must supply a login and password to login";

/// Status used for every post-flow redirect, forcing a GET follow-up
pub const SEE_OTHER: u16 = 303;

/// What the embedding framework should do after a flow ran.
///
/// A response always leaves the pipeline healthy: provider failures end
/// up in `messages` with `render` still set, never as an abort.
#[derive(Debug, Default)]
pub struct FlowResponse {
    /// Redirect target, if the flow ended in a redirect
    pub redirect: Option<String>,
    /// Status for the redirect (303 see-other)
    pub status: Option<u16>,
    /// Cookie to set or clear on the response
    pub cookie: Option<CookieChange>,
    /// Freshly regenerated binding id to install in the session context
    pub binding: Option<BindingId>,
    /// User-visible messages produced by the flow
    pub messages: Vec<FlashMessage>,
    /// Whether the flow's view should still be rendered
    pub render: bool,
}

impl FlowResponse {
    fn render() -> Self {
        Self {
            render: true,
            ..Self::default()
        }
    }

    fn see_other(mut self, target: impl Into<String>) -> Self {
        self.redirect = Some(target.into());
        self.status = Some(SEE_OTHER);
        self
    }

    fn error(&mut self, text: impl Into<String>) {
        self.messages.push(FlashMessage::error(text));
    }

    /// Whether the flow ended in a see-other redirect
    pub fn is_see_other(&self) -> bool {
        self.redirect.is_some() && self.status == Some(SEE_OTHER)
    }
}

/// The state machine orchestrating all account flows.
///
/// Holds only immutable configuration and the provider handle; safe to
/// share across concurrent requests.
pub struct AuthFlow<P: UserProvider> {
    provider: Arc<P>,
    cookies: SessionCookies,
}

impl<P: UserProvider> AuthFlow<P> {
    /// Create a flow engine.
    ///
    /// # Errors
    /// Returns `Configuration` if the signing key is shorter than the
    /// 32-byte minimum.
    pub fn new(config: AuthConfig, provider: Arc<P>) -> Result<Self, AuthError> {
        let key = HmacKey::new(&config.signing_key)
            .map_err(|e| AuthError::Configuration(e.to_string()))?;
        Ok(Self {
            provider,
            cookies: SessionCookies::new(key, config.session_lifetime),
        })
    }

    /// Access the cookie codec, for embedding layers that validate
    /// cookies outside the account flows (access-control middleware)
    pub fn cookies(&self) -> &SessionCookies {
        &self.cookies
    }

    /// Handle a request for a resource the current user may not access.
    ///
    /// Anonymous visitors are told to log in; recognized users that
    /// still landed here lack permission and are told to switch
    /// accounts. Either way the denied path is recorded as the next
    /// login target and the user is sent away with a 303.
    pub async fn forbidden(&self, request: &AuthRequest) -> FlowResponse {
        let user = self.user_from_cookie(request).await;
        let mut response = FlowResponse::render();

        if let Err(e) = self
            .provider
            .set_login_redirect(user.as_ref(), &request.path)
            .await
        {
            tracing::warn!("failed to record login redirect: {}", e);
        }

        let recognized = match &user {
            Some(u) => self.provider.verify_user(u).await,
            None => false,
        };

        if recognized {
            response.error(MSG_LOGIN_DIFFERENT);
        } else {
            response.error(MSG_LOGIN);
        }

        let target = self.provider.logout_redirect(user.as_ref()).await;
        response.see_other(target)
    }

    /// Handle the join entry point.
    ///
    /// On POST the submitted params are sealed into a join token keyed
    /// by the current binding id and handed to the provider, which
    /// typically mails the token out. The token only verifies again from
    /// the same session context.
    pub async fn join(&self, request: &AuthRequest) -> FlowResponse {
        let mut response = FlowResponse::render();

        if request.method == Method::Post {
            let token = match self.binding_codec(&request.binding).wrap(&request.params) {
                Ok(token) => token,
                Err(e) => {
                    tracing::error!("failed to seal join token: {}", e);
                    response.error(MSG_INVALID_TOKEN);
                    return response;
                }
            };

            if let Err(e) = self.provider.handle_join(&request.params, &token).await {
                tracing::warn!("join rejected by provider");
                response.error(e.message());
            }
        }

        response
    }

    /// Handle the registration entry point.
    ///
    /// Requires a `token` param minted by `join` under the current
    /// binding id. Missing token redirects back to join silently; a
    /// token that fails verification additionally surfaces a message. On
    /// POST with a verified token, registration completes and the new
    /// user is logged in.
    pub async fn register(&self, request: &AuthRequest) -> FlowResponse {
        let mut response = FlowResponse::render();

        let Some(token) = request.params.get("token") else {
            return response.see_other(self.provider.join_path().await);
        };

        let token_payload: Params = match self.binding_codec(&request.binding).unwrap(token) {
            Ok(payload) => payload,
            Err(_) => {
                response.error(MSG_INVALID_TOKEN);
                return response.see_other(self.provider.join_path().await);
            }
        };

        if request.method == Method::Post {
            match self
                .provider
                .handle_register(&request.params, &token_payload)
                .await
            {
                Ok(user) => return self.complete_login(&user, response).await,
                Err(e) => {
                    tracing::warn!("registration rejected by provider");
                    response.error(e.message());
                }
            }
        }

        response
    }

    /// Handle the login entry point.
    ///
    /// A valid cookie short-circuits straight to completion: logged-in
    /// users never see the login form. Otherwise a POST with both fields
    /// runs the credential check, with username and password failures
    /// distinguished for the user.
    pub async fn login(&self, request: &AuthRequest) -> FlowResponse {
        let mut response = FlowResponse::render();

        if let Some(user) = self.user_from_cookie(request).await {
            return self.complete_login(&user, response).await;
        }

        if request.method == Method::Post {
            let login = request.params.get("login").filter(|v| !v.is_empty());
            let password = request.params.get("password").filter(|v| !v.is_empty());

            let (Some(login), Some(password)) = (login, password) else {
                response.error(MSG_MISSING_LOGIN_INFO);
                return response;
            };

            match self.provider.get_user(Some(login.as_str())).await {
                Ok(Some(user)) => match self.provider.verify_password(&user, password).await {
                    Ok(true) => return self.complete_login(&user, response).await,
                    Ok(false) => {
                        tracing::debug!("login attempt rejected: bad password");
                        response.error(MSG_INVALID_PASSWORD);
                    }
                    Err(e) => response.error(e.message()),
                },
                Ok(None) => {
                    tracing::debug!("login attempt rejected: unknown user");
                    response.error(MSG_INCORRECT_USER);
                }
                Err(e) => response.error(e.message()),
            }
        }

        response
    }

    /// Handle logout: resolve the user for redirect targeting, clear the
    /// cookie, and send them on with a 303. Always redirects.
    pub async fn logout(&self, request: &AuthRequest) -> FlowResponse {
        let user = self.user_from_cookie(request).await;

        let response = FlowResponse {
            cookie: Some(self.cookies.revoke()),
            ..FlowResponse::default()
        };

        let target = self.provider.logout_redirect(user.as_ref()).await;
        response.see_other(target)
    }

    /// Resolve the current identity without side effects.
    ///
    /// This is the non-entry use of the original login action: other
    /// parts of the application asking "who is this request". Falls back
    /// to the provider's anonymous entity when the cookie resolves to
    /// nobody.
    pub async fn identify(
        &self,
        cookie: Option<&str>,
        binding: &BindingId,
    ) -> ProviderResult<Option<P::User>> {
        if let Some(record) = cookie.and_then(|c| self.cookies.read(c, binding)) {
            if let Some(user) = self.provider.get_user(Some(record.login.as_str())).await? {
                return Ok(Some(user));
            }
        }
        self.provider.get_user(None).await
    }

    /// Finish a login or registration: regenerate the binding id, issue
    /// the session cookie under it, and redirect to the provider's
    /// post-login target.
    ///
    /// The cookie is issued at most once per request, and only here, at
    /// an explicit login-completion event. Mere request activity never
    /// re-issues it, so idle sessions are not silently extended.
    async fn complete_login(&self, user: &P::User, mut response: FlowResponse) -> FlowResponse {
        let Some(login) = self.provider.user_login(user).await else {
            tracing::warn!("login completion aborted: provider returned no login");
            response.error(MSG_INCORRECT_USER);
            return response;
        };

        if response.cookie.is_none() {
            let binding = BindingId::generate();
            match self.cookies.issue(&login, &binding) {
                Ok(value) => {
                    response.cookie = Some(CookieChange::Set(value));
                    response.binding = Some(binding);
                }
                Err(e) => {
                    tracing::error!("failed to issue session cookie: {}", e);
                }
            }
        }

        let target = self.provider.login_redirect(Some(user)).await;
        response.see_other(target)
    }

    /// Derive the current identity from the presented cookie, enforcing
    /// signature, expiry, and binding. Every failure is anonymous.
    async fn user_from_cookie(&self, request: &AuthRequest) -> Option<P::User> {
        let record = request
            .cookie
            .as_deref()
            .and_then(|cookie| self.cookies.read(cookie, &request.binding))?;

        match self.provider.get_user(Some(record.login.as_str())).await {
            Ok(user) => user,
            Err(e) => {
                tracing::warn!("user lookup failed for session cookie: {}", e);
                None
            }
        }
    }

    /// Codec for join tokens, keyed by the session binding id rather
    /// than the global secret
    fn binding_codec(&self, binding: &BindingId) -> TokenCodec {
        TokenCodec::new(HmacKey::derive(binding.as_str()))
    }
}

impl<P: UserProvider> std::fmt::Debug for AuthFlow<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthFlow")
            .field("cookies", &self.cookies)
            .finish_non_exhaustive()
    }
}
