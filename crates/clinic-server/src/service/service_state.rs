//! Application state and dependency injection.

use clinic_postgres::PgClient;

use crate::TRACING_TARGET_SERVICE;
use crate::service::{
    AccessTokenService, CredentialAuthenticator, PasswordHasher, Result, ServiceConfig,
};

/// Application state.
///
/// Used for the [`State`] extraction (dependency injection).
///
/// [`State`]: axum::extract::State
#[must_use = "state does nothing unless you use it"]
#[derive(Debug, Clone)]
pub struct ServiceState {
    postgres: PgClient,

    password_hasher: PasswordHasher,
    access_tokens: AccessTokenService,
    authenticator: CredentialAuthenticator,
}

impl ServiceState {
    /// Connects to Postgres, applies migrations and bootstraps the
    /// administrator account.
    pub async fn from_config(config: &ServiceConfig) -> Result<Self> {
        config.validate()?;

        let postgres = config.connect_postgres().await?;
        let service_state = Self::from_client(postgres, config);

        service_state.bootstrap_admin(config).await?;

        Ok(service_state)
    }

    /// Builds the state around an existing pool without touching the
    /// database.
    pub fn from_client(postgres: PgClient, config: &ServiceConfig) -> Self {
        let password_hasher = PasswordHasher::new();

        Self {
            postgres,
            access_tokens: AccessTokenService::with_ttl_hours(config.token_ttl_hours),
            authenticator: CredentialAuthenticator::new(
                config.clinic_database.clone(),
                password_hasher.clone(),
            ),
            password_hasher,
        }
    }

    async fn bootstrap_admin(&self, config: &ServiceConfig) -> Result<()> {
        if let Some(account) = config
            .bootstrap_admin(&self.postgres, &self.password_hasher)
            .await?
        {
            tracing::info!(
                target: TRACING_TARGET_SERVICE,
                account_id = account.id,
                "Bootstrap administrator ready"
            );
        }

        Ok(())
    }

    #[inline]
    pub fn postgres(&self) -> &PgClient {
        &self.postgres
    }
}

macro_rules! impl_di {
    ($($f:ident: $t:ty),+) => {$(
        impl axum::extract::FromRef<ServiceState> for $t {
            fn from_ref(state: &ServiceState) -> Self {
                state.$f.clone()
            }
        }
    )+};
}

impl_di!(postgres: PgClient);

impl_di!(password_hasher: PasswordHasher);
impl_di!(access_tokens: AccessTokenService);
impl_di!(authenticator: CredentialAuthenticator);
