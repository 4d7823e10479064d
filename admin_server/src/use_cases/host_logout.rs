use crate::domain::{HostError, SessionStore};

pub struct HostLogoutResult {
    pub revoked: bool,
}

// Revokes a host token; unknown tokens are not an error.
pub struct HostLogoutUseCase<S> {
    pub store: S,
}

impl<S> HostLogoutUseCase<S>
where
    S: SessionStore,
{
    pub async fn execute(&self, token: &str) -> Result<HostLogoutResult, HostError> {
        let revoked = self
            .store
            .remove(token)
            .await
            .map_err(|_| HostError::StorageFailure)?;

        Ok(HostLogoutResult { revoked })
    }
}
