use uuid::Uuid;

use crate::domain::{Clock, HostError, HostSession, SessionStore};

// Token handed back to the dashboard after a successful PIN check.
pub struct HostLoginResult {
    pub token: String,
    pub expires_at: u64,
}

// PIN login use case with injected dependencies.
pub struct HostLoginUseCase<C, S> {
    pub clock: C,
    pub store: S,
    // No configured PIN means the gate never opens.
    pub expected_pin: Option<String>,
    pub ttl_seconds: u64,
}

impl<C, S> HostLoginUseCase<C, S>
where
    C: Clock,
    S: SessionStore,
{
    pub async fn execute(&self, pin: &str) -> Result<HostLoginResult, HostError> {
        match self.expected_pin.as_deref() {
            Some(expected) if !expected.is_empty() && expected == pin.trim() => {}
            _ => return Err(HostError::InvalidPin),
        }

        let token = Uuid::new_v4().to_string();
        let expires_at = self.clock.now_epoch_seconds() + self.ttl_seconds;
        let session = HostSession {
            session_id: Uuid::new_v4().to_string(),
            expires_at,
        };

        self.store
            .insert(token.clone(), session)
            .await
            .map_err(|_| HostError::StorageFailure)?;

        Ok(HostLoginResult { token, expires_at })
    }
}
