use crate::domain::{Clock, HostError, HostSession, SessionStore};

// Checks a host token and evicts it once expired.
pub struct VerifyHostUseCase<C, S> {
    pub clock: C,
    pub store: S,
}

impl<C, S> VerifyHostUseCase<C, S>
where
    C: Clock,
    S: SessionStore,
{
    pub async fn execute(&self, token: &str) -> Result<HostSession, HostError> {
        let session = self
            .store
            .get(token)
            .await
            .map_err(|_| HostError::StorageFailure)?
            .ok_or(HostError::InvalidToken)?;

        if session.expires_at <= self.clock.now_epoch_seconds() {
            self.store
                .remove(token)
                .await
                .map_err(|_| HostError::StorageFailure)?;
            return Err(HostError::SessionExpired);
        }

        Ok(session)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::use_cases::test_support::{FailureFlags, FixedClock, RecordingSessionStore};

    fn session(expires_at: u64) -> HostSession {
        HostSession {
            session_id: "session-1".to_string(),
            expires_at,
        }
    }

    #[tokio::test]
    async fn when_session_is_live_then_returns_it() {
        let store = RecordingSessionStore::new();
        store.insert_test_session("token", session(2_000));
        let use_case = VerifyHostUseCase {
            clock: FixedClock(1_000_000),
            store,
        };

        let result = use_case.execute("token").await.expect("expected session");

        assert_eq!(result.session_id, "session-1");
    }

    #[tokio::test]
    async fn when_session_is_expired_then_it_is_removed() {
        let store = RecordingSessionStore::new();
        store.insert_test_session("token", session(1_000));
        let use_case = VerifyHostUseCase {
            clock: FixedClock(1_000_000),
            store: store.clone(),
        };

        let result = use_case.execute("token").await;

        assert!(matches!(result, Err(HostError::SessionExpired)));
        assert!(store.get_test_session("token").is_none());
    }

    #[tokio::test]
    async fn when_token_is_unknown_then_returns_invalid_token() {
        let use_case = VerifyHostUseCase {
            clock: FixedClock(0),
            store: RecordingSessionStore::new(),
        };

        assert!(matches!(
            use_case.execute("missing").await,
            Err(HostError::InvalidToken)
        ));
    }

    #[tokio::test]
    async fn when_store_get_fails_then_returns_storage_failure() {
        let store = RecordingSessionStore::new().with_failures(FailureFlags {
            get: true,
            ..FailureFlags::default()
        });
        let use_case = VerifyHostUseCase {
            clock: FixedClock(0),
            store,
        };

        assert!(matches!(
            use_case.execute("token").await,
            Err(HostError::StorageFailure)
        ));
    }
}
