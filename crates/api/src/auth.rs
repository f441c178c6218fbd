use async_trait::async_trait;
use subtle::ConstantTimeEq;
use uuid::Uuid;

use domain::auth::{AuthProvider, LeagueMembership, SessionIdentity};
use domain::errors::{DomainError, DomainResult};
use domain::repositories::{Gateway, LeagueRepository, TeamRepository};

/// Session-token resolver backed by the store.
///
/// Tokens look like `<user-uuid>` (no shared key configured) or
/// `<user-uuid>.<key>` where the key half is compared in constant time.
/// Real identity provisioning happens upstream; this provider only turns a
/// token into a user id and answers league-membership questions from the
/// teams table.
pub struct TokenAuthProvider {
    gateway: Gateway,
    session_token_key: Option<String>,
}

impl TokenAuthProvider {
    pub fn new(gateway: Gateway, session_token_key: Option<String>) -> Self {
        Self {
            gateway,
            session_token_key,
        }
    }

    fn parse_token(&self, token: &str) -> DomainResult<Uuid> {
        let (user_part, key_part) = match token.split_once('.') {
            Some((user, key)) => (user, Some(key)),
            None => (token, None),
        };

        if let Some(expected) = &self.session_token_key {
            let supplied = key_part.unwrap_or_default();
            let matches: bool = supplied
                .as_bytes()
                .ct_eq(expected.as_bytes())
                .into();
            if !matches {
                return Err(DomainError::Unauthorized(
                    "Invalid session token".to_string(),
                ));
            }
        }

        user_part
            .parse()
            .map_err(|_| DomainError::Unauthorized("Malformed session token".to_string()))
    }
}

#[async_trait]
impl AuthProvider for TokenAuthProvider {
    async fn identify(&self, session_token: &str) -> DomainResult<SessionIdentity> {
        let user_id = self.parse_token(session_token)?;
        Ok(SessionIdentity {
            user_id,
            is_admin: false,
        })
    }

    async fn league_membership(
        &self,
        user_id: Uuid,
        league_id: Uuid,
    ) -> DomainResult<LeagueMembership> {
        let league = self.gateway.leagues.get(league_id).await?.ok_or_else(|| {
            DomainError::NotFound(format!("League {} not found", league_id))
        })?;

        let is_commissioner = league.commissioner_user_id == user_id;
        let team_id = self
            .gateway
            .teams
            .list(league_id)
            .await?
            .into_iter()
            .find(|t| t.is_owned_by(user_id))
            .map(|t| t.id);

        Ok(LeagueMembership {
            is_member: is_commissioner || team_id.is_some(),
            is_commissioner,
            team_id,
        })
    }
}
