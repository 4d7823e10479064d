// reqwest clients for the services this server talks to.

pub mod lobby;
pub mod terms;

pub use lobby::{LobbyClient, LobbyClientError};
pub use terms::TermsClient;
