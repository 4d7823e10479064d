// Domain layer: the matching game engine and its rules.

pub mod deck;
pub mod layout;
pub mod lobby_code;
pub mod player;
pub mod ports;
pub mod round;
pub mod scheduler;
pub mod setup;
pub mod term;
pub mod theme;
pub mod tuning;

pub use deck::{Card, DuplicateLevel, create_deck, shuffle};
pub use lobby_code::{InvalidLobbyCode, LobbyCode};
pub use player::{Player, RankedPlayer};
pub use ports::{LobbyDirectory, LobbyMember, TermSource};
pub use round::{ClickOutcome, GameStatus, IgnoreReason, Round};
pub use scheduler::TurnPopup;
pub use term::Term;
pub use theme::ColorTheme;
