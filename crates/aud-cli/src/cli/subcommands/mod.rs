mod auth;
mod calendar;
mod rut;
mod third_party;

pub use auth::{AuthCommands, AuthLoginArgs};
pub use calendar::{CalendarArgs, CalendarCommands};
pub use rut::{RutCommands, RutExportArgs, RutExtractArgs, RutListArgs};
pub use third_party::{ThirdPartyCommands, ThirdPartyCreateArgs};
