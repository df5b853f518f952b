//! Match planning domain models.
//!
//! Provides the data types of a season: who plays, how two participants
//! are paired, what is played on one date, and the full sequence of dates.
//!
//! # Domain Mappings
//!
//! | u-matchplan | Tennis subscription | Chess club | Office league |
//! |-------------|---------------------|------------|---------------|
//! | Participant | Player | Member | Team |
//! | Pairing | Match | Game | Fixture |
//! | Round | Court booking of one evening | Club night | Match day |
//! | Schedule | Season plan | Season plan | Fixture list |

mod pairing;
mod participant;
mod round;
mod schedule;

pub use pairing::{Pairing, can_extend};
pub use participant::Participant;
pub use round::Round;
pub use schedule::{Schedule, Slot};
