//! Typed records for the backend service's tables.
//!
//! Every row crossing the collaborator boundary is deserialized into one of
//! these via sqlx's FromRow derive; free-form fields (booking status) are
//! validated before domain code sees them.

pub mod booking;
pub mod profile;
pub mod review;
pub mod room;
pub mod settings;

pub use booking::{Booking, BookingAdminRow, BookingStatus, BookingWithRoom};
pub use profile::Profile;
pub use review::{average_rating, ReviewWithAuthor};
pub use room::Room;
pub use settings::SiteSettings;
