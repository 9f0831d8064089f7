pub mod ack;
pub mod document;
pub mod query;

pub use ack::*;
pub use document::*;
pub use query::*;

// Collection names in bhromonkariDB
pub const USERS: &str = "users";
pub const TOUR_PLACES: &str = "tourPlaces";
pub const TOURIST_WALLET: &str = "touristWallet";
pub const REGULAR_SPENDING: &str = "regularSpending";
pub const BOOKINGS: &str = "bookings";
pub const TOUR_PLANS: &str = "tourPlans";

/// Collections looked up by `email`
pub const EMAIL_KEYED_COLLECTIONS: [&str; 5] =
    [USERS, TOURIST_WALLET, REGULAR_SPENDING, BOOKINGS, TOUR_PLANS];
