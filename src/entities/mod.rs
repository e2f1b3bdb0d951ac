mod driver;
mod location;
mod payment;
mod rating;
mod ride;
mod rider;

pub use driver::{Driver, Vehicle};
pub use location::{Coordinates, Location};
pub use payment::{Fare, Kind as PaymentKind, Payment};
pub use rating::{Rating, Subject as RatingSubject};
pub use ride::{Ride, RideId, Status as RideStatus};
pub use rider::Rider;
