pub mod competition_users;
pub mod events;
pub mod picks;

pub use competition_users::Entity as CompetitionUsers;
pub use competition_users::Model as CompetitionUser;
pub use events::Entity as Events;
pub use events::Model as Event;
pub use picks::Entity as Picks;
pub use picks::Model as Pick;
