// handlers/mod.rs - One module per REST resource, one file per verb
//
// Every resource follows the same permission model: reads are open (scoped
// to the requester's trips where the data is trip-owned), writes require a
// bearer token and, for days/events/memberships, collaborator membership.

pub mod auth;
pub mod categories;
pub mod days;
pub mod events;
pub mod trips;
pub mod users;
pub mod usertrips;
