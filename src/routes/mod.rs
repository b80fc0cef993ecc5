/// Router Module Index
///
/// Splits the routing table by how the route guard treats it. The guard itself is
/// applied once, around the whole router, in `create_router`.

/// Health, the login API, and the public-only entry pages.
pub mod public;

/// Back-office page shells. Paths under a protected prefix require a session.
pub mod dashboard;
