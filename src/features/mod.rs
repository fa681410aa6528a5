// Feature modules hosted by the shell
//
// Each module is a vertical slice: API payload types, a capability trait,
// a transport-backed client, a typed dependencies container, a factory, and
// the feature itself. The shell never sees these concrete types; it only
// holds `Box<dyn Feature>` values produced by the factories.

pub mod feed;
pub mod friends;
pub mod profile;
