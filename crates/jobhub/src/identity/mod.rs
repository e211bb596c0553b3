mod generator;
mod visitor;

pub use generator::{generate_uuid, generate_uuid_with};
pub use visitor::{
    IdentityStore, IdentityStoreError, MemoryIdentityStore, TrackingIds, VisitorIdentity,
    SESSION_ID_KEY, VISITOR_ID_KEY,
};
