pub mod lookups;

pub use lookups::Entity as Lookups;
pub use lookups::Model as LookupRow;
