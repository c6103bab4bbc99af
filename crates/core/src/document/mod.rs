pub mod defaults;
pub mod id;
pub mod migrate;
pub mod model;

pub use migrate::migrate;
pub use model::SiteDocument;
