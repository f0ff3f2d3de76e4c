pub mod load;
pub mod overlay;
pub mod protocol;
pub mod style;
pub mod viewport;

pub use load::{FetchError, FetchTicket, StyleDocument, StyleLoad, StyleRequests};
pub use overlay::{ELECTORAL_OVERLAY, Overlay, PMTILES_SCHEME};
pub use protocol::{ProtocolBackend, ProtocolLease, ProtocolRegistry};
pub use style::{STYLES_PATH, StyleEntry, StyleError, StyleId};
pub use viewport::{BASEMAP_VIEWPORT, ELECTORAL_VIEWPORT, MapOptions, ViewportConfig};
