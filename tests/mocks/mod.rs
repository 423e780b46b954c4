//! Test doubles for the site's injected capabilities.

pub mod mock_analytics;
pub mod mock_gateway;
pub mod mock_opener;

#[allow(unused_imports)]
pub use mock_analytics::RecordingAnalytics;
#[allow(unused_imports)]
pub use mock_gateway::MockGateway;
#[allow(unused_imports)]
pub use mock_opener::RecordingOpener;
