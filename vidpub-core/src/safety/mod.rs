//! Safety systems guarding the orchestration engine: daily rate limiting,
//! metadata risk detection and the emergency stop.

pub mod emergency_stop;
pub mod rate_limiter;
pub mod risk_detector;

pub use emergency_stop::{EmergencyStopSource, FileEmergencyStop};
pub use rate_limiter::{Clock, LocalClock, RateLimiter};
pub use risk_detector::{RiskCheckResult, RiskDetector};
