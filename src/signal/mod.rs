//! Trading signals
//!
//! - `payload` - instruments, actions and the fixed text template
//! - `sender` - the outbound transport seam and its reqwest implementation

mod payload;
mod sender;

pub use payload::{build_payload, Instrument, SignalAction};
pub use sender::{DeliveryDetail, DeliveryOutcome, HttpSender, WebhookSender};
