//! Adapters: concrete implementations of the port traits.
//!
//! | Adapter       | Implements     | Connects to                 |
//! |---------------|----------------|-----------------------------|
//! | `log_sink`    | EventSink      | `log` facade                |
//! | `script`      | CommandSource  | timed steps from config     |
//! | `stdin`       | CommandSource  | keyboard via reader thread  |
//! | `time`        | Clock          | `embassy_time` time driver  |

pub mod log_sink;
pub mod script;
pub mod stdin;
pub mod time;
